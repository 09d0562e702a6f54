use std::collections::BTreeMap;
use std::fmt::Write;

use serde::Serialize;

use super::domain::{BusinessPlan, PlanCategory, PlanId};
use super::evaluation::ScoreDimension;

/// Descriptive statistics for one score across a corpus.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreStatistics {
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
    pub std_dev: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorpusStatistics {
    pub overall: ScoreStatistics,
    pub feasibility: ScoreStatistics,
    pub profitability: ScoreStatistics,
    pub innovation: ScoreStatistics,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketTrends {
    pub average_market_size: f64,
    pub average_growth_rate: f64,
    pub average_break_even_months: f64,
    pub average_ltv_cac_ratio: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanAnalytics {
    pub total_plans: usize,
    pub statistics: CorpusStatistics,
    pub category_distribution: BTreeMap<PlanCategory, usize>,
    pub market_trends: MarketTrends,
    pub insights: Vec<String>,
}

/// Summary of the whole corpus; `None` when there are no plans.
pub fn analyze(plans: &[BusinessPlan]) -> Option<PlanAnalytics> {
    Some(PlanAnalytics {
        total_plans: plans.len(),
        statistics: calculate_statistics(plans)?,
        category_distribution: category_distribution(plans),
        market_trends: market_trends(plans)?,
        insights: generate_insights(plans),
    })
}

pub fn calculate_statistics(plans: &[BusinessPlan]) -> Option<CorpusStatistics> {
    let stats = |score: fn(&BusinessPlan) -> f64| {
        let values: Vec<f64> = plans.iter().map(score).collect();
        describe(&values)
    };

    Some(CorpusStatistics {
        overall: stats(|plan| plan.overall_score)?,
        feasibility: stats(|plan| plan.feasibility_score)?,
        profitability: stats(|plan| plan.profitability_score)?,
        innovation: stats(|plan| plan.innovation_score)?,
    })
}

fn describe(values: &[f64]) -> Option<ScoreStatistics> {
    if values.is_empty() {
        return None;
    }

    let count = values.len() as f64;
    let mean = values.iter().sum::<f64>() / count;

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let middle = sorted.len() / 2;
    let median = if sorted.len() % 2 == 0 {
        (sorted[middle - 1] + sorted[middle]) / 2.0
    } else {
        sorted[middle]
    };

    // sample standard deviation, zero for a single value
    let std_dev = if values.len() > 1 {
        let variance =
            values.iter().map(|value| (value - mean).powi(2)).sum::<f64>() / (count - 1.0);
        variance.sqrt()
    } else {
        0.0
    };

    Some(ScoreStatistics {
        mean,
        median,
        min: sorted[0],
        max: sorted[sorted.len() - 1],
        std_dev,
    })
}

pub fn category_distribution(plans: &[BusinessPlan]) -> BTreeMap<PlanCategory, usize> {
    let mut counts = BTreeMap::new();
    for plan in plans {
        *counts.entry(plan.category).or_insert(0) += 1;
    }
    counts
}

pub fn market_trends(plans: &[BusinessPlan]) -> Option<MarketTrends> {
    if plans.is_empty() {
        return None;
    }
    let count = plans.len() as f64;
    let average = |metric: fn(&BusinessPlan) -> f64| plans.iter().map(metric).sum::<f64>() / count;

    let ratios: Vec<f64> = plans
        .iter()
        .filter_map(|plan| plan.financial_projection.ltv_cac_ratio())
        .collect();
    let average_ltv_cac_ratio = if ratios.is_empty() {
        0.0
    } else {
        ratios.iter().sum::<f64>() / ratios.len() as f64
    };

    Some(MarketTrends {
        average_market_size: average(|plan| plan.market_analysis.market_size),
        average_growth_rate: average(|plan| plan.market_analysis.market_growth_rate),
        average_break_even_months: average(|plan| {
            f64::from(plan.financial_projection.break_even_months)
        }),
        average_ltv_cac_ratio,
    })
}

pub fn generate_insights(plans: &[BusinessPlan]) -> Vec<String> {
    let mut insights = Vec::new();

    let Some(best) = plans
        .iter()
        .max_by(|left, right| left.overall_score.total_cmp(&right.overall_score))
    else {
        return insights;
    };
    insights.push(format!(
        "Top scoring plan: \"{}\" ({:.1})",
        best.title, best.overall_score
    ));

    let distribution = category_distribution(plans);
    // ties resolve to the first category in declaration order
    if let Some((category, count)) = distribution
        .iter()
        .fold(None::<(&PlanCategory, &usize)>, |best, entry| match best {
            Some(current) if current.1 >= entry.1 => Some(current),
            _ => Some(entry),
        })
    {
        insights.push(format!(
            "Most common category: {} ({} plan(s))",
            category.label(),
            count
        ));
    }

    if let Some(trends) = market_trends(plans) {
        insights.push(format!(
            "Average market size: {:.0}B",
            trends.average_market_size
        ));
        insights.push(format!(
            "Average market growth: {:.1}%",
            trends.average_growth_rate
        ));
    }

    if let Some((plan, ratio)) = plans
        .iter()
        .filter_map(|plan| {
            plan.financial_projection
                .ltv_cac_ratio()
                .map(|ratio| (plan, ratio))
        })
        .max_by(|left, right| left.1.total_cmp(&right.1))
    {
        insights.push(format!(
            "Best unit economics: \"{}\" (LTV/CAC {:.1}x)",
            plan.title, ratio
        ));
    }

    insights
}

/// Head-to-head score differences, `left - right`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanComparison {
    pub left: PlanId,
    pub right: PlanId,
    pub overall_diff: f64,
    pub feasibility_diff: f64,
    pub profitability_diff: f64,
    pub innovation_diff: f64,
}

pub fn compare_plans(left: &BusinessPlan, right: &BusinessPlan) -> PlanComparison {
    PlanComparison {
        left: left.id.clone(),
        right: right.id.clone(),
        overall_diff: left.overall_score - right.overall_score,
        feasibility_diff: left.feasibility_score - right.feasibility_score,
        profitability_diff: left.profitability_score - right.profitability_score,
        innovation_diff: left.innovation_score - right.innovation_score,
    }
}

pub fn render_comparison_report(left: &BusinessPlan, right: &BusinessPlan) -> String {
    let mut md = String::new();

    let _ = writeln!(md, "# Plan comparison\n");
    let _ = writeln!(md, "## Overview\n");
    let _ = writeln!(md, "| Item | Plan A | Plan B |");
    let _ = writeln!(md, "|------|--------|--------|");
    let _ = writeln!(md, "| Title | {} | {} |", left.title, right.title);
    let _ = writeln!(
        md,
        "| Category | {} | {} |",
        left.category.label(),
        right.category.label()
    );
    let _ = writeln!(
        md,
        "| Overall score | {:.1} | {:.1} |\n",
        left.overall_score, right.overall_score
    );

    let _ = writeln!(md, "## Score comparison\n");
    let _ = writeln!(md, "| Dimension | Plan A | Plan B | Leader |");
    let _ = writeln!(md, "|-----------|--------|--------|--------|");
    for (dimension, a, b) in [
        (
            ScoreDimension::Feasibility,
            left.feasibility_score,
            right.feasibility_score,
        ),
        (
            ScoreDimension::Profitability,
            left.profitability_score,
            right.profitability_score,
        ),
        (
            ScoreDimension::Innovation,
            left.innovation_score,
            right.innovation_score,
        ),
    ] {
        let _ = writeln!(
            md,
            "| {} | {:.1} | {:.1} | {} |",
            dimension.label(),
            a,
            b,
            leader(a, b)
        );
    }
    md.push('\n');

    let _ = writeln!(md, "## Market comparison\n");
    let _ = writeln!(md, "| Item | Plan A | Plan B |");
    let _ = writeln!(md, "|------|--------|--------|");
    let _ = writeln!(
        md,
        "| Market size | {:.0}B | {:.0}B |",
        left.market_analysis.market_size, right.market_analysis.market_size
    );
    let _ = writeln!(
        md,
        "| Growth rate | {:.1}% | {:.1}% |",
        left.market_analysis.market_growth_rate, right.market_analysis.market_growth_rate
    );
    let _ = writeln!(
        md,
        "| Market stage | {} | {} |\n",
        left.market_analysis.market_stage.label(),
        right.market_analysis.market_stage.label()
    );

    let _ = writeln!(md, "## Financial comparison\n");
    let _ = writeln!(md, "| Item | Plan A | Plan B |");
    let _ = writeln!(md, "|------|--------|--------|");
    let _ = writeln!(
        md,
        "| Year five revenue | {:.0} | {:.0} |",
        left.financial_projection.year5_revenue, right.financial_projection.year5_revenue
    );
    let _ = writeln!(
        md,
        "| Initial investment | {:.0} | {:.0} |",
        left.financial_projection.initial_investment, right.financial_projection.initial_investment
    );
    let _ = writeln!(
        md,
        "| Break-even | {} months | {} months |",
        left.financial_projection.break_even_months, right.financial_projection.break_even_months
    );
    let _ = writeln!(
        md,
        "| LTV/CAC | {:.1}x | {:.1}x |\n",
        left.financial_projection.ltv_cac_ratio().unwrap_or(0.0),
        right.financial_projection.ltv_cac_ratio().unwrap_or(0.0)
    );

    let diff = left.overall_score - right.overall_score;
    let _ = writeln!(md, "## Verdict\n");
    let _ = writeln!(md, "**Overall difference:** {:.1} points\n", diff.abs());
    if diff > 0.0 {
        let _ = writeln!(md, "Plan A leads by {diff:.1} points.");
    } else if diff < 0.0 {
        let _ = writeln!(md, "Plan B leads by {:.1} points.", -diff);
    } else {
        let _ = writeln!(md, "Both plans are tied.");
    }

    md
}

fn leader(a: f64, b: f64) -> &'static str {
    if a > b {
        "A"
    } else if b > a {
        "B"
    } else {
        "="
    }
}
