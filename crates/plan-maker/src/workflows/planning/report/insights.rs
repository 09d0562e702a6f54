use super::super::domain::{BusinessPlan, MarketStage};
use super::super::evaluation::{EvaluationConfig, EvaluationOutcome, ScoreDimension};
use super::views::EvaluationFindings;

pub(crate) fn derive_findings(
    plan: &BusinessPlan,
    outcome: &EvaluationOutcome,
    config: &EvaluationConfig,
) -> EvaluationFindings {
    let mut strengths = Vec::new();
    let mut weaknesses = Vec::new();

    for sub_score in outcome.sub_scores() {
        let score = sub_score.score;
        if score >= config.strength_threshold {
            strengths.push(strength_statement(sub_score.dimension, score));
        } else if score < config.weakness_threshold {
            weaknesses.push(weakness_statement(sub_score.dimension, score));
        }
    }

    let signals = &outcome.signals;
    let mut recommendations = Vec::new();

    if let Some(ratio) = signals
        .ltv_cac_ratio
        .filter(|ratio| *ratio < config.minimum_ltv_cac_ratio)
    {
        recommendations.push(format!(
            "Reduce customer acquisition cost or increase lifetime value (LTV/CAC is {ratio:.1}, target {:.1} or higher)",
            config.minimum_ltv_cac_ratio
        ));
    }

    if signals.break_even_months > config.maximum_break_even_months {
        recommendations.push(format!(
            "Shorten the path to break-even (currently {} months)",
            signals.break_even_months
        ));
    }

    if signals.profit_margin_year3 < config.minimum_profit_margin {
        recommendations.push(format!(
            "Improve year three margins through pricing or cost structure (currently {:.1}%)",
            signals.profit_margin_year3
        ));
    }

    if let Some(roi) = signals.return_on_investment {
        if roi < config.minimum_return_on_investment {
            recommendations.push(format!(
                "Revisit the initial investment against year five revenue (ROI {roi:.0}%)"
            ));
        }
    }

    if let Some(growth) = signals.revenue_growth {
        if growth < config.minimum_revenue_growth {
            recommendations.push(format!(
                "Strengthen the growth plan between year one and year three ({growth:.1}x)"
            ));
        }
    }

    if signals.team_size < config.minimum_team_size {
        recommendations.push(format!(
            "Define a fuller founding team (at least {} roles)",
            config.minimum_team_size
        ));
    }

    if signals.mitigation_count < signals.risk_count {
        recommendations.push(format!(
            "Add a mitigation strategy for every identified risk ({} of {} covered)",
            signals.mitigation_count, signals.risk_count
        ));
    }

    match plan.market_analysis.market_stage {
        MarketStage::Emerging => recommendations.push(
            "Emerging market: early-mover opportunity, but validate demand before scaling"
                .to_string(),
        ),
        MarketStage::Declining => {
            weaknesses.push("Declining market: addressable demand is contracting".to_string())
        }
        MarketStage::Growing | MarketStage::Mature => {}
    }

    EvaluationFindings {
        strengths,
        weaknesses,
        recommendations,
    }
}

fn strength_statement(dimension: ScoreDimension, score: f64) -> String {
    match dimension {
        ScoreDimension::Feasibility => format!(
            "High feasibility ({score:.0}/100): the market and unit economics support execution"
        ),
        ScoreDimension::Profitability => format!(
            "High profitability ({score:.0}/100): revenue scale and margins are attractive"
        ),
        ScoreDimension::Innovation => format!(
            "High innovation ({score:.0}/100): the approach stands out in its market"
        ),
    }
}

fn weakness_statement(dimension: ScoreDimension, score: f64) -> String {
    match dimension {
        ScoreDimension::Feasibility => {
            format!("Low feasibility ({score:.0}/100): execution risk is high")
        }
        ScoreDimension::Profitability => {
            format!("Low profitability ({score:.0}/100): the revenue and margin outlook is thin")
        }
        ScoreDimension::Innovation => {
            format!("Low innovation ({score:.0}/100): differentiation is limited")
        }
    }
}
