use super::super::domain::{BusinessPlan, MarketStage};
use super::tiers::{self, TierTable};
use super::{Criterion, ScoreComponent, ScoreDimension, ScoreSignals, SubScore};

const FEASIBILITY_BASELINE: f64 = 50.0;
const PROFITABILITY_BASELINE: f64 = 40.0;
const INNOVATION_BASELINE: f64 = 50.0;

const KEYWORD_POINTS: f64 = 2.5;
const KEYWORD_CAP: f64 = 10.0;

/// Terms signalling a novel approach. Matched case-insensitively as substrings.
pub(crate) const INNOVATION_KEYWORDS: &[&str] = &[
    "ai",
    "machine learning",
    "automation",
    "blockchain",
    "novel",
    "proprietary",
    "patent",
    "platform",
    "ecosystem",
    "revolution",
    "transform",
    "機械学習",
    "自動化",
    "ブロックチェーン",
    "独自",
    "特許",
    "プラットフォーム",
    "エコシステム",
    "革命",
    "変革",
];

pub(crate) fn score_signals(plan: &BusinessPlan) -> ScoreSignals {
    let financial = &plan.financial_projection;
    let market = &plan.market_analysis;

    let return_on_investment = (financial.year5_revenue > 0.0
        && financial.initial_investment > 0.0)
        .then(|| {
            (financial.year5_revenue - financial.initial_investment) / financial.initial_investment
                * 100.0
        });
    let revenue_growth = (financial.year1_revenue > 0.0)
        .then(|| financial.year3_revenue / financial.year1_revenue);

    ScoreSignals {
        ltv_cac_ratio: financial.ltv_cac_ratio(),
        return_on_investment,
        revenue_growth,
        growth_potential: market.market_size * market.market_growth_rate / 100.0,
        break_even_months: financial.break_even_months,
        profit_margin_year3: financial.profit_margin_year3,
        team_size: plan.team_requirements.len(),
        risk_count: plan.risk_factors.len(),
        mitigation_count: plan.mitigation_strategies.len(),
        keyword_hits: keyword_hits(&plan.solution, &plan.value_proposition),
    }
}

pub(crate) fn score_feasibility(plan: &BusinessPlan, signals: &ScoreSignals) -> SubScore {
    let market = &plan.market_analysis;
    let mut sheet = ScoreSheet::new(ScoreDimension::Feasibility, FEASIBILITY_BASELINE);

    sheet.tiered(
        Criterion::MarketGrowth,
        &tiers::GROWTH_RATE,
        market.market_growth_rate,
        format!("market growing {:.1}% per year", market.market_growth_rate),
    );

    let stage_points = match market.market_stage {
        MarketStage::Growing => 15.0,
        MarketStage::Emerging => 10.0,
        MarketStage::Mature => 5.0,
        MarketStage::Declining => 0.0,
    };
    sheet.fixed(
        Criterion::MarketStage,
        stage_points,
        15.0,
        format!("{} market", market.market_stage.label()),
    );

    sheet.tiered(
        Criterion::BreakEven,
        &tiers::BREAK_EVEN_MONTHS,
        f64::from(signals.break_even_months),
        format!("break-even after {} months", signals.break_even_months),
    );

    match signals.ltv_cac_ratio {
        Some(ratio) => sheet.tiered(
            Criterion::LtvCacRatio,
            &tiers::LTV_CAC_RATIO,
            ratio,
            format!("LTV/CAC ratio {ratio:.2}"),
        ),
        None => sheet.fixed(
            Criterion::LtvCacRatio,
            0.0,
            tiers::LTV_CAC_RATIO.ceiling(),
            "acquisition cost is zero; ratio not scored".to_string(),
        ),
    }

    match signals.return_on_investment {
        Some(roi) => sheet.tiered(
            Criterion::ReturnOnInvestment,
            &tiers::RETURN_ON_INVESTMENT,
            roi,
            format!("five year ROI {roi:.0}%"),
        ),
        None => sheet.fixed(
            Criterion::ReturnOnInvestment,
            0.0,
            tiers::RETURN_ON_INVESTMENT.ceiling(),
            "no year five revenue or investment to compare".to_string(),
        ),
    }

    sheet.tiered(
        Criterion::TeamDepth,
        &tiers::TEAM_SIZE,
        signals.team_size as f64,
        format!("{} team role(s) identified", signals.team_size),
    );

    let covered = signals.mitigation_count >= signals.risk_count;
    sheet.fixed(
        Criterion::RiskCoverage,
        if covered { 5.0 } else { 2.0 },
        5.0,
        format!(
            "{} mitigation(s) for {} risk(s)",
            signals.mitigation_count, signals.risk_count
        ),
    );

    sheet.finish()
}

pub(crate) fn score_profitability(plan: &BusinessPlan, signals: &ScoreSignals) -> SubScore {
    let financial = &plan.financial_projection;
    let market = &plan.market_analysis;
    let mut sheet = ScoreSheet::new(ScoreDimension::Profitability, PROFITABILITY_BASELINE);

    sheet.tiered(
        Criterion::Year5Revenue,
        &tiers::YEAR5_REVENUE,
        financial.year5_revenue,
        format!("year five revenue {:.0}", financial.year5_revenue),
    );

    sheet.tiered(
        Criterion::ProfitMargin,
        &tiers::PROFIT_MARGIN,
        financial.profit_margin_year3,
        format!("year three margin {:.1}%", financial.profit_margin_year3),
    );

    match signals.revenue_growth {
        Some(growth) => sheet.tiered(
            Criterion::RevenueGrowth,
            &tiers::REVENUE_GROWTH,
            growth,
            format!("revenue grows {growth:.1}x from year one to three"),
        ),
        None => sheet.fixed(
            Criterion::RevenueGrowth,
            0.0,
            tiers::REVENUE_GROWTH.ceiling(),
            "no year one revenue to compare".to_string(),
        ),
    }

    sheet.tiered(
        Criterion::MarketSize,
        &tiers::MARKET_SIZE,
        market.market_size,
        format!("market size {:.0}B", market.market_size),
    );

    sheet.tiered(
        Criterion::GrowthPotential,
        &tiers::GROWTH_POTENTIAL,
        signals.growth_potential,
        format!("growth potential {:.1}", signals.growth_potential),
    );

    sheet.finish()
}

pub(crate) fn score_innovation(plan: &BusinessPlan, signals: &ScoreSignals) -> SubScore {
    let market = &plan.market_analysis;
    let mut sheet = ScoreSheet::new(ScoreDimension::Innovation, INNOVATION_BASELINE);

    let high_innovation = plan.category.is_high_innovation();
    sheet.fixed(
        Criterion::CategoryInnovation,
        if high_innovation { 20.0 } else { 10.0 },
        20.0,
        format!("{} category", plan.category.label()),
    );

    let stage_points = match market.market_stage {
        MarketStage::Emerging => 20.0,
        MarketStage::Growing => 15.0,
        MarketStage::Mature => 5.0,
        MarketStage::Declining => 0.0,
    };
    sheet.fixed(
        Criterion::StageNovelty,
        stage_points,
        20.0,
        format!("{} market", market.market_stage.label()),
    );

    let problem_chars = plan.problem_statement.chars().count();
    sheet.tiered(
        Criterion::ProblemDepth,
        &tiers::PROBLEM_LENGTH,
        problem_chars as f64,
        format!("problem statement of {problem_chars} characters"),
    );

    let keyword_points = (signals.keyword_hits as f64 * KEYWORD_POINTS).min(KEYWORD_CAP);
    sheet.fixed(
        Criterion::KeywordDensity,
        keyword_points,
        KEYWORD_CAP,
        format!("{} innovation keyword(s)", signals.keyword_hits),
    );

    let factors = market.key_success_factors.len();
    sheet.tiered(
        Criterion::SuccessFactors,
        &tiers::SUCCESS_FACTORS,
        factors as f64,
        format!("{factors} key success factor(s)"),
    );

    let reasoning_chars = plan.reasoning.chars().count();
    sheet.tiered(
        Criterion::ReasoningDepth,
        &tiers::REASONING_LENGTH,
        reasoning_chars as f64,
        format!("reasoning of {reasoning_chars} characters"),
    );

    sheet.finish()
}

fn keyword_hits(solution: &str, value_proposition: &str) -> usize {
    let haystack = format!("{solution}{value_proposition}").to_lowercase();
    INNOVATION_KEYWORDS
        .iter()
        .filter(|keyword| haystack.contains(*keyword))
        .count()
}

struct ScoreSheet {
    dimension: ScoreDimension,
    baseline: f64,
    components: Vec<ScoreComponent>,
}

impl ScoreSheet {
    fn new(dimension: ScoreDimension, baseline: f64) -> Self {
        Self {
            dimension,
            baseline,
            components: Vec::new(),
        }
    }

    fn tiered(&mut self, criterion: Criterion, table: &TierTable, value: f64, notes: String) {
        self.components.push(ScoreComponent {
            criterion,
            points: table.points(value),
            max_points: table.ceiling(),
            notes,
        });
    }

    fn fixed(&mut self, criterion: Criterion, points: f64, max_points: f64, notes: String) {
        self.components.push(ScoreComponent {
            criterion,
            points,
            max_points,
            notes,
        });
    }

    fn finish(self) -> SubScore {
        let raw = self.baseline
            + self
                .components
                .iter()
                .map(|component| component.points)
                .sum::<f64>();

        SubScore {
            dimension: self.dimension,
            baseline: self.baseline,
            raw,
            score: raw.clamp(0.0, 100.0),
            components: self.components,
        }
    }
}
