mod config;
mod rules;
mod tiers;
mod weights;

pub use config::EvaluationConfig;
pub use weights::{
    category_weights, resolve_weights, CategoryWeights, WeightProfile, OTHER_WEIGHTS,
};

use super::domain::{BusinessPlan, PlanId, PlanValidationError};
use super::report::{self, EvaluationDetail};
use serde::{Deserialize, Serialize};

/// Stateless evaluator applying the rule tables and category weights to a plan.
///
/// The engine only holds configuration, so one instance can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct EvaluationEngine {
    config: EvaluationConfig,
}

impl EvaluationEngine {
    pub fn new(config: EvaluationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EvaluationConfig {
        &self.config
    }

    /// Score a plan without touching it.
    pub fn score(&self, plan: &BusinessPlan) -> Result<EvaluationOutcome, PlanValidationError> {
        plan.validate()?;

        let signals = rules::score_signals(plan);
        let feasibility = rules::score_feasibility(plan, &signals);
        let profitability = rules::score_profitability(plan, &signals);
        let innovation = rules::score_innovation(plan, &signals);

        let weights = resolve_weights(plan.category);
        let overall = weights
            .weights
            .combine(feasibility.score, profitability.score, innovation.score)
            .clamp(0.0, 100.0);

        tracing::debug!(
            plan_id = %plan.id,
            feasibility = feasibility.score,
            profitability = profitability.score,
            innovation = innovation.score,
            overall,
            "plan scored"
        );

        Ok(EvaluationOutcome {
            plan_id: plan.id.clone(),
            feasibility,
            profitability,
            innovation,
            overall,
            weights,
            signals,
        })
    }

    /// Score a plan and overwrite its four score fields.
    pub fn evaluate(
        &self,
        plan: &mut BusinessPlan,
    ) -> Result<EvaluationOutcome, PlanValidationError> {
        let outcome = self.score(plan)?;
        plan.apply_scores(
            outcome.feasibility.score,
            outcome.profitability.score,
            outcome.innovation.score,
            outcome.overall,
        );
        Ok(outcome)
    }

    /// Evaluate, then derive findings, the benchmark comparison, and similar prior plans.
    pub fn evaluate_detailed(
        &self,
        plan: &mut BusinessPlan,
        benchmark: &[BusinessPlan],
        history: &[BusinessPlan],
    ) -> Result<EvaluationDetail, PlanValidationError> {
        let outcome = self.evaluate(plan)?;
        Ok(report::describe(plan, outcome, &self.config, benchmark, history))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreDimension {
    Feasibility,
    Profitability,
    Innovation,
}

impl ScoreDimension {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Feasibility => "Feasibility",
            Self::Profitability => "Profitability",
            Self::Innovation => "Innovation",
        }
    }
}

/// Named rule contributing to a sub-score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    MarketGrowth,
    MarketStage,
    BreakEven,
    LtvCacRatio,
    ReturnOnInvestment,
    TeamDepth,
    RiskCoverage,
    Year5Revenue,
    ProfitMargin,
    RevenueGrowth,
    MarketSize,
    GrowthPotential,
    CategoryInnovation,
    StageNovelty,
    ProblemDepth,
    KeywordDensity,
    SuccessFactors,
    ReasoningDepth,
}

impl Criterion {
    pub const fn label(self) -> &'static str {
        match self {
            Self::MarketGrowth => "Market growth rate",
            Self::MarketStage => "Market stage",
            Self::BreakEven => "Break-even period",
            Self::LtvCacRatio => "LTV/CAC ratio",
            Self::ReturnOnInvestment => "Return on investment",
            Self::TeamDepth => "Team requirements",
            Self::RiskCoverage => "Risk mitigation coverage",
            Self::Year5Revenue => "Year five revenue",
            Self::ProfitMargin => "Year three profit margin",
            Self::RevenueGrowth => "Revenue growth",
            Self::MarketSize => "Market size",
            Self::GrowthPotential => "Growth potential",
            Self::CategoryInnovation => "Category",
            Self::StageNovelty => "Market stage novelty",
            Self::ProblemDepth => "Problem statement depth",
            Self::KeywordDensity => "Innovation keywords",
            Self::SuccessFactors => "Key success factors",
            Self::ReasoningDepth => "Reasoning depth",
        }
    }
}

/// Discrete contribution to a sub-score, allowing transparent audits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub criterion: Criterion,
    pub points: f64,
    pub max_points: f64,
    pub notes: String,
}

/// One scored dimension. `raw` is the unclamped total, `score` the value kept on the plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubScore {
    pub dimension: ScoreDimension,
    pub baseline: f64,
    pub raw: f64,
    pub score: f64,
    pub components: Vec<ScoreComponent>,
}

impl SubScore {
    pub fn component(&self, criterion: Criterion) -> Option<&ScoreComponent> {
        self.components
            .iter()
            .find(|component| component.criterion == criterion)
    }
}

/// Derived metrics the rules scored against; reused by the reporter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreSignals {
    pub ltv_cac_ratio: Option<f64>,
    pub return_on_investment: Option<f64>,
    pub revenue_growth: Option<f64>,
    pub growth_potential: f64,
    pub break_even_months: u32,
    pub profit_margin_year3: f64,
    pub team_size: usize,
    pub risk_count: usize,
    pub mitigation_count: usize,
    pub keyword_hits: usize,
}

/// Evaluation output describing each sub-score and the weighted overall score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationOutcome {
    pub plan_id: PlanId,
    pub feasibility: SubScore,
    pub profitability: SubScore,
    pub innovation: SubScore,
    pub overall: f64,
    pub weights: WeightProfile,
    pub signals: ScoreSignals,
}

impl EvaluationOutcome {
    pub fn sub_scores(&self) -> [&SubScore; 3] {
        [&self.feasibility, &self.profitability, &self.innovation]
    }
}
