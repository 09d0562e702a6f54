use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for generated plans.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlanId(pub String);

impl PlanId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Closed set of business categories a plan may belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PlanCategory {
    #[serde(rename = "SaaS")]
    Saas,
    #[serde(rename = "Marketplace")]
    Marketplace,
    #[serde(rename = "AI/ML")]
    AiMl,
    #[serde(rename = "FinTech")]
    FinTech,
    #[serde(rename = "HealthTech")]
    HealthTech,
    #[serde(rename = "EdTech")]
    EdTech,
    #[serde(rename = "CleanTech")]
    CleanTech,
    #[serde(rename = "E-commerce")]
    ECommerce,
    #[serde(rename = "Consumer")]
    Consumer,
    #[serde(rename = "B2B")]
    B2b,
    #[serde(rename = "Other")]
    Other,
}

impl PlanCategory {
    pub const fn ordered() -> [Self; 11] {
        [
            Self::Saas,
            Self::Marketplace,
            Self::AiMl,
            Self::FinTech,
            Self::HealthTech,
            Self::EdTech,
            Self::CleanTech,
            Self::ECommerce,
            Self::Consumer,
            Self::B2b,
            Self::Other,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Saas => "SaaS",
            Self::Marketplace => "Marketplace",
            Self::AiMl => "AI/ML",
            Self::FinTech => "FinTech",
            Self::HealthTech => "HealthTech",
            Self::EdTech => "EdTech",
            Self::CleanTech => "CleanTech",
            Self::ECommerce => "E-commerce",
            Self::Consumer => "Consumer",
            Self::B2b => "B2B",
            Self::Other => "Other",
        }
    }

    /// Categories credited with the higher innovation bonus.
    pub const fn is_high_innovation(self) -> bool {
        matches!(
            self,
            Self::AiMl | Self::CleanTech | Self::FinTech | Self::HealthTech
        )
    }
}

impl fmt::Display for PlanCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Raised when a category tag is outside the closed set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown plan category '{0}'")]
pub struct CategoryParseError(pub String);

impl FromStr for PlanCategory {
    type Err = CategoryParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        Self::ordered()
            .into_iter()
            .find(|category| {
                category.label().eq_ignore_ascii_case(trimmed)
                    || format!("{category:?}").eq_ignore_ascii_case(trimmed)
            })
            .ok_or_else(|| CategoryParseError(raw.to_string()))
    }
}

/// Lifecycle stage of the addressed market.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketStage {
    Emerging,
    Growing,
    Mature,
    Declining,
}

impl MarketStage {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Emerging => "emerging",
            Self::Growing => "growing",
            Self::Mature => "mature",
            Self::Declining => "declining",
        }
    }
}

/// Market sizing and positioning. `market_size` is expressed in billions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketAnalysis {
    pub market_size: f64,
    pub market_growth_rate: f64,
    pub target_audience: String,
    pub market_stage: MarketStage,
    pub competitive_landscape: String,
    pub key_success_factors: Vec<String>,
}

/// Five year financial outlook in absolute currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialProjection {
    pub year1_revenue: f64,
    pub year3_revenue: f64,
    pub year5_revenue: f64,
    pub initial_investment: f64,
    pub break_even_months: u32,
    pub profit_margin_year3: f64,
    pub customer_cac: f64,
    pub customer_ltv: f64,
}

impl FinancialProjection {
    /// Lifetime value over acquisition cost; `None` when CAC is zero.
    pub fn ltv_cac_ratio(&self) -> Option<f64> {
        (self.customer_cac > 0.0).then(|| self.customer_ltv / self.customer_cac)
    }
}

/// Fully populated business plan plus the four evaluation scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessPlan {
    pub id: PlanId,
    pub title: String,
    pub category: PlanCategory,
    pub created_at: DateTime<Utc>,
    #[serde(default = "default_iteration")]
    pub iteration: u32,

    #[serde(default)]
    pub problem_statement: String,
    #[serde(default)]
    pub solution: String,
    #[serde(default)]
    pub value_proposition: String,
    #[serde(default)]
    pub business_model: String,

    pub market_analysis: MarketAnalysis,
    pub financial_projection: FinancialProjection,

    #[serde(default)]
    pub key_milestones: Vec<String>,
    #[serde(default)]
    pub team_requirements: Vec<String>,
    #[serde(default)]
    pub risk_factors: Vec<String>,
    #[serde(default)]
    pub mitigation_strategies: Vec<String>,

    #[serde(default)]
    pub feasibility_score: f64,
    #[serde(default)]
    pub profitability_score: f64,
    #[serde(default)]
    pub innovation_score: f64,
    #[serde(default)]
    pub overall_score: f64,

    #[serde(default)]
    pub reasoning: String,
    #[serde(default)]
    pub references: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

fn default_iteration() -> u32 {
    1
}

impl BusinessPlan {
    /// Reject records that cannot be scored meaningfully.
    pub fn validate(&self) -> Result<(), PlanValidationError> {
        if self.id.0.trim().is_empty() {
            return Err(PlanValidationError::MissingField("id"));
        }
        if self.title.trim().is_empty() {
            return Err(PlanValidationError::MissingField("title"));
        }

        let market = &self.market_analysis;
        ensure_non_negative("market_analysis.market_size", market.market_size)?;
        ensure_finite("market_analysis.market_growth_rate", market.market_growth_rate)?;

        let financial = &self.financial_projection;
        for (field, value) in [
            ("financial_projection.year1_revenue", financial.year1_revenue),
            ("financial_projection.year3_revenue", financial.year3_revenue),
            ("financial_projection.year5_revenue", financial.year5_revenue),
            (
                "financial_projection.initial_investment",
                financial.initial_investment,
            ),
            (
                "financial_projection.profit_margin_year3",
                financial.profit_margin_year3,
            ),
            ("financial_projection.customer_cac", financial.customer_cac),
            ("financial_projection.customer_ltv", financial.customer_ltv),
        ] {
            ensure_non_negative(field, value)?;
        }

        Ok(())
    }

    /// Overwrite the four score fields with a fresh evaluation.
    pub(crate) fn apply_scores(
        &mut self,
        feasibility: f64,
        profitability: f64,
        innovation: f64,
        overall: f64,
    ) {
        self.feasibility_score = feasibility;
        self.profitability_score = profitability;
        self.innovation_score = innovation;
        self.overall_score = overall;
    }
}

fn ensure_finite(field: &'static str, value: f64) -> Result<(), PlanValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(PlanValidationError::NonFinite { field })
    }
}

fn ensure_non_negative(field: &'static str, value: f64) -> Result<(), PlanValidationError> {
    ensure_finite(field, value)?;
    if value < 0.0 {
        return Err(PlanValidationError::Negative { field, value });
    }
    Ok(())
}

/// Validation failures raised before any scoring is attempted.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlanValidationError {
    #[error("plan is missing required field `{0}`")]
    MissingField(&'static str),
    #[error("`{field}` must not be negative (found {value})")]
    Negative { field: &'static str, value: f64 },
    #[error("`{field}` must be a finite number")]
    NonFinite { field: &'static str },
}
