use serde::{Deserialize, Serialize};

/// Thresholds the reporter uses to turn scores into qualitative findings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationConfig {
    pub strength_threshold: f64,
    pub weakness_threshold: f64,
    pub minimum_ltv_cac_ratio: f64,
    pub maximum_break_even_months: u32,
    pub minimum_profit_margin: f64,
    pub minimum_return_on_investment: f64,
    pub minimum_team_size: usize,
    pub minimum_revenue_growth: f64,
    pub similar_plan_limit: usize,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            strength_threshold: 80.0,
            weakness_threshold: 60.0,
            minimum_ltv_cac_ratio: 3.0,
            maximum_break_even_months: 36,
            minimum_profit_margin: 20.0,
            minimum_return_on_investment: 100.0,
            minimum_team_size: 3,
            minimum_revenue_growth: 2.0,
            similar_plan_limit: 5,
        }
    }
}
