use serde::Serialize;

use super::super::domain::{PlanCategory, PlanId};
use super::super::evaluation::EvaluationOutcome;

/// Qualitative findings derived from an outcome.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EvaluationFindings {
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub recommendations: Vec<String>,
}

/// Signed distance from the benchmark means plus a fraction-below percentile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchmarkComparison {
    pub benchmark_size: usize,
    pub feasibility_diff: f64,
    pub profitability_diff: f64,
    pub innovation_diff: f64,
    pub overall_diff: f64,
    pub percentile: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarPlan {
    pub plan_id: PlanId,
    pub title: String,
    pub category: PlanCategory,
    pub similarity: f64,
}

/// Full evaluation returned by detailed mode.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationDetail {
    pub outcome: EvaluationOutcome,
    #[serde(flatten)]
    pub findings: EvaluationFindings,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub benchmark: Option<BenchmarkComparison>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub similar_plans: Vec<SimilarPlan>,
}
