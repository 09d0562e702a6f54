mod benchmark;
mod insights;
mod markdown;
pub mod views;

pub use benchmark::{compare_with_benchmark, find_similar_plans, percentile};
pub use markdown::render_evaluation_report;
pub use views::{BenchmarkComparison, EvaluationDetail, EvaluationFindings, SimilarPlan};

pub(crate) use insights::derive_findings;

use super::domain::BusinessPlan;
use super::evaluation::{EvaluationConfig, EvaluationOutcome};

/// Assemble the detailed view for an already evaluated plan.
pub fn describe(
    plan: &BusinessPlan,
    outcome: EvaluationOutcome,
    config: &EvaluationConfig,
    benchmark: &[BusinessPlan],
    history: &[BusinessPlan],
) -> EvaluationDetail {
    let findings = derive_findings(plan, &outcome, config);
    let benchmark = compare_with_benchmark(plan, benchmark);
    let similar_plans = find_similar_plans(plan, history, config.similar_plan_limit);

    EvaluationDetail {
        outcome,
        findings,
        benchmark,
        similar_plans,
    }
}
