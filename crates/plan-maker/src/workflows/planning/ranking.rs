use super::domain::BusinessPlan;

/// Order by overall score, highest first. Equal scores keep their input order.
pub fn rank(mut plans: Vec<BusinessPlan>) -> Vec<BusinessPlan> {
    plans.sort_by(|left, right| right.overall_score.total_cmp(&left.overall_score));
    plans
}

/// Ranked plans scoring at least `min_score`, at most `top_n` of them.
pub fn filter_top(plans: Vec<BusinessPlan>, top_n: usize, min_score: f64) -> Vec<BusinessPlan> {
    rank(plans)
        .into_iter()
        .filter(|plan| plan.overall_score >= min_score)
        .take(top_n)
        .collect()
}
