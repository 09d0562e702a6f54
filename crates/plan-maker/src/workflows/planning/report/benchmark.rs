use super::super::domain::BusinessPlan;
use super::super::similarity::{overlap, similarity};
use super::views::{BenchmarkComparison, SimilarPlan};

/// Compare a scored plan against scored benchmark plans; `None` when there is nothing to
/// compare against.
pub fn compare_with_benchmark(
    plan: &BusinessPlan,
    benchmark: &[BusinessPlan],
) -> Option<BenchmarkComparison> {
    if benchmark.is_empty() {
        return None;
    }

    let mean = |score: fn(&BusinessPlan) -> f64| {
        benchmark.iter().map(score).sum::<f64>() / benchmark.len() as f64
    };
    let overall_scores: Vec<f64> = benchmark.iter().map(|entry| entry.overall_score).collect();

    Some(BenchmarkComparison {
        benchmark_size: benchmark.len(),
        feasibility_diff: plan.feasibility_score - mean(|entry| entry.feasibility_score),
        profitability_diff: plan.profitability_score - mean(|entry| entry.profitability_score),
        innovation_diff: plan.innovation_score - mean(|entry| entry.innovation_score),
        overall_diff: plan.overall_score - mean(|entry| entry.overall_score),
        percentile: percentile(plan.overall_score, &overall_scores),
    })
}

/// Share of `scores` strictly below `score`, in percent. Not interpolated.
pub fn percentile(score: f64, scores: &[f64]) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }
    let below = scores.iter().filter(|candidate| **candidate < score).count();
    below as f64 / scores.len() as f64 * 100.0
}

const TITLE_WEIGHT: f64 = 0.5;
const CATEGORY_WEIGHT: f64 = 0.2;
const TAG_WEIGHT: f64 = 0.3;

/// Prior plans ranked by title, category, and tag resemblance to `target`.
pub fn find_similar_plans(
    target: &BusinessPlan,
    plans: &[BusinessPlan],
    limit: usize,
) -> Vec<SimilarPlan> {
    let mut matches: Vec<SimilarPlan> = plans
        .iter()
        .filter(|candidate| candidate.id != target.id)
        .map(|candidate| {
            let title = similarity(&target.title, &candidate.title);
            let category = if target.category == candidate.category {
                1.0
            } else {
                0.0
            };
            let tags = overlap(target.tags.iter(), candidate.tags.iter());

            SimilarPlan {
                plan_id: candidate.id.clone(),
                title: candidate.title.clone(),
                category: candidate.category,
                similarity: title * TITLE_WEIGHT + category * CATEGORY_WEIGHT + tags * TAG_WEIGHT,
            }
        })
        .collect();

    matches.sort_by(|left, right| right.similarity.total_cmp(&left.similarity));
    matches.truncate(limit);
    matches
}
