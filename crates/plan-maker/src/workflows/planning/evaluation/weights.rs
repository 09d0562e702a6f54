use serde::{Deserialize, Serialize};

use super::super::domain::PlanCategory;

/// Share of each sub-score in the overall score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryWeights {
    pub feasibility: f64,
    pub profitability: f64,
    pub innovation: f64,
}

impl CategoryWeights {
    pub const fn new(feasibility: f64, profitability: f64, innovation: f64) -> Self {
        Self {
            feasibility,
            profitability,
            innovation,
        }
    }

    pub fn total(&self) -> f64 {
        self.feasibility + self.profitability + self.innovation
    }

    pub fn combine(&self, feasibility: f64, profitability: f64, innovation: f64) -> f64 {
        feasibility * self.feasibility
            + profitability * self.profitability
            + innovation * self.innovation
    }
}

/// Profile applied to categories without a dedicated entry.
pub const OTHER_WEIGHTS: CategoryWeights = CategoryWeights::new(0.35, 0.45, 0.20);

/// Weight profile resolved for a plan, flagged when the fallback profile was used.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeightProfile {
    pub category: PlanCategory,
    pub weights: CategoryWeights,
    pub default_applied: bool,
}

/// Dedicated weight profile for a category, if one is configured.
pub fn category_weights(category: PlanCategory) -> Option<CategoryWeights> {
    match category {
        PlanCategory::Saas => Some(CategoryWeights::new(0.35, 0.45, 0.20)),
        PlanCategory::Marketplace => Some(CategoryWeights::new(0.30, 0.45, 0.25)),
        PlanCategory::AiMl => Some(CategoryWeights::new(0.30, 0.35, 0.35)),
        PlanCategory::FinTech => Some(CategoryWeights::new(0.40, 0.40, 0.20)),
        PlanCategory::HealthTech => Some(CategoryWeights::new(0.45, 0.30, 0.25)),
        PlanCategory::EdTech => Some(CategoryWeights::new(0.35, 0.35, 0.30)),
        PlanCategory::CleanTech => Some(CategoryWeights::new(0.35, 0.30, 0.35)),
        PlanCategory::ECommerce => Some(CategoryWeights::new(0.30, 0.50, 0.20)),
        PlanCategory::Other => Some(OTHER_WEIGHTS),
        PlanCategory::Consumer | PlanCategory::B2b => None,
    }
}

pub fn resolve_weights(category: PlanCategory) -> WeightProfile {
    match category_weights(category) {
        Some(weights) => WeightProfile {
            category,
            weights,
            default_applied: false,
        },
        None => {
            tracing::warn!(
                category = category.label(),
                "no weight profile for category; applying the Other profile"
            );
            WeightProfile {
                category,
                weights: OTHER_WEIGHTS,
                default_applied: true,
            }
        }
    }
}
