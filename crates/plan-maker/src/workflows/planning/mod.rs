//! Business plan generation, multi-dimensional evaluation, and near-duplicate suppression.
//!
//! The evaluation core (`similarity`, `novelty`, `evaluation`, `report`, `ranking`) is pure and
//! synchronous. Generation, storage, and the HTTP router are the collaborators that feed it.

pub mod analytics;
pub mod domain;
pub mod evaluation;
pub mod generator;
pub mod novelty;
pub mod ranking;
pub mod report;
pub mod router;
pub mod service;
pub mod similarity;
pub mod storage;

#[cfg(test)]
mod tests;

pub use analytics::{PlanAnalytics, PlanComparison};
pub use domain::{
    BusinessPlan, CategoryParseError, FinancialProjection, MarketAnalysis, MarketStage,
    PlanCategory, PlanId, PlanValidationError,
};
pub use evaluation::{
    Criterion, EvaluationConfig, EvaluationEngine, EvaluationOutcome, ScoreComponent,
    ScoreDimension, SubScore, WeightProfile,
};
pub use generator::{
    CliPlanWriter, GenerationError, GeneratorConfig, PlanDraft, PlanGenerator, PlanWriter,
    ThemeCatalog,
};
pub use novelty::{DuplicateMatch, DuplicateReason, NoveltyConfig, NoveltyFilter};
pub use ranking::{filter_top, rank};
pub use report::{render_evaluation_report, EvaluationDetail};
pub use router::plan_router;
pub use service::{Assessment, PlanPage, PlanSummaryView, PlanningService, PlanningServiceError};
pub use storage::{FilePlanStore, PlanRepository, StorageError};
