use std::sync::Arc;

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::Serialize;
use tracing::{info, warn};

use super::analytics::{self, PlanAnalytics, PlanComparison};
use super::domain::{BusinessPlan, PlanCategory, PlanId, PlanValidationError};
use super::evaluation::{EvaluationConfig, EvaluationEngine, EvaluationOutcome};
use super::generator::{GeneratorConfig, PlanGenerator, PlanWriter};
use super::ranking::{filter_top, rank};
use super::report::EvaluationDetail;
use super::storage::{PlanRepository, StorageError};

/// Service composing the generator, the evaluation engine, and the plan repository.
pub struct PlanningService<R, W> {
    repository: Arc<R>,
    generator: Arc<PlanGenerator<W>>,
    engine: Arc<EvaluationEngine>,
}

impl<R, W> PlanningService<R, W>
where
    R: PlanRepository + 'static,
    W: PlanWriter + 'static,
{
    pub fn new(
        repository: Arc<R>,
        writer: Arc<W>,
        evaluation: EvaluationConfig,
        generation: GeneratorConfig,
    ) -> Self {
        Self {
            repository,
            generator: Arc::new(PlanGenerator::new(writer, generation)),
            engine: Arc::new(EvaluationEngine::new(evaluation)),
        }
    }

    pub fn repository(&self) -> &Arc<R> {
        &self.repository
    }

    pub fn engine(&self) -> &EvaluationEngine {
        &self.engine
    }

    /// Generate, score, and store `count` plans, numbering iterations from `iteration_start`.
    /// Each new plan joins the history the next one is checked against.
    pub fn generate_batch<G: Rng + ?Sized>(
        &self,
        count: usize,
        iteration_start: u32,
        rng: &mut G,
    ) -> Result<Vec<BusinessPlan>, PlanningServiceError> {
        let mut history = self.repository.load_all()?;
        let mut generated = Vec::with_capacity(count);

        for offset in 0..count {
            let iteration = iteration_start.saturating_add(offset as u32);
            let mut plan = self.generator.generate(iteration, &history, rng);
            if let Err(error) = self.engine.evaluate(&mut plan) {
                warn!(%error, title = %plan.title, iteration, "generated plan rejected; continuing batch");
                continue;
            }
            self.repository.save(&plan)?;

            info!(
                plan_id = %plan.id,
                title = %plan.title,
                category = %plan.category,
                overall = plan.overall_score,
                iteration,
                "plan generated"
            );

            history.insert(0, plan.clone());
            generated.push(plan);
        }

        Ok(generated)
    }

    /// Stored plans ranked by overall score, paged.
    pub fn list(&self, limit: usize, offset: usize) -> Result<PlanPage, PlanningServiceError> {
        let ranked = rank(self.repository.load_all()?);
        let total = ranked.len();
        let plans = ranked
            .iter()
            .skip(offset)
            .take(limit)
            .map(PlanSummaryView::from)
            .collect();

        Ok(PlanPage {
            total,
            offset,
            limit,
            plans,
        })
    }

    pub fn get(&self, id: &PlanId) -> Result<BusinessPlan, PlanningServiceError> {
        self.repository
            .fetch(id)?
            .ok_or_else(|| PlanningServiceError::NotFound(id.clone()))
    }

    /// Re-run the detailed evaluation of a stored plan against the rest of the corpus.
    pub fn evaluation(&self, id: &PlanId) -> Result<EvaluationDetail, PlanningServiceError> {
        let plans = self.repository.load_all()?;
        let (mut target, others): (Vec<_>, Vec<_>) =
            plans.into_iter().partition(|plan| &plan.id == id);
        let mut target = target
            .pop()
            .ok_or_else(|| PlanningServiceError::NotFound(id.clone()))?;

        Ok(self.engine.evaluate_detailed(&mut target, &others, &others)?)
    }

    /// Score a plan that is not stored, benchmarking it against the stored corpus.
    pub fn assess(&self, mut plan: BusinessPlan) -> Result<Assessment, PlanningServiceError> {
        let corpus = self.repository.load_all()?;
        let detail = self.engine.evaluate_detailed(&mut plan, &corpus, &corpus)?;
        Ok(Assessment { plan, detail })
    }

    /// Score without any corpus context.
    pub fn score(&self, plan: &BusinessPlan) -> Result<EvaluationOutcome, PlanningServiceError> {
        Ok(self.engine.score(plan)?)
    }

    pub fn top(
        &self,
        count: usize,
        min_score: f64,
    ) -> Result<Vec<PlanSummaryView>, PlanningServiceError> {
        let plans = filter_top(self.repository.load_all()?, count, min_score);
        Ok(plans.iter().map(PlanSummaryView::from).collect())
    }

    pub fn compare(
        &self,
        left: &PlanId,
        right: &PlanId,
    ) -> Result<ComparisonView, PlanningServiceError> {
        let left = self.get(left)?;
        let right = self.get(right)?;
        Ok(ComparisonView {
            comparison: analytics::compare_plans(&left, &right),
            report: analytics::render_comparison_report(&left, &right),
            left: PlanSummaryView::from(&left),
            right: PlanSummaryView::from(&right),
        })
    }

    /// Corpus analytics; `None` while nothing has been stored.
    pub fn analytics(&self) -> Result<Option<PlanAnalytics>, PlanningServiceError> {
        Ok(analytics::analyze(&self.repository.load_all()?))
    }
}

/// Error raised by the planning service.
#[derive(Debug, thiserror::Error)]
pub enum PlanningServiceError {
    #[error(transparent)]
    Validation(#[from] PlanValidationError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("plan {0} not found")]
    NotFound(PlanId),
}

/// Condensed listing entry for a stored plan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanSummaryView {
    pub id: PlanId,
    pub title: String,
    pub category: PlanCategory,
    pub overall_score: f64,
    pub feasibility_score: f64,
    pub profitability_score: f64,
    pub innovation_score: f64,
    pub market_size: f64,
    pub year5_revenue: f64,
    pub value_proposition: String,
    pub created_at: DateTime<Utc>,
}

impl From<&BusinessPlan> for PlanSummaryView {
    fn from(plan: &BusinessPlan) -> Self {
        Self {
            id: plan.id.clone(),
            title: plan.title.clone(),
            category: plan.category,
            overall_score: plan.overall_score,
            feasibility_score: plan.feasibility_score,
            profitability_score: plan.profitability_score,
            innovation_score: plan.innovation_score,
            market_size: plan.market_analysis.market_size,
            year5_revenue: plan.financial_projection.year5_revenue,
            value_proposition: plan.value_proposition.clone(),
            created_at: plan.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PlanPage {
    pub total: usize,
    pub offset: usize,
    pub limit: usize,
    pub plans: Vec<PlanSummaryView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComparisonView {
    pub left: PlanSummaryView,
    pub right: PlanSummaryView,
    pub comparison: PlanComparison,
    pub report: String,
}

/// Scored copy of a submitted plan plus its detailed evaluation.
#[derive(Debug, Clone, Serialize)]
pub struct Assessment {
    pub plan: BusinessPlan,
    pub detail: EvaluationDetail,
}
