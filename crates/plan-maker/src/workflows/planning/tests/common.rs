use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{TimeZone, Utc};
use serde_json::Value;

use crate::workflows::planning::domain::{
    BusinessPlan, FinancialProjection, MarketAnalysis, MarketStage, PlanCategory, PlanId,
};
use crate::workflows::planning::evaluation::{EvaluationConfig, EvaluationEngine};
use crate::workflows::planning::generator::{
    GenerationError, GeneratorConfig, PlanDraft, PlanWriter,
};
use crate::workflows::planning::storage::{PlanRepository, StorageError};
use crate::workflows::planning::{plan_router, PlanningService};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

/// Plan that maxes out every feasibility rule: raw feasibility is 150.
pub(super) fn strong_plan(id: &str, title: &str, category: PlanCategory) -> BusinessPlan {
    BusinessPlan {
        id: PlanId(id.to_string()),
        title: title.to_string(),
        category,
        created_at: Utc
            .with_ymd_and_hms(2025, 3, 1, 9, 30, 0)
            .single()
            .expect("valid timestamp"),
        iteration: 1,
        problem_statement: "Mid-sized clinics lose hours every week reconciling insurance claims \
                            by hand, delaying revenue."
            .to_string(),
        solution: "A claims automation platform with proprietary matching models.".to_string(),
        value_proposition: "Cuts reconciliation time by 70% within the first quarter.".to_string(),
        business_model: "Subscription per clinic seat".to_string(),
        market_analysis: MarketAnalysis {
            market_size: 150.0,
            market_growth_rate: 35.0,
            target_audience: "Clinics with 10-100 staff".to_string(),
            market_stage: MarketStage::Growing,
            competitive_landscape: "Legacy vendors dominate but lack automation.".to_string(),
            key_success_factors: strings(&[
                "Integration breadth",
                "Model accuracy",
                "Onboarding speed",
                "Channel partners",
            ]),
        },
        financial_projection: FinancialProjection {
            year1_revenue: 2_000_000.0,
            year3_revenue: 30_000_000.0,
            year5_revenue: 100_000_000.0,
            initial_investment: 2_000_000.0,
            break_even_months: 12,
            profit_margin_year3: 30.0,
            customer_cac: 1_000.0,
            customer_ltv: 6_000.0,
        },
        key_milestones: strings(&["MVP", "First ten clinics", "Seed round"]),
        team_requirements: strings(&["CEO", "CTO", "ML engineer", "Product", "Sales"]),
        risk_factors: strings(&["Regulation", "Integration effort", "Incumbents"]),
        mitigation_strategies: strings(&[
            "Compliance advisor",
            "Prebuilt connectors",
            "Focused niche",
        ]),
        feasibility_score: 0.0,
        profitability_score: 0.0,
        innovation_score: 0.0,
        overall_score: 0.0,
        reasoning: "Claims volume keeps rising while staffing stays flat.".to_string(),
        references: Vec::new(),
        tags: strings(&["healthtech", "claims", "automation"]),
    }
}

/// Low scoring consumer plan in a declining market.
///
/// Feasibility 68, profitability 57, innovation 70 under the default rules.
pub(super) fn weak_plan(id: &str) -> BusinessPlan {
    let mut plan = strong_plan(id, "Neighbourhood flyer drops", PlanCategory::Consumer);
    plan.problem_statement = "Shops struggle to reach neighbours.".to_string();
    plan.solution = "Door to door flyers for local shops.".to_string();
    plan.value_proposition = "Cheaper flyers.".to_string();
    plan.market_analysis = MarketAnalysis {
        market_size: 5.0,
        market_growth_rate: 5.0,
        target_audience: "Corner shops".to_string(),
        market_stage: MarketStage::Declining,
        competitive_landscape: "Crowded.".to_string(),
        key_success_factors: strings(&["Route density"]),
    };
    plan.financial_projection = FinancialProjection {
        year1_revenue: 400_000.0,
        year3_revenue: 500_000.0,
        year5_revenue: 500_000.0,
        initial_investment: 1_000_000.0,
        break_even_months: 48,
        profit_margin_year3: 5.0,
        customer_cac: 1_000.0,
        customer_ltv: 1_500.0,
    };
    plan.team_requirements = strings(&["Founder"]);
    plan.mitigation_strategies = strings(&["Flexible routes"]);
    plan.reasoning = String::new();
    plan.tags = strings(&["print", "local"]);
    plan
}

/// Plan carrying only an identity and a precomputed overall score.
pub(super) fn scored_plan(id: &str, overall: f64) -> BusinessPlan {
    let mut plan = strong_plan(id, &format!("Plan {id}"), PlanCategory::Saas);
    plan.overall_score = overall;
    plan.feasibility_score = overall;
    plan.profitability_score = overall;
    plan.innovation_score = overall;
    plan
}

pub(super) fn evaluation_engine() -> EvaluationEngine {
    EvaluationEngine::new(EvaluationConfig::default())
}

pub(super) fn draft(title: &str, tags: &[&str]) -> PlanDraft {
    let plan = strong_plan("draft", title, PlanCategory::Saas);
    PlanDraft {
        title: plan.title,
        problem_statement: plan.problem_statement,
        solution: plan.solution,
        value_proposition: plan.value_proposition,
        business_model: plan.business_model,
        market_analysis: plan.market_analysis,
        financial_projection: plan.financial_projection,
        key_milestones: plan.key_milestones,
        team_requirements: plan.team_requirements,
        risk_factors: plan.risk_factors,
        mitigation_strategies: plan.mitigation_strategies,
        reasoning: plan.reasoning,
        references: plan.references,
        tags: strings(tags),
    }
}

#[derive(Default)]
pub(super) struct MemoryRepository {
    pub(super) plans: Mutex<Vec<BusinessPlan>>,
}

impl MemoryRepository {
    pub(super) fn seeded(plans: Vec<BusinessPlan>) -> Self {
        Self {
            plans: Mutex::new(plans),
        }
    }

    pub(super) fn len(&self) -> usize {
        self.plans.lock().expect("repository mutex poisoned").len()
    }
}

impl PlanRepository for MemoryRepository {
    fn save(&self, plan: &BusinessPlan) -> Result<(), StorageError> {
        let mut guard = self.plans.lock().expect("repository mutex poisoned");
        guard.retain(|existing| existing.id != plan.id);
        guard.insert(0, plan.clone());
        Ok(())
    }

    fn load_all(&self) -> Result<Vec<BusinessPlan>, StorageError> {
        Ok(self.plans.lock().expect("repository mutex poisoned").clone())
    }
}

pub(super) struct UnavailableRepository;

impl PlanRepository for UnavailableRepository {
    fn save(&self, _plan: &BusinessPlan) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("disk offline".to_string()))
    }

    fn load_all(&self) -> Result<Vec<BusinessPlan>, StorageError> {
        Err(StorageError::Unavailable("disk offline".to_string()))
    }
}

/// Writer that always answers with the same text and counts its calls.
pub(super) struct StaticWriter {
    response: String,
    calls: AtomicUsize,
}

impl StaticWriter {
    pub(super) fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            calls: AtomicUsize::new(0),
        }
    }

    pub(super) fn returning(draft: &PlanDraft) -> Self {
        Self::new(serde_json::to_string(draft).expect("draft serializes"))
    }

    pub(super) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl PlanWriter for StaticWriter {
    fn draft(&self, _prompt: &str) -> Result<String, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.response.clone())
    }
}

pub(super) struct OfflineWriter;

impl PlanWriter for OfflineWriter {
    fn draft(&self, _prompt: &str) -> Result<String, GenerationError> {
        Err(GenerationError::WriterUnavailable {
            command: "offline".to_string(),
        })
    }
}

pub(super) fn build_service(
    seed: Vec<BusinessPlan>,
) -> (
    PlanningService<MemoryRepository, OfflineWriter>,
    Arc<MemoryRepository>,
) {
    let repository = Arc::new(MemoryRepository::seeded(seed));
    let service = PlanningService::new(
        repository.clone(),
        Arc::new(OfflineWriter),
        EvaluationConfig::default(),
        GeneratorConfig::default(),
    );
    (service, repository)
}

pub(super) fn router_with_service(
    service: PlanningService<MemoryRepository, OfflineWriter>,
) -> axum::Router {
    plan_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1 << 20)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
