use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use super::domain::{BusinessPlan, PlanId};
use super::generator::PlanWriter;
use super::service::{PlanSummaryView, PlanningService, PlanningServiceError};
use super::storage::PlanRepository;

/// Upper bound on plans generated by a single request.
pub const MAX_GENERATE_COUNT: usize = 10;

#[derive(Debug, Deserialize)]
pub(crate) struct ListQuery {
    #[serde(default = "default_limit")]
    pub(crate) limit: usize,
    #[serde(default)]
    pub(crate) offset: usize,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TopQuery {
    #[serde(default = "default_limit")]
    pub(crate) n: usize,
    #[serde(default)]
    pub(crate) min_score: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GenerateRequest {
    #[serde(default = "default_count")]
    pub(crate) count: usize,
    #[serde(default)]
    pub(crate) iteration_start: Option<u32>,
}

fn default_limit() -> usize {
    10
}

fn default_count() -> usize {
    1
}

/// Router builder exposing the plan corpus, generation, and evaluation endpoints.
pub fn plan_router<R, W>(service: Arc<PlanningService<R, W>>) -> Router
where
    R: PlanRepository + 'static,
    W: PlanWriter + 'static,
{
    Router::new()
        .route("/api/plans", get(list_handler::<R, W>))
        .route("/api/plans/:plan_id", get(plan_handler::<R, W>))
        .route(
            "/api/plans/:plan_id/evaluation",
            get(evaluation_handler::<R, W>),
        )
        .route("/api/generate", post(generate_handler::<R, W>))
        .route("/api/evaluate", post(evaluate_handler::<R, W>))
        .route("/api/analytics", get(analytics_handler::<R, W>))
        .route("/api/compare/:left/:right", get(compare_handler::<R, W>))
        .route("/api/top", get(top_handler::<R, W>))
        .with_state(service)
}

pub(crate) async fn list_handler<R, W>(
    State(service): State<Arc<PlanningService<R, W>>>,
    Query(query): Query<ListQuery>,
) -> Response
where
    R: PlanRepository + 'static,
    W: PlanWriter + 'static,
{
    match service.list(query.limit, query.offset) {
        Ok(page) => (StatusCode::OK, axum::Json(page)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn plan_handler<R, W>(
    State(service): State<Arc<PlanningService<R, W>>>,
    Path(plan_id): Path<String>,
) -> Response
where
    R: PlanRepository + 'static,
    W: PlanWriter + 'static,
{
    match service.get(&PlanId(plan_id)) {
        Ok(plan) => (StatusCode::OK, axum::Json(plan)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn evaluation_handler<R, W>(
    State(service): State<Arc<PlanningService<R, W>>>,
    Path(plan_id): Path<String>,
) -> Response
where
    R: PlanRepository + 'static,
    W: PlanWriter + 'static,
{
    match service.evaluation(&PlanId(plan_id)) {
        Ok(detail) => (StatusCode::OK, axum::Json(detail)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn generate_handler<R, W>(
    State(service): State<Arc<PlanningService<R, W>>>,
    axum::Json(request): axum::Json<GenerateRequest>,
) -> Response
where
    R: PlanRepository + 'static,
    W: PlanWriter + 'static,
{
    if request.count == 0 || request.count > MAX_GENERATE_COUNT {
        let payload = json!({
            "error": format!("count must be between 1 and {MAX_GENERATE_COUNT}"),
        });
        return (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response();
    }

    let count = request.count;
    let iteration_start = request.iteration_start.unwrap_or(1);
    // generation shells out to the writer and touches the filesystem
    let outcome = tokio::task::spawn_blocking(move || {
        service.generate_batch(count, iteration_start, &mut rand::thread_rng())
    })
    .await;

    match outcome {
        Ok(Ok(plans)) => {
            let payload = json!({
                "status": "completed",
                "count": plans.len(),
                "plans": plans
                    .iter()
                    .map(PlanSummaryView::from)
                    .collect::<Vec<_>>(),
            });
            (StatusCode::CREATED, axum::Json(payload)).into_response()
        }
        Ok(Err(error)) => error_response(error),
        Err(join_error) => {
            error!(%join_error, "generation task failed");
            let payload = json!({ "error": "generation task failed" });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn evaluate_handler<R, W>(
    State(service): State<Arc<PlanningService<R, W>>>,
    axum::Json(plan): axum::Json<BusinessPlan>,
) -> Response
where
    R: PlanRepository + 'static,
    W: PlanWriter + 'static,
{
    match service.assess(plan) {
        Ok(assessment) => (StatusCode::OK, axum::Json(assessment)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn analytics_handler<R, W>(
    State(service): State<Arc<PlanningService<R, W>>>,
) -> Response
where
    R: PlanRepository + 'static,
    W: PlanWriter + 'static,
{
    match service.analytics() {
        Ok(Some(analytics)) => (StatusCode::OK, axum::Json(analytics)).into_response(),
        Ok(None) => {
            let payload = json!({
                "total_plans": 0,
                "message": "no plans available",
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn compare_handler<R, W>(
    State(service): State<Arc<PlanningService<R, W>>>,
    Path((left, right)): Path<(String, String)>,
) -> Response
where
    R: PlanRepository + 'static,
    W: PlanWriter + 'static,
{
    match service.compare(&PlanId(left), &PlanId(right)) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn top_handler<R, W>(
    State(service): State<Arc<PlanningService<R, W>>>,
    Query(query): Query<TopQuery>,
) -> Response
where
    R: PlanRepository + 'static,
    W: PlanWriter + 'static,
{
    match service.top(query.n, query.min_score) {
        Ok(plans) => (StatusCode::OK, axum::Json(plans)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: PlanningServiceError) -> Response {
    let status = match &error {
        PlanningServiceError::NotFound(_) => StatusCode::NOT_FOUND,
        PlanningServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        PlanningServiceError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status.is_server_error() {
        error!(%error, "plan request failed");
    }

    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
