use super::common::*;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use crate::workflows::planning::evaluation::EvaluationConfig;
use crate::workflows::planning::generator::GeneratorConfig;
use crate::workflows::planning::router::{self, ListQuery, TopQuery};
use crate::workflows::planning::PlanningService;

fn get_request(uri: &str) -> axum::http::Request<axum::body::Body> {
    axum::http::Request::get(uri)
        .body(axum::body::Body::empty())
        .unwrap()
}

fn json_request(uri: &str, body: &Value) -> axum::http::Request<axum::body::Body> {
    axum::http::Request::post(uri)
        .header(axum::http::header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

#[tokio::test]
async fn list_route_returns_ranked_page() {
    let (service, _) = build_service(vec![scored_plan("low", 30.0), scored_plan("high", 80.0)]);
    let router = router_with_service(service);

    let response = router
        .oneshot(get_request("/api/plans?limit=1"))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload.get("total"), Some(&json!(2)));
    let plans = payload
        .get("plans")
        .and_then(Value::as_array)
        .expect("plans array");
    assert_eq!(plans.len(), 1);
    assert_eq!(plans[0].get("id"), Some(&json!("high")));
}

#[tokio::test]
async fn list_handler_defaults_to_first_page() {
    let (service, _) = build_service(vec![scored_plan("only", 50.0)]);

    let response = router::list_handler::<MemoryRepository, OfflineWriter>(
        State(Arc::new(service)),
        Query(ListQuery {
            limit: 10,
            offset: 0,
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload.get("limit"), Some(&json!(10)));
    assert_eq!(payload.get("offset"), Some(&json!(0)));
}

#[tokio::test]
async fn plan_handler_returns_not_found_for_unknown_id() {
    let (service, _) = build_service(Vec::new());

    let response = router::plan_handler::<MemoryRepository, OfflineWriter>(
        State(Arc::new(service)),
        Path("missing".to_string()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let payload = read_json_body(response).await;
    assert!(payload
        .get("error")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .contains("missing"));
}

#[tokio::test]
async fn plan_route_returns_the_stored_plan() {
    let (service, _) = build_service(vec![strong_plan(
        "p-1",
        "Claims autopilot",
        crate::workflows::planning::PlanCategory::HealthTech,
    )]);
    let router = router_with_service(service);

    let response = router
        .oneshot(get_request("/api/plans/p-1"))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload.get("title"), Some(&json!("Claims autopilot")));
    assert_eq!(payload.get("category"), Some(&json!("HealthTech")));
}

#[tokio::test]
async fn evaluation_route_includes_findings() {
    let (service, _) = build_service(vec![weak_plan("weak"), scored_plan("other", 70.0)]);
    let router = router_with_service(service);

    let response = router
        .oneshot(get_request("/api/plans/weak/evaluation"))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert!(payload.get("outcome").is_some());
    assert!(payload
        .get("weaknesses")
        .and_then(Value::as_array)
        .is_some_and(|weaknesses| !weaknesses.is_empty()));
    assert_eq!(
        payload.pointer("/benchmark/benchmark_size"),
        Some(&json!(1))
    );
}

#[tokio::test]
async fn generate_route_rejects_out_of_range_counts() {
    let (service, repository) = build_service(Vec::new());
    let router = router_with_service(service);

    let response = router
        .clone()
        .oneshot(json_request("/api/generate", &json!({ "count": 0 })))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = router
        .oneshot(json_request("/api/generate", &json!({ "count": 11 })))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    assert_eq!(repository.len(), 0);
}

#[tokio::test]
async fn generate_route_creates_plans() {
    let (service, repository) = build_service(Vec::new());
    let router = router_with_service(service);

    let response = router
        .oneshot(json_request("/api/generate", &json!({ "count": 2 })))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::CREATED);
    let payload = read_json_body(response).await;
    assert_eq!(payload.get("status"), Some(&json!("completed")));
    assert_eq!(payload.get("count"), Some(&json!(2)));
    assert_eq!(repository.len(), 2);
}

#[tokio::test]
async fn generate_route_reports_storage_failures() {
    let service = PlanningService::new(
        Arc::new(UnavailableRepository),
        Arc::new(OfflineWriter),
        EvaluationConfig::default(),
        GeneratorConfig::default(),
    );
    let router = crate::workflows::planning::plan_router(Arc::new(service));

    let response = router
        .oneshot(json_request("/api/generate", &json!({})))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn evaluate_route_scores_submitted_plan() {
    let (service, repository) = build_service(Vec::new());
    let router = router_with_service(service);
    let body = serde_json::to_value(weak_plan("visitor")).unwrap();

    let response = router
        .oneshot(json_request("/api/evaluate", &body))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload.pointer("/plan/feasibility_score"), Some(&json!(68.0)));
    assert_eq!(
        payload.pointer("/detail/outcome/feasibility/score"),
        Some(&json!(68.0))
    );
    assert_eq!(repository.len(), 0);
}

#[tokio::test]
async fn evaluate_route_rejects_invalid_plan() {
    let (service, _) = build_service(Vec::new());
    let router = router_with_service(service);
    let mut plan = weak_plan("visitor");
    plan.market_analysis.market_size = -3.0;
    let body = serde_json::to_value(plan).unwrap();

    let response = router
        .oneshot(json_request("/api/evaluate", &body))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn analytics_handler_reports_empty_corpus() {
    let (service, _) = build_service(Vec::new());

    let response =
        router::analytics_handler::<MemoryRepository, OfflineWriter>(State(Arc::new(service)))
            .await;

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload.get("total_plans"), Some(&json!(0)));
}

#[tokio::test]
async fn analytics_route_summarizes_plans() {
    let (service, _) = build_service(vec![scored_plan("a", 80.0), scored_plan("b", 60.0)]);
    let router = router_with_service(service);

    let response = router
        .oneshot(get_request("/api/analytics"))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload.get("total_plans"), Some(&json!(2)));
    assert_eq!(
        payload.pointer("/statistics/overall/mean"),
        Some(&json!(70.0))
    );
    assert_eq!(payload.pointer("/category_distribution/SaaS"), Some(&json!(2)));
}

#[tokio::test]
async fn compare_handler_returns_not_found_for_missing_plan() {
    let (service, _) = build_service(vec![scored_plan("a", 80.0)]);

    let response = router::compare_handler::<MemoryRepository, OfflineWriter>(
        State(Arc::new(service)),
        Path(("a".to_string(), "b".to_string())),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn compare_route_returns_differences_and_report() {
    let (service, _) = build_service(vec![scored_plan("a", 80.0), scored_plan("b", 60.0)]);
    let router = router_with_service(service);

    let response = router
        .oneshot(get_request("/api/compare/a/b"))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(
        payload.pointer("/comparison/overall_diff"),
        Some(&json!(20.0))
    );
    assert!(payload
        .get("report")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .starts_with("# Plan comparison"));
}

#[tokio::test]
async fn top_handler_applies_threshold() {
    let (service, _) = build_service(vec![
        scored_plan("A", 90.0),
        scored_plan("B", 50.0),
        scored_plan("C", 70.0),
    ]);

    let response = router::top_handler::<MemoryRepository, OfflineWriter>(
        State(Arc::new(service)),
        Query(TopQuery {
            n: 5,
            min_score: 60.0,
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    let ids: Vec<&str> = payload
        .as_array()
        .expect("array payload")
        .iter()
        .filter_map(|plan| plan.get("id").and_then(Value::as_str))
        .collect();
    assert_eq!(ids, vec!["A", "C"]);
}

#[tokio::test]
async fn top_route_parses_query_string() {
    let (service, _) = build_service(vec![scored_plan("A", 90.0), scored_plan("B", 50.0)]);
    let router = router_with_service(service);

    let response = router
        .oneshot(get_request("/api/top?n=1&min_score=10"))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload.as_array().map(Vec::len), Some(1));
}
