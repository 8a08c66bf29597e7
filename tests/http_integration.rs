//! End-to-end tests over the HTTP surface, driving the routers with
//! `tower::ServiceExt::oneshot` against the in-memory adapters.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use true_north::adapters::http::{
    dependency_router, matrix_router, pdca_router, DependencyAppState, MatrixAppState,
    PdcaAppState,
};
use true_north::adapters::{InMemoryCollectionStore, InMemoryEventBus};
use true_north::ports::collections;

fn test_app() -> Router {
    let event_publisher = Arc::new(InMemoryEventBus::new());

    let matrix_state = MatrixAppState {
        objectives: Arc::new(InMemoryCollectionStore::new(collections::OBJECTIVES)),
        metrics: Arc::new(InMemoryCollectionStore::new(collections::METRICS)),
        actions: Arc::new(InMemoryCollectionStore::new(collections::ACTIONS)),
        links: Arc::new(InMemoryCollectionStore::new(collections::ALIGNMENT_LINKS)),
        event_publisher: event_publisher.clone(),
    };
    let dependency_state = DependencyAppState {
        dependencies: Arc::new(InMemoryCollectionStore::new(collections::DEPENDENCIES)),
        event_publisher: event_publisher.clone(),
    };
    let pdca_state = PdcaAppState {
        cycles: Arc::new(InMemoryCollectionStore::new(collections::PDCA_CYCLES)),
        event_publisher,
    };

    matrix_router()
        .with_state(matrix_state)
        .merge(dependency_router().with_state(dependency_state))
        .merge(pdca_router().with_state(pdca_state))
}

fn post(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .header("X-User-Id", "tester")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn toggle_walks_strong_medium_weak_absent() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(post(
            "/api/alignment/objectives",
            json!({"kind": "annual", "description": "Reduce rework"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let objective = json_body(response).await;
    let objective_id = objective["id"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(post(
            "/api/alignment/metrics",
            json!({"name": "Defect rate", "target": 2.0, "unit": "%"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let metric = json_body(response).await;
    let metric_id = metric["id"].as_str().unwrap().to_string();

    let toggle = json!({
        "objective_id": objective_id,
        "column": {"column_type": "metric", "id": metric_id}
    });

    let mut seen = Vec::new();
    for _ in 0..4 {
        let response = app
            .clone()
            .oneshot(post("/api/alignment/toggle", toggle.clone()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        seen.push(body["link"]["strength"].clone());
    }

    assert_eq!(seen[0], json!("strong"));
    assert_eq!(seen[1], json!("medium"));
    assert_eq!(seen[2], json!("weak"));
    assert_eq!(seen[3], Value::Null);

    // After the fourth toggle the cell is gone from the stored links.
    let response = app.clone().oneshot(get("/api/alignment/links")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let links = json_body(response).await;
    assert_eq!(links.as_array().unwrap().len(), 0);

    let uri = format!(
        "/api/alignment/strength?objective_id={}&column_type=metric&column_id={}",
        objective_id, metric_id
    );
    let response = app.oneshot(get(&uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["strength"], Value::Null);
}

#[tokio::test]
async fn commands_require_user_header() {
    let app = test_app();

    let request = Request::builder()
        .method("POST")
        .uri("/api/alignment/objectives")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({"kind": "annual", "description": "x"}).to_string(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = json_body(response).await;
    assert_eq!(body["kind"], json!("UNAUTHORIZED"));
    assert_eq!(body["message"], json!("Authentication is required"));
}

#[tokio::test]
async fn error_bodies_use_kind_and_message() {
    let app = test_app();
    let uri = format!("/api/dependencies/{}/resolve", uuid::Uuid::new_v4());

    let response = app.oneshot(post(&uri, json!({}))).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response).await;
    assert_eq!(body["kind"], json!("NOT_FOUND"));
    assert!(body["message"].as_str().unwrap().contains("not found"));
    assert!(body.get("code").is_none());
}

#[tokio::test]
async fn dependency_lifecycle_over_http() {
    let app = test_app();
    let from = uuid::Uuid::new_v4().to_string();
    let to = uuid::Uuid::new_v4().to_string();

    let response = app
        .clone()
        .oneshot(post(
            "/api/dependencies",
            json!({
                "from": {"id": from, "title": "Line upgrade"},
                "to": {"id": to, "title": "Operator training"},
                "kind": "blocks",
                "description": "Training needs the new line installed"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let dependency = json_body(response).await;
    assert_eq!(dependency["status"], json!("active"));
    let dependency_id = dependency["id"].as_str().unwrap().to_string();

    // Self-loops are rejected before anything is stored.
    let response = app
        .clone()
        .oneshot(post(
            "/api/dependencies",
            json!({
                "from": {"id": from, "title": "Line upgrade"},
                "to": {"id": from, "title": "Line upgrade"},
                "kind": "blocks",
                "description": "loop"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .clone()
        .oneshot(get("/api/dependencies/blocking"))
        .await
        .unwrap();
    let blocking = json_body(response).await;
    assert_eq!(blocking.as_array().unwrap().len(), 1);

    // Resolving twice is idempotent.
    let resolve_uri = format!("/api/dependencies/{}/resolve", dependency_id);
    let response = app
        .clone()
        .oneshot(post(&resolve_uri, json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["newly_resolved"], json!(true));
    assert_eq!(body["dependency"]["status"], json!("resolved"));

    let response = app
        .clone()
        .oneshot(post(&resolve_uri, json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["newly_resolved"], json!(false));

    let response = app
        .clone()
        .oneshot(get("/api/dependencies?status=resolved"))
        .await
        .unwrap();
    let resolved = json_body(response).await;
    assert_eq!(resolved.as_array().unwrap().len(), 1);

    let response = app
        .oneshot(get("/api/dependencies/diagnostics/cycles"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["cycles"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn resolve_unknown_dependency_is_404() {
    let app = test_app();
    let uri = format!("/api/dependencies/{}/resolve", uuid::Uuid::new_v4());

    let response = app.oneshot(post(&uri, json!({}))).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn pdca_cycle_advances_in_order_only() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(post(
            "/api/pdca-cycles",
            json!({
                "title": "Reduce Defects",
                "description": "Cut final-inspection defects by half",
                "category": "quality",
                "owner": "Ann",
                "start_date": "2026-01-05T00:00:00Z"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let cycle = json_body(response).await;
    assert_eq!(cycle["current_phase"], json!("plan"));
    assert_eq!(cycle["status"], json!("on-track"));
    assert_eq!(cycle["progress"], json!(0.0));
    let cycle_id = cycle["id"].as_str().unwrap().to_string();

    // Skipping ahead to check is a conflict; the cycle is untouched.
    let response = app
        .clone()
        .oneshot(post(
            &format!("/api/pdca-cycles/{}/phases/check/complete", cycle_id),
            json!({"notes": "", "findings": ""}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    for (phase, expected_progress) in [("plan", 0.25), ("do", 0.5), ("check", 0.75)] {
        let response = app
            .clone()
            .oneshot(post(
                &format!("/api/pdca-cycles/{}/phases/{}/complete", cycle_id, phase),
                json!({"notes": "done", "findings": ""}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["progress"], json!(expected_progress));
        assert_eq!(body["status"], json!("on-track"));
    }

    let response = app
        .clone()
        .oneshot(post(
            &format!("/api/pdca-cycles/{}/phases/act/complete", cycle_id),
            json!({"notes": "standardized", "findings": "defects halved"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["progress"], json!(1.0));
    assert_eq!(body["status"], json!("completed"));
    assert_eq!(body["current_phase"], json!("act"));
    assert_eq!(body["act"]["completed"], json!(true));

    let response = app
        .oneshot(get(&format!("/api/pdca-cycles/{}", cycle_id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], json!("completed"));
}

#[tokio::test]
async fn unknown_pdca_cycle_is_404() {
    let app = test_app();
    let uri = format!("/api/pdca-cycles/{}", uuid::Uuid::new_v4());

    let response = app.oneshot(get(&uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
