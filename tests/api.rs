//! HTTP tests for the endpoints that never reach the database.
//!
//! The pool is created lazily, so no Postgres is needed as long as the
//! requests under test stay away from saved quotations.

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;

use jrc_quotes::pricing::PriceTable;
use jrc_quotes::{app, AppState};

fn test_app() -> Router {
    let pool = PgPoolOptions::new()
        .connect_lazy("postgres://localhost/jrc_quotes_test")
        .unwrap();
    app(AppState::new(pool, PriceTable::default(), "JRC Consulting Group"))
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn read_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health() {
    let response = test_app()
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = read_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "jrc-quotes");
    assert_eq!(body["cache"]["quotations_size"], 0);
}

#[tokio::test]
async fn test_breakdown_predefined_plan() {
    let response = test_app()
        .oneshot(post_json(
            "/api/pricing/breakdown",
            json!({
                "plan_mode": "predefined",
                "selected_plan_key": "pyme",
                "person_type": "legal_entity",
                "payroll_enabled": true,
                "collaborator_count": 3
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = read_json(response).await;
    assert_eq!(body["plan_base"]["amount"], "95000.00");
    // 3 x 5000 plus VAT
    assert_eq!(body["collaborator_cost"]["amount"], "16950.00");
    assert_eq!(body["total_cost"]["amount"], "111950.00");
    assert_eq!(body["total_cost"]["currency"], "CRC");
    assert_eq!(body["currency"], "CRC");
}

#[tokio::test]
async fn test_breakdown_foreign_currency() {
    let response = test_app()
        .oneshot(post_json(
            "/api/pricing/breakdown",
            json!({
                "plan_mode": "custom",
                "base_price": "100000",
                "person_type": "individual",
                "currency": "USD",
                "exchange_rate": "500"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = read_json(response).await;
    assert_eq!(body["total_cost"]["amount"], "200.00");
    assert_eq!(body["total_cost"]["currency"], "USD");
}

#[tokio::test]
async fn test_breakdown_missing_exchange_rate_is_rejected() {
    let response = test_app()
        .oneshot(post_json(
            "/api/pricing/breakdown",
            json!({
                "plan_mode": "custom",
                "base_price": "100000",
                "person_type": "individual",
                "currency": "USD"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = read_json(response).await;
    assert_eq!(body["error_type"], "invalid_request");
    assert_eq!(body["details"]["field"], "exchange_rate");
}

#[tokio::test]
async fn test_breakdown_unknown_plan_is_rejected() {
    let response = test_app()
        .oneshot(post_json(
            "/api/pricing/breakdown",
            json!({
                "plan_mode": "predefined",
                "selected_plan_key": "enterprise",
                "person_type": "individual"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = read_json(response).await;
    assert_eq!(body["details"]["field"], "selected_plan_key");
}

#[tokio::test]
async fn test_plans_catalogue() {
    let response = test_app()
        .oneshot(Request::get("/api/pricing/plans").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = read_json(response).await;
    assert_eq!(body["top_tier_plan"], "full-compliance");
    let keys: Vec<&str> = body["plans"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|p| p["key"].as_str())
        .collect();
    assert_eq!(keys, vec!["starter", "pyme", "full-compliance"]);
}

#[tokio::test]
async fn test_preview_document_in_english() {
    let response = test_app()
        .oneshot(post_json(
            "/api/pricing/preview",
            json!({
                "client": {"first_name": "Ana", "last_name": "Mora"},
                "quotation": {
                    "plan_mode": "additional_services",
                    "person_type": "individual",
                    "extra_line_items": [{"name": "RTBF filing", "value": "25000"}]
                },
                "language": "en"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("Additional Services - Ana Mora"));
    assert!(html.contains("RTBF filing"));
    assert!(html.contains("₡25,000.00"));
    assert!(html.contains("JRC Consulting Group"));
}

#[tokio::test]
async fn test_save_without_submitter_is_rejected_before_database() {
    let response = test_app()
        .oneshot(post_json(
            "/api/quotations",
            json!({
                "client": {"first_name": "Ana"},
                "quotation": {"plan_mode": "custom", "base_price": "1000", "person_type": "individual"},
                "submitted_by": {"email": " ", "full_name": "Nobody"}
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = read_json(response).await;
    assert_eq!(body["details"]["field"], "submitted_by.email");
}

#[tokio::test]
async fn test_breakdown_tiny_exchange_rate_is_rejected() {
    let response = test_app()
        .oneshot(post_json(
            "/api/pricing/breakdown",
            json!({
                "plan_mode": "predefined",
                "selected_plan_key": "full-compliance",
                "person_type": "legal_entity",
                "currency": "USD",
                "exchange_rate": "0.0000000000000000000000000001"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = read_json(response).await;
    assert_eq!(body["details"]["field"], "exchange_rate");
}
