//! HTTP routes for the pricing engine.
//!
//! These endpoints never touch the database: they price the submitted form
//! against the configured table and return the result.

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;

use crate::error::Result;
use crate::preview::{self, QuotationPreview};
use crate::AppState;

use super::requests::{BreakdownRequest, PreviewRequest};
use super::responses::{BreakdownResponse, PlanResponse, PlansResponse};
use super::services::compute_breakdown;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/pricing/breakdown", post(breakdown))
        .route("/api/pricing/plans", get(plans))
        .route("/api/pricing/preview", post(preview_document))
}

/// Live breakdown for the form being edited
async fn breakdown(
    State(state): State<AppState>,
    Json(body): Json<BreakdownRequest>,
) -> Result<Json<BreakdownResponse>> {
    let request = body.to_quotation_request()?;
    let breakdown = compute_breakdown(&request, &state.pricing)?;
    Ok(Json(BreakdownResponse::from(&breakdown)))
}

/// Plan catalogue from the price table
async fn plans(State(state): State<AppState>) -> Json<PlansResponse> {
    Json(PlansResponse {
        plans: state.pricing.plans.iter().map(PlanResponse::from).collect(),
        top_tier_plan: state.pricing.top_tier_plan.clone(),
    })
}

/// Document preview for a quotation that has not been saved yet
async fn preview_document(
    State(state): State<AppState>,
    Json(body): Json<PreviewRequest>,
) -> Result<QuotationPreview> {
    preview::document(
        &state.pricing,
        &state.company_name,
        &body.client,
        &body.quotation,
        body.language,
        Utc::now().date_naive(),
    )
}
