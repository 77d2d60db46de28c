//! Saved quotation route handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::cache::AppCache;
use crate::db;
use crate::error::{AppError, Result};
use crate::models::{
    ClientInfo, Language, QuotationInput, QuotationRecord, QuotationResponse, SubmittedBy,
};
use crate::preview::{self, QuotationPreview};
use crate::pricing::{compute_breakdown, round_money, BreakdownRequest, PriceTable, PricingError};
use crate::AppState;

/// Largest total the `NUMERIC(18, 2)` column holds
const MAX_STORED_TOTAL: Decimal = dec!(9999999999999999.99);

/// Body for saving a new quotation
#[derive(Debug, Deserialize)]
pub struct SaveQuotationRequest {
    pub client: ClientInfo,
    pub quotation: BreakdownRequest,
    #[serde(default)]
    pub language: Language,
    pub submitted_by: SubmittedBy,
    /// Total the form displayed; only compared against the recomputed one
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub total_cost: Option<Decimal>,
}

/// Body for editing a quotation
#[derive(Debug, Deserialize)]
pub struct UpdateQuotationRequest {
    pub client: ClientInfo,
    pub quotation: BreakdownRequest,
    #[serde(default)]
    pub language: Language,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub total_cost: Option<Decimal>,
}

/// Query parameters for quotation listing
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Only this user's quotations; everyone's when absent
    #[serde(default)]
    pub submitted_by: Option<String>,
    /// Case-insensitive substring of the client's full name
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub include_deleted: bool,
}

#[derive(Debug, Deserialize)]
pub struct DeleteQuery {
    pub deleted_by: String,
}

#[derive(Debug, Serialize)]
pub struct QuotationListResponse {
    pub quotations: Vec<QuotationResponse>,
    pub count: usize,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/quotations", post(create).get(list))
        .route("/api/quotations/:id", get(show).put(update).delete(soft_delete))
        .route("/api/quotations/:id/restore", post(restore))
        .route("/api/quotations/:id/permanent", delete(delete_permanently))
        .route("/quotations/:id/preview", get(preview_saved))
}

/// Save a new quotation
async fn create(
    State(state): State<AppState>,
    Json(body): Json<SaveQuotationRequest>,
) -> Result<(StatusCode, Json<QuotationResponse>)> {
    require("submitted_by.email", &body.submitted_by.email)?;

    let input = priced_input(
        &state.pricing,
        body.client,
        body.quotation,
        body.language,
        body.total_cost,
    )?;
    let record = db::insert_quotation(&state.db, &input, &body.submitted_by).await?;
    info!("Saved quotation {} for {}", record.id, record.submitted_by_email);

    remember(&state.cache, record.clone()).await;
    Ok((StatusCode::CREATED, Json(QuotationResponse::from(&record))))
}

/// List quotations
async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<QuotationListResponse>> {
    let submitted_by = query.submitted_by.as_deref().filter(|s| !s.is_empty());
    let search = query.search.as_deref().map(str::trim).filter(|s| !s.is_empty());
    let key = AppCache::listing_key(submitted_by, search, query.include_deleted);

    let records = if let Some(cached) = state.cache.listings.get(&key).await {
        debug!("Cache HIT for listing: {}", key);
        cached
    } else {
        debug!("Cache MISS for listing: {}", key);
        let records =
            Arc::new(db::list_quotations(&state.db, submitted_by, search, query.include_deleted).await?);
        state.cache.listings.insert(key, records.clone()).await;
        records
    };

    let quotations: Vec<QuotationResponse> =
        records.iter().map(QuotationResponse::from).collect();
    Ok(Json(QuotationListResponse {
        count: quotations.len(),
        quotations,
    }))
}

/// Get one quotation
async fn show(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<QuotationResponse>> {
    let record = load(&state, id).await?;
    Ok(Json(QuotationResponse::from(record.as_ref())))
}

/// Edit a quotation; the total is recomputed
async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateQuotationRequest>,
) -> Result<Json<QuotationResponse>> {
    let input = priced_input(
        &state.pricing,
        body.client,
        body.quotation,
        body.language,
        body.total_cost,
    )?;
    let record = db::update_quotation(&state.db, id, &input).await?;
    info!("Updated quotation {}", id);

    state.cache.invalidate_quotation(id).await;
    remember(&state.cache, record.clone()).await;
    Ok(Json(QuotationResponse::from(&record)))
}

/// Soft delete
async fn soft_delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<DeleteQuery>,
) -> Result<Json<QuotationResponse>> {
    require("deleted_by", &query.deleted_by)?;

    let record = db::soft_delete_quotation(&state.db, id, &query.deleted_by).await?;
    info!("Quotation {} deleted by {}", id, query.deleted_by);

    state.cache.invalidate_quotation(id).await;
    Ok(Json(QuotationResponse::from(&record)))
}

/// Undo a soft delete
async fn restore(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<QuotationResponse>> {
    let record = db::restore_quotation(&state.db, id).await?;
    info!("Quotation {} restored", id);

    state.cache.invalidate_quotation(id).await;
    Ok(Json(QuotationResponse::from(&record)))
}

/// Permanent delete
async fn delete_permanently(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    db::delete_quotation_permanently(&state.db, id).await?;
    warn!("Quotation {} permanently deleted", id);

    state.cache.invalidate_quotation(id).await;
    Ok(StatusCode::NO_CONTENT)
}

/// Document preview of a saved quotation, priced with the current table
async fn preview_saved(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<QuotationPreview> {
    let record = load(&state, id).await?;
    preview::document(
        &state.pricing,
        &state.company_name,
        &record.client,
        &record.request,
        record.language(),
        record.created_at.date_naive(),
    )
}

/// Fetch a quotation through the cache
async fn load(state: &AppState, id: Uuid) -> Result<Arc<QuotationRecord>> {
    if let Some(cached) = state.cache.quotations.get(&id).await {
        debug!("Cache HIT for quotation: {}", id);
        return Ok(cached);
    }

    debug!("Cache MISS for quotation: {}", id);
    let record = Arc::new(db::get_quotation(&state.db, id).await?);
    state.cache.quotations.insert(id, record.clone()).await;
    Ok(record)
}

async fn remember(cache: &AppCache, record: QuotationRecord) {
    cache.listings.invalidate_all();
    cache.quotations.insert(record.id, Arc::new(record)).await;
}

/// Price the form and build what gets stored.
///
/// The stored total always comes from the engine. A differing total sent by
/// the form means its state was stale; that is logged, not trusted.
fn priced_input(
    table: &PriceTable,
    client: ClientInfo,
    request: BreakdownRequest,
    language: Language,
    submitted_total: Option<Decimal>,
) -> Result<QuotationInput> {
    require("client.first_name", &client.first_name)?;

    let quotation = request.to_quotation_request()?;
    let breakdown = compute_breakdown(&quotation, table)?;
    let total_cost = round_money(breakdown.total_cost, 2);
    if total_cost > MAX_STORED_TOTAL {
        return Err(PricingError::invalid(
            "total_cost",
            format!("total cannot exceed {}", MAX_STORED_TOTAL),
        )
        .into());
    }

    if let Some(submitted) = submitted_total {
        if round_money(submitted, 2) != total_cost {
            warn!(
                submitted = %submitted,
                computed = %total_cost,
                "Submitted total differs from recomputed total, storing recomputed"
            );
        }
    }

    Ok(QuotationInput {
        client,
        request,
        language,
        currency: breakdown.currency,
        total_cost,
    })
}

fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AppError::Validation {
            field: field.to_string(),
            message: format!("{} is required", field),
        });
    }
    Ok(())
}
