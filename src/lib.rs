//! Quotation pricing engine and API for JRC Consulting Group.
//!
//! The pricing engine in [`pricing`] is pure and synchronous; everything else
//! wires it to HTTP, Postgres and the quotation document preview.

pub mod cache;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod preview;
pub mod pricing;
pub mod routes;

use std::sync::Arc;

use axum::{routing::get, Router};
use sqlx::PgPool;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::cache::AppCache;
use crate::pricing::PriceTable;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub cache: AppCache,
    pub pricing: Arc<PriceTable>,
    pub company_name: Arc<str>,
}

impl AppState {
    pub fn new(db: PgPool, pricing: PriceTable, company_name: &str) -> Self {
        Self {
            db,
            cache: AppCache::new(),
            pricing: Arc::new(pricing),
            company_name: Arc::from(company_name),
        }
    }
}

/// Build the application router
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health))
        .merge(pricing::router())
        .merge(routes::quotations::router())
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
