//! In-memory caching using moka
//!
//! Caches saved quotations and quotation listings. Every write through the
//! API invalidates the affected entries, so readers never see a record
//! older than the last change made through this process.

use moka::future::Cache;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use uuid::Uuid;

use crate::models::QuotationRecord;

/// Application cache holding quotation records and listings
#[derive(Clone)]
pub struct AppCache {
    /// Single quotations (id -> record)
    pub quotations: Cache<Uuid, Arc<QuotationRecord>>,
    /// Listings (cache_key -> records)
    pub listings: Cache<String, Arc<Vec<QuotationRecord>>>,
}

impl AppCache {
    /// Create a new cache instance with configured TTLs
    pub fn new() -> Self {
        Self {
            // Quotations: 1000 entries, 30 min TTL, 10 min idle
            quotations: Cache::builder()
                .max_capacity(1000)
                .time_to_live(Duration::from_secs(30 * 60))
                .time_to_idle(Duration::from_secs(10 * 60))
                .build(),

            // Listings: one per user filter, 5 min TTL
            listings: Cache::builder()
                .max_capacity(200)
                .time_to_live(Duration::from_secs(5 * 60))
                .build(),
        }
    }

    /// Get cache statistics for monitoring
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            quotations_size: self.quotations.entry_count(),
            listings_size: self.listings.entry_count(),
        }
    }

    /// Invalidate a quotation after a write
    pub async fn invalidate_quotation(&self, id: Uuid) {
        self.quotations.invalidate(&id).await;
        // Any listing may contain this quotation
        self.listings.invalidate_all();
        info!("Cache invalidated for quotation: {}", id);
    }

    /// Generate cache key for a quotation listing
    pub fn listing_key(
        submitted_by: Option<&str>,
        search: Option<&str>,
        include_deleted: bool,
    ) -> String {
        let scope = if include_deleted { "all" } else { "live" };
        let owner = submitted_by.map_or_else(|| "*".to_string(), str::to_lowercase);
        match search {
            Some(term) => format!("quotations:{}:{}:{}", scope, owner, term.to_lowercase()),
            None => format!("quotations:{}:{}", scope, owner),
        }
    }
}

impl Default for AppCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Cache statistics for monitoring endpoint
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub quotations_size: u64,
    pub listings_size: u64,
}
