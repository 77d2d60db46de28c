//! Saved quotation models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::pricing::{BreakdownRequest, Currency, MoneyResponse};

/// Client the quotation is addressed to
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientInfo {
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    /// Cédula or corporate id
    #[serde(default)]
    pub national_id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
}

impl ClientInfo {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }
}

/// Language the quotation document is written in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "es")]
    Spanish,
    #[serde(rename = "en")]
    English,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::Spanish => "es",
            Language::English => "en",
        }
    }

    /// Unknown codes fall back to Spanish
    pub fn from_code(code: &str) -> Self {
        match code {
            "en" => Language::English,
            _ => Language::Spanish,
        }
    }
}

/// User who submitted the quotation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmittedBy {
    pub email: String,
    pub full_name: String,
}

/// Quotation row from the quotations table
#[derive(Debug, Clone, FromRow)]
pub struct QuotationRecord {
    pub id: Uuid,
    pub client: Json<ClientInfo>,
    pub request: Json<BreakdownRequest>,
    pub language: String,
    pub currency: String,
    pub total_cost: Decimal,
    pub submitted_by_email: String,
    pub submitted_by_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted: bool,
    pub deleted_by: Option<String>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl QuotationRecord {
    pub fn language(&self) -> Language {
        Language::from_code(&self.language)
    }
}

/// Values written on create and update.
///
/// `total_cost` must come from the engine at save time.
#[derive(Debug, Clone)]
pub struct QuotationInput {
    pub client: ClientInfo,
    pub request: BreakdownRequest,
    pub language: Language,
    pub currency: Currency,
    pub total_cost: Decimal,
}

/// Saved quotation as returned by the API
#[derive(Debug, Serialize)]
pub struct QuotationResponse {
    pub id: Uuid,
    pub client: ClientInfo,
    pub quotation: BreakdownRequest,
    pub language: Language,
    pub total_cost: MoneyResponse,
    pub submitted_by: SubmittedBy,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl From<&QuotationRecord> for QuotationResponse {
    fn from(record: &QuotationRecord) -> Self {
        Self {
            id: record.id,
            client: record.client.0.clone(),
            quotation: record.request.0.clone(),
            language: record.language(),
            total_cost: MoneyResponse {
                amount: record.total_cost,
                currency: record.currency.clone(),
            },
            submitted_by: SubmittedBy {
                email: record.submitted_by_email.clone(),
                full_name: record.submitted_by_name.clone(),
            },
            created_at: record.created_at,
            updated_at: record.updated_at,
            deleted: record.deleted,
            deleted_by: record.deleted_by.clone(),
            deleted_at: record.deleted_at,
        }
    }
}
