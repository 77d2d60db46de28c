//! Error handling for the application

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::pricing::{PricingError, PricingErrorResponse};

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Quotation not found")]
    NotFound,

    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// Non-pricing input problem, e.g. a missing submitter
    #[error("Invalid {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Pricing(PricingError::InvalidRequest { .. }) | AppError::Validation { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::Pricing(PricingError::Configuration { .. })
            | AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            AppError::NotFound => PricingErrorResponse {
                error_type: "not_found".to_string(),
                message: self.to_string(),
                details: None,
            },
            AppError::Pricing(PricingError::InvalidRequest { field, message }) => {
                tracing::debug!("Rejected quotation input on {}: {}", field, message);
                PricingErrorResponse {
                    error_type: "invalid_request".to_string(),
                    message: message.clone(),
                    details: Some(serde_json::json!({ "field": field })),
                }
            }
            AppError::Validation { field, message } => PricingErrorResponse {
                error_type: "invalid_request".to_string(),
                message: message.clone(),
                details: Some(serde_json::json!({ "field": field })),
            },
            AppError::Pricing(PricingError::Configuration { message, errors }) => {
                tracing::error!("Price table error: {} {:?}", message, errors);
                PricingErrorResponse {
                    error_type: "configuration_error".to_string(),
                    message: "Pricing is misconfigured".to_string(),
                    details: None,
                }
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                PricingErrorResponse {
                    error_type: "database_error".to_string(),
                    message: "Database error".to_string(),
                    details: None,
                }
            }
        };

        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
