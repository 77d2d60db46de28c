//! Pricing engine module for quotations.
//!
//! Computes the itemized cost breakdown of a quotation from the plan
//! selection, volumes, extras, discount and currency. The engine itself is
//! pure; `routes` exposes it over HTTP.

pub mod calculators;
pub mod models;
pub mod requests;
pub mod responses;
pub mod routes;
pub mod services;

// Re-export commonly used items
pub use calculators::round_money;
pub use models::{
    Breakdown, Currency, Discount, DiscountKind, ExtraLineItem, PersonType, PlanMode,
    PriceTable, QuotationRequest,
};
pub use requests::BreakdownRequest;
pub use responses::{BreakdownResponse, MoneyResponse, PricingErrorResponse};
pub use routes::router;
pub use services::{compute_breakdown, PricingError};
