//! Data models

pub mod quotation;

pub use quotation::{
    ClientInfo, Language, QuotationInput, QuotationRecord, QuotationResponse, SubmittedBy,
};
