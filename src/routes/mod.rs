//! HTTP route handlers

pub mod health;
pub mod quotations;

pub use health::health;
