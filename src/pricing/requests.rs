//! Request DTOs for pricing API endpoints.
//!
//! Decimal amounts travel as strings. `BreakdownRequest` is also the shape
//! stored with a saved quotation, so it round-trips through serde.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::models::{
    Currency, Discount, DiscountKind, ExtraLineItem, PersonType, PlanMode, QuotationRequest,
};
use super::services::PricingError;
use crate::models::{ClientInfo, Language};

/// Request to compute a breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownRequest {
    pub plan_mode: PlanMode,
    #[serde(default)]
    pub selected_plan_key: Option<String>,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub base_price: Option<Decimal>,
    /// Features picked for a custom plan; advisory, never priced
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub person_type: Option<PersonType>,
    #[serde(default)]
    pub payroll_enabled: bool,
    #[serde(default)]
    pub collaborator_count: Option<u32>,
    #[serde(default)]
    pub invoicing_enabled: bool,
    #[serde(default)]
    pub issued_invoices_per_month: Option<u32>,
    #[serde(default)]
    pub received_invoices_per_month: Option<u32>,
    #[serde(default)]
    pub transactions_per_month: Option<u32>,
    #[serde(default)]
    pub extra_line_items: Vec<ExtraLineItemRequest>,
    #[serde(default)]
    pub discount: Option<DiscountRequest>,
    #[serde(default = "default_currency")]
    pub currency: Currency,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub exchange_rate: Option<Decimal>,
}

fn default_currency() -> Currency {
    Currency::Local
}

/// An extra line item in the request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtraLineItemRequest {
    pub name: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub value: Decimal,
}

/// Discount in the request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountRequest {
    pub kind: DiscountKind,
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
}

/// Request to preview an unsaved quotation document
#[derive(Debug, Deserialize)]
pub struct PreviewRequest {
    pub client: ClientInfo,
    pub quotation: BreakdownRequest,
    #[serde(default)]
    pub language: Language,
}

impl BreakdownRequest {
    /// Snapshot the wire form into the engine's input.
    ///
    /// Missing counts become zero. A missing person type is rejected since
    /// plan prices may depend on it.
    pub fn to_quotation_request(&self) -> Result<QuotationRequest, PricingError> {
        let person_type = self
            .person_type
            .ok_or_else(|| PricingError::invalid("person_type", "person type is required"))?;

        if let Some(index) = self
            .extra_line_items
            .iter()
            .position(|item| item.name.trim().is_empty())
        {
            return Err(PricingError::invalid(
                &format!("extra_line_items[{}].name", index),
                "extra item needs a name",
            ));
        }

        Ok(QuotationRequest {
            plan_mode: self.plan_mode,
            selected_plan_key: self.selected_plan_key.clone(),
            base_price: self.base_price,
            person_type,
            payroll_enabled: self.payroll_enabled,
            collaborator_count: self.collaborator_count.unwrap_or(0),
            invoicing_enabled: self.invoicing_enabled,
            issued_invoices_per_month: self.issued_invoices_per_month.unwrap_or(0),
            received_invoices_per_month: self.received_invoices_per_month.unwrap_or(0),
            transactions_per_month: self.transactions_per_month.unwrap_or(0),
            extra_line_items: self
                .extra_line_items
                .iter()
                .map(|item| ExtraLineItem {
                    name: item.name.trim().to_string(),
                    value: item.value,
                })
                .collect(),
            discount: self.discount.as_ref().map(|d| Discount {
                kind: d.kind,
                amount: d.amount,
            }),
            currency: self.currency,
            exchange_rate: self.exchange_rate,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_minimal_request_defaults() {
        let body = r#"{"plan_mode": "custom", "base_price": "85000", "person_type": "individual"}"#;
        let request: BreakdownRequest = serde_json::from_str(body).unwrap();
        assert_eq!(request.currency, Currency::Local);

        let quotation = request.to_quotation_request().unwrap();
        assert_eq!(quotation.base_price, Some(dec!(85000)));
        assert_eq!(quotation.collaborator_count, 0);
        assert_eq!(quotation.transactions_per_month, 0);
        assert!(quotation.extra_line_items.is_empty());
        assert!(quotation.discount.is_none());
    }

    #[test]
    fn test_full_request_maps_every_field() {
        let body = r#"{
            "plan_mode": "predefined",
            "selected_plan_key": "full-compliance",
            "person_type": "legal_entity",
            "payroll_enabled": true,
            "collaborator_count": 12,
            "invoicing_enabled": true,
            "issued_invoices_per_month": 25,
            "received_invoices_per_month": 60,
            "transactions_per_month": 90,
            "extra_line_items": [{"name": " RTBF filing ", "value": "25000"}],
            "discount": {"kind": "percent", "amount": "15"},
            "currency": "USD",
            "exchange_rate": "505.75"
        }"#;
        let request: BreakdownRequest = serde_json::from_str(body).unwrap();
        let quotation = request.to_quotation_request().unwrap();

        assert_eq!(quotation.plan_mode, PlanMode::Predefined);
        assert_eq!(quotation.selected_plan_key.as_deref(), Some("full-compliance"));
        assert_eq!(quotation.person_type, PersonType::LegalEntity);
        assert_eq!(quotation.collaborator_count, 12);
        assert_eq!(quotation.issued_invoices_per_month, 25);
        assert_eq!(quotation.received_invoices_per_month, 60);
        assert_eq!(quotation.transactions_per_month, 90);
        assert_eq!(quotation.extra_line_items[0].name, "RTBF filing");
        assert_eq!(quotation.extra_line_items[0].value, dec!(25000));
        assert_eq!(
            quotation.discount,
            Some(Discount { kind: DiscountKind::Percent, amount: dec!(15) })
        );
        assert_eq!(quotation.currency, Currency::Foreign);
        assert_eq!(quotation.exchange_rate, Some(dec!(505.75)));
    }

    #[test]
    fn test_missing_person_type_is_rejected() {
        let body = r#"{"plan_mode": "additional_services"}"#;
        let request: BreakdownRequest = serde_json::from_str(body).unwrap();
        let err = request.to_quotation_request().unwrap_err();
        assert!(matches!(err, PricingError::InvalidRequest { ref field, .. } if field == "person_type"));
    }

    #[test]
    fn test_unnamed_extra_item_is_rejected() {
        let body = r#"{
            "plan_mode": "custom",
            "base_price": "1000",
            "person_type": "individual",
            "extra_line_items": [{"name": "  ", "value": "10"}]
        }"#;
        let request: BreakdownRequest = serde_json::from_str(body).unwrap();
        let err = request.to_quotation_request().unwrap_err();
        assert!(
            matches!(err, PricingError::InvalidRequest { ref field, .. } if field == "extra_line_items[0].name")
        );
    }

    #[test]
    fn test_serialized_request_reads_back() {
        let body = r#"{"plan_mode": "custom", "base_price": "85000.50", "person_type": "individual"}"#;
        let request: BreakdownRequest = serde_json::from_str(body).unwrap();
        let stored = serde_json::to_value(&request).unwrap();
        assert_eq!(stored["base_price"], "85000.50");
        let restored: BreakdownRequest = serde_json::from_value(stored).unwrap();
        assert_eq!(restored, request);
    }
}
