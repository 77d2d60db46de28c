//! Response DTOs for pricing API endpoints.

use rust_decimal::Decimal;
use serde::Serialize;

use super::calculators::round_money;
use super::models::{Breakdown, Currency, PlanDefinition, PlanPrice};

/// Money value for JSON responses
#[derive(Debug, Clone, Serialize)]
pub struct MoneyResponse {
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    pub currency: String,
}

impl MoneyResponse {
    /// Rounded to cents, always with two decimals
    pub fn new(amount: Decimal, currency: Currency) -> Self {
        let mut amount = round_money(amount, 2);
        amount.rescale(2);
        Self {
            amount,
            currency: currency.code().to_string(),
        }
    }
}

/// Response for breakdown calculation
#[derive(Debug, Serialize)]
pub struct BreakdownResponse {
    pub plan_base: MoneyResponse,
    pub collaborator_cost: MoneyResponse,
    pub invoice_cost: MoneyResponse,
    pub transaction_cost: MoneyResponse,
    pub extra_features_cost: MoneyResponse,
    pub discount_amount: MoneyResponse,
    pub total_cost: MoneyResponse,
    pub currency: Currency,
}

impl From<&Breakdown> for BreakdownResponse {
    fn from(b: &Breakdown) -> Self {
        Self {
            plan_base: MoneyResponse::new(b.plan_base, b.currency),
            collaborator_cost: MoneyResponse::new(b.collaborator_cost, b.currency),
            invoice_cost: MoneyResponse::new(b.invoice_cost, b.currency),
            transaction_cost: MoneyResponse::new(b.transaction_cost, b.currency),
            extra_features_cost: MoneyResponse::new(b.extra_features_cost, b.currency),
            discount_amount: MoneyResponse::new(b.discount_amount, b.currency),
            total_cost: MoneyResponse::new(b.total_cost, b.currency),
            currency: b.currency,
        }
    }
}

/// A selectable plan
#[derive(Debug, Serialize)]
pub struct PlanResponse {
    pub key: String,
    pub features: Vec<String>,
    pub price: PlanPrice,
    pub currency: Currency,
}

impl From<&PlanDefinition> for PlanResponse {
    fn from(plan: &PlanDefinition) -> Self {
        Self {
            key: plan.key.clone(),
            features: plan.features.clone(),
            price: plan.price.clone(),
            currency: Currency::Local,
        }
    }
}

/// Response for the plan catalogue
#[derive(Debug, Serialize)]
pub struct PlansResponse {
    pub plans: Vec<PlanResponse>,
    pub top_tier_plan: String,
}

/// Generic pricing error response
#[derive(Debug, Serialize)]
pub struct PricingErrorResponse {
    pub error_type: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_breakdown_response_rounds_to_cents() {
        let breakdown = Breakdown {
            plan_base: dec!(177.865),
            collaborator_cost: dec!(0),
            invoice_cost: dec!(22.271),
            transaction_cost: dec!(0),
            extra_features_cost: dec!(0),
            discount_amount: dec!(0),
            total_cost: dec!(200.136),
            currency: Currency::Foreign,
        };

        let response = BreakdownResponse::from(&breakdown);
        assert_eq!(response.plan_base.amount, dec!(177.86));
        assert_eq!(response.invoice_cost.amount, dec!(22.27));
        assert_eq!(response.total_cost.amount, dec!(200.14));
        assert_eq!(response.total_cost.currency, "USD");

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["total_cost"]["amount"], "200.14");
        assert_eq!(json["currency"], "USD");
    }
}
