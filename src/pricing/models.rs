//! Domain types for the pricing engine.
//!
//! `QuotationRequest` is the immutable snapshot handed to the engine,
//! `Breakdown` is what comes back, and `PriceTable` is the externally owned
//! configuration the engine prices against.

use std::collections::HashSet;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::services::PricingError;

/// Value-added tax applied to volume-based add-ons only.
pub const VAT_RATE: Decimal = dec!(0.13);

/// Collaborators bundled into the top-tier plan at no charge.
pub const INCLUDED_COLLABORATORS: u32 = 5;

/// Monthly transactions included before per-unit billing starts.
pub const INCLUDED_TRANSACTIONS: u32 = 50;

/// How the plan base price is determined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanMode {
    Predefined,
    Custom,
    AdditionalServices,
}

/// Legal form of the client; changes the price of person-dependent plans
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonType {
    Individual,
    LegalEntity,
}

/// Currency the breakdown is expressed in.
///
/// Prices are configured in the local currency (colones); foreign amounts
/// are derived by dividing by the exchange rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    #[serde(rename = "CRC")]
    Local,
    #[serde(rename = "USD")]
    Foreign,
}

impl Currency {
    /// ISO 4217 code
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Local => "CRC",
            Currency::Foreign => "USD",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Local => "₡",
            Currency::Foreign => "$",
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountKind {
    Fixed,
    Percent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Discount {
    pub kind: DiscountKind,
    pub amount: Decimal,
}

/// Ad hoc cost entered by the user, outside the standard rules
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtraLineItem {
    pub name: String,
    pub value: Decimal,
}

/// Immutable pricing input.
///
/// Counts that do not apply to the selected options are simply ignored by
/// the engine (e.g. `issued_invoices_per_month` when invoicing is off).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotationRequest {
    pub plan_mode: PlanMode,
    pub selected_plan_key: Option<String>,
    pub base_price: Option<Decimal>,
    pub person_type: PersonType,
    pub payroll_enabled: bool,
    pub collaborator_count: u32,
    pub invoicing_enabled: bool,
    pub issued_invoices_per_month: u32,
    /// Informational only, never priced
    pub received_invoices_per_month: u32,
    pub transactions_per_month: u32,
    pub extra_line_items: Vec<ExtraLineItem>,
    pub discount: Option<Discount>,
    pub currency: Currency,
    pub exchange_rate: Option<Decimal>,
}

/// Itemized cost of a quotation.
///
/// Every field is expressed in `currency`. Values carry full decimal
/// precision; round with [`round_money`](super::calculators::round_money)
/// for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Breakdown {
    pub plan_base: Decimal,
    pub collaborator_cost: Decimal,
    pub invoice_cost: Decimal,
    pub transaction_cost: Decimal,
    pub extra_features_cost: Decimal,
    pub discount_amount: Decimal,
    pub total_cost: Decimal,
    pub currency: Currency,
}

impl Breakdown {
    /// Sum of all cost components before the discount, `None` on overflow
    pub fn subtotal(&self) -> Option<Decimal> {
        [
            self.plan_base,
            self.collaborator_cost,
            self.invoice_cost,
            self.transaction_cost,
            self.extra_features_cost,
        ]
        .into_iter()
        .try_fold(Decimal::ZERO, |sum, v| sum.checked_add(v))
    }

    /// Divide every component by `exchange_rate`.
    ///
    /// Each field is converted on its own so displayed lines stay consistent
    /// with the converted total. `None` when a converted amount, or their
    /// sum, does not fit in a `Decimal`.
    pub fn converted(&self, exchange_rate: Decimal, currency: Currency) -> Option<Self> {
        let convert = |amount: Decimal| amount.checked_div(exchange_rate);
        let converted = Self {
            plan_base: convert(self.plan_base)?,
            collaborator_cost: convert(self.collaborator_cost)?,
            invoice_cost: convert(self.invoice_cost)?,
            transaction_cost: convert(self.transaction_cost)?,
            extra_features_cost: convert(self.extra_features_cost)?,
            discount_amount: convert(self.discount_amount)?,
            total_cost: convert(self.total_cost)?,
            currency,
        };
        converted.subtotal()?;
        Some(converted)
    }
}

/// Base price of a predefined plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlanPrice {
    Flat(Decimal),
    ByPersonType {
        individual: Decimal,
        legal_entity: Decimal,
    },
}

impl PlanPrice {
    pub fn for_person(&self, person_type: PersonType) -> Decimal {
        match (self, person_type) {
            (PlanPrice::Flat(amount), _) => *amount,
            (PlanPrice::ByPersonType { individual, .. }, PersonType::Individual) => *individual,
            (PlanPrice::ByPersonType { legal_entity, .. }, PersonType::LegalEntity) => {
                *legal_entity
            }
        }
    }

    fn amounts(&self) -> Vec<Decimal> {
        match self {
            PlanPrice::Flat(amount) => vec![*amount],
            PlanPrice::ByPersonType {
                individual,
                legal_entity,
            } => vec![*individual, *legal_entity],
        }
    }
}

/// A selectable plan template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanDefinition {
    pub key: String,
    #[serde(default)]
    pub features: Vec<String>,
    pub price: PlanPrice,
}

/// One step of the invoice table: `count <= up_to` costs `fee`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceTier {
    pub up_to: u32,
    pub fee: Decimal,
}

/// Stepped invoice pricing with linear overage past the last step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceTiers {
    pub tiers: Vec<InvoiceTier>,
    pub overage_unit_rate: Decimal,
}

/// Plan prices and unit rates, supplied as static configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceTable {
    pub plans: Vec<PlanDefinition>,
    /// Plan that bundles free collaborators
    pub top_tier_plan: String,
    pub collaborator_unit_rate: Decimal,
    pub invoice_tiers: InvoiceTiers,
    pub transaction_unit_rate: Decimal,
}

impl PriceTable {
    pub fn plan(&self, key: &str) -> Option<&PlanDefinition> {
        self.plans.iter().find(|p| p.key == key)
    }

    /// Check the table is usable by the engine.
    ///
    /// Collects every problem instead of stopping at the first one.
    pub fn validate(&self) -> Result<(), PricingError> {
        let mut errors = Vec::new();

        if self.plans.is_empty() {
            errors.push("no plans defined".to_string());
        }

        let mut seen = HashSet::new();
        for plan in &self.plans {
            if !seen.insert(plan.key.as_str()) {
                errors.push(format!("duplicate plan key '{}'", plan.key));
            }
            if plan.price.amounts().iter().any(|a| a.is_sign_negative()) {
                errors.push(format!("plan '{}' has a negative price", plan.key));
            }
        }

        if self.plan(&self.top_tier_plan).is_none() {
            errors.push(format!(
                "top tier plan '{}' is not in the plan list",
                self.top_tier_plan
            ));
        }

        if self.collaborator_unit_rate.is_sign_negative() {
            errors.push("collaborator_unit_rate is negative".to_string());
        }
        if self.transaction_unit_rate.is_sign_negative() {
            errors.push("transaction_unit_rate is negative".to_string());
        }
        if self.invoice_tiers.overage_unit_rate.is_sign_negative() {
            errors.push("invoice overage_unit_rate is negative".to_string());
        }

        let tiers = &self.invoice_tiers.tiers;
        if tiers.is_empty() {
            errors.push("invoice tier table is empty".to_string());
        }
        if tiers.iter().any(|t| t.fee.is_sign_negative()) {
            errors.push("invoice tier fee is negative".to_string());
        }
        for pair in tiers.windows(2) {
            if pair[1].up_to <= pair[0].up_to {
                errors.push(format!(
                    "invoice breakpoints must increase ({} then {})",
                    pair[0].up_to, pair[1].up_to
                ));
            }
            if pair[1].fee < pair[0].fee {
                errors.push(format!(
                    "invoice fees must not decrease ({} then {})",
                    pair[0].fee, pair[1].fee
                ));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(PricingError::Configuration {
                message: format!("price table has {} problem(s)", errors.len()),
                errors,
            })
        }
    }
}

impl Default for PriceTable {
    fn default() -> Self {
        Self {
            plans: vec![
                PlanDefinition {
                    key: "starter".to_string(),
                    features: vec![
                        "Monthly bookkeeping".to_string(),
                        "VAT (D-104) filing".to_string(),
                        "Annual income tax return".to_string(),
                    ],
                    price: PlanPrice::ByPersonType {
                        individual: dec!(45000),
                        legal_entity: dec!(65000),
                    },
                },
                PlanDefinition {
                    key: "pyme".to_string(),
                    features: vec![
                        "Monthly bookkeeping".to_string(),
                        "VAT (D-104) filing".to_string(),
                        "Annual income tax return".to_string(),
                        "Monthly financial statements".to_string(),
                    ],
                    price: PlanPrice::Flat(dec!(95000)),
                },
                PlanDefinition {
                    key: "full-compliance".to_string(),
                    features: vec![
                        "Monthly bookkeeping".to_string(),
                        "VAT (D-104) filing".to_string(),
                        "Annual income tax return".to_string(),
                        "Monthly financial statements".to_string(),
                        "Payroll management (5 collaborators included)".to_string(),
                        "Social security (CCSS) and INS reporting".to_string(),
                        "Ultimate beneficial owner (RTBF) filing".to_string(),
                    ],
                    price: PlanPrice::Flat(dec!(180000)),
                },
            ],
            top_tier_plan: "full-compliance".to_string(),
            collaborator_unit_rate: dec!(5000),
            invoice_tiers: InvoiceTiers {
                tiers: vec![
                    InvoiceTier { up_to: 10, fee: dec!(10000) },
                    InvoiceTier { up_to: 20, fee: dec!(15000) },
                    InvoiceTier { up_to: 30, fee: dec!(20000) },
                    InvoiceTier { up_to: 40, fee: dec!(25000) },
                ],
                overage_unit_rate: dec!(500),
            },
            transaction_unit_rate: dec!(200),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_is_valid() {
        assert!(PriceTable::default().validate().is_ok());
    }

    #[test]
    fn test_plan_price_for_person() {
        let price = PlanPrice::ByPersonType {
            individual: dec!(100),
            legal_entity: dec!(150),
        };
        assert_eq!(price.for_person(PersonType::Individual), dec!(100));
        assert_eq!(price.for_person(PersonType::LegalEntity), dec!(150));
        assert_eq!(PlanPrice::Flat(dec!(7)).for_person(PersonType::LegalEntity), dec!(7));
    }

    #[test]
    fn test_validate_collects_all_problems() {
        let mut table = PriceTable::default();
        table.top_tier_plan = "platinum".to_string();
        table.plans.push(table.plans[0].clone());
        table.invoice_tiers.tiers[2].up_to = 15;

        let err = table.validate().unwrap_err();
        match err {
            PricingError::Configuration { errors, .. } => {
                assert_eq!(errors.len(), 3);
                assert!(errors.iter().any(|e| e.contains("duplicate plan key 'starter'")));
                assert!(errors.iter().any(|e| e.contains("platinum")));
                assert!(errors.iter().any(|e| e.contains("breakpoints must increase")));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_validate_rejects_negative_rates() {
        let mut table = PriceTable::default();
        table.transaction_unit_rate = dec!(-1);
        assert!(table.validate().is_err());
    }

    #[test]
    fn test_price_table_json_shape() {
        let json = r#"{
            "plans": [
                {"key": "starter", "price": {"individual": "45000", "legal_entity": "65000"}},
                {"key": "full-compliance", "features": ["Payroll"], "price": "180000"}
            ],
            "top_tier_plan": "full-compliance",
            "collaborator_unit_rate": "5000",
            "invoice_tiers": {
                "tiers": [{"up_to": 10, "fee": "10000"}],
                "overage_unit_rate": "500"
            },
            "transaction_unit_rate": "200"
        }"#;

        let table: PriceTable = serde_json::from_str(json).unwrap();
        assert!(table.validate().is_ok());
        assert_eq!(
            table.plan("starter").unwrap().price.for_person(PersonType::LegalEntity),
            dec!(65000)
        );
        assert_eq!(table.plan("full-compliance").unwrap().price, PlanPrice::Flat(dec!(180000)));
        assert!(table.plan("missing").is_none());
    }

    #[test]
    fn test_breakdown_subtotal_and_conversion() {
        let breakdown = Breakdown {
            plan_base: dec!(1000),
            collaborator_cost: dec!(200),
            invoice_cost: dec!(300),
            transaction_cost: dec!(0),
            extra_features_cost: dec!(500),
            discount_amount: dec!(1000),
            total_cost: dec!(1000),
            currency: Currency::Local,
        };
        assert_eq!(breakdown.subtotal(), Some(dec!(2000)));

        let usd = breakdown.converted(dec!(500), Currency::Foreign).unwrap();
        assert_eq!(usd.plan_base, dec!(2));
        assert_eq!(usd.extra_features_cost, dec!(1));
        assert_eq!(usd.total_cost, dec!(2));
        assert_eq!(usd.currency, Currency::Foreign);
    }

    #[test]
    fn test_conversion_overflow_is_none() {
        let breakdown = Breakdown {
            plan_base: dec!(180000),
            collaborator_cost: dec!(0),
            invoice_cost: dec!(0),
            transaction_cost: dec!(0),
            extra_features_cost: dec!(0),
            discount_amount: dec!(0),
            total_cost: dec!(180000),
            currency: Currency::Local,
        };
        assert!(breakdown
            .converted(dec!(0.0000000000000000000000000001), Currency::Foreign)
            .is_none());

        let overflowing = Breakdown {
            plan_base: Decimal::MAX,
            extra_features_cost: dec!(1),
            ..breakdown
        };
        assert_eq!(overflowing.subtotal(), None);
    }

    #[test]
    fn test_currency_codes() {
        assert_eq!(Currency::Local.to_string(), "CRC");
        assert_eq!(Currency::Foreign.symbol(), "$");
        let parsed: Currency = serde_json::from_str("\"USD\"").unwrap();
        assert_eq!(parsed, Currency::Foreign);
    }
}
