//! The pricing engine entry point.
//!
//! `compute_breakdown` validates a request against the selected plan and
//! currency mode, runs each calculator, applies the discount in local
//! currency and finally converts every component together.

use rust_decimal::Decimal;
use tracing::debug;

use super::calculators;
use super::models::{Breakdown, Currency, PlanMode, PriceTable, QuotationRequest};

/// Pricing calculation error types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PricingError {
    /// Missing or contradictory input; `field` names the offending request field
    #[error("Invalid request ({field}): {message}")]
    InvalidRequest { field: String, message: String },

    #[error("Configuration error: {message}")]
    Configuration {
        message: String,
        errors: Vec<String>,
    },
}

impl PricingError {
    pub fn invalid(field: &str, message: impl Into<String>) -> Self {
        PricingError::InvalidRequest {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Compute the itemized breakdown for a quotation.
///
/// Pure and deterministic: the same request and table always produce the
/// same breakdown. Fails with `InvalidRequest` before computing anything
/// when the request is incomplete for its plan or currency mode.
pub fn compute_breakdown(
    request: &QuotationRequest,
    table: &PriceTable,
) -> Result<Breakdown, PricingError> {
    validate_amounts(request)?;
    let exchange_rate = resolve_exchange_rate(request)?;
    let plan_base = resolve_plan_base(request, table)?;

    let top_tier = request.plan_mode == PlanMode::Predefined
        && request.selected_plan_key.as_deref() == Some(table.top_tier_plan.as_str());

    let collaborator_cost = calculators::collaborator_cost(
        request.collaborator_count,
        top_tier,
        request.payroll_enabled,
        table.collaborator_unit_rate,
    );

    let invoice_cost = if request.invoicing_enabled {
        calculators::invoice_cost(request.issued_invoices_per_month, &table.invoice_tiers)
    } else {
        Decimal::ZERO
    };

    let transaction_cost =
        calculators::transaction_cost(request.transactions_per_month, table.transaction_unit_rate);
    let extra_features_cost = calculators::extra_features_cost(&request.extra_line_items)
        .ok_or_else(|| PricingError::invalid("extra_line_items", "extra item values are too large"))?;

    let subtotal = [plan_base, collaborator_cost, invoice_cost, transaction_cost, extra_features_cost]
        .into_iter()
        .try_fold(Decimal::ZERO, |sum, v| sum.checked_add(v))
        .ok_or_else(|| {
            let field = match request.plan_mode {
                PlanMode::Custom => "base_price",
                _ => "extra_line_items",
            };
            PricingError::invalid(field, "quotation total is too large")
        })?;
    let discount_amount = calculators::discount_amount(subtotal, request.discount.as_ref());

    let local = Breakdown {
        plan_base,
        collaborator_cost,
        invoice_cost,
        transaction_cost,
        extra_features_cost,
        discount_amount,
        total_cost: subtotal - discount_amount,
        currency: Currency::Local,
    };

    debug!(
        plan_mode = ?request.plan_mode,
        subtotal = %subtotal,
        total = %local.total_cost,
        "Computed local breakdown"
    );

    match exchange_rate {
        Some(rate) => local.converted(rate, Currency::Foreign).ok_or_else(|| {
            PricingError::invalid("exchange_rate", "exchange rate is too small to convert amounts")
        }),
        None => Ok(local),
    }
}

fn resolve_plan_base(request: &QuotationRequest, table: &PriceTable) -> Result<Decimal, PricingError> {
    match request.plan_mode {
        PlanMode::Predefined => {
            let key = request
                .selected_plan_key
                .as_deref()
                .filter(|k| !k.is_empty())
                .ok_or_else(|| {
                    PricingError::invalid("selected_plan_key", "a predefined plan must be selected")
                })?;
            let plan = table.plan(key).ok_or_else(|| {
                PricingError::invalid("selected_plan_key", format!("unknown plan '{}'", key))
            })?;
            Ok(plan.price.for_person(request.person_type))
        }
        PlanMode::Custom => request.base_price.ok_or_else(|| {
            PricingError::invalid("base_price", "a custom plan requires a base price")
        }),
        PlanMode::AdditionalServices => Ok(Decimal::ZERO),
    }
}

/// `Some(rate)` when the breakdown must be converted
fn resolve_exchange_rate(request: &QuotationRequest) -> Result<Option<Decimal>, PricingError> {
    match request.currency {
        Currency::Local => Ok(None),
        Currency::Foreign => match request.exchange_rate {
            Some(rate) if rate > Decimal::ZERO => Ok(Some(rate)),
            Some(_) => Err(PricingError::invalid(
                "exchange_rate",
                "exchange rate must be positive",
            )),
            None => Err(PricingError::invalid(
                "exchange_rate",
                "foreign currency requires an exchange rate",
            )),
        },
    }
}

fn validate_amounts(request: &QuotationRequest) -> Result<(), PricingError> {
    if request.plan_mode == PlanMode::Custom {
        if let Some(base) = request.base_price {
            if base.is_sign_negative() {
                return Err(PricingError::invalid("base_price", "base price must not be negative"));
            }
        }
    }

    if let Some(index) = request
        .extra_line_items
        .iter()
        .position(|item| item.value.is_sign_negative())
    {
        return Err(PricingError::invalid(
            &format!("extra_line_items[{}].value", index),
            "extra item value must not be negative",
        ));
    }

    if let Some(discount) = &request.discount {
        if discount.amount.is_sign_negative() {
            return Err(PricingError::invalid("discount.amount", "discount must not be negative"));
        }
    }

    Ok(())
}
