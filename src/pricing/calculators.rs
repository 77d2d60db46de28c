//! Core pricing calculation functions.
//!
//! Pure functions for pricing math - one per breakdown component. All
//! amounts are in the local currency; conversion happens after assembly.

use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::models::{
    Discount, DiscountKind, ExtraLineItem, InvoiceTiers, INCLUDED_COLLABORATORS,
    INCLUDED_TRANSACTIONS, VAT_RATE,
};

/// Round to specified decimal places using banker's rounding (ROUND_HALF_EVEN).
///
/// Banker's rounding rounds to the nearest even number when the value is exactly
/// halfway between two possibilities. This reduces cumulative rounding bias.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use jrc_quotes::pricing::round_money;
///
/// assert_eq!(round_money(dec!(2.5), 0), dec!(2));   // rounds to even
/// assert_eq!(round_money(dec!(3.5), 0), dec!(4));   // rounds to even
/// assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
/// ```
pub fn round_money(amount: Decimal, places: u32) -> Decimal {
    amount.round_dp_with_strategy(places, RoundingStrategy::MidpointNearestEven)
}

/// Apply VAT to a pre-tax amount
pub fn with_vat(amount: Decimal) -> Decimal {
    amount * (Decimal::ONE + VAT_RATE)
}

/// Payroll cost for the month, VAT included.
///
/// The top-tier plan bundles the first five collaborators and always bills
/// the rest. Other plans bill every collaborator, but only with payroll
/// management enabled.
pub fn collaborator_cost(
    collaborator_count: u32,
    top_tier_plan: bool,
    payroll_enabled: bool,
    unit_rate: Decimal,
) -> Decimal {
    let billable = if top_tier_plan {
        collaborator_count.saturating_sub(INCLUDED_COLLABORATORS)
    } else if payroll_enabled {
        collaborator_count
    } else {
        0
    };

    with_vat(Decimal::from(billable) * unit_rate)
}

/// Electronic invoicing cost for `issued` invoices, VAT included.
///
/// Step function over the tier table: the first tier whose `up_to` covers
/// the count sets the fee. Past the last breakpoint the last fee applies
/// plus a linear overage per invoice.
pub fn invoice_cost(issued: u32, tiers: &InvoiceTiers) -> Decimal {
    let pre_tax = match tiers.tiers.iter().find(|t| issued <= t.up_to) {
        Some(tier) => tier.fee,
        None => match tiers.tiers.last() {
            Some(last) => {
                last.fee + Decimal::from(issued - last.up_to) * tiers.overage_unit_rate
            }
            None => Decimal::from(issued) * tiers.overage_unit_rate,
        },
    };

    with_vat(pre_tax)
}

/// Transaction cost beyond the monthly allowance, VAT included
pub fn transaction_cost(transactions: u32, unit_rate: Decimal) -> Decimal {
    let billable = transactions.saturating_sub(INCLUDED_TRANSACTIONS);
    with_vat(Decimal::from(billable) * unit_rate)
}

/// Sum of extra line items. No VAT: values are entered tax-inclusive.
///
/// `None` when the sum does not fit in a `Decimal`.
pub fn extra_features_cost(items: &[ExtraLineItem]) -> Option<Decimal> {
    items
        .iter()
        .try_fold(Decimal::ZERO, |sum, item| sum.checked_add(item.value))
}

/// Discount against the local-currency subtotal.
///
/// The applied amount is capped at the subtotal so the total never goes
/// negative. Percentages above 100 are capped before multiplying.
pub fn discount_amount(subtotal: Decimal, discount: Option<&Discount>) -> Decimal {
    let Some(discount) = discount else {
        return Decimal::ZERO;
    };

    let requested = match discount.kind {
        DiscountKind::Percent if discount.amount > dec!(100) => {
            tracing::warn!(percent = %discount.amount, "Discount above 100%, capping at subtotal");
            return subtotal;
        }
        DiscountKind::Percent => subtotal * (discount.amount / dec!(100)),
        DiscountKind::Fixed => discount.amount,
    };

    if requested > subtotal {
        tracing::warn!(
            requested = %requested,
            subtotal = %subtotal,
            "Discount exceeds subtotal, capping at subtotal"
        );
        subtotal
    } else {
        requested
    }
}
