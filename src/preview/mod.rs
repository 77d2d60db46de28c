//! Quotation document preview.
//!
//! Turns a breakdown plus client and plan metadata into the bilingual HTML
//! document shown before a quotation is saved or exported. Layout lives in
//! `templates/quotations/preview.html`; everything the template prints is
//! prepared here as plain strings.

mod labels;

use askama::Template;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::Result;
use crate::models::{ClientInfo, Language};
use crate::pricing::{
    compute_breakdown, round_money, Breakdown, BreakdownRequest, Currency, PlanMode, PriceTable,
    QuotationRequest,
};

pub use labels::{labels, Labels};

/// Label/value row of the specifications table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecRow {
    pub label: &'static str,
    pub value: String,
}

/// Description/amount row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmountRow {
    pub label: String,
    pub amount: String,
}

/// Everything needed to lay out one quotation
pub struct PreviewInput<'a> {
    pub company_name: &'a str,
    pub client: &'a ClientInfo,
    pub request: &'a QuotationRequest,
    pub features: Vec<String>,
    pub breakdown: &'a Breakdown,
    pub language: Language,
    pub issued_on: NaiveDate,
}

#[derive(Template)]
#[template(path = "quotations/preview.html")]
pub struct QuotationPreview {
    pub labels: &'static Labels,
    pub lang: &'static str,
    pub company_name: String,
    pub title: String,
    pub date: String,
    pub client: ClientInfo,
    pub features: Vec<String>,
    pub specs: Vec<SpecRow>,
    pub extras: Vec<AmountRow>,
    pub lines: Vec<AmountRow>,
    pub total: String,
}

impl QuotationPreview {
    pub fn build(input: PreviewInput<'_>) -> Self {
        let labels = labels(input.language);
        let request = input.request;
        let breakdown = input.breakdown;
        let currency = breakdown.currency;

        let date = match input.language {
            Language::Spanish => input.issued_on.format("%d/%m/%Y").to_string(),
            Language::English => input.issued_on.format("%m/%d/%Y").to_string(),
        };

        Self {
            labels,
            lang: input.language.code(),
            company_name: input.company_name.to_string(),
            title: title(input.language, request, input.client),
            date,
            client: input.client.clone(),
            features: input.features,
            specs: spec_rows(labels, request),
            extras: extra_rows(request, currency),
            lines: breakdown_rows(labels, breakdown),
            total: format_amount(breakdown.total_cost, currency),
        }
    }
}

/// Price `request` and lay out its document.
///
/// The returned template is an axum response on its own.
pub fn document(
    table: &PriceTable,
    company_name: &str,
    client: &ClientInfo,
    request: &BreakdownRequest,
    language: Language,
    issued_on: NaiveDate,
) -> Result<QuotationPreview> {
    let quotation = request.to_quotation_request()?;
    let breakdown = compute_breakdown(&quotation, table)?;
    Ok(QuotationPreview::build(PreviewInput {
        company_name,
        client,
        request: &quotation,
        features: plan_features(&quotation, &request.features, table),
        breakdown: &breakdown,
        language,
        issued_on,
    }))
}

/// Features listed on the document.
///
/// Predefined plans list the plan's configured features; otherwise the
/// features picked on the form are shown. Duplicates are dropped.
pub fn plan_features(request: &QuotationRequest, picked: &[String], table: &PriceTable) -> Vec<String> {
    let source: &[String] = match (request.plan_mode, request.selected_plan_key.as_deref()) {
        (PlanMode::Predefined, Some(key)) => table
            .plan(key)
            .map(|p| p.features.as_slice())
            .unwrap_or(&[]),
        _ => picked,
    };

    let mut features: Vec<String> = Vec::with_capacity(source.len());
    for feature in source {
        if !features.contains(feature) {
            features.push(feature.clone());
        }
    }
    features
}

fn title(language: Language, request: &QuotationRequest, client: &ClientInfo) -> String {
    let labels = labels(language);
    let plan = match (request.plan_mode, request.selected_plan_key.as_deref()) {
        (PlanMode::Predefined, Some(key)) => match language {
            Language::Spanish => format!("Plan {}", key),
            Language::English => format!("{} Plan", key),
        },
        (PlanMode::AdditionalServices, _) => labels.additional_services.to_string(),
        _ => labels.custom_plan.to_string(),
    };
    format!("{} - {}", plan, client.full_name())
}

fn spec_rows(labels: &'static Labels, request: &QuotationRequest) -> Vec<SpecRow> {
    let mut rows = vec![
        SpecRow {
            label: labels.payroll_management,
            value: if request.payroll_enabled { labels.yes } else { labels.no }.to_string(),
        },
        SpecRow {
            label: labels.employees,
            value: request.collaborator_count.to_string(),
        },
    ];

    if request.invoicing_enabled {
        rows.push(SpecRow {
            label: labels.issued_invoices,
            value: request.issued_invoices_per_month.to_string(),
        });
        rows.push(SpecRow {
            label: labels.received_invoices,
            value: request.received_invoices_per_month.to_string(),
        });
    }

    rows.push(SpecRow {
        label: labels.transactions,
        value: request.transactions_per_month.to_string(),
    });
    rows
}

/// Extra items in the breakdown currency
fn extra_rows(request: &QuotationRequest, currency: Currency) -> Vec<AmountRow> {
    let rate = match (currency, request.exchange_rate) {
        (Currency::Foreign, Some(rate)) if rate > Decimal::ZERO => rate,
        _ => Decimal::ONE,
    };

    request
        .extra_line_items
        .iter()
        .map(|item| AmountRow {
            label: item.name.clone(),
            amount: format_amount(item.value / rate, currency),
        })
        .collect()
}

/// Plan and payroll lines always show; the rest only when non-zero
fn breakdown_rows(labels: &'static Labels, breakdown: &Breakdown) -> Vec<AmountRow> {
    let currency = breakdown.currency;
    let mut rows = vec![
        AmountRow {
            label: labels.plan_cost.to_string(),
            amount: format_amount(breakdown.plan_base, currency),
        },
        AmountRow {
            label: labels.payroll_cost.to_string(),
            amount: format_amount(breakdown.collaborator_cost, currency),
        },
    ];

    let optional = [
        (labels.invoice_cost, breakdown.invoice_cost),
        (labels.transaction_cost, breakdown.transaction_cost),
        (labels.extra_feature_cost, breakdown.extra_features_cost),
    ];
    for (label, amount) in optional {
        if amount > Decimal::ZERO {
            rows.push(AmountRow {
                label: label.to_string(),
                amount: format_amount(amount, currency),
            });
        }
    }

    if breakdown.discount_amount > Decimal::ZERO {
        rows.push(AmountRow {
            label: labels.discount.to_string(),
            amount: format!("-{}", format_amount(breakdown.discount_amount, currency)),
        });
    }

    rows
}

/// Currency symbol, thousands separators and two decimals: `₡1,234,567.89`
pub fn format_amount(amount: Decimal, currency: Currency) -> String {
    let rounded = round_money(amount, 2);
    let text = format!("{:.2}", rounded.abs());
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    format!("{}{}{}.{}", sign, currency.symbol(), grouped, cents)
}
