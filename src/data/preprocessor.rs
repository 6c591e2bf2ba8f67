// ============================================================
// Layer 4 — Row Preprocessor
// ============================================================
// Turns raw CSV rows into typed, labelled customers.
//
// Cleaning steps (applied in order):
//   1. Drop rows with any blank cell
//   2. Coerce tenure, SeniorCitizen, MonthlyCharges and
//      TotalCharges to numbers; drop rows that fail
//      (TotalCharges is blank for customers with tenure 0)
//   3. Label-encode the six binary text columns
//        gender, Partner, Dependents, PhoneService,
//        PaperlessBilling, Churn
//      Classes are the sorted distinct values, each value
//      encodes as its index: Female=0/Male=1, No=0/Yes=1
//
// The categorical service columns pass through untouched —
// one-hot expansion belongs to the shared FeatureSchema.

use anyhow::{bail, Result};
use std::collections::BTreeSet;

use crate::data::loader::RawCustomerRow;
use crate::domain::customer::{CustomerRecord, LabeledCustomer};

// ─── LabelEncoder ─────────────────────────────────────────────────────────────
/// Maps text classes to their index in sorted order.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelEncoder {
    classes: Vec<String>,
}

impl LabelEncoder {
    /// Learn the sorted set of distinct values.
    pub fn fit<'a>(values: impl IntoIterator<Item = &'a str>) -> Self {
        let classes: BTreeSet<&str> = values.into_iter().collect();
        Self { classes: classes.into_iter().map(str::to_string).collect() }
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Index of `value` among the fitted classes, None if unseen.
    pub fn transform(&self, value: &str) -> Option<i64> {
        self.classes
            .binary_search_by(|c| c.as_str().cmp(value))
            .ok()
            .map(|i| i as i64)
    }
}

// ─── Preprocessor ─────────────────────────────────────────────────────────────
/// A row whose numeric cells have parsed successfully.
struct ParsedRow {
    raw:             RawCustomerRow,
    senior_citizen:  i64,
    tenure:          i64,
    monthly_charges: f64,
    total_charges:   f64,
}

pub struct Preprocessor;

impl Preprocessor {
    pub fn new() -> Self {
        Self
    }

    /// Clean, coerce and label-encode raw rows.
    pub fn prepare(&self, rows: Vec<RawCustomerRow>) -> Result<Vec<LabeledCustomer>> {
        let total = rows.len();
        let parsed: Vec<ParsedRow> = rows.into_iter().filter_map(parse_row).collect();

        let dropped = total - parsed.len();
        if dropped > 0 {
            tracing::warn!("Dropped {} of {} rows with missing or unparseable values", dropped, total);
        }

        let gender     = fit_binary("gender",           parsed.iter().map(|p| p.raw.gender.as_str()))?;
        let partner    = fit_binary("Partner",          parsed.iter().map(|p| p.raw.partner.as_str()))?;
        let dependents = fit_binary("Dependents",       parsed.iter().map(|p| p.raw.dependents.as_str()))?;
        let phone      = fit_binary("PhoneService",     parsed.iter().map(|p| p.raw.phone_service.as_str()))?;
        let paperless  = fit_binary("PaperlessBilling", parsed.iter().map(|p| p.raw.paperless_billing.as_str()))?;
        let churn      = fit_binary("Churn",            parsed.iter().map(|p| p.raw.churn.as_str()))?;

        tracing::debug!(
            "Label classes: gender={:?} churn={:?}",
            gender.classes(),
            churn.classes()
        );

        // Every value was seen while fitting, so transform cannot miss here.
        let encode = |enc: &LabelEncoder, v: &str| enc.transform(v).unwrap_or_default();

        Ok(parsed
            .into_iter()
            .map(|p| {
                let r = p.raw;
                LabeledCustomer {
                    record: CustomerRecord {
                        gender:            encode(&gender, &r.gender),
                        senior_citizen:    p.senior_citizen,
                        partner:           encode(&partner, &r.partner),
                        dependents:        encode(&dependents, &r.dependents),
                        tenure:            p.tenure,
                        phone_service:     encode(&phone, &r.phone_service),
                        paperless_billing: encode(&paperless, &r.paperless_billing),
                        monthly_charges:   p.monthly_charges,
                        total_charges:     p.total_charges,
                        multiple_lines:    r.multiple_lines,
                        internet_service:  r.internet_service,
                        online_security:   r.online_security,
                        online_backup:     r.online_backup,
                        device_protection: r.device_protection,
                        tech_support:      r.tech_support,
                        streaming_tv:      r.streaming_tv,
                        streaming_movies:  r.streaming_movies,
                        contract:          r.contract,
                        payment_method:    r.payment_method,
                    },
                    churn: encode(&churn, &r.churn) as u8,
                }
            })
            .collect())
    }
}

impl Default for Preprocessor {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse the numeric cells, returning None for rows that must be dropped.
fn parse_row(raw: RawCustomerRow) -> Option<ParsedRow> {
    let text_cells = [
        &raw.gender, &raw.partner, &raw.dependents, &raw.phone_service,
        &raw.multiple_lines, &raw.internet_service, &raw.online_security,
        &raw.online_backup, &raw.device_protection, &raw.tech_support,
        &raw.streaming_tv, &raw.streaming_movies, &raw.contract,
        &raw.paperless_billing, &raw.payment_method, &raw.churn,
    ];
    if text_cells.iter().any(|c| c.trim().is_empty()) {
        return None;
    }

    let senior_citizen  = raw.senior_citizen.trim().parse().ok()?;
    let tenure          = raw.tenure.trim().parse().ok()?;
    let monthly_charges = parse_finite(&raw.monthly_charges)?;
    let total_charges   = parse_finite(&raw.total_charges)?;

    Some(ParsedRow { raw, senior_citizen, tenure, monthly_charges, total_charges })
}

fn parse_finite(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Fit a LabelEncoder and insist the column really is binary.
fn fit_binary<'a>(column: &str, values: impl IntoIterator<Item = &'a str>) -> Result<LabelEncoder> {
    let enc = LabelEncoder::fit(values);
    if enc.classes().len() > 2 {
        bail!(
            "Column '{}' should be binary but has {} classes: {:?}",
            column,
            enc.classes().len(),
            enc.classes()
        );
    }
    Ok(enc)
}
