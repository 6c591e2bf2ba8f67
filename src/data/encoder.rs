// ============================================================
// Layer 4 — Feature Encoder (shared by training and serving)
// ============================================================
// The single routine that turns a CustomerRecord into the
// exact feature vector the classifier was trained on.
//
// Column layout:
//   gender, SeniorCitizen, Partner, Dependents, tenure,
//   PhoneService, PaperlessBilling, MonthlyCharges, TotalCharges,
//   then one dummy column per non-reference category:
//     MultipleLines_No phone service, MultipleLines_Yes,
//     InternetService_Fiber optic, InternetService_No, ...
//
// For each categorical column the categories are the sorted
// distinct training values; the first one is the reference
// category and gets no column (drop-first one-hot).
//
// Encoding a record is name-based alignment against the fitted
// column list:
//   - a column the record does not produce stays 0
//   - a dummy the schema does not know (unseen category, or the
//     reference category) is dropped silently
//   - the output order is always the fitted order
//
// The fitted column list travels inside the model artifact, so
// serving never re-derives it from a single request.

use anyhow::{bail, Result};
use std::collections::{BTreeSet, HashMap};

use crate::domain::customer::{CustomerRecord, CATEGORICAL_COLUMNS, NUMERIC_COLUMNS};

/// Name of the indicator column for `value` in categorical `column`.
pub fn dummy_column(column: &str, value: &str) -> String {
    format!("{column}_{value}")
}

/// The ordered feature columns a model was trained on.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureSchema {
    columns: Vec<String>,
    index:   HashMap<String, usize>,
}

impl FeatureSchema {
    /// Derive the column list from training records.
    pub fn fit(records: &[CustomerRecord]) -> Self {
        let mut columns: Vec<String> = NUMERIC_COLUMNS.iter().map(|c| c.to_string()).collect();

        for (pos, column) in CATEGORICAL_COLUMNS.iter().enumerate() {
            let categories: BTreeSet<&str> = records
                .iter()
                .map(|r| r.categorical_features()[pos].1)
                .collect();

            // skip(1) drops the reference category
            columns.extend(categories.into_iter().skip(1).map(|v| dummy_column(column, v)));
        }

        tracing::debug!("Fitted feature schema with {} columns", columns.len());
        Self::index_columns(columns)
    }

    /// Rebuild a schema from a saved column list.
    pub fn from_columns(columns: Vec<String>) -> Result<Self> {
        if columns.is_empty() {
            bail!("Feature column list is empty");
        }
        let unique: BTreeSet<&String> = columns.iter().collect();
        if unique.len() != columns.len() {
            bail!("Feature column list contains duplicate names");
        }
        Ok(Self::index_columns(columns))
    }

    fn index_columns(columns: Vec<String>) -> Self {
        let index = columns
            .iter()
            .enumerate()
            .map(|(i, c)| (c.clone(), i))
            .collect();
        Self { columns, index }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Encode one record into a vector aligned to this schema.
    pub fn encode(&self, record: &CustomerRecord) -> Vec<f32> {
        let mut row = vec![0.0f32; self.columns.len()];

        for (name, value) in record.numeric_features() {
            if let Some(&i) = self.index.get(name) {
                row[i] = value as f32;
            }
        }

        for (column, value) in record.categorical_features() {
            if let Some(&i) = self.index.get(&dummy_column(column, value)) {
                row[i] = 1.0;
            }
        }

        row
    }

    /// Encode many records into one row-major matrix of shape [n, len()].
    pub fn encode_all<'a>(&self, records: impl IntoIterator<Item = &'a CustomerRecord>) -> Vec<f32> {
        records.into_iter().flat_map(|r| self.encode(r)).collect()
    }
}
