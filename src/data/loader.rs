// ============================================================
// Layer 4 — Dataset Loader
// ============================================================
// Reads the Telco customer-churn CSV, either from a local file
// or from text already downloaded by the infra layer.
//
// The CSV is parsed with the `csv` crate straight into
// RawCustomerRow via serde, keeping every cell as a string.
// Type coercion (TotalCharges contains blanks for brand-new
// customers) is the Preprocessor's job, not the loader's.
//
// A malformed record (wrong number of cells, bad UTF-8) is
// fatal: the training job has no partial-data mode.
//
// Reference: csv crate documentation (serde deserialisation)
//            Rust Book §9 (Error Handling)

use anyhow::{Context, Result};
use serde::Deserialize;
use std::{fs, path::Path};

use crate::data::preprocessor::Preprocessor;
use crate::domain::customer::LabeledCustomer;
use crate::domain::traits::DatasetSource;

/// One CSV row exactly as it appears in the file.
/// Extra columns such as `customerID` are ignored by serde.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawCustomerRow {
    #[serde(rename = "gender")]
    pub gender:            String,
    pub senior_citizen:    String,
    pub partner:           String,
    pub dependents:        String,
    #[serde(rename = "tenure")]
    pub tenure:            String,
    pub phone_service:     String,
    pub multiple_lines:    String,
    pub internet_service:  String,
    pub online_security:   String,
    pub online_backup:     String,
    pub device_protection: String,
    pub tech_support:      String,
    #[serde(rename = "StreamingTV")]
    pub streaming_tv:      String,
    pub streaming_movies:  String,
    pub contract:          String,
    pub paperless_billing: String,
    pub payment_method:    String,
    pub monthly_charges:   String,
    pub total_charges:     String,
    pub churn:             String,
}

/// Loads the churn dataset from CSV text.
/// Implements the DatasetSource trait from Layer 3.
pub struct CsvLoader {
    /// Where the text came from (file path or URL), for log and error messages
    origin: String,
    text:   String,
}

impl CsvLoader {
    /// Wrap CSV text that has already been read or downloaded.
    pub fn from_text(origin: impl Into<String>, text: impl Into<String>) -> Self {
        Self { origin: origin.into(), text: text.into() }
    }

    /// Read a CSV file from disk.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("Cannot read dataset '{}'", path.display()))?;
        Ok(Self::from_text(path.display().to_string(), text))
    }

    /// Parse every record into a RawCustomerRow without any cleaning.
    pub fn read_raw(&self) -> Result<Vec<RawCustomerRow>> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(self.text.as_bytes());

        let mut rows = Vec::new();
        for (i, record) in reader.deserialize::<RawCustomerRow>().enumerate() {
            // +2: one for the header line, one for 1-based line numbers
            let row = record.with_context(|| {
                format!("Malformed CSV record at line {} of '{}'", i + 2, self.origin)
            })?;
            rows.push(row);
        }

        tracing::debug!("Parsed {} raw rows from '{}'", rows.len(), self.origin);
        Ok(rows)
    }
}

impl DatasetSource for CsvLoader {
    fn load_all(&self) -> Result<Vec<LabeledCustomer>> {
        let raw = self.read_raw()?;
        let customers = Preprocessor::new().prepare(raw)?;
        tracing::info!(
            "Loaded {} usable customers from '{}'",
            customers.len(),
            self.origin
        );
        Ok(customers)
    }
}
