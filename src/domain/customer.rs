// ============================================================
// Layer 3 — Customer Domain Types
// ============================================================
// A CustomerRecord is the unit the model scores. It is both the
// JSON body accepted by POST /predict and the feature half of a
// training row, so the serde field names follow the Telco CSV
// headers exactly ("SeniorCitizen", "MonthlyCharges", ...).
//
// The nine numeric fields are required. The ten categorical
// fields fall back to a baseline category when omitted. Integer
// fields also accept whole-number floats such as 12.0.

use serde::{de::Error as _, Deserialize, Deserializer, Serialize};

/// Names of the one-hot encoded columns, in feature order.
pub const CATEGORICAL_COLUMNS: [&str; 10] = [
    "MultipleLines",
    "InternetService",
    "OnlineSecurity",
    "OnlineBackup",
    "DeviceProtection",
    "TechSupport",
    "StreamingTV",
    "StreamingMovies",
    "Contract",
    "PaymentMethod",
];

/// Names of the numeric columns, in feature order.
pub const NUMERIC_COLUMNS: [&str; 9] = [
    "gender",
    "SeniorCitizen",
    "Partner",
    "Dependents",
    "tenure",
    "PhoneService",
    "PaperlessBilling",
    "MonthlyCharges",
    "TotalCharges",
];

/// One customer, already label-encoded on the binary flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CustomerRecord {
    #[serde(rename = "gender", deserialize_with = "whole_number")]
    pub gender:            i64,
    #[serde(deserialize_with = "whole_number")]
    pub senior_citizen:    i64,
    #[serde(deserialize_with = "whole_number")]
    pub partner:           i64,
    #[serde(deserialize_with = "whole_number")]
    pub dependents:        i64,
    #[serde(rename = "tenure", deserialize_with = "whole_number")]
    pub tenure:            i64,
    #[serde(deserialize_with = "whole_number")]
    pub phone_service:     i64,
    #[serde(deserialize_with = "whole_number")]
    pub paperless_billing: i64,
    pub monthly_charges:   f64,
    pub total_charges:     f64,

    #[serde(default = "default_no")]
    pub multiple_lines:    String,
    #[serde(default = "default_internet_service")]
    pub internet_service:  String,
    #[serde(default = "default_no")]
    pub online_security:   String,
    #[serde(default = "default_no")]
    pub online_backup:     String,
    #[serde(default = "default_no")]
    pub device_protection: String,
    #[serde(default = "default_no")]
    pub tech_support:      String,
    #[serde(default = "default_no", rename = "StreamingTV")]
    pub streaming_tv:      String,
    #[serde(default = "default_no")]
    pub streaming_movies:  String,
    #[serde(default = "default_contract")]
    pub contract:          String,
    #[serde(default = "default_payment_method")]
    pub payment_method:    String,
}

/// Integer, or a float with no fractional part.
fn whole_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Number {
        Int(i64),
        Float(f64),
    }

    match Number::deserialize(deserializer)? {
        Number::Int(v) => Ok(v),
        Number::Float(v) if v.fract() == 0.0 && v.abs() <= i64::MAX as f64 => Ok(v as i64),
        Number::Float(v) => Err(D::Error::custom(format!("expected an integer, got {v}"))),
    }
}

fn default_no() -> String { "No".to_string() }
fn default_internet_service() -> String { "DSL".to_string() }
fn default_contract() -> String { "Month-to-month".to_string() }
fn default_payment_method() -> String { "Electronic check".to_string() }

impl CustomerRecord {
    /// Numeric features as (column name, value) pairs in NUMERIC_COLUMNS order.
    pub fn numeric_features(&self) -> [(&'static str, f64); 9] {
        [
            (NUMERIC_COLUMNS[0], self.gender as f64),
            (NUMERIC_COLUMNS[1], self.senior_citizen as f64),
            (NUMERIC_COLUMNS[2], self.partner as f64),
            (NUMERIC_COLUMNS[3], self.dependents as f64),
            (NUMERIC_COLUMNS[4], self.tenure as f64),
            (NUMERIC_COLUMNS[5], self.phone_service as f64),
            (NUMERIC_COLUMNS[6], self.paperless_billing as f64),
            (NUMERIC_COLUMNS[7], self.monthly_charges),
            (NUMERIC_COLUMNS[8], self.total_charges),
        ]
    }

    /// Categorical values as (column name, category) pairs in CATEGORICAL_COLUMNS order.
    pub fn categorical_features(&self) -> [(&'static str, &str); 10] {
        [
            (CATEGORICAL_COLUMNS[0], self.multiple_lines.as_str()),
            (CATEGORICAL_COLUMNS[1], self.internet_service.as_str()),
            (CATEGORICAL_COLUMNS[2], self.online_security.as_str()),
            (CATEGORICAL_COLUMNS[3], self.online_backup.as_str()),
            (CATEGORICAL_COLUMNS[4], self.device_protection.as_str()),
            (CATEGORICAL_COLUMNS[5], self.tech_support.as_str()),
            (CATEGORICAL_COLUMNS[6], self.streaming_tv.as_str()),
            (CATEGORICAL_COLUMNS[7], self.streaming_movies.as_str()),
            (CATEGORICAL_COLUMNS[8], self.contract.as_str()),
            (CATEGORICAL_COLUMNS[9], self.payment_method.as_str()),
        ]
    }
}

/// A training example: customer features plus the churn label (0 or 1).
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledCustomer {
    pub record: CustomerRecord,
    pub churn:  u8,
}
