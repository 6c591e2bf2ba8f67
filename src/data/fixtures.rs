// Test-only Telco-shaped data. Deterministic: the same `n`
// always yields the same CSV, byte for byte.

use std::fmt::Write;

use crate::data::loader::RawCustomerRow;
use crate::domain::customer::CustomerRecord;

pub const CSV_HEADER: &str = "customerID,gender,SeniorCitizen,Partner,Dependents,tenure,\
PhoneService,MultipleLines,InternetService,OnlineSecurity,OnlineBackup,DeviceProtection,\
TechSupport,StreamingTV,StreamingMovies,Contract,PaperlessBilling,PaymentMethod,\
MonthlyCharges,TotalCharges,Churn";

const PAYMENT_METHODS: [&str; 4] = [
    "Electronic check",
    "Mailed check",
    "Bank transfer (automatic)",
    "Credit card (automatic)",
];

/// `n` synthetic customers. Short-tenure month-to-month fibre customers
/// mostly churn; every 11th label is flipped so the classes overlap.
/// Row 24 of every 25 has a blank TotalCharges and is dropped on load.
pub fn synthetic_csv(n: usize) -> String {
    let mut out = String::from(CSV_HEADER);
    out.push('\n');

    for i in 0..n {
        let tenure   = 1 + (i * 7) % 72;
        let internet = match i % 3 { 0 => "Fiber optic", 1 => "DSL", _ => "No" };
        let contract = match i % 4 { 0 | 1 => "Month-to-month", 2 => "One year", _ => "Two year" };
        let phone    = if i % 5 == 4 { "No" } else { "Yes" };
        let lines    = match (phone, i % 2) { ("No", _) => "No phone service", (_, 0) => "Yes", _ => "No" };
        let addon = |k: usize| match (internet, (i + k) % 2) {
            ("No", _) => "No internet service",
            (_, 0)    => "Yes",
            _         => "No",
        };

        let monthly = 20.0 + ((i * 13) % 70) as f64 + if internet == "Fiber optic" { 25.0 } else { 0.0 };
        let total   = if i % 25 == 24 { " ".to_string() } else { format!("{:.2}", monthly * tenure as f64) };

        let score = 2 * i32::from(contract == "Month-to-month")
            + 2 * i32::from(tenure < 18)
            + i32::from(internet == "Fiber optic")
            - 2 * i32::from(tenure > 48);
        let churned = (score >= 3) ^ (i % 11 == 0);

        // writeln! into a String cannot fail
        let _ = writeln!(
            out,
            "{:04}-TEST,{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{:.2},{},{}",
            i,
            if i % 2 == 0 { "Female" } else { "Male" },
            i32::from(i % 6 == 0),
            if i % 3 == 1 { "Yes" } else { "No" },
            if i % 4 == 3 { "Yes" } else { "No" },
            tenure,
            phone,
            lines,
            internet,
            addon(0),
            addon(1),
            addon(2),
            addon(3),
            addon(4),
            addon(5),
            contract,
            if i % 3 == 2 { "No" } else { "Yes" },
            PAYMENT_METHODS[i % 4],
            monthly,
            total,
            if churned { "Yes" } else { "No" },
        );
    }
    out
}

/// A single valid raw row: a one-year male DSL customer who stayed.
pub fn raw_row() -> RawCustomerRow {
    RawCustomerRow {
        gender:            "Male".into(),
        senior_citizen:    "0".into(),
        partner:           "Yes".into(),
        dependents:        "No".into(),
        tenure:            "5".into(),
        phone_service:     "Yes".into(),
        multiple_lines:    "No".into(),
        internet_service:  "DSL".into(),
        online_security:   "No".into(),
        online_backup:     "Yes".into(),
        device_protection: "No".into(),
        tech_support:      "No".into(),
        streaming_tv:      "No".into(),
        streaming_movies:  "No".into(),
        contract:          "One year".into(),
        paperless_billing: "Yes".into(),
        payment_method:    "Mailed check".into(),
        monthly_charges:   "50.0".into(),
        total_charges:     "250.0".into(),
        churn:             "No".into(),
    }
}

/// The documented /predict example with every optional field defaulted.
pub fn default_record() -> CustomerRecord {
    serde_json::from_value(serde_json::json!({
        "gender": 1, "SeniorCitizen": 0, "Partner": 1, "Dependents": 0,
        "tenure": 12, "PhoneService": 1, "PaperlessBilling": 1,
        "MonthlyCharges": 70.5, "TotalCharges": 850.0
    }))
    .unwrap()
}
