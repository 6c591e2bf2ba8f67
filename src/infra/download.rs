// ============================================================
// Layer 6 — Dataset Download
// ============================================================
// Fetches the Telco CSV over HTTP(S). There is no retry: the
// training job is a one-shot and a failed fetch aborts it.

use anyhow::{Context, Result};

/// IBM's public copy of the Telco customer-churn dataset.
pub const DEFAULT_DATASET_URL: &str =
    "https://raw.githubusercontent.com/IBM/telco-customer-churn-on-icp4d/master/data/Telco-Customer-Churn.csv";

/// Download `url` and return the body as text.
pub async fn fetch_csv(url: &str) -> Result<String> {
    tracing::info!("Downloading dataset from {}", url);

    let response = reqwest::get(url)
        .await
        .with_context(|| format!("Cannot reach dataset URL '{url}'"))?
        .error_for_status()
        .with_context(|| format!("Dataset URL '{url}' returned an error status"))?;

    let text = response
        .text()
        .await
        .with_context(|| format!("Cannot read dataset body from '{url}'"))?;

    tracing::debug!("Downloaded {} bytes", text.len());
    Ok(text)
}
