// ============================================================
// Layer 6 — Model Store
// ============================================================
// Persists the trained model as ONE file, the only handoff
// between `train` and `serve`.
//
// What goes into the artifact (JSON envelope):
//   1. feature_columns — ordered training-time column names;
//                        this list alone defines the feature
//                        vector the weights expect
//   2. standardizer    — per-column mean/scale
//   3. weights         — Burn record bytes (named MessagePack,
//                        full precision)
//   4. trained_with    — the TrainConfig that produced it
//
// On the serving side, `locate_model` probes an ordered list of
// candidate paths and picks the first that exists. When none
// does, it logs the working directory plus listings of `.` and
// `api/` before failing, so a misconfigured container is easy
// to diagnose from its logs.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::application::train_use_case::TrainConfig;
use crate::data::scaler::Standardizer;
use crate::domain::traits::Persistable;

/// Candidate artifact locations, probed in order: container working
/// directory, local checkout / CI, alternative container path.
pub const DEFAULT_MODEL_PATHS: [&str; 3] = [
    "churn_model.json",
    "api/churn_model.json",
    "/app/churn_model.json",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub feature_columns: Vec<String>,
    pub standardizer:    Standardizer,
    pub weights:         Vec<u8>,
    pub trained_with:    TrainConfig,
}

impl Persistable for ModelArtifact {
    fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Cannot create directory '{}'", parent.display()))?;
        }

        let json = serde_json::to_string(self)?;
        fs::write(path, json)
            .with_context(|| format!("Cannot write model artifact to '{}'", path.display()))?;

        tracing::debug!("Saved model artifact to '{}'", path.display());
        Ok(())
    }

    fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Cannot read model artifact '{}'", path.display()))?;

        serde_json::from_str(&json).with_context(|| {
            format!(
                "'{}' is not a valid model artifact. Was it written by 'train'?",
                path.display()
            )
        })
    }
}

/// First candidate that exists on disk.
pub fn locate_model<P: AsRef<Path>>(candidates: &[P]) -> Result<PathBuf> {
    for candidate in candidates {
        let path = candidate.as_ref();
        if path.exists() {
            tracing::debug!("Found model artifact at '{}'", path.display());
            return Ok(path.to_path_buf());
        }
        tracing::debug!("No model artifact at '{}'", path.display());
    }

    log_search_diagnostics();
    bail!(
        "Model file not found in any expected location: {}",
        candidates
            .iter()
            .map(|c| c.as_ref().display().to_string())
            .collect::<Vec<_>>()
            .join(", ")
    )
}

fn log_search_diagnostics() {
    match std::env::current_dir() {
        Ok(cwd) => tracing::error!("Current directory: {}", cwd.display()),
        Err(e)  => tracing::error!("Current directory unavailable: {}", e),
    }
    tracing::error!("Files in current directory: {:?}", list_dir(Path::new(".")));
    let api = Path::new("api");
    if api.exists() {
        tracing::error!("Files in api/: {:?}", list_dir(api));
    }
}

fn list_dir(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .map(|entries| {
            entries
                .filter_map(|e| e.ok())
                .map(|e| e.file_name().to_string_lossy().into_owned())
                .collect()
        })
        .unwrap_or_default();
    names.sort();
    names
}
