// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The application layer programs against these traits so the
// concrete CSV loader and artifact format can change without
// touching the training or serving workflows.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use anyhow::Result;
use std::path::Path;

use crate::domain::customer::LabeledCustomer;

// ─── DatasetSource ────────────────────────────────────────────────────────────
/// Any component that can produce labelled training customers.
///
/// Implementations:
///   - CsvLoader → parses the Telco CSV (file or downloaded text)
pub trait DatasetSource {
    /// Load every usable row. Rows that cannot be cleaned are skipped,
    /// a source that cannot be read at all is an error.
    fn load_all(&self) -> Result<Vec<LabeledCustomer>>;
}

// ─── Persistable ──────────────────────────────────────────────────────────────
/// Any component whose state can be saved to and restored from disk.
///
/// Implementations:
///   - ModelArtifact → the trained model handed from `train` to `serve`
pub trait Persistable: Sized {
    fn save(&self, path: &Path) -> Result<()>;

    fn load(path: &Path) -> Result<Self>;
}
