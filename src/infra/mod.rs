// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Cross-cutting concerns that don't belong in any one layer:
//
//   model_store.rs — The model artifact file: JSON envelope
//                    holding feature columns, standardizer and
//                    Burn weight bytes; plus startup probing of
//                    candidate paths with diagnostic listings.
//
//   metrics.rs     — Hold-out evaluation (accuracy, precision,
//                    recall, log-loss) and a CSV run log.
//
//   download.rs    — Fetches the Telco CSV with reqwest.
//
// Reference: Rust Book §7 (Modules)
//            Rust Book §9 (Error Handling with anyhow)

/// Model artifact persistence and discovery
pub mod model_store;

/// Hold-out metrics and CSV logger
pub mod metrics;

/// Dataset download over HTTP
pub mod download;
