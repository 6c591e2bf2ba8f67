// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// This layer handles everything from the raw Telco CSV all the
// way to tensors ready for the optimiser.
//
// The pipeline flows in this order:
//
//   Telco CSV (file or downloaded text)
//       │
//       ▼
//   CsvLoader        → parses records into RawCustomerRow
//       │
//       ▼
//   Preprocessor     → drops unusable rows, label-encodes flags
//       │
//       ▼
//   split_train_test → seeded 80/20 shuffle split
//       │
//       ▼
//   FeatureSchema    → drop-first one-hot + column alignment
//       │
//       ▼
//   Standardizer     → zero mean / unit variance per column
//       │
//       ▼
//   ChurnBatcher     → one full-batch tensor pair
//
// FeatureSchema and Standardizer are also used by the serving
// path, so a request is encoded exactly like a training row.
//
// Reference: Rust Book §13 (Iterators and Closures)

/// Reads the Telco CSV via the csv crate
pub mod loader;

/// Cleans rows and label-encodes the binary columns
pub mod preprocessor;

/// Shared one-hot encoding and feature alignment
pub mod encoder;

/// Per-column standardisation fitted on the training split
pub mod scaler;

/// Encoded feature matrix + labels
pub mod dataset;

/// Turns a ChurnDataset into Burn tensors
pub mod batcher;

/// Seeded train/test split
pub mod splitter;

#[cfg(test)]
pub mod fixtures;
