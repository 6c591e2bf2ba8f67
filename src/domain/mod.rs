// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust structs and traits describing what the system
// talks about: customers, churn predictions and risk bands.
//
// Rules for this layer:
//   - NO Burn framework types allowed here
//   - NO file I/O or network calls
//   - Only plain Rust structs, enums, and traits
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// A customer record as sent to /predict, plus its labelled training form
pub mod customer;

// Prediction output and the Low/Medium/High risk band
pub mod prediction;

// Core abstractions (traits) that other layers implement
pub mod traits;
