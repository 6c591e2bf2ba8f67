// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// This layer orchestrates all the other layers to accomplish
// a specific goal (training a model or scoring a customer).
//
// Rules for this layer:
//   - No ML math or model code here
//   - No HTTP or printing here (that's Layer 1 and the api module)
//   - No direct file access (that's Layer 4 and 6)
//   - Only workflow coordination
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

// The training workflow
pub mod train_use_case;

// The scoring workflow shared by `serve` and `predict`
pub mod predict_use_case;
