// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// All Burn model, optimiser and record code lives here.
//
//   model.rs      — logistic regression as a one-output Linear
//                   layer, the log-loss objective, the frozen
//                   serving form and record (de)serialisation
//
//   trainer.rs    — full-batch Adam loop with an iteration cap
//                   and a loss-change tolerance, plus batch
//                   scoring for hold-out evaluation
//
//   inferencer.rs — rebuilds the model from an artifact and
//                   scores single customer records
//
// Reference: Burn Book §3 (Building Blocks)
//            Burn Book §5 (Training)

/// Logistic regression model and weight persistence
pub mod model;

/// Full-batch training loop
pub mod trainer;

/// Single-record scoring from a saved artifact
pub mod inferencer;
