// ============================================================
// Layer 2 - Application / Use Cases
// ============================================================
// Orchestrates the other layers for one goal at a time
// (training a network or re-scoring a saved one).
//
// Rules for this layer:
//   - No tensor math or model code here
//   - Only workflow coordination
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

// The training workflow
pub mod train_use_case;

// Scoring a saved checkpoint against a test split
pub mod evaluate_use_case;
