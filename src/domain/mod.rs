// ============================================================
// Layer 3 - Domain Layer
// ============================================================
// Plain Rust structs, traits and shape arithmetic that describe
// what the classifier works on.
//
// Rules for this layer:
//   - NO Burn framework types allowed here
//   - NO file I/O
//   - Only plain Rust structs, enums, traits and pure functions
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// One (token ids, label vector) training example
pub mod sample;

// Sequence-length arithmetic for the conv + pool stack
pub mod shape;

// Core abstractions (traits) that other layers implement
pub mod traits;
