// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust types shared by every other layer.
//
// Rules for this layer:
//   - NO Burn framework types allowed here
//   - NO file I/O or network calls
//   - Only plain structs, enums, and free functions
//
// Reference: Rust Book §5 (Structs), §9 (Error Handling)

// One dataset entry (text, category, meaning) and the
// sorted Category Set derived from a batch of them
pub mod record;

// The four-variant error taxonomy used by all core operations
pub mod error;
