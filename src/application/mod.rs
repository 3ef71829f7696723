// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Orchestrates the other layers; no ML math, no printing, no
// direct widget/CLI concerns.
//
// Reference: Clean Architecture pattern, Rust Book §7 (Modules)

// The training workflow and its configuration
pub mod train_use_case;

// The model readiness state machine shared between the
// foreground and the background training task
pub mod model_state;

// The user-facing operations: predict, add-and-retrain,
// list categories
pub mod app;
