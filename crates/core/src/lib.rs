//! Domain core for the sceneflow content-production assistant.
//!
//! Pure logic with zero internal dependencies: entity types, the
//! natural-language prompt builder, the per-account quota ledger, and
//! the account selection policy. Everything here is deterministic
//! given its inputs (the selector takes an injectable random source),
//! which is what makes the orchestration layer in
//! `sceneflow-pipeline` testable.

pub mod character;
pub mod error;
pub mod history;
pub mod ledger;
pub mod project;
pub mod prompt;
pub mod scene;
pub mod selector;
pub mod session;

pub use error::CoreError;

/// Index of one logical account slot, `0..active_slots`.
pub type SlotIndex = usize;
