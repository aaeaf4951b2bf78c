//! Orchestration layer for sceneflow.
//!
//! Wires the pure core (prompt builder, ledger, selector) to the
//! outside world: the dispatch function that consumes one unit of
//! quota and opens the external generation surface, the collaborator
//! traits it calls through, and the pace-limited batch runner that
//! drains a project's scene queue one dispatch at a time.

pub mod author;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod runner;
pub mod surface;
pub mod telemetry;

pub use config::PipelineConfig;
pub use dispatch::{DispatchOutcome, Dispatcher, PromptSource};
pub use error::PipelineError;
pub use runner::{BatchItem, BatchRunner, RunnerState};
