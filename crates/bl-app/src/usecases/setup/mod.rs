//! Setup use cases.
//!
//! This module exposes the setup orchestrator.

mod context;
mod error;
pub mod orchestrator;

pub use error::{SetupFlowError, GENERIC_FAILURE_MESSAGE};
pub use orchestrator::{SetupOptions, SetupOrchestrator};
