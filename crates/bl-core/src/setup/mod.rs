//! Setup domain module.
//!
//! This module defines the account setup state machine types.

mod snapshot;
mod state;
pub mod state_machine;

pub use snapshot::SetupSnapshot;
pub use state::SetupState;
pub use state_machine::{SetupAction, SetupEvent, SetupStateMachine};
