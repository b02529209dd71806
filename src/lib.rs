//! buslink: account setup sequencing for a message-bus client.
//!
//! The `bootstrap` module loads configuration, installs tracing and wires
//! the setup orchestrator to its adapters. Domain types and ports live in
//! `bl-core`, the flow in `bl-app`, the file/clock/event adapters in
//! `bl-infra`.

pub mod bootstrap;

pub use bl_app::{SetupFlowError, SetupOptions, SetupOrchestrator};
pub use bl_core::{
    AccountInfo, AccountStatus, AppConfig, AuthToken, Credentials, DeviceId, SetupSnapshot,
    SetupState, TokenKind,
};
pub use bootstrap::{init_tracing_subscriber, load_config, wire_setup, SetupRuntime, WiringError};
