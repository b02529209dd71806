//! # bl-core
//!
//! Core domain models and business logic for buslink.
//!
//! This crate contains the setup state machine, the account/credential
//! models and the port traits implemented by the infrastructure layer.
//! It has no infrastructure dependencies.

pub mod account;
pub mod config;
pub mod credentials;
pub mod errors;
pub mod ids;
pub mod ports;
pub mod setup;

// Re-export commonly used types at the crate root
pub use account::{AccountInfo, AccountStatus, AccountStatusResponse, CreatedAccount};
pub use config::AppConfig;
pub use credentials::{Credentials, SecretString, TokenKind, TokenResponse};
pub use errors::{ApiError, ConnectionError, StorageError};
pub use ids::{AuthToken, DeviceId};
pub use setup::{SetupAction, SetupEvent, SetupSnapshot, SetupState, SetupStateMachine};
