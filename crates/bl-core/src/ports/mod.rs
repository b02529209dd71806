//! Port interfaces for the application layer
//!
//! Ports define the contract between the setup use cases and the
//! collaborators behind them (account API, bus connection manager,
//! credential storage, key/value storage). Infrastructure or the host
//! application provides the implementations.

mod account_api;
mod clock;
mod connection;
mod credential_store;
mod key_value;
mod setup_event_port;

pub use account_api::AccountApiPort;
pub use clock::ClockPort;
pub use connection::ConnectionManagerPort;
pub use credential_store::CredentialStorePort;
pub use key_value::KeyValueStorePort;
pub use setup_event_port::SetupEventPort;
