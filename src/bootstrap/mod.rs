//! Bootstrap layer: configuration loading, tracing setup and dependency
//! wiring for the host application.

pub mod config;
pub mod tracing;
pub mod wiring;

pub use config::{load_config, resolve_data_dir, resolve_setup_options};
pub use self::tracing::init_tracing_subscriber;
pub use wiring::{wire_setup, SetupRuntime, WiringError, WiringResult};
