//! # Dependency Injection / 依赖注入模块
//!
//! Assembles the setup runtime: file-backed storage under the data
//! directory, the system clock and the watch-based event port, plus the
//! host-supplied API client and connection manager.
//!
//! This module only constructs and binds. No flow logic lives here.

use std::path::PathBuf;
use std::sync::Arc;

use bl_app::{ResolveDeviceId, SetupOrchestrator};
use bl_core::config::AppConfig;
use bl_core::ports::{AccountApiPort, ConnectionManagerPort};
use bl_infra::{FileCredentialStore, FileKeyValueStore, SystemClock, WatchSetupEventPort};

use super::config::{resolve_data_dir, resolve_setup_options};

/// Subdirectory of the data directory holding account and credential files.
const CREDENTIALS_DIR: &str = "credentials";

/// Result type for wiring operations
pub type WiringResult<T> = Result<T, WiringError>;

/// Errors during dependency injection
/// 依赖注入错误
#[derive(Debug, thiserror::Error)]
pub enum WiringError {
    #[error("Configuration initialization failed: {0}")]
    ConfigInit(String),

    #[error("Data directory unavailable at {path}: {source}")]
    DataDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Everything the host needs after wiring.
pub struct SetupRuntime {
    pub orchestrator: Arc<SetupOrchestrator>,
    /// Subscribe here to observe setup snapshots.
    pub events: Arc<WatchSetupEventPort>,
    pub credential_store: Arc<FileCredentialStore>,
    pub data_dir: PathBuf,
}

/// Build the setup runtime from configuration and the two network-facing
/// adapters the host provides.
pub fn wire_setup(
    config: &AppConfig,
    account_api: Arc<dyn AccountApiPort>,
    connection: Arc<dyn ConnectionManagerPort>,
) -> WiringResult<SetupRuntime> {
    let data_dir =
        resolve_data_dir(config).map_err(|e| WiringError::ConfigInit(format!("{e:#}")))?;
    let options =
        resolve_setup_options(config).map_err(|e| WiringError::ConfigInit(format!("{e:#}")))?;

    std::fs::create_dir_all(&data_dir).map_err(|source| WiringError::DataDir {
        path: data_dir.clone(),
        source,
    })?;

    let key_value_store = Arc::new(FileKeyValueStore::with_defaults(data_dir.clone()));
    let credential_store = Arc::new(FileCredentialStore::new(data_dir.join(CREDENTIALS_DIR)));
    let events = Arc::new(WatchSetupEventPort::new());
    let resolve_device_id = Arc::new(ResolveDeviceId::new(key_value_store));

    let orchestrator = SetupOrchestrator::new(
        account_api,
        connection,
        credential_store.clone(),
        resolve_device_id,
        Arc::new(SystemClock),
        events.clone(),
    )
    .with_options(options.clone());

    tracing::info!(
        data_dir = %data_dir.display(),
        token_kind = options.token_kind.as_str(),
        require_cached_account = options.require_cached_account,
        "Setup runtime wired"
    );

    Ok(SetupRuntime {
        orchestrator: Arc::new(orchestrator),
        events,
        credential_store,
        data_dir,
    })
}
