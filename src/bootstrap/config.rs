//! # Configuration Loader / 配置加载器
//!
//! Reads the TOML configuration file into the `AppConfig` DTO, then resolves
//! the values the DTO deliberately leaves raw (data directory default,
//! token kind).

use std::path::PathBuf;

use anyhow::Context;
use bl_app::SetupOptions;
use bl_core::config::AppConfig;
use bl_core::credentials::TokenKind;

const APP_DIR_NAME: &str = "buslink";

/// Load configuration from a TOML file
/// 从 TOML 文件加载配置
///
/// # Errors / 错误
///
/// Returns error if the file cannot be read or is not valid TOML.
pub fn load_config(config_path: PathBuf) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;
    AppConfig::from_toml(&toml_value)
}

/// Data directory from config, or `<platform data dir>/buslink` when empty.
pub fn resolve_data_dir(config: &AppConfig) -> anyhow::Result<PathBuf> {
    if !config.data_dir.as_os_str().is_empty() {
        return Ok(config.data_dir.clone());
    }
    let base = dirs::data_local_dir().context("No platform data directory available")?;
    Ok(base.join(APP_DIR_NAME))
}

/// Setup tunables from config. An empty token kind means the default.
pub fn resolve_setup_options(config: &AppConfig) -> anyhow::Result<SetupOptions> {
    let token_kind = if config.token_kind.trim().is_empty() {
        TokenKind::default()
    } else {
        config
            .token_kind
            .parse::<TokenKind>()
            .map_err(|err| anyhow::anyhow!(err))
            .context("Invalid [setup] token_kind")?
    };

    Ok(SetupOptions {
        token_kind,
        require_cached_account: config.require_cached_account,
    })
}
