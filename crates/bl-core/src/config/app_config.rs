use std::path::PathBuf;

/// Application configuration DTO (pure data, no logic)
/// 应用配置 DTO（纯数据，无逻辑）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// Data directory (may be empty - the bootstrap layer picks a platform default)
    /// 数据目录（可能为空）
    pub data_dir: PathBuf,

    /// Token kind requested during setup, as written in the file ("app" / "device")
    pub token_kind: String,

    /// Fail the existing-account path when no account info is cached
    pub require_cached_account: bool,
}

impl AppConfig {
    /// Create AppConfig from TOML value
    /// 从 TOML 值创建 AppConfig
    ///
    /// Must not validate or compute defaults. Empty strings are valid "facts".
    pub fn from_toml(toml_value: &toml::Value) -> anyhow::Result<Self> {
        Ok(Self {
            data_dir: PathBuf::from(
                toml_value
                    .get("storage")
                    .and_then(|s| s.get("data_dir"))
                    .and_then(|v| v.as_str())
                    .unwrap_or(""),
            ),
            token_kind: toml_value
                .get("setup")
                .and_then(|s| s.get("token_kind"))
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string(),
            require_cached_account: toml_value
                .get("setup")
                .and_then(|s| s.get("require_cached_account"))
                .and_then(|v| v.as_bool())
                .unwrap_or(false),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_toml_maps_all_fields() {
        let value: toml::Value = toml::from_str(
            r#"
            [storage]
            data_dir = "/var/lib/buslink"

            [setup]
            token_kind = "device"
            require_cached_account = true
            "#,
        )
        .unwrap();

        let config = AppConfig::from_toml(&value).unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/var/lib/buslink"));
        assert_eq!(config.token_kind, "device");
        assert!(config.require_cached_account);
    }

    #[test]
    fn missing_sections_become_empty_facts() {
        let value: toml::Value = toml::from_str("").unwrap();

        let config = AppConfig::from_toml(&value).unwrap();

        assert_eq!(config, AppConfig::default());
    }
}
