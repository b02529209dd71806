//! File-based credential store
//!
//! Keeps the provisioned account record and the bus credentials as two JSON
//! files in one directory. Credentials are written owner-readable only on
//! unix targets.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bl_core::account::AccountInfo;
use bl_core::credentials::Credentials;
use bl_core::errors::StorageError;
use bl_core::ports::CredentialStorePort;
use serde::de::DeserializeOwned;
use tokio::fs;
use tracing::{debug, info};

use super::atomic::{read_optional, write_atomic};

pub const ACCOUNT_INFO_FILE: &str = "account_info.json";
pub const CREDENTIALS_FILE: &str = "credentials.json";

/// Owner read/write only.
const CREDENTIALS_MODE: u32 = 0o600;

pub struct FileCredentialStore {
    base_dir: PathBuf,
}

impl FileCredentialStore {
    pub fn new(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    fn account_info_path(&self) -> PathBuf {
        self.base_dir.join(ACCOUNT_INFO_FILE)
    }

    fn credentials_path(&self) -> PathBuf {
        self.base_dir.join(CREDENTIALS_FILE)
    }
}

async fn load_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, StorageError> {
    match read_optional(path).await? {
        Some(content) if !content.trim().is_empty() => Ok(Some(serde_json::from_str(&content)?)),
        _ => Ok(None),
    }
}

async fn remove_if_exists(path: &Path) -> Result<(), StorageError> {
    match fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err.into()),
    }
}

#[async_trait]
impl CredentialStorePort for FileCredentialStore {
    async fn save_account_info(&self, info: &AccountInfo) -> Result<(), StorageError> {
        let json = serde_json::to_vec_pretty(info)?;
        write_atomic(&self.account_info_path(), &json, None).await?;
        debug!(owner_space_id = %info.owner_space_id, "saved account info");
        Ok(())
    }

    async fn load_account_info(&self) -> Result<Option<AccountInfo>, StorageError> {
        load_json(&self.account_info_path()).await
    }

    async fn save_credentials(&self, credentials: &Credentials) -> Result<(), StorageError> {
        let path = self.credentials_path();
        let json = serde_json::to_vec_pretty(credentials)?;
        write_atomic(&path, &json, Some(CREDENTIALS_MODE)).await?;
        debug!(expires_at = ?credentials.expires_at, "saved credentials");
        Ok(())
    }

    async fn load_credentials(&self) -> Result<Option<Credentials>, StorageError> {
        load_json(&self.credentials_path()).await
    }

    async fn clear(&self) -> Result<(), StorageError> {
        remove_if_exists(&self.account_info_path()).await?;
        remove_if_exists(&self.credentials_path()).await?;
        info!(dir = %self.base_dir.display(), "cleared stored account and credentials");
        Ok(())
    }
}
