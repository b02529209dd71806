use async_trait::async_trait;

use crate::account::AccountInfo;
use crate::credentials::Credentials;
use crate::errors::StorageError;

/// Durable storage for account info and bus credentials.
#[async_trait]
pub trait CredentialStorePort: Send + Sync {
    async fn save_account_info(&self, info: &AccountInfo) -> Result<(), StorageError>;

    async fn load_account_info(&self) -> Result<Option<AccountInfo>, StorageError>;

    async fn save_credentials(&self, credentials: &Credentials) -> Result<(), StorageError>;

    async fn load_credentials(&self) -> Result<Option<Credentials>, StorageError>;

    /// Remove everything stored (sign-out or re-provisioning).
    async fn clear(&self) -> Result<(), StorageError>;
}
