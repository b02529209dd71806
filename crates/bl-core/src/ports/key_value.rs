use async_trait::async_trait;

use crate::errors::StorageError;

/// Process-wide durable string key/value storage.
///
/// 进程级持久化键值存储。
#[async_trait]
pub trait KeyValueStorePort: Send + Sync {
    async fn get_string(&self, key: &str) -> Result<Option<String>, StorageError>;

    async fn set_string(&self, key: &str, value: &str) -> Result<(), StorageError>;
}
