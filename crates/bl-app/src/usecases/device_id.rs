//! Device identifier resolution.
//!
//! The identifier is generated lazily on first need, persisted through the
//! injected key/value storage, and never regenerated once stored.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info};

use bl_core::errors::StorageError;
use bl_core::ids::DeviceId;
use bl_core::ports::KeyValueStorePort;

/// Storage key holding the device identifier.
pub const DEVICE_ID_KEY: &str = "buslink.device.id";

/// Use case returning the stable per-installation device identifier.
pub struct ResolveDeviceId {
    store: Arc<dyn KeyValueStorePort>,
    resolved: Mutex<Option<DeviceId>>,
}

impl ResolveDeviceId {
    pub fn new(store: Arc<dyn KeyValueStorePort>) -> Self {
        Self {
            store,
            resolved: Mutex::new(None),
        }
    }

    /// Load the stored identifier, creating and persisting one if absent.
    ///
    /// A stored value that is not a UUID is reported as corruption instead of
    /// being replaced.
    pub async fn execute(&self) -> Result<DeviceId, StorageError> {
        // Held across the load/store so concurrent first calls agree on one id.
        let mut resolved = self.resolved.lock().await;
        if let Some(id) = resolved.as_ref() {
            return Ok(id.clone());
        }

        let id = match self.store.get_string(DEVICE_ID_KEY).await? {
            Some(stored) if !stored.trim().is_empty() => {
                let stored = stored.trim();
                uuid::Uuid::parse_str(stored).map_err(|err| {
                    StorageError::Corrupted(format!("invalid device id `{stored}`: {err}"))
                })?;
                debug!(device_id = %stored, "loaded device id");
                DeviceId::new(stored)
            }
            _ => {
                let id = DeviceId::generate();
                self.store.set_string(DEVICE_ID_KEY, id.as_str()).await?;
                info!(device_id = %id, "generated new device id");
                id
            }
        };

        *resolved = Some(id.clone());
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct MemoryStore {
        values: std::sync::Mutex<HashMap<String, String>>,
        writes: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl KeyValueStorePort for MemoryStore {
        async fn get_string(&self, key: &str) -> Result<Option<String>, StorageError> {
            Ok(self.values.lock().unwrap().get(key).cloned())
        }

        async fn set_string(&self, key: &str, value: &str) -> Result<(), StorageError> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            self.values
                .lock()
                .unwrap()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }
    }

    #[tokio::test]
    async fn generates_once_and_returns_same_id() {
        let store = Arc::new(MemoryStore::default());
        let use_case = ResolveDeviceId::new(store.clone());

        let first = use_case.execute().await.unwrap();
        let second = use_case.execute().await.unwrap();

        assert_eq!(first, second);
        assert_eq!(store.writes.load(Ordering::SeqCst), 1);
        assert_eq!(
            store.get_string(DEVICE_ID_KEY).await.unwrap().as_deref(),
            Some(first.as_str())
        );
    }

    #[tokio::test]
    async fn new_instance_reads_persisted_id() {
        let store = Arc::new(MemoryStore::default());
        let first = ResolveDeviceId::new(store.clone()).execute().await.unwrap();

        let second = ResolveDeviceId::new(store.clone()).execute().await.unwrap();

        assert_eq!(first, second);
        assert_eq!(store.writes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn corrupted_value_is_an_error_and_not_overwritten() {
        let store = Arc::new(MemoryStore::default());
        store.set_string(DEVICE_ID_KEY, "not-a-uuid").await.unwrap();
        let use_case = ResolveDeviceId::new(store.clone());

        let result = use_case.execute().await;

        assert!(matches!(result, Err(StorageError::Corrupted(_))));
        assert_eq!(
            store.get_string(DEVICE_ID_KEY).await.unwrap().as_deref(),
            Some("not-a-uuid")
        );
    }

    #[tokio::test]
    async fn concurrent_first_calls_agree() {
        let store = Arc::new(MemoryStore::default());
        let use_case = Arc::new(ResolveDeviceId::new(store.clone()));

        let (a, b) = tokio::join!(use_case.execute(), use_case.execute());

        assert_eq!(a.unwrap(), b.unwrap());
        assert_eq!(store.writes.load(Ordering::SeqCst), 1);
    }
}
