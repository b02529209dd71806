use std::sync::Arc;

use bl_core::setup::{SetupSnapshot, SetupState};
use tokio::sync::{Mutex, MutexGuard};

/// Shared setup context containing the observable snapshot and dispatch lock.
///
/// ## Lock Ordering
/// When acquiring both locks, acquire `dispatch_lock` first, then `snapshot`.
/// - `dispatch_lock`: held for a whole operation so flows never interleave.
/// - `snapshot`: held only for the duration of a read or a single update.
#[derive(Clone)]
pub(crate) struct SetupContext {
    snapshot: Arc<Mutex<SetupSnapshot>>,
    dispatch_lock: Arc<Mutex<()>>,
}

impl SetupContext {
    pub fn new(initial: SetupSnapshot) -> Self {
        Self {
            snapshot: Arc::new(Mutex::new(initial)),
            dispatch_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// This is a lightweight read operation that does NOT acquire `dispatch_lock`.
    pub async fn get_state(&self) -> SetupState {
        self.snapshot.lock().await.state.clone()
    }

    pub async fn snapshot(&self) -> SetupSnapshot {
        self.snapshot.lock().await.clone()
    }

    /// Applies `f` to the snapshot and returns the result if anything changed.
    pub async fn update<F>(&self, f: F) -> Option<SetupSnapshot>
    where
        F: FnOnce(&mut SetupSnapshot),
    {
        let mut guard = self.snapshot.lock().await;
        let before = guard.clone();
        f(&mut *guard);
        (*guard != before).then(|| guard.clone())
    }

    pub async fn acquire_dispatch_lock(&self) -> MutexGuard<'_, ()> {
        self.dispatch_lock.lock().await
    }
}

impl Default for SetupContext {
    fn default() -> Self {
        Self::new(SetupSnapshot::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn update_reports_only_real_changes() {
        let context = SetupContext::default();

        let unchanged = context.update(|s| s.state = SetupState::Initial).await;
        let changed = context
            .update(|s| s.state = SetupState::CheckingStatus)
            .await;

        assert!(unchanged.is_none());
        assert_eq!(changed.unwrap().state, SetupState::CheckingStatus);
        assert_eq!(context.get_state().await, SetupState::CheckingStatus);
    }
}
