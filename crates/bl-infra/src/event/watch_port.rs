//! Watch-channel setup event port.
//!
//! Presentation layers subscribe and always see the latest snapshot; slow
//! readers skip intermediate states instead of queueing them.

use async_trait::async_trait;
use bl_core::ports::SetupEventPort;
use bl_core::setup::SetupSnapshot;
use tokio::sync::watch;
use tracing::trace;

pub struct WatchSetupEventPort {
    sender: watch::Sender<SetupSnapshot>,
}

impl WatchSetupEventPort {
    pub fn new() -> Self {
        let (sender, _receiver) = watch::channel(SetupSnapshot::default());
        Self { sender }
    }

    /// Receiver positioned at the current snapshot.
    pub fn subscribe(&self) -> watch::Receiver<SetupSnapshot> {
        self.sender.subscribe()
    }

    pub fn latest(&self) -> SetupSnapshot {
        self.sender.borrow().clone()
    }
}

impl Default for WatchSetupEventPort {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SetupEventPort for WatchSetupEventPort {
    async fn emit_setup_state_changed(&self, snapshot: SetupSnapshot) {
        trace!(state = snapshot.state.name(), "publishing setup snapshot");
        // send_replace never fails, even with no subscriber attached.
        self.sender.send_replace(snapshot);
    }
}
