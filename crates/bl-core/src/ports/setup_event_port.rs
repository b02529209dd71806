use crate::setup::SetupSnapshot;

/// Pushes setup changes to the presentation layer.
#[async_trait::async_trait]
pub trait SetupEventPort: Send + Sync {
    async fn emit_setup_state_changed(&self, snapshot: SetupSnapshot);
}
