use serde::{Deserialize, Serialize};

use crate::account::AccountInfo;
use crate::setup::SetupState;

/// Everything the presentation layer observes about the setup flow.
///
/// The state and the error notice change in the same update: when `state`
/// becomes `Error(message)`, `error_message` becomes `Some(message)`, and
/// leaving `Error` through start, reset or disconnect clears it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetupSnapshot {
    pub state: SetupState,
    pub account_info: Option<AccountInfo>,
    pub error_message: Option<String>,
}

impl SetupSnapshot {
    /// Whether a dismissible error notice should be shown.
    pub fn show_error(&self) -> bool {
        self.error_message.is_some()
    }
}
