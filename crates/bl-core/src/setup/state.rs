use serde::{Deserialize, Serialize};

use crate::account::AccountStatus;

/// Setup flow state shown to the presentation layer.
///
/// 设置流程状态。同一时刻只有一个变体处于激活状态。
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum SetupState {
    /// Nothing started yet (or reset / disconnected).
    ///
    /// 尚未开始。
    #[default]
    Initial,
    /// Querying whether an account already exists.
    ///
    /// 正在检查账户状态。
    CheckingStatus,
    /// Creating a new account.
    ///
    /// 正在创建账户。
    CreatingAccount,
    /// Generating or refreshing bus credentials.
    ///
    /// 正在生成凭据。
    GeneratingToken,
    /// Establishing the live bus connection.
    ///
    /// 正在连接。
    Connecting,
    /// Setup finished and the connection is live.
    ///
    /// 已连接。
    Connected(AccountStatus),
    /// Setup halted; carries a human-readable message.
    ///
    /// 设置失败。
    Error(String),
}

impl SetupState {
    /// True while a step of the flow is running.
    pub fn is_in_progress(&self) -> bool {
        matches!(
            self,
            SetupState::CheckingStatus
                | SetupState::CreatingAccount
                | SetupState::GeneratingToken
                | SetupState::Connecting
        )
    }

    /// Terminal for display: the flow stopped and waits for a user action.
    pub fn is_terminal(&self) -> bool {
        matches!(self, SetupState::Connected(_) | SetupState::Error(_))
    }

    /// Stable snake-case name, used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            SetupState::Initial => "initial",
            SetupState::CheckingStatus => "checking_status",
            SetupState::CreatingAccount => "creating_account",
            SetupState::GeneratingToken => "generating_token",
            SetupState::Connecting => "connecting",
            SetupState::Connected(_) => "connected",
            SetupState::Error(_) => "error",
        }
    }

    /// Position in the forward order of the flow. `Error` has no rank.
    pub(crate) fn rank(&self) -> Option<u8> {
        match self {
            SetupState::Initial => Some(0),
            SetupState::CheckingStatus => Some(1),
            SetupState::CreatingAccount => Some(2),
            SetupState::GeneratingToken => Some(3),
            SetupState::Connecting => Some(4),
            SetupState::Connected(_) => Some(5),
            SetupState::Error(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_compares_tag_then_payload() {
        assert_eq!(SetupState::Error("a".into()), SetupState::Error("a".into()));
        assert_ne!(SetupState::Error("a".into()), SetupState::Error("b".into()));
        assert_ne!(
            SetupState::Connected(AccountStatus::default()),
            SetupState::Error(String::new())
        );
        assert_ne!(SetupState::Connecting, SetupState::GeneratingToken);
    }

    #[test]
    fn serializes_with_tag_and_payload() {
        let state = SetupState::Connected(AccountStatus {
            owner_space_id: "os1".into(),
            message_space_id: "ms1".into(),
            is_connected: true,
        });

        let json = serde_json::to_value(&state).unwrap();

        assert_eq!(json["type"], "connected");
        assert_eq!(json["payload"]["ownerSpaceId"], "os1");
        assert_eq!(
            serde_json::to_value(SetupState::Connecting).unwrap()["type"],
            "connecting"
        );
    }

    #[test]
    fn in_progress_and_terminal_are_disjoint() {
        let states = [
            SetupState::Initial,
            SetupState::CheckingStatus,
            SetupState::CreatingAccount,
            SetupState::GeneratingToken,
            SetupState::Connecting,
            SetupState::Connected(AccountStatus::default()),
            SetupState::Error("boom".into()),
        ];

        for state in states {
            assert!(!(state.is_in_progress() && state.is_terminal()), "{state:?}");
        }
    }
}
