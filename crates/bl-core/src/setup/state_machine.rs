//! Setup state machine.
//!
//! Defines a pure state transition function for the account setup flow.
//! The orchestrator in the application layer executes the returned actions
//! and feeds their outcome back as events.

use crate::account::AccountStatus;
use crate::setup::SetupState;

/// Events that drive the setup flow.
///
/// 驱动设置流程的事件。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetupEvent {
    /// User starts (or restarts) setup.
    Start,
    /// Status query found an existing account.
    AccountFound,
    /// Status query found no account.
    AccountMissing,
    /// Stored credentials are still usable.
    CredentialsFresh,
    /// Stored credentials must be refreshed before connecting.
    CredentialsStale,
    /// A new account was created and persisted.
    AccountCreated,
    /// Credentials were obtained and persisted.
    CredentialsReady,
    /// The live connection is established.
    ConnectSucceeded(AccountStatus),
    /// The running step failed.
    StepFailed { message: String },
    /// Clear everything back to `Initial`.
    Reset,
    /// Tear down the connection and go back to `Initial`.
    Disconnect,
}

/// Side-effects produced by state transitions.
///
/// 状态迁移产生的副作用。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetupAction {
    /// Ask the account API whether an account exists.
    QueryStatus,
    /// Ask the connection manager whether stored credentials need a refresh.
    CheckCredentialFreshness,
    /// Refresh credentials through the connection manager and persist them.
    RefreshCredentials,
    /// Create an account and persist its info.
    CreateAccount,
    /// Generate a token for this device and persist the derived credentials.
    GenerateToken,
    /// Establish the live connection.
    Connect,
    /// Tear down the live connection (outcome ignored).
    TearDownConnection,
}

/// Pure setup state machine.
///
/// 纯状态机：不包含副作用。
pub struct SetupStateMachine;

impl SetupStateMachine {
    pub fn transition(state: SetupState, event: SetupEvent) -> (SetupState, Vec<SetupAction>) {
        match (state, event) {
            (_, SetupEvent::Start) => (SetupState::CheckingStatus, vec![SetupAction::QueryStatus]),
            (_, SetupEvent::Reset) => (SetupState::Initial, Vec::new()),
            (_, SetupEvent::Disconnect) => {
                (SetupState::Initial, vec![SetupAction::TearDownConnection])
            }
            (SetupState::CheckingStatus, SetupEvent::AccountFound) => (
                SetupState::CheckingStatus,
                vec![SetupAction::CheckCredentialFreshness],
            ),
            (SetupState::CheckingStatus, SetupEvent::CredentialsStale) => (
                SetupState::GeneratingToken,
                vec![SetupAction::RefreshCredentials],
            ),
            (SetupState::CheckingStatus, SetupEvent::CredentialsFresh) => {
                (SetupState::Connecting, vec![SetupAction::Connect])
            }
            (SetupState::CheckingStatus, SetupEvent::AccountMissing) => {
                (SetupState::CreatingAccount, vec![SetupAction::CreateAccount])
            }
            (SetupState::CreatingAccount, SetupEvent::AccountCreated) => {
                (SetupState::GeneratingToken, vec![SetupAction::GenerateToken])
            }
            (SetupState::GeneratingToken, SetupEvent::CredentialsReady) => {
                (SetupState::Connecting, vec![SetupAction::Connect])
            }
            (SetupState::Connecting, SetupEvent::ConnectSucceeded(status)) => {
                (SetupState::Connected(status), Vec::new())
            }
            (state, SetupEvent::StepFailed { message }) if state.is_in_progress() => {
                (SetupState::Error(message), Vec::new())
            }
            (state, _event) => {
                #[cfg(feature = "tracing")]
                tracing::trace!(state = state.name(), event = ?_event, "setup event ignored");
                (state, Vec::new())
            }
        }
    }

    /// Whether moving from `from` to `to` respects the flow order: forward
    /// only, except that `Initial` and `Error` are reachable from anywhere and
    /// a restart may jump back to `CheckingStatus`.
    pub fn is_valid_transition(from: &SetupState, to: &SetupState) -> bool {
        match (from.rank(), to.rank()) {
            (_, None) | (_, Some(0)) | (_, Some(1)) => true,
            (None, Some(_)) => false,
            (Some(from), Some(to)) => to >= from,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{SetupAction, SetupEvent, SetupStateMachine};
    use crate::account::AccountStatus;
    use crate::setup::SetupState;

    fn all_states() -> Vec<SetupState> {
        vec![
            SetupState::Initial,
            SetupState::CheckingStatus,
            SetupState::CreatingAccount,
            SetupState::GeneratingToken,
            SetupState::Connecting,
            SetupState::Connected(AccountStatus::default()),
            SetupState::Error("boom".into()),
        ]
    }

    fn all_events() -> Vec<SetupEvent> {
        vec![
            SetupEvent::Start,
            SetupEvent::AccountFound,
            SetupEvent::AccountMissing,
            SetupEvent::CredentialsFresh,
            SetupEvent::CredentialsStale,
            SetupEvent::AccountCreated,
            SetupEvent::CredentialsReady,
            SetupEvent::ConnectSucceeded(AccountStatus::default()),
            SetupEvent::StepFailed {
                message: "failed".into(),
            },
            SetupEvent::Reset,
            SetupEvent::Disconnect,
        ]
    }

    #[test]
    fn setup_state_machine_start_from_any_state_checks_status() {
        for state in all_states() {
            let (next, actions) = SetupStateMachine::transition(state, SetupEvent::Start);
            assert_eq!(next, SetupState::CheckingStatus);
            assert_eq!(actions, vec![SetupAction::QueryStatus]);
        }
    }

    #[test]
    fn setup_state_machine_missing_account_goes_through_creation() {
        let (next, actions) =
            SetupStateMachine::transition(SetupState::CheckingStatus, SetupEvent::AccountMissing);
        assert_eq!(next, SetupState::CreatingAccount);
        assert_eq!(actions, vec![SetupAction::CreateAccount]);

        let (next, actions) = SetupStateMachine::transition(next, SetupEvent::AccountCreated);
        assert_eq!(next, SetupState::GeneratingToken);
        assert_eq!(actions, vec![SetupAction::GenerateToken]);
    }

    #[test]
    fn setup_state_machine_found_account_checks_freshness_then_skips_token_when_fresh() {
        let (next, actions) =
            SetupStateMachine::transition(SetupState::CheckingStatus, SetupEvent::AccountFound);
        assert_eq!(next, SetupState::CheckingStatus);
        assert_eq!(actions, vec![SetupAction::CheckCredentialFreshness]);

        let (next, actions) = SetupStateMachine::transition(next, SetupEvent::CredentialsFresh);
        assert_eq!(next, SetupState::Connecting);
        assert_eq!(actions, vec![SetupAction::Connect]);
    }

    #[test]
    fn setup_state_machine_stale_credentials_refresh() {
        let (next, actions) =
            SetupStateMachine::transition(SetupState::CheckingStatus, SetupEvent::CredentialsStale);
        assert_eq!(next, SetupState::GeneratingToken);
        assert_eq!(actions, vec![SetupAction::RefreshCredentials]);
    }

    #[test]
    fn setup_state_machine_connect_success_carries_status() {
        let status = AccountStatus {
            owner_space_id: "os1".into(),
            message_space_id: "ms1".into(),
            is_connected: true,
        };
        let (next, actions) = SetupStateMachine::transition(
            SetupState::Connecting,
            SetupEvent::ConnectSucceeded(status.clone()),
        );
        assert_eq!(next, SetupState::Connected(status));
        assert!(actions.is_empty());
    }

    #[test]
    fn setup_state_machine_failure_only_applies_to_running_steps() {
        let failed = SetupEvent::StepFailed {
            message: "network error: offline".into(),
        };
        for state in all_states() {
            let running = state.is_in_progress();
            let (next, actions) = SetupStateMachine::transition(state.clone(), failed.clone());
            assert!(actions.is_empty());
            if running {
                assert_eq!(next, SetupState::Error("network error: offline".into()));
            } else {
                assert_eq!(next, state);
            }
        }
    }

    #[test]
    fn setup_state_machine_disconnect_tears_down_and_resets() {
        let (next, actions) = SetupStateMachine::transition(
            SetupState::Connected(AccountStatus::default()),
            SetupEvent::Disconnect,
        );
        assert_eq!(next, SetupState::Initial);
        assert_eq!(actions, vec![SetupAction::TearDownConnection]);
    }

    #[test]
    fn setup_state_machine_out_of_order_events_are_ignored() {
        let (next, actions) =
            SetupStateMachine::transition(SetupState::Initial, SetupEvent::AccountCreated);
        assert_eq!(next, SetupState::Initial);
        assert!(actions.is_empty());

        let (next, _) = SetupStateMachine::transition(
            SetupState::CreatingAccount,
            SetupEvent::CredentialsFresh,
        );
        assert_eq!(next, SetupState::CreatingAccount);
    }

    #[test]
    fn setup_state_machine_every_transition_respects_flow_order() {
        for state in all_states() {
            for event in all_events() {
                let (next, _) = SetupStateMachine::transition(state.clone(), event.clone());
                assert!(
                    SetupStateMachine::is_valid_transition(&state, &next),
                    "{state:?} --{event:?}--> {next:?}"
                );
            }
        }
    }

    #[test]
    fn backwards_moves_are_invalid() {
        assert!(!SetupStateMachine::is_valid_transition(
            &SetupState::Connecting,
            &SetupState::CreatingAccount
        ));
        assert!(!SetupStateMachine::is_valid_transition(
            &SetupState::Error("x".into()),
            &SetupState::Connecting
        ));
        assert!(SetupStateMachine::is_valid_transition(
            &SetupState::Connected(AccountStatus::default()),
            &SetupState::Initial
        ));
    }
}
