//! Setup orchestrator.
//!
//! This module coordinates the setup state machine and side effects: it
//! feeds events into [`SetupStateMachine`], publishes every state change,
//! executes the returned actions against the ports and turns their outcome
//! into follow-up events until the flow settles.

use std::collections::VecDeque;
use std::sync::Arc;

use tracing::{debug, error, info, info_span, warn, Instrument};

use bl_core::{
    account::{AccountInfo, AccountStatus},
    credentials::{Credentials, TokenKind},
    ids::AuthToken,
    ports::{
        AccountApiPort, ClockPort, ConnectionManagerPort, CredentialStorePort, SetupEventPort,
    },
    setup::{SetupAction, SetupEvent, SetupSnapshot, SetupState, SetupStateMachine},
};

use crate::usecases::device_id::ResolveDeviceId;
use crate::usecases::setup::context::SetupContext;
use crate::usecases::setup::SetupFlowError;

/// Tunables of the setup flow.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetupOptions {
    /// Token kind requested when provisioning a new account.
    pub token_kind: TokenKind,
    /// Fail the existing-account path when the status query returned no
    /// account details, instead of reporting empty space identifiers.
    pub require_cached_account: bool,
}

/// Orchestrator that drives setup state and side effects.
///
/// 驱动设置状态与副作用的编排器。
pub struct SetupOrchestrator {
    context: Arc<SetupContext>,
    options: SetupOptions,

    account_api: Arc<dyn AccountApiPort>,
    connection: Arc<dyn ConnectionManagerPort>,
    credential_store: Arc<dyn CredentialStorePort>,
    resolve_device_id: Arc<ResolveDeviceId>,
    clock: Arc<dyn ClockPort>,
    setup_event_port: Arc<dyn SetupEventPort>,
}

impl SetupOrchestrator {
    pub fn new(
        account_api: Arc<dyn AccountApiPort>,
        connection: Arc<dyn ConnectionManagerPort>,
        credential_store: Arc<dyn CredentialStorePort>,
        resolve_device_id: Arc<ResolveDeviceId>,
        clock: Arc<dyn ClockPort>,
        setup_event_port: Arc<dyn SetupEventPort>,
    ) -> Self {
        Self {
            context: SetupContext::default().arc(),
            options: SetupOptions::default(),
            account_api,
            connection,
            credential_store,
            resolve_device_id,
            clock,
            setup_event_port,
        }
    }

    pub fn with_options(mut self, options: SetupOptions) -> Self {
        self.options = options;
        self
    }

    /// Run the whole setup flow and return the state it settled in
    /// (`Connected` or `Error`).
    pub async fn start_setup(&self, auth_token: &AuthToken) -> SetupState {
        let events = vec![SetupEvent::Start];
        self.dispatch(events, Some(auth_token)).await
    }

    /// Reset to `Initial`, then run the flow again. No backoff, no limit.
    pub async fn retry(&self, auth_token: &AuthToken) -> SetupState {
        let events = vec![SetupEvent::Reset, SetupEvent::Start];
        self.dispatch(events, Some(auth_token)).await
    }

    /// Tear down the connection and go back to `Initial`, whatever the
    /// teardown outcome.
    pub async fn disconnect(&self) -> SetupState {
        self.dispatch(vec![SetupEvent::Disconnect], None).await
    }

    /// Back to `Initial` with no cached account and no error notice.
    /// No network or storage I/O.
    pub async fn reset(&self) -> SetupState {
        let _dispatch_guard = self.context.acquire_dispatch_lock().await;
        let events = vec![SetupEvent::Reset];
        self.run(events, None, true).await
    }

    /// Hide the error notice. The `Error` state itself stays until retry or reset.
    pub async fn dismiss_error(&self) {
        self.update_and_emit(|snapshot| {
            snapshot.error_message = None;
        })
        .await;
    }

    pub async fn get_state(&self) -> SetupState {
        self.context.get_state().await
    }

    pub async fn snapshot(&self) -> SetupSnapshot {
        self.context.snapshot().await
    }

    pub async fn account_info(&self) -> Option<AccountInfo> {
        self.context.snapshot().await.account_info
    }

    pub async fn error_notice(&self) -> Option<String> {
        self.context.snapshot().await.error_message
    }

    async fn dispatch(
        &self,
        events: Vec<SetupEvent>,
        auth_token: Option<&AuthToken>,
    ) -> SetupState {
        // Serializes whole flows: a second start waits for the first to settle.
        let _dispatch_guard = self.context.acquire_dispatch_lock().await;
        self.run(events, auth_token, false).await
    }

    /// Caller must hold the dispatch lock.
    ///
    /// With `drop_cached_account`, a `Reset` also forgets the cached account
    /// in the same snapshot update.
    async fn run(
        &self,
        events: Vec<SetupEvent>,
        auth_token: Option<&AuthToken>,
        drop_cached_account: bool,
    ) -> SetupState {
        let span = info_span!("usecase.setup_orchestrator.dispatch", events = ?events);
        async {
            let mut current = self.context.get_state().await;
            let mut pending: VecDeque<SetupEvent> = events.into();

            while let Some(event) = pending.pop_front() {
                let from = current.clone();
                let event_name = format!("{:?}", event);
                let clears_error = matches!(
                    event,
                    SetupEvent::Start | SetupEvent::Reset | SetupEvent::Disconnect
                );
                let clears_account = drop_cached_account && matches!(event, SetupEvent::Reset);

                let (next, actions) = SetupStateMachine::transition(current, event);
                debug_assert!(
                    SetupStateMachine::is_valid_transition(&from, &next),
                    "setup moved backwards from {} to {}",
                    from.name(),
                    next.name()
                );
                info!(
                    from = from.name(),
                    to = next.name(),
                    event = %event_name,
                    "setup state transition"
                );
                self.publish_state(&next, clears_error, clears_account).await;
                if next.is_terminal() && !from.is_terminal() {
                    info!(state = next.name(), "setup flow settled");
                }
                current = next;

                match self.execute_actions(actions, auth_token).await {
                    Ok(follow_up_events) => pending.extend(follow_up_events),
                    Err(err) => {
                        error!(state = current.name(), error = %err, "setup step failed");
                        pending.push_back(SetupEvent::StepFailed {
                            message: err.user_message(),
                        });
                    }
                }
            }

            current
        }
        .instrument(span)
        .await
    }

    async fn execute_actions(
        &self,
        actions: Vec<SetupAction>,
        auth_token: Option<&AuthToken>,
    ) -> Result<Vec<SetupEvent>, SetupFlowError> {
        let mut follow_up_events = Vec::new();
        for action in actions {
            debug!(?action, "setup executing action");
            match action {
                SetupAction::QueryStatus => {
                    let auth_token = require_auth_token(auth_token)?;
                    let response = self.account_api.get_status(auth_token).await?;
                    if response.has_account {
                        if let Some(account) = response.account {
                            self.cache_account(account).await;
                        }
                        follow_up_events.push(SetupEvent::AccountFound);
                    } else {
                        follow_up_events.push(SetupEvent::AccountMissing);
                    }
                    debug!(
                        has_account = response.has_account,
                        "setup action QueryStatus completed"
                    );
                }
                SetupAction::CheckCredentialFreshness => {
                    let needs_refresh = self.connection.credentials_need_refresh().await;
                    follow_up_events.push(if needs_refresh {
                        SetupEvent::CredentialsStale
                    } else {
                        SetupEvent::CredentialsFresh
                    });
                    debug!(needs_refresh, "setup action CheckCredentialFreshness completed");
                }
                SetupAction::RefreshCredentials => {
                    let auth_token = require_auth_token(auth_token)?;
                    let credentials = self.connection.refresh_credentials(auth_token).await?;
                    self.warn_if_expired(&credentials);
                    self.credential_store.save_credentials(&credentials).await?;
                    follow_up_events.push(SetupEvent::CredentialsReady);
                    debug!("setup action RefreshCredentials completed");
                }
                SetupAction::CreateAccount => {
                    let auth_token = require_auth_token(auth_token)?;
                    let created = self.account_api.create_account(auth_token).await?;
                    let account = AccountInfo::from_created(created, self.clock.now());
                    self.credential_store.save_account_info(&account).await?;
                    info!(
                        owner_space_id = %account.owner_space_id,
                        message_space_id = %account.message_space_id,
                        "account created"
                    );
                    self.cache_account(account).await;
                    follow_up_events.push(SetupEvent::AccountCreated);
                }
                SetupAction::GenerateToken => {
                    let auth_token = require_auth_token(auth_token)?;
                    let device_id = self.resolve_device_id.execute().await?;
                    let response = self
                        .account_api
                        .generate_token(self.options.token_kind, &device_id, auth_token)
                        .await?;
                    let credentials = Credentials::from(response);
                    self.warn_if_expired(&credentials);
                    self.credential_store.save_credentials(&credentials).await?;
                    follow_up_events.push(SetupEvent::CredentialsReady);
                    debug!(
                        kind = self.options.token_kind.as_str(),
                        "setup action GenerateToken completed"
                    );
                }
                SetupAction::Connect => {
                    let auth_token = require_auth_token(auth_token)?;
                    let status = self.connected_status().await?;
                    self.connection.connect(auth_token).await?;
                    follow_up_events.push(SetupEvent::ConnectSucceeded(status));
                    debug!("setup action Connect completed");
                }
                SetupAction::TearDownConnection => {
                    if let Err(err) = self.connection.disconnect().await {
                        warn!(error = %err, "disconnect failed, state reset anyway");
                    }
                    debug!("setup action TearDownConnection completed");
                }
            }
        }

        Ok(follow_up_events)
    }

    /// Status reported once connected, built from the cached account.
    async fn connected_status(&self) -> Result<AccountStatus, SetupFlowError> {
        match self.context.snapshot().await.account_info {
            Some(account) => Ok(AccountStatus::connected(&account)),
            None if self.options.require_cached_account => Err(SetupFlowError::MissingAccount),
            None => {
                warn!("no cached account info, reporting empty space identifiers");
                Ok(AccountStatus::connected_unknown())
            }
        }
    }

    /// Credentials are kept either way; the connection manager decides on refresh.
    fn warn_if_expired(&self, credentials: &Credentials) {
        if credentials.is_expired_at(self.clock.now()) {
            warn!(
                expires_at = ?credentials.expires_at,
                "received credentials are already expired"
            );
        }
    }

    async fn cache_account(&self, account: AccountInfo) {
        self.update_and_emit(|snapshot| {
            snapshot.account_info = Some(account);
        })
        .await;
    }

    /// The error notice is written in the same update as the `Error` state.
    async fn publish_state(&self, state: &SetupState, clears_error: bool, clears_account: bool) {
        self.update_and_emit(|snapshot| {
            snapshot.state = state.clone();
            if clears_error {
                snapshot.error_message = None;
            }
            if clears_account {
                snapshot.account_info = None;
            }
            if let SetupState::Error(message) = state {
                snapshot.error_message = Some(message.clone());
            }
        })
        .await;
    }

    async fn update_and_emit<F>(&self, f: F)
    where
        F: FnOnce(&mut SetupSnapshot),
    {
        if let Some(snapshot) = self.context.update(f).await {
            self.setup_event_port.emit_setup_state_changed(snapshot).await;
        }
    }
}

fn require_auth_token(auth_token: Option<&AuthToken>) -> Result<&AuthToken, SetupFlowError> {
    auth_token.ok_or(SetupFlowError::MissingAuthToken)
}
