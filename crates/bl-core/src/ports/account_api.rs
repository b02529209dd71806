use async_trait::async_trait;

use crate::account::{AccountStatusResponse, CreatedAccount};
use crate::credentials::{TokenKind, TokenResponse};
use crate::errors::ApiError;
use crate::ids::{AuthToken, DeviceId};

/// Remote account API.
///
/// Timeouts are the implementation's responsibility.
#[async_trait]
pub trait AccountApiPort: Send + Sync {
    /// Ask whether an account exists for the caller.
    async fn get_status(&self, auth_token: &AuthToken) -> Result<AccountStatusResponse, ApiError>;

    /// Provision a new account.
    async fn create_account(&self, auth_token: &AuthToken) -> Result<CreatedAccount, ApiError>;

    /// Issue a bus token of `kind` scoped to `device_id`.
    async fn generate_token(
        &self,
        kind: TokenKind,
        device_id: &DeviceId,
        auth_token: &AuthToken,
    ) -> Result<TokenResponse, ApiError>;
}
