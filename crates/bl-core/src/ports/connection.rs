use async_trait::async_trait;

use crate::credentials::Credentials;
use crate::errors::ConnectionError;
use crate::ids::AuthToken;

/// Live message-bus connection manager.
#[async_trait]
pub trait ConnectionManagerPort: Send + Sync {
    /// Whether stored credentials must be refreshed before connecting.
    /// The policy (expiry, revocation, ...) belongs to the implementation.
    async fn credentials_need_refresh(&self) -> bool;

    /// Obtain fresh credentials.
    async fn refresh_credentials(
        &self,
        auth_token: &AuthToken,
    ) -> Result<Credentials, ConnectionError>;

    /// Establish the live connection.
    async fn connect(&self, auth_token: &AuthToken) -> Result<(), ConnectionError>;

    /// Tear down the live connection.
    async fn disconnect(&self) -> Result<(), ConnectionError>;
}
