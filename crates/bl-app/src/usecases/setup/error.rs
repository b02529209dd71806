use bl_core::errors::{ApiError, ConnectionError, StorageError};

/// Message shown when a failure carries no description of its own.
pub const GENERIC_FAILURE_MESSAGE: &str = "Setup failed due to an unexpected error";

/// Errors that halt the setup flow.
#[derive(Debug, thiserror::Error)]
pub enum SetupFlowError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Connection(#[from] ConnectionError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("no account information is available for the existing account")]
    MissingAccount,
    #[error("setup requires an auth token")]
    MissingAuthToken,
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl SetupFlowError {
    /// Human-readable description for the error state and notice.
    /// Never empty.
    pub fn user_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            GENERIC_FAILURE_MESSAGE.to_string()
        } else {
            message
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_prefers_error_description() {
        let err = SetupFlowError::from(ApiError::Network("connection reset".into()));
        assert_eq!(err.user_message(), "network error: connection reset");
    }

    #[test]
    fn user_message_falls_back_when_blank() {
        let err = SetupFlowError::from(anyhow::anyhow!("  "));
        assert_eq!(err.user_message(), GENERIC_FAILURE_MESSAGE);
    }
}
