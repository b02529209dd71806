//! Error types returned by the ports.
//!
//! 端口返回的错误类型。

use thiserror::Error;

/// Failure reported by the account API client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),

    #[error("not authorized: {0}")]
    Unauthorized(String),

    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Failure reported by the bus connection manager.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectionError {
    #[error("connection failed: {0}")]
    Connect(String),

    #[error("credential refresh failed: {0}")]
    CredentialRefresh(String),

    #[error("disconnect failed: {0}")]
    Disconnect(String),
}

/// Failure of a persistence adapter.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("stored value is corrupted: {0}")]
    Corrupted(String),
}
