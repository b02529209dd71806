//! Account models.
//!
//! An account pairs an "owner space" with a "message space" on the bus
//! provider. It is provisioned once per installation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Persisted record of a provisioned account.
///
/// 已开通账户的持久化记录。创建后不可变，只能整体替换。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountInfo {
    pub owner_space_id: String,
    pub message_space_id: String,
    pub status: String,
    /// Serialized as an RFC 3339 / ISO-8601 timestamp.
    pub created_at: DateTime<Utc>,
}

impl AccountInfo {
    /// Build the persisted record for a freshly created account.
    pub fn from_created(created: CreatedAccount, created_at: DateTime<Utc>) -> Self {
        Self {
            owner_space_id: created.owner_space_id,
            message_space_id: created.message_space_id,
            status: created.status,
            created_at,
        }
    }
}

/// Connection status shown once setup finishes.
///
/// Derived data, recomputed on every successful connect.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountStatus {
    pub owner_space_id: String,
    pub message_space_id: String,
    pub is_connected: bool,
}

impl AccountStatus {
    pub fn connected(account: &AccountInfo) -> Self {
        Self {
            owner_space_id: account.owner_space_id.clone(),
            message_space_id: account.message_space_id.clone(),
            is_connected: true,
        }
    }

    /// Connected status without known space identifiers.
    pub fn connected_unknown() -> Self {
        Self {
            is_connected: true,
            ..Self::default()
        }
    }
}

/// Response of the account status query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountStatusResponse {
    pub has_account: bool,
    #[serde(default)]
    pub account: Option<AccountInfo>,
}

/// Response of the account creation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedAccount {
    pub owner_space_id: String,
    pub message_space_id: String,
    pub status: String,
}
