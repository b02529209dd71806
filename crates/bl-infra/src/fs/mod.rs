//! File-backed storage adapters.

mod atomic;
mod credential_store;
mod key_value_store;

pub use credential_store::{FileCredentialStore, ACCOUNT_INFO_FILE, CREDENTIALS_FILE};
pub use key_value_store::{FileKeyValueStore, DEFAULT_KEY_VALUE_FILE};
