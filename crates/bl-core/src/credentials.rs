//! Bus credentials and the token responses they are derived from.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeroize::Zeroize;

/// Sensitive string: redacted in logs, zeroized on drop.
///
/// 敏感字符串：日志中脱敏，释放时清零。
pub struct SecretString {
    inner: String,
}

impl SecretString {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            inner: value.into(),
        }
    }

    /// Borrow the inner secret as &str.
    pub fn expose(&self) -> &str {
        &self.inner
    }
}

impl Clone for SecretString {
    fn clone(&self) -> Self {
        Self::new(self.inner.clone())
    }
}

impl PartialEq for SecretString {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl Eq for SecretString {}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl Drop for SecretString {
    fn drop(&mut self) {
        self.inner.zeroize();
    }
}

impl Serialize for SecretString {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.inner)
    }
}

impl<'de> Deserialize<'de> for SecretString {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::new)
    }
}

/// Kind of token requested from the account API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    /// Token for the application's own bus client.
    #[default]
    App,
    /// Token bound to the device identity.
    Device,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::App => "app",
            TokenKind::Device => "device",
        }
    }
}

impl FromStr for TokenKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "app" => Ok(TokenKind::App),
            "device" => Ok(TokenKind::Device),
            other => Err(format!("unknown token kind: {other}")),
        }
    }
}

/// Token generation response from the account API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub token: SecretString,
    pub seed: SecretString,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

/// Bus authentication material.
///
/// Owned by the credential store; the setup flow only passes it through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub token: SecretString,
    pub seed: SecretString,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

impl Credentials {
    /// Whether the credentials have expired at `now`. Credentials without an
    /// expiry never expire.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| expires_at <= now)
    }
}

impl From<TokenResponse> for Credentials {
    fn from(response: TokenResponse) -> Self {
        Self {
            token: response.token,
            seed: response.seed,
            expires_at: response.expires_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn response(expires_at: Option<DateTime<Utc>>) -> TokenResponse {
        TokenResponse {
            token: SecretString::new("jwt-value"),
            seed: SecretString::new("seed-value"),
            expires_at,
        }
    }

    #[test]
    fn debug_output_never_contains_secrets() {
        let credentials = Credentials::from(response(None));
        let debug = format!("{credentials:?}");
        assert!(!debug.contains("jwt-value"));
        assert!(!debug.contains("seed-value"));
    }

    #[test]
    fn credentials_persist_secret_values() {
        let credentials = Credentials::from(response(None));
        let json = serde_json::to_string(&credentials).unwrap();
        let restored: Credentials = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.token.expose(), "jwt-value");
        assert_eq!(restored, credentials);
    }

    #[test]
    fn expiry_check() {
        let now = Utc::now();
        assert!(!Credentials::from(response(None)).is_expired_at(now));
        assert!(Credentials::from(response(Some(now - Duration::seconds(1)))).is_expired_at(now));
        assert!(!Credentials::from(response(Some(now + Duration::hours(1)))).is_expired_at(now));
    }

    #[test]
    fn token_kind_parses_case_insensitively() {
        assert_eq!("App".parse::<TokenKind>(), Ok(TokenKind::App));
        assert_eq!(" device ".parse::<TokenKind>(), Ok(TokenKind::Device));
        assert!("admin".parse::<TokenKind>().is_err());
    }
}
