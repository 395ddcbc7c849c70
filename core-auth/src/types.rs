use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{AuthError, Result};

/// Azure AD application credentials used for the client-credentials grant.
///
/// The secret never appears in full in `Debug` or `Display` output; see
/// [`Credentials::redacted_secret`].
///
/// # Examples
///
/// ```
/// use core_auth::Credentials;
///
/// let credentials = Credentials::new("tenant", "application", "abcdefgh");
/// assert!(credentials.validate().is_ok());
/// assert_eq!(credentials.redacted_secret(), "abc...fgh");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Azure AD tenant (directory) id
    pub tenant_id: String,
    /// Application (client) id
    pub application_id: String,
    /// Application client secret
    pub client_secret: String,
}

impl Credentials {
    pub fn new(
        tenant_id: impl Into<String>,
        application_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            application_id: application_id.into(),
            client_secret: client_secret.into(),
        }
    }

    /// Reject empty fields before any network call is attempted.
    pub fn validate(&self) -> Result<()> {
        if self.tenant_id.is_empty() {
            return Err(AuthError::InvalidCredentials("tenant ID is empty".to_string()));
        }
        if self.application_id.is_empty() {
            return Err(AuthError::InvalidCredentials(
                "application ID is empty".to_string(),
            ));
        }
        if self.client_secret.is_empty() {
            return Err(AuthError::InvalidCredentials(
                "client secret is empty".to_string(),
            ));
        }
        Ok(())
    }

    /// First and last three characters of the secret. Secrets of four
    /// characters or fewer are hidden entirely.
    pub fn redacted_secret(&self) -> String {
        let chars: Vec<char> = self.client_secret.chars().collect();
        if chars.len() <= 4 {
            return "...".to_string();
        }

        let head: String = chars[..3].iter().collect();
        let tail: String = chars[chars.len() - 3..].iter().collect();
        format!("{}...{}", head, tail)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("tenant_id", &self.tenant_id)
            .field("application_id", &self.application_id)
            .field("client_secret", &self.redacted_secret())
            .finish()
    }
}

impl fmt::Display for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TenantID: {}, ApplicationID: {}, ClientSecret: {}",
            self.tenant_id,
            self.application_id,
            self.redacted_secret()
        )
    }
}

/// Bearer token issued by the Azure AD v1 token endpoint.
///
/// Azure AD delivers the timestamps as strings holding unix seconds; plain
/// integers are accepted as well. A default token has both bounds at the
/// unix epoch and is therefore always stale.
///
/// # Examples
///
/// ```
/// use core_auth::Token;
/// use chrono::Utc;
///
/// let token = Token::default();
/// assert!(token.wants_refresh(Utc::now()));
/// ```
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Token type, usually `Bearer`
    #[serde(default)]
    pub token_type: String,

    /// The access token itself
    #[serde(default)]
    pub access_token: String,

    /// Start of the validity window
    #[serde(default, with = "unix_seconds")]
    pub not_before: DateTime<Utc>,

    /// End of the validity window (exclusive)
    #[serde(default, with = "unix_seconds")]
    pub expires_on: DateTime<Utc>,

    /// Lifetime in seconds as reported by the endpoint
    #[serde(
        default,
        deserialize_with = "unix_seconds::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub expires_in: Option<i64>,

    /// Extended lifetime in seconds as reported by the endpoint
    #[serde(
        default,
        deserialize_with = "unix_seconds::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub ext_expires_in: Option<i64>,

    /// Resource the token was issued for
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
}

impl Token {
    /// Whether `now` lies outside `[not_before, expires_on)`.
    pub fn wants_refresh(&self, now: DateTime<Utc>) -> bool {
        now < self.not_before || now >= self.expires_on
    }

    /// Value of the `Authorization` header, e.g. `Bearer eyJ0...`.
    pub fn authorization_header_value(&self) -> String {
        format!("{} {}", self.token_type, self.access_token)
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("token_type", &self.token_type)
            .field("access_token", &"[REDACTED]")
            .field("not_before", &self.not_before)
            .field("expires_on", &self.expires_on)
            .finish()
    }
}

mod unix_seconds {
    use chrono::{DateTime, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Seconds {
        Integer(i64),
        Text(String),
    }

    fn seconds<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        match Seconds::deserialize(deserializer)? {
            Seconds::Integer(value) => Ok(value),
            Seconds::Text(text) => text.trim().parse().map_err(de::Error::custom),
        }
    }

    pub fn serialize<S: Serializer>(
        value: &DateTime<Utc>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.timestamp().to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let value = seconds(deserializer)?;
        DateTime::from_timestamp(value, 0)
            .ok_or_else(|| de::Error::custom(format!("timestamp out of range: {}", value)))
    }

    pub fn optional<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<i64>, D::Error> {
        seconds(deserializer).map(Some)
    }
}
