use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Grant type sent to the authentication endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrantType {
    ClientCredentials,
}

impl GrantType {
    pub fn as_str(&self) -> &'static str {
        match self {
            GrantType::ClientCredentials => "client_credentials",
        }
    }
}

/// Token returned by the authentication endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    /// Access token for API requests
    pub access_token: String,

    /// Token lifetime in seconds
    pub expires_in: i64,

    /// Token type (usually "Bearer")
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

impl Token {
    /// Create a new bearer Token
    pub fn new(access_token: String, expires_in: i64) -> Self {
        Token {
            access_token,
            expires_in,
            token_type: default_token_type(),
        }
    }

    /// Absolute expiry of this token when received at `now`, or `None` when
    /// `expires_in` does not fit the calendar.
    pub fn expires_at(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        Duration::try_seconds(self.expires_in).and_then(|lifetime| now.checked_add_signed(lifetime))
    }
}

/// The single token an authenticator holds on to between requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedToken {
    pub value: String,
    pub expires_at: DateTime<Utc>,
}

impl CachedToken {
    pub fn from_token(token: Token, now: DateTime<Utc>) -> Option<Self> {
        Some(CachedToken {
            expires_at: token.expires_at(now)?,
            value: token.access_token,
        })
    }

    /// Usable strictly before `expires_at`, with no safety margin.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid_at(Utc::now())
    }
}
