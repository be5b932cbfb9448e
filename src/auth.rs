//! Client-credentials authentication.
//!
//! An [`Authenticator`] owns a single cached bearer token. Every resource
//! request asks it for a token; the token endpoint is only contacted when the
//! cache is empty or the cached token has expired.

use crate::client::USER_AGENT;
use crate::error::{CredentialsError, Error, Result};
use crate::token::{CachedToken, GrantType, Token};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::header::{CONTENT_TYPE, USER_AGENT as USER_AGENT_HEADER};
use reqwest::RequestBuilder;
use std::fmt;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Path of the token endpoint, relative to the authentication URL
pub const TOKEN_PATH: &str = "/security/users/authenticate";

/// Default prefix for [`EnvCredentials`]
pub const DEFAULT_ENV_PREFIX: &str = "TB";

/// API client credentials
#[derive(Clone, PartialEq, Eq)]
pub struct ClientCredentials {
    pub client_id: String,
    pub client_secret: String,
}

impl ClientCredentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        ClientCredentials {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }
}

// Implement Debug manually to avoid exposing the secret
impl fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// Source of client credentials, consulted each time a new token is needed.
#[async_trait]
pub trait CredentialsProvider: Send + Sync {
    async fn credentials(&self) -> std::result::Result<ClientCredentials, CredentialsError>;
}

/// Provider which always returns the credentials it was created with.
#[derive(Debug, Clone)]
pub struct ConstantCredentials {
    credentials: ClientCredentials,
}

impl ConstantCredentials {
    pub fn new(credentials: ClientCredentials) -> Self {
        ConstantCredentials { credentials }
    }
}

#[async_trait]
impl CredentialsProvider for ConstantCredentials {
    async fn credentials(&self) -> std::result::Result<ClientCredentials, CredentialsError> {
        Ok(self.credentials.clone())
    }
}

/// Provider reading `{PREFIX}_CLIENT_ID` and `{PREFIX}_CLIENT_SECRET`.
///
/// The variables are read on every call, not at construction, so rotating
/// them in the environment takes effect on the next token refresh.
#[derive(Debug, Clone)]
pub struct EnvCredentials {
    prefix: String,
}

impl EnvCredentials {
    pub fn new(prefix: impl Into<String>) -> Self {
        EnvCredentials {
            prefix: prefix.into(),
        }
    }

    pub fn client_id_var(&self) -> String {
        format!("{}_CLIENT_ID", self.prefix)
    }

    pub fn client_secret_var(&self) -> String {
        format!("{}_CLIENT_SECRET", self.prefix)
    }
}

impl Default for EnvCredentials {
    fn default() -> Self {
        EnvCredentials::new(DEFAULT_ENV_PREFIX)
    }
}

fn read_var(what: &'static str, var: String) -> std::result::Result<String, CredentialsError> {
    match std::env::var(&var) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(CredentialsError::Missing { what, var }),
    }
}

#[async_trait]
impl CredentialsProvider for EnvCredentials {
    async fn credentials(&self) -> std::result::Result<ClientCredentials, CredentialsError> {
        let client_id = read_var("Client ID", self.client_id_var())?;
        let client_secret = read_var("Client Secret", self.client_secret_var())?;
        Ok(ClientCredentials {
            client_id,
            client_secret,
        })
    }
}

/// Attaches bearer tokens to outgoing requests, reusing a cached token until
/// it expires.
///
/// The cache lock is held for the whole refresh, so concurrent callers that
/// find the cache empty wait for a single token exchange instead of each
/// performing their own.
pub struct Authenticator {
    http: reqwest::Client,
    token_url: String,
    provider: Arc<dyn CredentialsProvider>,
    cached: Mutex<Option<CachedToken>>,
}

impl Authenticator {
    /// `http` is used as-is for the token exchange; it must not itself
    /// authenticate requests.
    pub fn new(http: reqwest::Client, auth_url: &str, provider: Arc<dyn CredentialsProvider>) -> Self {
        Authenticator {
            http,
            token_url: format!("{}{}", auth_url.trim_end_matches('/'), TOKEN_PATH),
            provider,
            cached: Mutex::new(None),
        }
    }

    pub fn token_url(&self) -> &str {
        &self.token_url
    }

    /// Return a usable access token, fetching a new one if needed.
    pub async fn bearer_token(&self) -> Result<String> {
        let mut cached = self.cached.lock().await;

        if let Some(token) = cached.as_ref() {
            if token.is_valid() {
                debug!(message = "Using cached token", token_expires_at = %token.expires_at);
                return Ok(token.value.clone());
            }
            debug!(message = "Cached token expired, refreshing", token_expires_at = %token.expires_at);
        }

        info!(
            message = "Requesting new access token",
            token_url = %self.token_url,
            token_is_stale = cached.is_some(),
        );

        let credentials = self.provider.credentials().await?;
        let record = self.exchange(&credentials).await?;

        debug!(message = "Got new token", token_expires_at = %record.expires_at);

        let value = record.value.clone();
        cached.replace(record);
        Ok(value)
    }

    /// Attach an `Authorization: Bearer` header to the request.
    pub async fn authenticate(&self, request: RequestBuilder) -> Result<RequestBuilder> {
        let token = self.bearer_token().await?;
        Ok(request.bearer_auth(token))
    }

    async fn exchange(&self, credentials: &ClientCredentials) -> Result<CachedToken> {
        let params = [
            ("client_id", credentials.client_id.as_str()),
            ("client_secret", credentials.client_secret.as_str()),
            ("grant_type", GrantType::ClientCredentials.as_str()),
        ];

        let response = self
            .http
            .post(&self.token_url)
            .header(USER_AGENT_HEADER, USER_AGENT)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .form(&params)
            .send()
            .await
            .map_err(|e| {
                warn!(message = "Token request failed", error = %e);
                Error::Auth {
                    status: e.status().map(|s| s.as_u16()),
                    message: e.to_string(),
                }
            })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| Error::Auth {
            status: Some(status.as_u16()),
            message: e.to_string(),
        })?;

        if !status.is_success() {
            warn!(message = "Token endpoint rejected credentials", status = status.as_u16());
            return Err(Error::Auth {
                status: Some(status.as_u16()),
                message: format!(
                    "token endpoint returned {}: {}",
                    status,
                    String::from_utf8_lossy(&body)
                ),
            });
        }

        let token: Token = serde_json::from_slice(&body).map_err(|e| Error::Auth {
            status: Some(status.as_u16()),
            message: format!("invalid token response: {}", e),
        })?;

        let expires_in = token.expires_in;
        CachedToken::from_token(token, Utc::now()).ok_or_else(|| {
            warn!(message = "Token lifetime out of range", expires_in);
            Error::Auth {
                status: Some(status.as_u16()),
                message: format!("invalid expires_in: {}", expires_in),
            }
        })
    }
}

impl fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Authenticator")
            .field("token_url", &self.token_url)
            .field("provider", &"<credentials provider>")
            .finish()
    }
}
