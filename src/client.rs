use crate::auth::{Authenticator, CredentialsProvider};
use crate::error::Result;
use crate::models::agents::AgentsApi;
use crate::models::cache::CacheApi;
use crate::models::content::ContentApi;
use crate::models::customers::{CustomerApi, CustomersApi};
use crate::models::notes::NotesApi;
use crate::models::passengers::PassengerApi;
use crate::models::payments::PaymentsApi;
use crate::models::reservations::ReservationsApi;
use crate::models::setup::SetupApi;
use crate::models::tasks::TasksApi;
use crate::models::tours::ToursApi;
use crate::rest::RestContext;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::ClientBuilder;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// User-Agent sent with every request, including the token exchange
pub const USER_AGENT: &str = concat!(
    "tigerbay-rs/",
    env!("CARGO_PKG_VERSION"),
    " (+https://github.com/mrzen/tigerbay-rs)"
);

/// Create the HTTP client for API requests
/// with pooled connections and JSON default headers
pub fn create_rest_client(config: &Config) -> Result<reqwest::Client> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    let mut builder = ClientBuilder::new()
        .user_agent(USER_AGENT)
        .default_headers(headers)
        .pool_max_idle_per_host(50)
        .connect_timeout(Duration::from_secs(10));

    if let Some(timeout) = config.timeout {
        builder = builder.timeout(timeout);
    }

    Ok(builder.build()?)
}

/// Configuration for the TigerBay client
#[derive(Clone)]
pub struct Config {
    /// Base URL for resource requests
    pub base_url: String,
    /// Authentication URL, if different to `base_url`
    pub auth_url: Option<String>,
    /// Per-request timeout, unbounded when unset
    pub timeout: Option<Duration>,
    /// Source of client credentials for the token exchange
    pub credentials: Arc<dyn CredentialsProvider>,
}

impl Config {
    /// Create a new configuration with the given base URL and credentials
    pub fn new(base_url: impl Into<String>, credentials: impl CredentialsProvider + 'static) -> Self {
        Config {
            base_url: base_url.into(),
            auth_url: None,
            timeout: None,
            credentials: Arc::new(credentials),
        }
    }

    /// Set a separate authentication URL
    pub fn with_auth_url(mut self, auth_url: impl Into<String>) -> Self {
        self.auth_url = Some(auth_url.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// URL the token endpoint lives under
    pub fn auth_url(&self) -> &str {
        self.auth_url.as_deref().unwrap_or(&self.base_url)
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url)
            .field("auth_url", &self.auth_url)
            .field("timeout", &self.timeout)
            .field("credentials", &"<credentials provider>")
            .finish()
    }
}

/// Status of one component reported by `/healthcheck`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct HealthCheckEntry {
    pub name: String,
    pub is_healthy: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
}

/// Client for the TigerBay reservation system.
///
/// Cloning is cheap and clones share the same connection pool and token
/// cache.
#[derive(Debug, Clone)]
pub struct Client {
    ctx: Arc<RestContext>,
}

impl Client {
    /// Build a client and its authenticator from a configuration
    pub fn new(config: Config) -> Result<Self> {
        let http = create_rest_client(&config)?;
        let authenticator = Authenticator::new(http.clone(), config.auth_url(), config.credentials.clone());
        let ctx = RestContext::new(http, config.base_url, authenticator);
        Ok(Client { ctx: Arc::new(ctx) })
    }

    /// The authenticated transport shared by all API groups
    pub fn context(&self) -> &RestContext {
        &self.ctx
    }

    /// Reservation-related API actions
    pub fn reservations(&self) -> ReservationsApi<'_> {
        ReservationsApi::new(&self.ctx)
    }

    /// Actions on one passenger of a reservation
    pub fn passenger(&self, booking_id: i64, passenger_id: i64) -> PassengerApi<'_> {
        PassengerApi::new(&self.ctx, booking_id, passenger_id)
    }

    /// Tour search API actions
    pub fn tours(&self) -> ToursApi<'_> {
        ToursApi::new(&self.ctx)
    }

    /// Cached departure search
    pub fn cache(&self) -> CacheApi<'_> {
        CacheApi::new(&self.ctx)
    }

    /// Customer management API actions
    pub fn customers(&self) -> CustomersApi<'_> {
        CustomersApi::new(&self.ctx)
    }

    /// Actions on a single customer
    pub fn customer(&self, id: i64) -> CustomerApi<'_> {
        CustomerApi::new(&self.ctx, id)
    }

    /// Payment related API actions
    pub fn payments(&self) -> PaymentsApi<'_> {
        PaymentsApi::new(&self.ctx)
    }

    /// Task-related API actions
    pub fn tasks(&self) -> TasksApi<'_> {
        TasksApi::new(&self.ctx)
    }

    /// Notes attached to any linked resource
    pub fn notes(&self) -> NotesApi<'_> {
        NotesApi::new(&self.ctx)
    }

    /// System configuration/setup
    pub fn setup(&self) -> SetupApi<'_> {
        SetupApi::new(&self.ctx)
    }

    /// Agent API actions
    pub fn agents(&self) -> AgentsApi<'_> {
        AgentsApi::new(&self.ctx)
    }

    /// Content bundle lookups
    pub fn content(&self, bundle_reference: impl Into<String>) -> ContentApi<'_> {
        ContentApi::new(&self.ctx, bundle_reference.into())
    }

    /// Report the health of the remote system's components
    pub async fn healthcheck(&self) -> Result<HashMap<String, HealthCheckEntry>> {
        self.ctx.get("/healthcheck").await
    }

    /// Bearer token the next request would carry, fetched if necessary
    pub async fn access_token(&self) -> Result<String> {
        self.ctx.authenticator().bearer_token().await
    }
}
