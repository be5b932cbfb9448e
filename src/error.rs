use thiserror::Error;

/// Main error type for TigerBay API operations
#[derive(Debug, Error)]
pub enum Error {
    /// The credentials provider could not produce credentials
    #[error("credentials unavailable: {0}")]
    Credentials(#[from] CredentialsError),

    /// Token exchange against the authentication endpoint failed
    #[error("authentication failed: {message}")]
    Auth {
        status: Option<u16>,
        message: String,
    },

    /// Non-success response from a resource endpoint
    #[error("HTTP error {status}: {body}")]
    Http { status: u16, body: String },

    /// The resource carries no link with the required relation
    #[error("resource has no '{rel}' link")]
    MissingLink { rel: String },

    /// The resource does not support the requested sub-resource
    #[error("resource {href} does not support this operation")]
    Unsupported { href: String },

    /// Request building error
    #[error("failed to build request: {0}")]
    RequestBuild(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP client error
    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// URL parsing error
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// Failure to obtain client credentials
#[derive(Debug, Error)]
pub enum CredentialsError {
    /// A required environment variable is absent or empty
    #[error("{what} not set in {var}")]
    Missing { what: &'static str, var: String },

    /// Any other provider-specific failure
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a new HTTP error
    pub fn http(status: u16, body: String) -> Self {
        Error::Http { status, body }
    }

    /// Check if this error is a not found error (404)
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Http { status: 404, .. })
    }

    /// Get the HTTP status code, if the server answered at all
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::Http { status, .. } => Some(*status),
            Error::Auth { status, .. } => *status,
            Error::Reqwest(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type for TigerBay operations
pub type Result<T> = std::result::Result<T, Error>;
