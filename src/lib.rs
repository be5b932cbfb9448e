//! # tigerbay - TigerBay reservation API client for Rust
//!
//! A typed, asynchronous client for the TigerBay travel-reservation REST API.
//! Every API group method maps to exactly one HTTP call; the client takes
//! care of bearer authentication and JSON encoding/decoding.
//!
//! ## Features
//!
//! - Client-credentials authentication with a cached bearer token, refreshed
//!   only when it expires
//! - Pluggable credentials providers (constant, environment, or your own)
//! - Typed request/response records for reservations, tours, the departure
//!   cache, customers, payments, tasks, notes, agents, content and setup
//! - Notes addressed through a resource's `self` link
//!
//! ## Basic Usage
//!
//! ```no_run
//! use tigerbay::{Client, ClientCredentials, Config, ConstantCredentials};
//! use tigerbay::models::cache::{CacheSearchRequest, SearchRange};
//! use tigerbay::Time;
//!
//! # async fn run() -> tigerbay::Result<()> {
//! let credentials = ConstantCredentials::new(ClientCredentials::new("website", "Secret"));
//! let config = Config::new("https://example.ontigerbay.co.uk/nimble", credentials)
//!     .with_auth_url("https://example.ontigerbay.co.uk");
//! let client = Client::new(config)?;
//!
//! let departures = client
//!     .cache()
//!     .search(&CacheSearchRequest {
//!         service_date_range: Some(SearchRange { from: Some(Time::now()), to: None }),
//!         currency_code: Some("GBP".to_string()),
//!         ..Default::default()
//!     })
//!     .await?;
//!
//! println!("Got {} departures", departures.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## Credentials from the environment
//!
//! ```no_run
//! use tigerbay::{Client, Config, EnvCredentials};
//!
//! // Reads TB_CLIENT_ID and TB_CLIENT_SECRET whenever a token is needed
//! let client = Client::new(Config::new("https://example.ontigerbay.co.uk", EnvCredentials::default()))?;
//! # Ok::<(), tigerbay::Error>(())
//! ```

pub mod auth;
pub mod client;
pub mod error;
pub mod models;
pub mod query;
pub mod rest;
pub mod time;
pub mod token;

// Re-export main types for convenience
pub use auth::{Authenticator, ClientCredentials, ConstantCredentials, CredentialsProvider, EnvCredentials};
pub use client::{Client, Config, HealthCheckEntry};
pub use error::{CredentialsError, Error, Result};
pub use models::{HasSelfLink, Link, UpdateOperation};
pub use rest::RestContext;
pub use time::Time;
pub use token::{CachedToken, Token};
