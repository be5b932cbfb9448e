use crate::auth::Authenticator;
use crate::error::{Error, Result};
use crate::models::common::UpdateOperation;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Instant;
use tracing::debug;
use url::Url;

/// Content type for partial updates
pub const JSON_PATCH: &str = "application/json-patch+json";

/// Authenticated transport shared by every API group
#[derive(Debug)]
pub struct RestContext {
    /// HTTP client
    client: reqwest::Client,
    /// Base URL resource paths are joined onto
    base_url: String,
    /// Bearer token source
    authenticator: Authenticator,
}

impl RestContext {
    pub fn new(client: reqwest::Client, base_url: String, authenticator: Authenticator) -> Self {
        RestContext {
            client,
            base_url,
            authenticator,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn authenticator(&self) -> &Authenticator {
        &self.authenticator
    }

    /// Resolve a path (or an absolute href) against the base URL
    pub fn url(&self, path: &str) -> Result<Url> {
        if path.starts_with("http://") || path.starts_with("https://") {
            return Ok(Url::parse(path)?);
        }
        let joined = format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        Ok(Url::parse(&joined)?)
    }

    /// GET a path and decode the JSON body
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.apply(Method::GET, path, None::<&()>).await
    }

    /// POST a JSON body and decode the JSON response
    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.apply(Method::POST, path, Some(body)).await
    }

    /// POST without a body and decode the JSON response
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.apply(Method::POST, path, None::<&()>).await
    }

    /// Send a PATCH of json-patch operations, discarding the response body
    pub async fn patch(&self, path: &str, operations: &[UpdateOperation]) -> Result<()> {
        let request = self
            .request(Method::PATCH, path)?
            .header(CONTENT_TYPE, JSON_PATCH)
            .body(serde_json::to_vec(operations)?);
        self.execute(&Method::PATCH, path, request).await?;
        Ok(())
    }

    /// Make a request and unmarshal the response body into the target type
    pub async fn apply<T, B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let bytes = self.do_request(method, path, body).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Make a request and return the raw response body
    pub async fn do_request<B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<Vec<u8>>
    where
        B: Serialize + ?Sized,
    {
        let mut request = self.request(method.clone(), path)?;
        if let Some(body) = body {
            request = request
                .header(CONTENT_TYPE, "application/json")
                .body(serde_json::to_vec(body)?);
        }
        self.execute(&method, path, request).await
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        Ok(self.client.request(method, self.url(path)?))
    }

    async fn execute(&self, method: &Method, path: &str, request: RequestBuilder) -> Result<Vec<u8>> {
        let request = self.authenticator.authenticate(request).await?;

        let start = Instant::now();
        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        debug!(
            message = "Request completed",
            method = %method,
            path,
            status = status.as_u16(),
            elapsed_ms = start.elapsed().as_millis() as u64,
        );

        if !status.is_success() {
            return Err(Error::http(
                status.as_u16(),
                String::from_utf8_lossy(&body).into_owned(),
            ));
        }

        Ok(body.to_vec())
    }
}
