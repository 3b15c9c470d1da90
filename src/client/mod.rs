//! HTTP client for the maib MIA API.
//!
//! Gated behind the `client` cargo feature so downstream crates that only
//! need the shared types and the signature codec do not pull in `reqwest`.
//!
//! Bearer tokens are short-lived and passed explicitly to every call; the
//! client holds no session state beyond the connection pool.

mod auth;
mod payment;
mod qr;
mod rtp;

use reqwest::{Client, StatusCode};
use url::Url;

use crate::config::{Config, DEFAULT_BASE_URL, SANDBOX_BASE_URL};
use crate::objects::{ApiErrorEntry, ApiResponse};

/// `User-Agent` sent with every request.
pub const USER_AGENT: &str = concat!("maib-mia-sdk-rs/", env!("CARGO_PKG_VERSION"));

/// Errors produced by the SDK HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Transport-level failure (DNS, TLS, connection reset, …).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server returned a non-2xx status code.
    #[error("api error: status {status}, body: {body}")]
    Api { status: StatusCode, body: String },

    /// The server answered with `ok: false` and a list of errors.
    #[error("gateway error: {errors:?}")]
    Gateway { errors: Vec<ApiErrorEntry> },

    /// The server answered with `ok: true` but no `result` object.
    #[error("response contained no result")]
    EmptyResult,

    /// Response body could not be deserialized.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The base URL could not be joined with the endpoint path.
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),
}

/// Typed HTTP client for the maib MIA API.
///
/// Obtain a bearer token with [`MiaClient::get_token`] and pass it to each
/// subsequent call; the SDK does not cache or refresh tokens.
#[derive(Debug, Clone)]
pub struct MiaClient {
    http: Client,
    base_url: Url,
}

impl MiaClient {
    /// Create a client against the production API.
    pub fn new() -> Self {
        Self::with_base_url(Url::parse(DEFAULT_BASE_URL).expect("valid base url"))
    }

    /// Create a client against the sandbox API.
    pub fn sandbox() -> Self {
        Self::with_base_url(Url::parse(SANDBOX_BASE_URL).expect("valid base url"))
    }

    /// Create a client against a custom API root.
    pub fn with_base_url(base_url: Url) -> Self {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self { http, base_url }
    }

    /// Create a client for the environment named in `config`.
    pub fn from_config(config: &Config) -> Self {
        Self::with_base_url(config.environment.base_url())
    }

    /// Replace the default `reqwest::Client` with a custom one (e.g. to
    /// configure timeouts or a proxy). The replacement supplies its own
    /// `User-Agent`.
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http = client;
        self
    }
}

impl Default for MiaClient {
    fn default() -> Self {
        Self::new()
    }
}

async fn parse_response<T: serde::de::DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<T, ClientError> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(ClientError::Api { status, body });
    }
    let bytes = resp.bytes().await?;
    let envelope: ApiResponse<T> = serde_json::from_slice(&bytes)?;
    if !envelope.ok {
        tracing::warn!(errors = ?envelope.errors, "MIA API returned ok=false");
        return Err(ClientError::Gateway {
            errors: envelope.errors,
        });
    }
    envelope.result.ok_or(ClientError::EmptyResult)
}
