//! Typed HTTP client for the users record API.
//!
//! [`UserApi`] is the seam the client form layer calls through;
//! [`UserClient`] implements it over `reqwest`.
//!
//! # Usage
//!
//! ```ignore
//! use userbase_client::{UserApi, UserClient};
//!
//! let client = UserClient::new("http://localhost:3400");
//! let users = client.list().await?;
//! ```

use serde::de::DeserializeOwned;
use reqwest::Url;
use serde::Deserialize;
use tracing::debug;

use userbase_types::{User, UserFields};

// ── Error ───────────────────────────────────────────────────────────

/// Client-side API error.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The API answered with a structured error.
    #[error("HTTP {status}: {message}")]
    Server { status: u16, message: String },

    /// The request never got an answer.
    #[error("network: {0}")]
    Network(#[from] reqwest::Error),

    #[error("decode: {0}")]
    Decode(String),

    /// The base URL cannot carry a record path.
    #[error("invalid url: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// The server's own message, if this is a structured API error.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Server { message, .. } if !message.is_empty() => Some(message),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Pull a human-readable message out of an error body.
///
/// Record errors carry `message`; delete errors carry `error`. Anything
/// else is returned as the raw text.
pub fn error_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["message", "error"] {
            if let Some(text) = value.get(key).and_then(|v| v.as_str()) {
                return text.to_string();
            }
        }
    }
    body.trim().to_string()
}

// ── UserApi ─────────────────────────────────────────────────────────

/// The five record operations, as seen from the client.
#[async_trait::async_trait]
pub trait UserApi: Send + Sync + 'static {
    async fn list(&self) -> Result<Vec<User>, ApiError>;
    async fn get(&self, id: &str) -> Result<User, ApiError>;
    async fn create(&self, fields: &UserFields) -> Result<User, ApiError>;
    async fn update(&self, id: &str, fields: &UserFields) -> Result<User, ApiError>;
    /// Delete a record, returning what the server removed.
    async fn delete(&self, id: &str) -> Result<User, ApiError>;
}

#[derive(Deserialize)]
struct DeleteEnvelope {
    result: User,
}

// ── UserClient ──────────────────────────────────────────────────────

/// HTTP implementation of [`UserApi`].
pub struct UserClient {
    http: reqwest::Client,
    base_url: String,
}

impl UserClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `{base}/{route}/{id}`, with `id` percent-encoded as one path segment.
    fn record_url(&self, route: &str, id: &str) -> Result<Url, ApiError> {
        let mut url =
            Url::parse(&self.base_url).map_err(|e| ApiError::InvalidUrl(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .push(route)
            .push(id);
        Ok(url)
    }

    /// Parse an API response, mapping HTTP errors to `ApiError`.
    async fn parse<R: DeserializeOwned>(resp: reqwest::Response) -> Result<R, ApiError> {
        let status = resp.status();
        if !status.is_success() {
            let code = status.as_u16();
            let body = resp.text().await.unwrap_or_default();
            debug!("api error {}: {}", code, body);
            return Err(ApiError::Server {
                status: code,
                message: error_message(&body),
            });
        }
        resp.json::<R>()
            .await
            .map_err(|e| ApiError::Decode(format!("response body: {}", e)))
    }
}

#[async_trait::async_trait]
impl UserApi for UserClient {
    async fn list(&self) -> Result<Vec<User>, ApiError> {
        let resp = self.http.get(self.url("/getusers")).send().await?;
        Self::parse(resp).await
    }

    async fn get(&self, id: &str) -> Result<User, ApiError> {
        let resp = self.http.get(self.record_url("getusers", id)?).send().await?;
        Self::parse(resp).await
    }

    async fn create(&self, fields: &UserFields) -> Result<User, ApiError> {
        let resp = self.http.post(self.url("/createusers")).json(fields).send().await?;
        Self::parse(resp).await
    }

    async fn update(&self, id: &str, fields: &UserFields) -> Result<User, ApiError> {
        let resp = self
            .http
            .put(self.record_url("updateuser", id)?)
            .json(fields)
            .send()
            .await?;
        Self::parse(resp).await
    }

    async fn delete(&self, id: &str) -> Result<User, ApiError> {
        let resp = self.http.delete(self.record_url("deleteuser", id)?).send().await?;
        let envelope: DeleteEnvelope = Self::parse(resp).await?;
        Ok(envelope.result)
    }
}
