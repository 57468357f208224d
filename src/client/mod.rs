//! HTTP client adapter for the marketplace REST backend.
//!
//! Wraps [`reqwest`] with a normalized base URL and bearer token injection.
//! There is deliberately no retry logic here: a failed request is handed back to
//! the caller as an [`AppError`].

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{RequestBuilder, Response};
use serde::Serialize;
use serde_json::Value;

use crate::auth::{bearer_value, TokenStore};
use crate::errors::AppError;

/// Strip quotes, commas and whitespace anywhere in a configured base URL, then any
/// trailing slashes.
pub fn normalize_base_url(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, '"' | '\'' | ',') && !c.is_whitespace())
        .collect();
    cleaned.trim_end_matches('/').to_string()
}

/// HTTP client bound to one backend origin.
#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    tokens: Arc<dyn TokenStore>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a client for `base_url`, reading the bearer token from `tokens`.
    pub fn new(
        base_url: &str,
        tokens: Arc<dyn TokenStore>,
        timeout: Option<Duration>,
    ) -> Result<Self, AppError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| AppError::Network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self::with_client(client, base_url, tokens))
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: &str, tokens: Arc<dyn TokenStore>) -> Self {
        Self {
            client,
            base_url: normalize_base_url(base_url),
            tokens,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a path relative to the base URL.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// `GET {path}?{query}` and decode the JSON body.
    pub async fn get_json(&self, path: &str, query: &[(&str, String)]) -> Result<Value, AppError> {
        let request = self.client.get(self.url(path)).query(query);
        self.send(request).await
    }

    /// `POST {path}` with a JSON body.
    pub async fn post_json<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value, AppError> {
        let request = self.client.post(self.url(path)).json(body);
        self.send(request).await
    }

    /// `PUT {path}` with a JSON body.
    pub async fn put_json<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value, AppError> {
        let request = self.client.put(self.url(path)).json(body);
        self.send(request).await
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let request = request.header(ACCEPT, "application/json");
        match self.tokens.token() {
            Some(token) => request.header(AUTHORIZATION, bearer_value(&token)),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Value, AppError> {
        let response = self.authorize(request).send().await?;
        Self::parse_response(response).await
    }

    /// Decode a 2xx body as JSON, or turn anything else into an [`AppError`].
    async fn parse_response(response: Response) -> Result<Value, AppError> {
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let body = serde_json::from_str(&text).unwrap_or(Value::Null);
            return Err(AppError::from_response(status.as_u16(), &body));
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }
}
