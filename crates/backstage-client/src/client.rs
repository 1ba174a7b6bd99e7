//! The configured HTTP client.
//!
//! One `reqwest::Client` pointed at the storefront API's base URL with JSON
//! content negotiation. Failed requests are returned as-is; nothing is retried.

use crate::error::ClientError;
use backstage_core::ApiConfig;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// HTTP client for the storefront API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client from configuration, resolving the base URL.
    pub fn new(config: &ApiConfig) -> Result<Self, ClientError> {
        Self::with_base_url(config.resolve_base_url(), config.timeout_seconds)
    }

    /// Build a client for an explicit base URL.
    pub fn with_base_url(base_url: impl Into<String>, timeout_seconds: u64) -> Result<Self, ClientError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        reqwest::Url::parse(&base_url).map_err(|e| ClientError::InvalidBaseUrl {
            url: base_url.clone(),
            reason: e.to_string(),
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(timeout_seconds))
            .build()?;

        tracing::debug!(base_url = %base_url, "API client configured");

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an API path such as `/orders`.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let builder = self.http.request(method, self.url(path));
        match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str, token: &str) -> Result<T, ClientError> {
        self.send(self.request(Method::GET, path, Some(token))).await
    }

    pub(crate) async fn post<B, T>(&self, path: &str, token: Option<&str>, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(self.request(Method::POST, path, token).json(body)).await
    }

    pub(crate) async fn patch<B, T>(&self, path: &str, token: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(self.request(Method::PATCH, path, Some(token)).json(body)).await
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let url = response.url().to_string();
            let body = response.text().await.unwrap_or_default();
            let error = ClientError::from_response(status.as_u16(), &body);
            tracing::warn!(url = %url, status = status.as_u16(), error = %error, "API request failed");
            return Err(error);
        }

        Ok(response.json::<T>().await?)
    }
}
