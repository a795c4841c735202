//! HTTP client library for making JSON API requests.
//!
//! This library provides a small wrapper around reqwest that attaches a fixed
//! set of default headers to every request, turns non-success status codes
//! into errors and deserializes JSON responses.
//!
//! # Examples
//!
//! ```rust,no_run
//! use ocm_requests::ApiClient;
//!
//! # async fn example() -> ocm_requests::prelude::Result<()> {
//! let client = ApiClient::new("https://api.example.com", &[])?;
//! let data: serde_json::Value = client.get("users").await?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod prelude;

use reqwest::{Method, RequestBuilder, Response, header};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, trace};

use crate::prelude::*;

/// HTTP client for making API requests with JSON support.
#[derive(Debug, Clone)]
pub struct ApiClient {
    url: String,
    client: reqwest::Client,
}

impl ApiClient {
    /// Creates a new API client with the given base URL.
    ///
    /// `headers` are sent with every request on top of the JSON content type.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ocm_requests::ApiClient;
    ///
    /// let client = ApiClient::new(
    ///     "https://api.example.com",
    ///     &[("accept", "application/json".to_string())],
    /// )
    /// .unwrap();
    /// ```
    pub fn new(url: impl Into<String>, headers: &[(&'static str, String)]) -> Result<Self> {
        let mut default_headers = header::HeaderMap::new();
        default_headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        for (name, value) in headers {
            default_headers.insert(*name, header::HeaderValue::from_str(value)?);
        }
        let client = reqwest::ClientBuilder::new()
            .default_headers(default_headers)
            .build()?;
        Ok(Self {
            url: url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Constructs the full URL path for an endpoint.
    fn path(&self, endpoint: &str) -> String {
        format!("{}/{}", self.url, endpoint.trim_start_matches('/'))
    }

    /// Sends a request and fails on any non-success status code.
    async fn send(method: Method, url: String, request: RequestBuilder) -> Result<Response> {
        debug!("{method} {url}");
        let response = request.send().await?;
        let status = response.status();
        trace!("{method} {url} -> {status}");
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(Error::Status {
            method: method.to_string(),
            url,
            status: status.as_u16(),
            body,
        })
    }

    /// Makes a GET request to the specified endpoint and deserializes the response.
    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        self.get_with_query::<T, &str>(endpoint, &[]).await
    }

    /// Makes a GET request with query parameters and deserializes the response.
    pub async fn get_with_query<T, V>(&self, endpoint: &str, params: &[(&str, V)]) -> Result<T>
    where
        T: DeserializeOwned,
        V: Serialize,
    {
        let url = self.path(endpoint);
        let request = self.client.get(&url).query(params);
        let response = Self::send(Method::GET, url, request).await?;
        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Makes a POST request with a JSON body, discarding the response body.
    pub async fn post<B: Serialize>(&self, endpoint: &str, body: &B) -> Result<()> {
        let url = self.path(endpoint);
        let payload = serde_json::to_string(body)?;
        let request = self.client.post(&url).body(payload);
        Self::send(Method::POST, url, request).await?;
        Ok(())
    }
}
