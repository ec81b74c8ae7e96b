//! HTTP client and remote API contracts for the STYLiSH client.
//!
//! The client consumes four external collaborators, each described by an
//! async trait in [`api`]:
//!
//! - [`ProductApi`]: product pages and marketing campaigns
//! - [`AuthApi`]: token bootstrap, sign-in/up and member profile
//! - [`OrderApi`]: order submission
//! - [`PaymentGateway`]: card-field readiness and payment proof
//!
//! [`HttpStorefrontApi`] implements the first three over the storefront's
//! JSON API using [`FetchClient`].
//!
//! # Example
//!
//! ```rust,no_run
//! use stylish_data::{FetchClient, HttpStorefrontApi, ProductApi};
//! use stylish_commerce::prelude::*;
//!
//! # async fn run() -> Result<(), stylish_data::FetchError> {
//! let client = FetchClient::new().with_base_url("http://localhost:3000/api/1.0");
//! let api = HttpStorefrontApi::new(client);
//!
//! let page = api.fetch_by_category("women", &Cursor::initial()).await?;
//! println!("{} products, last page: {}", page.items.len(), page.is_last());
//! # Ok(())
//! # }
//! ```

pub mod api;
mod error;
mod http;
mod payment;
mod request;
mod response;
mod retry;

pub use api::{AuthApi, Credentials, OrderApi, PaymentGateway, PaymentProof, ProductApi};
pub use error::FetchError;
pub use http::HttpStorefrontApi;
pub use payment::PresetPrimeGateway;
pub use request::{Method, RequestBuilder};
pub use response::Response;
pub use retry::{BackoffStrategy, RetryPolicy};

use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};

/// HTTP client for making outbound requests.
///
/// A thin wrapper around `reqwest` that adds a base URL, default headers and
/// a [`RetryPolicy`] applied to idempotent requests.
#[derive(Debug, Clone)]
pub struct FetchClient {
    http: reqwest::Client,
    base_url: Option<String>,
    default_headers: HashMap<String, String>,
    retry: RetryPolicy,
}

impl Default for FetchClient {
    fn default() -> Self {
        Self::new()
    }
}

impl FetchClient {
    /// Create a new HTTP client.
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: None,
            default_headers: HashMap::new(),
            retry: RetryPolicy::default(),
        }
    }

    /// Create a client whose requests give up after `timeout`.
    pub fn with_timeout(timeout: Duration) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::RequestError(e.to_string()))?;
        Ok(Self {
            http,
            ..Self::new()
        })
    }

    /// Create a client with a base URL that will be prepended to all requests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Add a default header that will be included in all requests.
    pub fn with_default_header(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }

    /// Replace the retry policy.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    /// Create a GET request.
    pub fn get(&self, url: impl Into<String>) -> ClientRequestBuilder {
        self.request(Method::Get, url)
    }

    /// Create a POST request.
    pub fn post(&self, url: impl Into<String>) -> ClientRequestBuilder {
        self.request(Method::Post, url)
    }

    /// Create a request with a custom method.
    pub fn request(&self, method: Method, url: impl Into<String>) -> ClientRequestBuilder {
        let url = url.into();
        let full_url = match &self.base_url {
            Some(base) => {
                if url.starts_with("http://") || url.starts_with("https://") {
                    url
                } else {
                    format!("{}{}", base.trim_end_matches('/'), url)
                }
            }
            None => url,
        };

        let mut builder = RequestBuilder::new(method, full_url);
        for (key, value) in &self.default_headers {
            builder = builder.header(key.clone(), value.clone());
        }

        ClientRequestBuilder {
            http: self.http.clone(),
            retry: self.retry.clone(),
            builder,
        }
    }
}

/// A request builder bound to a client.
#[derive(Debug)]
pub struct ClientRequestBuilder {
    http: reqwest::Client,
    retry: RetryPolicy,
    builder: RequestBuilder,
}

impl ClientRequestBuilder {
    /// Add a header to the request.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.builder = self.builder.header(key, value);
        self
    }

    /// Append a query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.builder = self.builder.query(key, value);
        self
    }

    /// Set the request body as JSON.
    pub fn json<T: serde::Serialize>(mut self, value: &T) -> Result<Self, FetchError> {
        self.builder = self.builder.json(value)?;
        Ok(self)
    }

    /// Add a bearer token authorization header.
    pub fn bearer_auth(mut self, token: impl AsRef<str>) -> Self {
        self.builder = self.builder.bearer_auth(token);
        self
    }

    /// Send the request, retrying transient failures per the client's policy.
    ///
    /// Non-2xx responses are returned as [`FetchError::HttpError`].
    pub async fn send(self) -> Result<Response, FetchError> {
        let mut attempt = 0;
        loop {
            let result = self.send_once().await;
            match result {
                Err(e) if self.retry.should_retry(self.builder.method, &e, attempt) => {
                    let delay = self.retry.backoff.delay_for_attempt(attempt);
                    warn!(
                        method = self.builder.method.as_str(),
                        url = %self.builder.url,
                        attempt = attempt + 1,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "retrying request"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                other => return other,
            }
        }
    }

    async fn send_once(&self) -> Result<Response, FetchError> {
        let req = &self.builder;
        let mut request = self.http.request(req.method.into(), &req.url);

        if !req.query.is_empty() {
            request = request.query(&req.query);
        }
        for (key, value) in &req.headers {
            request = request.header(key.as_str(), value.as_str());
        }
        if let Some(body) = &req.body {
            request = request.body(body.clone());
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_string()))
            .collect();
        let body = response.bytes().await?.to_vec();

        debug!(
            method = req.method.as_str(),
            url = %req.url,
            status,
            bytes = body.len(),
            "request completed"
        );

        Response::new(status, headers, body).error_for_status()
    }
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::api::{AuthApi, Credentials, OrderApi, PaymentGateway, PaymentProof, ProductApi};
    pub use crate::{FetchClient, FetchError, HttpStorefrontApi, Method, PresetPrimeGateway, Response};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_joining() {
        let client = FetchClient::new().with_base_url("http://localhost:3000/api/1.0/");
        let req = client.get("/products/all");
        assert_eq!(req.builder.url(), "http://localhost:3000/api/1.0/products/all");

        let req = client.get("https://other.example.com/x");
        assert_eq!(req.builder.url(), "https://other.example.com/x");
    }

    #[test]
    fn test_default_headers_applied() {
        let client = FetchClient::new().with_default_header("Accept", "application/json");
        let req = client.post("/order/checkout");
        assert_eq!(req.builder.headers.get("Accept").unwrap(), "application/json");
        assert_eq!(req.builder.method(), Method::Post);
    }

    #[tokio::test]
    async fn test_unreachable_host_is_connection_error() {
        let client = FetchClient::with_timeout(Duration::from_secs(2))
            .unwrap()
            .with_base_url("http://127.0.0.1:9")
            .with_retry(RetryPolicy::none());

        let err = client.get("/products/all").send().await.unwrap_err();
        assert!(err.is_transient());
    }
}
