//! Request gateway for the Magento REST API.
//!
//! This module provides the [`RequestGateway`] type through which every
//! request to the store is made.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::StatusCode;

use crate::clients::errors::{ApiError, TransportError, TransportFailure};
use crate::clients::http_request::{HttpMethod, RecordedRequest, RequestBody};
use crate::clients::http_response::{collect_headers, ApiResponse};
use crate::clients::translation::translate_error;
use crate::config::{AccessToken, MagentoConfig};
use crate::error::ConfigError;

/// Crate version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Options every request is sent with.
///
/// Derived from the configuration on each call; see
/// [`RequestGateway::transport_options`]. Every verb builds its client from
/// these options, so `accept_invalid_certs` applies to GET, PUT, POST and
/// DELETE alike.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransportOptions {
    /// The bearer token sent in the `Authorization` header.
    pub token: AccessToken,
    /// Time allowed to establish a connection.
    pub connect_timeout: Duration,
    /// Time allowed between reads of the response.
    pub read_timeout: Duration,
    /// Whether certificate verification is disabled (self-signed stores).
    pub accept_invalid_certs: bool,
}

impl TransportOptions {
    /// Builds an authenticated HTTP client with these options.
    ///
    /// Redirects are not followed: a 3xx answer is handed back as is and
    /// becomes an error like any other non-success status.
    ///
    /// # Errors
    ///
    /// Returns [`TransportFailure::InvalidHeader`] if the token cannot be sent
    /// as a header, or [`TransportFailure::Network`] if the client cannot be
    /// built.
    pub fn build_client(&self) -> Result<reqwest::Client, TransportFailure> {
        let mut authorization = HeaderValue::from_str(&self.token.bearer())?;
        authorization.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, authorization);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .user_agent(format!("Magento API Library v{SDK_VERSION} | Rust"))
            .default_headers(headers)
            .connect_timeout(self.connect_timeout)
            .read_timeout(self.read_timeout)
            .danger_accept_invalid_certs(self.accept_invalid_certs)
            .redirect(reqwest::redirect::Policy::none())
            .build()?;

        Ok(client)
    }
}

/// Gateway for all requests to a Magento store's REST API.
///
/// The gateway:
/// - Builds endpoint URLs as `{url}/rest/{store}/V1/{resource}`
/// - Authenticates every request with the configured bearer token
/// - Disables certificate verification when the configuration allows
///   self-signed certificates
/// - Attaches a [`RecordedRequest`] to every response and error
/// - Translates non-success responses into [`ApiError`]s
///
/// A fresh HTTP client is built for every call; nothing is retried.
///
/// # Thread Safety
///
/// `RequestGateway` only holds immutable configuration and is `Send + Sync`.
/// Concurrent calls do not share any per-request state.
///
/// # Example
///
/// ```rust,ignore
/// use magento_api::{MagentoConfig, RequestGateway, RequestBody};
/// use serde_json::json;
///
/// let gateway = RequestGateway::new(MagentoConfig::from_env()?);
///
/// let response = gateway.get("products/ABC").await?;
/// println!("{}", response.body["name"]);
///
/// let body = RequestBody::product(json!({"sku": "ABC", "price": 22.5})).unwrap();
/// gateway.put("products/ABC", body).await?;
/// ```
#[derive(Clone, Debug)]
pub struct RequestGateway {
    config: MagentoConfig,
}

// Verify RequestGateway is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RequestGateway>();
};

impl RequestGateway {
    /// Creates a gateway for the given configuration.
    #[must_use]
    pub const fn new(config: MagentoConfig) -> Self {
        Self { config }
    }

    /// Creates a gateway using the default configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the environment does not hold a valid
    /// configuration (see [`MagentoConfig::from_env`]).
    pub fn from_env() -> Result<Self, ConfigError> {
        MagentoConfig::from_env().map(Self::new)
    }

    /// Returns the configuration of this gateway.
    #[must_use]
    pub const fn config(&self) -> &MagentoConfig {
        &self.config
    }

    /// Returns the versioned REST root, `{url}/rest/{store}/V1`.
    ///
    /// One trailing slash on the configured URL is dropped.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!(
            "{}/rest/{}/V1",
            self.config.url().without_trailing_slash(),
            self.config.store()
        )
    }

    /// Returns the URL of a resource path such as `products/22`.
    #[must_use]
    pub fn url(&self, resource: &str) -> String {
        format!("{}/{resource}", self.base_url())
    }

    /// Returns the options the next request will be sent with.
    ///
    /// Called once per request by every verb; configuration changes between
    /// calls are picked up by the next call.
    #[must_use]
    pub fn transport_options(&self) -> TransportOptions {
        TransportOptions {
            token: self.config.token().clone(),
            connect_timeout: self.config.connect_timeout(),
            read_timeout: self.config.read_timeout(),
            accept_invalid_certs: self.config.allow_self_signed_certs(),
        }
    }

    /// Sends a GET request for a resource.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] for transport failures and non-success responses.
    pub async fn get(&self, resource: &str) -> Result<ApiResponse, ApiError> {
        self.dispatch(HttpMethod::Get, self.url(resource), None)
            .await
    }

    /// Sends a PUT request with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] for transport failures and non-success responses.
    pub async fn put(
        &self,
        resource: &str,
        body: impl Into<RequestBody> + Send,
    ) -> Result<ApiResponse, ApiError> {
        self.dispatch(HttpMethod::Put, self.url(resource), Some(body.into()))
            .await
    }

    /// Sends a POST request with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] for transport failures and non-success responses.
    pub async fn post(
        &self,
        resource: &str,
        body: impl Into<RequestBody> + Send,
    ) -> Result<ApiResponse, ApiError> {
        self.dispatch(HttpMethod::Post, self.url(resource), Some(body.into()))
            .await
    }

    /// Sends a POST request without a body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] for transport failures and non-success responses.
    pub async fn post_empty(&self, resource: &str) -> Result<ApiResponse, ApiError> {
        self.dispatch(HttpMethod::Post, self.url(resource), None)
            .await
    }

    /// Sends a POST request with a JSON body to a fully-qualified URL.
    ///
    /// Used for absolute links issued by the store; no URL is built.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] for transport failures and non-success responses.
    pub async fn post_absolute(
        &self,
        url: &str,
        body: impl Into<RequestBody> + Send,
    ) -> Result<ApiResponse, ApiError> {
        self.dispatch(HttpMethod::Post, url.to_string(), Some(body.into()))
            .await
    }

    /// Sends a POST request without a body to a fully-qualified URL.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] for transport failures and non-success responses.
    pub async fn post_absolute_empty(&self, url: &str) -> Result<ApiResponse, ApiError> {
        self.dispatch(HttpMethod::Post, url.to_string(), None).await
    }

    /// Sends a DELETE request for a resource.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] for transport failures and non-success responses.
    pub async fn delete(&self, resource: &str) -> Result<ApiResponse, ApiError> {
        self.dispatch(HttpMethod::Delete, self.url(resource), None)
            .await
    }

    async fn dispatch(
        &self,
        method: HttpMethod,
        url: String,
        body: Option<RequestBody>,
    ) -> Result<ApiResponse, ApiError> {
        let request = RecordedRequest::new(method, url.as_str(), body.as_ref());
        tracing::debug!("Sending {} request to {}", method, url);

        let (status, headers, text) = match self.send(method, &url, body.as_ref()).await {
            Ok(received) => received,
            Err(failure) => {
                return Err(ApiError::Transport(TransportError { failure, request }));
            }
        };
        let code = status.as_u16();

        if !status.is_success() {
            return Err(translate_error(
                code,
                text,
                request,
                self.config.strict_error_payloads(),
            ));
        }

        Ok(ApiResponse::new(code, headers, text, request))
    }

    async fn send(
        &self,
        method: HttpMethod,
        url: &str,
        body: Option<&RequestBody>,
    ) -> Result<(StatusCode, HashMap<String, Vec<String>>, String), TransportFailure> {
        let client = self.transport_options().build_client()?;
        let mut builder = client.request(method.into(), url);
        if let Some(body) = body {
            builder = builder.json(&body.to_json());
        }

        let res = builder.send().await?;

        let status = res.status();
        let headers = collect_headers(res.headers());
        let text = match res.text().await {
            Ok(text) => text,
            // An unreadable error body is treated like an unparseable one
            Err(e) if !status.is_success() => {
                tracing::warn!("Could not read error response body from {}: {}", url, e);
                String::new()
            }
            Err(e) => return Err(e.into()),
        };

        Ok((status, headers, text))
    }
}
