//! # Magento API Rust
//!
//! A request gateway for the Magento 2 REST API.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`MagentoConfig`] and [`MagentoConfigBuilder`]
//! - Validated newtypes for the store URL, store code and bearer token
//! - A [`RequestGateway`] issuing authenticated GET/PUT/POST/DELETE requests
//!   against `{url}/rest/{store}/V1`
//! - Typed errors with Magento's templated messages already filled in
//! - A [`RecordedRequest`] attached to every response and error for diagnostics
//!
//! Model classes, query building and pagination are left to the caller: they
//! hand the gateway a resource path and a payload.
//!
//! ## Quick Start
//!
//! ```rust
//! use magento_api::{MagentoConfig, BaseUrl, StoreCode, AccessToken, RequestGateway};
//!
//! let config = MagentoConfig::builder()
//!     .url(BaseUrl::new("https://store.example.com").unwrap())
//!     .store(StoreCode::new("default").unwrap())
//!     .token(AccessToken::new("integration-token").unwrap())
//!     .build()
//!     .unwrap();
//!
//! let gateway = RequestGateway::new(config);
//! assert_eq!(
//!     gateway.url("products/22"),
//!     "https://store.example.com/rest/default/V1/products/22"
//! );
//! ```
//!
//! ## Making Requests
//!
//! ```rust,ignore
//! use magento_api::{ApiError, RequestBody, RequestGateway};
//! use serde_json::json;
//!
//! // Configuration from MAGENTO_URL, MAGENTO_TOKEN, MAGENTO_STORE, ...
//! let gateway = RequestGateway::from_env()?;
//!
//! let product = RequestBody::product(json!({"sku": "ABC", "name": "Shirt", "price": 22.5}))
//!     .unwrap();
//! let response = gateway.post("products", product).await?;
//!
//! match gateway.get("products/MISSING").await {
//!     Err(ApiError::NotFound(e)) => {
//!         // e.g. "The product that was requested doesn't exist."
//!         println!("{} ({})", e.message, e.request);
//!     }
//!     other => { /* ... */ }
//! }
//! ```
//!
//! ## Self-Signed Certificates
//!
//! Development stores often run with self-signed certificates. Setting
//! `MAGENTO_ALLOW_SELF_SIGNED_SSL_CERT_ENABLED=true` (or
//! [`MagentoConfigBuilder::allow_self_signed_certs`]) disables certificate
//! verification for every request made by the gateway: each verb builds its
//! client from [`RequestGateway::transport_options`].
//!
//! Redirects are never followed; a 3xx answer is returned as [`ApiError::Api`].
//!
//! ## Design Principles
//!
//! - **No hidden global state**: the environment is read once, into a [`MagentoConfig`]
//! - **Fail-fast validation**: All newtypes validate on construction
//! - **Thread-safe**: All types are `Send + Sync`
//! - **Call-scoped diagnostics**: the recorded request travels with each result

pub mod clients;
pub mod config;
pub mod error;

// Re-export public types at crate root for convenience
pub use config::{AccessToken, BaseUrl, MagentoConfig, MagentoConfigBuilder, StoreCode};
pub use error::ConfigError;

pub use clients::{
    ApiError, ApiResponse, ErrorDetails, HttpMethod, MalformedPayloadError, PayloadDefect,
    RecordedRequest, RequestBody, RequestGateway, ResponseError, TransportError, TransportFailure,
};
