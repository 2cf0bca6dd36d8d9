//! Error types for requests made through the gateway.
//!
//! # Error Handling
//!
//! Every non-2xx response is translated into an [`ApiError`]:
//!
//! - [`ApiError::NotFound`]: the store answered 404
//! - [`ApiError::Api`]: any other non-success status
//! - [`ApiError::MalformedPayload`]: the error body could not be understood
//!   (only when [`strict_error_payloads`](crate::MagentoConfig::strict_error_payloads)
//!   is enabled; otherwise such responses become `NotFound`/`Api` with a
//!   generic message)
//! - [`ApiError::Transport`]: the request never produced a response
//!
//! Every variant carries the [`RecordedRequest`] of the call that failed.
//!
//! # Example
//!
//! ```rust,ignore
//! use magento_api::clients::ApiError;
//!
//! match gateway.get("products/ABC").await {
//!     Ok(response) => println!("Product: {}", response.body),
//!     Err(ApiError::NotFound(e)) => println!("No such product: {}", e.message),
//!     Err(ApiError::Api(e)) => println!("API error {}: {}", e.code, e.message),
//!     Err(e) => println!("Request failed: {e}"),
//! }
//! ```

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::clients::http_request::RecordedRequest;

/// Message used when an error payload cannot be understood.
pub const GENERIC_ERROR_MESSAGE: &str = "Failed access to the remote server";

/// The substitution values Magento sends alongside an error message.
///
/// Object-shaped details are keyed by parameter name (`%name`), list-shaped
/// details are positional (`%1`, `%2`, ...).
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ErrorDetails {
    /// Values keyed by placeholder name.
    Keyed(Map<String, Value>),
    /// Values addressed by 1-based position.
    Positional(Vec<Value>),
}

impl ErrorDetails {
    /// Returns `true` if there are no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Keyed(map) => map.is_empty(),
            Self::Positional(values) => values.is_empty(),
        }
    }

    /// Returns the number of values.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Keyed(map) => map.len(),
            Self::Positional(values) => values.len(),
        }
    }
}

impl Default for ErrorDetails {
    fn default() -> Self {
        Self::Positional(Vec::new())
    }
}

/// Why an error body could not be turned into a message.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum PayloadDefect {
    /// The body is not valid JSON.
    #[error("body is not valid JSON: {0}")]
    NotJson(String),

    /// The body is JSON but not an object.
    #[error("body is not a JSON object")]
    NotAnObject,

    /// The object has no string `message` field.
    #[error("body has no string 'message' field")]
    MissingMessage,
}

/// A non-success response from the Magento REST API.
///
/// The message has its placeholders already substituted.
#[derive(Clone, Debug, Error)]
#[error("{message}")]
pub struct ResponseError {
    /// The human-readable error message.
    pub message: String,
    /// The HTTP status code of the response.
    pub code: u16,
    /// The substitution values sent by the store.
    pub errors: ErrorDetails,
    /// The request that triggered the error.
    pub request: RecordedRequest,
    /// The raw response body.
    pub body: String,
    /// Set when the body could not be parsed and the generic message was used.
    pub payload_defect: Option<PayloadDefect>,
}

/// An error response whose body could not be understood.
///
/// Only produced when strict error payload handling is enabled.
#[derive(Clone, Debug, Error)]
#[error("Malformed error payload (status {code}): {defect}")]
pub struct MalformedPayloadError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// The raw response body.
    pub body: String,
    /// What was wrong with the body.
    pub defect: PayloadDefect,
    /// The request that triggered the error.
    pub request: RecordedRequest,
}

/// Why a request never produced a response.
#[derive(Debug, Error)]
pub enum TransportFailure {
    /// Network, timeout, TLS or client construction error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The configured token cannot be sent as a header.
    #[error("Invalid authorization header: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
}

/// A request that failed before a response was received.
#[derive(Debug, Error)]
#[error("{failure} ({request})")]
pub struct TransportError {
    /// What went wrong.
    #[source]
    pub failure: TransportFailure,
    /// The request that was being sent.
    pub request: RecordedRequest,
}

/// Unified error type for gateway requests.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The store answered 404 Not Found.
    #[error(transparent)]
    NotFound(ResponseError),

    /// The store answered with any other non-success status.
    #[error(transparent)]
    Api(ResponseError),

    /// The error body could not be understood (strict mode only).
    #[error(transparent)]
    MalformedPayload(MalformedPayloadError),

    /// The request never produced a response.
    #[error(transparent)]
    Transport(TransportError),
}

impl ApiError {
    /// Returns the response error for `NotFound` and `Api`.
    #[must_use]
    pub const fn response(&self) -> Option<&ResponseError> {
        match self {
            Self::NotFound(e) | Self::Api(e) => Some(e),
            _ => None,
        }
    }

    /// Returns the HTTP status code, if a response was received.
    #[must_use]
    pub fn code(&self) -> Option<u16> {
        match self {
            Self::NotFound(e) | Self::Api(e) => Some(e.code),
            Self::MalformedPayload(e) => Some(e.code),
            Self::Transport(e) => match &e.failure {
                TransportFailure::Network(err) => err.status().map(|s| s.as_u16()),
                TransportFailure::InvalidHeader(_) => None,
            },
        }
    }

    /// Returns the user-facing message of a response-derived error.
    ///
    /// Malformed payloads report the generic message.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::NotFound(e) | Self::Api(e) => Some(&e.message),
            Self::MalformedPayload(_) => Some(GENERIC_ERROR_MESSAGE),
            _ => None,
        }
    }

    /// Returns the error details of a response-derived error.
    #[must_use]
    pub const fn errors(&self) -> Option<&ErrorDetails> {
        match self {
            Self::NotFound(e) | Self::Api(e) => Some(&e.errors),
            _ => None,
        }
    }

    /// Returns the request that triggered the error.
    #[must_use]
    pub const fn request(&self) -> &RecordedRequest {
        match self {
            Self::NotFound(e) | Self::Api(e) => &e.request,
            Self::MalformedPayload(e) => &e.request,
            Self::Transport(e) => &e.request,
        }
    }

    /// Returns `true` if the store answered 404.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound(_) => true,
            Self::MalformedPayload(e) => e.code == 404,
            _ => false,
        }
    }
}
