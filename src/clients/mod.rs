//! Request layer for Magento REST API communication.
//!
//! This module provides the single gateway through which the model and
//! query layers talk to a Magento store. They pass a resource path and an
//! optional payload, and get back either the untouched response or a typed
//! error.
//!
//! # Overview
//!
//! - [`RequestGateway`]: Builds URLs, authenticates and sends requests
//! - [`RequestBody`]: Tagged JSON payloads (product payloads are recorded redacted)
//! - [`RecordedRequest`]: Diagnostic snapshot attached to responses and errors
//! - [`ApiResponse`]: A successful response
//! - [`ApiError`]: Not-found, generic API, malformed payload and transport errors
//!
//! # Example
//!
//! ```rust,ignore
//! use magento_api::clients::{ApiError, RequestGateway};
//!
//! let gateway = RequestGateway::from_env()?;
//!
//! match gateway.delete("products/ABC").await {
//!     Ok(response) => println!("Deleted: {}", response.body),
//!     Err(ApiError::NotFound(e)) => println!("{}", e.message),
//!     Err(e) => return Err(e.into()),
//! }
//! ```
//!
//! # Error Messages
//!
//! Magento returns templated messages such as `"Item %1 not found"` along
//! with the values to fill in. The gateway fills them in before returning
//! the error, see [`substitute_placeholders`].

mod errors;
mod gateway;
mod http_request;
mod http_response;
mod translation;

pub use errors::{
    ApiError, ErrorDetails, MalformedPayloadError, PayloadDefect, ResponseError, TransportError,
    TransportFailure, GENERIC_ERROR_MESSAGE,
};
pub use gateway::{RequestGateway, TransportOptions, SDK_VERSION};
pub use http_request::{HttpMethod, RecordedRequest, RequestBody};
pub use http_response::ApiResponse;
pub use translation::{substitute_placeholders, translate_error, ErrorPayload};
