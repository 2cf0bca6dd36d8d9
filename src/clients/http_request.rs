//! Request-side types for the Magento gateway.
//!
//! This module provides the HTTP verbs the gateway issues, the tagged
//! [`RequestBody`] callers hand to it, and the [`RecordedRequest`] snapshot
//! attached to every response and response-derived error.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

/// Field stripped from recorded product payloads.
const MEDIA_GALLERY_ENTRIES: &str = "media_gallery_entries";

/// HTTP methods issued by the gateway.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// HTTP GET method for retrieving resources.
    Get,
    /// HTTP POST method for creating resources.
    Post,
    /// HTTP PUT method for updating resources.
    Put,
    /// HTTP DELETE method for removing resources.
    Delete,
}

impl HttpMethod {
    /// Returns the method name as sent on the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Self::GET,
            HttpMethod::Post => Self::POST,
            HttpMethod::Put => Self::PUT,
            HttpMethod::Delete => Self::DELETE,
        }
    }
}

/// A JSON request body.
///
/// Product payloads get their own variant because they are recorded
/// differently: the `product` wrapper is dropped and the (potentially huge)
/// `media_gallery_entries` field is left out of the diagnostic copy. Every
/// other payload is recorded as sent.
///
/// # Example
///
/// ```rust
/// use magento_api::clients::RequestBody;
/// use serde_json::json;
///
/// let body = RequestBody::product(json!({"sku": "ABC", "price": 22.5})).unwrap();
/// assert_eq!(body.to_json(), json!({"product": {"sku": "ABC", "price": 22.5}}));
///
/// let body = RequestBody::from(json!({"quantity": 200}));
/// assert_eq!(body.redacted(), json!({"quantity": 200}));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum RequestBody {
    /// Any JSON payload, sent and recorded verbatim.
    Json(Value),
    /// The fields of a product, sent as `{"product": {...}}`.
    Product(Map<String, Value>),
}

impl RequestBody {
    /// Creates a product body from a JSON object of product fields.
    ///
    /// Returns `None` if `fields` is not a JSON object.
    #[must_use]
    pub fn product(fields: Value) -> Option<Self> {
        match fields {
            Value::Object(map) => Some(Self::Product(map)),
            _ => None,
        }
    }

    /// Returns the payload as sent on the wire.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Json(value) => value.clone(),
            Self::Product(fields) => {
                let mut wrapper = Map::with_capacity(1);
                wrapper.insert("product".to_string(), Value::Object(fields.clone()));
                Value::Object(wrapper)
            }
        }
    }

    /// Returns the copy of the payload kept for diagnostics.
    #[must_use]
    pub fn redacted(&self) -> Value {
        match self {
            Self::Json(value) => value.clone(),
            Self::Product(fields) => Value::Object(
                fields
                    .iter()
                    .filter(|(key, _)| key.as_str() != MEDIA_GALLERY_ENTRIES)
                    .map(|(key, value)| (key.clone(), value.clone()))
                    .collect(),
            ),
        }
    }
}

impl From<Value> for RequestBody {
    fn from(value: Value) -> Self {
        Self::Json(value)
    }
}

/// Snapshot of a request issued by the gateway.
///
/// Every [`ApiResponse`](crate::clients::ApiResponse) and every
/// response-derived [`ApiError`](crate::clients::ApiError) carries the
/// snapshot of the request it belongs to.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RecordedRequest {
    /// The HTTP method.
    pub method: HttpMethod,
    /// The fully-qualified URL.
    pub url: String,
    /// The redacted body, if the request had one.
    pub body: Option<Value>,
    /// When the request was dispatched.
    pub sent_at: DateTime<Utc>,
}

impl RecordedRequest {
    /// Records a request about to be sent.
    #[must_use]
    pub fn new(method: HttpMethod, url: impl Into<String>, body: Option<&RequestBody>) -> Self {
        Self {
            method,
            url: url.into(),
            body: body.map(RequestBody::redacted),
            sent_at: Utc::now(),
        }
    }
}

impl fmt::Display for RecordedRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.url)
    }
}
