//! Successful responses returned by the gateway.

use std::collections::HashMap;

use serde::de::DeserializeOwned;

use crate::clients::http_request::RecordedRequest;

/// A successful (2xx) response from the Magento REST API.
///
/// The gateway does not inspect or transform successful responses: the
/// body is kept exactly as received in [`text`](Self::text), and
/// [`body`](Self::body) holds its JSON parse (or `Null` when the body is
/// empty or not JSON).
#[derive(Clone, Debug)]
pub struct ApiResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers, lowercased (headers may have multiple values).
    pub headers: HashMap<String, Vec<String>>,
    /// The raw response body.
    pub text: String,
    /// The parsed response body.
    pub body: serde_json::Value,
    /// The request this response answers.
    pub request: RecordedRequest,
}

impl ApiResponse {
    /// Creates a new `ApiResponse`, parsing the body as JSON when possible.
    #[must_use]
    pub fn new(
        code: u16,
        headers: HashMap<String, Vec<String>>,
        text: String,
        request: RecordedRequest,
    ) -> Self {
        let body = serde_json::from_str(&text).unwrap_or(serde_json::Value::Null);
        Self {
            code,
            headers,
            text,
            body,
            request,
        }
    }

    /// Deserializes the body into `T`.
    ///
    /// # Errors
    ///
    /// Returns the [`serde_json::Error`] if the body does not match `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.text)
    }

    /// Returns the first value of a header, looked up case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }
}

pub(crate) fn collect_headers(headers: &reqwest::header::HeaderMap) -> HashMap<String, Vec<String>> {
    let mut result: HashMap<String, Vec<String>> = HashMap::new();
    for (name, value) in headers {
        let key = name.as_str().to_lowercase();
        let value = value.to_str().unwrap_or_default().to_string();
        result.entry(key).or_default().push(value);
    }
    result
}
