//! Translation of Magento error responses into [`ApiError`]s.
//!
//! Magento reports errors as a template message plus the values to fill into
//! it:
//!
//! ```json
//! {"message": "Invalid %field", "errors": {"field": "price"}}
//! {"message": "Item %1 not found", "parameters": ["SKU123"]}
//! ```
//!
//! The template is resolved here so callers only ever see the final message.

use serde_json::Value;

use crate::clients::errors::{
    ApiError, ErrorDetails, MalformedPayloadError, PayloadDefect, ResponseError,
    GENERIC_ERROR_MESSAGE,
};
use crate::clients::http_request::RecordedRequest;

/// A parsed Magento error body.
#[derive(Clone, Debug, PartialEq)]
pub struct ErrorPayload {
    /// The template message.
    pub message: String,
    /// The substitution values.
    pub errors: ErrorDetails,
}

impl ErrorPayload {
    /// Parses an error body.
    ///
    /// The values come from `errors`, or from `parameters` when `errors` is
    /// absent or null. Values that are neither an object nor an array are
    /// ignored.
    ///
    /// # Errors
    ///
    /// Returns the [`PayloadDefect`] when the body is not a JSON object with
    /// a string `message`.
    pub fn parse(body: &str) -> Result<Self, PayloadDefect> {
        let value: Value =
            serde_json::from_str(body).map_err(|e| PayloadDefect::NotJson(e.to_string()))?;
        let Value::Object(mut object) = value else {
            return Err(PayloadDefect::NotAnObject);
        };

        let message = match object.remove("message") {
            Some(Value::String(message)) => message,
            _ => return Err(PayloadDefect::MissingMessage),
        };

        let details = match object.remove("errors") {
            Some(Value::Null) | None => object.remove("parameters"),
            errors => errors,
        };
        let errors = match details {
            Some(Value::Object(map)) => ErrorDetails::Keyed(map),
            Some(Value::Array(values)) => ErrorDetails::Positional(values),
            _ => ErrorDetails::default(),
        };

        Ok(Self { message, errors })
    }

    /// Returns the message with its placeholders filled in.
    #[must_use]
    pub fn resolved_message(&self) -> String {
        substitute_placeholders(&self.message, &self.errors)
    }
}

/// Fills `%name` / `%N` placeholders in `message` from `details`.
///
/// Keyed details replace `%key`, positional details replace `%1`, `%2`, ...
/// Every occurrence is replaced. Where placeholders share a prefix (`%1` and
/// `%10`) the longest one wins. Inserted values are not scanned again.
/// String values are inserted without quotes and `null` as an empty string.
///
/// # Example
///
/// ```rust
/// use magento_api::clients::{substitute_placeholders, ErrorDetails};
/// use serde_json::json;
///
/// let details = ErrorDetails::Positional(vec![json!("SKU123")]);
/// assert_eq!(
///     substitute_placeholders("Item %1 not found", &details),
///     "Item SKU123 not found"
/// );
/// ```
#[must_use]
pub fn substitute_placeholders(message: &str, details: &ErrorDetails) -> String {
    let mut placeholders: Vec<(String, String)> = match details {
        ErrorDetails::Keyed(map) => map
            .iter()
            .filter(|(key, _)| !key.is_empty())
            .map(|(key, value)| (format!("%{key}"), display_value(value)))
            .collect(),
        ErrorDetails::Positional(values) => values
            .iter()
            .enumerate()
            .map(|(index, value)| (format!("%{}", index + 1), display_value(value)))
            .collect(),
    };
    if placeholders.is_empty() {
        return message.to_string();
    }
    placeholders.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

    let mut resolved = String::with_capacity(message.len());
    let mut rest = message;
    while let Some(pos) = rest.find('%') {
        resolved.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        if let Some((placeholder, value)) = placeholders
            .iter()
            .find(|(placeholder, _)| tail.starts_with(placeholder.as_str()))
        {
            resolved.push_str(value);
            rest = &tail[placeholder.len()..];
        } else {
            resolved.push('%');
            rest = &tail[1..];
        }
    }
    resolved.push_str(rest);
    resolved
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Translates a non-success response into an [`ApiError`].
///
/// 404 becomes [`ApiError::NotFound`], every other status [`ApiError::Api`].
/// A body that cannot be parsed yields [`GENERIC_ERROR_MESSAGE`] with empty
/// details, or [`ApiError::MalformedPayload`] when `strict` is set.
#[must_use]
pub fn translate_error(code: u16, body: String, request: RecordedRequest, strict: bool) -> ApiError {
    let (message, errors, payload_defect) = match ErrorPayload::parse(&body) {
        Ok(payload) => (payload.resolved_message(), payload.errors, None),
        Err(defect) if strict => {
            return ApiError::MalformedPayload(MalformedPayloadError {
                code,
                body,
                defect,
                request,
            });
        }
        Err(defect) => {
            tracing::warn!(
                "Could not parse error response to {} (status {}): {}",
                request,
                code,
                defect
            );
            (
                GENERIC_ERROR_MESSAGE.to_string(),
                ErrorDetails::default(),
                Some(defect),
            )
        }
    };

    let error = ResponseError {
        message,
        code,
        errors,
        request,
        body,
        payload_defect,
    };

    if code == 404 {
        ApiError::NotFound(error)
    } else {
        ApiError::Api(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::HttpMethod;
    use serde_json::json;

    fn request() -> RecordedRequest {
        RecordedRequest::new(
            HttpMethod::Get,
            "https://site.com.br/rest/magento-store/V1/products/SKU123",
            None,
        )
    }

    fn keyed(value: Value) -> ErrorDetails {
        match value {
            Value::Object(map) => ErrorDetails::Keyed(map),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_parse_prefers_errors_over_parameters() {
        let payload = ErrorPayload::parse(
            r#"{"message":"Invalid %field","errors":{"field":"price"},"parameters":["x"]}"#,
        )
        .unwrap();
        assert_eq!(payload.errors, keyed(json!({"field": "price"})));
    }

    #[test]
    fn test_parse_falls_back_to_parameters() {
        let payload =
            ErrorPayload::parse(r#"{"message":"Item %1 not found","parameters":["SKU123"]}"#)
                .unwrap();
        assert_eq!(payload.errors, ErrorDetails::Positional(vec![json!("SKU123")]));

        let payload = ErrorPayload::parse(
            r#"{"message":"Item %1 not found","errors":null,"parameters":["SKU123"]}"#,
        )
        .unwrap();
        assert_eq!(payload.errors, ErrorDetails::Positional(vec![json!("SKU123")]));
    }

    #[test]
    fn test_parse_without_details() {
        let payload = ErrorPayload::parse(r#"{"message":"Consumer is not authorized"}"#).unwrap();
        assert_eq!(payload.message, "Consumer is not authorized");
        assert!(payload.errors.is_empty());
    }

    #[test]
    fn test_parse_defects() {
        assert!(matches!(
            ErrorPayload::parse("<html>oops</html>"),
            Err(PayloadDefect::NotJson(_))
        ));
        assert!(matches!(
            ErrorPayload::parse(""),
            Err(PayloadDefect::NotJson(_))
        ));
        assert_eq!(
            ErrorPayload::parse(r#"["message"]"#),
            Err(PayloadDefect::NotAnObject)
        );
        assert_eq!(
            ErrorPayload::parse(r#"{"errors":{"a":"b"}}"#),
            Err(PayloadDefect::MissingMessage)
        );
        assert_eq!(
            ErrorPayload::parse(r#"{"message":42}"#),
            Err(PayloadDefect::MissingMessage)
        );
    }

    #[test]
    fn test_substitute_keyed_placeholders() {
        let details = keyed(json!({"field": "price", "value": -1}));
        assert_eq!(
            substitute_placeholders("Invalid %field: %value", &details),
            "Invalid price: -1"
        );
    }

    #[test]
    fn test_substitute_positional_placeholders() {
        let details = ErrorDetails::Positional(vec![json!("sku"), json!(3)]);
        assert_eq!(
            substitute_placeholders("\"%1\" is required. Enter and try again. (%2)", &details),
            "\"sku\" is required. Enter and try again. (3)"
        );
    }

    #[test]
    fn test_substitute_replaces_every_occurrence() {
        let details = ErrorDetails::Positional(vec![json!("A")]);
        assert_eq!(substitute_placeholders("%1 and %1", &details), "A and A");
    }

    #[test]
    fn test_substitute_prefers_longest_placeholder() {
        let values: Vec<Value> = (1..=10).map(|i| json!(format!("v{i}"))).collect();
        let details = ErrorDetails::Positional(values);
        assert_eq!(substitute_placeholders("%10 %1", &details), "v10 v1");

        let details = keyed(json!({"id": "7", "identifier": "abc"}));
        assert_eq!(
            substitute_placeholders("%identifier/%id", &details),
            "abc/7"
        );
    }

    #[test]
    fn test_substitute_does_not_rescan_inserted_values() {
        let details = ErrorDetails::Positional(vec![json!("%2"), json!("x")]);
        assert_eq!(substitute_placeholders("%1-%2", &details), "%2-x");
    }

    #[test]
    fn test_substitute_leaves_unknown_placeholders() {
        let details = ErrorDetails::Positional(vec![json!("A")]);
        assert_eq!(substitute_placeholders("100% of %1 and %3", &details), "100% of A and %3");
        assert_eq!(
            substitute_placeholders("nothing %1", &ErrorDetails::default()),
            "nothing %1"
        );
    }

    #[test]
    fn test_translate_not_found_with_parameters() {
        let error = translate_error(
            404,
            r#"{"message":"Item %1 not found","parameters":["SKU123"]}"#.to_string(),
            request(),
            false,
        );

        match error {
            ApiError::NotFound(e) => {
                assert_eq!(e.message, "Item SKU123 not found");
                assert_eq!(e.code, 404);
                assert_eq!(e.errors, ErrorDetails::Positional(vec![json!("SKU123")]));
                assert_eq!(e.request.url, request().url);
                assert!(e.payload_defect.is_none());
            }
            other => panic!("Expected NotFound, got: {other:?}"),
        }
    }

    #[test]
    fn test_translate_generic_error_with_keyed_errors() {
        let error = translate_error(
            422,
            r#"{"message":"Invalid %field","errors":{"field":"price"}}"#.to_string(),
            request(),
            false,
        );

        match error {
            ApiError::Api(e) => {
                assert_eq!(e.message, "Invalid price");
                assert_eq!(e.code, 422);
                assert_eq!(e.errors, keyed(json!({"field": "price"})));
            }
            other => panic!("Expected Api, got: {other:?}"),
        }
    }

    #[test]
    fn test_translate_unparseable_body_falls_back_to_generic_message() {
        let error = translate_error(500, "Internal Server Error".to_string(), request(), false);

        match error {
            ApiError::Api(e) => {
                assert_eq!(e.message, "Failed access to the remote server");
                assert_eq!(e.code, 500);
                assert!(e.errors.is_empty());
                assert_eq!(e.body, "Internal Server Error");
                assert!(matches!(e.payload_defect, Some(PayloadDefect::NotJson(_))));
            }
            other => panic!("Expected Api, got: {other:?}"),
        }
    }

    #[test]
    fn test_translate_unparseable_not_found_keeps_classification() {
        let error = translate_error(404, String::new(), request(), false);
        assert!(matches!(error, ApiError::NotFound(_)));
        assert_eq!(error.message(), Some(GENERIC_ERROR_MESSAGE));
    }

    #[test]
    fn test_translate_strict_mode_reports_malformed_payload() {
        let error = translate_error(500, r#"{"error":"boom"}"#.to_string(), request(), true);

        match error {
            ApiError::MalformedPayload(e) => {
                assert_eq!(e.code, 500);
                assert_eq!(e.body, r#"{"error":"boom"}"#);
                assert_eq!(e.defect, PayloadDefect::MissingMessage);
            }
            other => panic!("Expected MalformedPayload, got: {other:?}"),
        }
    }

    #[test]
    fn test_translate_strict_mode_still_parses_well_formed_bodies() {
        let error = translate_error(
            400,
            r#"{"message":"Invalid %field","errors":{"field":"price"}}"#.to_string(),
            request(),
            true,
        );
        assert!(matches!(error, ApiError::Api(_)));
        assert_eq!(error.message(), Some("Invalid price"));
    }
}
