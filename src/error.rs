//! Error types for the Magento API gateway.
//!
//! This module contains error types used for configuration and validation
//! errors. Errors produced while talking to the remote store live in
//! [`crate::clients`].
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Error messages are designed to be clear and actionable.
//!
//! # Example
//!
//! ```rust
//! use magento_api::{AccessToken, ConfigError};
//!
//! let result = AccessToken::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyAccessToken)));
//! ```

use thiserror::Error;

/// Errors that can occur while building a gateway configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Base URL cannot be empty.
    #[error("Base URL cannot be empty. Please provide the address of your Magento store.")]
    EmptyBaseUrl,

    /// Base URL is not an absolute http(s) URL.
    #[error("Invalid base URL '{url}'. Please provide a URL with scheme (e.g., 'https://store.example.com').")]
    InvalidBaseUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// Store code cannot be empty.
    #[error("Store code cannot be empty. Use 'all' or 'default' for the default store view.")]
    EmptyStoreCode,

    /// Store code is not a single path segment.
    #[error("Invalid store code '{code}'. Store codes cannot contain '/' or whitespace.")]
    InvalidStoreCode {
        /// The invalid store code that was provided.
        code: String,
    },

    /// Access token cannot be empty.
    #[error("Access token cannot be empty. Please provide a Magento integration or admin token.")]
    EmptyAccessToken,

    /// Access token contains characters that cannot be sent in a header.
    #[error("Access token contains characters that are not allowed in an HTTP header.")]
    InvalidAccessToken,

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// A timeout environment value is not a whole number of seconds.
    #[error("Invalid timeout '{value}' in {variable}. Expected a whole number of seconds.")]
    InvalidTimeout {
        /// The environment variable the value came from.
        variable: &'static str,
        /// The unparseable value.
        value: String,
    },
}
