//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use std::fmt;

/// A validated base URL of a Magento store.
///
/// The URL must be absolute with an `http` or `https` scheme and a host.
/// It is kept as given (apart from surrounding whitespace), so a trailing
/// slash survives until the gateway builds endpoint URLs.
///
/// # Example
///
/// ```rust
/// use magento_api::BaseUrl;
///
/// let url = BaseUrl::new("https://store.example.com/").unwrap();
/// assert_eq!(url.as_ref(), "https://store.example.com/");
/// assert_eq!(url.scheme(), "https");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseUrl {
    url: String,
    scheme_end: usize,
}

impl BaseUrl {
    /// Creates a new validated base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyBaseUrl`] if the URL is blank, or
    /// [`ConfigError::InvalidBaseUrl`] if it lacks an http(s) scheme or host.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let url = url.trim().to_string();

        if url.is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }

        let scheme_end = url
            .find("://")
            .ok_or_else(|| ConfigError::InvalidBaseUrl { url: url.clone() })?;

        let scheme = url[..scheme_end].to_ascii_lowercase();
        if scheme != "http" && scheme != "https" {
            return Err(ConfigError::InvalidBaseUrl { url });
        }

        // Host ends at port, path, query, or end of string
        let remainder = &url[scheme_end + 3..];
        let host_len = remainder.find([':', '/', '?', '#']).unwrap_or(remainder.len());
        if host_len == 0 {
            return Err(ConfigError::InvalidBaseUrl { url });
        }

        Ok(Self { url, scheme_end })
    }

    /// Returns the URL scheme (e.g., "https").
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.url[..self.scheme_end]
    }

    /// Returns the URL with exactly one trailing slash removed, if present.
    #[must_use]
    pub fn without_trailing_slash(&self) -> &str {
        self.url.strip_suffix('/').unwrap_or(&self.url)
    }
}

impl AsRef<str> for BaseUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

/// A validated Magento store view code.
///
/// The code becomes a single path segment of every endpoint URL
/// (`/rest/{store}/V1`), so it must be non-empty and free of `/` and
/// whitespace.
///
/// # Example
///
/// ```rust
/// use magento_api::StoreCode;
///
/// let store = StoreCode::new("default").unwrap();
/// assert_eq!(store.as_ref(), "default");
/// assert!(StoreCode::new("a/b").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreCode(String);

impl StoreCode {
    /// The store code addressing all store views.
    pub const ALL: &'static str = "all";

    /// Creates a new validated store code.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyStoreCode`] if the code is blank, or
    /// [`ConfigError::InvalidStoreCode`] if it contains `/` or whitespace.
    pub fn new(code: impl Into<String>) -> Result<Self, ConfigError> {
        let code = code.into();
        let code = code.trim().to_string();

        if code.is_empty() {
            return Err(ConfigError::EmptyStoreCode);
        }
        if code.chars().any(|c| c == '/' || c.is_whitespace()) {
            return Err(ConfigError::InvalidStoreCode { code });
        }

        Ok(Self(code))
    }

    /// Returns the store code addressing all store views.
    #[must_use]
    pub fn all() -> Self {
        Self(Self::ALL.to_string())
    }
}

impl Default for StoreCode {
    fn default() -> Self {
        Self::all()
    }
}

impl AsRef<str> for StoreCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StoreCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A validated bearer token for the Magento REST API.
///
/// This newtype ensures the token is non-empty and can be sent as an
/// `Authorization` header, and masks its value in debug output to prevent
/// accidental exposure in logs.
///
/// # Example
///
/// ```rust
/// use magento_api::AccessToken;
///
/// let token = AccessToken::new("integration-token").unwrap();
/// assert_eq!(format!("{:?}", token), "AccessToken(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Creates a new validated access token.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyAccessToken`] if the token is empty, or
    /// [`ConfigError::InvalidAccessToken`] if it contains anything other than
    /// visible ASCII characters.
    pub fn new(token: impl Into<String>) -> Result<Self, ConfigError> {
        let token = token.into();
        if token.is_empty() {
            return Err(ConfigError::EmptyAccessToken);
        }
        if !token.chars().all(|c| c.is_ascii_graphic()) {
            return Err(ConfigError::InvalidAccessToken);
        }
        Ok(Self(token))
    }

    /// Returns the value of the `Authorization` header for this token.
    #[must_use]
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl AsRef<str> for AccessToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(*****)")
    }
}
