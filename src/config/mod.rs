//! Configuration types for the Magento API gateway.
//!
//! This module provides the configuration consumed by
//! [`RequestGateway`](crate::clients::RequestGateway). The gateway only reads
//! it; validation happens here, when the configuration is built.
//!
//! # Overview
//!
//! - [`MagentoConfig`]: The configuration struct holding all gateway settings
//! - [`MagentoConfigBuilder`]: A builder for constructing [`MagentoConfig`] instances
//! - [`BaseUrl`]: A validated store base URL
//! - [`StoreCode`]: A validated store view code
//! - [`AccessToken`]: A validated bearer token with masked debug output
//!
//! # Example
//!
//! ```rust
//! use magento_api::{MagentoConfig, BaseUrl, StoreCode, AccessToken};
//! use std::time::Duration;
//!
//! let config = MagentoConfig::builder()
//!     .url(BaseUrl::new("https://store.example.com").unwrap())
//!     .store(StoreCode::new("default").unwrap())
//!     .token(AccessToken::new("integration-token").unwrap())
//!     .connect_timeout(Duration::from_secs(10))
//!     .build()
//!     .unwrap();
//! ```
//!
//! # Environment
//!
//! [`MagentoConfig::from_env`] builds the default configuration from
//! `MAGENTO_URL`, `MAGENTO_TOKEN`, `MAGENTO_STORE`, `MAGENTO_TIMEOUT`,
//! `MAGENTO_OPEN_TIMEOUT` and `MAGENTO_ALLOW_SELF_SIGNED_SSL_CERT_ENABLED`.

mod newtypes;

pub use newtypes::{AccessToken, BaseUrl, StoreCode};

use std::time::Duration;

use crate::error::ConfigError;

/// Environment variable holding the store base URL.
pub const URL_ENV_VAR: &str = "MAGENTO_URL";
/// Environment variable holding the bearer token.
pub const TOKEN_ENV_VAR: &str = "MAGENTO_TOKEN";
/// Environment variable holding the store view code.
pub const STORE_ENV_VAR: &str = "MAGENTO_STORE";
/// Environment variable holding the connect timeout in seconds.
pub const TIMEOUT_ENV_VAR: &str = "MAGENTO_TIMEOUT";
/// Environment variable holding the read timeout in seconds.
pub const OPEN_TIMEOUT_ENV_VAR: &str = "MAGENTO_OPEN_TIMEOUT";
/// Environment variable enabling requests to stores with self-signed certificates.
pub const ALLOW_SELF_SIGNED_SSL_CERTS_ENV_VAR: &str = "MAGENTO_ALLOW_SELF_SIGNED_SSL_CERT_ENABLED";

/// Default connect timeout.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(30);
/// Default read timeout.
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(5);

/// Configuration for the Magento request gateway.
///
/// # Thread Safety
///
/// `MagentoConfig` is `Clone`, `Send`, and `Sync`, making it safe to share
/// across threads and async tasks.
///
/// # Example
///
/// ```rust
/// use magento_api::{MagentoConfig, BaseUrl, AccessToken};
///
/// let config = MagentoConfig::builder()
///     .url(BaseUrl::new("https://store.example.com").unwrap())
///     .token(AccessToken::new("token").unwrap())
///     .allow_self_signed_certs(true)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.store().as_ref(), "all");
/// assert!(config.allow_self_signed_certs());
/// ```
#[derive(Clone, Debug)]
pub struct MagentoConfig {
    url: BaseUrl,
    store: StoreCode,
    token: AccessToken,
    connect_timeout: Duration,
    read_timeout: Duration,
    allow_self_signed_certs: bool,
    strict_error_payloads: bool,
}

impl MagentoConfig {
    /// Creates a new builder for constructing a `MagentoConfig`.
    #[must_use]
    pub fn builder() -> MagentoConfigBuilder {
        MagentoConfigBuilder::new()
    }

    /// Builds the default configuration from the process environment.
    ///
    /// The environment is read once; later changes to it do not affect the
    /// returned configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `MAGENTO_URL` or `MAGENTO_TOKEN` is unset
    /// or any value fails validation.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_with(|name| std::env::var(name).ok())
    }

    /// Builds a configuration from an arbitrary variable lookup.
    ///
    /// Same rules as [`from_env`](Self::from_env), with `lookup` standing in
    /// for the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a required variable is missing or any value
    /// fails validation.
    ///
    /// # Example
    ///
    /// ```rust
    /// use magento_api::MagentoConfig;
    ///
    /// let config = MagentoConfig::from_env_with(|name| match name {
    ///     "MAGENTO_URL" => Some("https://store.example.com".to_string()),
    ///     "MAGENTO_TOKEN" => Some("token".to_string()),
    ///     _ => None,
    /// })
    /// .unwrap();
    ///
    /// assert_eq!(config.store().as_ref(), "all");
    /// ```
    pub fn from_env_with<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup(URL_ENV_VAR).ok_or(ConfigError::MissingRequiredField { field: "url" })?;
        let token =
            lookup(TOKEN_ENV_VAR).ok_or(ConfigError::MissingRequiredField { field: "token" })?;

        let mut builder = Self::builder()
            .url(BaseUrl::new(url)?)
            .token(AccessToken::new(token)?)
            .allow_self_signed_certs(is_enabled_flag(
                lookup(ALLOW_SELF_SIGNED_SSL_CERTS_ENV_VAR).as_deref(),
            ));

        if let Some(store) = lookup(STORE_ENV_VAR) {
            builder = builder.store(StoreCode::new(store)?);
        }
        if let Some(value) = lookup(TIMEOUT_ENV_VAR) {
            builder = builder.connect_timeout(parse_seconds(TIMEOUT_ENV_VAR, &value)?);
        }
        if let Some(value) = lookup(OPEN_TIMEOUT_ENV_VAR) {
            builder = builder.read_timeout(parse_seconds(OPEN_TIMEOUT_ENV_VAR, &value)?);
        }

        builder.build()
    }

    /// Returns the store base URL.
    #[must_use]
    pub const fn url(&self) -> &BaseUrl {
        &self.url
    }

    /// Returns the store view code.
    #[must_use]
    pub const fn store(&self) -> &StoreCode {
        &self.store
    }

    /// Returns the bearer token.
    #[must_use]
    pub const fn token(&self) -> &AccessToken {
        &self.token
    }

    /// Returns the connect timeout.
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    /// Returns the read timeout.
    #[must_use]
    pub const fn read_timeout(&self) -> Duration {
        self.read_timeout
    }

    /// Returns whether certificate verification is disabled for requests.
    #[must_use]
    pub const fn allow_self_signed_certs(&self) -> bool {
        self.allow_self_signed_certs
    }

    /// Returns whether unparseable error payloads surface as
    /// [`ApiError::MalformedPayload`](crate::clients::ApiError::MalformedPayload)
    /// instead of the generic fallback message.
    #[must_use]
    pub const fn strict_error_payloads(&self) -> bool {
        self.strict_error_payloads
    }
}

// Verify MagentoConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<MagentoConfig>();
};

/// Builder for constructing [`MagentoConfig`] instances.
///
/// Required fields are `url` and `token`.
///
/// # Defaults
///
/// - `store`: `all`
/// - `connect_timeout`: 30 seconds
/// - `read_timeout`: 5 seconds
/// - `allow_self_signed_certs`: `false`
/// - `strict_error_payloads`: `false`
#[derive(Debug, Default)]
pub struct MagentoConfigBuilder {
    url: Option<BaseUrl>,
    store: Option<StoreCode>,
    token: Option<AccessToken>,
    connect_timeout: Option<Duration>,
    read_timeout: Option<Duration>,
    allow_self_signed_certs: bool,
    strict_error_payloads: bool,
}

impl MagentoConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the store base URL (required).
    #[must_use]
    pub fn url(mut self, url: BaseUrl) -> Self {
        self.url = Some(url);
        self
    }

    /// Sets the store view code.
    #[must_use]
    pub fn store(mut self, store: StoreCode) -> Self {
        self.store = Some(store);
        self
    }

    /// Sets the bearer token (required).
    #[must_use]
    pub fn token(mut self, token: AccessToken) -> Self {
        self.token = Some(token);
        self
    }

    /// Sets the connect timeout.
    #[must_use]
    pub const fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets the read timeout.
    #[must_use]
    pub const fn read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = Some(timeout);
        self
    }

    /// Disables certificate verification on every request when `true`.
    ///
    /// Only meant for development stores running with self-signed
    /// certificates.
    #[must_use]
    pub const fn allow_self_signed_certs(mut self, allow: bool) -> Self {
        self.allow_self_signed_certs = allow;
        self
    }

    /// Reports unparseable error payloads as a distinct error kind when `true`.
    #[must_use]
    pub const fn strict_error_payloads(mut self, strict: bool) -> Self {
        self.strict_error_payloads = strict;
        self
    }

    /// Builds the [`MagentoConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `url` or `token` are
    /// not set.
    pub fn build(self) -> Result<MagentoConfig, ConfigError> {
        let url = self
            .url
            .ok_or(ConfigError::MissingRequiredField { field: "url" })?;
        let token = self
            .token
            .ok_or(ConfigError::MissingRequiredField { field: "token" })?;

        Ok(MagentoConfig {
            url,
            store: self.store.unwrap_or_default(),
            token,
            connect_timeout: self.connect_timeout.unwrap_or(DEFAULT_CONNECT_TIMEOUT),
            read_timeout: self.read_timeout.unwrap_or(DEFAULT_READ_TIMEOUT),
            allow_self_signed_certs: self.allow_self_signed_certs,
            strict_error_payloads: self.strict_error_payloads,
        })
    }
}

/// Only the literal `true`, in any case, enables a flag.
fn is_enabled_flag(value: Option<&str>) -> bool {
    value.is_some_and(|v| v.eq_ignore_ascii_case("true"))
}

fn parse_seconds(variable: &'static str, value: &str) -> Result<Duration, ConfigError> {
    value
        .trim()
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|_| ConfigError::InvalidTimeout {
            variable,
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    fn minimal_builder() -> MagentoConfigBuilder {
        MagentoConfig::builder()
            .url(BaseUrl::new("https://site.com.br").unwrap())
            .token(AccessToken::new("magento-token").unwrap())
    }

    #[test]
    fn test_builder_requires_url() {
        let result = MagentoConfigBuilder::new()
            .token(AccessToken::new("token").unwrap())
            .build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField { field: "url" })
        ));
    }

    #[test]
    fn test_builder_requires_token() {
        let result = MagentoConfigBuilder::new()
            .url(BaseUrl::new("https://site.com.br").unwrap())
            .build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField { field: "token" })
        ));
    }

    #[test]
    fn test_builder_provides_sensible_defaults() {
        let config = minimal_builder().build().unwrap();

        assert_eq!(config.store().as_ref(), "all");
        assert_eq!(config.connect_timeout(), Duration::from_secs(30));
        assert_eq!(config.read_timeout(), Duration::from_secs(5));
        assert!(!config.allow_self_signed_certs());
        assert!(!config.strict_error_payloads());
    }

    #[test]
    fn test_builder_with_all_optional_fields() {
        let config = minimal_builder()
            .store(StoreCode::new("magento-store").unwrap())
            .connect_timeout(Duration::from_secs(10))
            .read_timeout(Duration::from_secs(2))
            .allow_self_signed_certs(true)
            .strict_error_payloads(true)
            .build()
            .unwrap();

        assert_eq!(config.store().as_ref(), "magento-store");
        assert_eq!(config.connect_timeout(), Duration::from_secs(10));
        assert_eq!(config.read_timeout(), Duration::from_secs(2));
        assert!(config.allow_self_signed_certs());
        assert!(config.strict_error_payloads());
    }

    #[test]
    fn test_config_debug_masks_token() {
        let config = minimal_builder().build().unwrap();
        let debug_str = format!("{:?}", config);
        assert!(debug_str.contains("MagentoConfig"));
        assert!(!debug_str.contains("magento-token"));
    }

    #[test]
    fn test_from_env_reads_all_variables() {
        let config = MagentoConfig::from_env_with(env(&[
            ("MAGENTO_URL", "https://site.com.br/"),
            ("MAGENTO_TOKEN", "magento-token"),
            ("MAGENTO_STORE", "magento-store"),
            ("MAGENTO_TIMEOUT", "12"),
            ("MAGENTO_OPEN_TIMEOUT", "3"),
            ("MAGENTO_ALLOW_SELF_SIGNED_SSL_CERT_ENABLED", "true"),
        ]))
        .unwrap();

        assert_eq!(config.url().as_ref(), "https://site.com.br/");
        assert_eq!(config.token().as_ref(), "magento-token");
        assert_eq!(config.store().as_ref(), "magento-store");
        assert_eq!(config.connect_timeout(), Duration::from_secs(12));
        assert_eq!(config.read_timeout(), Duration::from_secs(3));
        assert!(config.allow_self_signed_certs());
    }

    #[test]
    fn test_from_env_requires_url_and_token() {
        let result = MagentoConfig::from_env_with(env(&[("MAGENTO_TOKEN", "t")]));
        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField { field: "url" })
        ));

        let result = MagentoConfig::from_env_with(env(&[("MAGENTO_URL", "https://site.com.br")]));
        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField { field: "token" })
        ));
    }

    #[test]
    fn test_from_env_rejects_bad_timeout() {
        let result = MagentoConfig::from_env_with(env(&[
            ("MAGENTO_URL", "https://site.com.br"),
            ("MAGENTO_TOKEN", "t"),
            ("MAGENTO_TIMEOUT", "soon"),
        ]));
        assert!(matches!(
            result,
            Err(ConfigError::InvalidTimeout {
                variable: "MAGENTO_TIMEOUT",
                ..
            })
        ));
    }

    #[test]
    fn test_self_signed_flag_only_accepts_true() {
        assert!(is_enabled_flag(Some("true")));
        assert!(is_enabled_flag(Some("TRUE")));
        assert!(is_enabled_flag(Some("True")));
        assert!(!is_enabled_flag(Some("1")));
        assert!(!is_enabled_flag(Some("yes")));
        assert!(!is_enabled_flag(Some(" true")));
        assert!(!is_enabled_flag(Some("")));
        assert!(!is_enabled_flag(None));
    }

    #[test]
    fn test_from_env_flag_absent_keeps_verification() {
        let config = MagentoConfig::from_env_with(env(&[
            ("MAGENTO_URL", "https://site.com.br"),
            ("MAGENTO_TOKEN", "t"),
            ("MAGENTO_ALLOW_SELF_SIGNED_SSL_CERT_ENABLED", "false"),
        ]))
        .unwrap();
        assert!(!config.allow_self_signed_certs());
    }
}
