//! Integration tests for configuration loading.

use std::collections::HashMap;
use std::time::Duration;

use magento_api::{ConfigError, MagentoConfig, RequestGateway};

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    move |name| vars.get(name).cloned()
}

#[test]
fn test_environment_configuration_drives_gateway_urls() {
    let config = MagentoConfig::from_env_with(lookup(&[
        ("MAGENTO_URL", "https://site.com.br/"),
        ("MAGENTO_TOKEN", "magento-token"),
        ("MAGENTO_STORE", "magento-store"),
    ]))
    .unwrap();
    let gateway = RequestGateway::new(config);

    assert_eq!(gateway.base_url(), "https://site.com.br/rest/magento-store/V1");
    assert_eq!(
        gateway.url("products"),
        "https://site.com.br/rest/magento-store/V1/products"
    );
}

#[test]
fn test_environment_defaults() {
    let config = MagentoConfig::from_env_with(lookup(&[
        ("MAGENTO_URL", "https://site.com.br"),
        ("MAGENTO_TOKEN", "magento-token"),
    ]))
    .unwrap();

    assert_eq!(config.store().as_ref(), "all");
    assert_eq!(config.connect_timeout(), Duration::from_secs(30));
    assert_eq!(config.read_timeout(), Duration::from_secs(5));
    assert!(!config.allow_self_signed_certs());

    let gateway = RequestGateway::new(config);
    assert_eq!(gateway.base_url(), "https://site.com.br/rest/all/V1");
}

#[test]
fn test_self_signed_flag_reaches_transport_options() {
    for (value, expected) in [
        ("true", true),
        ("TRUE", true),
        ("tRuE", true),
        ("false", false),
        ("1", false),
        ("", false),
    ] {
        let config = MagentoConfig::from_env_with(lookup(&[
            ("MAGENTO_URL", "https://site.com.br"),
            ("MAGENTO_TOKEN", "magento-token"),
            ("MAGENTO_ALLOW_SELF_SIGNED_SSL_CERT_ENABLED", value),
        ]))
        .unwrap();
        let gateway = RequestGateway::new(config);

        assert_eq!(
            gateway.transport_options().accept_invalid_certs,
            expected,
            "flag value {value:?}"
        );
    }
}

#[test]
fn test_invalid_environment_values_are_rejected() {
    let result = MagentoConfig::from_env_with(lookup(&[
        ("MAGENTO_URL", "site.com.br"),
        ("MAGENTO_TOKEN", "magento-token"),
    ]));
    assert!(matches!(result, Err(ConfigError::InvalidBaseUrl { .. })));

    let result = MagentoConfig::from_env_with(lookup(&[
        ("MAGENTO_URL", "https://site.com.br"),
        ("MAGENTO_TOKEN", ""),
    ]));
    assert!(matches!(result, Err(ConfigError::EmptyAccessToken)));

    let result = MagentoConfig::from_env_with(lookup(&[
        ("MAGENTO_URL", "https://site.com.br"),
        ("MAGENTO_TOKEN", "magento-token"),
        ("MAGENTO_OPEN_TIMEOUT", "-5"),
    ]));
    assert!(matches!(
        result,
        Err(ConfigError::InvalidTimeout {
            variable: "MAGENTO_OPEN_TIMEOUT",
            ..
        })
    ));
}
