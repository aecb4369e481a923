//! Tests for registry configuration

use crate::{IndirectError, RedeclarationPolicy, Registry, RegistryConfig};

#[test]
fn test_default_policy_is_idempotent() {
    assert_eq!(
        RegistryConfig::default().redeclaration,
        RedeclarationPolicy::Idempotent
    );
    assert_eq!(Registry::new().config(), &RegistryConfig::default());
}

#[test]
fn test_parse_config() {
    let config = RegistryConfig::from_toml_str("redeclaration = \"strict\"").unwrap();
    assert_eq!(config, RegistryConfig::strict());

    let empty = RegistryConfig::from_toml_str("").unwrap();
    assert_eq!(empty, RegistryConfig::default());
}

#[test]
fn test_invalid_config() {
    assert!(matches!(
        RegistryConfig::from_toml_str("redeclaration = \"sometimes\""),
        Err(IndirectError::InvalidConfig { .. })
    ));
    assert!(matches!(
        RegistryConfig::from_toml_str("unknown = true"),
        Err(IndirectError::InvalidConfig { .. })
    ));
}

#[test]
fn test_registry_uses_given_config() {
    let registry = Registry::with_config(RegistryConfig::strict());
    assert_eq!(registry.config().redeclaration, RedeclarationPolicy::Strict);
}
