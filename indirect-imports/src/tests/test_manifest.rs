//! Tests for manifest parsing and manifest-driven imports

use super::{downstream_uuid, upstream_uuid};
use crate::{IndirectError, Manifest, Registry, Type, Value};
use pretty_assertions::assert_eq;

const DOWNSTREAM_MANIFEST: &str = r#"
name = "Downstream"
uuid = "2c6f5e0a-8f3b-4f67-9d1b-6a3f1f0d9c11"
version = "0.1.0"

[deps]
Upstream = "f315346e-6bf8-11e9-0cba-43b0a27f0f55"

[extras]
Plotting = "0f6b6e5e-51f4-4d3c-9a8f-0c2f5bcf1f0e"

[compat]
Upstream = "1"
"#;

#[test]
fn test_parse_manifest() {
    let manifest = Manifest::from_toml_str(DOWNSTREAM_MANIFEST).unwrap();

    assert_eq!(manifest.name(), "Downstream");
    assert_eq!(manifest.uuid(), downstream_uuid());
    assert_eq!(manifest.deps().len(), 1);
    assert_eq!(manifest.extras().len(), 1);
    assert_eq!(manifest.package("Upstream").unwrap(), (upstream_uuid(), "Upstream"));
    assert!(manifest.package("Plotting").is_ok());
}

#[test]
fn test_missing_package() {
    let manifest = Manifest::from_toml_str(DOWNSTREAM_MANIFEST).unwrap();

    assert_eq!(
        manifest.package("Nowhere").unwrap_err(),
        IndirectError::PackageNotInManifest {
            package: "Nowhere".to_string(),
        }
    );
}

#[test]
fn test_invalid_manifests() {
    assert!(matches!(
        Manifest::from_toml_str("name = \"NoUuid\""),
        Err(IndirectError::InvalidManifest { .. })
    ));
    assert!(matches!(
        Manifest::from_toml_str("uuid = \"2c6f5e0a-8f3b-4f67-9d1b-6a3f1f0d9c11\""),
        Err(IndirectError::InvalidManifest { .. })
    ));
    assert!(matches!(
        Manifest::from_toml_str("this is not toml"),
        Err(IndirectError::InvalidManifest { .. })
    ));
}

#[test]
fn test_invalid_dependency_uuid() {
    let source = r#"
name = "Broken"
uuid = "2c6f5e0a-8f3b-4f67-9d1b-6a3f1f0d9c11"

[deps]
Upstream = "xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx"
"#;

    assert_eq!(
        Manifest::from_toml_str(source).unwrap_err(),
        IndirectError::InvalidUuid {
            package: "Upstream".to_string(),
            value: "xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx".to_string(),
        }
    );
}

#[test]
fn test_import_from_manifest_reaches_declared_function() {
    let registry = Registry::new();

    // Upstream declares from its own identity
    let upstream = registry.identity_for(upstream_uuid(), "Upstream");
    registry.declare_function(&upstream, "fun").unwrap();

    // Downstream only has its manifest
    let manifest = Manifest::from_toml_str(DOWNSTREAM_MANIFEST).unwrap();
    let downstream = registry.own_identity(&manifest);
    let binding = registry.import_from_manifest(&manifest, "Upstream").unwrap();

    registry.extend_from(&downstream, &binding.function("fun"), [Type::Integer], |args| {
        args[0].add(&Value::Integer(1))
    });

    assert_eq!(downstream.uuid(), downstream_uuid());
    assert!(binding.function("fun").ptr_eq(&registry.resolve(&upstream, "fun").unwrap()));
    assert_eq!(binding.call("fun", &[Value::Integer(5)]).unwrap(), Value::Integer(6));
}

#[test]
fn test_import_from_manifest_of_unlisted_package() {
    let registry = Registry::new();
    let manifest = Manifest::from_toml_str(DOWNSTREAM_MANIFEST).unwrap();

    assert!(matches!(
        registry.import_from_manifest(&manifest, "Unlisted"),
        Err(IndirectError::PackageNotInManifest { .. })
    ));
    assert!(registry.packages().is_empty());
}
