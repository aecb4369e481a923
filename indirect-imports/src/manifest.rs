//! Package manifests
//!
//! The only fact needed about a package that is never loaded is its UUID,
//! and a package manifest already lists the UUID of every dependency:
//!
//! ```toml
//! name = "Downstream"
//! uuid = "2c6f5e0a-8f3b-4f67-9d1b-6a3f1f0d9c11"
//!
//! [deps]
//! Upstream = "f315346e-6bf8-11e9-0cba-43b0a27f0f55"
//!
//! [extras]
//! Plotting = "0f6b6e5e-51f4-4d3c-9a8f-0c2f5bcf1f0e"
//! ```
//!
//! Optional dependencies live under `[extras]` and are looked up the same
//! way as `[deps]`. The manifest is parsed from text; reading it from disk
//! is left to the caller.

use crate::error::{IndirectError, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
struct RawManifest {
    name: Option<String>,
    uuid: Option<String>,
    #[serde(default)]
    deps: BTreeMap<String, String>,
    #[serde(default)]
    extras: BTreeMap<String, String>,
}

/// Identity information of a package and the packages it may import
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    name: String,
    uuid: Uuid,
    deps: BTreeMap<String, Uuid>,
    extras: BTreeMap<String, Uuid>,
}

impl Manifest {
    /// Parse manifest TOML text
    ///
    /// Unknown keys and tables (versions, compat bounds, ...) are ignored.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let raw: RawManifest =
            toml::from_str(source).map_err(|e| IndirectError::invalid_manifest(e.to_string()))?;

        let name = raw
            .name
            .ok_or_else(|| IndirectError::invalid_manifest("missing `name`"))?;
        let uuid = raw
            .uuid
            .ok_or_else(|| IndirectError::invalid_manifest("missing `uuid`"))
            .and_then(|value| parse_uuid(&name, &value))?;

        Ok(Self {
            deps: parse_table(raw.deps)?,
            extras: parse_table(raw.extras)?,
            name,
            uuid,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    pub fn deps(&self) -> &BTreeMap<String, Uuid> {
        &self.deps
    }

    pub fn extras(&self) -> &BTreeMap<String, Uuid> {
        &self.extras
    }

    /// UUID and name of `package` from `[deps]`, then `[extras]`
    pub fn package<'a>(&'a self, package: &str) -> Result<(Uuid, &'a str)> {
        self.deps
            .get_key_value(package)
            .or_else(|| self.extras.get_key_value(package))
            .map(|(name, uuid)| (*uuid, name.as_str()))
            .ok_or_else(|| IndirectError::package_not_in_manifest(package))
    }
}

fn parse_uuid(package: &str, value: &str) -> Result<Uuid> {
    Uuid::parse_str(value).map_err(|_| IndirectError::invalid_uuid(package, value))
}

fn parse_table(table: BTreeMap<String, String>) -> Result<BTreeMap<String, Uuid>> {
    table
        .into_iter()
        .map(|(package, value)| {
            let uuid = parse_uuid(&package, &value)?;
            Ok((package, uuid))
        })
        .collect()
}
