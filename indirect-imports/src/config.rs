//! Registry configuration

use crate::error::{IndirectError, Result};
use serde::Deserialize;

/// How the registry treats a second declaration of the same function
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RedeclarationPolicy {
    /// Return the existing handle; documentation may be filled in but is
    /// never overwritten
    #[default]
    Idempotent,
    /// Reject a redeclaration whose documentation differs
    Strict,
}

/// Configuration for a [`crate::Registry`]
///
/// ```toml
/// redeclaration = "strict"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegistryConfig {
    pub redeclaration: RedeclarationPolicy,
}

impl RegistryConfig {
    pub fn strict() -> Self {
        Self {
            redeclaration: RedeclarationPolicy::Strict,
        }
    }

    /// Parse a configuration from TOML text
    pub fn from_toml_str(source: &str) -> Result<Self> {
        toml::from_str(source).map_err(|e| IndirectError::invalid_config(e.to_string()))
    }
}
