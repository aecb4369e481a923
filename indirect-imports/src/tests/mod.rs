//! Unit tests for the indirect import machinery
//!
//! Every test builds its own `Registry` so nothing leaks between tests
//! through the process-wide instance.

pub mod test_config;
pub mod test_manifest;

use crate::{PackageIdentity, Registry};
use uuid::Uuid;

/// Registry with an `Upstream` package already interned
pub(crate) fn registry_with_upstream() -> (Registry, PackageIdentity) {
    let registry = Registry::new();
    let upstream = registry.identity_for(upstream_uuid(), "Upstream");
    (registry, upstream)
}

pub(crate) fn upstream_uuid() -> Uuid {
    Uuid::from_u128(0xf315346e_6bf8_11e9_0cba_43b0a27f0f55)
}

pub(crate) fn downstream_uuid() -> Uuid {
    Uuid::from_u128(0x2c6f5e0a_8f3b_4f67_9d1b_6a3f1f0d9c11)
}
