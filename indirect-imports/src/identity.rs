//! Package identities
//!
//! A package is known by a stable UUID and a display name. Only the UUID
//! takes part in equality and hashing, so an identity can be rebuilt from
//! manifest metadata without the package ever being loaded.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug)]
struct IdentityData {
    uuid: Uuid,
    name: String,
}

/// Globally unique identity of a logical package
///
/// Cloning is cheap; clones of an interned identity share one allocation.
#[derive(Clone)]
pub struct PackageIdentity {
    data: Arc<IdentityData>,
}

impl PackageIdentity {
    /// Create a free-standing identity
    ///
    /// Prefer [`crate::Registry::identity_for`], which interns the result.
    pub fn new(uuid: Uuid, name: impl Into<String>) -> Self {
        Self {
            data: Arc::new(IdentityData {
                uuid,
                name: name.into(),
            }),
        }
    }

    /// The stable identifier
    pub fn uuid(&self) -> Uuid {
        self.data.uuid
    }

    /// The cosmetic display name
    pub fn name(&self) -> &str {
        &self.data.name
    }

    /// Whether both values are the same interned instance
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }
}

impl PartialEq for PackageIdentity {
    fn eq(&self, other: &Self) -> bool {
        self.data.uuid == other.data.uuid
    }
}

impl Eq for PackageIdentity {}

impl Hash for PackageIdentity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.data.uuid.hash(state);
    }
}

impl fmt::Display for PackageIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.data.name)
    }
}

impl fmt::Debug for PackageIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PackageIdentity({} [{}])", self.data.name, self.data.uuid)
    }
}

impl From<&crate::handle::IndirectFunctionHandle> for PackageIdentity {
    fn from(handle: &crate::handle::IndirectFunctionHandle) -> Self {
        handle.package().clone()
    }
}
