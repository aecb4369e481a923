//! Indirect symbol registry
//!
//! Interns package identities by UUID and function handles by
//! `(package, name)`. Entries are only ever inserted, so a handle obtained
//! once stays canonical for the life of the registry. Creation goes through
//! the write lock with an entry check, which makes concurrent first use of
//! the same pair converge on a single handle.

use crate::config::RegistryConfig;
use crate::error::{IndirectError, Result};
use crate::handle::IndirectFunctionHandle;
use crate::identity::PackageIdentity;
use lazy_static::lazy_static;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

lazy_static! {
    // Process-wide registry shared by every component that does not bring its own
    static ref GLOBAL_REGISTRY: Registry = Registry::new();
}

/// Result of [`Registry::declare`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclareOutcome {
    /// The function had not been declared before
    Fresh(IndirectFunctionHandle),
    /// The function was already declared; the existing handle is returned
    Existing(IndirectFunctionHandle),
}

impl DeclareOutcome {
    pub fn handle(&self) -> &IndirectFunctionHandle {
        match self {
            DeclareOutcome::Fresh(handle) | DeclareOutcome::Existing(handle) => handle,
        }
    }

    pub fn into_handle(self) -> IndirectFunctionHandle {
        match self {
            DeclareOutcome::Fresh(handle) | DeclareOutcome::Existing(handle) => handle,
        }
    }

    pub fn is_fresh(&self) -> bool {
        matches!(self, DeclareOutcome::Fresh(_))
    }
}

#[derive(Debug)]
struct RegistryInner {
    config: RegistryConfig,
    identities: RwLock<HashMap<Uuid, PackageIdentity>>,
    functions: RwLock<HashMap<(Uuid, String), IndirectFunctionHandle>>,
}

/// Table of package identities and indirect functions
///
/// Cloning shares the same tables. Independent registries can be created
/// for isolation; [`Registry::global`] is the one shared by the process.
#[derive(Debug, Clone)]
pub struct Registry {
    inner: Arc<RegistryInner>,
}

impl Registry {
    /// Create an empty registry with the default configuration
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            inner: Arc::new(RegistryInner {
                config,
                identities: RwLock::new(HashMap::new()),
                functions: RwLock::new(HashMap::new()),
            }),
        }
    }

    /// The process-wide registry
    pub fn global() -> &'static Registry {
        &GLOBAL_REGISTRY
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.inner.config
    }

    /// Whether both values share the same tables
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Canonical identity for `uuid`, created on first use
    ///
    /// The name only matters the first time; later calls return the
    /// identity under its original name.
    pub fn identity_for(&self, uuid: Uuid, name: &str) -> PackageIdentity {
        if let Some(identity) = self.inner.identities.read().get(&uuid) {
            if identity.name() != name {
                warn!(
                    uuid = %uuid,
                    interned = identity.name(),
                    requested = name,
                    "package identity requested under a different name"
                );
            }
            return identity.clone();
        }

        self.inner
            .identities
            .write()
            .entry(uuid)
            .or_insert_with(|| {
                debug!(uuid = %uuid, name, "interned package identity");
                PackageIdentity::new(uuid, name)
            })
            .clone()
    }

    /// Intern an identity that may have been built outside this registry
    ///
    /// An identity already interned under the same UUID is returned as is.
    /// Only [`Registry::identity_for`] reports a differing name.
    pub fn intern(&self, identity: &PackageIdentity) -> PackageIdentity {
        if let Some(interned) = self.inner.identities.read().get(&identity.uuid()) {
            return interned.clone();
        }

        self.inner
            .identities
            .write()
            .entry(identity.uuid())
            .or_insert_with(|| {
                debug!(uuid = %identity.uuid(), name = identity.name(), "interned package identity");
                identity.clone()
            })
            .clone()
    }

    /// Canonical handle for `(identity, name)`, created empty on first use
    pub fn handle_for(&self, identity: &PackageIdentity, name: &str) -> IndirectFunctionHandle {
        let key = (identity.uuid(), name.to_string());
        if let Some(handle) = self.inner.functions.read().get(&key) {
            return handle.clone();
        }

        let package = self.intern(identity);
        self.inner
            .functions
            .write()
            .entry(key)
            .or_insert_with(|| IndirectFunctionHandle::new(package, name))
            .clone()
    }

    /// Declare `name` as an indirect function owned by `identity`
    pub fn declare(&self, identity: &PackageIdentity, name: &str) -> Result<DeclareOutcome> {
        self.declare_with_doc(identity, name, None)
    }

    /// Declare with an optional docstring
    ///
    /// Redeclaration follows the configured policy. A rejected
    /// redeclaration leaves the registry as it was.
    pub fn declare_with_doc(
        &self,
        identity: &PackageIdentity,
        name: &str,
        doc: Option<String>,
    ) -> Result<DeclareOutcome> {
        let handle = self.handle_for(identity, name);
        let fresh = handle.record_declaration(doc, self.inner.config.redeclaration)?;
        Ok(if fresh {
            DeclareOutcome::Fresh(handle)
        } else {
            DeclareOutcome::Existing(handle)
        })
    }

    /// Existing handle for `(identity, name)`, without creating one
    pub fn lookup(&self, identity: &PackageIdentity, name: &str) -> Option<IndirectFunctionHandle> {
        self.inner
            .functions
            .read()
            .get(&(identity.uuid(), name.to_string()))
            .cloned()
    }

    /// Handle of a function that the owner has declared
    pub fn resolve(&self, identity: &PackageIdentity, name: &str) -> Result<IndirectFunctionHandle> {
        self.lookup(identity, name)
            .filter(IndirectFunctionHandle::is_declared)
            .ok_or_else(|| IndirectError::undeclared_function(identity.name(), name))
    }

    /// Every handle of `identity` known to this registry, sorted by name
    pub fn functions_of(&self, identity: &PackageIdentity) -> Vec<IndirectFunctionHandle> {
        let mut handles: Vec<IndirectFunctionHandle> = self
            .inner
            .functions
            .read()
            .iter()
            .filter(|((uuid, _), _)| *uuid == identity.uuid())
            .map(|(_, handle)| handle.clone())
            .collect();
        handles.sort_by(|a, b| a.name().cmp(b.name()));
        handles
    }

    /// Every interned identity, sorted by name then UUID
    pub fn packages(&self) -> Vec<PackageIdentity> {
        let mut packages: Vec<PackageIdentity> =
            self.inner.identities.read().values().cloned().collect();
        packages.sort_by(|a, b| a.name().cmp(b.name()).then(a.uuid().cmp(&b.uuid())));
        packages
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
