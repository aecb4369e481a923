//! Indirect imports
//!
//! Lets a package call and extend functions owned by another package without
//! loading it. A function is identified by the owning package's UUID plus the
//! function name, so any package that knows that pair (typically from its
//! manifest) can reach the same function.
//!
//! ## Architecture
//!
//! - **Identities**: `PackageIdentity` values interned by UUID
//! - **Registry**: interns one `IndirectFunctionHandle` per (package, name)
//! - **Extension tables**: every handle owns its methods, keyed by `Signature`
//! - **Dispatch**: the most specific applicable method wins, ties are errors
//! - **Facade**: declare, import, extend and call
//!
//! ## Example
//!
//! ```
//! use indirect_imports::{Registry, Type, Value};
//! use uuid::Uuid;
//!
//! let registry = Registry::new();
//!
//! // Upstream owns `fun`
//! let upstream = registry.identity_for(Uuid::from_u128(1), "Upstream");
//! registry.declare_function(&upstream, "fun").unwrap();
//!
//! // Downstream extends it knowing only Upstream's identity
//! let imported = registry.import_package(&upstream);
//! imported.extend("fun", [Type::Integer], |args| args[0].add(&Value::Integer(1)));
//!
//! assert_eq!(imported.call("fun", &[Value::Integer(5)]).unwrap(), Value::Integer(6));
//! ```

pub mod config;
pub mod error;
pub mod facade;
pub mod handle;
pub mod identity;
pub mod manifest;
pub mod method;
pub mod registry;
pub mod signature;
pub mod types;
pub mod value;

// Include tests directory with all test modules
#[cfg(test)]
#[path = "tests/mod.rs"]
mod tests;

// Re-export public API
pub use config::{RedeclarationPolicy, RegistryConfig};
pub use error::{IndirectError, Result};
pub use facade::ImportBinding;
pub use handle::IndirectFunctionHandle;
pub use identity::PackageIdentity;
pub use manifest::Manifest;
pub use method::{Insertion, MethodBody, MethodInfo};
pub use registry::{DeclareOutcome, Registry};
pub use signature::Signature;
pub use types::Type;
pub use value::Value;

use uuid::Uuid;

/// Canonical identity in the process-wide registry
pub fn identity_for(uuid: Uuid, name: &str) -> PackageIdentity {
    Registry::global().identity_for(uuid, name)
}

/// Declare a function in the process-wide registry
pub fn declare_function(own: &PackageIdentity, name: &str) -> Result<IndirectFunctionHandle> {
    Registry::global().declare_function(own, name)
}

/// Import a function from the process-wide registry
pub fn import_function(package: &PackageIdentity, name: &str) -> IndirectFunctionHandle {
    Registry::global().import_function(package, name)
}

/// Import a package from the process-wide registry
pub fn import_package(package: &PackageIdentity) -> ImportBinding {
    Registry::global().import_package(package)
}

/// Add a method to an indirect function from any registry
pub fn extend<F>(handle: &IndirectFunctionHandle, signature: impl Into<Signature>, body: F) -> Insertion
where
    F: Fn(&[Value]) -> Result<Value> + Send + Sync + 'static,
{
    handle.extend(signature, body)
}

/// Call an indirect function
pub fn call(handle: &IndirectFunctionHandle, args: &[Value]) -> Result<Value> {
    handle.call(args)
}
