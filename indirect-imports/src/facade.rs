//! Declaration and import facade
//!
//! This is the surface used by packages: owners declare functions, other
//! packages import them by identity alone and then call or extend them.
//! Nothing here needs the owning package to be loaded.

use crate::error::{IndirectError, Result};
use crate::handle::IndirectFunctionHandle;
use crate::identity::PackageIdentity;
use crate::manifest::Manifest;
use crate::method::Insertion;
use crate::registry::Registry;
use crate::signature::Signature;
use crate::value::Value;
use indexmap::IndexMap;
use parking_lot::RwLock;
use std::sync::Arc;

impl Registry {
    /// Declare `name` in the calling package `own`
    ///
    /// Redeclaring is idempotent under the default policy and returns the
    /// handle created by the first declaration, or by an earlier import.
    pub fn declare_function(
        &self,
        own: &PackageIdentity,
        name: &str,
    ) -> Result<IndirectFunctionHandle> {
        Ok(self.declare(own, name)?.into_handle())
    }

    /// Declare `name` together with its documentation
    pub fn declare_function_with_doc(
        &self,
        own: &PackageIdentity,
        name: &str,
        doc: impl Into<String>,
    ) -> Result<IndirectFunctionHandle> {
        Ok(self
            .declare_with_doc(own, name, Some(doc.into()))?
            .into_handle())
    }

    /// Import a function of `package` by identity
    ///
    /// Never fails: the owner may declare the function later. Calling the
    /// handle before that reports `UndeclaredFunction`.
    pub fn import_function(&self, package: &PackageIdentity, name: &str) -> IndirectFunctionHandle {
        self.handle_for(package, name)
    }

    /// Import a whole package; its functions resolve on first access
    pub fn import_package(&self, package: &PackageIdentity) -> ImportBinding {
        ImportBinding::new(self.clone(), self.intern(package))
    }

    /// Import selected functions of a package, binding them immediately
    pub fn import_names(&self, package: &PackageIdentity, names: &[&str]) -> ImportBinding {
        let mut binding = self.import_package(package);
        for name in names {
            binding.bind_selected(name);
        }
        binding
    }

    /// Import a package listed in `manifest` under `[deps]` or `[extras]`
    pub fn import_from_manifest(&self, manifest: &Manifest, package: &str) -> Result<ImportBinding> {
        let (uuid, name) = manifest.package(package)?;
        Ok(self.import_package(&self.identity_for(uuid, name)))
    }

    /// Identity of the package described by `manifest` itself
    pub fn own_identity(&self, manifest: &Manifest) -> PackageIdentity {
        self.identity_for(manifest.uuid(), manifest.name())
    }

    /// Add or replace a method of `handle`
    ///
    /// Same as [`IndirectFunctionHandle::extend`]; the receiver only keeps
    /// the facade operations together.
    pub fn extend<F>(
        &self,
        handle: &IndirectFunctionHandle,
        signature: impl Into<Signature>,
        body: F,
    ) -> Insertion
    where
        F: Fn(&[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        handle.extend(signature, body)
    }

    /// Like [`Registry::extend`], recording the package that defines the method
    pub fn extend_from<F>(
        &self,
        package: &PackageIdentity,
        handle: &IndirectFunctionHandle,
        signature: impl Into<Signature>,
        body: F,
    ) -> Insertion
    where
        F: Fn(&[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        handle.add_method(signature.into(), Arc::new(body), Some(self.intern(package)))
    }

    /// Dispatch a call on `handle`
    ///
    /// Same as [`IndirectFunctionHandle::call`].
    pub fn call(&self, handle: &IndirectFunctionHandle, args: &[Value]) -> Result<Value> {
        handle.call(args)
    }
}

/// A package imported by identity
///
/// Acts like the package in a limited way: `binding.function("f")` is the
/// indirect function `f` of that package, created on first access and
/// cached afterwards.
#[derive(Debug)]
pub struct ImportBinding {
    registry: Registry,
    package: PackageIdentity,
    functions: RwLock<IndexMap<String, IndirectFunctionHandle>>,
    selected: Vec<String>,
}

impl ImportBinding {
    fn new(registry: Registry, package: PackageIdentity) -> Self {
        Self {
            registry,
            package,
            functions: RwLock::new(IndexMap::new()),
            selected: Vec::new(),
        }
    }

    fn bind_selected(&mut self, name: &str) {
        self.function(name);
        if !self.selected.iter().any(|selected| selected == name) {
            self.selected.push(name.to_string());
        }
    }

    pub fn package(&self) -> &PackageIdentity {
        &self.package
    }

    /// Names bound by a selective import, in import order
    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    /// The indirect function `name` of the imported package
    pub fn function(&self, name: &str) -> IndirectFunctionHandle {
        if let Some(handle) = self.functions.read().get(name) {
            return handle.clone();
        }

        let handle = self.registry.import_function(&self.package, name);
        self.functions
            .write()
            .entry(name.to_string())
            .or_insert(handle)
            .clone()
    }

    /// Like [`ImportBinding::function`], but requires a declaration
    pub fn resolve(&self, name: &str) -> Result<IndirectFunctionHandle> {
        let handle = self.function(name);
        if handle.is_declared() {
            Ok(handle)
        } else {
            Err(IndirectError::undeclared_function(
                self.package.name(),
                name,
            ))
        }
    }

    /// Call `name` on the imported package
    pub fn call(&self, name: &str, args: &[Value]) -> Result<Value> {
        self.function(name).call(args)
    }

    /// Add a method to `name` of the imported package
    pub fn extend<F>(&self, name: &str, signature: impl Into<Signature>, body: F) -> Insertion
    where
        F: Fn(&[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        self.function(name).extend(signature, body)
    }
}
