//! Indirect function handles
//!
//! A handle names "function `name` owned by package `P`". The registry
//! interns one handle per pair, and the handle owns that function's
//! declaration state and method table behind its own lock, so calls on
//! one function never wait on another function's extension.

use crate::config::RedeclarationPolicy;
use crate::error::{IndirectError, Result};
use crate::identity::PackageIdentity;
use crate::method::{Insertion, MethodBody, MethodInfo, MethodTable};
use crate::signature::Signature;
use crate::value::Value;
use parking_lot::RwLock;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use tracing::{debug, trace};

// Metadata recorded when the owning package declares a function
#[derive(Debug, Default)]
struct Declaration {
    doc: Option<String>,
}

#[derive(Debug, Default)]
struct FunctionState {
    declaration: Option<Declaration>,
    methods: MethodTable,
}

#[derive(Debug)]
struct FunctionEntry {
    package: PackageIdentity,
    name: String,
    state: RwLock<FunctionState>,
}

/// Canonical, comparable token for an indirect function
///
/// Equality and hashing only look at the owning package and the name.
#[derive(Clone)]
pub struct IndirectFunctionHandle {
    entry: Arc<FunctionEntry>,
}

impl IndirectFunctionHandle {
    pub(crate) fn new(package: PackageIdentity, name: impl Into<String>) -> Self {
        Self {
            entry: Arc::new(FunctionEntry {
                package,
                name: name.into(),
                state: RwLock::new(FunctionState::default()),
            }),
        }
    }

    /// The package that owns this function
    pub fn package(&self) -> &PackageIdentity {
        &self.entry.package
    }

    pub fn name(&self) -> &str {
        &self.entry.name
    }

    /// Whether both handles are the same interned instance
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.entry, &other.entry)
    }

    /// Whether the owning package has declared this function
    pub fn is_declared(&self) -> bool {
        self.entry.state.read().declaration.is_some()
    }

    pub fn doc(&self) -> Option<String> {
        self.entry
            .state
            .read()
            .declaration
            .as_ref()
            .and_then(|declaration| declaration.doc.clone())
    }

    pub fn method_count(&self) -> usize {
        self.entry.state.read().methods.len()
    }

    pub fn has_method(&self, signature: &Signature) -> bool {
        self.entry.state.read().methods.contains(signature)
    }

    /// Registered methods, most specific first
    pub fn methods(&self) -> Vec<MethodInfo> {
        self.entry.state.read().methods.infos()
    }

    /// Record a declaration by the owning package
    ///
    /// Returns `true` when the function was not declared before. A strict
    /// policy rejects a different docstring without touching the state.
    pub(crate) fn record_declaration(
        &self,
        doc: Option<String>,
        policy: RedeclarationPolicy,
    ) -> Result<bool> {
        let mut state = self.entry.state.write();

        let Some(existing) = state.declaration.as_mut() else {
            debug!(function = %self, "declared indirect function");
            state.declaration = Some(Declaration { doc });
            return Ok(true);
        };

        let Some(new_doc) = doc else {
            return Ok(false);
        };
        if existing.doc.as_deref() == Some(new_doc.as_str()) {
            return Ok(false);
        }

        if policy == RedeclarationPolicy::Strict {
            return Err(IndirectError::duplicate_declaration(
                self.package().name(),
                self.name(),
            ));
        }

        if existing.doc.is_none() {
            debug!(function = %self, "redeclaration supplied documentation");
            existing.doc = Some(new_doc);
        } else {
            debug!(function = %self, "redeclaration with different documentation ignored");
        }

        Ok(false)
    }

    /// Add or replace the method for `signature`
    pub(crate) fn add_method(
        &self,
        signature: Signature,
        body: MethodBody,
        defined_by: Option<PackageIdentity>,
    ) -> Insertion {
        let shown = signature.to_string();
        let insertion = self
            .entry
            .state
            .write()
            .methods
            .insert(signature, body, defined_by);

        match insertion {
            Insertion::Added => debug!(function = %self, signature = %shown, "added method"),
            Insertion::Replaced => debug!(function = %self, signature = %shown, "replaced method"),
        }
        insertion
    }

    /// Add or replace the method for `signature`
    ///
    /// The method table lives on the handle, so this works the same for
    /// handles from any registry.
    pub fn extend<F>(&self, signature: impl Into<Signature>, body: F) -> Insertion
    where
        F: Fn(&[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        self.add_method(signature.into(), Arc::new(body), None)
    }

    /// Dispatch on `args` and run the selected method
    ///
    /// The lock is released before the body runs, so bodies may call or
    /// extend any indirect function, this one included.
    pub fn call(&self, args: &[Value]) -> Result<Value> {
        let body = {
            let state = self.entry.state.read();
            if state.declaration.is_none() {
                return Err(IndirectError::undeclared_function(
                    self.package().name(),
                    self.name(),
                ));
            }
            let function = self.to_string();
            let method = state.methods.select(&function, args)?;
            trace!(function = %function, signature = %method.signature, "dispatching");
            method.body.clone()
        };

        body(args)
    }
}

impl PartialEq for IndirectFunctionHandle {
    fn eq(&self, other: &Self) -> bool {
        self.entry.package == other.entry.package && self.entry.name == other.entry.name
    }
}

impl Eq for IndirectFunctionHandle {}

impl Hash for IndirectFunctionHandle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.entry.package.hash(state);
        self.entry.name.hash(state);
    }
}

impl fmt::Display for IndirectFunctionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.entry.package, self.entry.name)
    }
}

impl fmt::Debug for IndirectFunctionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IndirectFunctionHandle({self})")
    }
}
