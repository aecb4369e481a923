//! Extension tables: the methods attached to one indirect function
//!
//! Methods are keyed by their [`Signature`]. Adding a method with a
//! signature that is already present replaces the body in place, which is
//! how re-evaluating a definition behaves. Selection never mutates the table.

use crate::error::{IndirectError, Result};
use crate::identity::PackageIdentity;
use crate::signature::Signature;
use crate::value::Value;
use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

/// Callable body of a method
pub type MethodBody = Arc<dyn Fn(&[Value]) -> Result<Value> + Send + Sync>;

/// A registered implementation
#[derive(Clone)]
pub struct Method {
    pub signature: Signature,
    pub body: MethodBody,
    /// Package that added the method, when known
    pub defined_by: Option<PackageIdentity>,
    /// Registration sequence number, bumped on replacement
    pub(crate) sequence: u64,
}

impl fmt::Debug for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Method")
            .field("signature", &self.signature)
            .field("defined_by", &self.defined_by)
            .field("sequence", &self.sequence)
            .finish_non_exhaustive()
    }
}

/// Reflection view of a method
#[derive(Debug, Clone, PartialEq)]
pub struct MethodInfo {
    pub signature: Signature,
    pub defined_by: Option<PackageIdentity>,
}

/// Whether [`MethodTable::insert`] added or replaced a method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insertion {
    Added,
    Replaced,
}

/// Ordered collection of methods for a single function
#[derive(Debug, Default)]
pub struct MethodTable {
    methods: IndexMap<Signature, Method>,
    next_sequence: u64,
}

impl MethodTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    pub fn contains(&self, signature: &Signature) -> bool {
        self.methods.contains_key(signature)
    }

    /// Insert a method, replacing any method with the same signature
    pub fn insert(
        &mut self,
        signature: Signature,
        body: MethodBody,
        defined_by: Option<PackageIdentity>,
    ) -> Insertion {
        let sequence = self.next_sequence;
        self.next_sequence += 1;

        let method = Method {
            signature: signature.clone(),
            body,
            defined_by,
            sequence,
        };

        // IndexMap::insert keeps the original slot for an existing key
        match self.methods.insert(signature, method) {
            Some(_) => Insertion::Replaced,
            None => Insertion::Added,
        }
    }

    /// Select the most specific method applicable to `args`
    ///
    /// The applicable methods that no other applicable method beats must be
    /// a single method, otherwise the call is ambiguous. `function` is only
    /// used for error messages.
    pub fn select(&self, function: &str, args: &[Value]) -> Result<&Method> {
        let applicable: Vec<&Method> = self
            .methods
            .values()
            .filter(|method| method.signature.matches(args))
            .collect();

        if applicable.is_empty() {
            return Err(IndirectError::no_applicable_method(
                function,
                argument_types(args),
            ));
        }

        let mut most_specific: Vec<&Method> = applicable
            .iter()
            .filter(|candidate| {
                !applicable.iter().any(|other| {
                    other
                        .signature
                        .is_more_specific_than(&candidate.signature)
                })
            })
            .copied()
            .collect();

        match most_specific.len() {
            1 => Ok(most_specific[0]),
            _ => {
                most_specific.sort_by_key(|method| (method.signature.order_key(), method.sequence));
                Err(IndirectError::ambiguous_method(
                    function,
                    argument_types(args),
                    most_specific
                        .iter()
                        .map(|method| method.signature.to_string())
                        .collect(),
                ))
            }
        }
    }

    /// Methods in the deterministic listing order
    pub fn sorted(&self) -> Vec<&Method> {
        let mut methods: Vec<&Method> = self.methods.values().collect();
        methods.sort_by_key(|method| (method.signature.order_key(), method.sequence));
        methods
    }

    pub fn infos(&self) -> Vec<MethodInfo> {
        self.sorted()
            .into_iter()
            .map(|method| MethodInfo {
                signature: method.signature.clone(),
                defined_by: method.defined_by.clone(),
            })
            .collect()
    }
}

fn argument_types(args: &[Value]) -> Vec<String> {
    args.iter().map(|arg| arg.type_of().to_string()).collect()
}
