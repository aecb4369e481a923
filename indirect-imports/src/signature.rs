//! Method applicability signatures
//!
//! A signature is a list of positional parameter types with an optional
//! variadic tail. It matches an argument list when the arity fits and every
//! argument's type is a subtype of the parameter type at its position.
//!
//! Specificity is set inclusion: `a` is more specific than `b` when every
//! argument list accepted by `a` is accepted by `b` but not the other way
//! round. Two distinct signatures never accept exactly the same argument
//! lists, so a method table keyed by signature has no silent duplicates.

use crate::types::Type;
use crate::value::Value;
use std::cmp::Reverse;
use std::fmt;

/// Applicability of a single method
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Signature {
    params: Vec<Type>,
    vararg: Option<Type>,
}

impl Signature {
    /// A fixed-arity signature
    pub fn new(params: Vec<Type>) -> Self {
        Self {
            params,
            vararg: None,
        }
    }

    /// A signature accepting any number of trailing `rest` arguments
    pub fn variadic(params: Vec<Type>, rest: Type) -> Self {
        Self {
            params,
            vararg: Some(rest),
        }
    }

    /// The zero-argument signature
    pub fn nullary() -> Self {
        Self::new(Vec::new())
    }

    pub fn accepts_arity(&self, arity: usize) -> bool {
        match self.vararg {
            Some(_) => arity >= self.params.len(),
            None => arity == self.params.len(),
        }
    }

    /// Parameter type at `position`, falling back to the variadic tail
    pub fn param_at(&self, position: usize) -> Option<Type> {
        self.params.get(position).copied().or(self.vararg)
    }

    /// Whether a call with `args` may select this signature
    pub fn matches(&self, args: &[Value]) -> bool {
        self.accepts_types(&args.iter().map(Value::type_of).collect::<Vec<_>>())
    }

    pub fn accepts_types(&self, types: &[Type]) -> bool {
        self.accepts_arity(types.len())
            && types.iter().enumerate().all(|(position, ty)| {
                self.param_at(position)
                    .is_some_and(|param| ty.is_subtype_of(param))
            })
    }

    /// Whether every argument list accepted by `self` is accepted by `other`
    pub fn is_subset_of(&self, other: &Signature) -> bool {
        if self.vararg.is_some() && other.vararg.is_none() {
            return false;
        }

        // Past this bound both signatures are inside their variadic tails,
        // so checking one arity there covers all longer ones.
        let upper = match self.vararg {
            Some(_) => self.params.len().max(other.params.len()) + 1,
            None => self.params.len(),
        };

        (self.params.len()..=upper).all(|arity| {
            if !self.accepts_arity(arity) {
                return true;
            }
            other.accepts_arity(arity)
                && (0..arity).all(|position| match (self.param_at(position), other.param_at(position)) {
                    (Some(mine), Some(theirs)) => mine.is_subtype_of(theirs),
                    _ => false,
                })
        })
    }

    /// Strict specificity
    pub fn is_more_specific_than(&self, other: &Signature) -> bool {
        self.is_subset_of(other) && !other.is_subset_of(self)
    }

    /// Sort key of the deterministic total order used to list methods
    ///
    /// Fixed-arity signatures come first, then longer fixed prefixes, then
    /// deeper parameter types. The order extends specificity: a more specific
    /// signature always sorts before a less specific one.
    pub(crate) fn order_key(&self) -> (bool, Reverse<usize>, Reverse<usize>) {
        let depth: usize = self
            .params
            .iter()
            .chain(self.vararg.iter())
            .map(|ty| ty.depth())
            .sum();
        (self.vararg.is_some(), Reverse(self.params.len()), Reverse(depth))
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = self.params.iter().map(|ty| ty.to_string()).collect();
        if let Some(rest) = self.vararg {
            parts.push(format!("{rest}..."));
        }
        write!(f, "({})", parts.join(", "))
    }
}

impl From<Vec<Type>> for Signature {
    fn from(params: Vec<Type>) -> Self {
        Signature::new(params)
    }
}

impl<const N: usize> From<[Type; N]> for Signature {
    fn from(params: [Type; N]) -> Self {
        Signature::new(params.to_vec())
    }
}
