//! Argument types used by method signatures
//!
//! The lattice is intentionally shallow:
//!
//! ```text
//! Any
//! ├── Number
//! │   ├── Integer
//! │   └── Float
//! ├── Boolean
//! ├── String
//! ├── Symbol
//! ├── List
//! ├── Nothing
//! └── Function
//! ```

use std::fmt;

/// A type that method parameters can be annotated with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Type {
    Any,
    Number,
    Integer,
    Float,
    Boolean,
    String,
    Symbol,
    List,
    Nothing,
    Function,
}

impl Type {
    /// The direct supertype, `None` for `Any`
    pub fn supertype(self) -> Option<Type> {
        match self {
            Type::Any => None,
            Type::Integer | Type::Float => Some(Type::Number),
            _ => Some(Type::Any),
        }
    }

    /// Whether every value of `self` is also a value of `other`
    pub fn is_subtype_of(self, other: Type) -> bool {
        let mut current = Some(self);
        while let Some(ty) = current {
            if ty == other {
                return true;
            }
            current = ty.supertype();
        }
        false
    }

    /// Distance from `Any`; deeper types are more specific
    pub fn depth(self) -> usize {
        let mut depth = 0;
        let mut current = self.supertype();
        while let Some(ty) = current {
            depth += 1;
            current = ty.supertype();
        }
        depth
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Type::Any => "Any",
            Type::Number => "Number",
            Type::Integer => "Integer",
            Type::Float => "Float",
            Type::Boolean => "Boolean",
            Type::String => "String",
            Type::Symbol => "Symbol",
            Type::List => "List",
            Type::Nothing => "Nothing",
            Type::Function => "Function",
        };
        write!(f, "{name}")
    }
}
