//! Dynamic values passed to and returned from indirect functions.
//!
//! Dispatch inspects the [`Type`] of every argument, so values carry their
//! type at runtime. Indirect functions are values too and can be handed to
//! other functions.

use crate::error::{IndirectError, Result};
use crate::handle::IndirectFunctionHandle;
use crate::types::Type;

/// A call argument or call result
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Absence of a meaningful value
    Nothing,
    Boolean(bool),
    /// 64-bit signed integer
    Integer(i64),
    /// 64-bit floating point number
    Float(f64),
    /// UTF-8 string
    String(String),
    /// Symbol, displayed with a leading ':'
    Symbol(String),
    /// Ordered list of values
    List(Vec<Value>),
    /// An indirect function used as a value
    Function(IndirectFunctionHandle),
}

impl Value {
    /// The concrete type used for dispatch
    pub fn type_of(&self) -> Type {
        match self {
            Value::Nothing => Type::Nothing,
            Value::Boolean(_) => Type::Boolean,
            Value::Integer(_) => Type::Integer,
            Value::Float(_) => Type::Float,
            Value::String(_) => Type::String,
            Value::Symbol(_) => Type::Symbol,
            Value::List(_) => Type::List,
            Value::Function(_) => Type::Function,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Numeric value widened to `f64`
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Integer(n) => Some(*n as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) | Value::Symbol(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    /// Convert to string representation
    pub fn to_string_repr(&self) -> String {
        match self {
            Value::Nothing => "nothing".to_string(),
            Value::Boolean(b) => b.to_string(),
            Value::Integer(n) => n.to_string(),
            Value::Float(f) => {
                if f.fract() == 0.0 {
                    format!("{:.1}", f) // Show 1.0 instead of 1
                } else {
                    f.to_string()
                }
            }
            Value::String(s) => s.clone(),
            Value::Symbol(name) => format!(":{}", name),
            Value::List(items) => {
                let item_strings: Vec<String> = items.iter().map(|v| v.to_string_repr()).collect();
                format!("[{}]", item_strings.join(", "))
            }
            Value::Function(handle) => handle.to_string(),
        }
    }

    // Arithmetic for method bodies

    /// Addition operation
    pub fn add(&self, other: &Value) -> Result<Value> {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => a
                .checked_add(*b)
                .map(Value::Integer)
                .ok_or_else(|| self.overflow("+", other)),
            (Value::String(a), Value::String(b)) => Ok(Value::String(format!("{}{}", a, b))),
            (Value::List(a), Value::List(b)) => {
                let mut result = a.clone();
                result.extend(b.iter().cloned());
                Ok(Value::List(result))
            }
            _ => self
                .float_pair(other, |a, b| a + b)
                .ok_or_else(|| self.invalid("+", other)),
        }
    }

    /// Subtraction operation
    pub fn subtract(&self, other: &Value) -> Result<Value> {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => a
                .checked_sub(*b)
                .map(Value::Integer)
                .ok_or_else(|| self.overflow("-", other)),
            _ => self
                .float_pair(other, |a, b| a - b)
                .ok_or_else(|| self.invalid("-", other)),
        }
    }

    /// Multiplication operation
    pub fn multiply(&self, other: &Value) -> Result<Value> {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => a
                .checked_mul(*b)
                .map(Value::Integer)
                .ok_or_else(|| self.overflow("*", other)),
            _ => self
                .float_pair(other, |a, b| a * b)
                .ok_or_else(|| self.invalid("*", other)),
        }
    }

    // Mixed or float operands, widened to f64
    fn float_pair(&self, other: &Value, op: impl Fn(f64, f64) -> f64) -> Option<Value> {
        Some(Value::Float(op(self.as_float()?, other.as_float()?)))
    }

    fn invalid(&self, operation: &str, other: &Value) -> IndirectError {
        IndirectError::invalid_operation(
            operation,
            vec![self.type_of().to_string(), other.type_of().to_string()],
        )
    }

    fn overflow(&self, operation: &str, other: &Value) -> IndirectError {
        IndirectError::invalid_operation(
            &format!("{operation} (overflow)"),
            vec![self.type_of().to_string(), other.type_of().to_string()],
        )
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::String(s) => write!(f, "\"{}\"", s),
            _ => write!(f, "{}", self.to_string_repr()),
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<IndirectFunctionHandle> for Value {
    fn from(handle: IndirectFunctionHandle) -> Self {
        Value::Function(handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_of() {
        assert_eq!(Value::Integer(42).type_of(), Type::Integer);
        assert_eq!(Value::Float(42.5).type_of(), Type::Float);
        assert_eq!(Value::Boolean(true).type_of(), Type::Boolean);
        assert_eq!(Value::from("hello").type_of(), Type::String);
        assert_eq!(Value::Symbol("test".to_string()).type_of(), Type::Symbol);
        assert_eq!(Value::List(vec![]).type_of(), Type::List);
        assert_eq!(Value::Nothing.type_of(), Type::Nothing);
    }

    #[test]
    fn test_arithmetic() {
        let a = Value::Integer(5);
        let b = Value::Integer(3);

        assert_eq!(a.add(&b).unwrap(), Value::Integer(8));
        assert_eq!(a.subtract(&b).unwrap(), Value::Integer(2));
        assert_eq!(a.multiply(&b).unwrap(), Value::Integer(15));
    }

    #[test]
    fn test_mixed_numeric_arithmetic() {
        let int_val = Value::Integer(5);
        let float_val = Value::Float(2.5);

        assert_eq!(int_val.add(&float_val).unwrap(), Value::Float(7.5));
        assert_eq!(float_val.add(&int_val).unwrap(), Value::Float(7.5));
        assert_eq!(int_val.subtract(&float_val).unwrap(), Value::Float(2.5));
        assert_eq!(float_val.multiply(&int_val).unwrap(), Value::Float(12.5));
        assert!(Value::Boolean(true).multiply(&float_val).is_err());
    }

    #[test]
    fn test_string_and_list_concatenation() {
        let a = Value::from("hello");
        let b = Value::from(" world");
        assert_eq!(a.add(&b).unwrap(), Value::from("hello world"));

        let xs = Value::List(vec![Value::Integer(1)]);
        let ys = Value::List(vec![Value::Integer(2)]);
        assert_eq!(
            xs.add(&ys).unwrap(),
            Value::List(vec![Value::Integer(1), Value::Integer(2)])
        );
    }

    #[test]
    fn test_invalid_operation() {
        let result = Value::Integer(1).add(&Value::from("1"));
        assert!(matches!(
            result,
            Err(IndirectError::InvalidOperation { ref operand_types, .. }) if operand_types == "Integer, String"
        ));
    }

    #[test]
    fn test_integer_overflow_is_an_error() {
        let result = Value::Integer(i64::MAX).add(&Value::Integer(1));
        assert!(matches!(result, Err(IndirectError::InvalidOperation { .. })));
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::from("hi").to_string(), "\"hi\"");
        assert_eq!(Value::Float(1.0).to_string(), "1.0");
        assert_eq!(Value::Symbol("ok".to_string()).to_string(), ":ok");
        assert_eq!(
            Value::List(vec![Value::Integer(1), Value::Boolean(false)]).to_string(),
            "[1, false]"
        );
    }
}
