//! Error types for indirect function resolution and dispatch.
//!
//! Every error is local to the call or resolution attempt that produced it;
//! none of them leave the registry or a method table partially modified.

use miette::Diagnostic;
use thiserror::Error;

/// Errors raised by the registry, the dispatch tables and the import facade
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum IndirectError {
    #[error("Undeclared indirect function: {package}.{function}")]
    #[diagnostic(
        code(indirect::resolve::undeclared_function),
        help("The package {package} must declare `{function}` before it can be called")
    )]
    UndeclaredFunction { package: String, function: String },

    #[error("No method of {function} matches argument types ({argument_types})")]
    #[diagnostic(
        code(indirect::dispatch::no_applicable_method),
        help("Extend {function} with a signature that accepts these arguments")
    )]
    NoApplicableMethod {
        function: String,
        argument_types: String, // Join types with ", " when creating the error
    },

    #[error("Ambiguous call to {function} with ({argument_types}): candidates are {candidates}")]
    #[diagnostic(
        code(indirect::dispatch::ambiguous_method),
        help("Define a method that is more specific than every candidate")
    )]
    AmbiguousMethod {
        function: String,
        argument_types: String,
        candidates: String,
    },

    #[error("Conflicting redeclaration of {package}.{function}")]
    #[diagnostic(
        code(indirect::declare::duplicate_declaration),
        help("The registry is strict about redeclaration; declare `{function}` once or with identical metadata")
    )]
    DuplicateDeclarationConflict { package: String, function: String },

    #[error("Invalid operation: {operation} cannot be applied to types [{operand_types}]")]
    #[diagnostic(
        code(indirect::value::invalid_operation),
        help("Check that the operation is supported for these types")
    )]
    InvalidOperation {
        operation: String,
        operand_types: String,
    },

    #[error("Method of {function} failed: {message}")]
    #[diagnostic(code(indirect::dispatch::method_failed))]
    MethodFailed { function: String, message: String },

    #[error("Invalid manifest: {message}")]
    #[diagnostic(
        code(indirect::manifest::invalid),
        help("A manifest needs `name`, `uuid` and optional [deps] / [extras] tables of UUID strings")
    )]
    InvalidManifest { message: String },

    #[error("Package {package} is not listed in the manifest")]
    #[diagnostic(
        code(indirect::manifest::package_not_found),
        help("Add {package} to [deps] or [extras]")
    )]
    PackageNotInManifest { package: String },

    #[error("Invalid UUID {value:?} for package {package}")]
    #[diagnostic(code(indirect::manifest::invalid_uuid))]
    InvalidUuid { package: String, value: String },

    #[error("Invalid registry configuration: {message}")]
    #[diagnostic(code(indirect::config::invalid))]
    InvalidConfig { message: String },
}

impl IndirectError {
    /// Create an undeclared function error
    pub fn undeclared_function(package: &str, function: &str) -> Self {
        Self::UndeclaredFunction {
            package: package.to_string(),
            function: function.to_string(),
        }
    }

    /// Create a no applicable method error
    pub fn no_applicable_method(function: &str, argument_types: Vec<String>) -> Self {
        Self::NoApplicableMethod {
            function: function.to_string(),
            argument_types: argument_types.join(", "),
        }
    }

    /// Create an ambiguity error from the competing signatures
    pub fn ambiguous_method(
        function: &str,
        argument_types: Vec<String>,
        candidates: Vec<String>,
    ) -> Self {
        Self::AmbiguousMethod {
            function: function.to_string(),
            argument_types: argument_types.join(", "),
            candidates: candidates.join(", "),
        }
    }

    /// Create a redeclaration conflict error
    pub fn duplicate_declaration(package: &str, function: &str) -> Self {
        Self::DuplicateDeclarationConflict {
            package: package.to_string(),
            function: function.to_string(),
        }
    }

    /// Create an invalid operation error
    pub fn invalid_operation(operation: &str, operand_types: Vec<String>) -> Self {
        Self::InvalidOperation {
            operation: operation.to_string(),
            operand_types: operand_types.join(", "),
        }
    }

    /// Create an error for a method body that could not produce a result
    pub fn method_failed(function: &str, message: impl Into<String>) -> Self {
        Self::MethodFailed {
            function: function.to_string(),
            message: message.into(),
        }
    }

    pub fn invalid_manifest(message: impl Into<String>) -> Self {
        Self::InvalidManifest {
            message: message.into(),
        }
    }

    pub fn package_not_in_manifest(package: &str) -> Self {
        Self::PackageNotInManifest {
            package: package.to_string(),
        }
    }

    pub fn invalid_uuid(package: &str, value: &str) -> Self {
        Self::InvalidUuid {
            package: package.to_string(),
            value: value.to_string(),
        }
    }

    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}

/// Type alias for registry and dispatch results
pub type Result<T> = std::result::Result<T, IndirectError>;
