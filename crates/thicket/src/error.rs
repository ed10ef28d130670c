//! Runtime error taxonomy.
//!
//! Hand-rolled rather than built on `thiserror`: the rest of this interpreter
//! doesn't pull in an error-derive crate, so `InterpError` follows the plain
//! `enum` + manual `Display` shape instead. Every variant's rendering matches
//! the original interpreter's bracketed-tag style, e.g. `[CastingError] ...`.

use std::fmt;

use crate::value::Value;

pub type RunResult<T> = Result<T, InterpError>;

/// A fatal interpreter error. All variants are unrecoverable from inside the
/// language: only `return` and `break` (modeled separately as `Signal`) can be
/// caught, by the nearest closure call and `while` loop respectively.
#[derive(Debug, Clone)]
pub enum InterpError {
    /// Unbalanced brackets in source text.
    Parse { message: String },
    /// A builtin's argument vector did not match its declared type pattern.
    Casting { expected: String, actual: String },
    /// Reference to an unbound variable.
    Name { name: String },
    /// Out-of-bounds access, zero step, division/mod by zero, closure arity
    /// mismatch, or other value-domain violation.
    Domain { message: String },
    /// A tag was asked to do something it has no definition for (e.g.
    /// truthiness of a `Builtin`).
    NotImplemented { type_name: String, operation: String },
    /// The host regex engine rejected a pattern or failed to compile it.
    Regex { message: String },
    /// Closure call nesting exceeded the recursion depth bound.
    ScopeOverflow,
    /// A `while` loop ran past its iteration cap without terminating.
    InfiniteLoop,
    /// `assert` failed.
    Assertion { message: String },
}

impl InterpError {
    pub fn casting(expected: impl Into<String>, actual: &[Value]) -> Self {
        let actual = actual
            .iter()
            .map(Value::to_repr)
            .collect::<Vec<_>>()
            .join(" ");
        Self::Casting {
            expected: expected.into(),
            actual: format!("[{actual}]"),
        }
    }

    pub fn name(name: impl Into<String>) -> Self {
        Self::Name { name: name.into() }
    }

    pub fn domain(message: impl Into<String>) -> Self {
        Self::Domain {
            message: message.into(),
        }
    }

    pub fn not_implemented(type_name: impl Into<String>, operation: impl Into<String>) -> Self {
        Self::NotImplemented {
            type_name: type_name.into(),
            operation: operation.into(),
        }
    }

    /// Exit status mandated by spec.md §6: `0` only for a clean run; every
    /// fatal error exits `1` (the `exit` builtin may still choose otherwise).
    pub fn exit_code(&self) -> u8 {
        1
    }
}

impl fmt::Display for InterpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse { message } => write!(f, "[ParseError] {message}"),
            Self::Casting { expected, actual } => {
                write!(
                    f,
                    "[CastingError] Could not cast `{actual}` to signature `{expected}`."
                )
            }
            Self::Name { name } => {
                write!(f, "[NameError] Could not resolve variable name '{name}'")
            }
            Self::Domain { message } => write!(f, "[DomainError] {message}"),
            Self::NotImplemented {
                type_name,
                operation,
            } => write!(
                f,
                "[NotImplementedError] Type '{type_name}' does not implement `{operation}`."
            ),
            Self::Regex { message } => write!(f, "[RegexError] {message}"),
            Self::ScopeOverflow => write!(f, "[ScopeOverflowError] closure recursion depth exceeded"),
            Self::InfiniteLoop => write!(f, "[InfiniteLoopError] while loop exceeded iteration cap"),
            Self::Assertion { message } => write!(f, "[AssertionError] {message}"),
        }
    }
}

impl std::error::Error for InterpError {}
