//! Variadic Error Handling
//!
//! Every failure the crate can produce is a [`VariadicError`]. Binding failures
//! reproduce the wording a native call with the same declared shape would use,
//! so a wrapped function fails exactly like the function it replaces.
//!
//! Errors fall into four categories (see [`ErrorCategory`]):
//!
//! - **Shape**: the declared parameters do not fit the chosen calling convention.
//!   Raised once, when the wrapper is built.
//! - **Binding**: the caller's arguments do not fit the declared parameters.
//! - **NotIterable**: a non-atomic group value cannot be expanded. Raised lazily,
//!   when flattening reaches that value.
//! - **Raised**: anything the wrapped body reports itself. Passed through untouched.

use miette::Diagnostic;
use thiserror::Error;

use crate::signature::Convention;

/// The single error type for wrapping, binding, flattening and calling.
#[derive(Debug, Clone, PartialEq, Error, Diagnostic)]
pub enum VariadicError {
    #[error("{function}() cannot be made variadic as a {convention} function: {reason}")]
    #[diagnostic(
        code(variadic::shape::invalid),
        help(
            "declare either a single group parameter, or a `*rest` slot optionally \
             followed by `**keywords`"
        )
    )]
    Shape {
        function: String,
        convention: Convention,
        reason: String,
    },

    #[error(
        "{function}() missing {} required positional argument{}: {}",
        .names.len(),
        names_plural(.names),
        quote_names(.names)
    )]
    #[diagnostic(code(variadic::binding::missing_arguments))]
    MissingArguments { function: String, names: Vec<String> },

    #[error(
        "{function}() takes {} positional argument{} but {given} {} given",
        takes(.min, .max),
        plural(.max),
        was_or_were(.given)
    )]
    #[diagnostic(code(variadic::binding::too_many_positional))]
    TooManyPositional {
        function: String,
        min: usize,
        max: usize,
        given: usize,
    },

    #[error("{function}() got multiple values for argument '{name}'")]
    #[diagnostic(code(variadic::binding::multiple_values))]
    MultipleValues { function: String, name: String },

    #[error("{function}() got an unexpected keyword argument '{keyword}'")]
    #[diagnostic(
        code(variadic::binding::unexpected_keyword),
        help("this function declares no `**keywords` capture")
    )]
    UnexpectedKeyword { function: String, keyword: String },

    #[error("'{type_name}' object is not iterable")]
    #[diagnostic(
        code(variadic::flatten::not_iterable),
        help(
            "pass a value of the atomic type, or a list, tuple, range, string, map \
             or iterator of them"
        )
    )]
    NotIterable { type_name: &'static str },

    #[error("{message}")]
    #[diagnostic(code(variadic::raised))]
    Raised { message: String },
}

impl VariadicError {
    /// Builds the failure a function body reports on its own.
    pub fn raised(message: impl Into<String>) -> Self {
        Self::Raised {
            message: message.into(),
        }
    }

    pub fn shape(function: &str, convention: Convention, reason: impl Into<String>) -> Self {
        Self::Shape {
            function: function.to_string(),
            convention,
            reason: reason.into(),
        }
    }

    /// Get the error category for test assertions
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Shape { .. } => ErrorCategory::Shape,
            Self::MissingArguments { .. }
            | Self::TooManyPositional { .. }
            | Self::MultipleValues { .. }
            | Self::UnexpectedKeyword { .. } => ErrorCategory::Binding,
            Self::NotIterable { .. } => ErrorCategory::NotIterable,
            Self::Raised { .. } => ErrorCategory::Raised,
        }
    }

    /// Get error code suffix for diagnostic codes
    pub const fn code_suffix(&self) -> &'static str {
        match self {
            Self::Shape { .. } => "invalid_shape",
            Self::MissingArguments { .. } => "missing_arguments",
            Self::TooManyPositional { .. } => "too_many_positional",
            Self::MultipleValues { .. } => "multiple_values",
            Self::UnexpectedKeyword { .. } => "unexpected_keyword",
            Self::NotIterable { .. } => "not_iterable",
            Self::Raised { .. } => "raised",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Shape,
    Binding,
    NotIterable,
    Raised,
}

// ============================================================================
// MESSAGE HELPERS
// ============================================================================

fn plural(count: &usize) -> &'static str {
    if *count == 1 {
        ""
    } else {
        "s"
    }
}

fn names_plural(names: &[String]) -> &'static str {
    plural(&names.len())
}

fn was_or_were(count: &usize) -> &'static str {
    if *count == 1 {
        "was"
    } else {
        "were"
    }
}

fn takes(min: &usize, max: &usize) -> String {
    if min == max {
        max.to_string()
    } else {
        format!("from {} to {}", min, max)
    }
}

/// Joins names the way native arity errors list them: `'a'`, `'a' and 'b'`,
/// `'a', 'b', and 'c'`.
fn quote_names(names: &[String]) -> String {
    let quoted: Vec<String> = names.iter().map(|n| format!("'{}'", n)).collect();
    match quoted.as_slice() {
        [] => String::new(),
        [only] => only.clone(),
        [first, second] => format!("{} and {}", first, second),
        [init @ .., last] => format!("{}, and {}", init.join(", "), last),
    }
}
