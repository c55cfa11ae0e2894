//! Error types for kosei.

use crate::core::Type;
use std::fmt;

/// Result type alias for kosei operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur when working with configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An operation was invoked in the wrong lifecycle state.
    #[error("Invalid usage: {0}")]
    Usage(#[from] UsageError),

    /// The requested variable was never declared, or was optional and absent.
    #[error("Unknown configuration variable: {0}")]
    UnknownField(String),

    /// A variable with the same name has already been declared.
    #[error("Variable '{0}' is already declared")]
    DuplicateDeclaration(String),

    /// A reader failed to produce its values.
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    /// Resolved values did not satisfy their declarations.
    #[error("Configuration validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// IO error occurred.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ConfigError {
    /// Returns the validation error, if this is one.
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

/// Lifecycle misuse: the operation is not allowed in the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum UsageError {
    /// `validate` was called before any `bind`.
    #[error("no data bound")]
    NotBound,

    /// Resolved values were requested before a successful `validate`.
    #[error("settings are not validated")]
    NotValidated,
}

/// Validation error for a single declared variable, or several of them.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A required variable had no value in any source.
    MissingRequired {
        /// The variable name
        field: String,
    },

    /// The raw text could not be parsed as the declared type.
    Coercion {
        /// The variable name
        field: String,
        /// The raw text that failed to parse
        value: String,
        /// The declared type
        expected: Type,
        /// Why parsing failed
        reason: String,
    },

    /// The declared validator rejected the parsed value.
    InvalidField {
        /// The variable name
        field: String,
        /// The raw text of the rejected value
        value: String,
        /// The reason given by the validator
        reason: String,
    },

    /// Multiple validation errors occurred.
    Multiple(Vec<ValidationError>),
}

impl ValidationError {
    /// Create a missing required field error.
    pub fn missing(field: impl Into<String>) -> Self {
        Self::MissingRequired {
            field: field.into(),
        }
    }

    /// Create an invalid field error.
    pub fn invalid_field(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidField {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Collapse a list of errors: a single error is returned as-is.
    ///
    /// Returns `None` for an empty list.
    pub fn from_errors(mut errors: Vec<ValidationError>) -> Option<Self> {
        match errors.len() {
            0 => None,
            1 => errors.pop(),
            _ => Some(Self::Multiple(errors)),
        }
    }

    /// The offending variable name, for single-field errors.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::MissingRequired { field }
            | Self::Coercion { field, .. }
            | Self::InvalidField { field, .. } => Some(field),
            Self::Multiple(_) => None,
        }
    }

    /// All single-field errors, with `Multiple` flattened.
    pub fn errors(&self) -> Vec<&ValidationError> {
        match self {
            Self::Multiple(errors) => errors.iter().flat_map(|e| e.errors()).collect(),
            other => vec![other],
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingRequired { field } => write!(f, "Field '{}' is required", field),
            Self::Coercion {
                field,
                value,
                expected,
                reason,
            } => write!(
                f,
                "Field '{}' is not a valid {}: '{}' ({})",
                field, expected, value, reason
            ),
            Self::InvalidField { field, reason, .. } => {
                write!(f, "Field '{}' is invalid: {}", field, reason)
            }
            Self::Multiple(errors) => {
                writeln!(f, "Multiple validation errors:")?;
                for (i, err) in errors.iter().enumerate() {
                    writeln!(f, "  {}. {}", i + 1, err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ValidationError {}
