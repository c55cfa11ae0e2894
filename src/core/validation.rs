//! Per-variable validators.
//!
//! A [`Validator`] runs after a raw value has been coerced to its declared type
//! and either accepts it or rejects it with a [`Rejection`] carrying a
//! human-readable reason.
//!
//! # Examples
//!
//! ```rust
//! use kosei::core::{validation, Validator, Value};
//!
//! let name = validation::starts_with("My").and(validation::length(..=16));
//! assert!(name.check(&Value::from("MyService")).is_ok());
//!
//! let err = name.check(&Value::from("Variable")).unwrap_err();
//! assert_eq!(err.reason(), "'Variable' does not start with 'My'");
//!
//! let even = Validator::from_fn(|value| match value.as_i64() {
//!     Some(n) if n % 2 == 0 => Ok(()),
//!     _ => Err(format!("{} is not even", value).into()),
//! });
//! assert!(even.check(&Value::Integer(4)).is_ok());
//! ```

use super::Value;
use std::fmt;
use std::ops::RangeBounds;
use std::sync::Arc;

/// Reason a validator refused a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    reason: String,
}

impl Rejection {
    /// Create a rejection with a reason.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    /// The human-readable reason.
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.reason)
    }
}

impl std::error::Error for Rejection {}

impl From<String> for Rejection {
    fn from(reason: String) -> Self {
        Self::new(reason)
    }
}

impl From<&str> for Rejection {
    fn from(reason: &str) -> Self {
        Self::new(reason)
    }
}

type CheckFn = dyn Fn(&Value) -> Result<(), Rejection> + Send + Sync;

/// A composable accept/reject check over a coerced value.
#[derive(Clone)]
pub struct Validator {
    check: Arc<CheckFn>,
}

impl Validator {
    /// Wrap a function as a validator.
    pub fn from_fn<F>(check: F) -> Self
    where
        F: Fn(&Value) -> Result<(), Rejection> + Send + Sync + 'static,
    {
        Self {
            check: Arc::new(check),
        }
    }

    /// Run the validator against a value.
    ///
    /// # Errors
    ///
    /// Returns the [`Rejection`] produced by the check.
    pub fn check(&self, value: &Value) -> Result<(), Rejection> {
        (self.check)(value)
    }

    /// Combine with another validator; both must accept, this one runs first.
    pub fn and(self, other: Validator) -> Self {
        Self::from_fn(move |value| {
            self.check(value)?;
            other.check(value)
        })
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Validator(..)")
    }
}

/// Accept strings that start with `prefix`.
pub fn starts_with(prefix: impl Into<String>) -> Validator {
    let prefix = prefix.into();
    Validator::from_fn(move |value| match value {
        Value::String(s) if s.starts_with(prefix.as_str()) => Ok(()),
        other => Err(Rejection::new(format!(
            "'{}' does not start with '{}'",
            other, prefix
        ))),
    })
}

/// Accept values equal to one of `choices`.
pub fn one_of<I, V>(choices: I) -> Validator
where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
{
    let choices: Vec<Value> = choices.into_iter().map(Into::into).collect();
    Validator::from_fn(move |value| {
        if choices.contains(value) {
            Ok(())
        } else {
            let listed = choices
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            Err(Rejection::new(format!("'{}' is not one of: {}", value, listed)))
        }
    })
}

/// Accept integers inside `range`.
pub fn range<R>(range: R) -> Validator
where
    R: RangeBounds<i64> + fmt::Debug + Send + Sync + 'static,
{
    Validator::from_fn(move |value| match value.as_i64() {
        Some(n) if range.contains(&n) => Ok(()),
        Some(n) => Err(Rejection::new(format!("{} is not in {:?}", n, range))),
        None => Err(Rejection::new(format!("'{}' is not an integer", value))),
    })
}

/// Accept numbers (integers or floats) inside `range`.
pub fn float_range<R>(range: R) -> Validator
where
    R: RangeBounds<f64> + fmt::Debug + Send + Sync + 'static,
{
    Validator::from_fn(move |value| match value.as_f64() {
        Some(n) if range.contains(&n) => Ok(()),
        Some(n) => Err(Rejection::new(format!("{} is not in {:?}", n, range))),
        None => Err(Rejection::new(format!("'{}' is not a number", value))),
    })
}

/// Accept strings whose length in characters is inside `range`.
pub fn length<R>(range: R) -> Validator
where
    R: RangeBounds<usize> + fmt::Debug + Send + Sync + 'static,
{
    Validator::from_fn(move |value| match value {
        Value::String(s) => {
            let len = s.chars().count();
            if range.contains(&len) {
                Ok(())
            } else {
                Err(Rejection::new(format!(
                    "length {} is not in {:?}",
                    len, range
                )))
            }
        }
        other => Err(Rejection::new(format!("'{}' is not a string", other))),
    })
}

/// Reject strings that are empty or only whitespace.
pub fn non_empty() -> Validator {
    Validator::from_fn(|value| match value {
        Value::String(s) if s.trim().is_empty() => Err(Rejection::new("must not be blank")),
        _ => Ok(()),
    })
}
