//! Reader trait.

use crate::core::RawVar;
use crate::error::Result;

/// A source of raw variables.
///
/// Implement this trait to create custom readers (e.g., secret stores, command
/// line flags). A reader is run exactly once per `bind`; its output is the
/// reader's whole contribution for that bind.
///
/// Any `Fn() -> Result<Vec<RawVar>>` closure is also a reader:
///
/// ```rust
/// use kosei::prelude::*;
///
/// let reader = || -> Result<Vec<RawVar>> {
///     Ok(vec![RawVar::new("REGION", "eu-west-1", Source::Bound)])
/// };
/// assert_eq!(reader.read().unwrap().len(), 1);
/// ```
pub trait Reader: Send + Sync {
    /// Produce the raw variables of this source.
    ///
    /// A source with nothing to offer (e.g., no environment file found) returns
    /// an empty list rather than an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the source exists but cannot be read or parsed.
    fn read(&self) -> Result<Vec<RawVar>>;

    /// Get a human-readable name for this reader (for logging/debugging).
    fn name(&self) -> String;
}

impl<F> Reader for F
where
    F: Fn() -> Result<Vec<RawVar>> + Send + Sync,
{
    fn read(&self) -> Result<Vec<RawVar>> {
        self()
    }

    fn name(&self) -> String {
        "custom".to_string()
    }
}
