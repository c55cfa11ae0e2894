//! In-memory readers: defaults and bind overrides.

use super::Reader;
use crate::core::{RawVar, Source};
use crate::error::Result;

/// Reader over a caller-supplied list of name/value pairs.
///
/// Values are stringified when the reader is built. Entry order is kept, so a
/// repeated name resolves to its last value.
///
/// # Examples
///
/// ```rust
/// use kosei::sources::{MapReader, Reader};
///
/// let defaults = MapReader::new([("PORT", 8080), ("WORKERS", 4)]);
/// let vars = defaults.read().unwrap();
/// assert_eq!(vars[0].value, "8080");
/// ```
#[derive(Debug, Clone)]
pub struct MapReader {
    entries: Vec<(String, String)>,
    source: Source,
}

impl MapReader {
    /// Create a reader whose values are tagged [`Source::Bound`].
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: ToString,
    {
        Self::with_source(entries, Source::Bound)
    }

    /// Create the override reader used by `bind`; values are tagged
    /// [`Source::Overridden`].
    pub fn overrides<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: ToString,
    {
        Self::with_source(entries, Source::Overridden)
    }

    fn with_source<I, K, V>(entries: I, source: Source) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: ToString,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.to_string()))
                .collect(),
            source,
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Reader for MapReader {
    fn read(&self) -> Result<Vec<RawVar>> {
        Ok(self
            .entries
            .iter()
            .map(|(name, value)| RawVar::new(name.clone(), value.clone(), self.source))
            .collect())
    }

    fn name(&self) -> String {
        match self.source {
            Source::Overridden => "overrides".to_string(),
            _ => "map".to_string(),
        }
    }
}
