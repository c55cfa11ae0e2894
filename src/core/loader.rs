//! Runs readers and captures their output as ordered batches.

use crate::core::RawVar;
use crate::error::{ConfigError, Result};
use crate::sources::{MapReader, Reader};

/// The output of one reader invocation during a bind.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Batch {
    pub(crate) reader: String,
    pub(crate) vars: Vec<RawVar>,
}

/// Runs the configured readers in order.
///
/// Precedence is the order readers were added: a later reader wins over an
/// earlier one. The override reader passed to [`load`](ConfigLoader::load) is
/// always run last.
pub(crate) struct ConfigLoader {
    readers: Vec<Box<dyn Reader>>,
}

impl ConfigLoader {
    /// Create a new loader with no readers.
    pub(crate) fn new() -> Self {
        Self {
            readers: Vec::new(),
        }
    }

    /// Add a reader with higher precedence than every reader added before it.
    pub(crate) fn add_reader(&mut self, reader: Box<dyn Reader>) {
        self.readers.push(reader);
    }

    /// Run every reader exactly once, then `overrides`.
    ///
    /// # Errors
    ///
    /// Returns the first reader failure; no partial batches are returned.
    pub(crate) fn load(&self, overrides: &MapReader) -> Result<Vec<Batch>> {
        let mut batches = Vec::with_capacity(self.readers.len() + 1);
        for reader in &self.readers {
            batches.push(capture(reader.as_ref())?);
        }
        batches.push(capture(overrides)?);
        Ok(batches)
    }

    /// Reader names in precedence order, lowest first.
    pub(crate) fn reader_names(&self) -> Vec<String> {
        self.readers.iter().map(|r| r.name()).collect()
    }
}

fn capture(reader: &dyn Reader) -> Result<Batch> {
    let name = reader.name();
    let vars = reader.read().map_err(|e| match e {
        ConfigError::LoadError(msg) => ConfigError::LoadError(format!("reader '{}': {}", name, msg)),
        other => other,
    })?;
    tracing::debug!(reader = %name, count = vars.len(), "captured reader batch");
    Ok(Batch { reader: name, vars })
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
