//! Builder for constructing Configuration instances.

use crate::core::{ConfigLoader, Configuration, Declaration};
use crate::error::Result;
use crate::sources::{EnvReader, FileReader, MapReader, Reader};
use std::path::PathBuf;

#[cfg(feature = "dotenv")]
use crate::sources::DotenvReader;

/// Builder for constructing a [`Configuration`].
///
/// Readers are added in precedence order: each reader wins over every reader
/// added before it. Overrides passed to `bind` always win over all of them.
///
/// # Examples
///
/// ```rust,no_run
/// use kosei::prelude::*;
///
/// # fn example() -> Result<()> {
/// let config = Configuration::builder()
///     .with_defaults([("PORT", "8080"), ("LOG_LEVEL", "info")])
///     .with_file("config/default.yaml")
///     .with_dotenv()
///     .with_env()
///     .declare(Declaration::new("PORT", Type::Integer))
///     .declare(Declaration::new("LOG_LEVEL", Type::String))
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct ConfigurationBuilder {
    readers: Vec<Box<dyn Reader>>,
    declarations: Vec<Declaration>,
}

impl ConfigurationBuilder {
    /// Create a new builder with no readers and no declarations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an environment file reader searching upward from the current directory.
    #[cfg(feature = "dotenv")]
    pub fn with_dotenv(self) -> Self {
        self.with_reader(DotenvReader::new())
    }

    /// Add a reader over the whole process environment.
    pub fn with_env(self) -> Self {
        self.with_reader(EnvReader::new())
    }

    /// Add a reader over environment variables starting with `prefix`, prefix stripped.
    pub fn with_env_prefix(self, prefix: impl Into<String>) -> Self {
        self.with_reader(EnvReader::with_prefix(prefix))
    }

    /// Add an optional YAML, TOML or JSON file.
    pub fn with_file(self, path: impl Into<PathBuf>) -> Self {
        self.with_reader(FileReader::new(path))
    }

    /// Add in-memory values, tagged as bound data.
    pub fn with_defaults<I, K, V>(self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: ToString,
    {
        self.with_reader(MapReader::new(entries))
    }

    /// Add a custom reader.
    pub fn with_reader<R: Reader + 'static>(mut self, reader: R) -> Self {
        self.readers.push(Box::new(reader));
        self
    }

    /// Declare a variable.
    pub fn declare(mut self, declaration: Declaration) -> Self {
        self.declarations.push(declaration);
        self
    }

    /// Build the configuration. Nothing is read until `bind`.
    ///
    /// # Errors
    ///
    /// Returns an error if two declarations share a name.
    pub fn build(self) -> Result<Configuration> {
        let mut loader = ConfigLoader::new();
        for reader in self.readers {
            loader.add_reader(reader);
        }

        let mut config = Configuration::with_loader(loader);
        for declaration in self.declarations {
            config.declare(declaration)?;
        }
        Ok(config)
    }
}
