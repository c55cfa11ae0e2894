//! Environment file reader.

use super::Reader;
use crate::core::{RawVar, Source};
use crate::error::{ConfigError, Result};
use std::env;
use std::path::{Path, PathBuf};

const DEFAULT_FILENAME: &str = ".env";

/// Environment file reader.
///
/// Looks for an environment file (`.env` by default) in the start directory
/// and then in each parent directory, and reads the first one found. Finding
/// no file is not an error: the reader produces nothing.
///
/// The file is parsed with `dotenvy`; the process environment is never
/// modified. Values are tagged [`Source::Dotenv`] and carry the file path.
///
/// # Examples
///
/// ```rust,no_run
/// use kosei::sources::DotenvReader;
///
/// // Search upward from the current directory when the reader runs
/// let reader = DotenvReader::new();
///
/// // Search upward from a fixed directory for `settings.env`
/// let reader = DotenvReader::from_dir("/srv/app").with_filename("settings.env");
/// ```
#[derive(Debug, Clone)]
pub struct DotenvReader {
    start: Option<PathBuf>,
    filename: String,
}

impl DotenvReader {
    /// Create a reader that searches upward from the current directory.
    pub fn new() -> Self {
        Self {
            start: None,
            filename: DEFAULT_FILENAME.to_string(),
        }
    }

    /// Create a reader that searches upward from `dir`.
    pub fn from_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            start: Some(dir.into()),
            filename: DEFAULT_FILENAME.to_string(),
        }
    }

    /// Look for `filename` instead of `.env`.
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = filename.into();
        self
    }

    /// Locate the environment file, if there is one.
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory cannot be determined.
    pub fn find(&self) -> Result<Option<PathBuf>> {
        let start = match &self.start {
            Some(dir) => dir.clone(),
            None => env::current_dir()?,
        };
        Ok(find_upward(&start, &self.filename))
    }
}

impl Default for DotenvReader {
    fn default() -> Self {
        Self::new()
    }
}

fn find_upward(start: &Path, filename: &str) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(filename))
        .find(|candidate| candidate.is_file())
}

impl Reader for DotenvReader {
    fn read(&self) -> Result<Vec<RawVar>> {
        let Some(path) = self.find()? else {
            tracing::debug!(filename = %self.filename, "no environment file found");
            return Ok(Vec::new());
        };

        let entries = dotenvy::from_path_iter(&path).map_err(|e| {
            ConfigError::LoadError(format!("Failed to open {}: {}", path.display(), e))
        })?;

        let mut vars = Vec::new();
        for entry in entries {
            let (name, value) = entry.map_err(|e| {
                ConfigError::LoadError(format!("Failed to parse {}: {}", path.display(), e))
            })?;
            vars.push(RawVar::new(name, value, Source::Dotenv).with_path(&path));
        }

        tracing::debug!(path = %path.display(), count = vars.len(), "read environment file");
        Ok(vars)
    }

    fn name(&self) -> String {
        format!("dotenv:{}", self.filename)
    }
}
