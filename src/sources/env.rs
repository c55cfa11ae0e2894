//! Process environment reader.

use super::Reader;
use crate::core::{RawVar, Source};
use crate::error::Result;
use std::env;

/// Process environment reader.
///
/// Produces one raw variable per environment variable, tagged
/// [`Source::EnvVar`]. The environment is snapshotted each time the reader
/// runs. Variables whose name or value is not valid UTF-8 are skipped.
///
/// # Examples
///
/// ```rust
/// use kosei::sources::EnvReader;
///
/// // Every variable, names unchanged
/// let all = EnvReader::new();
///
/// // APP_PORT=8080 -> PORT = 8080
/// let scoped = EnvReader::with_prefix("APP_");
/// ```
#[derive(Debug, Clone, Default)]
pub struct EnvReader {
    prefix: Option<String>,
}

impl EnvReader {
    /// Create a reader over the whole process environment.
    pub fn new() -> Self {
        Self { prefix: None }
    }

    /// Create a reader that only keeps variables starting with `prefix`.
    ///
    /// The prefix is stripped from the resulting names.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
        }
    }

    fn rename<'a>(&self, name: &'a str) -> Option<&'a str> {
        match &self.prefix {
            Some(prefix) => name.strip_prefix(prefix.as_str()).filter(|n| !n.is_empty()),
            None => Some(name),
        }
    }
}

impl Reader for EnvReader {
    fn read(&self) -> Result<Vec<RawVar>> {
        let mut vars = Vec::new();
        for (key, value) in env::vars_os() {
            let (Some(key), Some(value)) = (key.to_str(), value.to_str()) else {
                tracing::warn!(key = ?key, "skipping non UTF-8 environment variable");
                continue;
            };
            if let Some(name) = self.rename(key) {
                vars.push(RawVar::new(name, value, Source::EnvVar));
            }
        }
        Ok(vars)
    }

    fn name(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!("env:{}*", prefix),
            None => "env".to_string(),
        }
    }
}

#[cfg(test)]
#[allow(unsafe_code)] // For env var manipulation in tests
mod tests {
    use super::*;

    #[test]
    fn test_name() {
        assert_eq!(EnvReader::new().name(), "env");
        assert_eq!(EnvReader::with_prefix("APP_").name(), "env:APP_*");
    }

    #[test]
    fn test_reads_process_environment() {
        unsafe {
            env::set_var("KOSEI_ENV_UNIT_VALUE", "42");
        }

        let vars = EnvReader::new().read().unwrap();
        let var = vars
            .iter()
            .find(|v| v.name == "KOSEI_ENV_UNIT_VALUE")
            .expect("variable should be read");
        assert_eq!(var.value, "42");
        assert_eq!(var.source, Source::EnvVar);
        assert!(var.path.is_none());
    }

    #[test]
    fn test_prefix_filters_and_strips() {
        unsafe {
            env::set_var("KOSEI_PREFIX_UNIT_HOST", "localhost");
            env::set_var("KOSEI_PREFIX_UNIT_", "ignored");
        }

        let vars = EnvReader::with_prefix("KOSEI_PREFIX_UNIT_").read().unwrap();
        assert_eq!(vars.len(), 1);
        assert_eq!(vars[0].name, "HOST");
        assert_eq!(vars[0].value, "localhost");
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_values_are_skipped() {
        use std::ffi::OsString;
        use std::os::unix::ffi::OsStringExt;

        unsafe {
            env::set_var("KOSEI_NONUTF8_UNIT_GOOD", "ok");
            env::set_var(
                "KOSEI_NONUTF8_UNIT_BAD",
                OsString::from_vec(vec![b'f', b'o', 0x80, b'o']),
            );
        }

        let vars = EnvReader::with_prefix("KOSEI_NONUTF8_UNIT_").read().unwrap();
        let names: Vec<_> = vars.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["GOOD"]);
        assert_eq!(vars[0].value, "ok");
    }

    #[test]
    fn test_unmatched_prefix_is_empty() {
        let vars = EnvReader::with_prefix("KOSEI_NONEXISTENT_PREFIX_").read().unwrap();
        assert!(vars.is_empty());
    }
}
