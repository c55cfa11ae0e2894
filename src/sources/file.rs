//! File-based reader.

use super::Reader;
use crate::core::{RawVar, Source};
use crate::error::{ConfigError, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// File-based reader.
///
/// Loads top-level keys from YAML, TOML, or JSON files with automatic format
/// detection based on file extension. Key names are kept exactly as written.
/// Scalar values are converted to their textual form and tagged
/// [`Source::File`]; nested tables and arrays are skipped since variables are
/// flat names.
///
/// A missing file produces nothing unless the reader is marked
/// [`required`](FileReader::required).
///
/// # Examples
///
/// ```rust,no_run
/// use kosei::sources::FileReader;
///
/// let reader = FileReader::new("config/default.yaml");
/// let strict = FileReader::new("config/production.toml").required();
/// ```
#[derive(Debug, Clone)]
pub struct FileReader {
    path: PathBuf,
    required: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Yaml,
    Toml,
    Json,
}

/// A top-level entry of a configuration file.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Entry {
    Null(()),
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Nested(#[allow(dead_code)] serde::de::IgnoredAny),
}

impl FileReader {
    /// Create a new file reader with automatic format detection.
    ///
    /// The format is detected from the file extension:
    /// - `.yaml`, `.yml` -> YAML
    /// - `.toml` -> TOML
    /// - `.json` -> JSON
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            required: false,
        }
    }

    /// Fail the bind when the file does not exist.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Validate that the file extension is supported.
    fn validate_extension(&self) -> Result<Format> {
        let extension = self
            .path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| {
                ConfigError::LoadError(format!(
                    "Unable to determine file format for: {}",
                    self.path.display()
                ))
            })?;

        match extension {
            "yaml" | "yml" => Ok(Format::Yaml),
            "toml" => Ok(Format::Toml),
            "json" => Ok(Format::Json),
            _ => Err(ConfigError::LoadError(format!(
                "Unsupported file extension: {}. Supported: .yaml, .yml, .toml, .json",
                extension
            ))),
        }
    }
}

fn parse(format: Format, path: &Path, text: &str) -> Result<BTreeMap<String, Entry>> {
    let parsed: std::result::Result<BTreeMap<String, Entry>, String> = match format {
        #[cfg(feature = "yaml")]
        Format::Yaml => {
            if text.trim().is_empty() {
                return Ok(BTreeMap::new());
            }
            serde_yaml::from_str(text).map_err(|e| e.to_string())
        }
        #[cfg(feature = "toml")]
        Format::Toml => toml::from_str(text).map_err(|e| e.to_string()),
        #[cfg(feature = "json")]
        Format::Json => serde_json::from_str(text).map_err(|e| e.to_string()),
        #[allow(unreachable_patterns)]
        other => {
            return Err(ConfigError::LoadError(format!(
                "Support for {:?} files is not enabled: {}",
                other,
                path.display()
            )));
        }
    };

    parsed.map_err(|e| {
        ConfigError::LoadError(format!("Failed to parse {}: {}", path.display(), e))
    })
}

impl Reader for FileReader {
    fn read(&self) -> Result<Vec<RawVar>> {
        let format = self.validate_extension()?;

        if !self.path.is_file() {
            if self.required {
                return Err(ConfigError::LoadError(format!(
                    "Configuration file not found: {}",
                    self.path.display()
                )));
            }
            tracing::debug!(path = %self.path.display(), "optional configuration file not found");
            return Ok(Vec::new());
        }

        let text = fs::read_to_string(&self.path)?;
        let entries = parse(format, &self.path, &text)?;

        let mut vars = Vec::with_capacity(entries.len());
        for (name, entry) in entries {
            let text = match entry {
                Entry::Null(()) => continue,
                Entry::Nested(_) => {
                    tracing::warn!(
                        key = %name,
                        path = %self.path.display(),
                        "skipping nested value in configuration file"
                    );
                    continue;
                }
                Entry::Boolean(b) => b.to_string(),
                Entry::Integer(n) => n.to_string(),
                Entry::Float(x) => x.to_string(),
                Entry::String(s) => s,
            };
            vars.push(RawVar::new(name, text, Source::File).with_path(&self.path));
        }

        tracing::debug!(path = %self.path.display(), count = vars.len(), "read configuration file");
        Ok(vars)
    }

    fn name(&self) -> String {
        format!("file:{}", self.path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn names(vars: &[RawVar]) -> Vec<&str> {
        vars.iter().map(|v| v.name.as_str()).collect()
    }

    #[test]
    fn test_validate_extension_yaml() {
        let reader = FileReader::new("config.yaml");
        assert_eq!(reader.validate_extension().unwrap(), Format::Yaml);

        let reader = FileReader::new("config.yml");
        assert_eq!(reader.validate_extension().unwrap(), Format::Yaml);
    }

    #[test]
    fn test_validate_extension_toml_and_json() {
        assert_eq!(
            FileReader::new("config.toml").validate_extension().unwrap(),
            Format::Toml
        );
        assert_eq!(
            FileReader::new("config.json").validate_extension().unwrap(),
            Format::Json
        );
    }

    #[test]
    fn test_validate_extension_unknown() {
        let reader = FileReader::new("config.txt");
        assert!(reader.validate_extension().is_err());
        assert!(reader.read().is_err());
    }

    #[cfg(feature = "yaml")]
    #[test]
    fn test_load_yaml_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        fs::write(
            &config_path,
            r#"
port: 8080
host: localhost
debug: true
unset: ~
server:
  nested: ignored
tags: [a, b]
"#,
        )
        .unwrap();

        let vars = FileReader::new(&config_path).read().unwrap();
        assert_eq!(names(&vars), vec!["debug", "host", "port"]);

        let port = vars.iter().find(|v| v.name == "port").unwrap();
        assert_eq!(port.value, "8080");
        assert_eq!(port.source, Source::File);
        assert_eq!(port.path.as_deref(), Some(config_path.as_path()));

        let debug = vars.iter().find(|v| v.name == "debug").unwrap();
        assert_eq!(debug.value, "true");
    }

    #[cfg(feature = "yaml")]
    #[test]
    fn test_key_case_is_preserved() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("service.yaml");
        fs::write(&config_path, "PORT: 9000\nHOST: example\nLogLevel: info\n").unwrap();

        let vars = FileReader::new(&config_path).read().unwrap();
        assert_eq!(names(&vars), vec!["HOST", "LogLevel", "PORT"]);
        assert_eq!(vars[2].value, "9000");
    }

    #[cfg(feature = "yaml")]
    #[test]
    fn test_empty_yaml_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("empty.yaml");
        fs::write(&config_path, "\n").unwrap();

        assert!(FileReader::new(&config_path).read().unwrap().is_empty());
    }

    #[cfg(feature = "yaml")]
    #[test]
    fn test_malformed_yaml_fails() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("broken.yaml");
        fs::write(&config_path, "port: [8080\n").unwrap();

        let err = FileReader::new(&config_path).read().unwrap_err();
        assert!(matches!(err, ConfigError::LoadError(ref msg) if msg.contains("broken.yaml")));
    }

    #[cfg(feature = "toml")]
    #[test]
    fn test_load_toml_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        fs::write(
            &config_path,
            "Workers = 4\nratio = 0.5\nNAME = \"api\"\n\n[server]\nport = 1\n",
        )
        .unwrap();

        let vars = FileReader::new(&config_path).read().unwrap();
        assert_eq!(names(&vars), vec!["NAME", "Workers", "ratio"]);
        let workers = vars.iter().find(|v| v.name == "Workers").unwrap();
        assert_eq!(workers.value, "4");
        let ratio = vars.iter().find(|v| v.name == "ratio").unwrap();
        assert_eq!(ratio.value, "0.5");
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_load_json_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.json");
        fs::write(
            &config_path,
            r#"{"API_URL": "https://example.com", "Retries": 3, "verbose": false, "extra": null}"#,
        )
        .unwrap();

        let vars = FileReader::new(&config_path).read().unwrap();
        assert_eq!(names(&vars), vec!["API_URL", "Retries", "verbose"]);
        assert_eq!(vars[1].value, "3");
        assert_eq!(vars[2].value, "false");
    }

    #[test]
    fn test_missing_optional_file_is_empty() {
        let reader = FileReader::new("/nonexistent/config.yaml");
        assert!(reader.read().unwrap().is_empty());
    }

    #[test]
    fn test_missing_required_file_fails() {
        let reader = FileReader::new("/nonexistent/config.yaml").required();
        assert!(reader.read().is_err());
    }

    #[test]
    fn test_name() {
        let reader = FileReader::new("config.yaml");
        assert!(reader.name().contains("config.yaml"));
    }
}
