//! Raw and resolved variables, with their provenance.

use super::{Type, Value};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// The channel a raw value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Source {
    /// Overrides passed to `Configuration::bind`.
    Overridden,
    /// A caller-supplied map configured as a reader.
    Bound,
    /// The process environment.
    EnvVar,
    /// A configuration file (YAML, TOML, JSON).
    File,
    /// An environment file.
    Dotenv,
}

impl Source {
    /// Upper-case tag name, as shown in tables and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Overridden => "OVERRIDDEN",
            Self::Bound => "BOUND",
            Self::EnvVar => "ENVVAR",
            Self::File => "FILE",
            Self::Dotenv => "DOTENV",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An untyped value as captured by a reader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawVar {
    /// Variable name
    pub name: String,
    /// Raw text
    pub value: String,
    /// Where the value came from
    pub source: Source,
    /// File the value was read from, if any
    pub path: Option<PathBuf>,
}

impl RawVar {
    /// Create a raw variable without a path.
    pub fn new(name: impl Into<String>, value: impl Into<String>, source: Source) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            source,
            path: None,
        }
    }

    /// Attach the originating file path.
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }
}

/// A typed, validated configuration value with its provenance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Variable {
    /// Variable name
    pub name: String,
    /// Coerced value
    pub value: Value,
    /// Raw text the value was coerced from
    pub original: String,
    /// Where the winning raw value came from
    pub source: Source,
    /// Declared type
    #[serde(rename = "type")]
    pub ty: Type,
    /// File the winning raw value was read from, if any
    pub path: Option<PathBuf>,
}

impl Variable {
    /// The originating file path, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

/// Snapshot of every variable resolved by one successful `validate`.
///
/// Iteration is sorted by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ResolvedVariables {
    vars: BTreeMap<String, Variable>,
}

impl ResolvedVariables {
    pub(crate) fn from_variables(vars: impl IntoIterator<Item = Variable>) -> Self {
        Self {
            vars: vars.into_iter().map(|v| (v.name.clone(), v)).collect(),
        }
    }

    /// Look up a resolved variable.
    pub fn get(&self, name: &str) -> Option<&Variable> {
        self.vars.get(name)
    }

    /// Whether `name` was resolved.
    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    /// Variables sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = &Variable> {
        self.vars.values()
    }

    /// Number of resolved variables.
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Whether nothing was resolved.
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Name to typed value for every resolved variable.
    pub fn as_mapping(&self) -> BTreeMap<String, Value> {
        self.vars
            .iter()
            .map(|(name, var)| (name.clone(), var.value.clone()))
            .collect()
    }
}

impl<'a> IntoIterator for &'a ResolvedVariables {
    type Item = &'a Variable;
    type IntoIter = std::collections::btree_map::Values<'a, String, Variable>;

    fn into_iter(self) -> Self::IntoIter {
        self.vars.values()
    }
}

#[cfg(feature = "console")]
impl fmt::Display for ResolvedVariables {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&crate::console::Table::new(self), f)
    }
}

#[cfg(not(feature = "console"))]
impl fmt::Display for ResolvedVariables {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for var in self.iter() {
            writeln!(f, "{}={} ({}, {})", var.name, var.value, var.ty, var.source)?;
        }
        Ok(())
    }
}
