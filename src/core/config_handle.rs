//! The configuration handle: declarations, bound data and resolved values.

use crate::core::declaration::Registry;
use crate::core::loader::Batch;
use crate::core::{
    ConfigLoader, ConfigurationBuilder, Declaration, ResolvedVariables, Value, Variable, resolve,
};
use crate::error::{ConfigError, Result, UsageError};
use crate::sources::{MapReader, Reader};
use arc_swap::ArcSwapOption;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Lifecycle state of a [`Configuration`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Nothing has been bound yet.
    Unbound,
    /// Raw values are captured but not validated.
    Bound,
    /// The last validation succeeded; values can be read.
    Validated,
}

struct Binding {
    state: State,
    batches: Vec<Batch>,
}

/// Declared variables, the readers that feed them, and the resolved result.
///
/// The handle moves through three states: [`State::Unbound`] until the first
/// [`bind`](Configuration::bind), [`State::Bound`] after each bind, and
/// [`State::Validated`] after a successful [`validate`](Configuration::validate).
/// Values can only be read in the validated state.
///
/// `bind` and `validate` are serialized by an internal lock. Reads load an
/// immutable snapshot and never block.
///
/// # Examples
///
/// ```rust
/// use kosei::prelude::*;
///
/// # fn example() -> Result<()> {
/// let mut config = Configuration::new(vec![
///     Box::new(MapReader::new([("PORT", "3000"), ("HOST", "localhost")])),
/// ]);
/// config.declare(Declaration::new("PORT", Type::Integer))?;
/// config.declare(Declaration::new("HOST", Type::String))?;
///
/// config.bind([("PORT", "8080")])?;
/// config.validate()?;
///
/// let port = config.read("PORT")?;
/// assert_eq!(port.value, Value::Integer(8080));
/// assert_eq!(port.source, Source::Overridden);
/// assert_eq!(config.read("HOST")?.source, Source::Bound);
/// # Ok(())
/// # }
/// # example().unwrap();
/// ```
pub struct Configuration {
    loader: ConfigLoader,
    registry: Registry,
    binding: Mutex<Binding>,
    resolved: ArcSwapOption<ResolvedVariables>,
}

impl Configuration {
    /// Create a configuration over `readers`, lowest precedence first.
    ///
    /// The override reader built by `bind` always runs after these.
    pub fn new(readers: Vec<Box<dyn Reader>>) -> Self {
        let mut loader = ConfigLoader::new();
        for reader in readers {
            loader.add_reader(reader);
        }
        Self::with_loader(loader)
    }

    /// Create a new builder for constructing a configuration.
    pub fn builder() -> ConfigurationBuilder {
        ConfigurationBuilder::new()
    }

    pub(crate) fn with_loader(loader: ConfigLoader) -> Self {
        Self {
            loader,
            registry: Registry::new(),
            binding: Mutex::new(Binding {
                state: State::Unbound,
                batches: Vec::new(),
            }),
            resolved: ArcSwapOption::empty(),
        }
    }

    /// Declare a variable.
    ///
    /// New declarations take part in the next `validate`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DuplicateDeclaration`] if the name is already declared.
    pub fn declare(&mut self, declaration: Declaration) -> Result<()> {
        tracing::trace!(name = declaration.name(), ty = %declaration.ty(), "declared variable");
        self.registry.insert(declaration)
    }

    /// Declarations in the order they were made.
    pub fn declarations(&self) -> impl Iterator<Item = &Declaration> {
        self.registry.iter()
    }

    /// Names of the configured readers, lowest precedence first.
    pub fn reader_names(&self) -> Vec<String> {
        self.loader.reader_names()
    }

    /// Run every reader, then `overrides`, and capture their output.
    ///
    /// Overrides win over every configured reader. Any previously validated
    /// values stop being readable until the next successful `validate`.
    ///
    /// # Errors
    ///
    /// Returns an error if a reader fails. The previously bound data and state
    /// are left unchanged in that case.
    pub fn bind<I, K, V>(&self, overrides: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: ToString,
    {
        let overrides = MapReader::overrides(overrides);

        let mut binding = self.binding.lock();
        let batches = self.loader.load(&overrides)?;
        tracing::debug!(
            readers = batches.len(),
            raw = batches.iter().map(|b| b.vars.len()).sum::<usize>(),
            "bound configuration"
        );

        binding.batches = batches;
        binding.state = State::Bound;
        self.resolved.store(None);
        Ok(())
    }

    /// [`bind`](Configuration::bind) without overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if a reader fails.
    pub fn bind_readers(&self) -> Result<()> {
        self.bind(std::iter::empty::<(String, String)>())
    }

    /// Merge the bound data, coerce and validate every declared variable.
    ///
    /// On success the resolved values replace the previous ones as a whole.
    /// On failure nothing is committed and the configuration is left bound but
    /// unvalidated.
    ///
    /// # Errors
    ///
    /// - [`UsageError::NotBound`] if nothing was bound yet
    /// - [`ConfigError::Validation`] with every failing variable otherwise
    pub fn validate(&self) -> Result<()> {
        let mut binding = self.binding.lock();
        if binding.state == State::Unbound {
            return Err(UsageError::NotBound.into());
        }

        match resolve::resolve(&self.registry, &binding.batches) {
            Ok(vars) => {
                tracing::debug!(resolved = vars.len(), "validated configuration");
                self.resolved.store(Some(Arc::new(vars)));
                binding.state = State::Validated;
                Ok(())
            }
            Err(err) => {
                tracing::debug!(error = %err, "configuration validation failed");
                self.resolved.store(None);
                binding.state = State::Bound;
                Err(ConfigError::Validation(err))
            }
        }
    }

    /// Read one resolved variable.
    ///
    /// # Errors
    ///
    /// - [`UsageError::NotValidated`] unless the last `validate` succeeded
    /// - [`ConfigError::UnknownField`] if `name` is undeclared, or optional and absent
    pub fn read(&self, name: &str) -> Result<Variable> {
        self.snapshot()?
            .get(name)
            .cloned()
            .ok_or_else(|| ConfigError::UnknownField(name.to_string()))
    }

    /// Name to typed value for every resolved variable.
    ///
    /// # Errors
    ///
    /// Returns [`UsageError::NotValidated`] unless the last `validate` succeeded.
    pub fn as_mapping(&self) -> Result<BTreeMap<String, Value>> {
        Ok(self.snapshot()?.as_mapping())
    }

    /// The whole resolved set, sorted by name.
    ///
    /// The snapshot stays valid after later binds; it is never mutated.
    ///
    /// # Errors
    ///
    /// Returns [`UsageError::NotValidated`] unless the last `validate` succeeded.
    pub fn snapshot(&self) -> Result<Arc<ResolvedVariables>> {
        self.resolved
            .load_full()
            .ok_or(ConfigError::Usage(UsageError::NotValidated))
    }

    /// Current lifecycle state.
    pub fn state(&self) -> State {
        self.binding.lock().state
    }

    /// Whether data has been bound.
    pub fn is_bound(&self) -> bool {
        self.state() != State::Unbound
    }

    /// Whether the last `validate` succeeded and nothing was bound since.
    pub fn is_validated(&self) -> bool {
        self.state() == State::Validated
    }
}

impl std::fmt::Debug for Configuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Configuration")
            .field("readers", &self.reader_names())
            .field("declarations", &self.registry.len())
            .field("state", &self.state())
            .finish()
    }
}
