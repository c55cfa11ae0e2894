//! Declared variables and the registry that holds them.

use super::{Type, Validator};
use crate::error::{ConfigError, Result};
use std::collections::HashMap;

/// Schema entry for one configuration variable.
///
/// Declarations are required unless marked [`optional`](Declaration::optional).
///
/// # Examples
///
/// ```rust
/// use kosei::core::{validation, Declaration, Type};
///
/// let port = Declaration::new("PORT", Type::Integer)
///     .with_validator(validation::range(1..=65535));
/// let debug = Declaration::new("DEBUG", Type::Boolean).optional();
///
/// assert!(port.is_required());
/// assert!(!debug.is_required());
/// ```
#[derive(Debug, Clone)]
pub struct Declaration {
    name: String,
    ty: Type,
    validator: Option<Validator>,
    required: bool,
    allow_empty: bool,
}

impl Declaration {
    /// Declare a required variable of the given type.
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            ty,
            validator: None,
            required: true,
            allow_empty: false,
        }
    }

    /// Mark the variable as optional; it is omitted when no source provides it.
    pub fn optional(self) -> Self {
        self.required(false)
    }

    /// Set whether the variable is required.
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Attach a validator that runs after coercion.
    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validator = Some(validator);
        self
    }

    /// Keep empty raw values instead of treating them as absent.
    pub fn allow_empty(mut self) -> Self {
        self.allow_empty = true;
        self
    }

    /// Variable name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared type.
    pub fn ty(&self) -> Type {
        self.ty
    }

    /// Attached validator, if any.
    pub fn validator(&self) -> Option<&Validator> {
        self.validator.as_ref()
    }

    /// Whether a missing value fails validation.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Whether an empty raw value counts as present.
    pub fn allows_empty(&self) -> bool {
        self.allow_empty
    }
}

/// Declarations in insertion order, indexed by name.
#[derive(Debug, Default)]
pub(crate) struct Registry {
    declarations: Vec<Declaration>,
    index: HashMap<String, usize>,
}

impl Registry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Register a declaration; a second declaration of the same name is rejected.
    pub(crate) fn insert(&mut self, declaration: Declaration) -> Result<()> {
        if self.index.contains_key(declaration.name()) {
            return Err(ConfigError::DuplicateDeclaration(
                declaration.name().to_string(),
            ));
        }
        self.index
            .insert(declaration.name().to_string(), self.declarations.len());
        self.declarations.push(declaration);
        Ok(())
    }

    pub(crate) fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    #[cfg(test)]
    pub(crate) fn get(&self, name: &str) -> Option<&Declaration> {
        self.index.get(name).map(|&i| &self.declarations[i])
    }

    pub(crate) fn iter(&self) -> std::slice::Iter<'_, Declaration> {
        self.declarations.iter()
    }

    pub(crate) fn len(&self) -> usize {
        self.declarations.len()
    }
}
