//! Merges bound batches and coerces them into resolved variables.

use super::declaration::Registry;
use super::loader::Batch;
use super::{Declaration, RawVar, ResolvedVariables, Variable};
use crate::error::ValidationError;
use std::collections::HashMap;

/// Merge `batches` for the declared names: the last raw value in batch order wins.
///
/// Undeclared names are dropped.
pub(crate) fn merge<'a>(registry: &Registry, batches: &'a [Batch]) -> HashMap<&'a str, &'a RawVar> {
    let mut merged = HashMap::with_capacity(registry.len());
    for batch in batches {
        for raw in &batch.vars {
            if !registry.contains(&raw.name) {
                continue;
            }
            if let Some(previous) = merged.insert(raw.name.as_str(), raw) {
                tracing::trace!(
                    name = %raw.name,
                    winner = %raw.source,
                    loser = %previous.source,
                    reader = %batch.reader,
                    "raw value overridden"
                );
            }
        }
    }
    merged
}

/// Resolve every declaration against the merged raw values.
///
/// Either every declaration resolves (or is optional and absent) and the full
/// set is returned, or the errors of all failing declarations are returned.
pub(crate) fn resolve(
    registry: &Registry,
    batches: &[Batch],
) -> Result<ResolvedVariables, ValidationError> {
    let merged = merge(registry, batches);

    let mut variables = Vec::with_capacity(merged.len());
    let mut errors = Vec::new();

    for declaration in registry.iter() {
        let raw = merged
            .get(declaration.name())
            .copied()
            .filter(|raw| declaration.allows_empty() || !raw.value.is_empty());

        match raw {
            Some(raw) => match coerce(declaration, raw) {
                Ok(variable) => variables.push(variable),
                Err(err) => errors.push(err),
            },
            None if declaration.is_required() => {
                errors.push(ValidationError::missing(declaration.name()));
            }
            None => {
                tracing::trace!(name = declaration.name(), "optional variable absent");
            }
        }
    }

    match ValidationError::from_errors(errors) {
        Some(err) => Err(err),
        None => Ok(ResolvedVariables::from_variables(variables)),
    }
}

fn coerce(declaration: &Declaration, raw: &RawVar) -> Result<Variable, ValidationError> {
    let value = declaration
        .ty()
        .coerce(&raw.value)
        .map_err(|reason| ValidationError::Coercion {
            field: declaration.name().to_string(),
            value: raw.value.clone(),
            expected: declaration.ty(),
            reason,
        })?;

    if let Some(validator) = declaration.validator() {
        validator.check(&value).map_err(|rejection| {
            ValidationError::invalid_field(declaration.name(), raw.value.clone(), rejection.reason())
        })?;
    }

    Ok(Variable {
        name: declaration.name().to_string(),
        value,
        original: raw.value.clone(),
        source: raw.source,
        ty: declaration.ty(),
        path: raw.path.clone(),
    })
}
