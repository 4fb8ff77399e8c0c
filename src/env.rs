//! Environment-variable snapshot for a schema.
//!
//! Variable names derive as `{PREFIX}{FIELD_NAME_UPPERCASED}`, with the alias
//! preferred over the primary name when one is declared. Values are coerced to
//! the field's declared kind before the snapshot is returned; a value that
//! cannot be coerced is a fatal [`SrcfigError::Coercion`] — it never silently
//! falls back to the default layer.
//!
//! Both functions take the variable pairs as an iterator so each resolution
//! captures the environment exactly once, and so tests can pass synthetic
//! data instead of `std::env::vars()`.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::SrcfigError;
use crate::schema::{FieldKind, FieldSpec, Schema};

/// Mapping of field name → derived environment variable name.
pub fn env_var_names(schema: &Schema, prefix: &str) -> BTreeMap<String, String> {
    schema
        .fields()
        .map(|spec| {
            let base = spec.alias_name().unwrap_or(spec.name());
            (
                spec.name().to_string(),
                format!("{prefix}{}", base.to_uppercase()),
            )
        })
        .collect()
}

/// Build the env layer: field name → typed value, for every field whose
/// derived variable name is present in `vars`.
pub fn env_snapshot(
    schema: &Schema,
    prefix: &str,
    vars: impl IntoIterator<Item = (String, String)>,
) -> Result<BTreeMap<String, Value>, SrcfigError> {
    let names = env_var_names(schema, prefix);
    let present: BTreeMap<String, String> = vars.into_iter().collect();

    let mut values = BTreeMap::new();
    for spec in schema.fields() {
        let var_name = &names[spec.name()];
        if let Some(raw) = present.get(var_name) {
            values.insert(spec.name().to_string(), coerce(spec, raw)?);
        }
    }
    Ok(values)
}

/// Coerce a raw string to the field's declared kind.
///
/// Booleans accept `true/false`, `1/0`, `yes/no`, `on/off` (case-insensitive).
/// `StringList` splits on commas and trims each item; an empty string yields
/// an empty list.
pub(crate) fn coerce(spec: &FieldSpec, raw: &str) -> Result<Value, SrcfigError> {
    let fail = || SrcfigError::Coercion {
        field: spec.name().to_string(),
        raw: raw.to_string(),
        expected: spec.kind().as_str(),
    };

    match spec.kind() {
        FieldKind::Bool => match raw.to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(Value::Bool(true)),
            "false" | "0" | "no" | "off" => Ok(Value::Bool(false)),
            _ => Err(fail()),
        },
        FieldKind::Integer => raw
            .parse::<i64>()
            .map(Value::from)
            .map_err(|_| fail()),
        FieldKind::Float => raw
            .parse::<f64>()
            .ok()
            // Non-finite floats have no JSON representation.
            .filter(|f| f.is_finite())
            .map(Value::from)
            .ok_or_else(fail),
        FieldKind::String => Ok(Value::String(raw.to_string())),
        FieldKind::StringList => {
            if raw.is_empty() {
                return Ok(Value::Array(vec![]));
            }
            Ok(Value::Array(
                raw.split(',')
                    .map(|item| Value::String(item.trim().to_string()))
                    .collect(),
            ))
        }
    }
}
