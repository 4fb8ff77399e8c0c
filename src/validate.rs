//! Schema validation for a merged value map.
//!
//! Runs after merge and before record construction: required-field presence,
//! kind agreement, and declared constraints (numeric bounds, length bounds,
//! pattern). Fields are checked in declaration order and the first offending
//! field aborts the pass — resolution is single-shot, so there is no value in
//! accumulating errors against a map that will be discarded.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::SrcfigError;
use crate::schema::{FieldKind, FieldSpec, Schema};

/// Validate `values` against `schema`.
///
/// `values` is the resolver's merged map: one entry per schema field, except
/// required fields no layer supplied (those fail here with the field name).
pub fn validate(schema: &Schema, values: &BTreeMap<String, Value>) -> Result<(), SrcfigError> {
    for spec in schema.fields() {
        match values.get(spec.name()) {
            None => {
                if spec.is_required() {
                    return Err(SrcfigError::MissingRequired {
                        field: spec.name().to_string(),
                    });
                }
            }
            Some(Value::Null) if !spec.is_required() => {
                // Optional field nobody supplied; nothing to constrain.
            }
            Some(value) => {
                check_kind(spec, value)?;
                check_constraints(spec, value)?;
            }
        }
    }
    Ok(())
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn check_kind(spec: &FieldSpec, value: &Value) -> Result<(), SrcfigError> {
    let ok = match spec.kind() {
        FieldKind::Bool => value.is_boolean(),
        FieldKind::Integer => value.is_i64() || value.is_u64(),
        // An integer is acceptable where a float is declared.
        FieldKind::Float => value.is_number(),
        FieldKind::String => value.is_string(),
        FieldKind::StringList => value
            .as_array()
            .is_some_and(|items| items.iter().all(Value::is_string)),
    };

    if ok {
        Ok(())
    } else {
        Err(SrcfigError::TypeMismatch {
            field: spec.name().to_string(),
            expected: spec.kind().as_str(),
            actual: type_name(value).to_string(),
        })
    }
}

fn check_constraints(spec: &FieldSpec, value: &Value) -> Result<(), SrcfigError> {
    let constraints = spec.constraints();
    let violation = |constraint: &'static str, reason: String| SrcfigError::ConstraintViolation {
        field: spec.name().to_string(),
        constraint,
        reason,
    };

    if let Some(n) = value.as_f64() {
        if let Some(min) = constraints.minimum
            && n < min
        {
            return Err(violation("minimum", format!("{n} < {min}")));
        }
        if let Some(max) = constraints.maximum
            && n > max
        {
            return Err(violation("maximum", format!("{n} > {max}")));
        }
    }

    let length = match value {
        Value::String(s) => Some(s.chars().count()),
        Value::Array(items) => Some(items.len()),
        _ => None,
    };
    if let Some(len) = length {
        if let Some(min) = constraints.min_length
            && len < min
        {
            return Err(violation("min_length", format!("length {len} < {min}")));
        }
        if let Some(max) = constraints.max_length
            && len > max
        {
            return Err(violation("max_length", format!("length {len} > {max}")));
        }
    }

    if let Some(pattern) = &constraints.pattern
        && let Value::String(s) = value
    {
        // Patterns were compiled once at schema build time; a failure here
        // would be a schema-builder defect.
        let re = regex_lite::Regex::new(pattern).map_err(|e| SrcfigError::InvalidPattern {
            field: spec.name().to_string(),
            reason: e.to_string(),
        })?;
        if !re.is_match(s) {
            return Err(violation("pattern", format!("'{s}' does not match /{pattern}/")));
        }
    }

    Ok(())
}
