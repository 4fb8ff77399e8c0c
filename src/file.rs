//! Config file loading: a path in, a flat key → value map out.
//!
//! The resolver does not care about the on-disk format; this loader supports
//! JSON and TOML, picked by file extension. Only top-level keys participate —
//! the file layer of a schema is flat, and keys may use either a field's
//! primary name or its alias (the resolver treats the two as interchangeable,
//! so keys are returned exactly as written).
//!
//! In strict mode a top-level key the schema doesn't know fails loading with
//! the key name and file path. Lenient mode drops unknown keys silently, for
//! config files intentionally shared across tools.

use std::collections::BTreeMap;
use std::path::Path;

use serde_json::Value;

use crate::error::SrcfigError;
use crate::schema::Schema;

/// Load a config file into a flat field/alias → value map.
pub fn load_file(
    schema: &Schema,
    path: &Path,
    strict: bool,
) -> Result<BTreeMap<String, Value>, SrcfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| SrcfigError::IoError {
        path: path.to_path_buf(),
        source: e,
    })?;

    let parsed = match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => {
            serde_json::from_str::<Value>(&content).map_err(|e| SrcfigError::ParseError {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?
        }
        Some("toml") => {
            let table: toml::Table =
                toml::from_str(&content).map_err(|e| SrcfigError::ParseError {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                })?;
            toml_to_json(toml::Value::Table(table))
        }
        _ => {
            return Err(SrcfigError::UnsupportedFormat {
                path: path.to_path_buf(),
            });
        }
    };

    let Value::Object(object) = parsed else {
        return Err(SrcfigError::ParseError {
            path: path.to_path_buf(),
            reason: "top level must be an object/table".into(),
        });
    };

    let mut values = BTreeMap::new();
    for (key, value) in object {
        if schema.lookup(&key).is_some() {
            values.insert(key, value);
        } else if strict {
            return Err(SrcfigError::UnknownKey {
                key,
                path: path.to_path_buf(),
            });
        }
    }
    Ok(values)
}

/// Convert a parsed TOML value into the crate's canonical JSON value type.
fn toml_to_json(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::from(i),
        toml::Value::Float(f) => Value::from(f),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Array(items.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(k, v)| (k, toml_to_json(v)))
                .collect(),
        ),
    }
}
