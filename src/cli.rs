//! Clap adapter: turn parsed `ArgMatches` into the explicit value layer.
//!
//! Clap reports a value for every declared argument, including ones the user
//! never typed. [`ArgMatches::value_source`] distinguishes the cases, and this
//! adapter maps them onto the explicit-signal:
//!
//! - `CommandLine` — the user typed it: recorded as provided.
//! - `DefaultValue` / `EnvVariable` — clap's own fill-in: recorded as a
//!   fallback, which the resolver never applies.
//! - No source information — skipped entirely. An unavailable signal means
//!   "not explicit"; guessing the other way would promote parser defaults to
//!   the highest-precedence layer.
//!
//! Arguments are matched by the field's primary name, falling back to its
//! alias. Values may be declared with their native clap types (`bool`, `i64`,
//! `f64`, `String`) or as strings, which are coerced with the same rules as
//! the env layer.

use clap::ArgMatches;
use clap::parser::ValueSource as ClapSource;
use serde_json::Value;

use crate::env;
use crate::error::SrcfigError;
use crate::explicit::ExplicitValues;
use crate::schema::{FieldKind, FieldSpec, Schema};

/// Build the explicit layer from parsed clap matches.
pub fn explicit_from_matches(
    schema: &Schema,
    matches: &ArgMatches,
) -> Result<ExplicitValues, SrcfigError> {
    let mut explicit = ExplicitValues::new();

    for spec in schema.fields() {
        let Some(id) = arg_id(spec, matches) else {
            continue;
        };
        let Some(source) = matches.value_source(id) else {
            continue;
        };
        let Some(value) = arg_value(spec, matches, id)? else {
            continue;
        };

        explicit = match source {
            ClapSource::CommandLine => explicit.provided(spec.name(), value),
            _ => explicit.fallback(spec.name(), value),
        };
    }

    Ok(explicit)
}

/// The clap arg id for a field: primary name if declared, else the alias.
fn arg_id<'a>(spec: &'a FieldSpec, matches: &ArgMatches) -> Option<&'a str> {
    if matches.try_contains_id(spec.name()).is_ok() {
        return Some(spec.name());
    }
    spec.alias_name()
        .filter(|alias| matches.try_contains_id(alias).is_ok())
}

/// Read an argument value as the field's kind.
///
/// Tries the native clap type first, then falls back to a string declaration
/// coerced like an env value. Returns `Ok(None)` if the argument holds no
/// value at all.
fn arg_value(
    spec: &FieldSpec,
    matches: &ArgMatches,
    id: &str,
) -> Result<Option<Value>, SrcfigError> {
    match spec.kind() {
        FieldKind::Bool => {
            if let Ok(Some(b)) = matches.try_get_one::<bool>(id) {
                return Ok(Some(Value::Bool(*b)));
            }
            coerce_string_arg(spec, matches, id)
        }
        FieldKind::Integer => {
            if let Ok(Some(i)) = matches.try_get_one::<i64>(id) {
                return Ok(Some(Value::from(*i)));
            }
            coerce_string_arg(spec, matches, id)
        }
        FieldKind::Float => {
            if let Ok(Some(f)) = matches.try_get_one::<f64>(id) {
                return Ok(Some(Value::from(*f)));
            }
            coerce_string_arg(spec, matches, id)
        }
        FieldKind::String => {
            if let Ok(Some(s)) = matches.try_get_one::<String>(id) {
                return Ok(Some(Value::String(s.clone())));
            }
            Ok(None)
        }
        FieldKind::StringList => {
            if let Ok(Some(items)) = matches.try_get_many::<String>(id) {
                return Ok(Some(Value::Array(
                    items.map(|s| Value::String(s.clone())).collect(),
                )));
            }
            coerce_string_arg(spec, matches, id)
        }
    }
}

fn coerce_string_arg(
    spec: &FieldSpec,
    matches: &ArgMatches,
    id: &str,
) -> Result<Option<Value>, SrcfigError> {
    match matches.try_get_one::<String>(id) {
        Ok(Some(raw)) => env::coerce(spec, raw).map(Some),
        _ => Ok(None),
    }
}
