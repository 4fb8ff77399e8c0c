//! The source resolver: merge the four value layers and produce a validated,
//! provenance-tagged configuration.
//!
//! Operates purely on pre-built maps — environment snapshotting and file
//! loading happen in the adapters ([`env`](crate::env), [`file`](crate::file))
//! before the resolver runs, so resolution is a pure function of its inputs
//! and fully testable with synthetic data. Per field, independently:
//!
//! 1. Start from the schema default, tagged `Default`.
//! 2. An env value overwrites, tagged `Env`.
//! 3. A file value overwrites (primary key or alias), tagged `File`.
//! 4. An explicit value overwrites **only if its explicit-signal is true**,
//!    tagged `Explicit`. The argument layer's own fallback is never applied.
//!
//! A required field no layer supplied yields no entry; the gap flows to
//! validation, which fails naming the field. No partial result escapes —
//! either validation accepts the whole merged map or the caller gets an error.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::SrcfigError;
use crate::explicit::ExplicitValues;
use crate::record::ResolvedConfig;
use crate::schema::Schema;
use crate::sources::{TrackedValue, ValueSource};
use crate::validate;

/// One merged value map plus one provenance map, produced by a single pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub values: BTreeMap<String, Value>,
    pub provenance: BTreeMap<String, ValueSource>,
}

/// Merge the four layers without validating.
///
/// Fields with a candidate in at least one layer appear in both maps; a
/// required field absent everywhere appears in neither. Most callers want
/// [`resolve`], which validates and wraps the result.
pub fn merge(
    schema: &Schema,
    env_values: &BTreeMap<String, Value>,
    file_values: &BTreeMap<String, Value>,
    explicit: &ExplicitValues,
) -> Resolution {
    let mut values = BTreeMap::new();
    let mut provenance = BTreeMap::new();

    for spec in schema.fields() {
        let mut candidate: Option<TrackedValue> = match spec.default_value() {
            Some(default) => Some(TrackedValue::new(default.clone(), ValueSource::Default)),
            // An optional field with no declared default still resolves
            // to null, so the provenance map stays total.
            None if !spec.is_required() => {
                Some(TrackedValue::new(Value::Null, ValueSource::Default))
            }
            None => None,
        };

        if let Some(value) = env_values.get(spec.name()) {
            candidate = Some(TrackedValue::new(value.clone(), ValueSource::Env));
        }

        let file_value = file_values.get(spec.name()).or_else(|| {
            spec.alias_name()
                .and_then(|alias| file_values.get(alias))
        });
        if let Some(value) = file_value {
            candidate = Some(TrackedValue::new(value.clone(), ValueSource::File));
        }

        if let Some(entry) = explicit.entry(spec.name())
            && entry.provided
        {
            candidate = Some(TrackedValue::new(entry.value.clone(), ValueSource::Explicit));
        }

        if let Some(tracked) = candidate {
            values.insert(spec.name().to_string(), tracked.value);
            provenance.insert(spec.name().to_string(), tracked.source);
        }
    }

    Resolution { values, provenance }
}

/// The full pipeline: merge, validate, wrap into a [`ResolvedConfig`].
///
/// Single-pass and synchronous. On any failure the whole attempt is
/// discarded; callers re-invoke with corrected inputs.
pub fn resolve(
    schema: &Schema,
    env_values: &BTreeMap<String, Value>,
    file_values: &BTreeMap<String, Value>,
    explicit: &ExplicitValues,
) -> Result<ResolvedConfig, SrcfigError> {
    let resolution = merge(schema, env_values, file_values, explicit);
    validate::validate(schema, &resolution.values)?;
    ResolvedConfig::new(schema.clone(), resolution.values, resolution.provenance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::{schema, schema_with_required};
    use serde_json::json;

    fn none() -> BTreeMap<String, Value> {
        BTreeMap::new()
    }

    fn map(pairs: &[(&str, Value)]) -> BTreeMap<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn defaults_only() {
        let config = resolve(&schema(), &none(), &none(), &ExplicitValues::new()).unwrap();
        assert_eq!(config.get("port").unwrap(), &json!(8080));
        assert_eq!(config.provenance_of("port").unwrap(), ValueSource::Default);
        assert_eq!(config.get("host").unwrap(), &json!("localhost"));
    }

    #[test]
    fn file_overrides_default() {
        let file = map(&[("port", json!(5432))]);
        let config = resolve(&schema(), &none(), &file, &ExplicitValues::new()).unwrap();
        assert_eq!(config.get("port").unwrap(), &json!(5432));
        assert_eq!(config.provenance_of("port").unwrap(), ValueSource::File);
    }

    #[test]
    fn file_overrides_env() {
        let env = map(&[("port", json!(9000))]);
        let file = map(&[("port", json!(5432))]);
        let config = resolve(&schema(), &env, &file, &ExplicitValues::new()).unwrap();
        assert_eq!(config.get("port").unwrap(), &json!(5432));
        assert_eq!(config.provenance_of("port").unwrap(), ValueSource::File);
    }

    #[test]
    fn explicit_overrides_all() {
        let env = map(&[("port", json!(9000))]);
        let file = map(&[("port", json!(5432))]);
        let explicit = ExplicitValues::new().provided("port", 8888);
        let config = resolve(&schema(), &env, &file, &explicit).unwrap();
        assert_eq!(config.get("port").unwrap(), &json!(8888));
        assert_eq!(config.provenance_of("port").unwrap(), ValueSource::Explicit);
    }

    #[test]
    fn fallback_signal_falls_through_to_env() {
        // Argument layer reports its own default (equals the schema default);
        // the env value must win.
        let env = map(&[("port", json!(9000))]);
        let explicit = ExplicitValues::new().fallback("port", 8080);
        let config = resolve(&schema(), &env, &none(), &explicit).unwrap();
        assert_eq!(config.get("port").unwrap(), &json!(9000));
        assert_eq!(config.provenance_of("port").unwrap(), ValueSource::Env);
    }

    #[test]
    fn fallback_signal_falls_through_to_default() {
        let explicit = ExplicitValues::new().fallback("port", 8080);
        let config = resolve(&schema(), &none(), &none(), &explicit).unwrap();
        assert_eq!(config.provenance_of("port").unwrap(), ValueSource::Default);
    }

    #[test]
    fn env_overrides_default_only() {
        let env = map(&[("port", json!(9000))]);
        let config = resolve(&schema(), &env, &none(), &ExplicitValues::new()).unwrap();
        assert_eq!(config.get("port").unwrap(), &json!(9000));
        assert_eq!(config.provenance_of("port").unwrap(), ValueSource::Env);
    }

    #[test]
    fn alias_key_in_file_values_resolves() {
        // `host` has alias `hostname`; supplying either key is equivalent.
        let by_alias = map(&[("hostname", json!("db.internal"))]);
        let by_name = map(&[("host", json!("db.internal"))]);
        let explicit = ExplicitValues::new();

        let a = resolve(&schema(), &none(), &by_alias, &explicit).unwrap();
        let b = resolve(&schema(), &none(), &by_name, &explicit).unwrap();

        assert_eq!(a.get("host").unwrap(), &json!("db.internal"));
        assert_eq!(a.get("host").unwrap(), b.get("host").unwrap());
        assert_eq!(
            a.provenance_of("host").unwrap(),
            b.provenance_of("host").unwrap()
        );
        assert_eq!(a.provenance_of("host").unwrap(), ValueSource::File);
    }

    #[test]
    fn primary_key_wins_over_alias_in_same_file() {
        let file = map(&[("host", json!("primary")), ("hostname", json!("alias"))]);
        let config = resolve(&schema(), &none(), &file, &ExplicitValues::new()).unwrap();
        assert_eq!(config.get("host").unwrap(), &json!("primary"));
    }

    #[test]
    fn missing_required_field_fails_naming_it() {
        let err = resolve(
            &schema_with_required(),
            &none(),
            &none(),
            &ExplicitValues::new(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            SrcfigError::MissingRequired { field } if field == "api_key"
        ));
    }

    #[test]
    fn required_field_satisfied_by_any_layer() {
        let env = map(&[("api_key", json!("from-env"))]);
        let config = resolve(&schema_with_required(), &env, &none(), &ExplicitValues::new())
            .unwrap();
        assert_eq!(config.get("api_key").unwrap(), &json!("from-env"));
        assert_eq!(config.provenance_of("api_key").unwrap(), ValueSource::Env);
    }

    #[test]
    fn empty_list_default_is_default_not_missing() {
        let config = resolve(&schema(), &none(), &none(), &ExplicitValues::new()).unwrap();
        assert_eq!(config.get("tags").unwrap(), &json!([]));
        assert_eq!(config.provenance_of("tags").unwrap(), ValueSource::Default);
    }

    #[test]
    fn optional_field_without_default_resolves_to_null() {
        let config = resolve(&schema(), &none(), &none(), &ExplicitValues::new()).unwrap();
        assert_eq!(config.get("note").unwrap(), &Value::Null);
        assert_eq!(config.provenance_of("note").unwrap(), ValueSource::Default);
    }

    #[test]
    fn merge_is_idempotent() {
        let env = map(&[("port", json!(9000)), ("debug", json!(true))]);
        let file = map(&[("hostname", json!("x")), ("port", json!(5432))]);
        let explicit = ExplicitValues::new()
            .provided("timeout", 60)
            .fallback("rate", 1.0);

        let first = merge(&schema(), &env, &file, &explicit);
        let second = merge(&schema(), &env, &file, &explicit);
        assert_eq!(first, second);
    }

    #[test]
    fn merge_leaves_no_entry_for_unsupplied_required_field() {
        let resolution = merge(
            &schema_with_required(),
            &none(),
            &none(),
            &ExplicitValues::new(),
        );
        assert!(!resolution.values.contains_key("api_key"));
        assert!(!resolution.provenance.contains_key("api_key"));
        // Every other field still has exactly one tag.
        assert_eq!(resolution.values.len(), schema_with_required().len() - 1);
        assert_eq!(resolution.values.len(), resolution.provenance.len());
    }

    #[test]
    fn layers_are_sparse_and_independent_per_field() {
        let env = map(&[("port", json!(4000))]);
        let file = map(&[("hostname", json!("filehost")), ("timeout", json!(99))]);
        let explicit = ExplicitValues::new().provided("debug", true);

        let config = resolve(&schema(), &env, &file, &explicit).unwrap();
        assert_eq!(config.provenance_of("port").unwrap(), ValueSource::Env);
        assert_eq!(config.provenance_of("host").unwrap(), ValueSource::File);
        assert_eq!(config.provenance_of("timeout").unwrap(), ValueSource::File);
        assert_eq!(config.provenance_of("debug").unwrap(), ValueSource::Explicit);
        assert_eq!(config.provenance_of("rate").unwrap(), ValueSource::Default);
    }

    #[test]
    fn validation_failure_discards_whole_attempt() {
        // port above its declared maximum: no record, just the error.
        let file = map(&[("port", json!(70000))]);
        let err = resolve(&schema(), &none(), &file, &ExplicitValues::new()).unwrap_err();
        assert!(matches!(
            err,
            SrcfigError::ConstraintViolation { field, .. } if field == "port"
        ));
    }
}
