//! The provenance-tagged record: validated values plus queryable per-field
//! provenance and metadata.
//!
//! A [`ResolvedConfig`] is produced by one resolution pass and read-only
//! afterward — re-resolving builds a new record with a new provenance map
//! rather than mutating an existing one. Because nothing can change after
//! construction, the partition invariant (every field tagged with exactly one
//! source) is proven once, at construction time.

use std::collections::BTreeMap;

use serde_json::{Value, json};

use crate::error::SrcfigError;
use crate::schema::{FieldSpec, Schema};
use crate::sources::{TrackedValue, ValueSource};

/// A validated configuration with per-field source tracking.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    schema: Schema,
    values: BTreeMap<String, Value>,
    provenance: BTreeMap<String, ValueSource>,
}

impl ResolvedConfig {
    /// Pair an already-validated value map with its provenance map.
    ///
    /// Fails with [`SrcfigError::SchemaMismatch`] if the two maps or the
    /// schema disagree on the field set — that is a resolver defect and is
    /// surfaced loudly rather than patched over with a guessed provenance.
    pub(crate) fn new(
        schema: Schema,
        values: BTreeMap<String, Value>,
        provenance: BTreeMap<String, ValueSource>,
    ) -> Result<Self, SrcfigError> {
        if values.len() != provenance.len() || values.len() != schema.len() {
            return Err(SrcfigError::SchemaMismatch {
                detail: format!(
                    "{} values, {} provenance tags, {} schema fields",
                    values.len(),
                    provenance.len(),
                    schema.len()
                ),
            });
        }
        for field in values.keys() {
            if !provenance.contains_key(field) {
                return Err(SrcfigError::SchemaMismatch {
                    detail: format!("field '{field}' has a value but no provenance tag"),
                });
            }
            if !schema.contains(field) {
                return Err(SrcfigError::SchemaMismatch {
                    detail: format!("field '{field}' is not in the schema"),
                });
            }
        }

        Ok(Self {
            schema,
            values,
            provenance,
        })
    }

    fn known(&self, field: &str) -> Result<(), SrcfigError> {
        if self.schema.contains(field) {
            Ok(())
        } else {
            Err(SrcfigError::UnknownField {
                field: field.to_string(),
            })
        }
    }

    /// The resolved value for `field`.
    pub fn get(&self, field: &str) -> Result<&Value, SrcfigError> {
        self.known(field)?;
        Ok(&self.values[field])
    }

    pub fn get_str(&self, field: &str) -> Result<Option<&str>, SrcfigError> {
        Ok(self.get(field)?.as_str())
    }

    pub fn get_i64(&self, field: &str) -> Result<Option<i64>, SrcfigError> {
        Ok(self.get(field)?.as_i64())
    }

    pub fn get_f64(&self, field: &str) -> Result<Option<f64>, SrcfigError> {
        Ok(self.get(field)?.as_f64())
    }

    pub fn get_bool(&self, field: &str) -> Result<Option<bool>, SrcfigError> {
        Ok(self.get(field)?.as_bool())
    }

    /// The layer that supplied `field`'s final value.
    pub fn provenance_of(&self, field: &str) -> Result<ValueSource, SrcfigError> {
        self.known(field)?;
        Ok(self.provenance[field])
    }

    /// The resolved value paired with its source.
    pub fn tracked(&self, field: &str) -> Result<TrackedValue, SrcfigError> {
        self.known(field)?;
        Ok(TrackedValue::new(
            self.values[field].clone(),
            self.provenance[field],
        ))
    }

    /// Field names grouped by source, in schema declaration order.
    ///
    /// All four sources appear (possibly with empty lists), and the lists
    /// partition the schema's field set.
    pub fn summary_by_source(&self) -> BTreeMap<ValueSource, Vec<String>> {
        let mut summary: BTreeMap<ValueSource, Vec<String>> = ValueSource::ALL
            .iter()
            .map(|&source| (source, Vec::new()))
            .collect();
        for spec in self.schema.fields() {
            let source = self.provenance[spec.name()];
            summary
                .get_mut(&source)
                .expect("summary pre-seeded with all sources")
                .push(spec.name().to_string());
        }
        summary
    }

    /// The field's static declaration: constraints, bounds, default.
    /// Independent of where the resolved value came from.
    pub fn metadata_of(&self, field: &str) -> Result<&FieldSpec, SrcfigError> {
        self.schema.field(field).ok_or_else(|| SrcfigError::UnknownField {
            field: field.to_string(),
        })
    }

    /// Resolved values in schema declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.schema
            .fields()
            .map(|spec| (spec.name(), &self.values[spec.name()]))
    }

    /// The schema this record was resolved against.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Values and sources together, as JSON:
    /// `{ "values": {...}, "sources": {...} }`.
    pub fn dump_with_sources(&self) -> Value {
        let sources: BTreeMap<&String, &'static str> = self
            .provenance
            .iter()
            .map(|(field, source)| (field, source.as_str()))
            .collect();
        json!({ "values": self.values, "sources": sources })
    }

    /// Extract the subset of this record's values that a second schema
    /// declares, falling back to that schema's defaults for fields this
    /// record lacks. Useful for handing a component its slice of a larger
    /// configuration.
    pub fn extract_subset(&self, target: &Schema) -> BTreeMap<String, Value> {
        let mut subset = BTreeMap::new();
        for spec in target.fields() {
            if let Some(value) = self.values.get(spec.name()) {
                subset.insert(spec.name().to_string(), value.clone());
            } else if let Some(default) = spec.default_value() {
                subset.insert(spec.name().to_string(), default.clone());
            }
        }
        subset
    }
}
