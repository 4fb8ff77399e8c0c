//! Schema definition: field descriptors with defaults, aliases, and constraints.
//!
//! A [`Schema`] is an ordered collection of [`FieldSpec`]s built through an
//! explicit registration step ([`SchemaBuilder`]). Every field is declared
//! once; there is no reflection and no inheritance walking, so the field set
//! is deterministic regardless of how callers compose their schemas.
//!
//! Fields may carry an alias — an alternate key honored by the file and env
//! layers. Aliases and primary names share one namespace: the builder rejects
//! collisions so a lookup key identifies at most one field.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::SrcfigError;

/// The declared type of a configuration field.
///
/// Drives env/CLI string coercion and validation. `StringList` fields accept
/// comma-separated input from string sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Bool,
    Integer,
    Float,
    String,
    StringList,
}

impl FieldKind {
    /// Human-readable type name used in error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Bool => "boolean",
            FieldKind::Integer => "integer",
            FieldKind::Float => "float",
            FieldKind::String => "string",
            FieldKind::StringList => "list of strings",
        }
    }
}

/// Validation constraints declared on a field.
///
/// Numeric bounds are inclusive and apply to `Integer`/`Float` fields. Length
/// bounds apply to strings (character count) and lists (element count).
/// `pattern` is a regex applied to `String` fields; it is compiled once at
/// schema build time so a bad pattern fails before any resolution runs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Constraints {
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub pattern: Option<String>,
}

impl Constraints {
    pub fn is_empty(&self) -> bool {
        self.minimum.is_none()
            && self.maximum.is_none()
            && self.min_length.is_none()
            && self.max_length.is_none()
            && self.pattern.is_none()
    }
}

/// The static declaration of one configuration field.
///
/// Immutable once the schema is built. Construct with [`FieldSpec::new`] for
/// optional fields or [`FieldSpec::required`] for fields that must receive a
/// value from some layer, then chain the fluent setters.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    name: String,
    alias: Option<String>,
    kind: FieldKind,
    default: Option<Value>,
    required: bool,
    constraints: Constraints,
}

impl FieldSpec {
    /// An optional field. Without a declared default it resolves to `null`.
    pub fn new(name: &str, kind: FieldKind) -> Self {
        Self {
            name: name.to_string(),
            alias: None,
            kind,
            default: None,
            required: false,
            constraints: Constraints::default(),
        }
    }

    /// A required field: some layer must supply a value or resolution fails
    /// with a missing-required-field error naming it.
    pub fn required(name: &str, kind: FieldKind) -> Self {
        Self {
            required: true,
            ..Self::new(name, kind)
        }
    }

    /// Declare the schema default, the lowest-precedence value layer.
    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Alternate lookup key honored by the file and env layers.
    pub fn alias(mut self, alias: &str) -> Self {
        self.alias = Some(alias.to_string());
        self
    }

    /// Inclusive numeric lower bound.
    pub fn minimum(mut self, min: f64) -> Self {
        self.constraints.minimum = Some(min);
        self
    }

    /// Inclusive numeric upper bound.
    pub fn maximum(mut self, max: f64) -> Self {
        self.constraints.maximum = Some(max);
        self
    }

    /// Minimum length for strings (chars) or lists (elements).
    pub fn min_length(mut self, len: usize) -> Self {
        self.constraints.min_length = Some(len);
        self
    }

    /// Maximum length for strings (chars) or lists (elements).
    pub fn max_length(mut self, len: usize) -> Self {
        self.constraints.max_length = Some(len);
        self
    }

    /// Regex the full string value must match.
    pub fn pattern(mut self, pattern: &str) -> Self {
        self.constraints.pattern = Some(pattern.to_string());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn alias_name(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn constraints(&self) -> &Constraints {
        &self.constraints
    }

    /// The declared numeric range as `(minimum, maximum)`; either end may be open.
    pub fn range(&self) -> (Option<f64>, Option<f64>) {
        (self.constraints.minimum, self.constraints.maximum)
    }
}

/// An ordered, immutable collection of field descriptors.
#[derive(Debug, Clone)]
pub struct Schema {
    fields: Vec<FieldSpec>,
    by_name: BTreeMap<String, usize>,
    by_alias: BTreeMap<String, usize>,
}

impl Schema {
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder { fields: Vec::new() }
    }

    /// Look up a field by its primary name.
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.by_name.get(name).map(|&i| &self.fields[i])
    }

    /// Look up a field by primary name or alias — the two are interchangeable.
    pub fn lookup(&self, key: &str) -> Option<&FieldSpec> {
        self.field(key)
            .or_else(|| self.by_alias.get(key).map(|&i| &self.fields[i]))
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Explicit field registration. Fields are declared one at a time; `build`
/// checks name/alias uniqueness and compiles every pattern constraint.
pub struct SchemaBuilder {
    fields: Vec<FieldSpec>,
}

impl SchemaBuilder {
    pub fn field(mut self, spec: FieldSpec) -> Self {
        self.fields.push(spec);
        self
    }

    pub fn build(self) -> Result<Schema, SrcfigError> {
        let mut by_name = BTreeMap::new();
        let mut by_alias = BTreeMap::new();

        for (i, spec) in self.fields.iter().enumerate() {
            if by_name.insert(spec.name.clone(), i).is_some() {
                return Err(SrcfigError::DuplicateField {
                    field: spec.name.clone(),
                });
            }
        }

        for (i, spec) in self.fields.iter().enumerate() {
            if let Some(alias) = &spec.alias {
                if by_name.contains_key(alias) || by_alias.insert(alias.clone(), i).is_some() {
                    return Err(SrcfigError::DuplicateAlias {
                        field: spec.name.clone(),
                        alias: alias.clone(),
                    });
                }
            }
            if let Some(pattern) = &spec.constraints.pattern {
                regex_lite::Regex::new(pattern).map_err(|e| SrcfigError::InvalidPattern {
                    field: spec.name.clone(),
                    reason: e.to_string(),
                })?;
            }
        }

        Ok(Schema {
            fields: self.fields,
            by_name,
            by_alias,
        })
    }
}
