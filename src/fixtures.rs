#[cfg(test)]
pub mod test {
    use serde_json::json;

    use crate::schema::{FieldKind, FieldSpec, Schema};

    /// Shared test schema exercising every field kind, an alias, and the
    /// common constraint shapes.
    pub fn schema() -> Schema {
        Schema::builder()
            .field(
                FieldSpec::new("port", FieldKind::Integer)
                    .default(8080)
                    .minimum(1.0)
                    .maximum(65535.0),
            )
            .field(
                FieldSpec::new("host", FieldKind::String)
                    .alias("hostname")
                    .default("localhost")
                    .min_length(1)
                    .pattern(r"^[A-Za-z0-9._-]+$"),
            )
            .field(FieldSpec::new("debug", FieldKind::Bool).default(false))
            .field(
                FieldSpec::new("timeout", FieldKind::Integer)
                    .default(30)
                    .minimum(0.0),
            )
            .field(FieldSpec::new("rate", FieldKind::Float).default(1.0))
            .field(
                FieldSpec::new("tags", FieldKind::StringList)
                    .default(json!([]))
                    .max_length(8),
            )
            .field(FieldSpec::new("note", FieldKind::String))
            .build()
            .unwrap()
    }

    /// The shared schema plus a required field with no default.
    pub fn schema_with_required() -> Schema {
        let mut builder = Schema::builder();
        for spec in schema().fields() {
            builder = builder.field(spec.clone());
        }
        builder
            .field(FieldSpec::required("api_key", FieldKind::String).min_length(1))
            .build()
            .unwrap()
    }

    #[test]
    fn fixture_schemas_build() {
        assert_eq!(schema().len(), 7);
        assert_eq!(schema_with_required().len(), 8);
        assert!(schema_with_required().field("api_key").unwrap().is_required());
    }
}
