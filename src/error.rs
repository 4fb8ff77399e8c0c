use std::path::PathBuf;
use thiserror::Error;

/// Every error names the specific field, key, or path involved — callers
/// translating these into exit codes never see a bare "invalid configuration".
#[derive(Debug, Error)]
pub enum SrcfigError {
    #[error("Cannot convert '{raw}' to {expected} for field '{field}'")]
    Coercion {
        field: String,
        raw: String,
        expected: &'static str,
    },

    #[error("Missing required field '{field}'")]
    MissingRequired { field: String },

    #[error("Field '{field}' expects {expected}, got {actual}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        actual: String,
    },

    #[error("Field '{field}' violates constraint {constraint}: {reason}")]
    ConstraintViolation {
        field: String,
        constraint: &'static str,
        reason: String,
    },

    /// Value map and provenance map disagree on the field set. This is a
    /// resolver defect, not a user input problem.
    #[error("Internal schema mismatch: {detail}")]
    SchemaMismatch { detail: String },

    #[error("Unknown field '{field}'")]
    UnknownField { field: String },

    #[error("Unknown key '{key}' in {path}")]
    UnknownKey { key: String, path: PathBuf },

    #[error("Duplicate field '{field}' in schema")]
    DuplicateField { field: String },

    #[error("Alias '{alias}' on field '{field}' collides with another field or alias")]
    DuplicateAlias { field: String, alias: String },

    #[error("Invalid pattern on field '{field}': {reason}")]
    InvalidPattern { field: String, reason: String },

    #[error("Failed to parse {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Failed to read {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Unsupported config format for {path} (expected .json or .toml)")]
    UnsupportedFormat { path: PathBuf },
}
