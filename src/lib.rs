//! Layered configuration with per-field source tracking. Declare a schema,
//! hand in your layers, and every resolved value remembers where it came from.
//!
//! Srcfig merges up to four value layers — schema defaults, environment
//! variables, a config file, and explicitly supplied (CLI) values — into one
//! validated configuration, recording which layer supplied each field:
//!
//! ```ignore
//! let schema = Schema::builder()
//!     .field(FieldSpec::new("port", FieldKind::Integer).default(8080))
//!     .field(FieldSpec::required("api_key", FieldKind::String))
//!     .build()?;
//!
//! let env_values = env::env_snapshot(&schema, "APP_", std::env::vars())?;
//! let file_values = file::load_file(&schema, Path::new("app.json"), true)?;
//! let explicit = cli::explicit_from_matches(&schema, &matches)?;
//!
//! let config = resolve::resolve(&schema, &env_values, &file_values, &explicit)?;
//! assert_eq!(config.provenance_of("port")?, ValueSource::Env);
//! ```
//!
//! # Why source tracking
//!
//! Layered configuration answers "what is the value"; debugging layered
//! configuration needs "and who set it". When a service starts with the wrong
//! port, the difference between "the file said so" and "a stale environment
//! variable said so" is the whole diagnosis. Srcfig keeps that answer
//! attached to the result: [`ResolvedConfig::provenance_of`] per field,
//! [`ResolvedConfig::summary_by_source`] for the whole record, and
//! [`ResolvedConfig::dump_with_sources`] for machine consumption.
//!
//! # Layer precedence
//!
//! ```text
//! Schema defaults       FieldSpec::default(...)
//!        ↑ overridden by
//! Environment vars      {PREFIX}{FIELD_NAME}
//!        ↑ overridden by
//! Config file           JSON or TOML, flat keys
//!        ↑ overridden by
//! Explicit values       what the user actually typed
//! ```
//!
//! Every layer is **sparse**: it only contains the fields it actually
//! supplies, and unset fields fall through to the layer below. The merged
//! result is total — one value and one provenance tag per schema field.
//!
//! # The explicit-signal
//!
//! The highest layer is the subtle one. Argument parsers report a value for
//! every declared flag, whether or not the user typed it; blindly trusting
//! that would stamp parser defaults with `Explicit` provenance and let them
//! shadow file and env values. [`ExplicitValues`] therefore carries a
//! per-field signal: [`provided`](ExplicitValues::provided) entries win over
//! everything, [`fallback`](ExplicitValues::fallback) entries are recorded
//! but never applied. When the signal cannot be determined, the adapter
//! leaves the field out — absence of evidence means not explicit.
//!
//! The `cli` module (behind the `clap` feature, on by default) derives the
//! signal from clap's own `ArgMatches::value_source` bookkeeping. Without clap, build [`ExplicitValues`] by hand from whatever
//! argument layer you embed.
//!
//! # Schema as source of truth
//!
//! A [`Schema`] is built once, by explicit registration — no reflection, no
//! inheritance walking. Each [`FieldSpec`] declares the name, optional alias
//! (honored by the file and env layers interchangeably), kind, default,
//! required flag, and constraints (numeric bounds, length bounds, regex
//! pattern). Validation runs on the merged map before any record is
//! constructed; a failed resolution produces an error naming the offending
//! field and nothing else.
//!
//! # Purity
//!
//! The resolver itself does no I/O: the env layer is a snapshot taken once
//! per resolution, the file layer is loaded up front, and resolution is a
//! pure function of its four inputs. Resolving twice with the same inputs
//! yields the same values and the same provenance, and records are immutable
//! once constructed — re-resolution builds a new record rather than editing
//! one in place.
//!
//! # Errors
//!
//! All fallible operations return [`SrcfigError`]. Errors are user-facing
//! and specific: coercion failures name the field and the raw string,
//! constraint violations name the constraint, unknown file keys name the key
//! and path. See the [`error`] module for the full set.

pub mod error;

#[cfg(feature = "clap")]
pub mod cli;
pub mod env;
pub mod explicit;
pub mod file;
pub mod record;
pub mod resolve;
pub mod schema;
pub mod sources;
mod validate;

#[cfg(test)]
mod fixtures;

pub use error::SrcfigError;
pub use explicit::ExplicitValues;
pub use record::ResolvedConfig;
pub use resolve::{Resolution, merge, resolve};
pub use schema::{Constraints, FieldKind, FieldSpec, Schema, SchemaBuilder};
pub use sources::{TrackedValue, ValueSource};
