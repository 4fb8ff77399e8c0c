//! Value sources and the precedence order between them.
//!
//! Every resolved field carries exactly one [`ValueSource`] tag telling which
//! layer supplied its final value. The derived `Ord` encodes the precedence
//! used by the resolver: `Explicit > File > Env > Default`.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The layer a configuration value came from.
///
/// Variants are declared in ascending precedence so the derived ordering is
/// the resolution order: a layer overrides every layer that compares less.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    /// Declared default from the schema.
    Default,
    /// Environment variable.
    Env,
    /// Configuration file.
    File,
    /// Explicitly supplied by the caller (CLI flag or equivalent).
    Explicit,
}

impl ValueSource {
    /// All sources in ascending precedence order.
    pub const ALL: [ValueSource; 4] = [
        ValueSource::Default,
        ValueSource::Env,
        ValueSource::File,
        ValueSource::Explicit,
    ];

    /// Short lowercase name, matching the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueSource::Default => "default",
            ValueSource::Env => "env",
            ValueSource::File => "file",
            ValueSource::Explicit => "explicit",
        }
    }
}

impl fmt::Display for ValueSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A value paired with the source that supplied it.
///
/// Used transiently during merge and returned by
/// [`ResolvedConfig::tracked`](crate::ResolvedConfig::tracked).
#[derive(Debug, Clone, PartialEq)]
pub struct TrackedValue {
    pub value: Value,
    pub source: ValueSource,
}

impl TrackedValue {
    pub fn new(value: Value, source: ValueSource) -> Self {
        Self { value, source }
    }
}

impl fmt::Display for TrackedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (from {})", self.value, self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn precedence_order() {
        assert!(ValueSource::Explicit > ValueSource::File);
        assert!(ValueSource::File > ValueSource::Env);
        assert!(ValueSource::Env > ValueSource::Default);
    }

    #[test]
    fn all_is_ascending() {
        let mut sorted = ValueSource::ALL;
        sorted.sort();
        assert_eq!(sorted, ValueSource::ALL);
    }

    #[test]
    fn display_matches_serde() {
        for source in ValueSource::ALL {
            let json = serde_json::to_value(source).unwrap();
            assert_eq!(json, serde_json::Value::String(source.to_string()));
        }
    }

    #[test]
    fn tracked_value_display() {
        let tracked = TrackedValue::new(json!(8080), ValueSource::File);
        assert_eq!(tracked.to_string(), "8080 (from file)");
    }
}
