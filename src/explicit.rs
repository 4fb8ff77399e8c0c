//! The explicit (CLI-equivalent) value layer and its per-field signal.
//!
//! Argument parsers report a value for every declared flag, including flags
//! the end user never typed — the parser's own fallback default. Treating
//! those as explicit would falsely promote defaults to the highest-precedence
//! layer, so each entry here carries a flag distinguishing "the user supplied
//! this" from "the argument layer filled this in". When an adapter cannot
//! determine the signal it must not record the entry as provided; absence of
//! evidence means not explicit.

use std::collections::BTreeMap;

use serde_json::Value;

/// One entry in the explicit layer.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ExplicitEntry {
    pub value: Value,
    /// True only when the end user actually supplied the value.
    pub provided: bool,
}

/// Values from the caller-facing argument layer, each with its
/// explicit-signal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExplicitValues {
    entries: BTreeMap<String, ExplicitEntry>,
}

impl ExplicitValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a value the end user explicitly supplied. Wins over every
    /// other layer for this field.
    pub fn provided(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.entries.insert(
            field.to_string(),
            ExplicitEntry {
                value: value.into(),
                provided: true,
            },
        );
        self
    }

    /// Record the argument layer's own fallback for a field. Kept for
    /// inspection but never applied by the resolver — the field falls
    /// through to the file/env/default layers.
    pub fn fallback(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.entries.insert(
            field.to_string(),
            ExplicitEntry {
                value: value.into(),
                provided: false,
            },
        );
        self
    }

    /// The value recorded for `field`, together with its explicit-signal.
    pub fn get(&self, field: &str) -> Option<(&Value, bool)> {
        self.entries
            .get(field)
            .map(|entry| (&entry.value, entry.provided))
    }

    pub(crate) fn entry(&self, field: &str) -> Option<&ExplicitEntry> {
        self.entries.get(field)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
