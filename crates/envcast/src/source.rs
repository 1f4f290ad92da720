// crates/envcast/src/source.rs
// ============================================================================
// Module: Value Sources
// Description: Read-only key/value sources, including the process environment.
// Purpose: Decouple lookups from where variables actually live.
// Dependencies: thiserror, crate::value
// ============================================================================

//! ## Overview
//! A [`Source`] hands raw values to the resolver. [`ProcessEnv`] reads the live
//! process environment at call time and never caches; map sources let tests and
//! embedders substitute fixed data, including already-typed values.
//!
//! Invariants:
//! - Sources are never mutated through this trait.
//! - [`ProcessEnv`] fails closed on values that are not valid UTF-8.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::HashMap;
use std::hash::BuildHasher;

use thiserror::Error;

use crate::value::Value;

// ============================================================================
// SECTION: Source Trait
// ============================================================================

/// Read failure reported by a source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    /// The stored value is not valid UTF-8.
    #[error("is not valid UTF-8")]
    InvalidUnicode,
}

/// Read-only key/value mapping queried by the resolver.
pub trait Source {
    /// Returns the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] when a stored value cannot be read.
    fn get(&self, key: &str) -> Result<Option<Value>, SourceError>;

    /// Returns true when `key` is present.
    fn contains(&self, key: &str) -> bool;
}

impl<T: Source + ?Sized> Source for &T {
    fn get(&self, key: &str) -> Result<Option<Value>, SourceError> {
        (**self).get(key)
    }

    fn contains(&self, key: &str) -> bool {
        (**self).contains(key)
    }
}

// ============================================================================
// SECTION: Process Environment
// ============================================================================

/// The live process environment, read at call time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessEnv;

impl Source for ProcessEnv {
    fn get(&self, key: &str) -> Result<Option<Value>, SourceError> {
        std::env::var_os(key).map_or(Ok(None), |raw| {
            raw.into_string().map(|value| Some(Value::Str(value))).map_err(|_| {
                SourceError::InvalidUnicode
            })
        })
    }

    fn contains(&self, key: &str) -> bool {
        std::env::var_os(key).is_some()
    }
}

// ============================================================================
// SECTION: Map Sources
// ============================================================================

impl Source for BTreeMap<String, Value> {
    fn get(&self, key: &str) -> Result<Option<Value>, SourceError> {
        Ok(BTreeMap::get(self, key).cloned())
    }

    fn contains(&self, key: &str) -> bool {
        self.contains_key(key)
    }
}

impl<H: BuildHasher> Source for HashMap<String, Value, H> {
    fn get(&self, key: &str) -> Result<Option<Value>, SourceError> {
        Ok(HashMap::get(self, key).cloned())
    }

    fn contains(&self, key: &str) -> bool {
        self.contains_key(key)
    }
}

impl Source for BTreeMap<String, String> {
    fn get(&self, key: &str) -> Result<Option<Value>, SourceError> {
        Ok(BTreeMap::get(self, key).map(|value| Value::Str(value.clone())))
    }

    fn contains(&self, key: &str) -> bool {
        self.contains_key(key)
    }
}

impl<H: BuildHasher> Source for HashMap<String, String, H> {
    fn get(&self, key: &str) -> Result<Option<Value>, SourceError> {
        Ok(HashMap::get(self, key).map(|value| Value::Str(value.clone())))
    }

    fn contains(&self, key: &str) -> bool {
        self.contains_key(key)
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::expect_used,
        clippy::unwrap_used,
        reason = "Test assertions use expect/unwrap for clarity."
    )]

    use std::collections::BTreeMap;
    use std::collections::HashMap;

    use super::ProcessEnv;
    use super::Source;
    use crate::value::Value;

    #[test]
    fn map_sources_return_stored_values() {
        let typed = BTreeMap::from([("x".to_string(), Value::Int(1))]);
        assert_eq!(Source::get(&typed, "x"), Ok(Some(Value::Int(1))));
        assert_eq!(Source::get(&typed, "y"), Ok(None));

        let raw = HashMap::from([("x".to_string(), "1".to_string())]);
        assert_eq!(Source::get(&raw, "x"), Ok(Some(Value::from("1"))));
        assert!(Source::contains(&raw, "x"));
        assert!(!Source::contains(&raw, "y"));
    }

    #[test]
    fn process_env_reports_absent_keys() {
        let key = "ENVCAST_SOURCE_TEST_SURELY_UNSET_KEY";
        assert!(!ProcessEnv.contains(key));
        assert_eq!(ProcessEnv.get(key), Ok(None));
    }
}
