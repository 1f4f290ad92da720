// crates/envcast/src/resolver.rs
// ============================================================================
// Module: Lookup and Default Resolver
// Description: Resolves a variable from a source or falls back to a default.
// Purpose: Separate "what raw value applies" from "how to cast it".
// Dependencies: tracing, crate::{error, source, value}
// ============================================================================

//! ## Overview
//! [`resolve`] returns the stored value when the key is present, the default
//! when it is not, and [`ConfigurationError::MissingKey`] when neither exists.
//! [`should_cast`] then decides whether the resolved value goes through the
//! casting engine. Values are never logged, only key names.

// ============================================================================
// SECTION: Imports
// ============================================================================

use tracing::debug;

use crate::error::ConfigurationError;
use crate::source::Source;
use crate::value::Value;

// ============================================================================
// SECTION: Fallback
// ============================================================================

/// Default applied when a variable is absent.
///
/// `NotSet` means "no default": resolving a missing key fails. It is distinct
/// from `Fallback::Value(Value::Null)`, an explicit null default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Fallback {
    /// No default was supplied.
    #[default]
    NotSet,
    /// Default value returned (and possibly cast) when the key is absent.
    Value(Value),
}

impl Fallback {
    /// Wraps a default value.
    pub fn value(value: impl Into<Value>) -> Self {
        Self::Value(value.into())
    }

    /// Explicit null default.
    #[must_use]
    pub const fn null() -> Self {
        Self::Value(Value::Null)
    }
}

// ============================================================================
// SECTION: Resolution
// ============================================================================

/// Resolves `key` from `source`, falling back to `fallback`.
///
/// # Errors
///
/// Returns [`ConfigurationError::MissingKey`] when the key is absent and no
/// default was supplied, or [`ConfigurationError::CastFailed`] when the source
/// cannot read the stored value.
pub fn resolve<S: Source + ?Sized>(
    source: &S,
    key: &str,
    fallback: &Fallback,
) -> Result<Value, ConfigurationError> {
    let stored = source.get(key).map_err(|err| ConfigurationError::CastFailed {
        key: key.to_string(),
        value: None,
        reason: format!("could not be read: value {err}"),
    })?;
    if let Some(value) = stored {
        return Ok(value);
    }
    match fallback {
        Fallback::NotSet => Err(ConfigurationError::missing(key)),
        Fallback::Value(default) => {
            debug!(key, "environment variable not set; using default");
            Ok(default.clone())
        }
    }
}

/// Decides whether a resolved value should be cast.
///
/// A value is cast when no default was supplied, when it differs from the
/// default, or when `force` is set and the default is not null. Comparison is
/// by value, so a stored value equal to the default is left as-is unless forced.
#[must_use]
pub fn should_cast(resolved: &Value, fallback: &Fallback, force: bool) -> bool {
    match fallback {
        Fallback::NotSet => true,
        Fallback::Value(default) => resolved != default || (force && !default.is_null()),
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

    use super::Fallback;
    use super::resolve;
    use super::should_cast;
    use crate::error::ConfigurationError;
    use crate::value::Value;

    /// Map source holding a single key.
    fn source() -> BTreeMap<String, Value> {
        BTreeMap::from([("PRESENT".to_string(), Value::from("stored"))])
    }

    #[test]
    fn present_key_wins_over_default() {
        let value = resolve(&source(), "PRESENT", &Fallback::value("default")).expect("value");
        assert_eq!(value, Value::from("stored"));
    }

    #[test]
    fn missing_key_without_default_fails() {
        let err = resolve(&source(), "ABSENT", &Fallback::NotSet).expect_err("missing");
        assert_eq!(err, ConfigurationError::missing("ABSENT"));
        assert!(err.to_string().contains("ABSENT"));
    }

    #[test]
    fn missing_key_returns_default_unchanged() {
        let value = resolve(&source(), "ABSENT", &Fallback::value(1)).expect("default");
        assert_eq!(value, Value::Int(1));
        let value = resolve(&source(), "ABSENT", &Fallback::null()).expect("null default");
        assert_eq!(value, Value::Null);
    }

    #[test]
    fn cast_decision_follows_force_rule() {
        let default = Fallback::value("1");
        assert!(should_cast(&Value::from("2"), &default, false));
        assert!(!should_cast(&Value::from("1"), &default, false));
        assert!(should_cast(&Value::from("1"), &default, true));
        assert!(!should_cast(&Value::Null, &Fallback::null(), true));
        assert!(should_cast(&Value::from("1"), &Fallback::NotSet, false));
    }
}
