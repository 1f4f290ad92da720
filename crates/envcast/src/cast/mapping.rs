// crates/envcast/src/cast/mapping.rs
// ============================================================================
// Module: Mapping Casts
// Description: Casts `k=v,k=v` text into maps, optionally casting both sides.
// Purpose: Read small dictionaries from a single environment variable.
// Dependencies: crate::{descriptor, error, value}
// ============================================================================

//! ## Overview
//! Each comma-separated piece is split on its first `=`; both sides are
//! trimmed, so values may themselves contain `=`. Later duplicates win.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use crate::descriptor::CastDescriptor;
use crate::error::ConfigurationError;
use crate::value::Value;

// ============================================================================
// SECTION: Casts
// ============================================================================

/// Converts `value` into a string-to-string map.
///
/// # Errors
///
/// Returns [`ConfigurationError::CastFailed`] when `value` is neither a map nor
/// well-formed `k=v` text.
pub fn cast_dict(key: &str, value: Value) -> Result<Value, ConfigurationError> {
    dict_entries(key, value).map(Value::Map)
}

/// Converts `value` into a map, casting keys and values separately.
///
/// # Errors
///
/// Returns [`ConfigurationError::CastFailed`] when the map conversion or any
/// key or value cast fails.
pub fn cast_mapping(
    key: &str,
    value: Value,
    key_cast: &CastDescriptor,
    value_cast: &CastDescriptor,
) -> Result<Value, ConfigurationError> {
    let mut entries = BTreeMap::new();
    for (entry_key, entry_value) in dict_entries(key, value)? {
        let entry_key = super::cast_validated(key, entry_key, key_cast)?;
        let entry_value = super::cast_validated(key, entry_value, value_cast)?;
        entries.insert(entry_key, entry_value);
    }
    Ok(Value::Map(entries))
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Returns map entries from a map value or `k=v` text.
fn dict_entries(key: &str, value: Value) -> Result<BTreeMap<Value, Value>, ConfigurationError> {
    match value {
        Value::Map(entries) => Ok(entries),
        Value::Str(ref text) => {
            let mut entries = BTreeMap::new();
            for piece in super::split_list(text) {
                let Some((entry_key, entry_value)) = piece.split_once('=') else {
                    let reason = format!("cannot be cast to dict: entry '{piece}' is missing '='");
                    return Err(ConfigurationError::cast_failed(key, &value, reason));
                };
                entries.insert(Value::from(entry_key.trim()), Value::from(entry_value.trim()));
            }
            Ok(entries)
        }
        other => {
            let reason = format!("cannot be cast from {} to dict", other.type_name());
            Err(ConfigurationError::cast_failed(key, &other, reason))
        }
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
