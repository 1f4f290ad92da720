// crates/envcast/src/cast/sequence.rs
// ============================================================================
// Module: Sequence Casts
// Description: Casts to list, set, and tuple, optionally casting elements.
// Purpose: Build homogeneous collections from comma-separated text.
// Dependencies: crate::{descriptor, error, value}
// ============================================================================

//! ## Overview
//! Collection inputs convert shape directly; strings are split on `,` with
//! each piece trimmed and empty pieces dropped. Element casts run after the
//! shape conversion, so sets collapse duplicates that only appear once the
//! elements are typed (`"1, 01"` as `set[int]` yields `{1}`).

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::descriptor::CastDescriptor;
use crate::descriptor::CollectionKind;
use crate::error::ConfigurationError;
use crate::value::Value;

// ============================================================================
// SECTION: Casts
// ============================================================================

/// Converts `value` into the bare collection `shape` without touching elements.
///
/// # Errors
///
/// Returns [`ConfigurationError::CastFailed`] when `value` is neither a
/// collection nor a string.
pub fn cast_collection(
    key: &str,
    value: Value,
    shape: CollectionKind,
) -> Result<Value, ConfigurationError> {
    let items = collection_items(key, value, shape)?;
    Ok(assemble(shape, items))
}

/// Converts `value` into `shape`, then casts every element through `element`.
///
/// # Errors
///
/// Returns [`ConfigurationError::CastFailed`] when the shape conversion or any
/// element cast fails.
pub fn cast_sequence(
    key: &str,
    value: Value,
    shape: CollectionKind,
    element: &CastDescriptor,
) -> Result<Value, ConfigurationError> {
    let items = collection_items(key, value, shape)?;
    let cast_items = items
        .into_iter()
        .map(|item| super::cast_validated(key, item, element))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(assemble(shape, cast_items))
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Flattens any collection or comma-separated string into its items.
fn collection_items(
    key: &str,
    value: Value,
    shape: CollectionKind,
) -> Result<Vec<Value>, ConfigurationError> {
    match value {
        Value::List(items) | Value::Tuple(items) => Ok(items),
        Value::Set(items) => Ok(items.into_iter().collect()),
        Value::Str(text) => Ok(super::split_list(&text).map(Value::from).collect()),
        other => {
            let reason = format!("cannot be cast from {} to {}", other.type_name(), shape.name());
            Err(ConfigurationError::cast_failed(key, &other, reason))
        }
    }
}

/// Packs items into the requested collection shape.
fn assemble(shape: CollectionKind, items: Vec<Value>) -> Value {
    match shape {
        CollectionKind::List => Value::List(items),
        CollectionKind::Tuple => Value::Tuple(items),
        CollectionKind::Set => Value::Set(items.into_iter().collect()),
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
