// crates/envcast/src/cast.rs
// ============================================================================
// Module: Casting Engine
// Description: Dispatches values through cast descriptors.
// Purpose: Turn raw or loosely typed values into the shape a caller asked for.
// Dependencies: tracing, crate::{descriptor, error, value}
// ============================================================================

//! ## Overview
//! [`cast`] validates the descriptor first, so nested composites are rejected
//! before any conversion happens, then dispatches on the descriptor variant:
//! scalars go to [`scalar`], bare and element-cast collections to
//! [`sequence`], bare and key/value-cast maps to [`mapping`].
//!
//! Casting is pure and deterministic; every failure names the variable.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod mapping;
pub mod scalar;
pub mod sequence;

// ============================================================================
// SECTION: Imports
// ============================================================================

use tracing::trace;

use crate::descriptor::CastDescriptor;
use crate::error::ConfigurationError;
use crate::value::Value;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// Casts `value`, read from variable `key`, into the shape `descriptor` describes.
///
/// # Errors
///
/// Returns [`ConfigurationError::CastFailed`] when the descriptor is nested
/// more than one level deep or when the value cannot be coerced.
pub fn cast(
    key: &str,
    value: Value,
    descriptor: &CastDescriptor,
) -> Result<Value, ConfigurationError> {
    descriptor.validate().map_err(|err| ConfigurationError::invalid_descriptor(key, &err))?;
    trace!(key, cast = %descriptor, "casting environment variable");
    cast_validated(key, value, descriptor)
}

/// Dispatches on a descriptor already known to satisfy the nesting invariant.
fn cast_validated(
    key: &str,
    value: Value,
    descriptor: &CastDescriptor,
) -> Result<Value, ConfigurationError> {
    match descriptor {
        CastDescriptor::Scalar(kind) => scalar::cast_scalar(key, value, kind),
        CastDescriptor::Collection(shape) => sequence::cast_collection(key, value, *shape),
        CastDescriptor::Sequence {
            shape,
            element,
        } => sequence::cast_sequence(key, value, *shape, element),
        CastDescriptor::Dict => mapping::cast_dict(key, value),
        CastDescriptor::Mapping {
            key: key_cast,
            value: value_cast,
        } => mapping::cast_mapping(key, value, key_cast, value_cast),
    }
}

/// Splits comma-separated text, trimming pieces and dropping empty ones.
fn split_list(text: &str) -> impl Iterator<Item = &str> {
    text.split(',').map(str::trim).filter(|piece| !piece.is_empty())
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

    use super::cast;
    use super::split_list;
    use crate::descriptor::CastDescriptor;
    use crate::value::Value;

    #[test]
    fn split_list_trims_and_drops_empty_pieces() {
        let pieces: Vec<&str> = split_list(" a, ,b ,, c ").collect();
        assert_eq!(pieces, ["a", "b", "c"]);
        assert_eq!(split_list("").count(), 0);
    }

    #[test]
    fn nested_descriptor_is_rejected_before_conversion() {
        let descriptor = CastDescriptor::list_of(CastDescriptor::list());
        let err = cast("XXX", Value::Int(1), &descriptor).expect_err("nested");
        let message = err.to_string();
        assert!(message.contains("XXX"));
        assert!(message.contains("nested"));
        assert_eq!(err.value(), None);
    }

    #[test]
    fn raw_cast_is_identity() {
        let value = Value::List(vec![Value::Int(1)]);
        assert_eq!(cast("x", value.clone(), &CastDescriptor::raw()), Ok(value));
    }
}
