// crates/envcast/src/cast/scalar.rs
// ============================================================================
// Module: Scalar Casts
// Description: Casts to bool, int, float, decimal, str, json, url, and custom.
// Purpose: Coerce single values with precise, variable-qualified diagnostics.
// Dependencies: bigdecimal, serde_json, url, crate::{descriptor, error, value}
// ============================================================================

//! ## Overview
//! Each scalar kind has a dedicated path with its own error phrasing.
//! Already-typed inputs of the target kind pass through unchanged. Integer and
//! float parsing accept `_` as a legibility separator (`1_000_000`).

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::str::FromStr;

use bigdecimal::BigDecimal;
use bigdecimal::FromPrimitive;
use bigdecimal::ToPrimitive;
use url::Url;

use crate::descriptor::CustomCast;
use crate::descriptor::ScalarKind;
use crate::error::ConfigurationError;
use crate::value::Value;

// ============================================================================
// SECTION: Dispatch
// ============================================================================

/// Casts `value` to the scalar `kind`.
///
/// # Errors
///
/// Returns [`ConfigurationError::CastFailed`] when `value` cannot be coerced.
pub fn cast_scalar(
    key: &str,
    value: Value,
    kind: &ScalarKind,
) -> Result<Value, ConfigurationError> {
    match kind {
        ScalarKind::Raw => Ok(value),
        ScalarKind::Bool => cast_bool(key, value),
        ScalarKind::Int => cast_int(key, value),
        ScalarKind::Float => cast_float(key, value),
        ScalarKind::Decimal => cast_decimal(key, value),
        ScalarKind::Str => Ok(cast_str(value)),
        ScalarKind::Json => cast_json(key, value),
        ScalarKind::Url => cast_url(key, value),
        ScalarKind::Custom(custom) => cast_custom(key, value, custom),
    }
}

// ============================================================================
// SECTION: Numeric and Boolean Casts
// ============================================================================

/// Accepts booleans and the case-insensitive literals `true` / `false`.
fn cast_bool(key: &str, value: Value) -> Result<Value, ConfigurationError> {
    if matches!(value, Value::Bool(_)) {
        return Ok(value);
    }
    if let Value::Str(text) = &value {
        if text.eq_ignore_ascii_case("true") {
            return Ok(Value::Bool(true));
        }
        if text.eq_ignore_ascii_case("false") {
            return Ok(Value::Bool(false));
        }
    }
    let reason = format!("could not be parsed as bool: value {value} must be 'true' or 'false'");
    Err(ConfigurationError::cast_failed(key, &value, reason))
}

/// Parses strings (separators stripped) and converts other numerics, truncating
/// fractional parts toward zero.
fn cast_int(key: &str, value: Value) -> Result<Value, ConfigurationError> {
    let parsed = match &value {
        Value::Int(number) => Ok(*number),
        Value::Bool(flag) => Ok(i64::from(*flag)),
        Value::Float(number) => float_to_int(*number),
        Value::Decimal(number) => {
            number.with_scale(0).to_i64().ok_or_else(|| format!("{number} is out of range"))
        }
        Value::Str(text) => strip_separators(text).parse::<i64>().map_err(|err| err.to_string()),
        other => Err(format!("unsupported type {}", other.type_name())),
    };
    parsed.map(Value::Int).map_err(|reason| {
        let reason = format!("could not be parsed as int: {reason} (value '{value}')");
        ConfigurationError::cast_failed(key, &value, reason)
    })
}

/// Parses strings (separators stripped) and widens other numerics.
fn cast_float(key: &str, value: Value) -> Result<Value, ConfigurationError> {
    let parsed = match &value {
        Value::Float(number) => Ok(*number),
        Value::Bool(flag) => Ok(f64::from(u8::from(*flag))),
        Value::Int(number) => number.to_f64().ok_or_else(|| format!("{number} is out of range")),
        Value::Decimal(number) => {
            number.to_f64().ok_or_else(|| format!("{number} is out of range"))
        }
        Value::Str(text) => strip_separators(text).parse::<f64>().map_err(|err| err.to_string()),
        other => Err(format!("unsupported type {}", other.type_name())),
    };
    parsed.map(Value::Float).map_err(|reason| {
        let reason = format!("could not be parsed as float: {reason} (value '{value}')");
        ConfigurationError::cast_failed(key, &value, reason)
    })
}

/// Parses strings exactly and converts other numerics to decimals.
fn cast_decimal(key: &str, value: Value) -> Result<Value, ConfigurationError> {
    if matches!(value, Value::Decimal(_)) {
        return Ok(value);
    }
    let parsed = match &value {
        Value::Str(text) => BigDecimal::from_str(text.trim()).ok(),
        Value::Int(number) => Some(BigDecimal::from(*number)),
        Value::Bool(flag) => Some(BigDecimal::from(i64::from(*flag))),
        Value::Float(number) => BigDecimal::from_f64(*number),
        _ => None,
    };
    parsed.map(Value::Decimal).ok_or_else(|| {
        let reason = format!("could not be parsed as decimal: {value}");
        ConfigurationError::cast_failed(key, &value, reason)
    })
}

/// Removes surrounding whitespace and `_` separators from numeric text.
fn strip_separators(text: &str) -> String {
    text.trim().replace('_', "")
}

/// Truncates a finite float toward zero, failing outside the `i64` range.
fn float_to_int(number: f64) -> Result<i64, String> {
    BigDecimal::from_f64(number)
        .and_then(|decimal| decimal.with_scale(0).to_i64())
        .ok_or_else(|| format!("cannot convert float {number} to int"))
}

// ============================================================================
// SECTION: Text and Structured Casts
// ============================================================================

/// Strings pass through; everything else is rendered.
fn cast_str(value: Value) -> Value {
    match value {
        Value::Str(_) => value,
        other => Value::Str(other.to_string()),
    }
}

/// Parses JSON text; already-parsed documents pass through.
fn cast_json(key: &str, value: Value) -> Result<Value, ConfigurationError> {
    if matches!(value, Value::Json(_)) {
        return Ok(value);
    }
    let reason = match &value {
        Value::Str(text) => match serde_json::from_str::<serde_json::Value>(text) {
            Ok(document) => return Ok(Value::Json(document)),
            Err(err) => format!("could not be parsed as json: {err}"),
        },
        other => format!("could not be parsed as json: expected str, got {}", other.type_name()),
    };
    Err(ConfigurationError::cast_failed(key, &value, reason))
}

/// Parses absolute URL text; already-parsed URLs pass through.
fn cast_url(key: &str, value: Value) -> Result<Value, ConfigurationError> {
    if matches!(value, Value::Url(_)) {
        return Ok(value);
    }
    let reason = match &value {
        Value::Str(text) => match Url::parse(text) {
            Ok(url) => return Ok(Value::Url(url)),
            Err(err) => format!("could not be parsed as url: {err}"),
        },
        other => format!("could not be parsed as url: expected str, got {}", other.type_name()),
    };
    Err(ConfigurationError::cast_failed(key, &value, reason))
}

/// Runs a user transform, re-signaling its error with the variable name.
fn cast_custom(
    key: &str,
    value: Value,
    custom: &CustomCast,
) -> Result<Value, ConfigurationError> {
    custom.apply(value.clone()).map_err(|err| {
        let reason = format!("could not be parsed by {}: {err}", custom.name());
        ConfigurationError::cast_failed(key, &value, reason)
    })
}

// ============================================================================
// SECTION: Tests
// ============================================================================
