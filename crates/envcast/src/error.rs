// crates/envcast/src/error.rs
// ============================================================================
// Module: Configuration Errors
// Description: The single error type surfaced by lookups and casts.
// Purpose: Carry the variable name, offending value, and a readable reason.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! Every failure in the crate is a [`ConfigurationError`]. Two causes exist:
//! the variable is missing with no default, or a value is present but cannot be
//! coerced to the requested shape (including malformed descriptors).
//! Messages always name the variable so misconfiguration is easy to locate.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::descriptor::DescriptorError;
use crate::value::Value;

// ============================================================================
// SECTION: Error Type
// ============================================================================

/// Configuration failure for a single variable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// The variable is absent and no default was supplied.
    #[error("set the environment variable '{key}'")]
    MissingKey {
        /// Variable name.
        key: String,
    },
    /// The value could not be cast, or the cast itself is invalid.
    #[error("environment variable '{key}' {reason}")]
    CastFailed {
        /// Variable name.
        key: String,
        /// Rendered offending value, when available.
        value: Option<String>,
        /// Human-readable reason, phrased to follow the variable name.
        reason: String,
    },
}

impl ConfigurationError {
    /// Builds a [`ConfigurationError::MissingKey`].
    #[must_use]
    pub fn missing(key: &str) -> Self {
        Self::MissingKey {
            key: key.to_string(),
        }
    }

    /// Builds a [`ConfigurationError::CastFailed`] that records the offending value.
    #[must_use]
    pub fn cast_failed(key: &str, value: &Value, reason: impl Into<String>) -> Self {
        Self::CastFailed {
            key: key.to_string(),
            value: Some(value.to_string()),
            reason: reason.into(),
        }
    }

    /// Builds a [`ConfigurationError::CastFailed`] for a malformed descriptor.
    #[must_use]
    pub fn invalid_descriptor(key: &str, error: &DescriptorError) -> Self {
        Self::CastFailed {
            key: key.to_string(),
            value: None,
            reason: format!("cast is not valid: {error}"),
        }
    }

    /// Returns the variable name the error refers to.
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::MissingKey {
                key,
            }
            | Self::CastFailed {
                key, ..
            } => key,
        }
    }

    /// Returns the rendered offending value, when one was recorded.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::MissingKey {
                ..
            } => None,
            Self::CastFailed {
                value, ..
            } => value.as_deref(),
        }
    }

    /// Returns true when the variable was missing with no default.
    #[must_use]
    pub const fn is_missing(&self) -> bool {
        matches!(self, Self::MissingKey { .. })
    }
}
