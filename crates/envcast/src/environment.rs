// crates/envcast/src/environment.rs
// ============================================================================
// Module: Environment Facade
// Description: Typed accessors over a value source.
// Purpose: Provide the public "get a typed setting" entry points.
// Dependencies: tracing, crate::{cast, descriptor, error, resolver, source, value}
// ============================================================================

//! ## Overview
//! [`Environment`] couples a [`Source`] with the resolver and the casting
//! engine. Every accessor takes the same `(key, fallback, force)` arguments
//! and differs only in the descriptor it applies. [`env`] returns the
//! process-wide instance bound to the live environment.
//!
//! Security posture: values read here may be secrets; only key names are ever
//! logged.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use tracing::debug;

use crate::cast::cast;
use crate::descriptor::CastDescriptor;
use crate::error::ConfigurationError;
use crate::resolver::Fallback;
use crate::resolver::resolve;
use crate::resolver::should_cast;
use crate::source::ProcessEnv;
use crate::source::Source;
use crate::value::Value;

// ============================================================================
// SECTION: Environment
// ============================================================================

/// Typed accessor facade over a [`Source`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment<S = ProcessEnv> {
    /// Source consulted on every lookup.
    source: S,
}

/// Process-wide instance reading the live environment.
static PROCESS_ENVIRONMENT: Environment<ProcessEnv> = Environment::process();

/// Returns the process-wide environment.
///
/// Lookups read the live process environment at call time, so changes made
/// after startup are visible.
#[must_use]
pub fn env() -> &'static Environment<ProcessEnv> {
    &PROCESS_ENVIRONMENT
}

impl Environment<ProcessEnv> {
    /// Creates an environment bound to the live process environment.
    #[must_use]
    pub const fn process() -> Self {
        Self {
            source: ProcessEnv,
        }
    }
}

impl Environment<BTreeMap<String, Value>> {
    /// Creates an environment over fixed key/value pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Self {
            source: pairs.into_iter().map(|(key, value)| (key.into(), value.into())).collect(),
        }
    }
}

impl<S: Source> Environment<S> {
    /// Creates an environment over `source`.
    pub const fn new(source: S) -> Self {
        Self {
            source,
        }
    }

    /// Returns the underlying source.
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Returns true when `key` is present in the source.
    pub fn contains(&self, key: &str) -> bool {
        self.source.contains(key)
    }

    /// Resolves `key` and casts it through `descriptor`.
    ///
    /// A missing key yields the default. The resolved value is cast unless it
    /// equals a supplied default and `force` is off, or the default is null.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::MissingKey`] when the key is absent with
    /// no default, and [`ConfigurationError::CastFailed`] when the value cannot
    /// be read or cast.
    pub fn get(
        &self,
        key: &str,
        fallback: Fallback,
        descriptor: &CastDescriptor,
        force: bool,
    ) -> Result<Value, ConfigurationError> {
        let resolved = resolve(&self.source, key, &fallback)?;
        if !should_cast(&resolved, &fallback, force) {
            debug!(key, "value equals default; cast skipped");
            return Ok(resolved);
        }
        cast(key, resolved, descriptor).inspect_err(|_| {
            debug!(key, cast = %descriptor, "environment variable cast failed");
        })
    }

    /// Reads `key` as a boolean.
    ///
    /// # Errors
    ///
    /// See [`Environment::get`].
    pub fn get_bool(
        &self,
        key: &str,
        fallback: Fallback,
        force: bool,
    ) -> Result<Value, ConfigurationError> {
        self.get(key, fallback, &CastDescriptor::bool(), force)
    }

    /// Reads `key` as a float.
    ///
    /// # Errors
    ///
    /// See [`Environment::get`].
    pub fn get_float(
        &self,
        key: &str,
        fallback: Fallback,
        force: bool,
    ) -> Result<Value, ConfigurationError> {
        self.get(key, fallback, &CastDescriptor::float(), force)
    }

    /// Reads `key` as an integer.
    ///
    /// # Errors
    ///
    /// See [`Environment::get`].
    pub fn get_int(
        &self,
        key: &str,
        fallback: Fallback,
        force: bool,
    ) -> Result<Value, ConfigurationError> {
        self.get(key, fallback, &CastDescriptor::int(), force)
    }

    /// Reads `key` as a string.
    ///
    /// # Errors
    ///
    /// See [`Environment::get`].
    pub fn get_str(
        &self,
        key: &str,
        fallback: Fallback,
        force: bool,
    ) -> Result<Value, ConfigurationError> {
        self.get(key, fallback, &CastDescriptor::str(), force)
    }

    /// Reads `key` as an exact decimal.
    ///
    /// # Errors
    ///
    /// See [`Environment::get`].
    pub fn get_decimal(
        &self,
        key: &str,
        fallback: Fallback,
        force: bool,
    ) -> Result<Value, ConfigurationError> {
        self.get(key, fallback, &CastDescriptor::decimal(), force)
    }

    /// Reads `key` as a JSON document.
    ///
    /// # Errors
    ///
    /// See [`Environment::get`].
    pub fn get_json(
        &self,
        key: &str,
        fallback: Fallback,
        force: bool,
    ) -> Result<Value, ConfigurationError> {
        self.get(key, fallback, &CastDescriptor::json(), force)
    }

    /// Reads `key` as an absolute URL.
    ///
    /// Relative text such as `example.com/db` or `/var/run/sock` has no scheme
    /// and is rejected rather than returned as a partial URL.
    ///
    /// # Errors
    ///
    /// See [`Environment::get`].
    pub fn get_url(
        &self,
        key: &str,
        fallback: Fallback,
        force: bool,
    ) -> Result<Value, ConfigurationError> {
        self.get(key, fallback, &CastDescriptor::url(), force)
    }

    /// Reads `key` as a tuple whose elements are cast through `element`.
    ///
    /// # Errors
    ///
    /// See [`Environment::get`]; a composite `element` is rejected as nested.
    pub fn get_tuple(
        &self,
        key: &str,
        fallback: Fallback,
        element: CastDescriptor,
        force: bool,
    ) -> Result<Value, ConfigurationError> {
        self.get(key, fallback, &CastDescriptor::tuple_of(element), force)
    }

    /// Reads `key` as a list whose elements are cast through `element`.
    ///
    /// # Errors
    ///
    /// See [`Environment::get`]; a composite `element` is rejected as nested.
    pub fn get_list(
        &self,
        key: &str,
        fallback: Fallback,
        element: CastDescriptor,
        force: bool,
    ) -> Result<Value, ConfigurationError> {
        self.get(key, fallback, &CastDescriptor::list_of(element), force)
    }

    /// Reads `key` as a set whose elements are cast through `element`.
    ///
    /// # Errors
    ///
    /// See [`Environment::get`]; a composite `element` is rejected as nested.
    pub fn get_set(
        &self,
        key: &str,
        fallback: Fallback,
        element: CastDescriptor,
        force: bool,
    ) -> Result<Value, ConfigurationError> {
        self.get(key, fallback, &CastDescriptor::set_of(element), force)
    }

    /// Reads `key` as a map with string keys and values cast through `element`.
    ///
    /// # Errors
    ///
    /// See [`Environment::get`]; a composite `element` is rejected as nested.
    pub fn get_dict(
        &self,
        key: &str,
        fallback: Fallback,
        element: CastDescriptor,
        force: bool,
    ) -> Result<Value, ConfigurationError> {
        self.get(key, fallback, &CastDescriptor::dict_of(CastDescriptor::str(), element), force)
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
