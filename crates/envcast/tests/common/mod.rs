// crates/envcast/tests/common/mod.rs
// ============================================================================
// Module: Shared Test Helpers
// Description: Fixtures and assertions shared by envcast integration tests.
// Purpose: Keep cast assertions uniform across test binaries.
// ============================================================================

#![allow(dead_code, reason = "Not every test binary uses every helper.")]

use std::collections::BTreeMap;

use envcast::ConfigurationError;
use envcast::Environment;
use envcast::Value;

/// Result type for tests that report failures as messages.
pub type TestResult = Result<(), String>;

/// Fixed-source environment used by most tests.
pub type MapEnvironment = Environment<BTreeMap<String, Value>>;

/// Builds an environment over string pairs.
pub fn environment(pairs: &[(&str, &str)]) -> MapEnvironment {
    Environment::from_pairs(pairs.iter().copied())
}

/// Builds an environment over a single typed value.
pub fn typed(key: &str, value: Value) -> MapEnvironment {
    Environment::from_pairs([(key, value)])
}

/// Asserts that a result holds exactly `expected`.
pub fn assert_value(result: Result<Value, ConfigurationError>, expected: &Value) -> TestResult {
    match result {
        Ok(value) if &value == expected => Ok(()),
        Ok(value) => Err(format!("expected {expected:?}, got {value:?}")),
        Err(error) => Err(format!("expected {expected:?}, got error '{error}'")),
    }
}

/// Asserts that a result is a cast failure whose message contains every needle.
pub fn assert_cast_error(
    result: Result<Value, ConfigurationError>,
    needles: &[&str],
) -> TestResult {
    match result {
        Err(error @ ConfigurationError::CastFailed { .. }) => {
            let message = error.to_string();
            match needles.iter().find(|needle| !message.contains(**needle)) {
                Some(needle) => Err(format!("error '{message}' did not contain '{needle}'")),
                None => Ok(()),
            }
        }
        Err(error) => Err(format!("expected cast failure, got '{error}'")),
        Ok(value) => Err(format!("expected cast failure, got {value:?}")),
    }
}
