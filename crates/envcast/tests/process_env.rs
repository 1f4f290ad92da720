// crates/envcast/tests/process_env.rs
// ============================================================================
// Module: Process Environment Tests
// Description: Lookups against the live process environment.
// Purpose: Ensure the process-wide instance reads through and fails closed.
// ============================================================================

//! ## Overview
//! Process environment tests.
//! Invariants:
//! - Tests restore environment state after each run.
//! - Values that are not valid UTF-8 are rejected, never lossily decoded.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::OnceLock;

use envcast::CastDescriptor;
use envcast::Environment;
use envcast::Fallback;
use envcast::Value;
use envcast::env;

mod env_mut {
    #![allow(unsafe_code, reason = "Tests mutate process env vars in a controlled scope.")]

    use std::ffi::OsStr;

    /// Sets an environment variable for the current process.
    pub fn set_var(key: &str, value: impl AsRef<OsStr>) {
        // SAFETY: Tests serialize environment mutation via a global lock.
        unsafe {
            std::env::set_var(key, value);
        }
    }

    /// Removes an environment variable from the current process.
    pub fn remove_var(key: &str) {
        // SAFETY: Tests serialize environment mutation via a global lock.
        unsafe {
            std::env::remove_var(key);
        }
    }
}

/// Serializes tests that touch the process environment.
fn env_lock() -> MutexGuard<'static, ()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(())).lock().expect("env lock poisoned")
}

/// Restores a variable to its prior state on drop.
struct EnvGuard {
    /// Variable name.
    name: &'static str,
    /// Value before the test ran.
    previous: Option<std::ffi::OsString>,
}

impl EnvGuard {
    /// Captures the current state of `name`.
    fn new(name: &'static str) -> Self {
        Self {
            name,
            previous: std::env::var_os(name),
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.previous.take() {
            Some(value) => env_mut::set_var(self.name, value),
            None => env_mut::remove_var(self.name),
        }
    }
}

#[test]
fn process_instance_sees_changes_made_after_startup() {
    let _lock = env_lock();
    let _guard = EnvGuard::new("ENVCAST_TEST_PORTS");

    env_mut::remove_var("ENVCAST_TEST_PORTS");
    assert!(!env().contains("ENVCAST_TEST_PORTS"));

    env_mut::set_var("ENVCAST_TEST_PORTS", "80, 443");
    assert!(env().contains("ENVCAST_TEST_PORTS"));
    let ports = env().get_list("ENVCAST_TEST_PORTS", Fallback::NotSet, CastDescriptor::int(), true);
    assert_eq!(ports, Ok(Value::List(vec![Value::Int(80), Value::Int(443)])));

    env_mut::set_var("ENVCAST_TEST_PORTS", "8080");
    let ports = env().get_list("ENVCAST_TEST_PORTS", Fallback::NotSet, CastDescriptor::int(), true);
    assert_eq!(ports, Ok(Value::List(vec![Value::Int(8080)])));
}

#[test]
fn fresh_process_environment_matches_shared_instance() {
    let _lock = env_lock();
    let _guard = EnvGuard::new("ENVCAST_TEST_FLAG");

    env_mut::set_var("ENVCAST_TEST_FLAG", "TRUE");
    let local = Environment::process();
    assert_eq!(local.get_bool("ENVCAST_TEST_FLAG", Fallback::NotSet, true), Ok(Value::Bool(true)));
    assert_eq!(env().get_bool("ENVCAST_TEST_FLAG", Fallback::NotSet, true), Ok(Value::Bool(true)));
}

#[test]
fn missing_process_variable_uses_default() {
    let _lock = env_lock();
    let _guard = EnvGuard::new("ENVCAST_TEST_MISSING");

    env_mut::remove_var("ENVCAST_TEST_MISSING");
    let value = env().get_int("ENVCAST_TEST_MISSING", Fallback::value("5"), true);
    assert_eq!(value, Ok(Value::Int(5)));
    let err = env().get_int("ENVCAST_TEST_MISSING", Fallback::NotSet, true).expect_err("missing");
    assert!(err.is_missing());
}

#[cfg(unix)]
#[test]
fn invalid_unicode_fails_closed() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let _lock = env_lock();
    let _guard = EnvGuard::new("ENVCAST_TEST_BYTES");

    env_mut::set_var("ENVCAST_TEST_BYTES", OsStr::from_bytes(&[0x66, 0x6f, 0x80]));
    assert!(env().contains("ENVCAST_TEST_BYTES"));
    let err = env()
        .get_str("ENVCAST_TEST_BYTES", Fallback::value("fallback"), true)
        .expect_err("utf-8");
    assert_eq!(err.key(), "ENVCAST_TEST_BYTES");
    assert!(err.to_string().contains("UTF-8"));
}
