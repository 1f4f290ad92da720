// crates/envcast-cli/src/logging.rs
// ============================================================================
// Module: CLI Logging
// Description: Optional tracing subscriber setup for the envcast binary.
// Purpose: Route library diagnostics to stderr when asked for.
// Dependencies: tracing-subscriber
// ============================================================================

//! ## Overview
//! Logging is off unless `--verbose` is passed or a filter is supplied through
//! `ENVCAST_LOG` (preferred) or `RUST_LOG`. Output always goes to stderr so
//! stdout stays machine-readable. The library only logs variable names.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Environment variable holding envcast-specific filter directives.
pub const LOG_ENV: &str = "ENVCAST_LOG";
/// Conventional tracing filter variable, used when `ENVCAST_LOG` is unset.
pub const RUST_LOG_ENV: &str = "RUST_LOG";
/// Directives applied by `--verbose` when no filter variable is set.
const VERBOSE_DIRECTIVES: &str = "envcast=debug,envcast_cli=debug";

// ============================================================================
// SECTION: Setup
// ============================================================================

/// Picks the filter directives to install, if any.
///
/// Explicit filter variables win over `--verbose`; blank values are ignored.
pub fn filter_directives(
    verbose: bool,
    envcast_log: Option<&str>,
    rust_log: Option<&str>,
) -> Option<String> {
    [envcast_log, rust_log]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|directives| !directives.is_empty())
        .map(str::to_string)
        .or_else(|| verbose.then(|| VERBOSE_DIRECTIVES.to_string()))
}

/// Installs a stderr subscriber filtered by `directives`.
///
/// # Errors
///
/// Returns a message when the directives are malformed or a global
/// subscriber is already installed.
pub fn init_logging(directives: &str) -> Result<(), String> {
    let filter = EnvFilter::try_new(directives)
        .map_err(|err| format!("invalid log filter '{directives}': {err}"))?;
    let layer = fmt::layer().with_writer(io::stderr).with_target(true).without_time();
    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
        .map_err(|err| format!("failed to install logger: {err}"))
}
