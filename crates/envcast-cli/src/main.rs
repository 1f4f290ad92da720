// crates/envcast-cli/src/main.rs
// ============================================================================
// Module: envcast CLI Entry Point
// Description: Command dispatcher for typed environment lookups.
// Purpose: Let shell scripts read validated, typed settings from the environment.
// Dependencies: clap, envcast, serde_json, thiserror, tracing, tracing-subscriber
// ============================================================================

//! ## Overview
//! `envcast get` resolves a variable from the process environment, casts it
//! through a descriptor such as `int` or `list[int]`, and prints the result as
//! compact JSON. `envcast has` reports whether a variable is set. Failures are
//! written to stderr with a non-zero exit code.
//!
//! Security posture: variable values may be secrets; they are printed only as
//! the command's result and never logged.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub(crate) mod logging;

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::process::ExitCode;

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use envcast::CastDescriptor;
use envcast::ConfigurationError;
use envcast::Environment;
use envcast::Fallback;
use envcast::Source;
use envcast::Value;
use envcast::env;
use thiserror::Error;
use tracing::debug;

use crate::logging::LOG_ENV;
use crate::logging::RUST_LOG_ENV;
use crate::logging::filter_directives;
use crate::logging::init_logging;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "envcast", version, about = "Read typed values from environment variables")]
struct Cli {
    /// Emit diagnostic logs to stderr.
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Commands,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Resolve a variable, cast it, and print the result as JSON.
    Get(GetCommand),
    /// Report whether a variable is set.
    Has(HasCommand),
}

/// Arguments for `envcast get`.
#[derive(Args, Debug)]
struct GetCommand {
    /// Variable name.
    key: String,
    /// Cast descriptor, for example `int`, `list[int]`, or `dict[str:bool]`.
    #[arg(long = "cast", value_name = "DESCRIPTOR", default_value = "raw")]
    cast: String,
    /// Default text used when the variable is not set.
    #[arg(long, value_name = "TEXT", conflicts_with = "null_default")]
    default: Option<String>,
    /// Use null as the default when the variable is not set.
    #[arg(long)]
    null_default: bool,
    /// Do not cast a value that equals the default.
    #[arg(long)]
    no_force: bool,
}

/// Arguments for `envcast has`.
#[derive(Args, Debug)]
struct HasCommand {
    /// Variable name.
    key: String,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for user-facing messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a message.
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    configure_logging(cli.verbose)?;
    match cli.command {
        Commands::Get(command) => command_get(&command),
        Commands::Has(command) => command_has(&command),
    }
}

/// Installs the stderr logger when requested.
fn configure_logging(verbose: bool) -> CliResult<()> {
    let envcast_log = read_setting(LOG_ENV)?;
    let rust_log = read_setting(RUST_LOG_ENV)?;
    match filter_directives(verbose, envcast_log.as_deref(), rust_log.as_deref()) {
        Some(directives) => init_logging(&directives).map_err(CliError::new),
        None => Ok(()),
    }
}

/// Reads an optional string setting from the process environment.
fn read_setting(key: &str) -> CliResult<Option<String>> {
    let value = env()
        .get_str(key, Fallback::null(), false)
        .map_err(|err| CliError::new(err.to_string()))?;
    Ok(value.as_str().map(str::to_string))
}

// ============================================================================
// SECTION: Commands
// ============================================================================

/// Handles `envcast get`.
fn command_get(command: &GetCommand) -> CliResult<ExitCode> {
    let value = resolve_get(env(), command).map_err(|err| CliError::new(err.to_string()))?;
    let rendered = render_json(&value)?;
    write_stdout_line(&rendered).map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Handles `envcast has`.
fn command_has(command: &HasCommand) -> CliResult<ExitCode> {
    let present = env().contains(&command.key);
    write_stdout_line(if present { "true" } else { "false" })
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(if present { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

/// Resolves and casts the variable named by `command` against `environment`.
fn resolve_get<S: Source>(
    environment: &Environment<S>,
    command: &GetCommand,
) -> Result<Value, ConfigurationError> {
    let descriptor = command
        .cast
        .parse::<CastDescriptor>()
        .map_err(|err| ConfigurationError::invalid_descriptor(&command.key, &err))?;
    debug!(key = %command.key, cast = %descriptor, "resolving variable");
    environment.get(&command.key, fallback_for(command), &descriptor, !command.no_force)
}

/// Builds the fallback selected by `--default` / `--null-default`.
fn fallback_for(command: &GetCommand) -> Fallback {
    match (&command.default, command.null_default) {
        (Some(text), _) => Fallback::value(text.as_str()),
        (None, true) => Fallback::null(),
        (None, false) => Fallback::NotSet,
    }
}

/// Renders a value as compact JSON.
fn render_json(value: &Value) -> CliResult<String> {
    serde_json::to_string(value)
        .map_err(|err| CliError::new(format!("failed to render value as JSON: {err}")))
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats an output failure message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    format!("failed to write to {stream}: {error}")
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
