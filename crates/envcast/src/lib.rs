// crates/envcast/src/lib.rs
// ============================================================================
// Module: envcast Library
// Description: Typed accessors over flat string-keyed environments.
// Purpose: Resolve variables, apply defaults, and cast raw values to typed shapes.
// Dependencies: bigdecimal, serde, serde_json, thiserror, tracing, url
// ============================================================================

//! ## Overview
//! `envcast` reads a named variable from a [`Source`] (the process environment
//! or any key/value map), falls back to a default when the variable is absent,
//! and coerces the raw value into the shape described by a [`CastDescriptor`].
//! Composite descriptors (lists, sets, tuples, maps) cast each element, key,
//! and value individually; nested composites are rejected before any work.
//!
//! Every failure surfaces as a [`ConfigurationError`] naming the variable.
//!
//! ```
//! use envcast::CastDescriptor;
//! use envcast::Environment;
//! use envcast::Fallback;
//! use envcast::Value;
//!
//! let env = Environment::from_pairs([("PORTS", "80, 443")]);
//! let ports = env.get_list("PORTS", Fallback::NotSet, CastDescriptor::int(), true)?;
//! assert_eq!(ports, Value::List(vec![Value::Int(80), Value::Int(443)]));
//! # Ok::<(), envcast::ConfigurationError>(())
//! ```

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod cast;
pub mod descriptor;
pub mod environment;
pub mod error;
pub mod resolver;
pub mod source;
pub mod value;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use cast::cast;
pub use descriptor::CastDescriptor;
pub use descriptor::CastFnError;
pub use descriptor::CollectionKind;
pub use descriptor::CustomCast;
pub use descriptor::DescriptorError;
pub use descriptor::MAX_DESCRIPTOR_NESTING;
pub use descriptor::ScalarKind;
pub use environment::Environment;
pub use environment::env;
pub use error::ConfigurationError;
pub use resolver::Fallback;
pub use resolver::resolve;
pub use resolver::should_cast;
pub use source::ProcessEnv;
pub use source::Source;
pub use source::SourceError;
pub use value::Value;
