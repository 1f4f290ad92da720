// crates/envcast/src/descriptor.rs
// ============================================================================
// Module: Cast Descriptors
// Description: Tagged descriptions of the shape a cast should produce.
// Purpose: Replace type-as-value casting with an explicit, validated sum type.
// Dependencies: thiserror, crate::value
// ============================================================================

//! ## Overview
//! A [`CastDescriptor`] tells the casting engine what to build: a scalar, a
//! bare collection of strings, a collection whose elements are cast, a bare
//! string map, or a map whose keys and values are cast.
//!
//! Descriptors have a textual form used by the CLI and by `Display`:
//! `int`, `list`, `set[float]`, `dict[str:int]`. Parsing rejects wrong-arity
//! composites such as `list[int, int]`; nested composites such as `list[list]`
//! parse but fail [`CastDescriptor::validate`]. Bracket nesting deeper than
//! [`MAX_DESCRIPTOR_NESTING`] is rejected while parsing.
//!
//! Invariants:
//! - `Sequence` and `Mapping` may only wrap `Scalar` descriptors.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use thiserror::Error;

use crate::value::Value;

// ============================================================================
// SECTION: Custom Casts
// ============================================================================

/// Error type returned by custom cast functions.
pub type CastFnError = Box<dyn std::error::Error + Send + Sync>;

/// Signature of a user-supplied cast function.
type CastFn = dyn Fn(Value) -> Result<Value, CastFnError> + Send + Sync;

/// User-supplied value transform used as a scalar cast.
///
/// Two custom casts are equal only when they share the same function and name.
#[derive(Clone)]
pub struct CustomCast {
    /// Label used in diagnostics and descriptor rendering.
    name: String,
    /// Shared transform.
    func: Arc<CastFn>,
}

impl CustomCast {
    /// Wraps `func` under the diagnostic label `name`.
    pub fn new<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(Value) -> Result<Value, CastFnError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    /// Returns the diagnostic label.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Applies the transform to `value`.
    ///
    /// # Errors
    ///
    /// Returns whatever error the wrapped function produces.
    pub fn apply(&self, value: Value) -> Result<Value, CastFnError> {
        (self.func)(value)
    }
}

impl fmt::Debug for CustomCast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomCast").field("name", &self.name).finish_non_exhaustive()
    }
}

impl PartialEq for CustomCast {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && Arc::ptr_eq(&self.func, &other.func)
    }
}

impl Eq for CustomCast {}

// ============================================================================
// SECTION: Descriptor Types
// ============================================================================

/// Scalar cast targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScalarKind {
    /// Identity: the value is returned unchanged.
    Raw,
    /// `true` / `false`, case-insensitive.
    Bool,
    /// 64-bit signed integer; `_` separators allowed.
    Int,
    /// Double precision float; `_` separators allowed.
    Float,
    /// Arbitrary precision decimal.
    Decimal,
    /// String.
    Str,
    /// JSON document.
    Json,
    /// Absolute URL.
    Url,
    /// User-supplied transform.
    Custom(CustomCast),
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Raw => f.write_str("raw"),
            Self::Bool => f.write_str("bool"),
            Self::Int => f.write_str("int"),
            Self::Float => f.write_str("float"),
            Self::Decimal => f.write_str("decimal"),
            Self::Str => f.write_str("str"),
            Self::Json => f.write_str("json"),
            Self::Url => f.write_str("url"),
            Self::Custom(custom) => write!(f, "custom({})", custom.name()),
        }
    }
}

/// Homogeneous collection shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKind {
    /// Ordered list.
    List,
    /// Unordered set; duplicates collapse.
    Set,
    /// Fixed tuple.
    Tuple,
}

impl CollectionKind {
    /// Returns the canonical lowercase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Set => "set",
            Self::Tuple => "tuple",
        }
    }
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Description of the shape a cast should produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CastDescriptor {
    /// Scalar target.
    Scalar(ScalarKind),
    /// Bare collection: elements are kept as-is (strings when split from text).
    Collection(CollectionKind),
    /// Collection whose elements are each cast through `element`.
    Sequence {
        /// Collection shape to build.
        shape: CollectionKind,
        /// Per-element cast.
        element: Box<Self>,
    },
    /// Bare string-to-string map.
    Dict,
    /// Map whose keys and values are each cast.
    Mapping {
        /// Per-key cast.
        key: Box<Self>,
        /// Per-value cast.
        value: Box<Self>,
    },
}

// ============================================================================
// SECTION: Builders
// ============================================================================

impl CastDescriptor {
    /// Identity cast.
    #[must_use]
    pub const fn raw() -> Self {
        Self::Scalar(ScalarKind::Raw)
    }

    /// Boolean cast.
    #[must_use]
    pub const fn bool() -> Self {
        Self::Scalar(ScalarKind::Bool)
    }

    /// Integer cast.
    #[must_use]
    pub const fn int() -> Self {
        Self::Scalar(ScalarKind::Int)
    }

    /// Float cast.
    #[must_use]
    pub const fn float() -> Self {
        Self::Scalar(ScalarKind::Float)
    }

    /// Decimal cast.
    #[must_use]
    pub const fn decimal() -> Self {
        Self::Scalar(ScalarKind::Decimal)
    }

    /// String cast.
    #[must_use]
    pub const fn str() -> Self {
        Self::Scalar(ScalarKind::Str)
    }

    /// JSON cast.
    #[must_use]
    pub const fn json() -> Self {
        Self::Scalar(ScalarKind::Json)
    }

    /// URL cast.
    #[must_use]
    pub const fn url() -> Self {
        Self::Scalar(ScalarKind::Url)
    }

    /// Custom function cast.
    pub fn custom<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(Value) -> Result<Value, CastFnError> + Send + Sync + 'static,
    {
        Self::Scalar(ScalarKind::Custom(CustomCast::new(name, func)))
    }

    /// Bare list cast.
    #[must_use]
    pub const fn list() -> Self {
        Self::Collection(CollectionKind::List)
    }

    /// Bare set cast.
    #[must_use]
    pub const fn set() -> Self {
        Self::Collection(CollectionKind::Set)
    }

    /// Bare tuple cast.
    #[must_use]
    pub const fn tuple() -> Self {
        Self::Collection(CollectionKind::Tuple)
    }

    /// Bare string map cast.
    #[must_use]
    pub const fn dict() -> Self {
        Self::Dict
    }

    /// Collection of `shape` with every element cast through `element`.
    pub fn sequence_of(shape: CollectionKind, element: impl Into<Self>) -> Self {
        Self::Sequence {
            shape,
            element: Box::new(element.into()),
        }
    }

    /// List with every element cast through `element`.
    pub fn list_of(element: impl Into<Self>) -> Self {
        Self::sequence_of(CollectionKind::List, element)
    }

    /// Set with every element cast through `element`.
    pub fn set_of(element: impl Into<Self>) -> Self {
        Self::sequence_of(CollectionKind::Set, element)
    }

    /// Tuple with every element cast through `element`.
    pub fn tuple_of(element: impl Into<Self>) -> Self {
        Self::sequence_of(CollectionKind::Tuple, element)
    }

    /// Map with keys cast through `key` and values through `value`.
    pub fn dict_of(key: impl Into<Self>, value: impl Into<Self>) -> Self {
        Self::Mapping {
            key: Box::new(key.into()),
            value: Box::new(value.into()),
        }
    }

    /// Returns true for descriptors that build collections or maps.
    #[must_use]
    pub const fn is_composite(&self) -> bool {
        !matches!(self, Self::Scalar(_))
    }

    /// Checks the one-level nesting invariant.
    ///
    /// # Errors
    ///
    /// Returns [`DescriptorError::NestedCollection`] when a sequence element or
    /// a mapping key/value descriptor is itself composite.
    pub fn validate(&self) -> Result<(), DescriptorError> {
        match self {
            Self::Sequence {
                shape,
                element,
            } => ensure_scalar(shape.name(), element),
            Self::Mapping {
                key,
                value,
            } => {
                ensure_scalar("dict", key)?;
                ensure_scalar("dict", value)
            }
            Self::Scalar(_) | Self::Collection(_) | Self::Dict => Ok(()),
        }
    }
}

/// Rejects composite descriptors nested inside `outer`.
fn ensure_scalar(outer: &'static str, inner: &CastDescriptor) -> Result<(), DescriptorError> {
    if inner.is_composite() {
        return Err(DescriptorError::NestedCollection {
            outer,
            inner: inner.to_string(),
        });
    }
    Ok(())
}

impl From<ScalarKind> for CastDescriptor {
    fn from(kind: ScalarKind) -> Self {
        Self::Scalar(kind)
    }
}

impl From<CollectionKind> for CastDescriptor {
    fn from(kind: CollectionKind) -> Self {
        Self::Collection(kind)
    }
}

impl From<CustomCast> for CastDescriptor {
    fn from(custom: CustomCast) -> Self {
        Self::Scalar(ScalarKind::Custom(custom))
    }
}

impl fmt::Display for CastDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(kind) => write!(f, "{kind}"),
            Self::Collection(kind) => write!(f, "{kind}"),
            Self::Sequence {
                shape,
                element,
            } => write!(f, "{shape}[{element}]"),
            Self::Dict => f.write_str("dict"),
            Self::Mapping {
                key,
                value,
            } => write!(f, "dict[{key}:{value}]"),
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Malformed descriptor diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DescriptorError {
    /// A composite descriptor wraps another composite descriptor.
    #[error("{outer} cannot contain {inner}: it is not possible to cast to nested collections")]
    NestedCollection {
        /// Outer composite name.
        outer: &'static str,
        /// Rendered inner descriptor.
        inner: String,
    },
    /// A composite descriptor has the wrong number of arguments.
    #[error("{kind} cast must wrap exactly {expected}, found {found}")]
    Arity {
        /// Composite name.
        kind: &'static str,
        /// Expected argument description.
        expected: &'static str,
        /// Number of arguments given.
        found: usize,
    },
    /// The type name is not recognized.
    #[error("unknown cast type '{0}'")]
    UnknownType(String),
    /// A scalar type was given bracketed arguments.
    #[error("cast type '{0}' does not take arguments")]
    UnexpectedArguments(String),
    /// Bracketed arguments are nested past [`MAX_DESCRIPTOR_NESTING`].
    #[error("cast nesting exceeds limit: depth {actual_depth} (max {max_depth})")]
    NestingTooDeep {
        /// Maximum allowed nesting depth.
        max_depth: usize,
        /// Depth reached when parsing stopped.
        actual_depth: usize,
    },
    /// The text is not a well-formed descriptor.
    #[error("invalid cast syntax at offset {offset}: {message}")]
    Syntax {
        /// Byte offset of the problem.
        offset: usize,
        /// What was expected.
        message: String,
    },
}

// ============================================================================
// SECTION: Parsing
// ============================================================================

/// Maximum bracket nesting accepted by the descriptor parser.
pub const MAX_DESCRIPTOR_NESTING: usize = 8;
/// Expected-argument label for list/set/tuple descriptors.
const ONE_ELEMENT: &str = "one element cast";
/// Expected-argument label for dict descriptors.
const ONE_PAIR: &str = "one key:value pair";

impl FromStr for CastDescriptor {
    type Err = DescriptorError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let mut parser = Parser {
            text,
            offset: 0,
            nesting: 0,
        };
        let descriptor = parser.descriptor()?;
        parser.skip_whitespace();
        if let Some(ch) = parser.peek() {
            return Err(parser.syntax(format!("unexpected '{ch}'")));
        }
        Ok(descriptor)
    }
}

/// Recursive-descent parser over descriptor text.
struct Parser<'a> {
    /// Full input text.
    text: &'a str,
    /// Current byte offset into `text`.
    offset: usize,
    /// Current bracket nesting depth.
    nesting: usize,
}

impl<'a> Parser<'a> {
    /// Returns the next character without consuming it.
    fn peek(&self) -> Option<char> {
        self.text[self.offset ..].chars().next()
    }

    /// Consumes one character.
    fn bump(&mut self) {
        if let Some(ch) = self.peek() {
            self.offset += ch.len_utf8();
        }
    }

    /// Consumes any whitespace.
    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    /// Consumes `expected` (after whitespace) when it is next.
    fn eat(&mut self, expected: char) -> bool {
        self.skip_whitespace();
        if self.peek() == Some(expected) {
            self.bump();
            return true;
        }
        false
    }

    /// Consumes `expected` or fails.
    fn expect(&mut self, expected: char) -> Result<(), DescriptorError> {
        if self.eat(expected) {
            return Ok(());
        }
        Err(self.syntax(format!("expected '{expected}'")))
    }

    /// Builds a syntax error at the current offset.
    fn syntax(&self, message: impl Into<String>) -> DescriptorError {
        DescriptorError::Syntax {
            offset: self.offset,
            message: message.into(),
        }
    }

    /// Reads a type name.
    fn ident(&mut self) -> Result<&'a str, DescriptorError> {
        self.skip_whitespace();
        let start = self.offset;
        while self.peek().is_some_and(|ch| ch.is_ascii_alphanumeric() || ch == '_') {
            self.bump();
        }
        if start == self.offset {
            return Err(self.syntax("expected a cast type name"));
        }
        let text = self.text;
        Ok(&text[start .. self.offset])
    }

    /// Parses one descriptor, with optional bracketed arguments.
    fn descriptor(&mut self) -> Result<CastDescriptor, DescriptorError> {
        let name = self.ident()?;
        if !self.eat('[') {
            return named_descriptor(name);
        }
        match name {
            "dict" => {
                let pairs = self.with_nesting(|parser| parser.arguments(Self::pair))?;
                let (key, value) = single(pairs, "dict", ONE_PAIR)?;
                Ok(CastDescriptor::dict_of(key, value))
            }
            _ => match named_descriptor(name)? {
                CastDescriptor::Collection(shape) => {
                    let elements =
                        self.with_nesting(|parser| parser.arguments(Self::descriptor))?;
                    let element = single(elements, shape.name(), ONE_ELEMENT)?;
                    Ok(CastDescriptor::sequence_of(shape, element))
                }
                _ => Err(DescriptorError::UnexpectedArguments(name.to_string())),
            },
        }
    }

    /// Runs a bracketed parser step while enforcing the nesting limit.
    fn with_nesting<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, DescriptorError>,
    ) -> Result<T, DescriptorError> {
        let next_depth = self.nesting + 1;
        if next_depth > MAX_DESCRIPTOR_NESTING {
            return Err(DescriptorError::NestingTooDeep {
                max_depth: MAX_DESCRIPTOR_NESTING,
                actual_depth: next_depth,
            });
        }
        self.nesting = next_depth;
        let result = f(self);
        self.nesting = self.nesting.saturating_sub(1);
        result
    }

    /// Parses a `key:value` descriptor pair.
    fn pair(&mut self) -> Result<(CastDescriptor, CastDescriptor), DescriptorError> {
        let key = self.descriptor()?;
        self.expect(':')?;
        let value = self.descriptor()?;
        Ok((key, value))
    }

    /// Parses comma-separated items up to the closing `]`.
    fn arguments<T>(
        &mut self,
        mut item: impl FnMut(&mut Self) -> Result<T, DescriptorError>,
    ) -> Result<Vec<T>, DescriptorError> {
        let mut items = Vec::new();
        if self.eat(']') {
            return Ok(items);
        }
        loop {
            items.push(item(self)?);
            if self.eat(',') {
                continue;
            }
            self.expect(']')?;
            return Ok(items);
        }
    }
}

/// Maps a bare type name to its descriptor.
fn named_descriptor(name: &str) -> Result<CastDescriptor, DescriptorError> {
    let descriptor = match name {
        "raw" => CastDescriptor::raw(),
        "bool" => CastDescriptor::bool(),
        "int" => CastDescriptor::int(),
        "float" => CastDescriptor::float(),
        "decimal" => CastDescriptor::decimal(),
        "str" => CastDescriptor::str(),
        "json" => CastDescriptor::json(),
        "url" => CastDescriptor::url(),
        "list" => CastDescriptor::list(),
        "set" => CastDescriptor::set(),
        "tuple" => CastDescriptor::tuple(),
        "dict" => CastDescriptor::dict(),
        other => return Err(DescriptorError::UnknownType(other.to_string())),
    };
    Ok(descriptor)
}

/// Returns the only item, or an arity error.
fn single<T>(
    mut items: Vec<T>,
    kind: &'static str,
    expected: &'static str,
) -> Result<T, DescriptorError> {
    let found = items.len();
    match items.pop() {
        Some(item) if found == 1 => Ok(item),
        _ => Err(DescriptorError::Arity {
            kind,
            expected,
            found,
        }),
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
