// crates/envcast/src/value.rs
// ============================================================================
// Module: Dynamic Values
// Description: Dynamically typed values read from sources and produced by casts.
// Purpose: Give raw and cast values one totally ordered, serializable model.
// Dependencies: bigdecimal, serde, serde_json, url
// ============================================================================

//! ## Overview
//! [`Value`] is the currency of the crate: sources hand values in (usually
//! strings, sometimes already typed) and the casting engine hands typed values
//! back. Values are totally ordered so that sets and map keys work for every
//! variant, including floats (IEEE total order) and JSON documents (ordered by
//! their rendered text).
//!
//! Invariants:
//! - Equality agrees with [`Ord`]: two values are equal iff `cmp` is `Equal`.
//! - Values of different variants never compare equal; `Int(1)` and
//!   `Float(1.0)` are distinct.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::fmt;

use bigdecimal::BigDecimal;
use serde::Serialize;
use serde::Serializer;
use serde::ser::SerializeMap;
use url::Url;

// ============================================================================
// SECTION: Value Type
// ============================================================================

/// A raw or cast environment value.
#[derive(Debug, Clone)]
pub enum Value {
    /// Explicit null (e.g. a `None` default).
    Null,
    /// Boolean value.
    Bool(bool),
    /// Signed 64-bit integer.
    Int(i64),
    /// Double precision float.
    Float(f64),
    /// Arbitrary precision decimal.
    Decimal(BigDecimal),
    /// UTF-8 string; the usual form of values read from a source.
    Str(String),
    /// Ordered list.
    List(Vec<Self>),
    /// Fixed tuple.
    Tuple(Vec<Self>),
    /// Unordered set of unique values.
    Set(BTreeSet<Self>),
    /// Key/value mapping.
    Map(BTreeMap<Self, Self>),
    /// Parsed JSON document.
    Json(serde_json::Value),
    /// Parsed URL.
    Url(Url),
}

impl Value {
    /// Returns the short type name used in diagnostics.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Decimal(_) => "decimal",
            Self::Str(_) => "str",
            Self::List(_) => "list",
            Self::Tuple(_) => "tuple",
            Self::Set(_) => "set",
            Self::Map(_) => "dict",
            Self::Json(_) => "json",
            Self::Url(_) => "url",
        }
    }

    /// Returns true for [`Value::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the boolean when this is a [`Value::Bool`].
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the integer when this is a [`Value::Int`].
    #[must_use]
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the float when this is a [`Value::Float`].
    #[must_use]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the decimal when this is a [`Value::Decimal`].
    #[must_use]
    pub const fn as_decimal(&self) -> Option<&BigDecimal> {
        match self {
            Self::Decimal(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the string slice when this is a [`Value::Str`].
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the elements of a [`Value::List`] or [`Value::Tuple`].
    #[must_use]
    pub fn as_list(&self) -> Option<&[Self]> {
        match self {
            Self::List(items) | Self::Tuple(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the members of a [`Value::Set`].
    #[must_use]
    pub const fn as_set(&self) -> Option<&BTreeSet<Self>> {
        match self {
            Self::Set(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the entries of a [`Value::Map`].
    #[must_use]
    pub const fn as_map(&self) -> Option<&BTreeMap<Self, Self>> {
        match self {
            Self::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// Returns the document of a [`Value::Json`].
    #[must_use]
    pub const fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Json(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the URL of a [`Value::Url`].
    #[must_use]
    pub const fn as_url(&self) -> Option<&Url> {
        match self {
            Self::Url(value) => Some(value),
            _ => None,
        }
    }

    /// Variant rank used to order values of different variants.
    const fn rank(&self) -> u8 {
        match self {
            Self::Null => 0,
            Self::Bool(_) => 1,
            Self::Int(_) => 2,
            Self::Float(_) => 3,
            Self::Decimal(_) => 4,
            Self::Str(_) => 5,
            Self::List(_) => 6,
            Self::Tuple(_) => 7,
            Self::Set(_) => 8,
            Self::Map(_) => 9,
            Self::Json(_) => 10,
            Self::Url(_) => 11,
        }
    }
}

// ============================================================================
// SECTION: Ordering
// ============================================================================

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Null, Self::Null) => Ordering::Equal,
            (Self::Bool(left), Self::Bool(right)) => left.cmp(right),
            (Self::Int(left), Self::Int(right)) => left.cmp(right),
            (Self::Float(left), Self::Float(right)) => left.total_cmp(right),
            (Self::Decimal(left), Self::Decimal(right)) => left.cmp(right),
            (Self::Str(left), Self::Str(right)) => left.cmp(right),
            (Self::List(left), Self::List(right)) | (Self::Tuple(left), Self::Tuple(right)) => {
                left.cmp(right)
            }
            (Self::Set(left), Self::Set(right)) => left.cmp(right),
            (Self::Map(left), Self::Map(right)) => left.cmp(right),
            (Self::Json(left), Self::Json(right)) => left.to_string().cmp(&right.to_string()),
            (Self::Url(left), Self::Url(right)) => left.cmp(right),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Value {}

// ============================================================================
// SECTION: Display
// ============================================================================

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Decimal(value) => write!(f, "{value}"),
            Self::Str(value) => f.write_str(value),
            Self::List(items) => write_joined(f, "[", items.iter(), "]"),
            Self::Tuple(items) => write_joined(f, "(", items.iter(), ")"),
            Self::Set(items) => write_joined(f, "{", items.iter(), "}"),
            Self::Map(entries) => {
                f.write_str("{")?;
                for (index, (key, value)) in entries.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                f.write_str("}")
            }
            Self::Json(value) => write!(f, "{value}"),
            Self::Url(value) => f.write_str(value.as_str()),
        }
    }
}

/// Writes `items` separated by `", "` between `open` and `close`.
fn write_joined<'a>(
    f: &mut fmt::Formatter<'_>,
    open: &str,
    items: impl Iterator<Item = &'a Value>,
    close: &str,
) -> fmt::Result {
    f.write_str(open)?;
    for (index, item) in items.enumerate() {
        if index > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    f.write_str(close)
}

// ============================================================================
// SECTION: Serialization
// ============================================================================

/// Serializes into JSON-compatible shapes. Decimals and URLs become strings;
/// map keys are rendered with [`fmt::Display`].
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(value) => serializer.serialize_bool(*value),
            Self::Int(value) => serializer.serialize_i64(*value),
            Self::Float(value) => serializer.serialize_f64(*value),
            Self::Decimal(value) => serializer.collect_str(value),
            Self::Str(value) => serializer.serialize_str(value),
            Self::List(items) | Self::Tuple(items) => serializer.collect_seq(items),
            Self::Set(items) => serializer.collect_seq(items),
            Self::Map(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(&key.to_string(), value)?;
                }
                map.end()
            }
            Self::Json(value) => value.serialize(serializer),
            Self::Url(value) => serializer.serialize_str(value.as_str()),
        }
    }
}

// ============================================================================
// SECTION: Conversions
// ============================================================================

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<BigDecimal> for Value {
    fn from(value: BigDecimal) -> Self {
        Self::Decimal(value)
    }
}

impl From<Url> for Value {
    fn from(value: Url) -> Self {
        Self::Url(value)
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        Self::Json(value)
    }
}

impl From<Vec<Self>> for Value {
    fn from(items: Vec<Self>) -> Self {
        Self::List(items)
    }
}

impl From<BTreeSet<Self>> for Value {
    fn from(items: BTreeSet<Self>) -> Self {
        Self::Set(items)
    }
}

impl From<BTreeMap<Self, Self>> for Value {
    fn from(entries: BTreeMap<Self, Self>) -> Self {
        Self::Map(entries)
    }
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

    use std::collections::BTreeMap;
    use std::collections::BTreeSet;
    use std::str::FromStr;

    use bigdecimal::BigDecimal;
    use serde_json::json;

    use super::Value;

    #[test]
    fn distinct_variants_never_compare_equal() {
        assert_ne!(Value::Int(1), Value::Float(1.0));
        assert_ne!(Value::Str("1".to_string()), Value::Int(1));
        assert_ne!(Value::List(vec![]), Value::Tuple(vec![]));
        assert!(Value::Null < Value::Bool(false));
    }

    #[test]
    fn floats_are_totally_ordered() {
        let mut set = BTreeSet::new();
        set.insert(Value::Float(f64::NAN));
        set.insert(Value::Float(f64::NAN));
        set.insert(Value::Float(1.5));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn decimals_compare_numerically() {
        let one = BigDecimal::from_str("1").expect("decimal");
        let one_point_zero = BigDecimal::from_str("1.0").expect("decimal");
        assert_eq!(Value::Decimal(one), Value::Decimal(one_point_zero));
    }

    #[test]
    fn display_renders_composites() {
        let list = Value::List(vec![Value::Int(1), Value::from("a")]);
        assert_eq!(list.to_string(), "[1, a]");
        let tuple = Value::Tuple(vec![Value::Int(1)]);
        assert_eq!(tuple.to_string(), "(1)");
        let map = Value::Map(BTreeMap::from([(Value::from("x"), Value::Int(1))]));
        assert_eq!(map.to_string(), "{x: 1}");
    }

    #[test]
    fn serializes_to_json_shapes() {
        let map = Value::Map(BTreeMap::from([
            (Value::Int(2), Value::Decimal(BigDecimal::from_str("1.50").expect("decimal"))),
            (Value::from("b"), Value::Set(BTreeSet::from([Value::Bool(true)]))),
        ]));
        let rendered = serde_json::to_value(&map).expect("serialize");
        assert_eq!(rendered, json!({"2": "1.50", "b": [true]}));
    }

    #[test]
    fn accessors_match_variants() {
        assert_eq!(Value::Bool(true).as_bool(), Some(true));
        assert_eq!(Value::Int(7).as_i64(), Some(7));
        assert_eq!(Value::from("s").as_str(), Some("s"));
        assert_eq!(Value::Int(7).as_str(), None);
        assert_eq!(Value::Tuple(vec![Value::Null]).as_list().map(<[Value]>::len), Some(1));
        assert_eq!(Value::Null.type_name(), "null");
        assert_eq!(Value::Map(BTreeMap::new()).type_name(), "dict");
    }
}
