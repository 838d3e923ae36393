//! Primitive kinds a raw document value can take.
//!
//! Field declarations list the kinds they accept. The validator classifies
//! each incoming [`Value`] and checks it against that list before any
//! coercion runs.
//!
//! # Examples
//! ```
//! use serde_json::json;
//! use vrp_params_core::RawKind;
//!
//! assert!(RawKind::Float.accepts(&json!(3)));
//! assert!(!RawKind::Integer.accepts(&json!(3.5)));
//! assert_eq!(RawKind::of(&json!("depot")), RawKind::String);
//! ```

use serde::Serialize;
use serde_json::Value;

/// A kind of raw value accepted by a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RawKind {
    /// Free text.
    String,
    /// Whole number, including floats without a fractional part.
    Integer,
    /// Any number.
    Float,
    /// `true` or `false`.
    Boolean,
    /// Textual token drawn from a (possibly open) set of tags.
    Symbol,
    /// Nested mapping.
    Object,
    /// Ordered sequence.
    Array,
    /// Explicit `null`.
    Null,
}

impl RawKind {
    /// Return the kind as a lowercase `&str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Boolean => "boolean",
            Self::Symbol => "symbol",
            Self::Object => "object",
            Self::Array => "array",
            Self::Null => "null",
        }
    }

    /// Classify a raw value by its most specific kind.
    #[must_use]
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Boolean,
            Value::Number(number) if number.is_f64() => Self::Float,
            Value::Number(_) => Self::Integer,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }

    /// Whether `value` satisfies this kind.
    ///
    /// Strings satisfy both [`RawKind::String`] and [`RawKind::Symbol`].
    /// Integers satisfy [`RawKind::Float`], and floats with no fractional
    /// part satisfy [`RawKind::Integer`].
    #[must_use]
    pub fn accepts(self, value: &Value) -> bool {
        match (self, value) {
            (Self::String | Self::Symbol, Value::String(_))
            | (Self::Float, Value::Number(_))
            | (Self::Boolean, Value::Bool(_))
            | (Self::Object, Value::Object(_))
            | (Self::Array, Value::Array(_))
            | (Self::Null, Value::Null) => true,
            (Self::Integer, Value::Number(number)) => {
                number.is_i64() || number.is_u64() || number.as_f64().is_some_and(is_integral)
            }
            _ => false,
        }
    }
}

impl std::fmt::Display for RawKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a present value counts as blank.
///
/// Blank means an empty or whitespace-only string, an empty array or an
/// empty object.
#[must_use]
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::String(text) => text.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Null => true,
        Value::Bool(_) | Value::Number(_) => false,
    }
}

pub(crate) fn is_integral(value: f64) -> bool {
    value.is_finite() && value.fract() == 0.0
}

/// `i64::MIN` and `i64::MAX + 1`, both exact in `f64`.
const I64_LOWER: f64 = -9_223_372_036_854_775_808.0;
const I64_UPPER: f64 = 9_223_372_036_854_775_808.0;

/// Truncate toward zero, or `None` when the result does not fit in an `i64`.
#[expect(
    clippy::cast_possible_truncation,
    reason = "the range is checked before casting"
)]
pub(crate) fn truncate_to_i64(value: f64) -> Option<i64> {
    let whole = value.trunc();
    (I64_LOWER..I64_UPPER)
        .contains(&whole)
        .then(|| whole as i64)
}

/// Render a list of kinds as `string, integer or float`.
pub(crate) fn describe_kinds(kinds: &[RawKind]) -> String {
    match kinds {
        [] => String::from("nothing"),
        [only] => only.as_str().to_owned(),
        [init @ .., last] => {
            let head: Vec<&str> = init.iter().map(|kind| kind.as_str()).collect();
            format!("{} or {}", head.join(", "), last.as_str())
        }
    }
}
