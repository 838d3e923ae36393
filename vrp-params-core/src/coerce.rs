//! Scalar coercers turning raw wire values into canonical values.
//!
//! Every coercer is a plain function that can be exercised on its own. Field
//! declarations refer to them through the [`Coercer`] tag so schemas stay
//! inspectable data rather than closures.
//!
//! # Examples
//! ```
//! use serde_json::json;
//! use vrp_params_core::coerce::parse_duration;
//!
//! assert_eq!(parse_duration(Some(&json!("01:02:03")), true, true), Ok(Some(3723)));
//! assert_eq!(parse_duration(Some(&json!("02:30")), true, true), Ok(Some(9000)));
//! assert_eq!(parse_duration(Some(&json!("45.7")), true, true), Ok(Some(45)));
//! assert_eq!(parse_duration(None, false, true), Ok(None));
//! ```

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::RawKind;
use crate::kind::truncate_to_i64;

const SECONDS_PER_HOUR: i64 = 3600;
const SECONDS_PER_MINUTE: i64 = 60;

/// Errors raised by the scalar coercers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoercionError {
    /// The value matches none of the accepted time notations.
    #[error("invalid time value {raw}")]
    InvalidTime {
        /// Rendering of the rejected raw value.
        raw: String,
    },
    /// The time value resolved to a negative number of seconds.
    #[error("invalid time value: {seconds} seconds is negative")]
    NegativeDuration {
        /// Resolved number of seconds.
        seconds: i64,
    },
    /// The time value resolved to zero where zero is not permitted.
    #[error("invalid time value: zero is not allowed")]
    ZeroDuration,
    /// A list coercer received something other than a list.
    #[error("expected a list of values, found {found}")]
    NotAList {
        /// Kind of the rejected value.
        found: RawKind,
    },
    /// A list element is outside the allowed set.
    #[error("unknown value {element} at position {index}, expected one of {allowed}")]
    UnknownElement {
        /// Zero-based position of the element.
        index: usize,
        /// Rendering of the rejected element.
        element: String,
        /// Comma-separated allowed values.
        allowed: String,
    },
    /// A symbol coercer received something other than a token.
    #[error("expected a symbol, found {found}")]
    NotAToken {
        /// Kind of the rejected value.
        found: RawKind,
    },
    /// The token is not one of the known tags.
    #[error("unknown symbol {token:?}, expected one of {allowed}")]
    UnknownSymbol {
        /// The rejected token.
        token: String,
        /// Comma-separated allowed values.
        allowed: String,
    },
}

/// Named coercer referenced from a field declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Coercer {
    /// Time value in seconds; absent values resolve to zero.
    Duration,
    /// Time value in seconds; absent values stay absent.
    OptionalDuration,
    /// Strictly positive count; anything else defers to the field default.
    PositiveCount,
    /// Token from a closed set of tags, or any token when the set is empty.
    Symbol(&'static [&'static str]),
    /// List whose every element belongs to the given set.
    EnumList(&'static [&'static str]),
}

impl Coercer {
    /// Apply the coercer to a raw value, `None` meaning the value is absent.
    ///
    /// `Ok(None)` means no value should be emitted by the coercer itself;
    /// the caller then falls back to the field default, if any.
    ///
    /// # Errors
    /// Returns [`CoercionError`] when the raw value is malformed.
    pub fn apply(self, raw: Option<&Value>) -> Result<Option<Value>, CoercionError> {
        match self {
            Self::Duration => Ok(parse_duration(raw, true, true)?.map(Value::from)),
            Self::OptionalDuration => Ok(parse_duration(raw, false, true)?.map(Value::from)),
            Self::PositiveCount => Ok(raw.and_then(parse_positive_count).map(Value::from)),
            Self::Symbol(allowed) => raw
                .map(|value| parse_symbol(value, allowed).map(Value::String))
                .transpose(),
            Self::EnumList(allowed) => raw
                .map(|value| {
                    parse_enum_list(value, allowed)
                        .map(|items| Value::Array(items.into_iter().map(Value::String).collect()))
                })
                .transpose(),
        }
    }

    /// Whether the coercer takes a whole list rather than one element.
    #[must_use]
    pub const fn consumes_list(self) -> bool {
        matches!(self, Self::EnumList(_))
    }

    /// Whether the coercer produces a value for an explicit `null`.
    #[must_use]
    pub const fn fills_absent(self) -> bool {
        matches!(self, Self::Duration)
    }
}

/// Parse a time value into whole seconds.
///
/// Accepted notations are `H:MM:SS`, `H:MM`, a decimal string such as
/// `"45.7"` and plain numbers. Fractions are truncated. An absent value
/// resolves to `0` when `mandatory`, otherwise it stays absent.
///
/// # Errors
/// Returns [`CoercionError::InvalidTime`] for unrecognised input,
/// [`CoercionError::NegativeDuration`] for negative results and
/// [`CoercionError::ZeroDuration`] for zero when `allow_zero` is false.
pub fn parse_duration(
    raw: Option<&Value>,
    mandatory: bool,
    allow_zero: bool,
) -> Result<Option<i64>, CoercionError> {
    let seconds = match raw {
        Some(value) => Some(duration_seconds(value)?),
        None => mandatory.then_some(0),
    };
    match seconds {
        Some(value) if value < 0 => Err(CoercionError::NegativeDuration { seconds: value }),
        Some(0) if !allow_zero => Err(CoercionError::ZeroDuration),
        other => Ok(other),
    }
}

fn duration_seconds(value: &Value) -> Result<i64, CoercionError> {
    let invalid = || CoercionError::InvalidTime {
        raw: value.to_string(),
    };
    match value {
        Value::String(text) => {
            let text = text.trim();
            clock_seconds(text)
                .or_else(|| decimal_seconds(text))
                .ok_or_else(invalid)
        }
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().and_then(truncate_to_i64))
            .ok_or_else(invalid),
        _ => Err(invalid()),
    }
}

/// `H:MM:SS` or `H:MM`, each group made only of ASCII digits.
fn clock_seconds(text: &str) -> Option<i64> {
    let groups: Vec<&str> = text.split(':').collect();
    let (hours, minutes, seconds) = match groups.as_slice() {
        [hours, minutes, seconds] => (*hours, *minutes, Some(*seconds)),
        [hours, minutes] => (*hours, *minutes, None),
        _ => return None,
    };
    let total = digits(hours)?
        .checked_mul(SECONDS_PER_HOUR)?
        .checked_add(digits(minutes)?.checked_mul(SECONDS_PER_MINUTE)?)?;
    match seconds {
        Some(group) => total.checked_add(digits(group)?),
        None => Some(total),
    }
}

/// `digits[.digits]`, truncated to the integer part.
fn decimal_seconds(text: &str) -> Option<i64> {
    let (whole, fraction) = text.split_once('.').unwrap_or((text, ""));
    if !fraction.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    digits(whole)
}

fn digits(group: &str) -> Option<i64> {
    if group.is_empty() || !group.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    group.parse().ok()
}

/// Convert a raw value into a strictly positive count.
///
/// Numbers are truncated and strings contribute their leading integer, so
/// `"5"` and `"5 visits"` both read as `5`. Returns `None` when the result is
/// zero, negative or unreadable, in which case the caller applies its
/// default.
///
/// # Examples
/// ```
/// use serde_json::json;
/// use vrp_params_core::coerce::parse_positive_count;
///
/// assert_eq!(parse_positive_count(&json!(5)), Some(5));
/// assert_eq!(parse_positive_count(&json!(0)), None);
/// assert_eq!(parse_positive_count(&json!("many")), None);
/// ```
#[must_use]
pub fn parse_positive_count(raw: &Value) -> Option<i64> {
    let count = match raw {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().and_then(truncate_to_i64)),
        Value::String(text) => leading_integer(text.trim()),
        _ => None,
    };
    count.filter(|value| *value > 0)
}

fn leading_integer(text: &str) -> Option<i64> {
    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    let sign_len = text.len() - unsigned.len();
    let digit_len = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    if digit_len == 0 {
        return None;
    }
    text.get(..sign_len + digit_len)?.parse().ok()
}

/// Map a token onto one of the `allowed` tags.
///
/// An empty `allowed` set accepts any non-blank token.
///
/// # Errors
/// Returns [`CoercionError::NotAToken`] for non-string input and
/// [`CoercionError::UnknownSymbol`] when the token is not allowed.
pub fn parse_symbol(raw: &Value, allowed: &[&str]) -> Result<String, CoercionError> {
    let Value::String(text) = raw else {
        return Err(CoercionError::NotAToken {
            found: RawKind::of(raw),
        });
    };
    let token = text.trim();
    if allowed.is_empty() && !token.is_empty() {
        return Ok(token.to_owned());
    }
    allowed
        .iter()
        .find(|tag| **tag == token)
        .map(|tag| (*tag).to_owned())
        .ok_or_else(|| CoercionError::UnknownSymbol {
            token: token.to_owned(),
            allowed: allowed.join(", "),
        })
}

/// Check every element of a list against `allowed`.
///
/// A single string is read as a one-element list. Element order is kept.
///
/// # Errors
/// Returns [`CoercionError::UnknownElement`] for the first element outside
/// the set and [`CoercionError::NotAList`] for any other input shape.
pub fn parse_enum_list(raw: &Value, allowed: &[&str]) -> Result<Vec<String>, CoercionError> {
    let items = match raw {
        Value::String(_) => std::slice::from_ref(raw),
        Value::Array(items) => items.as_slice(),
        _ => {
            return Err(CoercionError::NotAList {
                found: RawKind::of(raw),
            });
        }
    };
    items
        .iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::String(text) if allowed.contains(&text.as_str()) => Ok(text.clone()),
            _ => Err(CoercionError::UnknownElement {
                index,
                element: item.to_string(),
                allowed: allowed.join(", "),
            }),
        })
        .collect()
}
