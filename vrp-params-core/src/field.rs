//! Declarative description of a single field.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::{Coercer, RawKind, SchemaNode};

/// Shape of the value a field holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Cardinality {
    /// A single scalar.
    Scalar,
    /// A nested object validated against a child schema.
    Object,
    /// A list of scalars.
    ArrayOfScalar,
    /// A list of objects, each validated against a child schema.
    ArrayOfObject,
    /// A list of lists of scalars.
    ArrayOfArray,
}

impl Cardinality {
    /// Whether the field descends into a child schema.
    #[must_use]
    pub const fn is_nested(self) -> bool {
        matches!(self, Self::Object | Self::ArrayOfObject)
    }
}

/// Restriction on the canonical value of a scalar.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AllowedValues {
    /// The value must equal one of the listed strings.
    OneOf(&'static [&'static str]),
    /// Inclusive integer range.
    IntRange {
        /// Lowest accepted value.
        min: i64,
        /// Highest accepted value.
        max: i64,
    },
    /// Inclusive float range.
    FloatRange {
        /// Lowest accepted value.
        min: f64,
        /// Highest accepted value.
        max: f64,
    },
}

impl AllowedValues {
    /// Whether `value` satisfies the restriction.
    ///
    /// Values of a kind the restriction does not speak about are rejected.
    #[must_use]
    pub fn permits(&self, value: &Value) -> bool {
        match self {
            Self::OneOf(options) => value
                .as_str()
                .is_some_and(|text| options.contains(&text)),
            Self::IntRange { min, max } => value
                .as_i64()
                .is_some_and(|number| (*min..=*max).contains(&number)),
            Self::FloatRange { min, max } => value
                .as_f64()
                .is_some_and(|number| (*min..=*max).contains(&number)),
        }
    }

    /// Human-readable rendering used in error messages.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::OneOf(options) => format!("one of {}", options.join(", ")),
            Self::IntRange { min, max } => format!("between {min} and {max}"),
            Self::FloatRange { min, max } => format!("between {min} and {max}"),
        }
    }
}

/// Declaration of one field within a [`SchemaNode`].
///
/// Specs are assembled with chained builder calls:
///
/// ```
/// use serde_json::json;
/// use vrp_params_core::{AllowedValues, FieldSpec, RawKind};
///
/// let priority = FieldSpec::optional("priority")
///     .kind(RawKind::Integer)
///     .allowed(AllowedValues::IntRange { min: 0, max: 8 });
/// assert!(!priority.is_required());
///
/// let visits = FieldSpec::optional("visits_number")
///     .kind(RawKind::Integer)
///     .default_value(json!(1));
/// assert_eq!(visits.default(), Some(&json!(1)));
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct FieldSpec {
    name: &'static str,
    raw_kinds: Vec<RawKind>,
    required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    default: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    allowed_values: Option<AllowedValues>,
    #[serde(skip_serializing_if = "Option::is_none")]
    coerce: Option<Coercer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    child_schema: Option<Arc<SchemaNode>>,
    cardinality: Cardinality,
    allow_blank: bool,
    hidden: bool,
}

impl FieldSpec {
    fn new(name: &'static str, required: bool) -> Self {
        Self {
            name,
            raw_kinds: Vec::new(),
            required,
            default: None,
            allowed_values: None,
            coerce: None,
            child_schema: None,
            cardinality: Cardinality::Scalar,
            allow_blank: true,
            hidden: false,
        }
    }

    /// Declare a field that must be present.
    #[must_use]
    pub fn required(name: &'static str) -> Self {
        Self::new(name, true)
    }

    /// Declare a field that may be absent.
    #[must_use]
    pub fn optional(name: &'static str) -> Self {
        Self::new(name, false)
    }

    /// Accept one more raw kind.
    #[must_use]
    pub fn kind(mut self, kind: RawKind) -> Self {
        if !self.raw_kinds.contains(&kind) {
            self.raw_kinds.push(kind);
        }
        self
    }

    /// Accept several raw kinds.
    #[must_use]
    pub fn kinds(self, kinds: &[RawKind]) -> Self {
        kinds.iter().fold(self, |spec, kind| spec.kind(*kind))
    }

    /// Value emitted when the field is absent.
    #[must_use]
    pub fn default_value(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    /// Restrict the canonical value.
    #[must_use]
    pub fn allowed(mut self, allowed: AllowedValues) -> Self {
        self.allowed_values = Some(allowed);
        self
    }

    /// Run a named coercer over the raw value.
    #[must_use]
    pub fn coerce(mut self, coercer: Coercer) -> Self {
        self.coerce = Some(coercer);
        self
    }

    /// Reject empty strings and collections.
    #[must_use]
    pub fn non_blank(mut self) -> Self {
        self.allow_blank = false;
        self
    }

    /// Keep the field out of published documentation.
    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Hold a nested object described by `child`.
    #[must_use]
    pub fn object(mut self, child: Arc<SchemaNode>) -> Self {
        self.cardinality = Cardinality::Object;
        self.child_schema = Some(child);
        self.kind(RawKind::Object)
    }

    /// Hold a list of objects described by `child`.
    #[must_use]
    pub fn array_of(mut self, child: Arc<SchemaNode>) -> Self {
        self.cardinality = Cardinality::ArrayOfObject;
        self.child_schema = Some(child);
        self.kind(RawKind::Object)
    }

    /// Hold a list of scalars of the given kind.
    #[must_use]
    pub fn array_of_scalar(mut self, kind: RawKind) -> Self {
        self.cardinality = Cardinality::ArrayOfScalar;
        self.kind(kind)
    }

    /// Hold a list of lists of scalars of the given kind.
    #[must_use]
    pub fn array_of_arrays(mut self, kind: RawKind) -> Self {
        self.cardinality = Cardinality::ArrayOfArray;
        self.kind(kind)
    }

    /// Field name, unique within its schema node.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Raw kinds accepted for the value, or for each element of a list.
    #[must_use]
    pub fn raw_kinds(&self) -> &[RawKind] {
        &self.raw_kinds
    }

    /// Whether absence is an error.
    #[must_use]
    pub const fn is_required(&self) -> bool {
        self.required
    }

    /// Default emitted for an absent optional field.
    #[must_use]
    pub const fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// Restriction on the canonical value.
    #[must_use]
    pub const fn allowed_values(&self) -> Option<&AllowedValues> {
        self.allowed_values.as_ref()
    }

    /// Named coercer applied to the raw value.
    #[must_use]
    pub const fn coercer(&self) -> Option<Coercer> {
        self.coerce
    }

    /// Schema of nested objects.
    #[must_use]
    pub const fn child_schema(&self) -> Option<&Arc<SchemaNode>> {
        self.child_schema.as_ref()
    }

    /// Shape of the value.
    #[must_use]
    pub const fn cardinality(&self) -> Cardinality {
        self.cardinality
    }

    /// Whether blank values are accepted when present.
    #[must_use]
    pub const fn allows_blank(&self) -> bool {
        self.allow_blank
    }

    /// Whether the field is left out of documentation.
    #[must_use]
    pub const fn is_hidden(&self) -> bool {
        self.hidden
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn kinds_are_deduplicated() {
        let spec = FieldSpec::optional("start")
            .kinds(&[RawKind::String, RawKind::Float])
            .kind(RawKind::String);
        assert_eq!(spec.raw_kinds(), &[RawKind::String, RawKind::Float]);
    }

    #[rstest]
    fn defaults_are_blank_tolerant_scalars() {
        let spec = FieldSpec::required("id");
        assert!(spec.is_required());
        assert!(spec.allows_blank());
        assert!(!spec.is_hidden());
        assert_eq!(spec.cardinality(), Cardinality::Scalar);
        assert!(spec.child_schema().is_none());
    }

    #[rstest]
    #[case(AllowedValues::IntRange { min: 0, max: 6 }, json!(6), true)]
    #[case(AllowedValues::IntRange { min: 0, max: 6 }, json!(9), false)]
    #[case(AllowedValues::FloatRange { min: -90.0, max: 90.0 }, json!(45.5), true)]
    #[case(AllowedValues::OneOf(&["time", "distance"]), json!("distance"), true)]
    #[case(AllowedValues::OneOf(&["time", "distance"]), json!("energy"), false)]
    #[case(AllowedValues::OneOf(&["time", "distance"]), json!(1), false)]
    fn allowed_values_check(
        #[case] allowed: AllowedValues,
        #[case] value: Value,
        #[case] expected: bool,
    ) {
        assert_eq!(allowed.permits(&value), expected);
    }

    #[rstest]
    fn ranges_describe_bounds() {
        let allowed = AllowedValues::IntRange { min: 0, max: 8 };
        assert_eq!(allowed.describe(), "between 0 and 8");
    }
}
