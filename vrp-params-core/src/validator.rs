//! Recursive validation and normalization of raw documents.
//!
//! The walk visits every declared field of every node, collecting errors
//! instead of stopping at the first one, so a single pass reports the whole
//! defect set. Nothing here depends on a particular schema.

use log::debug;
use serde_json::{Map, Value};

use crate::kind::{describe_kinds, truncate_to_i64};
use crate::{
    Cardinality, FieldPath, FieldSpec, RawKind, SchemaNode, ValidationError, ValidationErrorKind,
    ValidationErrors, is_blank,
};

/// Normalized output paired with the errors found while producing it.
///
/// The value is only meaningful when `errors` is empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Validation {
    /// Normalized tree. Fields that failed are left out.
    pub value: Value,
    /// Defects in discovery order.
    pub errors: Vec<ValidationError>,
}

impl Validation {
    /// Whether no defect was found.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Collapse into the normalized value or the error list.
    ///
    /// # Errors
    /// Returns [`ValidationErrors`] when at least one defect was found.
    pub fn into_result(self) -> Result<Value, ValidationErrors> {
        if self.errors.is_empty() {
            Ok(self.value)
        } else {
            Err(ValidationErrors::new(self.errors))
        }
    }
}

/// Validate `document` against `schema` from the document root.
///
/// # Errors
/// Returns every defect found when the document does not conform.
///
/// # Examples
/// ```
/// use serde_json::json;
/// use vrp_params_core::{Coercer, FieldSpec, RawKind, SchemaNode, validate};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let activity = SchemaNode::builder("activity")
///     .field(FieldSpec::required("point_id").kind(RawKind::String).non_blank())
///     .field(
///         FieldSpec::optional("duration")
///             .kinds(&[RawKind::String, RawKind::Float, RawKind::Integer])
///             .coerce(Coercer::Duration),
///     )
///     .build()?;
///
/// let normalized = validate(&json!({"point_id": "p1", "duration": "00:10"}), &activity)?;
/// assert_eq!(normalized, json!({"point_id": "p1", "duration": 600}));
///
/// let errors = validate(&json!({"duration": "soon"}), &activity).unwrap_err();
/// assert_eq!(errors.len(), 2);
/// # Ok(())
/// # }
/// ```
pub fn validate(document: &Value, schema: &SchemaNode) -> Result<Value, ValidationErrors> {
    debug!("validating document against schema {}", schema.name());
    let outcome = validate_at(document, schema, FieldPath::root());
    debug!(
        "validation against schema {} finished with {} error(s)",
        schema.name(),
        outcome.errors.len()
    );
    outcome.into_result()
}

/// Validate a raw value against `node`, reporting errors relative to `path`.
///
/// Use this to validate a fragment that sits somewhere inside a larger
/// document.
#[must_use]
pub fn validate_at(raw: &Value, node: &SchemaNode, path: FieldPath) -> Validation {
    let mut context = ValidationContext {
        path,
        errors: Vec::new(),
    };
    let value = context.node(raw, node);
    Validation {
        value,
        errors: context.errors,
    }
}

struct ValidationContext {
    path: FieldPath,
    errors: Vec<ValidationError>,
}

impl ValidationContext {
    fn report(&mut self, kind: ValidationErrorKind, message: impl Into<String>) {
        self.errors
            .push(ValidationError::new(self.path.clone(), kind, message));
    }

    fn wrong_type(&mut self, expected: &str, found: &Value) {
        self.report(
            ValidationErrorKind::WrongType,
            format!("expected {expected}, found {}", RawKind::of(found)),
        );
    }

    fn node(&mut self, raw: &Value, node: &SchemaNode) -> Value {
        let Value::Object(map) = raw else {
            self.wrong_type("object", raw);
            return Value::Null;
        };

        let mut output = Map::new();
        let mut present: Vec<&'static str> = Vec::new();
        for spec in node.fields() {
            let name = spec.name();
            self.path.push(name);
            let errors_before = self.errors.len();
            let value = self.field(map.get(name), spec, &mut present);
            if let Some(value) = value.filter(|_| self.errors.len() == errors_before) {
                output.insert(name.to_owned(), value);
            }
            self.path.pop();
        }

        for rule in node.constraints() {
            if !rule.is_satisfied_by(|name| present.iter().any(|field| *field == name)) {
                self.report(
                    ValidationErrorKind::ConstraintViolated,
                    rule.violation_message(),
                );
            }
        }
        Value::Object(output)
    }

    fn field(
        &mut self,
        raw: Option<&Value>,
        spec: &FieldSpec,
        present: &mut Vec<&'static str>,
    ) -> Option<Value> {
        match raw {
            Some(Value::Null) => match spec.coercer().filter(|coercer| coercer.fills_absent()) {
                Some(coercer) => match coercer.apply(None) {
                    Ok(Some(value)) => {
                        present.push(spec.name());
                        Some(value)
                    }
                    Ok(None) => self.absent(spec),
                    Err(err) => {
                        self.report(ValidationErrorKind::CoercionFailed, err.to_string());
                        None
                    }
                },
                None => self.absent(spec),
            },
            Some(value) => {
                // Presence follows the supplied key, even if its value fails.
                present.push(spec.name());
                self.present(value, spec)
            }
            None => self.absent(spec),
        }
    }

    fn absent(&mut self, spec: &FieldSpec) -> Option<Value> {
        if spec.is_required() {
            self.report(ValidationErrorKind::MissingRequired, "is missing");
            return None;
        }
        spec.default().cloned()
    }

    fn present(&mut self, value: &Value, spec: &FieldSpec) -> Option<Value> {
        match spec.cardinality() {
            Cardinality::Scalar => {
                if !accepts(spec.raw_kinds(), value) {
                    self.wrong_type(&describe_kinds(spec.raw_kinds()), value);
                    return None;
                }
                self.reject_blank(value, spec)?;
                self.scalar(value, spec)
            }
            Cardinality::Object => {
                let child = spec.child_schema()?;
                if !value.is_object() {
                    self.wrong_type("object", value);
                    return None;
                }
                self.reject_blank(value, spec)?;
                Some(self.node(value, child))
            }
            Cardinality::ArrayOfObject => {
                let child = spec.child_schema()?;
                let items = self.array(value, spec, "array of objects")?;
                Some(self.each(items, |context, item| Some(context.node(item, child))))
            }
            Cardinality::ArrayOfScalar => match spec.coercer() {
                Some(coercer) if coercer.consumes_list() => {
                    if !value.is_array() && !accepts(spec.raw_kinds(), value) {
                        let expected = format!("array of {}", describe_kinds(spec.raw_kinds()));
                        self.wrong_type(&expected, value);
                        return None;
                    }
                    self.reject_blank(value, spec)?;
                    self.scalar(value, spec)
                }
                _ => {
                    let expected = format!("array of {}", describe_kinds(spec.raw_kinds()));
                    let items = self.array(value, spec, &expected)?;
                    Some(self.each(items, |context, item| context.element(item, spec)))
                }
            },
            Cardinality::ArrayOfArray => {
                let expected = format!("array of arrays of {}", describe_kinds(spec.raw_kinds()));
                let items = self.array(value, spec, &expected)?;
                Some(self.each(items, |context, inner| {
                    let Value::Array(elements) = inner else {
                        let expected = format!("array of {}", describe_kinds(spec.raw_kinds()));
                        context.wrong_type(&expected, inner);
                        return None;
                    };
                    Some(context.each(elements, |context, item| context.element(item, spec)))
                }))
            }
        }
    }

    fn array<'v>(
        &mut self,
        value: &'v Value,
        spec: &FieldSpec,
        expected: &str,
    ) -> Option<&'v [Value]> {
        let Value::Array(items) = value else {
            self.wrong_type(expected, value);
            return None;
        };
        self.reject_blank(value, spec)?;
        Some(items.as_slice())
    }

    fn each(
        &mut self,
        items: &[Value],
        mut visit: impl FnMut(&mut Self, &Value) -> Option<Value>,
    ) -> Value {
        let mut output = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            self.path.push(index);
            output.push(visit(self, item).unwrap_or(Value::Null));
            self.path.pop();
        }
        Value::Array(output)
    }

    fn element(&mut self, item: &Value, spec: &FieldSpec) -> Option<Value> {
        if !accepts(spec.raw_kinds(), item) {
            self.wrong_type(&describe_kinds(spec.raw_kinds()), item);
            return None;
        }
        self.scalar(item, spec)
    }

    fn reject_blank(&mut self, value: &Value, spec: &FieldSpec) -> Option<()> {
        if !spec.allows_blank() && is_blank(value) {
            self.report(ValidationErrorKind::ValueOutOfRange, "must not be blank");
            return None;
        }
        Some(())
    }

    fn scalar(&mut self, value: &Value, spec: &FieldSpec) -> Option<Value> {
        let canonical = match spec.coercer() {
            Some(coercer) => match coercer.apply(Some(value)) {
                Ok(Some(coerced)) => coerced,
                Ok(None) => {
                    debug!(
                        "{}: {value} is not usable, falling back to the default",
                        self.path
                    );
                    return spec.default().cloned();
                }
                Err(err) => {
                    self.report(ValidationErrorKind::CoercionFailed, err.to_string());
                    return None;
                }
            },
            None => match canonical_scalar(value, spec.raw_kinds()) {
                Some(canonical) => canonical,
                None => {
                    self.report(
                        ValidationErrorKind::ValueOutOfRange,
                        format!("must fit in a 64-bit integer, found {value}"),
                    );
                    return None;
                }
            },
        };
        if let Some(allowed) = spec.allowed_values() {
            if !allowed.permits(&canonical) {
                self.report(
                    ValidationErrorKind::ValueOutOfRange,
                    format!("must be {}, found {canonical}", allowed.describe()),
                );
                return None;
            }
        }
        Some(canonical)
    }
}

fn accepts(kinds: &[RawKind], value: &Value) -> bool {
    kinds.iter().any(|kind| kind.accepts(value))
}

/// Bring a number to the representation its declared kinds call for.
///
/// Returns `None` when an integer-only field holds a float outside the
/// `i64` range.
fn canonical_scalar(value: &Value, kinds: &[RawKind]) -> Option<Value> {
    let Value::Number(number) = value else {
        return Some(value.clone());
    };
    let integer = kinds.contains(&RawKind::Integer);
    let float = kinds.contains(&RawKind::Float);
    if integer && !float {
        if let Some(whole) = number.as_f64().filter(|_| number.is_f64()) {
            return truncate_to_i64(whole).map(Value::from);
        }
    } else if float && !integer {
        if let Some(real) = number.as_f64() {
            return Some(Value::from(real));
        }
    }
    Some(value.clone())
}
