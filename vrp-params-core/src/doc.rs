//! Public documentation of a schema tree.
//!
//! [`describe`] flattens a node and its descendants into one entry per
//! field. Hidden fields, and everything below them, are left out: they are
//! still validated but are not part of the published request format.

use serde::Serialize;
use serde_json::Value;

use crate::{AllowedValues, Cardinality, Coercer, FieldSpec, RawKind, SchemaNode};

/// Documentation entry for one published field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDoc {
    /// Dotted location such as `vrp.vehicles[].capacities[].limit`.
    pub path: String,
    /// Accepted raw kinds.
    pub kinds: Vec<RawKind>,
    /// Shape of the value.
    pub cardinality: Cardinality,
    /// Whether absence is an error.
    pub required: bool,
    /// Default emitted when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Restriction on the canonical value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed: Option<AllowedValues>,
    /// Coercer applied to the raw value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coercer: Option<Coercer>,
    /// Whether blank values are accepted.
    pub allow_blank: bool,
}

impl FieldDoc {
    fn new(path: String, spec: &FieldSpec) -> Self {
        Self {
            path,
            kinds: spec.raw_kinds().to_vec(),
            cardinality: spec.cardinality(),
            required: spec.is_required(),
            default: spec.default().cloned(),
            allowed: spec.allowed_values().cloned(),
            coercer: spec.coercer(),
            allow_blank: spec.allows_blank(),
        }
    }
}

/// List the published fields of `node` and its descendants, depth first.
///
/// # Examples
/// ```
/// use vrp_params_core::{FieldSpec, RawKind, SchemaNode, describe};
///
/// # fn main() -> Result<(), vrp_params_core::SchemaError> {
/// let location = SchemaNode::builder("location")
///     .field(FieldSpec::required("lat").kind(RawKind::Float))
///     .build()?;
/// let point = SchemaNode::builder("point")
///     .field(FieldSpec::required("id").kind(RawKind::String))
///     .field(FieldSpec::optional("internal").kind(RawKind::Integer).hidden())
///     .field(FieldSpec::optional("location").object(location))
///     .build()?;
///
/// let paths: Vec<String> = describe(&point).into_iter().map(|doc| doc.path).collect();
/// assert_eq!(paths, ["id", "location", "location.lat"]);
/// # Ok(())
/// # }
/// ```
#[must_use]
pub fn describe(node: &SchemaNode) -> Vec<FieldDoc> {
    let mut docs = Vec::new();
    collect(node, "", &mut docs);
    docs
}

fn collect(node: &SchemaNode, prefix: &str, docs: &mut Vec<FieldDoc>) {
    for spec in node.fields().iter().filter(|spec| !spec.is_hidden()) {
        let path = if prefix.is_empty() {
            spec.name().to_owned()
        } else {
            format!("{prefix}.{}", spec.name())
        };
        let child_prefix = match spec.cardinality() {
            Cardinality::ArrayOfObject => format!("{path}[]"),
            _ => path.clone(),
        };
        docs.push(FieldDoc::new(path, spec));
        if let Some(child) = spec.child_schema() {
            collect(child, &child_prefix, docs);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn array_children_are_marked() {
        let capacity = SchemaNode::builder("capacity")
            .field(FieldSpec::required("limit").kind(RawKind::Float))
            .build()
            .expect("capacity builds");
        let vehicle = SchemaNode::builder("vehicle")
            .field(FieldSpec::optional("capacities").array_of(capacity))
            .build()
            .expect("vehicle builds");
        let paths: Vec<String> = describe(&vehicle).into_iter().map(|doc| doc.path).collect();
        assert_eq!(paths, ["capacities", "capacities[].limit"]);
    }

    #[rstest]
    fn hidden_subtrees_are_skipped() {
        let secret = SchemaNode::builder("secret")
            .field(FieldSpec::optional("knob").kind(RawKind::Integer))
            .build()
            .expect("secret builds");
        let node = SchemaNode::builder("node")
            .field(FieldSpec::optional("tuning").object(secret).hidden())
            .build()
            .expect("node builds");
        assert!(describe(&node).is_empty());
    }

    #[rstest]
    fn entries_carry_defaults() {
        let node = SchemaNode::builder("node")
            .field(
                FieldSpec::optional("solver")
                    .kind(RawKind::Boolean)
                    .default_value(json!(true)),
            )
            .build()
            .expect("node builds");
        let docs = describe(&node);
        assert_eq!(docs.first().and_then(|doc| doc.default.clone()), Some(json!(true)));
    }
}
