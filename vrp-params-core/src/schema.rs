//! Schema nodes: one nesting level of field declarations and rules.
//!
//! Nodes are assembled once through [`SchemaBuilder`], frozen behind an
//! [`Arc`] and then shared read-only by every validation. The builder checks
//! the structural invariants so a node that exists is always well formed.

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use crate::{Cardinality, ConstraintKind, ConstraintRule, FieldSpec};

/// Defects detected while assembling a schema node.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// Two fields share a name within one node.
    #[error("field {field} is declared twice in {node}")]
    DuplicateField {
        /// Node being built.
        node: &'static str,
        /// Repeated field name.
        field: &'static str,
    },
    /// A field lists no acceptable raw kinds.
    #[error("field {field} in {node} accepts no value kinds")]
    NoKinds {
        /// Node being built.
        node: &'static str,
        /// Offending field.
        field: &'static str,
    },
    /// An object field has no child schema.
    #[error("field {field} in {node} holds objects but has no child schema")]
    MissingChild {
        /// Node being built.
        node: &'static str,
        /// Offending field.
        field: &'static str,
    },
    /// An object field also declares a coercer.
    #[error("field {field} in {node} holds objects and cannot be coerced")]
    CoercedObject {
        /// Node being built.
        node: &'static str,
        /// Offending field.
        field: &'static str,
    },
    /// A scalar field refers to a child schema.
    #[error("field {field} in {node} holds scalars but has a child schema")]
    UnexpectedChild {
        /// Node being built.
        node: &'static str,
        /// Offending field.
        field: &'static str,
    },
    /// A rule names fewer than two fields.
    #[error("constraint in {node} must name at least two fields")]
    ConstraintTooSmall {
        /// Node being built.
        node: &'static str,
    },
    /// A rule names a field the node does not declare.
    #[error("constraint in {node} names undeclared field {field}")]
    UnknownConstraintField {
        /// Node being built.
        node: &'static str,
        /// Undeclared field.
        field: &'static str,
    },
}

/// Ordered field declarations plus cross-field rules for one object scope.
#[derive(Debug, Serialize)]
pub struct SchemaNode {
    name: &'static str,
    fields: Vec<FieldSpec>,
    constraints: Vec<ConstraintRule>,
}

impl SchemaNode {
    /// Start declaring a node called `name`.
    #[must_use]
    pub fn builder(name: &'static str) -> SchemaBuilder {
        SchemaBuilder {
            name,
            fields: Vec::new(),
            constraints: Vec::new(),
        }
    }

    /// Node name used in documentation and diagnostics.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Field declarations in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Look up a field declaration by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|spec| spec.name() == name)
    }

    /// Cross-field rules in declaration order.
    #[must_use]
    pub fn constraints(&self) -> &[ConstraintRule] {
        &self.constraints
    }
}

/// Builder for [`SchemaNode`].
///
/// # Examples
/// ```
/// use vrp_params_core::{FieldSpec, RawKind, SchemaNode};
///
/// # fn main() -> Result<(), vrp_params_core::SchemaError> {
/// let window = SchemaNode::builder("timewindow")
///     .field(FieldSpec::optional("start").kind(RawKind::Integer))
///     .field(FieldSpec::optional("end").kind(RawKind::Integer))
///     .at_least_one_of(&["start", "end"])
///     .build()?;
/// assert_eq!(window.fields().len(), 2);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
#[must_use]
pub struct SchemaBuilder {
    name: &'static str,
    fields: Vec<FieldSpec>,
    constraints: Vec<ConstraintRule>,
}

impl SchemaBuilder {
    /// Append a field declaration.
    pub fn field(mut self, spec: FieldSpec) -> Self {
        self.fields.push(spec);
        self
    }

    /// Require at least one of `fields` to be present.
    pub fn at_least_one_of(self, fields: &[&'static str]) -> Self {
        self.rule(ConstraintRule::new(ConstraintKind::AtLeastOneOf, fields))
    }

    /// Forbid more than one of `fields` from being present.
    pub fn mutually_exclusive(self, fields: &[&'static str]) -> Self {
        self.rule(ConstraintRule::new(ConstraintKind::MutuallyExclusive, fields))
    }

    fn rule(mut self, rule: ConstraintRule) -> Self {
        self.constraints.push(rule);
        self
    }

    /// Check the declarations and freeze the node.
    ///
    /// # Errors
    /// Returns [`SchemaError`] when a field or rule breaks a structural
    /// invariant.
    pub fn build(self) -> Result<Arc<SchemaNode>, SchemaError> {
        let node = self.name;
        for (position, spec) in self.fields.iter().enumerate() {
            let field = spec.name();
            if self
                .fields
                .iter()
                .take(position)
                .any(|earlier| earlier.name() == field)
            {
                return Err(SchemaError::DuplicateField { node, field });
            }
            check_field(node, spec)?;
        }
        for rule in &self.constraints {
            if rule.fields().len() < 2 {
                return Err(SchemaError::ConstraintTooSmall { node });
            }
            if let Some(field) = rule
                .fields()
                .iter()
                .find(|name| !self.fields.iter().any(|spec| spec.name() == **name))
            {
                return Err(SchemaError::UnknownConstraintField {
                    node,
                    field: *field,
                });
            }
        }
        Ok(Arc::new(SchemaNode {
            name: self.name,
            fields: self.fields,
            constraints: self.constraints,
        }))
    }
}

fn check_field(node: &'static str, spec: &FieldSpec) -> Result<(), SchemaError> {
    let field = spec.name();
    if spec.raw_kinds().is_empty() {
        return Err(SchemaError::NoKinds { node, field });
    }
    match spec.cardinality() {
        Cardinality::Object | Cardinality::ArrayOfObject => {
            if spec.child_schema().is_none() {
                return Err(SchemaError::MissingChild { node, field });
            }
            if spec.coercer().is_some() {
                return Err(SchemaError::CoercedObject { node, field });
            }
        }
        Cardinality::Scalar | Cardinality::ArrayOfScalar | Cardinality::ArrayOfArray => {
            if spec.child_schema().is_some() {
                return Err(SchemaError::UnexpectedChild { node, field });
            }
        }
    }
    Ok(())
}
