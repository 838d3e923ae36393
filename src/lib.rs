//! Facade crate for the VRP request parameter engine.
//!
//! This crate re-exports the schema-agnostic validation engine and, behind
//! the default `schema` feature, the VRP request schema built on it.

#![forbid(unsafe_code)]

pub use vrp_params_core::{
    AllowedValues, Cardinality, Coercer, CoercionError, ConstraintKind, ConstraintRule, FieldDoc,
    FieldPath, FieldSpec, PathSegment, RawKind, SchemaBuilder, SchemaError, SchemaNode,
    Validation, ValidationError, ValidationErrorKind, ValidationErrors, describe, validate,
    validate_at,
};

#[cfg(feature = "schema")]
pub use vrp_params_schema::{RequestSchema, validate_request};
