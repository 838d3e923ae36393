//! Schema-driven validation and normalization of untyped request documents.
//!
//! A schema is a tree of immutable [`SchemaNode`] values. Each node lists
//! its [`FieldSpec`] declarations in order plus the [`ConstraintRule`]s that
//! relate sibling fields. [`validate`] walks a raw [`serde_json::Value`]
//! against such a tree and returns either the normalized document or every
//! [`ValidationError`] it found, each located by a [`FieldPath`].
//!
//! Scalar coercion lives in [`coerce`]: time values become whole seconds,
//! counts fall back to defaults and tokens are checked against closed sets.
//!
//! Nothing in this crate knows about a particular request format; concrete
//! schemas are assembled by callers and shared across threads.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod coerce;
mod constraint;
mod doc;
mod error;
mod field;
mod kind;
mod schema;
mod validator;

pub use coerce::{Coercer, CoercionError};
pub use constraint::{ConstraintKind, ConstraintRule};
pub use doc::{FieldDoc, describe};
pub use error::{FieldPath, PathSegment, ValidationError, ValidationErrorKind, ValidationErrors};
pub use field::{AllowedValues, Cardinality, FieldSpec};
pub use kind::{RawKind, is_blank};
pub use schema::{SchemaBuilder, SchemaError, SchemaNode};
pub use validator::{Validation, validate, validate_at};
