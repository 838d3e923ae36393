//! Field-located validation errors.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// One step from the document root towards a value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum PathSegment {
    /// Object key.
    Key(String),
    /// Array position.
    Index(usize),
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        Self::Key(key.to_owned())
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

/// Location of a value, rendered as `vrp.vehicles[0].id`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct FieldPath(Vec<PathSegment>);

impl FieldPath {
    /// The document root.
    #[must_use]
    pub const fn root() -> Self {
        Self(Vec::new())
    }

    /// Build a path from segments.
    ///
    /// # Examples
    /// ```
    /// use vrp_params_core::{FieldPath, PathSegment};
    ///
    /// let path = FieldPath::from_segments([
    ///     PathSegment::from("vrp"),
    ///     PathSegment::from("vehicles"),
    ///     PathSegment::from(2),
    ///     PathSegment::from("id"),
    /// ]);
    /// assert_eq!(path.to_string(), "vrp.vehicles[2].id");
    /// ```
    #[must_use]
    pub fn from_segments(segments: impl IntoIterator<Item = PathSegment>) -> Self {
        Self(segments.into_iter().collect())
    }

    /// Segments from the root outwards.
    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    /// Whether the path designates the document root.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn push(&mut self, segment: impl Into<PathSegment>) {
        self.0.push(segment.into());
    }

    pub(crate) fn pop(&mut self) {
        self.0.pop();
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("(root)");
        }
        for (position, segment) in self.0.iter().enumerate() {
            match segment {
                PathSegment::Key(key) if position == 0 => f.write_str(key)?,
                PathSegment::Key(key) => write!(f, ".{key}")?,
                PathSegment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

/// Category of a validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationErrorKind {
    /// A required field is absent.
    MissingRequired,
    /// The value has a kind the field does not accept.
    WrongType,
    /// The value is blank or outside its allowed set or range.
    ValueOutOfRange,
    /// The value could not be read by its coercer.
    CoercionFailed,
    /// A cross-field rule failed.
    ConstraintViolated,
}

impl ValidationErrorKind {
    /// Return the kind as a `snake_case` `&str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MissingRequired => "missing_required",
            Self::WrongType => "wrong_type",
            Self::ValueOutOfRange => "value_out_of_range",
            Self::CoercionFailed => "coercion_failed",
            Self::ConstraintViolated => "constraint_violated",
        }
    }
}

impl fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single defect located in the input document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("{path}: {message}")]
pub struct ValidationError {
    /// Where the defect sits.
    pub path: FieldPath,
    /// What went wrong.
    pub kind: ValidationErrorKind,
    /// Human-readable detail.
    pub message: String,
}

impl ValidationError {
    /// Construct an error at `path`.
    #[must_use]
    pub fn new(path: FieldPath, kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            path,
            kind,
            message: message.into(),
        }
    }
}

/// Every defect found in one validation pass, in discovery order.
///
/// Never empty when returned from [`validate`](crate::validate).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    /// Wrap a list of errors.
    #[must_use]
    pub const fn new(errors: Vec<ValidationError>) -> Self {
        Self(errors)
    }

    /// Consume the wrapper.
    #[must_use]
    pub fn into_inner(self) -> Vec<ValidationError> {
        self.0
    }

    /// Errors of the given kind.
    pub fn of_kind(&self, kind: ValidationErrorKind) -> impl Iterator<Item = &ValidationError> {
        self.0.iter().filter(move |error| error.kind == kind)
    }

    /// Errors located exactly at `path`, compared against its rendering.
    pub fn at<'a>(&'a self, path: &'a str) -> impl Iterator<Item = &'a ValidationError> {
        self.0
            .iter()
            .filter(move |error| error.path.to_string() == path)
    }
}

impl std::ops::Deref for ValidationErrors {
    type Target = [ValidationError];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (position, error) in self.0.iter().enumerate() {
            if position > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}
