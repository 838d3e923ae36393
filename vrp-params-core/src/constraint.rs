//! Cross-field presence rules evaluated per object scope.

use serde::Serialize;

/// How a [`ConstraintRule`] treats its fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintKind {
    /// At least one of the fields must be present.
    AtLeastOneOf,
    /// No more than one of the fields may be present.
    MutuallyExclusive,
}

/// A rule over a set of sibling fields.
///
/// # Examples
/// ```
/// use vrp_params_core::{ConstraintKind, ConstraintRule};
///
/// let rule = ConstraintRule::new(ConstraintKind::MutuallyExclusive, &["a", "b"]);
/// assert!(rule.is_satisfied_by(|name| name == "a"));
/// assert!(!rule.is_satisfied_by(|_| true));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConstraintRule {
    kind: ConstraintKind,
    fields: Vec<&'static str>,
}

impl ConstraintRule {
    /// Build a rule over `fields`, keeping their order.
    #[must_use]
    pub fn new(kind: ConstraintKind, fields: &[&'static str]) -> Self {
        Self {
            kind,
            fields: fields.to_vec(),
        }
    }

    /// Rule kind.
    #[must_use]
    pub const fn kind(&self) -> ConstraintKind {
        self.kind
    }

    /// Fields named by the rule, in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[&'static str] {
        &self.fields
    }

    /// Evaluate the rule given a presence test for field names.
    pub fn is_satisfied_by(&self, is_present: impl Fn(&str) -> bool) -> bool {
        let present = self.fields.iter().filter(|name| is_present(name)).count();
        match self.kind {
            ConstraintKind::AtLeastOneOf => present >= 1,
            ConstraintKind::MutuallyExclusive => present <= 1,
        }
    }

    /// Message reported when the rule fails.
    #[must_use]
    pub fn violation_message(&self) -> String {
        let names = self.fields.join(", ");
        match self.kind {
            ConstraintKind::AtLeastOneOf => {
                format!("{names} are missing, at least one parameter must be provided")
            }
            ConstraintKind::MutuallyExclusive => format!("{names} are mutually exclusive"),
        }
    }
}
