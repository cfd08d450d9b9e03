//! The dataset threaded through a validation run.
//!
//! A [`Dataset`] carries the candidate value, a flag recording whether its
//! base type has been confirmed, and the ordered list of issues collected
//! so far. Every run allocates its own dataset, so concurrent runs over a
//! shared schema never touch common mutable state.

use serde_json::Value;
use stillwater::Validation;

use crate::error::{Issue, Issues};

/// The unit of data flowing through one validation run.
///
/// The issue list is append-only for the duration of a run: checks append
/// in the exact order they execute, and nothing removes or reorders
/// entries. A wrapper schema may replace `value` in place (e.g. default
/// substitution for `null`).
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// The current candidate value; wrappers may substitute it.
    pub value: Value,
    /// True once the value's base type has been confirmed.
    pub typed: bool,
    issues: Vec<Issue>,
}

impl Dataset {
    /// Creates a fresh dataset for an input value: untyped, no issues.
    pub fn new(value: Value) -> Self {
        Self {
            value,
            typed: false,
            issues: Vec::new(),
        }
    }

    /// Returns the issues collected so far, in execution order.
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    /// Returns true if any issue has been collected.
    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }

    /// Returns true if the value passed: typed with no issues.
    pub fn is_valid(&self) -> bool {
        self.typed && self.issues.is_empty()
    }

    /// Appends one issue. Issues are never removed within a run.
    pub(crate) fn push_issue(&mut self, issue: Issue) {
        self.issues.push(issue);
    }

    /// Splits the dataset into its parts; used when a parent schema hoists
    /// a child's outcome into its own dataset.
    pub(crate) fn into_parts(self) -> (Value, bool, Vec<Issue>) {
        (self.value, self.typed, self.issues)
    }

    /// Converts the run outcome into an applicative validation result.
    ///
    /// # Example
    ///
    /// ```rust
    /// use gauntlet::{Config, Schema};
    /// use serde_json::json;
    /// use stillwater::Validation;
    ///
    /// let dataset = Schema::number()
    ///     .validate(json!(7), &Config::default())
    ///     .unwrap();
    /// match dataset.into_validation() {
    ///     Validation::Success(value) => assert_eq!(value, json!(7)),
    ///     Validation::Failure(issues) => panic!("unexpected: {}", issues),
    /// }
    /// ```
    pub fn into_validation(self) -> Validation<Value, Issues> {
        if self.issues.is_empty() {
            Validation::Success(self.value)
        } else {
            Validation::Failure(Issues::from_vec(self.issues))
        }
    }

    /// Converts the run outcome into a result.
    ///
    /// Succeeds exactly when no issue was collected, mirroring the parse
    /// boundary contract.
    pub fn into_result(self) -> Result<Value, Issues> {
        self.into_validation().into_result()
    }
}
