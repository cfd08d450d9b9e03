//! Structured validation issues.
//!
//! This module provides [`Issue`] for a single validation failure and
//! [`Issues`] for the non-empty collection raised at the parse boundary.

use std::fmt::{self, Display};

use serde_json::Value;
use stillwater::prelude::*;

use crate::config::Config;
use crate::path::IssuePath;

/// Whether the failing check was a type/shape check or a pipeline predicate.
///
/// There are exactly two kinds. Base-type mismatches, custom-predicate
/// failures and wrapper-level sentinel checks are `Schema`; a pipeline
/// action failing on an already-type-confirmed value is `Validation`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IssueKind {
    /// A type or shape check failed.
    Schema,
    /// A pipeline validation action failed.
    Validation,
}

impl Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueKind::Schema => write!(f, "schema"),
            IssueKind::Validation => write!(f, "validation"),
        }
    }
}

/// A single validation failure with full context.
///
/// `Issue` captures everything a consumer needs to report the failure:
/// - **kind**: schema check vs. pipeline validation ([`IssueKind`])
/// - **code**: machine-readable name of the failing check (e.g. `max_size`)
/// - **input**: the offending value or sub-value
/// - **expected** / **received**: human-readable descriptions
/// - **message**: the resolved message (custom overrides win)
/// - **path**: where in a nested structure the failure occurred
///
/// Issues are immutable once constructed, except that enclosing object and
/// array schemas prefix path segments while hoisting them upward.
#[derive(Debug, Clone, PartialEq)]
pub struct Issue {
    /// Whether a schema check or a validation action failed.
    pub kind: IssueKind,
    /// Name of the failing schema or action (e.g. `nullable`, `max_size`).
    pub code: &'static str,
    /// The offending value.
    pub input: Value,
    /// Description of what was required, if the check has one.
    pub expected: Option<String>,
    /// Description of what was given.
    pub received: String,
    /// The resolved error message.
    pub message: String,
    /// Location of the failure; empty for root-level failures.
    pub path: IssuePath,
}

impl Issue {
    /// Prefixes a path segment onto this issue's location.
    pub(crate) fn prefix_path(&mut self, segment: crate::path::PathSegment) {
        self.path.prepend(segment);
    }
}

impl Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_root() {
            write!(f, "(root): {}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

impl std::error::Error for Issue {}

// All fields are owned (Value, String, IssuePath), so Issue stays Send + Sync.
// These assertions hold the line if the fields ever change.
const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<Issue>();
    assert_sync::<Issue>();
};

/// Everything the issue builder needs to know about the failing check.
pub(crate) struct IssueSource<'a> {
    pub kind: IssueKind,
    pub code: &'static str,
    /// What the built-in message names: `type`, `size`, `bytes`, ...
    pub label: &'static str,
    pub expected: Option<String>,
    /// Check-level custom message; takes precedence over everything.
    pub message: Option<&'a str>,
}

/// Builds a fully-populated issue from a failing check.
///
/// `received_override` replaces the canonical stringification of `input`
/// when the check measured something other than the value itself (e.g. a
/// byte count). Message precedence: check-level custom message, then the
/// config-level message for the issue kind, then the built-in template.
pub(crate) fn build_issue(
    source: IssueSource<'_>,
    input: &Value,
    config: &Config,
    received_override: Option<String>,
) -> Issue {
    let received = received_override.unwrap_or_else(|| describe_value(input));
    let message = match (source.message, config.message_for(source.kind)) {
        (Some(custom), _) => custom.to_string(),
        (None, Some(configured)) => configured.to_string(),
        (None, None) => match &source.expected {
            Some(expected) => format!(
                "Invalid {}: Expected {} but received {}",
                source.label, expected, received
            ),
            None => format!("Invalid {}: Received {}", source.label, received),
        },
    };
    Issue {
        kind: source.kind,
        code: source.code,
        input: input.clone(),
        expected: source.expected,
        received,
        message,
        path: IssuePath::root(),
    }
}

/// Canonical stringification used for the `received` field.
///
/// Strings are quoted; numbers and booleans print as themselves; arrays
/// and objects collapse to a type label.
pub fn describe_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => format!("\"{}\"", s),
        Value::Array(_) => "Array".to_string(),
        Value::Object(_) => "Object".to_string(),
    }
}

/// A non-empty collection of validation issues.
///
/// `Issues` wraps a `NonEmptyVec<Issue>` so a failed run is guaranteed to
/// carry at least one issue. Issues keep the exact order their checks
/// executed in; consumers that display only the first issue rely on it.
///
/// # Combining
///
/// `Issues` implements `Semigroup`, so failures from independent runs can
/// be merged:
///
/// ```rust
/// use gauntlet::{action, parse, Schema};
/// use serde_json::json;
///
/// let schema = Schema::string().check(action::min_length(5));
/// let issues = match parse(&schema, json!("hi")) {
///     Err(gauntlet::ParseError::Invalid(issues)) => issues,
///     _ => unreachable!(),
/// };
/// assert_eq!(issues.len(), 1);
/// assert_eq!(issues.first().code, "min_length");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Issues(NonEmptyVec<Issue>);

impl Issues {
    /// Creates an `Issues` containing a single issue.
    pub fn single(issue: Issue) -> Self {
        Self(NonEmptyVec::singleton(issue))
    }

    /// Creates an `Issues` from a `NonEmptyVec` of issues.
    pub fn from_non_empty(issues: NonEmptyVec<Issue>) -> Self {
        Self(issues)
    }

    /// Creates an `Issues` from a `Vec<Issue>`.
    ///
    /// Use this when you are certain the vec contains at least one issue.
    ///
    /// # Panics
    ///
    /// Panics if the provided vec is empty.
    pub fn from_vec(issues: Vec<Issue>) -> Self {
        Self(NonEmptyVec::from_vec(issues).expect("Issues requires at least one issue"))
    }

    /// Returns the number of issues in this collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns false; the collection is guaranteed non-empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns an iterator over the contained issues.
    pub fn iter(&self) -> impl Iterator<Item = &Issue> {
        self.0.iter()
    }

    /// Returns the first issue in execution order.
    pub fn first(&self) -> &Issue {
        self.0.head()
    }

    /// Returns all issues at the specified path.
    pub fn at_path(&self, path: &IssuePath) -> Vec<&Issue> {
        self.0.iter().filter(|i| &i.path == path).collect()
    }

    /// Returns all issues with the specified code.
    pub fn with_code(&self, code: &str) -> Vec<&Issue> {
        self.0.iter().filter(|i| i.code == code).collect()
    }

    /// Converts this collection into a `Vec<Issue>`.
    pub fn into_vec(self) -> Vec<Issue> {
        self.0.into_vec()
    }
}

impl Semigroup for Issues {
    fn combine(self, other: Self) -> Self {
        Issues(self.0.combine(other.0))
    }
}

impl Display for Issues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validation failed with {} issue(s):", self.len())?;
        for (i, issue) in self.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, issue)?;
        }
        Ok(())
    }
}

impl std::error::Error for Issues {}

impl IntoIterator for Issues {
    type Item = Issue;
    type IntoIter = std::vec::IntoIter<Issue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_vec().into_iter()
    }
}

impl<'a> IntoIterator for &'a Issues {
    type Item = &'a Issue;
    type IntoIter = Box<dyn Iterator<Item = &'a Issue> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.0.iter())
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<Issues>();
    assert_sync::<Issues>();
};
