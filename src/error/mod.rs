//! Validation issue types and the errors raised at the crate boundary.
//!
//! Inside the engine there are no fatal paths: every failure becomes an
//! [`Issue`] carried by value in the dataset. The only `Err` surfaces are
//! [`ParseError`] (the parse boundary aggregating collected issues) and
//! [`AsyncSchemaError`] (calling the blocking entry on a schema that
//! declares suspendable checks).

mod issue;

pub use issue::{describe_value, Issue, IssueKind, Issues};

pub(crate) use issue::{build_issue, IssueSource};

/// The blocking entry point was called on a schema whose `async` flag is set.
///
/// Schemas containing suspendable checks must go through `validate_async`
/// or `parse_async`; the flag is precomputed at construction so the gate
/// costs nothing per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("schema declares suspendable checks; use the async entry point")]
pub struct AsyncSchemaError;

/// Error returned by the `parse` entry points.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// Validation produced one or more issues.
    #[error(transparent)]
    Invalid(#[from] Issues),
    /// A blocking parse was attempted on an async schema.
    #[error(transparent)]
    AsyncSchema(#[from] AsyncSchemaError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::IssuePath;
    use serde_json::json;

    #[test]
    fn test_parse_error_from_issues() {
        let issues = Issues::single(Issue {
            kind: IssueKind::Schema,
            code: "string",
            input: json!(1),
            expected: Some("string".to_string()),
            received: "1".to_string(),
            message: "Invalid type: Expected string but received 1".to_string(),
            path: IssuePath::root(),
        });

        let error: ParseError = issues.into();
        assert!(matches!(error, ParseError::Invalid(_)));
        assert!(error.to_string().contains("1 issue(s)"));
    }

    #[test]
    fn test_async_schema_error_display() {
        let error: ParseError = AsyncSchemaError.into();
        assert!(error.to_string().contains("suspendable"));
    }
}
