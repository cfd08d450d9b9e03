//! Pipeline validation actions.
//!
//! An [`Action`] is one predicate in a schema's pipeline: a requirement
//! captured at construction time (a bound, a compiled pattern) plus an
//! optional custom message. Actions are stateless across runs; running one
//! either leaves the dataset untouched (pass) or appends exactly one
//! validation-kind issue (fail).
//!
//! Actions only run after the owning schema has confirmed the base type.
//! An action whose input domain does not apply to the value it is handed
//! (e.g. a size bound reaching a string) passes; pairing actions with the
//! right base schema is the caller's contract.
//!
//! # Example
//!
//! ```rust
//! use gauntlet::{action, parse, Schema};
//! use serde_json::json;
//!
//! let schema = Schema::string().check(action::max_bytes(3));
//! assert!(parse(&schema, json!("abc")).is_ok());
//! assert!(parse(&schema, json!("abcd")).is_err());
//! ```

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::config::Config;
use crate::dataset::Dataset;
use crate::error::{build_issue, IssueKind, IssueSource};

static CUID2_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z][a-z0-9]*$").expect("hard-coded pattern"));

static MAC64_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:[0-9a-f]{2}:){7}[0-9a-f]{2}$|^(?:[0-9a-f]{2}-){7}[0-9a-f]{2}$|^(?:[0-9a-f]{4}\.){3}[0-9a-f]{4}$",
    )
    .expect("hard-coded pattern")
});

/// The requirement of an action, fixed for the life of the action.
#[derive(Debug, Clone)]
enum ActionKind {
    MinLength(usize),
    MaxLength(usize),
    Pattern { regex: Regex, pattern: String },
    Cuid2,
    Mac64,
    MinBytes(usize),
    MaxBytes(usize),
    MinSize(usize),
    MaxSize(usize),
    Size(usize),
    NotSize(usize),
}

/// One validation predicate in a schema pipeline.
///
/// Changing a requirement means constructing a new action; there is no
/// mutation after construction.
#[derive(Debug, Clone)]
pub struct Action {
    kind: ActionKind,
    message: Option<String>,
}

impl Action {
    fn new(kind: ActionKind) -> Self {
        Self {
            kind,
            message: None,
        }
    }

    /// Sets a custom error message, used verbatim when this action fails.
    ///
    /// Takes precedence over config-level messages and the built-in
    /// template.
    ///
    /// # Example
    ///
    /// ```rust
    /// use gauntlet::action;
    ///
    /// let action = action::max_size(2).message("too many entries");
    /// ```
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// The discriminator naming this action in issues (e.g. `max_size`).
    pub fn code(&self) -> &'static str {
        match self.kind {
            ActionKind::MinLength(_) => "min_length",
            ActionKind::MaxLength(_) => "max_length",
            ActionKind::Pattern { .. } => "pattern",
            ActionKind::Cuid2 => "cuid2",
            ActionKind::Mac64 => "mac64",
            ActionKind::MinBytes(_) => "min_bytes",
            ActionKind::MaxBytes(_) => "max_bytes",
            ActionKind::MinSize(_) => "min_size",
            ActionKind::MaxSize(_) => "max_size",
            ActionKind::Size(_) => "size",
            ActionKind::NotSize(_) => "not_size",
        }
    }

    /// Runs this action against a typed dataset.
    ///
    /// Returns true when the value passed. On failure the one issue has
    /// already been appended to the dataset.
    pub(crate) fn run(&self, dataset: &mut Dataset, config: &Config) -> bool {
        match &self.kind {
            ActionKind::MinLength(min) => match dataset.value.as_str() {
                Some(s) => {
                    let length = s.chars().count();
                    if length >= *min {
                        true
                    } else {
                        self.fail(dataset, config, "length", Some(format!(">={}", min)), length)
                    }
                }
                None => true,
            },
            ActionKind::MaxLength(max) => match dataset.value.as_str() {
                Some(s) => {
                    let length = s.chars().count();
                    if length <= *max {
                        true
                    } else {
                        self.fail(dataset, config, "length", Some(format!("<={}", max)), length)
                    }
                }
                None => true,
            },
            ActionKind::Pattern { regex, pattern } => match dataset.value.as_str() {
                Some(s) => {
                    if regex.is_match(s) {
                        true
                    } else {
                        self.fail_unmeasured(dataset, config, "format", Some(pattern.clone()))
                    }
                }
                None => true,
            },
            ActionKind::Cuid2 => match dataset.value.as_str() {
                Some(s) => {
                    CUID2_REGEX.is_match(s)
                        || self.fail_unmeasured(dataset, config, "Cuid2", None)
                }
                None => true,
            },
            ActionKind::Mac64 => match dataset.value.as_str() {
                Some(s) => {
                    MAC64_REGEX.is_match(s)
                        || self.fail_unmeasured(dataset, config, "64 bit MAC", None)
                }
                None => true,
            },
            ActionKind::MinBytes(min) => match dataset.value.as_str() {
                Some(s) => {
                    let bytes = s.len();
                    if bytes >= *min {
                        true
                    } else {
                        self.fail(dataset, config, "bytes", Some(format!(">={}", min)), bytes)
                    }
                }
                None => true,
            },
            ActionKind::MaxBytes(max) => match dataset.value.as_str() {
                Some(s) => {
                    let bytes = s.len();
                    if bytes <= *max {
                        true
                    } else {
                        self.fail(dataset, config, "bytes", Some(format!("<={}", max)), bytes)
                    }
                }
                None => true,
            },
            ActionKind::MinSize(min) => match container_size(&dataset.value) {
                Some(size) => {
                    size >= *min
                        || self.fail(dataset, config, "size", Some(format!(">={}", min)), size)
                }
                None => true,
            },
            ActionKind::MaxSize(max) => match container_size(&dataset.value) {
                Some(size) => {
                    size <= *max
                        || self.fail(dataset, config, "size", Some(format!("<={}", max)), size)
                }
                None => true,
            },
            ActionKind::Size(exact) => match container_size(&dataset.value) {
                Some(size) => {
                    size == *exact
                        || self.fail(dataset, config, "size", Some(format!("{}", exact)), size)
                }
                None => true,
            },
            ActionKind::NotSize(banned) => match container_size(&dataset.value) {
                Some(size) => {
                    size != *banned
                        || self.fail(dataset, config, "size", Some(format!("!{}", banned)), size)
                }
                None => true,
            },
        }
    }

    fn fail(
        &self,
        dataset: &mut Dataset,
        config: &Config,
        label: &'static str,
        expected: Option<String>,
        measured: usize,
    ) -> bool {
        let issue = build_issue(
            IssueSource {
                kind: IssueKind::Validation,
                code: self.code(),
                label,
                expected,
                message: self.message.as_deref(),
            },
            &dataset.value,
            config,
            Some(measured.to_string()),
        );
        dataset.push_issue(issue);
        false
    }

    fn fail_unmeasured(
        &self,
        dataset: &mut Dataset,
        config: &Config,
        label: &'static str,
        expected: Option<String>,
    ) -> bool {
        let issue = build_issue(
            IssueSource {
                kind: IssueKind::Validation,
                code: self.code(),
                label,
                expected,
                message: self.message.as_deref(),
            },
            &dataset.value,
            config,
            None,
        );
        dataset.push_issue(issue);
        false
    }
}

/// The size of a container value: element count of an array, entry count
/// of an object. Other values have no size.
fn container_size(value: &Value) -> Option<usize> {
    match value {
        Value::Array(items) => Some(items.len()),
        Value::Object(entries) => Some(entries.len()),
        _ => None,
    }
}

/// Requires at least `min` characters (Unicode scalar values).
pub fn min_length(min: usize) -> Action {
    Action::new(ActionKind::MinLength(min))
}

/// Requires at most `max` characters (Unicode scalar values).
pub fn max_length(max: usize) -> Action {
    Action::new(ActionKind::MaxLength(max))
}

/// Requires the string to match a regex pattern.
///
/// Returns an error if the pattern is invalid.
pub fn pattern(pattern: &str) -> Result<Action, regex::Error> {
    let regex = Regex::new(pattern)?;
    Ok(Action::new(ActionKind::Pattern {
        regex,
        pattern: pattern.to_string(),
    }))
}

/// Requires a [Cuid2](https://github.com/paralleldrive/cuid2) identifier.
pub fn cuid2() -> Action {
    Action::new(ActionKind::Cuid2)
}

/// Requires a 64 bit [MAC address](https://en.wikipedia.org/wiki/MAC_address).
pub fn mac64() -> Action {
    Action::new(ActionKind::Mac64)
}

/// Requires at least `min` bytes of UTF-8 encoded string data.
pub fn min_bytes(min: usize) -> Action {
    Action::new(ActionKind::MinBytes(min))
}

/// Requires at most `max` bytes of UTF-8 encoded string data.
pub fn max_bytes(max: usize) -> Action {
    Action::new(ActionKind::MaxBytes(max))
}

/// Requires a container size of at least `min`.
pub fn min_size(min: usize) -> Action {
    Action::new(ActionKind::MinSize(min))
}

/// Requires a container size of at most `max`.
pub fn max_size(max: usize) -> Action {
    Action::new(ActionKind::MaxSize(max))
}

/// Requires an exact container size.
pub fn size(exact: usize) -> Action {
    Action::new(ActionKind::Size(exact))
}

/// Rejects one exact container size.
pub fn not_size(banned: usize) -> Action {
    Action::new(ActionKind::NotSize(banned))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn run(action: &Action, value: Value) -> Dataset {
        let mut dataset = Dataset::new(value);
        dataset.typed = true;
        action.run(&mut dataset, &Config::default());
        dataset
    }

    #[test]
    fn test_min_length_counts_chars() {
        let action = min_length(3);
        assert!(run(&action, json!("abc")).is_valid());
        assert!(run(&action, json!("日本語")).is_valid());
        assert!(!run(&action, json!("ab")).is_valid());

        let dataset = run(&action, json!("ab"));
        let issue = &dataset.issues()[0];
        assert_eq!(issue.code, "min_length");
        assert_eq!(issue.expected.as_deref(), Some(">=3"));
        assert_eq!(issue.received, "2");
    }

    #[test]
    fn test_max_length() {
        let action = max_length(2);
        assert!(run(&action, json!("ab")).is_valid());
        assert!(!run(&action, json!("abc")).is_valid());
    }

    #[test]
    fn test_max_bytes_counts_utf8_bytes() {
        let action = max_bytes(3);
        assert!(run(&action, json!("abc")).is_valid());
        assert!(!run(&action, json!("abcd")).is_valid());
        // two chars, five bytes
        assert!(!run(&action, json!("a🎉")).is_valid());

        let dataset = run(&action, json!("a🎉"));
        let issue = &dataset.issues()[0];
        assert_eq!(issue.code, "max_bytes");
        assert_eq!(issue.received, "5");
        assert_eq!(issue.message, "Invalid bytes: Expected <=3 but received 5");
    }

    #[test]
    fn test_min_bytes() {
        let action = min_bytes(3);
        assert!(run(&action, json!("abc")).is_valid());
        assert!(run(&action, json!("🎉")).is_valid());
        assert!(!run(&action, json!("ab")).is_valid());
    }

    #[test]
    fn test_max_size_arrays_and_objects() {
        let action = max_size(3);
        assert!(run(&action, json!([])).is_valid());
        assert!(run(&action, json!([1, 2, 3])).is_valid());
        assert!(!run(&action, json!([1, 2, 3, 4])).is_valid());

        assert!(run(&action, json!({"a": 1, "b": 2})).is_valid());
        assert!(!run(&action, json!({"a": 1, "b": 2, "c": 3, "d": 4})).is_valid());

        let dataset = run(&action, json!([1, 2, 3, 4]));
        let issue = &dataset.issues()[0];
        assert_eq!(issue.expected.as_deref(), Some("<=3"));
        assert_eq!(issue.received, "4");
    }

    #[test]
    fn test_min_size() {
        let action = min_size(2);
        assert!(run(&action, json!([1, 2])).is_valid());
        assert!(!run(&action, json!([1])).is_valid());
    }

    #[test]
    fn test_size_exact() {
        let action = size(2);
        assert!(run(&action, json!([1, 2])).is_valid());
        assert!(!run(&action, json!([1])).is_valid());
        assert!(!run(&action, json!([1, 2, 3])).is_valid());
    }

    #[test]
    fn test_not_size() {
        let action = not_size(2);
        assert!(run(&action, json!([1])).is_valid());
        assert!(run(&action, json!([1, 2, 3])).is_valid());
        assert!(!run(&action, json!([1, 2])).is_valid());

        let dataset = run(&action, json!([1, 2]));
        let issue = &dataset.issues()[0];
        assert_eq!(issue.code, "not_size");
        assert_eq!(issue.expected.as_deref(), Some("!2"));
        assert_eq!(issue.received, "2");
    }

    #[test]
    fn test_pattern() {
        let action = pattern(r"^\d+$").unwrap();
        assert!(run(&action, json!("12345")).is_valid());
        assert!(!run(&action, json!("abc")).is_valid());

        let dataset = run(&action, json!("abc"));
        let issue = &dataset.issues()[0];
        assert_eq!(issue.code, "pattern");
        assert_eq!(issue.expected.as_deref(), Some(r"^\d+$"));
    }

    #[test]
    fn test_pattern_invalid_regex() {
        assert!(pattern(r"[invalid").is_err());
    }

    #[test]
    fn test_cuid2() {
        let action = cuid2();
        assert!(run(&action, json!("tz4a98xxat96iws9zmbrgj3a")).is_valid());
        assert!(run(&action, json!("a")).is_valid());
        assert!(!run(&action, json!("1startswithdigit")).is_valid());
        assert!(!run(&action, json!("HasUpper")).is_valid());
        assert!(!run(&action, json!("")).is_valid());

        let dataset = run(&action, json!(""));
        let issue = &dataset.issues()[0];
        assert!(issue.expected.is_none());
        assert_eq!(issue.message, "Invalid Cuid2: Received \"\"");
    }

    #[test]
    fn test_mac64() {
        let action = mac64();
        assert!(run(&action, json!("00:1A:2B:3C:4D:5E:6F:70")).is_valid());
        assert!(run(&action, json!("00-1a-2b-3c-4d-5e-6f-70")).is_valid());
        assert!(run(&action, json!("001a.2b3c.4d5e.6f70")).is_valid());
        // 48 bit form is not a 64 bit MAC
        assert!(!run(&action, json!("00:1A:2B:3C:4D:5E")).is_valid());
        assert!(!run(&action, json!("not a mac")).is_valid());
    }

    #[test]
    fn test_custom_message_is_verbatim() {
        let action = max_size(2).message("Value size is greater than \"2\"!");
        let dataset = run(&action, json!([1, 2, 3]));
        assert_eq!(dataset.issues()[0].message, "Value size is greater than \"2\"!");
    }

    #[test]
    fn test_out_of_domain_input_passes() {
        // a size bound reaching a string is a pass, not an issue
        assert!(run(&max_size(1), json!("abc")).is_valid());
        assert!(run(&min_length(3), json!([1])).is_valid());
    }

    #[test]
    fn test_issue_kind_is_validation() {
        let dataset = run(&max_length(1), json!("abc"));
        assert_eq!(dataset.issues()[0].kind, crate::error::IssueKind::Validation);
    }
}
