//! Per-run validation configuration.
//!
//! A [`Config`] is the fully-resolved configuration a validation run
//! executes under. Applications that want non-default behavior build one
//! (typically once at startup) and thread it into `validate`, or pass a
//! [`PartialConfig`] to `parse_with` and let [`resolve_config`] merge it
//! over the built-in defaults field by field. There is no process-wide
//! configuration slot.

use crate::error::IssueKind;

/// Resolved configuration for one validation run.
///
/// # Example
///
/// ```rust
/// use gauntlet::{Config, Schema};
/// use serde_json::json;
///
/// let config = Config::default().with_abort_early(true);
/// let schema = Schema::string();
///
/// let dataset = schema.validate(json!(42), &config).unwrap();
/// assert_eq!(dataset.issues().len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    /// Stop the entire run at the first issue.
    pub abort_early: bool,
    /// Stop only the current pipeline at its first issue.
    pub abort_pipe_early: bool,
    /// Message used verbatim for schema-kind issues without a custom message.
    pub schema_message: Option<String>,
    /// Message used verbatim for validation-kind issues without a custom message.
    pub validation_message: Option<String>,
}

impl Config {
    /// Sets the abort-early flag and returns self for chaining.
    pub fn with_abort_early(mut self, abort_early: bool) -> Self {
        self.abort_early = abort_early;
        self
    }

    /// Sets the abort-pipe-early flag and returns self for chaining.
    pub fn with_abort_pipe_early(mut self, abort_pipe_early: bool) -> Self {
        self.abort_pipe_early = abort_pipe_early;
        self
    }

    /// Sets the default message for schema-kind issues.
    pub fn with_schema_message(mut self, message: impl Into<String>) -> Self {
        self.schema_message = Some(message.into());
        self
    }

    /// Sets the default message for validation-kind issues.
    pub fn with_validation_message(mut self, message: impl Into<String>) -> Self {
        self.validation_message = Some(message.into());
        self
    }

    /// Returns the configured message for an issue kind, if any.
    pub fn message_for(&self, kind: IssueKind) -> Option<&str> {
        match kind {
            IssueKind::Schema => self.schema_message.as_deref(),
            IssueKind::Validation => self.validation_message.as_deref(),
        }
    }

    /// Merges a per-call partial configuration over this one.
    ///
    /// Set fields in the partial win; unset fields fall through to `self`.
    pub fn resolve(&self, partial: &PartialConfig) -> Config {
        Config {
            abort_early: partial.abort_early.unwrap_or(self.abort_early),
            abort_pipe_early: partial.abort_pipe_early.unwrap_or(self.abort_pipe_early),
            schema_message: partial
                .schema_message
                .clone()
                .or_else(|| self.schema_message.clone()),
            validation_message: partial
                .validation_message
                .clone()
                .or_else(|| self.validation_message.clone()),
        }
    }
}

/// Call-site configuration with every field optional.
///
/// Unset fields fall through to the defaults they are resolved against;
/// unset defaults fall through to the built-in message templates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartialConfig {
    /// Overrides [`Config::abort_early`] when set.
    pub abort_early: Option<bool>,
    /// Overrides [`Config::abort_pipe_early`] when set.
    pub abort_pipe_early: Option<bool>,
    /// Overrides the schema-kind message when set.
    pub schema_message: Option<String>,
    /// Overrides the validation-kind message when set.
    pub validation_message: Option<String>,
}

impl PartialConfig {
    /// Sets the abort-early override and returns self for chaining.
    pub fn with_abort_early(mut self, abort_early: bool) -> Self {
        self.abort_early = Some(abort_early);
        self
    }

    /// Sets the abort-pipe-early override and returns self for chaining.
    pub fn with_abort_pipe_early(mut self, abort_pipe_early: bool) -> Self {
        self.abort_pipe_early = Some(abort_pipe_early);
        self
    }

    /// Sets the schema-kind message override and returns self for chaining.
    pub fn with_schema_message(mut self, message: impl Into<String>) -> Self {
        self.schema_message = Some(message.into());
        self
    }

    /// Sets the validation-kind message override and returns self for chaining.
    pub fn with_validation_message(mut self, message: impl Into<String>) -> Self {
        self.validation_message = Some(message.into());
        self
    }
}

/// Resolves a call-site configuration against the built-in defaults.
pub fn resolve_config(partial: Option<&PartialConfig>) -> Config {
    match partial {
        Some(partial) => Config::default().resolve(partial),
        None => Config::default(),
    }
}
