//! The blocking validation walker.
//!
//! Validation logic lives here as standalone functions over the schema
//! variant: leaf base-type checks, wrapper sentinel transitions, nested
//! recursion with upward path prefixing, and the pipeline hand-off. The
//! async walker reuses the helpers in this module and delegates whole
//! sync subtrees here.

use serde_json::{Map, Value};

use super::{DefaultValue, Schema, SchemaKind};
use crate::config::Config;
use crate::dataset::Dataset;
use crate::error::{build_issue, Issue, IssueKind, IssueSource};
use crate::path::PathSegment;
use crate::pipeline::run_pipeline;

/// Validates a dataset against a schema, appending issues in execution
/// order: base-type check, pipeline in declaration order, then children
/// in structural order.
pub(crate) fn run_schema(schema: &Schema, dataset: &mut Dataset, config: &Config) {
    match &schema.kind {
        SchemaKind::Boolean => {
            let matches = dataset.value.is_boolean();
            confirm_leaf(schema, dataset, config, matches);
        }
        SchemaKind::Number => {
            let matches = dataset.value.is_number();
            confirm_leaf(schema, dataset, config, matches);
        }
        SchemaKind::String => {
            let matches = dataset.value.is_string();
            confirm_leaf(schema, dataset, config, matches);
        }
        SchemaKind::Array { item } => run_array(schema, item, dataset, config),
        SchemaKind::Object { entries, strict } => {
            run_object(schema, entries, *strict, dataset, config)
        }
        SchemaKind::Nullable { wrapped, default }
        | SchemaKind::Nullish { wrapped, default } => {
            if dataset.value.is_null() {
                if let Some(default) = default {
                    let produced = default.produce(dataset, config);
                    dataset.value = produced;
                }
                // null is an accepted terminal state
                if dataset.value.is_null() {
                    dataset.typed = true;
                    return;
                }
            }
            run_schema(wrapped, dataset, config);
        }
        // the missing-key sentinel only exists inside objects; standalone
        // the wrapper just delegates
        SchemaKind::Optional { wrapped, .. } => run_schema(wrapped, dataset, config),
        SchemaKind::Custom { check } => {
            dataset.typed = true;
            if !check(&dataset.value) {
                append_schema_issue(schema, dataset, config);
            }
        }
        #[cfg(feature = "async")]
        SchemaKind::CustomAsync { .. } => {
            unreachable!("suspendable checks are rejected before the blocking walker runs")
        }
    }
}

/// Marks the dataset typed and runs the pipeline, or reports the type
/// mismatch and leaves it untyped. The pipeline never runs on a failed
/// base-type check.
fn confirm_leaf(schema: &Schema, dataset: &mut Dataset, config: &Config, matches: bool) {
    if matches {
        dataset.typed = true;
        run_pipeline(&schema.pipeline, dataset, config);
    } else {
        append_schema_issue(schema, dataset, config);
    }
}

/// Appends the schema-kind issue for a failed type, shape or predicate
/// check.
pub(super) fn append_schema_issue(schema: &Schema, dataset: &mut Dataset, config: &Config) {
    let issue = build_issue(
        IssueSource {
            kind: IssueKind::Schema,
            code: schema.type_name(),
            label: "type",
            expected: Some(schema.expects.clone()),
            message: schema.message.as_deref(),
        },
        &dataset.value,
        config,
        None,
    );
    dataset.push_issue(issue);
}

/// Folds a finished child dataset into its parent: conjoins the typed
/// flag, prefixes the segment onto each hoisted issue, and hands back the
/// child's output value.
pub(super) fn hoist_child(
    dataset: &mut Dataset,
    child: Dataset,
    segment: &PathSegment,
) -> Value {
    let (value, typed, issues) = child.into_parts();
    dataset.typed &= typed;
    for mut issue in issues {
        issue.prefix_path(segment.clone());
        dataset.push_issue(issue);
    }
    value
}

/// How the object walker treats a missing key for a given entry schema.
pub(super) enum MissingEntry<'a> {
    /// Optional without a default: the key simply stays absent.
    Skip,
    /// Optional with a default: substitute and validate it.
    Substitute(&'a DefaultValue),
    /// Anything else: the key is required.
    Required,
}

pub(super) fn missing_entry(schema: &Schema) -> MissingEntry<'_> {
    match &schema.kind {
        SchemaKind::Optional { default, .. } | SchemaKind::Nullish { default, .. } => {
            match default {
                Some(default) => MissingEntry::Substitute(default),
                None => MissingEntry::Skip,
            }
        }
        _ => MissingEntry::Required,
    }
}

/// The issue reported for a required key that is absent.
pub(super) fn missing_key_issue(schema: &Schema, key: &str, config: &Config) -> Issue {
    let mut issue = build_issue(
        IssueSource {
            kind: IssueKind::Schema,
            code: schema.type_name(),
            label: "key",
            expected: Some(format!("\"{}\"", key)),
            message: schema.message.as_deref(),
        },
        &Value::Null,
        config,
        Some("missing".to_string()),
    );
    issue.prefix_path(PathSegment::field(key));
    issue
}

/// The issue reported by a strict object for an undeclared key.
pub(super) fn unknown_key_issue(
    key: &str,
    value: &Value,
    config: &Config,
) -> Issue {
    let mut issue = build_issue(
        IssueSource {
            kind: IssueKind::Schema,
            code: "strict_object",
            label: "type",
            expected: Some("never".to_string()),
            message: None,
        },
        value,
        config,
        None,
    );
    issue.prefix_path(PathSegment::field(key));
    issue
}

fn run_array(schema: &Schema, item: &Schema, dataset: &mut Dataset, config: &Config) {
    let value = std::mem::replace(&mut dataset.value, Value::Null);
    let items = match value {
        Value::Array(items) => items,
        other => {
            dataset.value = other;
            append_schema_issue(schema, dataset, config);
            return;
        }
    };

    dataset.typed = true;
    let mut output = Vec::with_capacity(items.len());
    for (index, item_value) in items.into_iter().enumerate() {
        let mut child = Dataset::new(item_value);
        run_schema(item, &mut child, config);
        output.push(hoist_child(dataset, child, &PathSegment::index(index)));
        if config.abort_early && dataset.has_issues() {
            break;
        }
    }
    dataset.value = Value::Array(output);

    if dataset.typed {
        run_pipeline(&schema.pipeline, dataset, config);
    }
}

fn run_object(
    schema: &Schema,
    entries: &indexmap::IndexMap<String, std::sync::Arc<Schema>>,
    strict: bool,
    dataset: &mut Dataset,
    config: &Config,
) {
    let value = std::mem::replace(&mut dataset.value, Value::Null);
    let mut map = match value {
        Value::Object(map) => map,
        other => {
            dataset.value = other;
            append_schema_issue(schema, dataset, config);
            return;
        }
    };

    dataset.typed = true;
    let mut output = Map::new();
    for (key, entry_schema) in entries {
        match map.remove(key) {
            Some(field_value) => {
                let mut child = Dataset::new(field_value);
                run_schema(entry_schema, &mut child, config);
                let value = hoist_child(dataset, child, &PathSegment::field(key.clone()));
                output.insert(key.clone(), value);
            }
            None => match missing_entry(entry_schema) {
                MissingEntry::Skip => {}
                MissingEntry::Substitute(default) => {
                    let placeholder = Dataset::new(Value::Null);
                    let produced = default.produce(&placeholder, config);
                    let mut child = Dataset::new(produced);
                    run_schema(entry_schema, &mut child, config);
                    let value = hoist_child(dataset, child, &PathSegment::field(key.clone()));
                    output.insert(key.clone(), value);
                }
                MissingEntry::Required => {
                    dataset.typed = false;
                    dataset.push_issue(missing_key_issue(schema, key, config));
                }
            },
        }
        if config.abort_early && dataset.has_issues() {
            break;
        }
    }

    if strict {
        for (key, leftover) in &map {
            if config.abort_early && dataset.has_issues() {
                break;
            }
            dataset.push_issue(unknown_key_issue(key, leftover, config));
        }
    }
    dataset.value = Value::Object(output);

    if dataset.typed {
        run_pipeline(&schema.pipeline, dataset, config);
    }
}
