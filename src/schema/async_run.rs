//! The suspendable validation walker.
//!
//! Mirrors the blocking walker with identical outcomes; the only
//! suspension points are custom-predicate boundaries. A subtree whose
//! `async` flag is unset is handed to the blocking walker wholesale, so
//! the algorithm itself lives once and this module only re-expresses the
//! traversal around the awaits.

use std::future::Future;
use std::pin::Pin;

use serde_json::{Map, Value};

use super::run;
use super::{Schema, SchemaKind};
use crate::config::Config;
use crate::dataset::Dataset;
use crate::path::PathSegment;
use crate::pipeline::run_pipeline;

/// Validates a dataset against a schema, suspending at async custom
/// checks. Recursion is boxed: schema nesting is data-driven, so the
/// future's size cannot be known statically.
pub(super) fn run_schema_async<'a>(
    schema: &'a Schema,
    dataset: &'a mut Dataset,
    config: &'a Config,
) -> Pin<Box<dyn Future<Output = ()> + Send + 'a>> {
    Box::pin(async move {
        if !schema.is_async {
            run::run_schema(schema, dataset, config);
            return;
        }
        match &schema.kind {
            SchemaKind::CustomAsync { check } => {
                dataset.typed = true;
                let passed = check(&dataset.value).await;
                if !passed {
                    run::append_schema_issue(schema, dataset, config);
                }
            }
            SchemaKind::Nullable { wrapped, default }
            | SchemaKind::Nullish { wrapped, default } => {
                if dataset.value.is_null() {
                    if let Some(default) = default {
                        let produced = default.produce(dataset, config);
                        dataset.value = produced;
                    }
                    if dataset.value.is_null() {
                        dataset.typed = true;
                        return;
                    }
                }
                run_schema_async(wrapped, dataset, config).await;
            }
            SchemaKind::Optional { wrapped, .. } => {
                run_schema_async(wrapped, dataset, config).await;
            }
            SchemaKind::Array { item } => run_array_async(schema, item, dataset, config).await,
            SchemaKind::Object { entries, strict } => {
                run_object_async(schema, entries, *strict, dataset, config).await
            }
            // leaves and sync custom checks carry is_async = false and are
            // handled by the blocking delegation above
            _ => run::run_schema(schema, dataset, config),
        }
    })
}

async fn run_array_async(schema: &Schema, item: &Schema, dataset: &mut Dataset, config: &Config) {
    let value = std::mem::replace(&mut dataset.value, Value::Null);
    let items = match value {
        Value::Array(items) => items,
        other => {
            dataset.value = other;
            run::append_schema_issue(schema, dataset, config);
            return;
        }
    };

    dataset.typed = true;
    let mut output = Vec::with_capacity(items.len());
    for (index, item_value) in items.into_iter().enumerate() {
        let mut child = Dataset::new(item_value);
        run_schema_async(item, &mut child, config).await;
        output.push(run::hoist_child(dataset, child, &PathSegment::index(index)));
        if config.abort_early && dataset.has_issues() {
            break;
        }
    }
    dataset.value = Value::Array(output);

    if dataset.typed {
        run_pipeline(&schema.pipeline, dataset, config);
    }
}

async fn run_object_async(
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
            run::append_schema_issue(schema, dataset, config);
            return;
        }
    };

    dataset.typed = true;
    let mut output = Map::new();
    for (key, entry_schema) in entries {
        match map.remove(key) {
            Some(field_value) => {
                let mut child = Dataset::new(field_value);
                run_schema_async(entry_schema, &mut child, config).await;
                let value =
                    run::hoist_child(dataset, child, &PathSegment::field(key.clone()));
                output.insert(key.clone(), value);
            }
            None => match run::missing_entry(entry_schema) {
                run::MissingEntry::Skip => {}
                run::MissingEntry::Substitute(default) => {
                    let placeholder = Dataset::new(Value::Null);
                    let produced = default.produce(&placeholder, config);
                    let mut child = Dataset::new(produced);
                    run_schema_async(entry_schema, &mut child, config).await;
                    let value =
                        run::hoist_child(dataset, child, &PathSegment::field(key.clone()));
                    output.insert(key.clone(), value);
                }
                run::MissingEntry::Required => {
                    dataset.typed = false;
                    dataset.push_issue(run::missing_key_issue(schema, key, config));
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
            dataset.push_issue(run::unknown_key_issue(key, leftover, config));
        }
    }
    dataset.value = Value::Object(output);

    if dataset.typed {
        run_pipeline(&schema.pipeline, dataset, config);
    }
}
