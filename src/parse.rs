//! Parse entry points.
//!
//! `parse` resolves a configuration, runs a schema's validation, and
//! either unwraps the output value or converts the collected issues into
//! a single [`ParseError`]. Inspect partial results instead by calling
//! [`Schema::validate`] directly and reading the returned dataset.

use serde_json::Value;

use crate::config::{resolve_config, PartialConfig};
use crate::error::ParseError;
use crate::schema::Schema;

/// Parses an input value with the built-in default configuration.
///
/// # Example
///
/// ```rust
/// use gauntlet::{parse, Schema};
/// use serde_json::json;
///
/// let schema = Schema::number();
/// assert_eq!(parse(&schema, json!(7)).unwrap(), json!(7));
/// assert!(parse(&schema, json!("seven")).is_err());
/// ```
///
/// # Errors
///
/// Returns [`ParseError::Invalid`] carrying every collected issue in
/// execution order, or [`ParseError::AsyncSchema`] when the schema
/// declares suspendable checks.
pub fn parse(schema: &Schema, input: Value) -> Result<Value, ParseError> {
    parse_with(schema, input, &PartialConfig::default())
}

/// Parses an input value with a call-site configuration.
///
/// The partial configuration is resolved field by field against the
/// built-in defaults before the run starts.
///
/// # Errors
///
/// Same as [`parse`].
pub fn parse_with(
    schema: &Schema,
    input: Value,
    config: &PartialConfig,
) -> Result<Value, ParseError> {
    let config = resolve_config(Some(config));
    let dataset = schema.validate(input, &config)?;
    Ok(dataset.into_result()?)
}

/// Parses an input value on the suspendable path.
///
/// Identical semantics to [`parse`], but accepts schemas containing async
/// custom checks.
#[cfg(feature = "async")]
pub async fn parse_async(schema: &Schema, input: Value) -> Result<Value, ParseError> {
    parse_with_async(schema, input, &PartialConfig::default()).await
}

/// Parses an input value on the suspendable path with a call-site
/// configuration.
#[cfg(feature = "async")]
pub async fn parse_with_async(
    schema: &Schema,
    input: Value,
    config: &PartialConfig,
) -> Result<Value, ParseError> {
    let config = resolve_config(Some(config));
    let dataset = schema.validate_async(input, &config).await;
    Ok(dataset.into_result()?)
}
