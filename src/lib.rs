//! # Gauntlet
//!
//! A runtime schema-validation engine: describe the shape of unknown data
//! as composable schemas, then run values through them to get either a
//! typed output value or a structured list of validation issues.
//!
//! ## Overview
//!
//! Validation threads a [`Dataset`] through every check: the current
//! value, a flag recording whether the base type is confirmed, and the
//! issues collected so far. Failures never unwind; they accumulate in
//! execution order so one run can report everything that is wrong, while
//! `abort_early` / `abort_pipe_early` trim the run when only the first
//! issue matters.
//!
//! ## Core Types
//!
//! - [`Schema`]: an immutable, reusable description of an accepted shape
//! - [`Action`]: one predicate in a schema's validation pipeline
//! - [`Dataset`]: the value-plus-issues unit threaded through one run
//! - [`Issue`] / [`Issues`]: a structured failure and the non-empty
//!   collection raised at the parse boundary
//! - [`Config`] / [`PartialConfig`]: resolved and call-site configuration
//!
//! ## Example
//!
//! ```rust
//! use gauntlet::{action, parse, Schema};
//! use serde_json::json;
//!
//! let schema = Schema::object([
//!     ("name", Schema::string().check(action::min_length(1))),
//!     ("nickname", Schema::nullable_or(Schema::string(), json!("none"))),
//! ]);
//!
//! let value = parse(&schema, json!({"name": "Ada", "nickname": null})).unwrap();
//! assert_eq!(value, json!({"name": "Ada", "nickname": "none"}));
//!
//! // Invalid values produce detailed issues
//! let error = parse(&schema, json!({"name": "", "nickname": 3})).unwrap_err();
//! println!("{}", error);
//! ```
//!
//! ## Sync and async
//!
//! Every composition primitive exists in a blocking and a suspendable
//! form with identical semantics. A schema built from purely synchronous
//! parts never forces an awaitable return type; one async custom check
//! (feature `async`) makes the whole composition async, declared through
//! [`Schema::is_async`] so callers pick the right entry point up front.

pub mod action;
pub mod config;
pub mod dataset;
pub mod error;
pub mod parse;
pub mod path;
pub mod pipeline;
pub mod schema;

pub use action::Action;
pub use config::{resolve_config, Config, PartialConfig};
pub use dataset::Dataset;
pub use error::{describe_value, AsyncSchemaError, Issue, IssueKind, Issues, ParseError};
pub use parse::{parse, parse_with};
pub use path::{IssuePath, PathSegment};
pub use schema::{DefaultValue, Schema};

#[cfg(feature = "async")]
pub use parse::{parse_async, parse_with_async};

/// Type alias for bridging a run's outcome into applicative validation.
pub type ValidationResult = stillwater::Validation<serde_json::Value, Issues>;
