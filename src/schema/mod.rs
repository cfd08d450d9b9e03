//! Schema definitions and composition.
//!
//! A [`Schema`] is an immutable, reusable description of an accepted input
//! shape. Leaf schemas confirm a base type and then run their pipeline of
//! validation actions; wrapper schemas delegate to an inner schema around
//! sentinel handling (e.g. substituting a default for `null`); custom
//! schemas accept whatever their predicate accepts.
//!
//! Schemas are built once via the factory constructors and then validate
//! any number of independent inputs, concurrently if desired: no run ever
//! mutates the schema itself.
//!
//! # Example
//!
//! ```rust
//! use gauntlet::{action, parse, Schema};
//! use serde_json::json;
//!
//! let user = Schema::object([
//!     ("name", Schema::string().check(action::min_length(1))),
//!     ("tags", Schema::array(Schema::string())),
//! ]);
//!
//! let value = parse(&user, json!({"name": "Ada", "tags": ["admin"]})).unwrap();
//! assert_eq!(value, json!({"name": "Ada", "tags": ["admin"]}));
//! ```

mod run;

#[cfg(feature = "async")]
mod async_run;

use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;

use crate::action::Action;
use crate::config::Config;
use crate::dataset::Dataset;
use crate::error::AsyncSchemaError;

/// A synchronous custom type check.
pub(crate) type CheckFn = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// A boxed future returned by a suspendable custom check.
#[cfg(feature = "async")]
pub(crate) type BoxCheckFuture =
    std::pin::Pin<Box<dyn std::future::Future<Output = bool> + Send>>;

/// A suspendable custom type check.
#[cfg(feature = "async")]
pub(crate) type AsyncCheckFn = Arc<dyn Fn(&Value) -> BoxCheckFuture + Send + Sync>;

/// A wrapper schema's default: a literal value or a producer consulted at
/// substitution time.
///
/// Producers receive the dataset being validated and the resolved config.
/// They are infallible; a default that needs validation simply flows
/// through the wrapped schema like any other value.
#[derive(Clone)]
pub enum DefaultValue {
    /// A literal default value.
    Value(Value),
    /// A producer invoked each time the sentinel is substituted.
    Producer(Arc<dyn Fn(&Dataset, &Config) -> Value + Send + Sync>),
}

impl DefaultValue {
    /// Creates a producer default from a closure.
    ///
    /// # Example
    ///
    /// ```rust
    /// use gauntlet::{parse, DefaultValue, Schema};
    /// use serde_json::json;
    ///
    /// let schema = Schema::nullable_or(
    ///     Schema::number(),
    ///     DefaultValue::producer(|_, _| json!(0)),
    /// );
    /// assert_eq!(parse(&schema, json!(null)).unwrap(), json!(0));
    /// ```
    pub fn producer(f: impl Fn(&Dataset, &Config) -> Value + Send + Sync + 'static) -> Self {
        DefaultValue::Producer(Arc::new(f))
    }

    pub(crate) fn produce(&self, dataset: &Dataset, config: &Config) -> Value {
        match self {
            DefaultValue::Value(value) => value.clone(),
            DefaultValue::Producer(producer) => producer(dataset, config),
        }
    }
}

impl From<Value> for DefaultValue {
    fn from(value: Value) -> Self {
        DefaultValue::Value(value)
    }
}

/// The closed set of schema kinds.
#[derive(Clone)]
pub(crate) enum SchemaKind {
    Boolean,
    Number,
    String,
    Array {
        item: Arc<Schema>,
    },
    Object {
        entries: IndexMap<String, Arc<Schema>>,
        strict: bool,
    },
    Nullable {
        wrapped: Arc<Schema>,
        default: Option<DefaultValue>,
    },
    Optional {
        wrapped: Arc<Schema>,
        default: Option<DefaultValue>,
    },
    Nullish {
        wrapped: Arc<Schema>,
        default: Option<DefaultValue>,
    },
    Custom {
        check: CheckFn,
    },
    #[cfg(feature = "async")]
    CustomAsync {
        check: AsyncCheckFn,
    },
}

/// An immutable, reusable description of an accepted input shape.
///
/// Wrapped schemas are held behind `Arc`, so one schema may be shared by
/// several wrappers without cloning its structure.
#[derive(Clone)]
pub struct Schema {
    pub(crate) kind: SchemaKind,
    pub(crate) expects: String,
    pub(crate) message: Option<String>,
    pub(crate) pipeline: Vec<Action>,
    pub(crate) is_async: bool,
}

impl Schema {
    fn leaf(kind: SchemaKind, expects: &str) -> Self {
        Self {
            kind,
            expects: expects.to_string(),
            message: None,
            pipeline: Vec::new(),
            is_async: false,
        }
    }

    /// Creates a schema accepting booleans.
    pub fn boolean() -> Self {
        Self::leaf(SchemaKind::Boolean, "boolean")
    }

    /// Creates a schema accepting numbers.
    pub fn number() -> Self {
        Self::leaf(SchemaKind::Number, "number")
    }

    /// Creates a schema accepting strings.
    pub fn string() -> Self {
        Self::leaf(SchemaKind::String, "string")
    }

    /// Creates a schema accepting arrays whose items all satisfy `item`.
    ///
    /// Item failures are reported with index path segments.
    pub fn array(item: impl Into<Arc<Schema>>) -> Self {
        let item = item.into();
        let is_async = item.is_async;
        Self {
            kind: SchemaKind::Array { item },
            expects: "Array".to_string(),
            message: None,
            pipeline: Vec::new(),
            is_async,
        }
    }

    /// Creates a schema accepting objects with the given entries.
    ///
    /// Entries validate in declaration order. Keys not declared here are
    /// dropped from the output; use [`Schema::strict_object`] to reject
    /// them instead. A missing key is an issue unless the entry schema is
    /// an `optional` or `nullish` wrapper.
    pub fn object<K, S, I>(entries: I) -> Self
    where
        K: Into<String>,
        S: Into<Arc<Schema>>,
        I: IntoIterator<Item = (K, S)>,
    {
        Self::object_inner(entries, false)
    }

    /// Creates an object schema that reports undeclared keys as issues.
    pub fn strict_object<K, S, I>(entries: I) -> Self
    where
        K: Into<String>,
        S: Into<Arc<Schema>>,
        I: IntoIterator<Item = (K, S)>,
    {
        Self::object_inner(entries, true)
    }

    fn object_inner<K, S, I>(entries: I, strict: bool) -> Self
    where
        K: Into<String>,
        S: Into<Arc<Schema>>,
        I: IntoIterator<Item = (K, S)>,
    {
        let entries: IndexMap<String, Arc<Schema>> = entries
            .into_iter()
            .map(|(key, schema)| (key.into(), schema.into()))
            .collect();
        let is_async = entries.values().any(|schema| schema.is_async);
        Self {
            kind: SchemaKind::Object { entries, strict },
            expects: "Object".to_string(),
            message: None,
            pipeline: Vec::new(),
            is_async,
        }
    }

    /// Creates a wrapper accepting `null` in addition to the wrapped shape.
    ///
    /// `null` is an accepted terminal state: it short-circuits to success
    /// without consulting the wrapped schema.
    pub fn nullable(wrapped: impl Into<Arc<Schema>>) -> Self {
        Self::wrapper(wrapped.into(), None, WrapperSentinel::Null)
    }

    /// Creates a nullable wrapper that substitutes a default for `null`.
    ///
    /// The substituted value flows through the wrapped schema; a default of
    /// `null` short-circuits to success.
    pub fn nullable_or(
        wrapped: impl Into<Arc<Schema>>,
        default: impl Into<DefaultValue>,
    ) -> Self {
        Self::wrapper(wrapped.into(), Some(default.into()), WrapperSentinel::Null)
    }

    /// Creates a wrapper accepting a missing object key in addition to the
    /// wrapped shape.
    ///
    /// The sentinel only exists inside object schemas; validated against a
    /// present value, the wrapper simply delegates.
    pub fn optional(wrapped: impl Into<Arc<Schema>>) -> Self {
        Self::wrapper(wrapped.into(), None, WrapperSentinel::Missing)
    }

    /// Creates an optional wrapper that substitutes a default for a missing
    /// key.
    pub fn optional_or(
        wrapped: impl Into<Arc<Schema>>,
        default: impl Into<DefaultValue>,
    ) -> Self {
        Self::wrapper(
            wrapped.into(),
            Some(default.into()),
            WrapperSentinel::Missing,
        )
    }

    /// Creates a wrapper accepting both `null` and a missing key.
    pub fn nullish(wrapped: impl Into<Arc<Schema>>) -> Self {
        Self::wrapper(wrapped.into(), None, WrapperSentinel::NullOrMissing)
    }

    /// Creates a nullish wrapper with a default for either sentinel.
    pub fn nullish_or(
        wrapped: impl Into<Arc<Schema>>,
        default: impl Into<DefaultValue>,
    ) -> Self {
        Self::wrapper(
            wrapped.into(),
            Some(default.into()),
            WrapperSentinel::NullOrMissing,
        )
    }

    fn wrapper(
        wrapped: Arc<Schema>,
        default: Option<DefaultValue>,
        sentinel: WrapperSentinel,
    ) -> Self {
        let expects = match sentinel {
            WrapperSentinel::Null => format!("({} | null)", wrapped.expects),
            WrapperSentinel::Missing => format!("({} | missing)", wrapped.expects),
            WrapperSentinel::NullOrMissing => {
                format!("({} | null | missing)", wrapped.expects)
            }
        };
        let is_async = wrapped.is_async;
        let kind = match sentinel {
            WrapperSentinel::Null => SchemaKind::Nullable { wrapped, default },
            WrapperSentinel::Missing => SchemaKind::Optional { wrapped, default },
            WrapperSentinel::NullOrMissing => SchemaKind::Nullish { wrapped, default },
        };
        Self {
            kind,
            expects,
            message: None,
            pipeline: Vec::new(),
            is_async,
        }
    }

    /// Creates a schema from an arbitrary type check.
    ///
    /// The schema accepts any input shape (`expects` is `unknown`) and
    /// marks the dataset typed before invoking the predicate; a false
    /// return appends a schema-kind issue. The predicate is the entire
    /// check: no pipeline runs on this schema kind.
    ///
    /// # Example
    ///
    /// ```rust
    /// use gauntlet::{parse, Schema};
    /// use serde_json::json;
    ///
    /// let even = Schema::custom(|value| {
    ///     value.as_i64().is_some_and(|n| n % 2 == 0)
    /// });
    /// assert!(parse(&even, json!(4)).is_ok());
    /// assert!(parse(&even, json!(5)).is_err());
    /// ```
    pub fn custom(check: impl Fn(&Value) -> bool + Send + Sync + 'static) -> Self {
        Self {
            kind: SchemaKind::Custom {
                check: Arc::new(check),
            },
            expects: "unknown".to_string(),
            message: None,
            pipeline: Vec::new(),
            is_async: false,
        }
    }

    /// Creates a schema from a suspendable type check.
    ///
    /// Marks the whole composition async: every wrapper enclosing this
    /// schema reports `is_async()` and must be driven through
    /// [`Schema::validate_async`]. The future cannot borrow the checked
    /// value; clone what the check needs before suspending.
    #[cfg(feature = "async")]
    pub fn custom_async<F, Fut>(check: F) -> Self
    where
        F: Fn(&Value) -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = bool> + Send + 'static,
    {
        let check: AsyncCheckFn =
            Arc::new(move |value: &Value| Box::pin(check(value)) as BoxCheckFuture);
        Self {
            kind: SchemaKind::CustomAsync { check },
            expects: "unknown".to_string(),
            message: None,
            pipeline: Vec::new(),
            is_async: true,
        }
    }

    /// Appends a validation action to this schema's pipeline.
    ///
    /// Actions run in the order they were attached, after the base type is
    /// confirmed. Pipelines belong to base type schemas: a wrapper returns
    /// its wrapped schema's dataset untouched and a custom schema's
    /// predicate is the entire check, so attach actions before wrapping.
    pub fn check(mut self, action: Action) -> Self {
        self.pipeline.push(action);
        self
    }

    /// Sets a custom message for this schema's own type check.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// The discriminator naming this schema in issues (e.g. `nullable`).
    pub fn type_name(&self) -> &'static str {
        match &self.kind {
            SchemaKind::Boolean => "boolean",
            SchemaKind::Number => "number",
            SchemaKind::String => "string",
            SchemaKind::Array { .. } => "array",
            SchemaKind::Object { strict: false, .. } => "object",
            SchemaKind::Object { strict: true, .. } => "strict_object",
            SchemaKind::Nullable { .. } => "nullable",
            SchemaKind::Optional { .. } => "optional",
            SchemaKind::Nullish { .. } => "nullish",
            SchemaKind::Custom { .. } => "custom",
            #[cfg(feature = "async")]
            SchemaKind::CustomAsync { .. } => "custom",
        }
    }

    /// Human-readable description of the accepted shape.
    pub fn expects(&self) -> &str {
        &self.expects
    }

    /// True if this composition contains a suspendable check anywhere.
    ///
    /// Async-ness is contagious upward and precomputed at construction, so
    /// callers can pick the execution path without probing behavior.
    pub fn is_async(&self) -> bool {
        self.is_async
    }

    /// Validates an input value on the blocking path.
    ///
    /// Returns the run's dataset: the (possibly substituted) output value,
    /// the typed flag, and every issue collected under `config`. Rejects
    /// schemas that declare suspendable checks.
    ///
    /// # Errors
    ///
    /// Returns [`AsyncSchemaError`] when [`Schema::is_async`] is true.
    pub fn validate(&self, input: Value, config: &Config) -> Result<Dataset, AsyncSchemaError> {
        if self.is_async {
            return Err(AsyncSchemaError);
        }
        let mut dataset = Dataset::new(input);
        run::run_schema(self, &mut dataset, config);
        Ok(dataset)
    }

    /// Validates an input value on the suspendable path.
    ///
    /// Identical semantics to [`Schema::validate`]; compositions without
    /// suspendable checks take the blocking walker internally.
    #[cfg(feature = "async")]
    pub async fn validate_async(&self, input: Value, config: &Config) -> Dataset {
        let mut dataset = Dataset::new(input);
        async_run::run_schema_async(self, &mut dataset, config).await;
        dataset
    }
}

/// Which sentinel values a wrapper intercepts.
enum WrapperSentinel {
    Null,
    Missing,
    NullOrMissing,
}

// Schemas are shared read-only across concurrent runs.
const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<Schema>();
    assert_sync::<Schema>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::min_length;
    use serde_json::json;

    #[test]
    fn test_leaf_type_names_and_expects() {
        assert_eq!(Schema::boolean().type_name(), "boolean");
        assert_eq!(Schema::number().type_name(), "number");
        assert_eq!(Schema::string().type_name(), "string");
        assert_eq!(Schema::string().expects(), "string");
        assert_eq!(Schema::array(Schema::string()).expects(), "Array");
        assert_eq!(Schema::object([("a", Schema::string())]).expects(), "Object");
        assert_eq!(
            Schema::strict_object([("a", Schema::string())]).type_name(),
            "strict_object"
        );
    }

    #[test]
    fn test_wrapper_expects_composition() {
        let schema = Schema::nullable(Schema::string());
        assert_eq!(schema.expects(), "(string | null)");
        assert_eq!(schema.type_name(), "nullable");

        let schema = Schema::optional(Schema::number());
        assert_eq!(schema.expects(), "(number | missing)");

        let schema = Schema::nullish(Schema::boolean());
        assert_eq!(schema.expects(), "(boolean | null | missing)");

        let schema = Schema::nullable(Schema::nullable(Schema::string()));
        assert_eq!(schema.expects(), "((string | null) | null)");
    }

    #[test]
    fn test_custom_expects_unknown() {
        let schema = Schema::custom(|_| true);
        assert_eq!(schema.expects(), "unknown");
        assert_eq!(schema.type_name(), "custom");
        assert!(!schema.is_async());
    }

    #[test]
    fn test_wrapped_schema_can_be_shared() {
        let inner = Arc::new(Schema::string().check(min_length(1)));
        let a = Schema::nullable(Arc::clone(&inner));
        let b = Schema::optional(inner);

        let config = Config::default();
        assert!(a.validate(json!("x"), &config).unwrap().is_valid());
        assert!(b.validate(json!("x"), &config).unwrap().is_valid());
    }

    #[test]
    fn test_sync_composition_stays_sync() {
        let schema = Schema::nullable(Schema::array(Schema::object([(
            "name",
            Schema::string(),
        )])));
        assert!(!schema.is_async());
        assert!(schema.validate(json!(null), &Config::default()).is_ok());
    }

    #[cfg(feature = "async")]
    #[test]
    fn test_async_flag_is_contagious() {
        let leaf = Schema::custom_async(|_| async { true });
        assert!(leaf.is_async());

        let wrapped = Schema::nullable(leaf);
        assert!(wrapped.is_async());

        let object = Schema::object([("field", wrapped)]);
        assert!(object.is_async());

        let array = Schema::array(object);
        assert!(array.is_async());
    }

    #[cfg(feature = "async")]
    #[test]
    fn test_sync_validate_rejects_async_schema() {
        let schema = Schema::custom_async(|_| async { true });
        assert!(schema.validate(json!(1), &Config::default()).is_err());
    }
}
