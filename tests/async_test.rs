#![cfg(feature = "async")]

use gauntlet::{action, parse_async, Config, ParseError, Schema};
use serde_json::json;

#[tokio::test]
async fn test_async_custom_check_passes() {
    let schema = Schema::custom_async(|value| {
        let is_string = value.is_string();
        async move { is_string }
    });

    let dataset = schema.validate_async(json!("hello"), &Config::default()).await;
    assert!(dataset.is_valid());
}

#[tokio::test]
async fn test_async_custom_check_fails_with_schema_issue() {
    let schema = Schema::custom_async(|_| async { false });

    let dataset = schema.validate_async(json!(1), &Config::default()).await;
    // typed optimistically, failed by the predicate
    assert!(dataset.typed);
    assert!(!dataset.is_valid());

    let issue = &dataset.issues()[0];
    assert_eq!(issue.code, "custom");
    assert_eq!(issue.kind, gauntlet::IssueKind::Schema);
    assert_eq!(issue.expected.as_deref(), Some("unknown"));
}

#[tokio::test]
async fn test_async_check_can_suspend() {
    let schema = Schema::custom_async(|value| {
        let n = value.as_u64();
        async move {
            tokio::task::yield_now().await;
            n.is_some_and(|n| n % 2 == 0)
        }
    });

    assert!(parse_async(&schema, json!(4)).await.is_ok());
    assert!(parse_async(&schema, json!(5)).await.is_err());
}

#[tokio::test]
async fn test_async_wrapper_delegation() {
    let schema = Schema::nullable(Schema::custom_async(|value| {
        let ok = value.is_string();
        async move { ok }
    }));
    assert!(schema.is_async());

    // null short-circuits without suspending
    let dataset = schema.validate_async(json!(null), &Config::default()).await;
    assert!(dataset.is_valid());
    assert_eq!(dataset.value, json!(null));

    let dataset = schema.validate_async(json!("x"), &Config::default()).await;
    assert!(dataset.is_valid());
}

#[tokio::test]
async fn test_async_object_collects_issues_in_order() {
    let even = || {
        Schema::custom_async(|value| {
            let ok = value.as_i64().is_some_and(|n| n % 2 == 0);
            async move { ok }
        })
    };
    let schema = Schema::object([("a", even()), ("b", even()), ("c", even())]);

    let dataset = schema
        .validate_async(json!({"a": 1, "b": 2, "c": 3}), &Config::default())
        .await;
    assert_eq!(dataset.issues().len(), 2);
    assert_eq!(dataset.issues()[0].path.to_string(), "a");
    assert_eq!(dataset.issues()[1].path.to_string(), "c");
}

#[tokio::test]
async fn test_async_array_paths() {
    let schema = Schema::array(Schema::custom_async(|value| {
        let ok = value.is_number();
        async move { ok }
    }));

    let dataset = schema
        .validate_async(json!([1, "x", 3]), &Config::default())
        .await;
    assert_eq!(dataset.issues().len(), 1);
    assert_eq!(dataset.issues()[0].path.to_string(), "[1]");
}

#[tokio::test]
async fn test_sync_subtrees_run_identically_under_async_entry() {
    // parity: a fully synchronous composition behaves the same either way
    let schema = Schema::object([
        ("name", Schema::string().check(action::min_length(1))),
        ("age", Schema::nullable_or(Schema::number(), json!(0))),
    ]);
    assert!(!schema.is_async());
    let config = Config::default();
    let input = json!({"name": "", "age": null});

    let blocking = schema.validate(input.clone(), &config).unwrap();
    let suspendable = schema.validate_async(input, &config).await;
    assert_eq!(blocking, suspendable);
}

#[tokio::test]
async fn test_mixed_composition_sync_parts_stay_inline() {
    let schema = Schema::object([
        ("id", Schema::string()),
        ("verified", Schema::custom_async(|_| async { true })),
    ]);
    assert!(schema.is_async());

    let value = parse_async(&schema, json!({"id": "u1", "verified": true}))
        .await
        .unwrap();
    assert_eq!(value, json!({"id": "u1", "verified": true}));
}

#[tokio::test]
async fn test_blocking_entry_rejects_async_composition() {
    let schema = Schema::array(Schema::custom_async(|_| async { true }));

    assert!(schema.validate(json!([1]), &Config::default()).is_err());
    match gauntlet::parse(&schema, json!([1])) {
        Err(ParseError::AsyncSchema(_)) => {}
        other => panic!("unexpected result: {:?}", other.map(|v| v.to_string())),
    }
}
