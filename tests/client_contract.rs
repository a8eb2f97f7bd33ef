//! End-to-end contract tests: registry + client over the memory backend.

use depot::{ClientConfig, DataStore, Error, Registry, TypeTag, Value};

fn open(registry: &Registry, name: &str) -> DataStore {
    let (id, backend) = registry.open(name).unwrap();
    DataStore::open(id.to_string(), backend, ClientConfig::default())
}

#[tokio::test]
async fn first_store_of_a_key_is_version_one() {
    let registry = Registry::new();
    let store = open(&registry, "myTestDS");

    let version = store.store("myIntKey", &Value::Int(31337)).await.unwrap();
    assert_eq!(version, 1);

    let restored = store.restore_typed("myIntKey", TypeTag::Int).await.unwrap();
    assert_eq!(restored.value, Value::Int(31337));
    assert_eq!(restored.version, 1);
}

#[tokio::test]
async fn version_monotonicity_per_key() {
    let registry = Registry::new();
    let store = open(&registry, "ds");

    let n = store.store("k", &Value::Str("v1".into())).await.unwrap();
    let next = store.store("k", &Value::Str("v2".into())).await.unwrap();
    assert_eq!(next, n + 1);

    // A different key carries no relative ordering with "k".
    assert_eq!(store.store("other", &Value::Int(0)).await.unwrap(), 1);
}

#[tokio::test]
async fn missing_key_resolves_key_not_found() {
    let registry = Registry::new();
    let store = open(&registry, "ds");

    let err = store.restore("neverWrittenKey").await.unwrap_err();
    assert!(matches!(err, Error::KeyNotFound { key } if key == "neverWrittenKey"));
}

#[tokio::test]
async fn open_is_idempotent_across_handles() {
    let registry = Registry::new();
    let first = open(&registry, "alpha");
    let second = open(&registry, "alpha");

    first.store("shared", &Value::Bool(true)).await.unwrap();

    let entry = second.restore("shared").await.unwrap();
    assert_eq!(entry.json, "true");
    assert_eq!(entry.version, 1);
}

#[tokio::test]
async fn many_stores_open_concurrently_stay_isolated() {
    let registry = Registry::new();
    let alpha = open(&registry, "alpha");
    let beta = open(&registry, "beta");

    alpha.store("k", &Value::Int(1)).await.unwrap();
    beta.store("k", &Value::Int(2)).await.unwrap();

    assert_eq!(alpha.restore("k").await.unwrap().json, "1");
    assert_eq!(beta.restore("k").await.unwrap().json, "2");
}

#[tokio::test]
async fn int_array_scenario_roundtrips() {
    let registry = Registry::new();
    let store = open(&registry, "ds");

    store
        .store("myIntArrayKey", &Value::IntArray(vec![1, -2, 9]))
        .await
        .unwrap();

    let restored = store
        .restore_typed("myIntArrayKey", TypeTag::IntArray)
        .await
        .unwrap();
    assert_eq!(restored.value, Value::IntArray(vec![1, -2, 9]));
    assert_eq!(restored.json, "[1,-2,9]");
}

#[tokio::test]
async fn typed_restore_reports_type_mismatch_but_raw_restore_succeeds() {
    let registry = Registry::new();
    let store = open(&registry, "ds");

    store
        .store("myStringKey", &Value::Str("greatValue".into()))
        .await
        .unwrap();

    let err = store
        .restore_typed("myStringKey", TypeTag::IntArray)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::TypeMismatch { .. }));

    // The type-erased variant never fails on type grounds.
    let entry = store.restore("myStringKey").await.unwrap();
    assert_eq!(entry.json, r#""greatValue""#);
}

#[tokio::test]
async fn writes_from_one_client_apply_in_issue_order() {
    let registry = Registry::new();
    let store = open(&registry, "ds");

    let mut versions = Vec::new();
    for i in 0..16 {
        versions.push(store.store("hot", &Value::Int(i)).await.unwrap());
    }
    let expected: Vec<u64> = (1..=16).collect();
    assert_eq!(versions, expected);
}
