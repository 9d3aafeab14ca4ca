use super::*;

#[test]
fn memory_storage_set_get_remove() {
    let store = MemoryStorage::new();
    assert!(store.is_empty());

    store.set_item("jhmpro_users", "[]");
    assert_eq!(store.get_item("jhmpro_users").as_deref(), Some("[]"));
    assert_eq!(store.len(), 1);

    store.remove_item("jhmpro_users");
    assert_eq!(store.get_item("jhmpro_users"), None);
}

#[test]
fn memory_storage_set_overwrites() {
    let store = MemoryStorage::new();
    store.set_item("k", "a");
    store.set_item("k", "b");
    assert_eq!(store.get_item("k").as_deref(), Some("b"));
    assert_eq!(store.keys(), vec!["k".to_owned()]);
}

#[test]
fn load_json_missing_key_is_none() {
    let store = MemoryStorage::new();
    assert_eq!(load_json::<Vec<u32>>(&store, "nope"), None);
}

#[test]
fn load_json_malformed_is_none() {
    let store = MemoryStorage::new();
    store.set_item("bad", "{not json");
    assert_eq!(load_json::<Vec<u32>>(&store, "bad"), None);
}

#[test]
fn load_json_wrong_shape_is_none() {
    let store = MemoryStorage::new();
    store.set_item("shape", r#"{"a":1}"#);
    assert_eq!(load_json::<Vec<u32>>(&store, "shape"), None);
}

#[test]
fn save_then_load_json() {
    let store = MemoryStorage::new();
    save_json(&store, "nums", &vec![1_u32, 2, 3]);
    assert_eq!(store.get_item("nums").as_deref(), Some("[1,2,3]"));
    assert_eq!(load_json::<Vec<u32>>(&store, "nums"), Some(vec![1, 2, 3]));
}

#[test]
fn remove_prefixed_only_touches_matching_keys() {
    let store = MemoryStorage::new();
    store.set_item("jhmpro_temp_a", "1");
    store.set_item("jhmpro_temp_b", "2");
    store.set_item("jhmpro_users", "[]");
    store.set_item("other_app", "x");

    let removed = remove_prefixed(&store, "jhmpro_temp_");
    assert_eq!(removed, vec!["jhmpro_temp_a".to_owned(), "jhmpro_temp_b".to_owned()]);
    assert_eq!(store.keys(), vec!["jhmpro_users".to_owned(), "other_app".to_owned()]);
}

#[test]
fn remove_prefixed_on_empty_store() {
    let store = MemoryStorage::new();
    assert!(remove_prefixed(&store, "jhmpro_").is_empty());
}
