//! Integration tests for reflection mapping persistence

use tsdl_reflect::{
    ExternalEntry, ExternalMap, MAPPING_FILE, NAMES_FILE, ReflectError, ReflectionKind, SpecUrl,
};

fn sample_map() -> ExternalMap {
    let mut map = ExternalMap::new();
    let mut array = ExternalEntry::new("interfaces/Array.html", ReflectionKind::Interface);
    array.mdn_url = Some("https://developer.mozilla.org/Array".to_string());
    array.spec_url = Some(SpecUrl::Many(vec!["https://tc39.es/a".to_string(), "https://tc39.es/b".to_string()]));
    map.insert("Array", array);
    map.insert(
        "Array.map",
        ExternalEntry::new("interfaces/Array.html#map", ReflectionKind::Method),
    );
    let mut partial = ExternalEntry::new("types/Partial.html", ReflectionKind::TypeAlias);
    partial.ts_url = Some("https://www.typescriptlang.org/docs/handbook/utility-types.html#partialtype".to_string());
    map.insert("Partial", partial);
    map
}

#[test]
fn test_save_creates_directory_and_both_files() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("data").join("2024").join("dom");
    let saved = sample_map().save(&target).unwrap();

    assert_eq!(saved.mapping, target.join(MAPPING_FILE));
    assert_eq!(saved.names, target.join(NAMES_FILE));

    let names: Vec<String> = serde_json::from_str(&std::fs::read_to_string(&saved.names).unwrap()).unwrap();
    assert_eq!(names, vec!["Array", "Array.map", "Partial"]);

    let raw: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&saved.mapping).unwrap()).unwrap();
    assert_eq!(raw["Array.map"], serde_json::json!({"doc_url": "interfaces/Array.html#map", "kind": 2048}));
    assert_eq!(raw["Array"]["spec_url"][1], "https://tc39.es/b");
}

#[test]
fn test_load_reads_saved_mapping() {
    let dir = tempfile::tempdir().unwrap();
    let map = sample_map();
    let saved = map.save(dir.path()).unwrap();
    let loaded = ExternalMap::load(&saved.mapping).unwrap();
    assert_eq!(loaded, map);
    assert_eq!(loaded.names().collect::<Vec<_>>(), vec!["Array", "Array.map", "Partial"]);
}

#[test]
fn test_load_errors() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join(MAPPING_FILE);
    assert!(matches!(ExternalMap::load(&missing), Err(ReflectError::Io { .. })));

    std::fs::write(&missing, "{\"Array\": {\"doc_url\": 3}}").unwrap();
    assert!(matches!(ExternalMap::load(&missing), Err(ReflectError::MappingJson { .. })));
}
