//! Integration tests for compatibility and handbook link resolution

use rustc_hash::FxHashMap;
use serde_json::json;
use tsdl_reflect::{
    CompatDataset, DefaultThemeUrls, ProjectTree, ReflectionId, ReflectionKind, ReflectionMaps, SpecUrl,
    resolve_reflections,
};

fn dom_tree() -> ProjectTree {
    let mut tree = ProjectTree::new("dom");
    let root = tree.root().id;
    let element = tree.add_child(root, "Element", ReflectionKind::Interface).unwrap();
    tree.add_child(element, "frobnicate", ReflectionKind::Method).unwrap();
    let html = tree.add_child(root, "HTMLElement", ReflectionKind::Interface).unwrap();
    tree.add_child(html, "frobnicate", ReflectionKind::Method).unwrap();
    tree.add_extends(html, element).unwrap();
    let anchor = tree.add_child(root, "HTMLAnchorElement", ReflectionKind::Interface).unwrap();
    tree.add_extends(anchor, html).unwrap();
    tree
}

fn resolve(tree: &ProjectTree, data: serde_json::Value) -> ReflectionMaps {
    let urls = DefaultThemeUrls::new(tree);
    resolve_reflections(tree, &urls, &CompatDataset::from_value(data))
}

fn frobnicate_data() -> serde_json::Value {
    json!({
        "api": {
            "Element": {
                "__compat": {
                    "mdn_url": "https://developer.mozilla.org/docs/Web/API/Element",
                    "spec_url": "https://dom.spec.whatwg.org/#element",
                    "support": {"chrome": {"version_added": "1"}},
                    "status": {"experimental": false, "standard_track": true, "deprecated": false}
                },
                "frobnicate": {
                    "__compat": {
                        "mdn_url": "https://developer.mozilla.org/docs/Web/API/Element/frobnicate",
                        "support": {"firefox": {"version_added": "100"}},
                        "status": {"experimental": true, "standard_track": false, "deprecated": false}
                    }
                }
            }
        }
    })
}

#[test]
fn test_member_falls_back_to_parent_interface() {
    let tree = dom_tree();
    let maps = resolve(&tree, frobnicate_data());

    let entry = maps.entry_named("HTMLElement.frobnicate").unwrap();
    assert!(entry.has_compat);
    assert!(entry.has_links);
    assert_eq!(
        entry.links.mdn_url.as_deref(),
        Some("https://developer.mozilla.org/docs/Web/API/Element/frobnicate")
    );
    assert_eq!(entry.compat.status.as_ref().unwrap()["experimental"], json!(true));

    let external = maps.external.get("HTMLElement.frobnicate").unwrap();
    assert_eq!(external.mdn_url, entry.links.mdn_url);
    assert_eq!(external.spec_url, None);
}

#[test]
fn test_grandparent_data_is_found() {
    let tree = dom_tree();
    let maps = resolve(&tree, frobnicate_data());

    let entry = maps.entry_named("HTMLAnchorElement").unwrap();
    assert_eq!(
        entry.links.spec_url,
        Some(SpecUrl::One("https://dom.spec.whatwg.org/#element".to_string()))
    );
    // HTMLElement itself has data only through Element.
    assert!(maps.entry_named("HTMLElement").unwrap().has_compat);
}

#[test]
fn test_builtins_are_preferred_over_api() {
    let mut tree = ProjectTree::new("es");
    let root = tree.root().id;
    tree.add_child(root, "Array", ReflectionKind::Interface).unwrap();
    let data = json!({
        "javascript": {"builtins": {"Array": {"__compat": {
            "mdn_url": "https://developer.mozilla.org/docs/Web/JavaScript/Reference/Global_Objects/Array",
            "spec_url": ["https://tc39.es/ecma262/#sec-array-objects", "https://tc39.es/ecma262/#sec-array"]
        }}}},
        "api": {"Array": {"__compat": {"mdn_url": "https://example.invalid/api-array"}}}
    });
    let maps = resolve(&tree, data);

    let entry = maps.entry_named("Array").unwrap();
    assert!(entry.has_links);
    assert!(!entry.has_compat);
    assert!(entry.links.mdn_url.as_deref().unwrap().contains("Global_Objects"));
    assert!(matches!(entry.links.spec_url, Some(SpecUrl::Many(ref urls)) if urls.len() == 2));
}

#[test]
fn test_malformed_compat_block_is_a_miss_for_that_symbol_only() {
    let mut tree = ProjectTree::new("es");
    let root = tree.root().id;
    let array = tree.add_child(root, "Array", ReflectionKind::Interface).unwrap();
    tree.add_child(array, "at", ReflectionKind::Method).unwrap();
    tree.add_child(array, "map", ReflectionKind::Method).unwrap();
    let data = json!({
        "javascript": {"builtins": {"Array": {
            "at": {"__compat": {"status": "broken", "mdn_url": 7}},
            "map": {"__compat": {"mdn_url": "https://developer.mozilla.org/map", "support": {}}}
        }}}
    });
    let maps = resolve(&tree, data);

    let at = maps.entry_named("Array.at").unwrap();
    assert!(!at.has_compat);
    assert!(!at.has_links);
    assert!(maps.external.get("Array.at").unwrap().mdn_url.is_none());

    let map = maps.entry_named("Array.map").unwrap();
    assert!(map.has_compat);
    assert!(map.has_links);

    // The container node has no `__compat` of its own.
    assert!(!maps.entry_named("Array").unwrap().has_links);
}

#[test]
fn test_symbol_members_use_at_at_keys() {
    let mut tree = ProjectTree::new("es");
    let root = tree.root().id;
    let array = tree.add_child(root, "Array", ReflectionKind::Interface).unwrap();
    tree.add_child(array, "[iterator]", ReflectionKind::Method).unwrap();
    let data = json!({
        "javascript": {"builtins": {"Array": {"@@iterator": {"__compat": {
            "mdn_url": "https://developer.mozilla.org/docs/Web/JavaScript/Reference/Global_Objects/Array/@@iterator"
        }}}}}
    });
    let urls: FxHashMap<ReflectionId, String> = FxHashMap::default();
    let maps = resolve_reflections(&tree, &urls, &CompatDataset::from_value(data));

    let entry = maps.entry_named("Array.[iterator]").unwrap();
    assert!(entry.has_links);
    assert!(maps.external.get("Array.[iterator]").is_none());
}

#[test]
fn test_utility_types_get_handbook_links() {
    let mut tree = ProjectTree::new("es5");
    let root = tree.root().id;
    tree.add_child(root, "Partial", ReflectionKind::TypeAlias).unwrap();
    tree.add_child(root, "Uppercase", ReflectionKind::TypeAlias).unwrap();
    tree.add_child(root, "PropertyKey", ReflectionKind::TypeAlias).unwrap();
    let maps = resolve(&tree, json!({}));

    let partial = maps.external.get("Partial").unwrap();
    assert_eq!(
        partial.ts_url.as_deref(),
        Some("https://www.typescriptlang.org/docs/handbook/utility-types.html#partialtype")
    );
    assert!(maps.entry_named("Uppercase").unwrap().has_links);
    assert!(maps.external.get("PropertyKey").unwrap().ts_url.is_none());
    assert!(!maps.entry_named("PropertyKey").unwrap().has_links);
}

#[test]
fn test_unreadable_dataset_is_an_error() {
    assert!(CompatDataset::from_json("{ not json").is_err());
}
