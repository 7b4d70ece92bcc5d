//! Integration tests for reflection map building

use tsdl_reflect::{
    DefaultThemeUrls, ProjectTree, ReflectionId, ReflectionKind, attach_inheritance, build_reflection_maps,
};

const PROJECT: &str = r#"{
    "id": 0, "name": "lib-dom", "variant": "project", "kind": 1,
    "children": [
        {"id": 10, "name": "Intl", "kind": 4, "children": [
            {"id": 11, "name": "Collator", "kind": 256, "children": [
                {"id": 12, "name": "compare", "kind": 2048}
            ]},
            {"id": 13, "name": "supportedValuesOf", "kind": 64}
        ]},
        {"id": 20, "name": "Node", "kind": 256, "children": [
            {"id": 21, "name": "nodeName", "kind": 1024}
        ]},
        {"id": 30, "name": "Element", "kind": 256,
         "extendedTypes": [{"type": "reference", "target": 20, "name": "Node"}],
         "children": [
            {"id": 31, "name": "[unscopables]", "kind": 1024}
        ]}
    ]
}"#;

#[test]
fn test_qualified_names_extend_their_container() {
    let tree = ProjectTree::from_json(PROJECT).unwrap();
    for id in tree.preorder() {
        let reflection = tree.get(id).unwrap();
        let Some(parent) = reflection.parent else {
            assert!(tree.qualified_name(id).is_empty());
            continue;
        };
        let expected = if parent == tree.root().id {
            reflection.name.clone()
        } else {
            format!("{}.{}", tree.qualified_name(parent), reflection.name)
        };
        assert_eq!(tree.qualified_name(id).to_string(), expected);
    }
}

#[test]
fn test_default_theme_urls_for_nested_reflections() {
    let tree = ProjectTree::from_json(PROJECT).unwrap();
    let urls = DefaultThemeUrls::new(&tree);
    let maps = build_reflection_maps(&tree, &urls);

    let doc_url = |name: &str| maps.external.get(name).map(|entry| entry.doc_url.as_str());
    assert_eq!(doc_url("Intl"), Some("modules/Intl.html"));
    assert_eq!(doc_url("Intl.Collator"), Some("interfaces/Intl.Collator.html"));
    assert_eq!(doc_url("Intl.Collator.compare"), Some("interfaces/Intl.Collator.html#compare"));
    assert_eq!(doc_url("Intl.supportedValuesOf"), Some("functions/Intl.supportedValuesOf.html"));
    assert_eq!(doc_url("Node.nodeName"), Some("interfaces/Node.html#nodename"));
    assert_eq!(maps.external.get("Node").unwrap().kind, ReflectionKind::Interface);
}

#[test]
fn test_symbol_parts_are_normalized_once() {
    let tree = ProjectTree::from_json(PROJECT).unwrap();
    let urls = DefaultThemeUrls::new(&tree);
    let maps = build_reflection_maps(&tree, &urls);

    let entry = maps.entry(ReflectionId(31)).unwrap();
    assert!(entry.is_symbol);
    assert_eq!(entry.parts, vec!["Element", "@@unscopables"]);
    assert_eq!(entry.doc_url, "interfaces/Element.html#_unscopables_");
    assert!(maps.external.get("Element.[unscopables]").is_none());
    assert!(maps.external.get("Element.@@unscopables").is_none());
}

fn interface_and_function(interface_first: bool) -> ProjectTree {
    let mut tree = ProjectTree::new("es5");
    let root = tree.root().id;
    if interface_first {
        tree.add_child(root, "Array", ReflectionKind::Interface).unwrap();
        tree.add_child(root, "Array", ReflectionKind::Variable).unwrap();
        tree.add_child(root, "Array", ReflectionKind::Function).unwrap();
    } else {
        tree.add_child(root, "Array", ReflectionKind::Function).unwrap();
        tree.add_child(root, "Array", ReflectionKind::Variable).unwrap();
        tree.add_child(root, "Array", ReflectionKind::Interface).unwrap();
    }
    tree
}

#[test]
fn test_interface_keeps_external_entry_in_either_order() {
    for interface_first in [true, false] {
        let tree = interface_and_function(interface_first);
        let urls = DefaultThemeUrls::new(&tree);
        let maps = build_reflection_maps(&tree, &urls);

        let entry = maps.external.get("Array").unwrap();
        assert_eq!(entry.kind, ReflectionKind::Interface);
        assert!(entry.doc_url.starts_with("interfaces/Array"));
        assert_eq!(maps.external.len(), 1);
        assert_eq!(maps.internal.len(), 3);
    }
}

#[test]
fn test_inheritance_chain_is_attached() {
    let tree = ProjectTree::from_json(PROJECT).unwrap();
    let urls = DefaultThemeUrls::new(&tree);
    let maps = attach_inheritance(&tree, build_reflection_maps(&tree, &urls));

    let element = maps.entry(ReflectionId(30)).unwrap();
    assert_eq!(element.parents.len(), 1);
    assert_eq!(element.parents[0].name, "Node");
    assert_eq!(element.parents[0].parts, vec!["Node"]);

    // Members without their own extends edges are addressed on the ancestor.
    let unscopables = maps.entry(ReflectionId(31)).unwrap();
    assert_eq!(unscopables.parents[0].name, "Node.[unscopables]");
    assert_eq!(unscopables.parents[0].parts, vec!["Node", "@@unscopables"]);

    assert!(maps.entry(ReflectionId(20)).unwrap().parents.is_empty());
    assert!(maps.entry(ReflectionId(12)).unwrap().parents.is_empty());
}
