//! Integration tests for the cross-reference resolver

use std::path::Path;

use tsdl_links::{
    CrossReferenceResolver, HostApi, LinksError, ReferenceDescriptor, ResolveResult, ResolverOptions,
};
use tsdl_reflect::{ExternalEntry, ExternalMap, ReflectionKind};

const HOST: &str = "https://typhonjs-typedoc.github.io/ts-lib-docs/2024/dom";

fn mapping() -> ExternalMap {
    let mut map = ExternalMap::new();
    map.insert("Array", ExternalEntry::new("interfaces/Array.html", ReflectionKind::Interface));
    map.insert(
        "Intl.Collator",
        ExternalEntry::new("interfaces/Intl.Collator.html", ReflectionKind::Interface),
    );
    map
}

fn write_mapping(data_dir: &Path) {
    mapping().save(&data_dir.join("2024").join("dom")).unwrap();
}

fn options(data_dir: &Path) -> ResolverOptions {
    ResolverOptions::new(data_dir).year(2024).lib("dom").host(HOST)
}

#[test]
fn test_structured_results_for_newer_hosts() {
    let dir = tempfile::tempdir().unwrap();
    write_mapping(dir.path());
    let mut resolver = CrossReferenceResolver::new(&options(dir.path()), "0.25.4").unwrap();
    assert_eq!(resolver.api(), HostApi::Structured);

    let result = resolver.resolve(&ReferenceDescriptor::global("Intl.Collator"));
    assert_eq!(
        result,
        Some(ResolveResult::Link {
            target: format!("{HOST}/interfaces/Intl.Collator.html"),
            caption: "Intl.Collator".to_string(),
        })
    );
    let json = serde_json::to_value(result.unwrap()).unwrap();
    assert_eq!(json["caption"], "Intl.Collator");
}

#[test]
fn test_plain_results_for_older_hosts() {
    let dir = tempfile::tempdir().unwrap();
    write_mapping(dir.path());
    let mut resolver = CrossReferenceResolver::new(&options(dir.path()), "0.23.10").unwrap();

    let result = resolver.resolve(&ReferenceDescriptor::from_module("typescript", "Array"));
    assert_eq!(result, Some(ResolveResult::Url("interfaces/Array.html".to_string())));
    assert_eq!(serde_json::to_value(result.unwrap()).unwrap(), "interfaces/Array.html");
}

#[test]
fn test_misses_are_counted_once_per_name() {
    let mut resolver = CrossReferenceResolver::from_parts(mapping(), HOST, HostApi::Structured);
    let map_ref = ReferenceDescriptor::global("Array.prototype.map");
    for _ in 0..3 {
        assert_eq!(resolver.resolve(&map_ref), None);
    }
    assert_eq!(resolver.misses(), 1);

    assert_eq!(resolver.resolve(&ReferenceDescriptor::global("Iterable")), None);
    assert_eq!(resolver.missed_names(), vec!["Array.prototype.map", "Iterable"]);
}

#[test]
fn test_ineligible_and_empty_references_are_ignored() {
    let mut resolver = CrossReferenceResolver::from_parts(mapping(), HOST, HostApi::PlainString);
    assert_eq!(resolver.resolve(&ReferenceDescriptor::from_module("lit", "Array")), None);

    let empty = ReferenceDescriptor {
        module_source: None,
        resolution_start: tsdl_links::ResolutionStart::Global,
        symbol_path: Vec::new(),
    };
    assert_eq!(resolver.resolve(&empty), None);
    assert_eq!(resolver.misses(), 0);
}

#[test]
fn test_repeated_runs_agree() {
    let queries = ["Array", "Array.prototype.map", "Intl.Collator", "Array.prototype.map", "Nope"];
    let run = || {
        let mut resolver = CrossReferenceResolver::from_parts(mapping(), HOST, HostApi::Structured);
        let results: Vec<_> = queries
            .iter()
            .map(|name| resolver.resolve(&ReferenceDescriptor::global(name)))
            .collect();
        (results, resolver.misses())
    };
    assert_eq!(run(), run());
}

#[test]
fn test_unreadable_mapping_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let err = CrossReferenceResolver::new(&options(dir.path()), "0.25.0").unwrap_err();
    assert!(matches!(err, LinksError::MappingUnreadable { .. }));
    assert!(err.to_string().starts_with("could not open url mapping file at"));
}

#[test]
fn test_descriptor_deserializes_from_host_shape() {
    let reference: ReferenceDescriptor = serde_json::from_str(
        r#"{"moduleSource": "typescript", "resolutionStart": "local", "symbolPath": ["Array"]}"#,
    )
    .unwrap();
    assert!(reference.is_eligible());
    assert_eq!(reference.name(), "Array");
}
