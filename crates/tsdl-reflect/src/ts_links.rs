//! Fourth stage: link TypeScript's intrinsic string types and utility types
//! to their handbook sections.

use tracing::instrument;

use crate::maps::ReflectionMaps;

const TEMPLATE_LITERAL_URL: &str =
    "https://www.typescriptlang.org/docs/handbook/2/template-literal-types.html#";
const UTILITY_TYPES_URL: &str = "https://www.typescriptlang.org/docs/handbook/utility-types.html#";

const TEMPLATE_LITERAL_TYPES: &[(&str, &str)] = &[
    ("Uppercase", "uppercasestringtype"),
    ("Lowercase", "lowercasestringtype"),
    ("Capitalize", "capitalizestringtype"),
    ("Uncapitalize", "uncapitalizestringtype"),
];

const UTILITY_TYPES: &[(&str, &str)] = &[
    ("Awaited", "awaitedtype"),
    ("Partial", "partialtype"),
    ("Required", "requiredtype"),
    ("Readonly", "readonlytype"),
    ("Record", "recordkeys-type"),
    ("Pick", "picktype-keys"),
    ("Omit", "omittype-keys"),
    ("Exclude", "excludeuniontype-excludedmembers"),
    ("Extract", "extracttype-union"),
    ("NonNullable", "nonnullabletype"),
    ("Parameters", "parameterstype"),
    ("ConstructorParameters", "constructorparameterstype"),
    ("ReturnType", "returntypetype"),
    ("InstanceType", "instancetypetype"),
    ("ThisParameterType", "thisparametertypetype"),
    ("OmitThisParameter", "omitthisparametertype"),
    ("ThisType", "thistypetype"),
];

/// Handbook URL for an exact qualified name.
pub fn handbook_url(name: &str) -> Option<String> {
    let lookup = |table: &[(&'static str, &'static str)]| -> Option<&'static str> {
        table
            .iter()
            .find(|(type_name, _)| *type_name == name)
            .map(|(_, anchor)| *anchor)
    };
    if let Some(anchor) = lookup(TEMPLATE_LITERAL_TYPES) {
        return Some(format!("{TEMPLATE_LITERAL_URL}{anchor}"));
    }
    lookup(UTILITY_TYPES).map(|anchor| format!("{UTILITY_TYPES_URL}{anchor}"))
}

#[instrument(level = "debug", skip_all)]
pub fn resolve_ts_links(mut maps: ReflectionMaps) -> ReflectionMaps {
    let ReflectionMaps { external, internal } = &mut maps;
    for entry in internal.values_mut() {
        let name = entry.name.to_string();
        let Some(url) = handbook_url(&name) else {
            continue;
        };
        entry.has_links = true;
        if let Some(external_entry) = external.get_mut(&name) {
            if external_entry.ts_url.is_none() {
                external_entry.ts_url = Some(url.clone());
            }
        }
        entry.links.ts_url = Some(url);
    }
    maps
}
