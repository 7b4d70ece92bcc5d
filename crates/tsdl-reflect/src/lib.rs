//! Reflection maps for generated documentation.
//!
//! The pipeline runs as explicit stages, each taking ownership of the maps
//! produced by the previous one:
//! 1. `build_reflection_maps` - register documented reflections and URLs
//! 2. `attach_inheritance` - resolve `extends` chains
//! 3. `resolve_compat` - browser compatibility data and MDN links
//! 4. `resolve_ts_links` - TypeScript handbook links
//!
//! The external map is then persisted with `ExternalMap::save` for the
//! cross-reference resolver of a later build.

pub mod error;
pub use error::ReflectError;

pub mod kind;
pub use kind::{ReflectionKind, UnknownReflectionKind};

pub mod project;
pub use project::{ProjectTree, Reflection, ReflectionId};

pub mod urls;
pub use urls::{DefaultThemeUrls, UrlMapping};

pub mod maps;
pub use maps::{
    CompatBlock, CompatInfo, DocLinks, ExternalEntry, ExternalMap, InternalEntry, ReflectionMaps,
    SpecUrl,
};

pub mod map_builder;
pub use map_builder::build_reflection_maps;

pub mod inheritance;
pub use inheritance::{ParentNode, attach_inheritance, inheritance_tree};

pub mod compat;
pub use compat::{CompatDataset, CompatRecord, resolve_compat};

pub mod ts_links;
pub use ts_links::{handbook_url, resolve_ts_links};

pub mod mapping_io;
pub use mapping_io::{MAPPING_FILE, NAMES_FILE, SavedMapping};

/// Run every stage over `tree`.
pub fn resolve_reflections(
    tree: &ProjectTree,
    urls: &dyn UrlMapping,
    dataset: &CompatDataset,
) -> ReflectionMaps {
    let maps = build_reflection_maps(tree, urls);
    let maps = attach_inheritance(tree, maps);
    let maps = resolve_compat(maps, dataset);
    resolve_ts_links(maps)
}
