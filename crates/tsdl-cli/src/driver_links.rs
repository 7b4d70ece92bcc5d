//! Link data: reflection mapping of a documentation project and lookups
//! against a persisted mapping.

use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;
use tsdl_links::{
    CrossReferenceResolver, HostApi, ReferenceDescriptor, ResolveResult, ResolverOptions,
};
use tsdl_reflect::{
    CompatDataset, DefaultThemeUrls, ExternalMap, ProjectTree, SavedMapping, resolve_reflections,
};

use crate::args::{LinksArgs, ResolveArgs};

pub fn run_links(args: &LinksArgs) -> Result<SavedMapping> {
    let json = std::fs::read_to_string(&args.project)
        .with_context(|| format!("failed to read project {}", args.project.display()))?;
    let tree = ProjectTree::from_json(&json)
        .with_context(|| format!("failed to load project {}", args.project.display()))?;
    let dataset = match &args.compat {
        Some(path) => load_dataset(path)?,
        None => CompatDataset::default(),
    };

    let urls = DefaultThemeUrls::new(&tree);
    let maps = resolve_reflections(&tree, &urls, &dataset);
    let linked = maps.internal.values().filter(|entry| entry.has_links).count();
    info!(
        reflections = maps.internal.len(),
        linked,
        names = maps.external.len(),
        "reflection maps resolved"
    );
    Ok(maps.external.save(&args.out)?)
}

fn load_dataset(path: &Path) -> Result<CompatDataset> {
    CompatDataset::load(path)
        .with_context(|| format!("failed to load compatibility data {}", path.display()))
}

fn build_resolver(args: &ResolveArgs) -> Result<CrossReferenceResolver> {
    if let Some(path) = &args.mapping {
        let mapping = ExternalMap::load(path)?;
        let api = HostApi::detect(&args.host_version)?;
        return Ok(CrossReferenceResolver::from_parts(mapping, args.host.clone(), api));
    }
    let mut options = ResolverOptions::new(args.data_dir.clone().unwrap_or_else(|| "data".into()))
        .host(args.host.clone());
    options.year = args.year;
    options.lib = args.lib.clone();
    Ok(CrossReferenceResolver::new(&options, &args.host_version)?)
}

/// Resolve each name; the resolver's miss count is returned alongside.
pub fn run_resolve(args: &ResolveArgs) -> Result<(Vec<(String, Option<ResolveResult>)>, usize)> {
    let mut resolver = build_resolver(args)?;
    let results = args
        .names
        .iter()
        .map(|name| {
            let reference = match &args.module {
                Some(module) => ReferenceDescriptor::from_module(module, name),
                None => ReferenceDescriptor::global(name),
            };
            (name.clone(), resolver.resolve(&reference))
        })
        .collect();
    Ok((results, resolver.misses()))
}
