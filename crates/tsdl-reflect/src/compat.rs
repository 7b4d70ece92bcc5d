//! Third stage: attach browser compatibility data.
//!
//! The dataset uses the `@mdn/browser-compat-data` layout. Each symbol is
//! looked up part by part, first under `javascript.builtins`, then under
//! `api`. When the symbol itself has no data its ancestors are tried in
//! chain order.

use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, instrument};

use crate::error::ReflectError;
use crate::inheritance::ParentNode;
use crate::maps::{CompatBlock, InternalEntry, ReflectionMaps, SpecUrl};

/// The `__compat` block of one dataset node.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CompatRecord {
    #[serde(default)]
    pub mdn_url: Option<String>,
    #[serde(default)]
    pub spec_url: Option<SpecUrl>,
    #[serde(default)]
    pub status: Option<CompatBlock>,
    #[serde(default)]
    pub support: Option<CompatBlock>,
}

#[derive(Debug, Clone, Default)]
pub struct CompatDataset {
    root: Value,
}

impl CompatDataset {
    pub fn from_value(root: Value) -> Self {
        Self { root }
    }

    pub fn from_json(json: &str) -> Result<Self, ReflectError> {
        let root = serde_json::from_str(json).map_err(ReflectError::CompatJson)?;
        Ok(Self { root })
    }

    pub fn load(path: &Path) -> Result<Self, ReflectError> {
        let text = std::fs::read_to_string(path).map_err(|e| ReflectError::io(path, e))?;
        Self::from_json(&text)
    }

    /// The subtrees searched, in priority order.
    fn sources(&self) -> impl Iterator<Item = &Value> {
        [self.root.pointer("/javascript/builtins"), self.root.get("api")]
            .into_iter()
            .flatten()
    }

    /// Compatibility data for `parts` or, failing that, the first ancestor
    /// that has some.
    pub fn lookup(&self, parts: &[String], parents: &[ParentNode]) -> Option<CompatRecord> {
        self.sources()
            .find_map(|subtree| lookup_with_parents(subtree, parts, parents))
    }
}

fn lookup_with_parents(subtree: &Value, parts: &[String], parents: &[ParentNode]) -> Option<CompatRecord> {
    if let Some(record) = lookup_path(subtree, parts) {
        return Some(record);
    }
    ParentNode::flatten(parents)
        .into_iter()
        .find_map(|parent| lookup_path(subtree, &parent.parts))
}

/// A node counts only when it carries a well-formed `__compat` block.
fn lookup_path(subtree: &Value, parts: &[String]) -> Option<CompatRecord> {
    if parts.is_empty() {
        return None;
    }
    let mut current = subtree;
    for part in parts {
        current = current.get(part.as_str())?;
    }
    let block = current.get("__compat")?;
    match CompatRecord::deserialize(block) {
        Ok(record) => Some(record),
        Err(err) => {
            debug!(path = %parts.join("."), error = %err, "malformed __compat block");
            None
        }
    }
}

fn apply(entry: &mut InternalEntry, record: &CompatRecord) {
    entry.compat.status = record.status.clone();
    entry.compat.support = record.support.clone();
    entry.links.mdn_url = record.mdn_url.clone();
    entry.links.spec_url = record.spec_url.clone();
    if record.status.is_some() || record.support.is_some() {
        entry.has_compat = true;
    }
    if record.mdn_url.is_some() || record.spec_url.is_some() {
        entry.has_links = true;
    }
}

/// Annotate every internal entry that resolves against `dataset` and
/// backfill the external entry of the same name when it has no MDN or
/// specification link yet.
#[instrument(level = "debug", skip_all)]
pub fn resolve_compat(mut maps: ReflectionMaps, dataset: &CompatDataset) -> ReflectionMaps {
    let ReflectionMaps { external, internal } = &mut maps;
    let mut hits = 0usize;
    for entry in internal.values_mut() {
        let Some(record) = dataset.lookup(&entry.parts, &entry.parents) else {
            continue;
        };
        hits += 1;
        apply(entry, &record);

        if let Some(external_entry) = external.get_mut(&entry.name.to_string()) {
            if !external_entry.has_compat_links() {
                external_entry.mdn_url = record.mdn_url.clone();
                external_entry.spec_url = record.spec_url.clone();
            }
        }
    }
    info!(hits, total = internal.len(), "compatibility data resolved");
    maps
}
