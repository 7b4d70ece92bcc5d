//! The two reflection maps: the persisted, name-keyed external map and the
//! per-reflection internal map used while rendering.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tsdl_common::QualifiedName;

use crate::inheritance::ParentNode;
use crate::kind::ReflectionKind;
use crate::project::ReflectionId;

/// A `spec_url` is a single link or a list of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SpecUrl {
    One(String),
    Many(Vec<String>),
}

/// One record of `reflection-mapping.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalEntry {
    pub doc_url: String,
    pub kind: ReflectionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mdn_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec_url: Option<SpecUrl>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ts_url: Option<String>,
}

impl ExternalEntry {
    pub fn new(doc_url: impl Into<String>, kind: ReflectionKind) -> Self {
        Self {
            doc_url: doc_url.into(),
            kind,
            mdn_url: None,
            spec_url: None,
            ts_url: None,
        }
    }

    /// Whether an MDN or specification link is already recorded.
    pub fn has_compat_links(&self) -> bool {
        self.mdn_url.is_some() || self.spec_url.is_some()
    }
}

/// Qualified dotted name to documentation entry, in traversal order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExternalMap {
    entries: IndexMap<String, ExternalEntry>,
}

impl ExternalMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&ExternalEntry> {
        self.entries.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut ExternalEntry> {
        self.entries.get_mut(name)
    }

    pub fn insert(&mut self, name: impl Into<String>, entry: ExternalEntry) -> Option<ExternalEntry> {
        self.entries.insert(name.into(), entry)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ExternalEntry)> {
        self.entries.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

/// A `status` or `support` block of the compatibility data, kept as-is.
pub type CompatBlock = Map<String, Value>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompatInfo {
    pub status: Option<CompatBlock>,
    pub support: Option<CompatBlock>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocLinks {
    pub mdn_url: Option<String>,
    pub spec_url: Option<SpecUrl>,
    pub ts_url: Option<String>,
}

/// Per-reflection data consumed by the page renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct InternalEntry {
    /// Qualified name as declared; the external map key.
    pub name: QualifiedName,
    /// Name parts with Symbol keys in `@@inner` form, for compatibility lookups.
    pub parts: Vec<String>,
    pub is_symbol: bool,
    pub kind: ReflectionKind,
    pub doc_url: String,
    pub parents: Vec<ParentNode>,
    pub has_links: bool,
    pub has_compat: bool,
    pub compat: CompatInfo,
    pub links: DocLinks,
}

#[derive(Debug, Clone, Default)]
pub struct ReflectionMaps {
    pub external: ExternalMap,
    pub internal: IndexMap<ReflectionId, InternalEntry>,
}

impl ReflectionMaps {
    pub fn entry(&self, id: ReflectionId) -> Option<&InternalEntry> {
        self.internal.get(&id)
    }

    /// First internal entry with the given dotted name.
    pub fn entry_named(&self, name: &str) -> Option<&InternalEntry> {
        self.internal
            .values()
            .find(|entry| entry.name.to_string() == name)
    }
}
