//! Resolution of references the documentation host could not resolve
//! itself, against the reflection mapping of an earlier build.

use std::path::{Path, PathBuf};

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use tsdl_reflect::{ExternalMap, MAPPING_FILE};

use crate::error::LinksError;
use crate::host::HostApi;

/// Where name resolution of a reference started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResolutionStart {
    Global,
    Local,
}

/// An unresolved reference as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceDescriptor {
    /// Package the reference was imported from, if any.
    #[serde(default)]
    pub module_source: Option<String>,
    pub resolution_start: ResolutionStart,
    /// Name segments, outermost first.
    pub symbol_path: Vec<String>,
}

impl ReferenceDescriptor {
    /// A script-scope reference such as `Array.prototype.map`.
    pub fn global(dotted: &str) -> Self {
        Self {
            module_source: None,
            resolution_start: ResolutionStart::Global,
            symbol_path: dotted.split('.').map(str::to_string).collect(),
        }
    }

    /// A reference imported from `module`.
    pub fn from_module(module: &str, dotted: &str) -> Self {
        Self {
            module_source: Some(module.to_string()),
            resolution_start: ResolutionStart::Local,
            symbol_path: dotted.split('.').map(str::to_string).collect(),
        }
    }

    /// References into the TypeScript lib: imported from `typescript`, or
    /// unqualified globals.
    pub fn is_eligible(&self) -> bool {
        match self.module_source.as_deref() {
            Some(source) => source == "typescript",
            None => self.resolution_start == ResolutionStart::Global,
        }
    }

    pub fn name(&self) -> String {
        self.symbol_path.join(".")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ResolveResult {
    Url(String),
    Link { target: String, caption: String },
}

/// Where to find the mapping and how to address the published docs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolverOptions {
    pub year: Option<u32>,
    pub lib: Option<String>,
    /// Root URL of the published documentation.
    pub host: Option<String>,
    /// Directory holding `<year>/<lib>/reflection-mapping.json`.
    #[serde(default)]
    pub data_dir: PathBuf,
}

impl ResolverOptions {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }

    pub fn year(mut self, year: u32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn lib(mut self, lib: impl Into<String>) -> Self {
        self.lib = Some(lib.into());
        self
    }

    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn mapping_path(&self) -> Result<PathBuf, LinksError> {
        let year = self.year.ok_or(LinksError::MissingOption("year"))?;
        let lib = self.lib.as_deref().ok_or(LinksError::MissingOption("lib"))?;
        Ok(self
            .data_dir
            .join(year.to_string())
            .join(lib)
            .join(MAPPING_FILE))
    }
}

#[derive(Debug)]
pub struct CrossReferenceResolver {
    mapping: ExternalMap,
    host: String,
    api: HostApi,
    failed: FxHashSet<String>,
}

impl CrossReferenceResolver {
    /// Validate `options`, load the mapping once and fix the host's return
    /// convention from `host_version`.
    pub fn new(options: &ResolverOptions, host_version: &str) -> Result<Self, LinksError> {
        let path = options.mapping_path()?;
        let host = options.host.clone().ok_or(LinksError::MissingOption("host"))?;
        let api = HostApi::detect(host_version)?;
        let mapping = load_mapping(&path)?;
        info!(path = %path.display(), entries = mapping.len(), ?api, "url mapping loaded");
        Ok(Self::from_parts(mapping, host, api))
    }

    pub fn from_parts(mapping: ExternalMap, host: impl Into<String>, api: HostApi) -> Self {
        Self {
            mapping,
            host: host.into(),
            api,
            failed: FxHashSet::default(),
        }
    }

    pub fn api(&self) -> HostApi {
        self.api
    }

    /// Resolve one reference. Misses are logged once per distinct name.
    pub fn resolve(&mut self, reference: &ReferenceDescriptor) -> Option<ResolveResult> {
        if !reference.is_eligible() {
            return None;
        }
        let name = reference.name();
        if name.is_empty() {
            return None;
        }

        let Some(entry) = self.mapping.get(&name) else {
            if !self.failed.contains(&name) {
                debug!(%name, "failed to resolve type");
                self.failed.insert(name);
            }
            return None;
        };

        Some(match self.api {
            HostApi::PlainString => ResolveResult::Url(entry.doc_url.clone()),
            HostApi::Structured => ResolveResult::Link {
                target: format!("{}/{}", self.host, entry.doc_url),
                caption: name,
            },
        })
    }

    /// Number of distinct names that failed to resolve so far.
    pub fn misses(&self) -> usize {
        self.failed.len()
    }

    /// Names that failed to resolve, sorted.
    pub fn missed_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.failed.iter().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

fn load_mapping(path: &Path) -> Result<ExternalMap, LinksError> {
    ExternalMap::load(path).map_err(|source| LinksError::MappingUnreadable {
        path: path.to_path_buf(),
        source,
    })
}
