//! Persistence of the external map for the cross-reference resolver.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::ReflectError;
use crate::maps::ExternalMap;

pub const MAPPING_FILE: &str = "reflection-mapping.json";
pub const NAMES_FILE: &str = "reflection-names.json";

/// Files written by `ExternalMap::save`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedMapping {
    pub mapping: PathBuf,
    pub names: PathBuf,
}

impl ExternalMap {
    /// Write the map and its key list into `dir`, creating it if needed.
    pub fn save(&self, dir: &Path) -> Result<SavedMapping, ReflectError> {
        fs::create_dir_all(dir).map_err(|e| ReflectError::io(dir, e))?;

        let mapping = dir.join(MAPPING_FILE);
        let json = serde_json::to_string(self).map_err(|source| ReflectError::MappingJson {
            path: mapping.clone(),
            source,
        })?;
        fs::write(&mapping, json).map_err(|e| ReflectError::io(&mapping, e))?;

        let names = dir.join(NAMES_FILE);
        let list: Vec<&str> = self.names().collect();
        let json = serde_json::to_string(&list).map_err(|source| ReflectError::MappingJson {
            path: names.clone(),
            source,
        })?;
        fs::write(&names, json).map_err(|e| ReflectError::io(&names, e))?;

        info!(dir = %dir.display(), entries = self.len(), "reflection mapping written");
        Ok(SavedMapping { mapping, names })
    }

    pub fn load(path: &Path) -> Result<Self, ReflectError> {
        let text = fs::read_to_string(path).map_err(|e| ReflectError::io(path, e))?;
        serde_json::from_str(&text).map_err(|source| ReflectError::MappingJson {
            path: path.to_path_buf(),
            source,
        })
    }
}
