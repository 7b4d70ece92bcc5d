//! Generate config: which declaration files make up each entry and how
//! they are pre-processed and merged.

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

fn default_out_dir() -> PathBuf {
    PathBuf::from(".doc-gen")
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateConfig {
    /// Year of the TypeScript lib snapshot being documented.
    pub year: u32,
    #[serde(default = "default_out_dir")]
    pub out_dir: PathBuf,
    pub entries: Vec<EntryConfig>,
    /// Directory relative paths are resolved against.
    #[serde(skip)]
    pub base_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryConfig {
    pub name: String,
    #[serde(default)]
    pub process: Vec<ProcessConfig>,
    pub transform: TransformConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessConfig {
    pub filepaths: Vec<FileSource>,
    #[serde(default)]
    pub pre_process: Vec<PreProcessConfig>,
}

/// One input of the process step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FileSource {
    /// A file kept under its own name.
    Path(PathBuf),
    /// A file stored under a different name.
    Renamed { source: PathBuf, rename: String },
    /// Every file below `dir` whose name matches the `include` regex.
    Directory { dir: PathBuf, include: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PreProcessConfig {
    /// A built-in step: `ts-lib` or `export-declarations`.
    Named(String),
    Rewrite { pattern: String, replacement: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformConfig {
    /// Processed file names in merge order.
    pub filenames: Vec<String>,
    /// Files whose members replace earlier same-named members.
    #[serde(default)]
    pub merge_override: Vec<String>,
}

impl GenerateConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let mut config = Self::parse(&text)
            .with_context(|| format!("invalid config {}", path.display()))?;
        config.base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Ok(config)
    }

    pub fn parse(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        for entry in &self.entries {
            if entry.transform.filenames.is_empty() {
                bail!("entry `{}`: `transform.filenames` is empty", entry.name);
            }
            for name in &entry.transform.merge_override {
                if !entry.transform.filenames.contains(name) {
                    bail!(
                        "entry `{}`: merge override `{name}` is not listed in `transform.filenames`",
                        entry.name
                    );
                }
            }
        }
        Ok(())
    }

    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    pub fn out_dir(&self) -> PathBuf {
        self.resolve_path(&self.out_dir)
    }

    pub fn entry(&self, name: &str) -> Option<&EntryConfig> {
        self.entries.iter().find(|entry| entry.name == name)
    }
}
