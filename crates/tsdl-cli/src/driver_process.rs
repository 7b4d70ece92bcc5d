//! Process step: read each configured declaration file once, run its
//! pre-processing rewrites and keep the files that export something.

use anyhow::{Context, Result, bail};
use regex::Regex;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use tsdl_parser::{
    ExportDeclarations, PreProcess, RegexRewrite, StripTsLibHeaders, has_exports, run_pipeline,
};
use walkdir::WalkDir;

use crate::config::{EntryConfig, FileSource, GenerateConfig, PreProcessConfig};

/// A declaration file after pre-processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedFile {
    /// Name the transform step refers to the file by.
    pub name: String,
    pub text: String,
}

pub fn build_steps(configs: &[PreProcessConfig]) -> Result<Vec<Box<dyn PreProcess>>> {
    configs
        .iter()
        .map(|step| -> Result<Box<dyn PreProcess>> {
            match step {
                PreProcessConfig::Named(name) => match name.as_str() {
                    "ts-lib" => Ok(Box::new(StripTsLibHeaders)),
                    "export-declarations" => Ok(Box::new(ExportDeclarations)),
                    other => bail!("unknown pre-process step `{other}`"),
                },
                PreProcessConfig::Rewrite {
                    pattern,
                    replacement,
                } => {
                    let rewrite = RegexRewrite::new(pattern, replacement.clone())
                        .with_context(|| format!("invalid pre-process pattern `{pattern}`"))?;
                    Ok(Box::new(rewrite))
                }
            }
        })
        .collect()
}

/// Expand the configured sources into `(path, name)` pairs. Directory
/// sources are walked and sorted by file name.
pub fn expand_sources(config: &GenerateConfig, sources: &[FileSource]) -> Result<Vec<(PathBuf, String)>> {
    let mut out = Vec::new();
    for source in sources {
        match source {
            FileSource::Path(path) => {
                let path = config.resolve_path(path);
                let name = file_name_of(&path)?;
                out.push((path, name));
            }
            FileSource::Renamed { source, rename } => {
                out.push((config.resolve_path(source), rename.clone()));
            }
            FileSource::Directory { dir, include } => {
                let include = Regex::new(include)
                    .with_context(|| format!("invalid include pattern `{include}`"))?;
                let dir = config.resolve_path(dir);
                let mut found = Vec::new();
                for entry in WalkDir::new(&dir) {
                    let entry = entry.with_context(|| format!("failed to list {}", dir.display()))?;
                    if !entry.file_type().is_file() {
                        continue;
                    }
                    let name = entry.file_name().to_string_lossy().into_owned();
                    if include.is_match(&name) {
                        found.push((entry.into_path(), name));
                    }
                }
                found.sort_by(|a, b| a.1.cmp(&b.1));
                debug!(dir = %dir.display(), files = found.len(), "directory source expanded");
                out.extend(found);
            }
        }
    }
    Ok(out)
}

fn file_name_of(path: &Path) -> Result<String> {
    match path.file_name() {
        Some(name) => Ok(name.to_string_lossy().into_owned()),
        None => bail!("source path {} has no file name", path.display()),
    }
}

/// Run the process step of one entry.
pub fn process_entry(config: &GenerateConfig, entry: &EntryConfig) -> Result<Vec<ProcessedFile>> {
    let mut processed = Vec::new();
    for process in &entry.process {
        let steps = build_steps(&process.pre_process)?;
        for (path, name) in expand_sources(config, &process.filepaths)? {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let text = run_pipeline(&raw, &steps);
            if !has_exports(&text) {
                info!(file = %name, "no exports after pre-processing; skipped");
                continue;
            }
            if processed.iter().any(|file: &ProcessedFile| file.name == name) {
                warn!(file = %name, "processed twice; keeping the later copy");
                processed.retain(|file: &ProcessedFile| file.name != name);
            }
            processed.push(ProcessedFile { name, text });
        }
    }
    info!(entry = %entry.name, files = processed.len(), "process step finished");
    Ok(processed)
}
