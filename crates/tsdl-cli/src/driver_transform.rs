//! Transform step: parse the processed files of an entry, merge their
//! declarations and write one file per symbol plus the entry bundle.

use anyhow::{Context, Result, bail};
use std::fs;
use std::path::PathBuf;
use tracing::{info, instrument, warn};
use tsdl_merge::{MergeConfig, build_symbol_table, bundle, merge_table};
use tsdl_parser::SourceSet;

use crate::config::{EntryConfig, GenerateConfig};
use crate::driver_process::process_entry;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformSummary {
    pub entry: String,
    pub units: usize,
    pub skipped: usize,
    pub transformed_dir: PathBuf,
    pub bundle_path: PathBuf,
    /// Per-kind symbol listing of the entry.
    pub overview: String,
}

/// Transform the `selected` entries, or all of them when empty.
pub fn run_transform(config: &GenerateConfig, selected: &[String]) -> Result<Vec<TransformSummary>> {
    for name in selected {
        if config.entry(name).is_none() {
            bail!("no entry named `{name}` in the config");
        }
    }
    config
        .entries
        .iter()
        .filter(|entry| selected.is_empty() || selected.contains(&entry.name))
        .map(|entry| transform_entry(config, entry))
        .collect()
}

#[instrument(skip_all, fields(entry = %entry.name))]
pub fn transform_entry(config: &GenerateConfig, entry: &EntryConfig) -> Result<TransformSummary> {
    let processed = process_entry(config, entry)?;

    let mut sources = SourceSet::new();
    for file in &processed {
        sources
            .add_source(&file.name, &file.text)
            .with_context(|| format!("entry `{}`: failed to parse {}", entry.name, file.name))?;
    }

    let merge_config = MergeConfig::new(entry.transform.filenames.iter().cloned())
        .with_overrides(entry.transform.merge_override.iter().cloned());
    let table = build_symbol_table(&sources, &merge_config)
        .with_context(|| format!("entry `{}`", entry.name))?;
    let overview = table.overview();
    let report = merge_table(&sources, &table);
    for skipped in &report.skipped {
        warn!(entry = %entry.name, "{skipped}");
    }

    let out_dir = config.out_dir();
    let transformed_dir = out_dir.join("transformed").join(&entry.name);
    if transformed_dir.exists() {
        fs::remove_dir_all(&transformed_dir)
            .with_context(|| format!("failed to clear {}", transformed_dir.display()))?;
    }
    fs::create_dir_all(&transformed_dir)
        .with_context(|| format!("failed to create {}", transformed_dir.display()))?;
    for unit in &report.units {
        let path = transformed_dir.join(unit.file_name());
        fs::write(&path, unit.render())
            .with_context(|| format!("failed to write {}", path.display()))?;
    }

    let bundled_dir = out_dir.join("bundled");
    fs::create_dir_all(&bundled_dir)
        .with_context(|| format!("failed to create {}", bundled_dir.display()))?;
    let bundle_path = bundled_dir.join(format!("index-{}.d.ts", entry.name));
    fs::write(&bundle_path, bundle(&report.units))
        .with_context(|| format!("failed to write {}", bundle_path.display()))?;

    info!(
        units = report.units.len(),
        skipped = report.skipped.len(),
        bundle = %bundle_path.display(),
        "entry transformed"
    );
    Ok(TransformSummary {
        entry: entry.name.clone(),
        units: report.units.len(),
        skipped: report.skipped.len(),
        transformed_dir,
        bundle_path,
        overview,
    })
}
