use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for the tsdl binary.
#[derive(Parser, Debug)]
#[command(
    name = "tsdl",
    version,
    about = "Merge TypeScript lib declarations and cross-link their documentation"
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Pre-process, merge and bundle the declaration files of each entry.
    Transform(TransformArgs),
    /// Build the reflection mapping of a documentation project.
    Links(LinksArgs),
    /// Resolve symbol names against a reflection mapping.
    Resolve(ResolveArgs),
}

#[derive(Args, Debug)]
pub struct TransformArgs {
    /// Path to the generate config (JSON).
    #[arg(short = 'c', long)]
    pub config: PathBuf,

    /// Only run these entries. Runs every entry when omitted.
    #[arg(short = 'e', long = "entry")]
    pub entries: Vec<String>,

    /// Print the per-kind symbol overview of each entry.
    #[arg(long)]
    pub overview: bool,
}

#[derive(Args, Debug)]
pub struct LinksArgs {
    /// TypeDoc JSON project of the generated documentation.
    #[arg(short = 'p', long)]
    pub project: PathBuf,

    /// Browser compatibility data (`@mdn/browser-compat-data` data.json).
    #[arg(long)]
    pub compat: Option<PathBuf>,

    /// Directory receiving `reflection-mapping.json` and `reflection-names.json`.
    #[arg(short = 'o', long)]
    pub out: PathBuf,
}

#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Reflection mapping file. Overrides `--data-dir`/`--year`/`--lib`.
    #[arg(long)]
    pub mapping: Option<PathBuf>,

    /// Root of the `<year>/<lib>/reflection-mapping.json` layout.
    #[arg(long = "data-dir", alias = "dataDir")]
    pub data_dir: Option<PathBuf>,

    #[arg(long)]
    pub year: Option<u32>,

    #[arg(long)]
    pub lib: Option<String>,

    /// Root URL of the published documentation.
    #[arg(long)]
    pub host: String,

    /// Version of the documentation host, e.g. `0.25.13`.
    #[arg(long = "host-version", alias = "hostVersion")]
    pub host_version: String,

    /// Module the names are imported from. Names are globals when omitted.
    #[arg(long)]
    pub module: Option<String>,

    /// Dotted symbol names.
    #[arg(required = true)]
    pub names: Vec<String>,
}
