use anyhow::{Context, Result};
use clap::Parser;

use tsdl_cli::args::{CliArgs, Command};
use tsdl_cli::config::GenerateConfig;
use tsdl_cli::{driver_links, driver_transform};

fn main() -> Result<()> {
    // Initialize tracing if TSDL_LOG or RUST_LOG is set.
    // Supports TSDL_LOG_FORMAT=tree|json|text (see src/tracing_config.rs).
    tsdl::tracing_config::init_tracing();

    let args = CliArgs::parse();
    match args.command {
        Command::Transform(args) => {
            let config = GenerateConfig::load(&args.config)?;
            let summaries = driver_transform::run_transform(&config, &args.entries)?;
            for summary in summaries {
                println!(
                    "{}: {} symbols -> {} ({} skipped)",
                    summary.entry,
                    summary.units,
                    summary.bundle_path.display(),
                    summary.skipped
                );
                if args.overview {
                    print!("{}", summary.overview);
                }
            }
        }
        Command::Links(args) => {
            let saved = driver_links::run_links(&args)?;
            println!("{}", saved.mapping.display());
            println!("{}", saved.names.display());
        }
        Command::Resolve(args) => {
            let (results, misses) = driver_links::run_resolve(&args)?;
            for (name, result) in results {
                let line = serde_json::json!({ "name": name, "result": result });
                println!("{}", serde_json::to_string(&line).context("failed to encode result")?);
            }
            tracing::info!(misses, "resolve finished");
        }
    }
    Ok(())
}
