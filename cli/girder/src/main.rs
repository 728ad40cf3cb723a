//! Girder CLI — command-line front end for the girder build toolkit.

mod commands;
mod manifest;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use manifest::GirderManifest;

#[derive(Parser)]
#[command(name = "girder", version, about = "Build-parameter toolkit")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lint Valgrind suppression files
    Check {
        /// Files or directories to check (default: [check] paths in girder.toml)
        files: Vec<PathBuf>,
        /// Report format (human, json)
        #[arg(long)]
        report: Option<String>,
    },
    /// Print the product version resolved from a version file
    Version {
        /// The version file to read
        file: PathBuf,
        /// Build number overriding the last version component
        #[arg(long)]
        build: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = run(cli);
    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Check { files, report } => {
            let paths = if files.is_empty() {
                manifest_check_paths()?
            } else {
                files
            };
            commands::check::run(&paths, report.as_deref())
        }

        Commands::Version { file, build } => commands::version::run(&file, build.as_deref()),
    }
}

/// Resolve check paths from the nearest `girder.toml`, relative to where
/// the manifest was found.
fn manifest_check_paths() -> anyhow::Result<Vec<PathBuf>> {
    let cwd = std::env::current_dir()?;
    match GirderManifest::find_and_load(&cwd)? {
        Some((manifest, dir)) => Ok(manifest
            .check_paths()
            .iter()
            .map(|p| dir.join(p))
            .collect()),
        None => Ok(Vec::new()),
    }
}
