//! `pagewarden export` command - Write projects as a versioned JSON document

use console::style;
use miette::{IntoDiagnostic, Result};
use std::fs;
use std::path::PathBuf;

use crate::cli::commands::utils::{load_snapshot, open_workspace};
use crate::cli::GlobalOpts;
use crate::core::transfer::export_projects;

#[derive(clap::Args, Debug)]
pub struct ExportArgs {
    /// Write to this file instead of stdout
    #[arg(long, short = 'f')]
    pub file: Option<PathBuf>,
}

pub fn run(args: ExportArgs, global: &GlobalOpts) -> Result<()> {
    let workspace = open_workspace(global)?;
    let config = load_snapshot(&workspace)?;

    let document = export_projects(&config.custom_projects, chrono::Utc::now())
        .map_err(|e| miette::miette!("{}", e))?;

    match args.file {
        Some(path) => {
            fs::write(&path, format!("{}\n", document)).into_diagnostic()?;
            eprintln!(
                "{} Exported {} project(s) to {}",
                style("✓").green(),
                config.len(),
                style(path.display()).cyan()
            );
        }
        None => println!("{}", document),
    }
    Ok(())
}
