//! `pagewarden import` command - Merge projects from an exported document

use console::style;
use miette::{IntoDiagnostic, Result};
use std::fs;
use std::path::PathBuf;

use crate::cli::commands::utils::{commit, load_snapshot, open_workspace};
use crate::cli::GlobalOpts;
use crate::core::actions::merge_imported;
use crate::core::transfer::import_projects;

#[derive(clap::Args, Debug)]
pub struct ImportArgs {
    /// Exported JSON file (versioned or legacy shape)
    pub file: PathBuf,
}

pub fn run(args: ImportArgs, global: &GlobalOpts) -> Result<()> {
    let workspace = open_workspace(global)?;
    let before = load_snapshot(&workspace)?;

    let content = fs::read_to_string(&args.file).into_diagnostic()?;
    let imported = import_projects(&content).map_err(|e| miette::miette!("{}", e))?;

    let count = imported.len();
    let replaced = imported.keys().filter(|name| before.contains(name)).count();
    let next = merge_imported(&before, imported);
    commit(&workspace, &before, &next)?;

    println!(
        "{} Imported {} project(s) from {} ({} replaced)",
        style("✓").green(),
        style(count).cyan(),
        style(args.file.display()).cyan(),
        replaced
    );
    Ok(())
}
