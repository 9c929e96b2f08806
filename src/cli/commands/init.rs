//! `pagewarden init` command - Create a workspace

use console::style;
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;

use crate::core::workspace::Workspace;

#[derive(clap::Args, Debug)]
pub struct InitArgs {
    /// Directory to initialize (default: current directory)
    pub path: Option<PathBuf>,
}

pub fn run(args: InitArgs) -> Result<()> {
    let root = match args.path {
        Some(path) => path,
        None => std::env::current_dir().into_diagnostic()?,
    };

    let workspace = Workspace::init(&root).map_err(|e| miette::miette!("{}", e))?;

    println!(
        "{} Initialized pagewarden workspace at {}",
        style("✓").green(),
        style(workspace.root().display()).cyan()
    );
    println!();
    println!("Next steps:");
    println!(
        "  {}",
        style("pagewarden project new \"Ads\" --selector \".ad, #banner\"").yellow()
    );
    println!("  {}", style("pagewarden project list").yellow());
    Ok(())
}
