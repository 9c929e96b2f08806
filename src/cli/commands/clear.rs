//! `pagewarden clear` command - Delete every project and module

use console::style;
use miette::Result;

use crate::cli::commands::utils::{commit_with_ui, load_snapshot, open_workspace};
use crate::cli::helpers::confirm;
use crate::cli::GlobalOpts;
use crate::core::actions::clear_all;

#[derive(clap::Args, Debug)]
pub struct ClearArgs {
    /// Do not ask for confirmation
    #[arg(long, short = 'y')]
    pub yes: bool,
}

pub fn run(args: ClearArgs, global: &GlobalOpts) -> Result<()> {
    let workspace = open_workspace(global)?;
    let config = workspace.config();
    let before = load_snapshot(&workspace)?;

    let prompt = format!(
        "Delete all {} project(s) and {} module(s)?",
        before.len(),
        before.created_modules.len()
    );
    if !confirm(&prompt, args.yes, config.confirm_destructive)? {
        println!("Cancelled");
        return Ok(());
    }

    let next = clear_all(&before);
    let mut ui = workspace.load_ui().map_err(|e| miette::miette!("{}", e))?;
    ui.collapse_all();
    commit_with_ui(&workspace, &before, &next, ui)?;

    println!("{} Cleared all projects", style("✓").green());
    Ok(())
}
