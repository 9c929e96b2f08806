//! `pagewarden normalize` command - Rewrite module orders to 0..n-1

use console::style;
use miette::Result;

use crate::cli::commands::utils::{commit, load_snapshot, open_workspace};
use crate::cli::GlobalOpts;
use crate::core::ordering::normalize;

pub fn run(global: &GlobalOpts) -> Result<()> {
    let workspace = open_workspace(global)?;
    let before = load_snapshot(&workspace)?;

    let next = before.with_projects(normalize(&before.custom_projects));
    if commit(&workspace, &before, &next)? {
        let changed = before
            .custom_projects
            .iter()
            .filter(|(name, p)| next.get(name).map(|n| n.order) != Some(p.order))
            .count();
        println!(
            "{} Normalized {} project order(s)",
            style("✓").green(),
            style(changed).cyan()
        );
    } else {
        println!("{} Already normalized", style("✓").green());
    }
    Ok(())
}
