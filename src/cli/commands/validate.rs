//! `pagewarden validate` command - Check projects and module ordering

use console::style;
use miette::Result;

use crate::cli::commands::utils::{load_snapshot, open_workspace};
use crate::cli::GlobalOpts;
use crate::core::ordering::is_normalized;
use crate::core::validation::{validate, CssSelectorSyntax};

pub fn run(global: &GlobalOpts) -> Result<()> {
    let workspace = open_workspace(global)?;
    let config = load_snapshot(&workspace)?;

    println!(
        "{} Validating {} project(s)...\n",
        style("→").blue(),
        config.len()
    );

    let mut failed = 0;
    for project in config.custom_projects.values() {
        match validate(project, &CssSelectorSyntax) {
            Ok(()) => println!("{} {}", style("✓").green(), project.name),
            Err(e) => {
                failed += 1;
                println!("{} {} - {}", style("✗").red(), project.name, e);
            }
        }
    }

    let normalized = is_normalized(&config.custom_projects);

    println!();
    println!("{}", style("─".repeat(60)).dim());
    println!("{}", style("Validation Summary").bold());
    println!("{}", style("─".repeat(60)).dim());
    println!("  Projects checked: {}", style(config.len()).cyan());
    println!("  Projects passed:  {}", style(config.len() - failed).green());
    println!("  Projects failed:  {}", style(failed).red());
    println!(
        "  Module ordering:  {}",
        if normalized {
            style("contiguous").green()
        } else {
            style("needs `pagewarden normalize`").yellow()
        }
    );
    println!();

    if failed > 0 {
        return Err(miette::miette!(
            "Validation failed: {} project(s) have errors",
            failed
        ));
    }
    println!("{} All projects passed validation!", style("✓").green().bold());
    Ok(())
}
