//! `pagewarden stats` command - Project and module counts

use console::style;
use miette::{IntoDiagnostic, Result};
use std::fs;
use std::path::PathBuf;

use crate::cli::commands::utils::{load_snapshot, open_workspace};
use crate::cli::output::print_serialized;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::message::PageInfo;
use crate::core::stats::{page_statistics, statistics};

#[derive(clap::Args, Debug)]
pub struct StatsArgs {
    /// Count projects whose URL pattern excludes this URL
    #[arg(long, conflicts_with = "page_info")]
    pub url: Option<String>,

    /// Page report (JSON) from the page side
    #[arg(long)]
    pub page_info: Option<PathBuf>,
}

pub fn run(args: StatsArgs, global: &GlobalOpts) -> Result<()> {
    let workspace = open_workspace(global)?;
    let config = load_snapshot(&workspace)?;

    let page = match &args.page_info {
        Some(path) => {
            let content = fs::read_to_string(path).into_diagnostic()?;
            let page: PageInfo = serde_json::from_str(&content)
                .map_err(|e| miette::miette!("Invalid page report {}: {}", path.display(), e))?;
            Some(page)
        }
        None => None,
    };

    let stats = match &page {
        Some(page) => page_statistics(&config, page),
        None => statistics(&config, args.url.as_deref()),
    };

    if matches!(global.output, OutputFormat::Json | OutputFormat::Yaml) {
        return print_serialized(&stats, global.output);
    }

    println!("{}", style("─".repeat(40)).dim());
    println!("  Projects:  {}", style(stats.total).cyan());
    println!("  Enabled:   {}", style(stats.enabled).green());
    println!("  Disabled:  {}", style(stats.disabled).dim());
    println!("  Modules:   {}", style(stats.modules).yellow());
    if let Some(elements) = stats.page_elements {
        println!("  Elements:  {}", style(elements).cyan());
    }
    println!("{}", style("─".repeat(40)).dim());

    if let Some(page) = &page {
        println!();
        for project in config.custom_projects.values() {
            println!(
                "  {:<24} {:>5}",
                project.name,
                page.element_count(&project.name)
            );
        }
    }

    if let Some(unmatched) = stats.unmatched_url.filter(|n| *n > 0) {
        println!();
        println!(
            "{} {} project(s) not effective due to URL mismatch",
            style("!").yellow(),
            unmatched
        );
    }
    Ok(())
}
