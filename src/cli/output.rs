//! Output formatting utilities

use console::style;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;

use crate::cli::helpers::{escape_csv, escape_md, truncate_str};
use crate::cli::OutputFormat;
use crate::entities::Project;

/// Determine the effective output format based on context
pub fn effective_format(format: OutputFormat, is_list: bool) -> OutputFormat {
    match format {
        OutputFormat::Auto => {
            if is_list {
                OutputFormat::Tsv
            } else {
                OutputFormat::Yaml
            }
        }
        other => other,
    }
}

/// Print a value as JSON or YAML; other formats fall back to YAML
pub fn print_serialized<T: Serialize>(value: &T, format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(value).into_diagnostic()?);
    } else {
        print!("{}", serde_yml::to_string(value).into_diagnostic()?);
    }
    Ok(())
}

/// Print a project listing in the requested format
pub fn print_projects(projects: &[&Project], format: OutputFormat) -> Result<()> {
    match effective_format(format, true) {
        OutputFormat::Json | OutputFormat::Yaml => {
            print_serialized(&projects, effective_format(format, true))?;
        }
        OutputFormat::Id => {
            for project in projects {
                println!("{}", project.name);
            }
        }
        OutputFormat::Csv => {
            println!("module,order,name,behavior,enabled,selector,url_pattern");
            for p in projects {
                println!(
                    "{},{},{},{},{},{},{}",
                    escape_csv(p.module_name()),
                    p.display_order(),
                    escape_csv(&p.name),
                    p.behavior,
                    p.enabled,
                    escape_csv(&p.selector),
                    escape_csv(&p.url_pattern)
                );
            }
        }
        OutputFormat::Md => {
            println!("| Module | Order | Name | Behavior | Enabled | Selector |");
            println!("|---|---|---|---|---|---|");
            for p in projects {
                println!(
                    "| {} | {} | {} | {} | {} | {} |",
                    escape_md(p.module_name()),
                    p.display_order(),
                    escape_md(&p.name),
                    p.behavior,
                    if p.enabled { "yes" } else { "no" },
                    escape_md(&p.selector)
                );
            }
        }
        OutputFormat::Tsv | OutputFormat::Auto => {
            println!(
                "{:<16} {:<5} {:<24} {:<9} {:<3} {}",
                style("MODULE").bold(),
                style("ORDER").bold(),
                style("NAME").bold(),
                style("BEHAVIOR").bold(),
                style("ON").bold(),
                style("SELECTOR").bold()
            );
            println!("{}", "-".repeat(80));
            for p in projects {
                println!(
                    "{:<16} {:<5} {:<24} {:<9} {:<3} {}",
                    truncate_str(p.module_name(), 16),
                    p.display_order(),
                    style(truncate_str(&p.name, 24)).cyan(),
                    p.behavior,
                    if p.enabled {
                        style("on").green()
                    } else {
                        style("off").dim()
                    },
                    truncate_str(&p.selector, 40)
                );
            }
        }
    }
    Ok(())
}
