//! `pagewarden module` command - Module (group) management

use clap::Subcommand;
use console::style;
use miette::Result;

use crate::cli::commands::utils::{commit, commit_with_ui, load_snapshot, open_workspace};
use crate::cli::helpers::{confirm, escape_csv, escape_md};
use crate::cli::output::{effective_format, print_serialized};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::groups::{create_module, delete_module, group_projects, rename_module};

#[derive(Subcommand, Debug)]
pub enum ModuleCommands {
    /// Register a new, empty module
    New(NewArgs),

    /// Rename a module and relabel its projects
    Rename(RenameArgs),

    /// Delete a module and every project in it
    Delete(DeleteArgs),

    /// List modules with project counts
    List,
}

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    pub name: String,
}

#[derive(clap::Args, Debug)]
pub struct RenameArgs {
    pub old: String,
    pub new: String,
}

#[derive(clap::Args, Debug)]
pub struct DeleteArgs {
    pub name: String,

    /// Do not ask for confirmation
    #[arg(long, short = 'y')]
    pub yes: bool,
}

/// Run a module subcommand
pub fn run(cmd: ModuleCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        ModuleCommands::New(args) => run_new(args, global),
        ModuleCommands::Rename(args) => run_rename(args, global),
        ModuleCommands::Delete(args) => run_delete(args, global),
        ModuleCommands::List => run_list(global),
    }
}

fn run_new(args: NewArgs, global: &GlobalOpts) -> Result<()> {
    let workspace = open_workspace(global)?;
    let before = load_snapshot(&workspace)?;

    let next = create_module(&before, &args.name).map_err(|e| miette::miette!("{}", e))?;
    commit(&workspace, &before, &next)?;

    println!(
        "{} Created module {}",
        style("✓").green(),
        style(args.name.trim()).yellow()
    );
    Ok(())
}

fn run_rename(args: RenameArgs, global: &GlobalOpts) -> Result<()> {
    let workspace = open_workspace(global)?;
    let before = load_snapshot(&workspace)?;

    if !group_projects(&before).contains_key(&args.old) {
        return Err(miette::miette!("Module \"{}\" not found", args.old));
    }
    let next =
        rename_module(&before, &args.old, &args.new).map_err(|e| miette::miette!("{}", e))?;

    let mut ui = workspace.load_ui().map_err(|e| miette::miette!("{}", e))?;
    ui.rename_group(&args.old, args.new.trim());
    commit_with_ui(&workspace, &before, &next, ui)?;

    println!(
        "{} Renamed module {} to {}",
        style("✓").green(),
        style(&args.old).yellow(),
        style(args.new.trim()).yellow()
    );
    Ok(())
}

fn run_delete(args: DeleteArgs, global: &GlobalOpts) -> Result<()> {
    let workspace = open_workspace(global)?;
    let config = workspace.config();
    let before = load_snapshot(&workspace)?;

    let groups = group_projects(&before);
    let Some(members) = groups.get(&args.name) else {
        return Err(miette::miette!("Module \"{}\" not found", args.name));
    };

    let prompt = format!(
        "Delete module \"{}\" and its {} project(s)?",
        args.name,
        members.len()
    );
    if !confirm(&prompt, args.yes, config.confirm_destructive)? {
        println!("Cancelled");
        return Ok(());
    }

    let (next, removed) = delete_module(&before, &args.name);
    let mut ui = workspace.load_ui().map_err(|e| miette::miette!("{}", e))?;
    ui.collapse(&args.name);
    commit_with_ui(&workspace, &before, &next, ui)?;

    println!(
        "{} Deleted module {} ({} project(s) removed)",
        style("✓").green(),
        style(&args.name).yellow(),
        removed.len()
    );
    Ok(())
}

fn run_list(global: &GlobalOpts) -> Result<()> {
    let workspace = open_workspace(global)?;
    let config = load_snapshot(&workspace)?;
    let ui = workspace.load_ui().map_err(|e| miette::miette!("{}", e))?;
    let groups = group_projects(&config);

    let rows: Vec<serde_json::Value> = groups
        .iter()
        .map(|(module, members)| {
            serde_json::json!({
                "module": module,
                "projects": members.len(),
                "enabled": members.iter().filter(|p| p.enabled).count(),
                "expanded": ui.is_expanded(module),
            })
        })
        .collect();

    match effective_format(global.output, true) {
        OutputFormat::Json | OutputFormat::Yaml => print_serialized(&rows, global.output)?,
        OutputFormat::Id => {
            for module in groups.keys() {
                println!("{}", module);
            }
        }
        OutputFormat::Csv => {
            println!("module,projects,enabled");
            for (module, members) in &groups {
                let enabled = members.iter().filter(|p| p.enabled).count();
                println!("{},{},{}", escape_csv(module), members.len(), enabled);
            }
        }
        OutputFormat::Md => {
            println!("| Module | Projects | Enabled |");
            println!("|---|---|---|");
            for (module, members) in &groups {
                let enabled = members.iter().filter(|p| p.enabled).count();
                println!("| {} | {} | {} |", escape_md(module), members.len(), enabled);
            }
        }
        OutputFormat::Tsv | OutputFormat::Auto => {
            if groups.is_empty() {
                println!("No modules found.");
                return Ok(());
            }
            println!(
                "{:<24} {:<9} {:<8}",
                style("MODULE").bold(),
                style("PROJECTS").bold(),
                style("ENABLED").bold()
            );
            println!("{}", "-".repeat(43));
            for (module, members) in &groups {
                let enabled = members.iter().filter(|p| p.enabled).count();
                println!(
                    "{:<24} {:<9} {:<8}",
                    style(module).yellow(),
                    members.len(),
                    enabled
                );
            }
        }
    }
    Ok(())
}
