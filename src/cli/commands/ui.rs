//! `pagewarden ui` command - View mode and expanded groups

use clap::{Subcommand, ValueEnum};
use console::style;
use miette::Result;

use crate::cli::commands::utils::{load_snapshot, open_workspace};
use crate::cli::output::{print_projects, print_serialized};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::groups::group_projects;
use crate::core::ui_state::ViewMode;
use crate::entities::Project;

#[derive(Subcommand, Debug)]
pub enum UiCommands {
    /// Show projects using the saved view, or switch the view mode
    View(ViewArgs),

    /// Expand a module group
    Expand(GroupArg),

    /// Collapse a module group
    Collapse(GroupArg),
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ViewModeArg {
    List,
    Group,
}

impl From<ViewModeArg> for ViewMode {
    fn from(arg: ViewModeArg) -> Self {
        match arg {
            ViewModeArg::List => ViewMode::List,
            ViewModeArg::Group => ViewMode::Group,
        }
    }
}

#[derive(clap::Args, Debug)]
pub struct ViewArgs {
    /// Switch to this mode
    pub mode: Option<ViewModeArg>,
}

#[derive(clap::Args, Debug)]
pub struct GroupArg {
    /// Module name (--all for every module)
    #[arg(required_unless_present = "all")]
    pub module: Option<String>,

    #[arg(long, conflicts_with = "module")]
    pub all: bool,
}

/// Run a ui subcommand
pub fn run(cmd: UiCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        UiCommands::View(args) => run_view(args, global),
        UiCommands::Expand(args) => run_expand(args, true, global),
        UiCommands::Collapse(args) => run_expand(args, false, global),
    }
}

fn run_view(args: ViewArgs, global: &GlobalOpts) -> Result<()> {
    let workspace = open_workspace(global)?;
    let mut ui = workspace.load_ui().map_err(|e| miette::miette!("{}", e))?;

    if let Some(mode) = args.mode {
        ui.view_mode = mode.into();
        workspace.save_ui(&ui).map_err(|e| miette::miette!("{}", e))?;
        println!("{} View mode set to {}", style("✓").green(), style(ui.view_mode).cyan());
        return Ok(());
    }

    if matches!(global.output, OutputFormat::Json | OutputFormat::Yaml) {
        return print_serialized(&ui, global.output);
    }

    let config = load_snapshot(&workspace)?;
    match ui.view_mode {
        ViewMode::List => {
            let projects: Vec<&Project> = group_projects(&config).into_values().flatten().collect();
            print_projects(&projects, global.output)?;
        }
        ViewMode::Group => {
            for (module, members) in group_projects(&config) {
                let expanded = ui.is_expanded(&module);
                println!(
                    "{} {} ({})",
                    if expanded { "▾" } else { "▸" },
                    style(&module).yellow().bold(),
                    members.len()
                );
                if expanded {
                    for project in members {
                        println!(
                            "    {:<4} {}{}",
                            project.display_order(),
                            style(&project.name).cyan(),
                            if project.enabled { "" } else { " (off)" }
                        );
                    }
                }
            }
        }
    }
    Ok(())
}

fn run_expand(args: GroupArg, expand: bool, global: &GlobalOpts) -> Result<()> {
    let workspace = open_workspace(global)?;
    let config = load_snapshot(&workspace)?;
    let mut ui = workspace.load_ui().map_err(|e| miette::miette!("{}", e))?;
    let groups = group_projects(&config);

    match (&args.module, expand) {
        (None, true) => {
            for module in groups.keys() {
                ui.expand(module);
            }
        }
        (None, false) => ui.collapse_all(),
        (Some(module), _) => {
            if !groups.contains_key(module) {
                return Err(miette::miette!("Module \"{}\" not found", module));
            }
            if expand {
                ui.expand(module);
            } else {
                ui.collapse(module);
            }
        }
    }
    workspace.save_ui(&ui).map_err(|e| miette::miette!("{}", e))?;

    println!(
        "{} {} {}",
        style("✓").green(),
        if expand { "Expanded" } else { "Collapsed" },
        args.module.as_deref().unwrap_or("all modules")
    );
    Ok(())
}
