//! `pagewarden project` command - Project management

use clap::Subcommand;
use console::style;
use indexmap::IndexSet;
use miette::Result;

use crate::cli::commands::utils::{commit, load_snapshot, open_workspace};
use crate::cli::helpers::read_names_from_stdin;
use crate::cli::output::{print_projects, print_serialized};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::actions::{
    add_project, batch_toggle, copy_project, set_behavior, try_delete_project, update_project,
};
use crate::core::entity::{effective_module, Behavior};
use crate::core::groups::{group_projects, sync_registry};
use crate::core::ordering::{try_drag_end, try_move_to_module, try_reorder_within_module};
use crate::core::store::{module_members, AccessConfig};
use crate::core::validation::CssSelectorSyntax;
use crate::entities::Project;

#[derive(Subcommand, Debug)]
pub enum ProjectCommands {
    /// Create a project at the end of its module
    New(NewArgs),

    /// Change fields of a project (module changes append to the new module)
    Edit(EditArgs),

    /// Duplicate a project; the copy starts disabled
    Copy(NameArg),

    /// Delete a project
    Delete(NameArg),

    /// Show a project's details
    Show(NameArg),

    /// List projects grouped by module, in order
    List(ListArgs),

    /// Enable projects (names from arguments or stdin)
    Enable(NamesArg),

    /// Disable projects (names from arguments or stdin)
    Disable(NamesArg),

    /// Set a project's behavior
    Behavior(BehaviorArgs),

    /// Move a project into a module
    Move(MoveArgs),

    /// Reorder a module by position
    Reorder(ReorderArgs),

    /// Drop one project onto another (reorder or cross-module move)
    Drag(DragArgs),
}

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    /// Project name (unique)
    pub name: String,

    /// Comma-separated CSS selectors
    #[arg(long, short = 's')]
    pub selector: String,

    /// Module to file the project under
    #[arg(long, short = 'm', default_value = "")]
    pub module: String,

    /// hide, disable, blur or restrict (default from config)
    #[arg(long, short = 'b')]
    pub behavior: Option<Behavior>,

    /// Regular expression matched against the page path, query and fragment
    #[arg(long, short = 'u', default_value = "")]
    pub url_pattern: String,

    #[arg(long, short = 'd', default_value = "")]
    pub description: String,

    #[arg(long, default_value = "")]
    pub code: String,

    /// Create the project disabled
    #[arg(long)]
    pub disabled: bool,
}

#[derive(clap::Args, Debug)]
pub struct EditArgs {
    /// Project to edit
    pub name: String,

    /// Rename the project
    #[arg(long = "name", short = 'n')]
    pub new_name: Option<String>,

    #[arg(long, short = 's')]
    pub selector: Option<String>,

    #[arg(long, short = 'm')]
    pub module: Option<String>,

    #[arg(long, short = 'b')]
    pub behavior: Option<Behavior>,

    #[arg(long, short = 'u')]
    pub url_pattern: Option<String>,

    #[arg(long, short = 'd')]
    pub description: Option<String>,

    #[arg(long)]
    pub code: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct NameArg {
    /// Project name
    pub name: String,
}

#[derive(clap::Args, Debug)]
pub struct NamesArg {
    /// Project names (read from stdin when omitted)
    pub names: Vec<String>,
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Only list this module
    #[arg(long, short = 'm')]
    pub module: Option<String>,

    /// Only list enabled projects
    #[arg(long)]
    pub enabled: bool,

    /// Show count only
    #[arg(long)]
    pub count: bool,
}

#[derive(clap::Args, Debug)]
pub struct BehaviorArgs {
    pub name: String,

    /// hide, disable, blur or restrict
    pub behavior: Behavior,
}

#[derive(clap::Args, Debug)]
pub struct MoveArgs {
    pub name: String,

    /// Target module
    pub module: String,

    /// Position in the target module (default: end)
    #[arg(long, short = 'i')]
    pub index: Option<usize>,
}

#[derive(clap::Args, Debug)]
pub struct ReorderArgs {
    pub module: String,

    /// Current position (0-based)
    pub from: usize,

    /// New position (0-based)
    pub to: usize,
}

#[derive(clap::Args, Debug)]
pub struct DragArgs {
    /// Dragged project
    pub source: String,

    /// Project it was dropped onto
    pub target: String,
}

/// Run a project subcommand
pub fn run(cmd: ProjectCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        ProjectCommands::New(args) => run_new(args, global),
        ProjectCommands::Edit(args) => run_edit(args, global),
        ProjectCommands::Copy(args) => run_copy(args, global),
        ProjectCommands::Delete(args) => run_delete(args, global),
        ProjectCommands::Show(args) => run_show(args, global),
        ProjectCommands::List(args) => run_list(args, global),
        ProjectCommands::Enable(args) => run_toggle(args, true, global),
        ProjectCommands::Disable(args) => run_toggle(args, false, global),
        ProjectCommands::Behavior(args) => run_behavior(args, global),
        ProjectCommands::Move(args) => run_move(args, global),
        ProjectCommands::Reorder(args) => run_reorder(args, global),
        ProjectCommands::Drag(args) => run_drag(args, global),
    }
}

fn run_new(args: NewArgs, global: &GlobalOpts) -> Result<()> {
    let workspace = open_workspace(global)?;
    let config = workspace.config();
    let before = load_snapshot(&workspace)?;

    let mut project = Project::new(args.name, args.module, args.selector)
        .with_behavior(args.behavior.unwrap_or(config.default_behavior))
        .with_url_pattern(args.url_pattern);
    project.description = args.description;
    project.code = args.code;
    project.enabled = !args.disabled;

    let next = add_project(&before, project.clone(), &CssSelectorSyntax)
        .map_err(|e| miette::miette!("{}", e))?;
    commit(&workspace, &before, &next)?;

    let created = next.get(&project.name).unwrap_or(&project);
    if global.output == OutputFormat::Id {
        println!("{}", created.name);
    } else {
        println!(
            "{} Created project {} in {} at position {}",
            style("✓").green(),
            style(&created.name).cyan(),
            style(created.module_name()).yellow(),
            created.display_order()
        );
    }
    Ok(())
}

fn run_edit(args: EditArgs, global: &GlobalOpts) -> Result<()> {
    let workspace = open_workspace(global)?;
    let before = load_snapshot(&workspace)?;

    let Some(original) = before.get(&args.name) else {
        return Err(miette::miette!("Project \"{}\" not found", args.name));
    };

    let mut edited = original.clone();
    if let Some(name) = args.new_name {
        edited.name = name;
    }
    if let Some(selector) = args.selector {
        edited.selector = selector;
    }
    if let Some(module) = args.module {
        edited.module = module;
    }
    if let Some(behavior) = args.behavior {
        edited.behavior = behavior;
    }
    if let Some(pattern) = args.url_pattern {
        edited.url_pattern = pattern;
    }
    if let Some(description) = args.description {
        edited.description = description;
    }
    if let Some(code) = args.code {
        edited.code = code;
    }

    let new_name = edited.name.clone();
    let next = update_project(&before, &args.name, edited, &CssSelectorSyntax)
        .map_err(|e| miette::miette!("{}", e))?;

    if commit(&workspace, &before, &next)? {
        println!("{} Updated project {}", style("✓").green(), style(&new_name).cyan());
    } else {
        println!("No changes to {}", style(&new_name).cyan());
    }
    Ok(())
}

fn run_copy(args: NameArg, global: &GlobalOpts) -> Result<()> {
    let workspace = open_workspace(global)?;
    let before = load_snapshot(&workspace)?;

    let (next, copy_name) =
        copy_project(&before, &args.name).map_err(|e| miette::miette!("{}", e))?;
    commit(&workspace, &before, &next)?;

    if global.output == OutputFormat::Id {
        println!("{}", copy_name);
    } else {
        println!(
            "{} Copied {} to {} (disabled)",
            style("✓").green(),
            style(&args.name).cyan(),
            style(&copy_name).cyan()
        );
    }
    Ok(())
}

fn run_delete(args: NameArg, global: &GlobalOpts) -> Result<()> {
    let workspace = open_workspace(global)?;
    let before = load_snapshot(&workspace)?;

    let Some(next) = try_delete_project(&before, &args.name) else {
        return Err(miette::miette!("Project \"{}\" not found", args.name));
    };
    commit(&workspace, &before, &next)?;

    println!("{} Deleted project {}", style("✓").green(), style(&args.name).cyan());
    Ok(())
}

fn run_show(args: NameArg, global: &GlobalOpts) -> Result<()> {
    let workspace = open_workspace(global)?;
    let config = load_snapshot(&workspace)?;

    let project = config
        .get(&args.name)
        .ok_or_else(|| miette::miette!("Project \"{}\" not found", args.name))?;

    match global.output {
        OutputFormat::Json | OutputFormat::Yaml => print_serialized(project, global.output)?,
        OutputFormat::Id => println!("{}", project.name),
        _ => print_project_details(project),
    }
    Ok(())
}

fn print_project_details(project: &Project) {
    println!("{}", style("─".repeat(60)).dim());
    println!("{}: {}", style("Name").bold(), style(&project.name).cyan());
    println!("{}: {}", style("Module").bold(), style(project.module_name()).yellow());
    println!("{}: {}", style("Order").bold(), project.display_order());
    println!("{}: {}", style("Behavior").bold(), project.behavior);
    println!(
        "{}: {}",
        style("Enabled").bold(),
        if project.enabled {
            style("yes").green()
        } else {
            style("no").red()
        }
    );
    if !project.code.is_empty() {
        println!("{}: {}", style("Code").bold(), project.code);
    }
    if !project.url_pattern.is_empty() {
        println!("{}: {}", style("URL pattern").bold(), project.url_pattern);
    }
    println!("{}", style("─".repeat(60)).dim());

    println!();
    println!("{}:", style("Selectors").bold());
    for selector in project.selectors() {
        println!("  • {}", selector);
    }

    if !project.description.is_empty() {
        println!();
        println!("{}:", style("Description").bold());
        println!("{}", project.description);
    }
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let workspace = open_workspace(global)?;
    let config = load_snapshot(&workspace)?;

    let mut projects: Vec<&Project> = match &args.module {
        Some(module) => module_members(&config.custom_projects, effective_module(module)),
        None => group_projects(&config).into_values().flatten().collect(),
    };
    if args.enabled {
        projects.retain(|p| p.enabled);
    }

    if args.count {
        println!("{}", projects.len());
        return Ok(());
    }

    if projects.is_empty() {
        if global.output == OutputFormat::Auto {
            println!("No projects found.");
        } else if matches!(global.output, OutputFormat::Json | OutputFormat::Yaml) {
            print_serialized(&projects, global.output)?;
        }
        return Ok(());
    }

    print_projects(&projects, global.output)
}

fn run_toggle(args: NamesArg, enabled: bool, global: &GlobalOpts) -> Result<()> {
    let names: IndexSet<String> = if args.names.is_empty() {
        read_names_from_stdin().unwrap_or_default()
    } else {
        args.names
    }
    .into_iter()
    .collect();
    if names.is_empty() {
        return Err(miette::miette!("No project names given"));
    }

    let workspace = open_workspace(global)?;
    let before = load_snapshot(&workspace)?;

    let mut unknown = 0;
    for name in names.iter().filter(|n| !before.contains(n)) {
        eprintln!("{} Unknown project {}, skipped", style("!").yellow(), style(name).cyan());
        unknown += 1;
    }

    let names: Vec<String> = names.into_iter().collect();
    let next = batch_toggle(&before, &names, enabled);
    commit(&workspace, &before, &next)?;

    println!(
        "{} {} {} project(s)",
        style("✓").green(),
        if enabled { "Enabled" } else { "Disabled" },
        names.len() - unknown
    );
    Ok(())
}

fn run_behavior(args: BehaviorArgs, global: &GlobalOpts) -> Result<()> {
    let workspace = open_workspace(global)?;
    let before = load_snapshot(&workspace)?;

    if !before.contains(&args.name) {
        return Err(miette::miette!("Project \"{}\" not found", args.name));
    }
    let next = set_behavior(&before, &args.name, args.behavior);
    commit(&workspace, &before, &next)?;

    println!(
        "{} {} now uses {}",
        style("✓").green(),
        style(&args.name).cyan(),
        style(args.behavior).yellow()
    );
    Ok(())
}

fn run_move(args: MoveArgs, global: &GlobalOpts) -> Result<()> {
    let workspace = open_workspace(global)?;
    let before = load_snapshot(&workspace)?;

    let projects =
        try_move_to_module(&before.custom_projects, &args.name, &args.module, args.index)
            .ok_or_else(|| miette::miette!("Project \"{}\" not found", args.name))?;
    let next = sync_registry(&before.with_projects(projects));
    commit(&workspace, &before, &next)?;

    report_position(&next, &args.name, "Moved");
    Ok(())
}

fn run_reorder(args: ReorderArgs, global: &GlobalOpts) -> Result<()> {
    let workspace = open_workspace(global)?;
    let before = load_snapshot(&workspace)?;
    let module = effective_module(&args.module);

    let members = module_members(&before.custom_projects, module).len();
    let projects = try_reorder_within_module(&before.custom_projects, module, args.from, args.to)
        .ok_or_else(|| {
            miette::miette!(
                "Position out of range: module \"{}\" has {} project(s)",
                module,
                members
            )
        })?;
    let next = before.with_projects(projects);
    commit(&workspace, &before, &next)?;

    println!(
        "{} Reordered {}: {} -> {}",
        style("✓").green(),
        style(module).yellow(),
        args.from,
        args.to
    );
    Ok(())
}

fn run_drag(args: DragArgs, global: &GlobalOpts) -> Result<()> {
    let workspace = open_workspace(global)?;
    let before = load_snapshot(&workspace)?;

    let Some(next) = try_drag_end(&before, &args.source, &args.target) else {
        println!("Nothing to do");
        return Ok(());
    };
    commit(&workspace, &before, &next)?;

    report_position(&next, &args.source, "Dropped");
    Ok(())
}

fn report_position(config: &AccessConfig, name: &str, verb: &str) {
    if let Some(project) = config.get(name) {
        println!(
            "{} {} {} into {} at position {}",
            style("✓").green(),
            verb,
            style(name).cyan(),
            style(project.module_name()).yellow(),
            project.display_order()
        );
    }
}
