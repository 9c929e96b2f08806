//! Command-line arguments

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};

use crate::cli::commands::{
    apply::ApplyArgs, clear::ClearArgs, completions::CompletionsArgs, css::CssArgs,
    export::ExportArgs, import::ImportArgs, init::InitArgs, module::ModuleCommands,
    project::ProjectCommands, stats::StatsArgs, ui::UiCommands,
};

#[derive(Parser, Debug)]
#[command(
    name = "pagewarden",
    version,
    about = "Hide, disable, blur or restrict page elements, organized into ordered modules",
    propagate_version = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options accepted by every command
#[derive(clap::Args, Debug, Clone)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'o', global = true, value_enum, default_value_t = OutputFormat::Auto)]
    pub output: OutputFormat,

    /// Workspace root (defaults to the nearest directory containing .pagewarden/)
    #[arg(long, global = true, env = "PAGEWARDEN_ROOT")]
    pub root: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(long, short = 'v', global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Pick per command: tsv for lists, yaml for single records
    #[default]
    Auto,
    Tsv,
    Json,
    Yaml,
    Csv,
    /// Markdown table
    Md,
    /// Names only, one per line
    Id,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a workspace in the current directory
    Init(InitArgs),

    /// Manage projects (selector rules)
    #[command(subcommand)]
    Project(ProjectCommands),

    /// Manage modules (project groups)
    #[command(subcommand)]
    Module(ModuleCommands),

    /// View mode and expanded groups
    #[command(subcommand)]
    Ui(UiCommands),

    /// Rewrite every module's orders to 0..n-1
    Normalize,

    /// Check every project and the module ordering
    Validate,

    /// Export projects as JSON
    Export(ExportArgs),

    /// Merge projects from an exported JSON file
    Import(ImportArgs),

    /// Delete every project and module
    Clear(ClearArgs),

    /// Print the stylesheet that applies on a URL
    Css(CssArgs),

    /// Apply the current snapshot to a page, skipping repeated payloads
    Apply(ApplyArgs),

    /// Summary counts, optionally against a URL or a page report
    Stats(StatsArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}
