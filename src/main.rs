use clap::Parser;
use miette::Result;
use pagewarden::cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

/// Log filter variable; overrides `-v` when set
const LOG_ENV: &str = "PAGEWARDEN_LOG";

fn main() -> Result<()> {
    // Install miette's fancy error handler for beautiful diagnostics
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    init_tracing(cli.global.verbose);

    let global = &cli.global;
    match cli.command {
        Commands::Init(args) => pagewarden::cli::commands::init::run(args),
        Commands::Project(cmd) => pagewarden::cli::commands::project::run(cmd, global),
        Commands::Module(cmd) => pagewarden::cli::commands::module::run(cmd, global),
        Commands::Ui(cmd) => pagewarden::cli::commands::ui::run(cmd, global),
        Commands::Normalize => pagewarden::cli::commands::normalize::run(global),
        Commands::Validate => pagewarden::cli::commands::validate::run(global),
        Commands::Export(args) => pagewarden::cli::commands::export::run(args, global),
        Commands::Import(args) => pagewarden::cli::commands::import::run(args, global),
        Commands::Clear(args) => pagewarden::cli::commands::clear::run(args, global),
        Commands::Css(args) => pagewarden::cli::commands::css::run(args, global),
        Commands::Apply(args) => pagewarden::cli::commands::apply::run(args, global),
        Commands::Stats(args) => pagewarden::cli::commands::stats::run(args, global),
        Commands::Completions(args) => pagewarden::cli::commands::completions::run(args),
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "pagewarden=warn",
        1 => "pagewarden=debug",
        _ => "pagewarden=trace",
    };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}
