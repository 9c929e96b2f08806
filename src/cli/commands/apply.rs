//! `pagewarden apply` command - Push the snapshot to a page
//!
//! The page side is represented by the generated stylesheet. Requests pass
//! through an [`ApplyCoalescer`] whose last fingerprint is kept in the
//! workspace, so re-applying an unchanged snapshot and language is reported as
//! cached instead of regenerating the page styles.

use console::style;
use miette::Result;

use crate::cli::commands::utils::{load_snapshot, open_workspace};
use crate::cli::output::print_serialized;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::message::{ApplyCoalescer, Request, Response};
use crate::core::stylesheet::{stylesheet_rules, STYLE_ELEMENT_ID};

#[derive(clap::Args, Debug)]
pub struct ApplyArgs {
    /// Page URL to apply to
    #[arg(long)]
    pub url: String,

    /// Language tag sent with the request (default from config)
    #[arg(long)]
    pub lang: Option<String>,

    /// Ignore the last applied fingerprint
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: ApplyArgs, global: &GlobalOpts) -> Result<()> {
    let workspace = open_workspace(global)?;
    let config = workspace.config();
    let snapshot = load_snapshot(&workspace)?;

    let last_applied = if args.force {
        None
    } else {
        workspace.load_applied().map_err(|e| miette::miette!("{}", e))?
    };
    let mut coalescer = ApplyCoalescer::with_last_applied(last_applied);

    let request = Request::ApplyAccessControl {
        config: snapshot,
        lang: args.lang.unwrap_or(config.language),
    };

    let (response, applied) = match coalescer.begin(&request) {
        Some(response) => (response, None),
        None => {
            let Request::ApplyAccessControl { config: snapshot, .. } = &request else {
                return Err(miette::miette!("unexpected request type"));
            };
            let rules = stylesheet_rules(snapshot, &args.url);
            let response = Response::ok();
            coalescer.finish(&request, &response);
            if let Some(fingerprint) = coalescer.last_applied() {
                workspace
                    .save_applied(fingerprint)
                    .map_err(|e| miette::miette!("{}", e))?;
            }
            (response, Some(rules))
        }
    };

    match global.output {
        OutputFormat::Json | OutputFormat::Yaml => print_serialized(&response, global.output)?,
        _ => match applied {
            Some(rules) => {
                println!("/* #{} */", STYLE_ELEMENT_ID);
                for rule in &rules {
                    println!("{}", rule);
                }
                eprintln!(
                    "{} Applied {} rule(s) to {}",
                    style("✓").green(),
                    rules.len(),
                    style(&args.url).cyan()
                );
            }
            None if response.cached => {
                eprintln!(
                    "{} Already applied (cached); use --force to re-apply",
                    style("✓").green()
                );
            }
            None => eprintln!("{} Another apply is in progress, skipped", style("!").yellow()),
        },
    }
    Ok(())
}
