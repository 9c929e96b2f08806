//! `pagewarden css` command - Print the stylesheet for a URL

use miette::Result;

use crate::cli::commands::utils::{load_snapshot, open_workspace};
use crate::cli::output::print_serialized;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::stylesheet::{build_stylesheet, stylesheet_rules};

#[derive(clap::Args, Debug)]
pub struct CssArgs {
    /// Page URL the rules are generated for
    #[arg(long)]
    pub url: String,
}

pub fn run(args: CssArgs, global: &GlobalOpts) -> Result<()> {
    let workspace = open_workspace(global)?;
    let config = load_snapshot(&workspace)?;

    match global.output {
        OutputFormat::Json | OutputFormat::Yaml => {
            print_serialized(&stylesheet_rules(&config, &args.url), global.output)
        }
        _ => {
            let css = build_stylesheet(&config, &args.url);
            if !css.is_empty() {
                println!("{}", css);
            }
            Ok(())
        }
    }
}
