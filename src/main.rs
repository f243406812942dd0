//! Movie Finder CLI
//!
//! A command-line tool for browsing TMDB and keeping a local movie library.

use clap::Parser;
use movie_finder::cli::{
    args::{Cli, Commands},
    commands::{browse, detail, library, prefs},
};
use movie_finder::models::config::{self, Config};
use movie_finder::preflight;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);

    let config = match cli.config {
        Some(ref path) => config::load_config_from(path)?,
        None => config::load_config()?,
    };

    // Run the appropriate command
    match cli.command {
        Commands::Browse { pages, format } => {
            if !cli.skip_preflight {
                run_preflight_checks(&config).await?;
            }
            browse::browse(&config, pages, &format).await?;
        }

        Commands::Detail { id, save } => {
            if !cli.skip_preflight {
                run_preflight_checks(&config).await?;
            }
            detail::show_detail(&config, id, save).await?;
        }

        Commands::Library { action } => {
            library::execute_library(&config, action).await?;
        }

        Commands::Prefs { action } => {
            prefs::execute_prefs(&config, action).await?;
        }
    }

    Ok(())
}

/// Initialize the logging system.
fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("movie_finder=debug")
    } else {
        EnvFilter::new("movie_finder=info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).without_time())
        .with(filter)
        .init();
}

/// Run preflight checks and exit if any fail.
async fn run_preflight_checks(config: &Config) -> anyhow::Result<()> {
    use colored::Colorize;

    println!("{}", "Running preflight checks...".bold());
    println!();

    let results = preflight::run_preflight_checks(config).await;
    preflight::print_results(&results);

    println!();

    if !preflight::all_passed(&results) {
        anyhow::bail!("Preflight checks failed. Fix the issues above and try again.");
    }

    Ok(())
}
