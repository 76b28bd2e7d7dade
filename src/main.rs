// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging and read configuration
// 3. Build the GitHub client, the state store and the explorer
// 4. Dispatch to the appropriate subcommand handler
// 5. Exit with proper code (0 = results shown, 1 = error message shown,
//    2 = internal error)
// =============================================================================

mod cli;
mod config;
mod explorer;
mod github;
mod logging;
mod permalink;
mod ranking;
mod render;
mod repl;
mod store;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use explorer::Explorer;
use github::GithubClient;
use store::Store;
use url::Url;

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = Config::from_env()?.with_overrides(cli.base_url.as_deref(), cli.token.as_deref())?;
    tracing::debug!(base_url = %config.base_url, authenticated = config.token.is_some(), "configured");

    let client = GithubClient::new(&config)?;
    let explorer = Explorer::new(Arc::new(client), Store::new());

    match cli.command {
        Commands::Search { term, json } => {
            explorer.run_search(&term).await;
            finish(&explorer, json)
        }
        Commands::Repos { login, json } => {
            explorer.run_expand(&login).await;
            finish(&explorer, json)
        }
        Commands::Explore { link } => {
            let (share_base, initial_term) = match link {
                Some(link) => {
                    let link = Url::parse(&link).with_context(|| format!("Invalid link '{}'", link))?;
                    let term = permalink::read_query(&link);
                    (link, term)
                }
                None => (config.share_url.clone(), None),
            };
            repl::run(explorer, share_base, initial_term).await?;
            Ok(0)
        }
    }
}

// Prints the final state of a one-shot command and picks the exit code
fn finish(explorer: &Explorer, json: bool) -> Result<i32> {
    let state = explorer.store().snapshot();
    render::print_state(&state, json)?;

    if state.error.is_some() {
        Ok(1)
    } else {
        Ok(0)
    }
}
