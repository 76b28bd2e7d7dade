// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Three subcommands:
//   search <TERM>    one search, print the ranked users
//   repos <LOGIN>    print one user's public repositories
//   explore          interactive prompt (search, expand, clear, ...)
//
// Global flags (--base-url, --token, -v) can appear before or after the
// subcommand.
// =============================================================================

use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "github-explorer",
    version,
    about = "Search GitHub users and browse their public repositories",
    long_about = "github-explorer finds up to five GitHub accounts matching a username, ranked by \
                  follower count, and lists each account's public repositories, most recently \
                  updated first."
)]
pub struct Cli {
    /// GitHub API root (overrides GITHUB_BASE_URL)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Personal access token (overrides GITHUB_TOKEN)
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search users by login and show the top five by followers
    ///
    /// Example: github-explorer search octocat
    Search {
        /// Username or part of one
        term: String,

        /// Output the resulting state as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// List a user's public repositories, most recently updated first
    ///
    /// Example: github-explorer repos octocat --json
    Repos {
        /// GitHub login
        login: String,

        /// Output the resulting state as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Interactive prompt: search, expand users, share the current search
    ///
    /// Example: github-explorer explore --link "http://localhost:3000/?q=octocat"
    Explore {
        /// Share link to start from; its `q` parameter is searched right away
        #[arg(long)]
        link: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_search() {
        let cli = Cli::parse_from(["github-explorer", "search", "octocat", "--json"]);
        match cli.command {
            Commands::Search { term, json } => {
                assert_eq!(term, "octocat");
                assert!(json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "github-explorer",
            "repos",
            "octocat",
            "--token",
            "abc",
            "-vv",
        ]);
        assert_eq!(cli.token.as_deref(), Some("abc"));
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Commands::Repos { .. }));
    }

    #[test]
    fn test_explore_link() {
        let cli = Cli::parse_from(["github-explorer", "explore", "--link", "http://x/?q=a"]);
        match cli.command {
            Commands::Explore { link } => assert_eq!(link.as_deref(), Some("http://x/?q=a")),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
