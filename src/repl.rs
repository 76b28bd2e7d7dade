// src/repl.rs
// =============================================================================
// The interactive prompt behind `github-explorer explore`.
//
// Each line is one command:
//
//   octocat             search for "octocat" (same as `search octocat`)
//   search              with no term: reset the session
//   open 2              expand/collapse the 2nd user in the list
//   open octocat        expand/collapse a user by login
//   clear               reset the session
//   help                list the commands
//   quit / exit         leave
//
// Empty lines are ignored. Actions run one at a time: a line is read, its
// action is awaited, the new state is printed, and then the next line is
// read.
// =============================================================================

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use url::Url;

use crate::explorer::Explorer;
use crate::permalink;
use crate::render;
use crate::store::ExplorerState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Search(String),
    Open(Target),
    Clear,
    Help,
    Quit,
    Nothing,
}

/// A row in the result list, by 1-based position or by login
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Index(usize),
    Login(String),
}

impl Target {
    fn resolve(&self, state: &ExplorerState) -> Option<String> {
        match self {
            Target::Index(n) => n
                .checked_sub(1)
                .and_then(|i| state.matched_users.get(i))
                .map(|u| u.login.clone()),
            Target::Login(login) => Some(login.clone()),
        }
    }
}

pub fn parse_command(line: &str) -> Command {
    let line = line.trim();
    if line.is_empty() {
        return Command::Nothing;
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word.to_ascii_lowercase().as_str() {
        "quit" | "exit" => Command::Quit,
        "help" | "?" => Command::Help,
        "clear" => Command::Clear,
        "search" => Command::Search(rest.to_string()),
        "open" if !rest.is_empty() => Command::Open(match rest.parse::<usize>() {
            Ok(n) => Target::Index(n),
            Err(_) => Target::Login(rest.to_string()),
        }),
        _ => Command::Search(line.to_string()),
    }
}

const HELP: &str = "\
Commands:
  <term>            search users whose login matches <term>
  search [<term>]   same; with no term, reset the session
  open <n|login>    expand or collapse a user's repositories
  clear             reset the session
  help              show this help
  quit              leave";

pub async fn run(explorer: Explorer, share_base: Url, initial_term: Option<String>) -> Result<()> {
    println!("🔍 GitHub explorer. Type a username to search, `help` for commands.");

    if let Some(term) = initial_term {
        println!("> {}", term);
        search(&explorer, &share_base, &term).await?;
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print_prompt()?;
        let Some(line) = lines.next_line().await.context("Failed to read input")? else {
            break;
        };

        match parse_command(&line) {
            Command::Nothing => {}
            Command::Quit => break,
            Command::Help => println!("{}", HELP),
            Command::Clear => {
                explorer.reset();
                println!("Cleared.");
            }
            Command::Search(term) => search(&explorer, &share_base, &term).await?,
            Command::Open(target) => {
                let state = explorer.store().snapshot();
                match target.resolve(&state) {
                    Some(login) => {
                        explorer.run_expand(&login).await;
                        render::print_state(&explorer.store().snapshot(), false)?;
                    }
                    None => println!(
                        "No user at that position; the list has {} entries.",
                        state.matched_users.len()
                    ),
                }
            }
        }
    }

    Ok(())
}

async fn search(explorer: &Explorer, share_base: &Url, term: &str) -> Result<()> {
    explorer.run_search(term).await;
    let state = explorer.store().snapshot();
    render::print_state(&state, false)?;
    if !state.search_term.is_empty() {
        println!("🔗 {}", permalink::share_link(share_base, &state.search_term));
    }
    Ok(())
}

fn print_prompt() -> Result<()> {
    use std::io::Write;
    print!("> ");
    std::io::stdout().flush().context("Failed to write prompt")?;
    Ok(())
}
