// src/render.rs
// =============================================================================
// Prints a state snapshot, either as a human-readable table or as JSON.
//
// Layout (table mode):
//
//   Showing users for "octo"
//   #   LOGIN                         FOLLOWERS   PROFILE
//   1 ▾ octocat                           12000   https://github.com/octocat
//         ★ 2500    Hello-World        https://github.com/octocat/Hello-World
//                 My first repository on GitHub!
//   2 ▸ octo-org                            310   https://github.com/octo-org
//
// An error replaces the result list; there is only ever one message shown.
// =============================================================================

use anyhow::Result;
use std::io::{self, Write};

use crate::store::{ExplorerState, Panel};

pub fn print_state(state: &ExplorerState, json: bool) -> Result<()> {
    // One lock for the whole print, so lines from other tasks can't interleave
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if json {
        serde_json::to_writer_pretty(&mut out, state)?;
        writeln!(out)?;
    } else {
        write_table(&mut out, state)?;
    }
    Ok(())
}

pub fn write_table(out: &mut impl Write, state: &ExplorerState) -> io::Result<()> {
    if state.is_loading {
        writeln!(out, "⏳ Loading users...")?;
        return Ok(());
    }

    if let Some(error) = &state.error {
        writeln!(out, "❌ {}", error)?;
        // A failed repository fetch still leaves the user list worth showing
        if state.matched_users.is_empty() {
            return Ok(());
        }
    }

    if state.search_term.is_empty() && state.matched_users.is_empty() {
        // Fresh session (or `repos` with nothing searched): show any
        // expanded user's repositories on their own
        if let Some(login) = &state.selected_login {
            write_panel(out, state, login)?;
        }
        return Ok(());
    }

    if state.matched_users.is_empty() {
        return Ok(());
    }

    writeln!(out, "Showing users for \"{}\"", state.search_term)?;
    writeln!(out, "{:<4}{:<30} {:>10}   {}", "#", "LOGIN", "FOLLOWERS", "PROFILE")?;
    write_rule(out)?;

    for (i, user) in state.matched_users.iter().enumerate() {
        // ▸ collapsed, ▾ expanded (whatever the panel is showing)
        let marker = match state.panel(&user.login) {
            Panel::Collapsed => '▸',
            _ => '▾',
        };
        writeln!(
            out,
            "{:<2}{} {:<30} {:>10}   {}",
            i + 1,
            marker,
            truncate(&user.login, 30),
            user.follower_count,
            user.profile_url
        )?;
        write_panel(out, state, &user.login)?;
    }

    Ok(())
}

fn write_panel(out: &mut impl Write, state: &ExplorerState, login: &str) -> io::Result<()> {
    match state.panel(login) {
        Panel::Collapsed | Panel::NotFetched | Panel::Failed => Ok(()),
        Panel::Loading => writeln!(out, "      Loading repositories..."),
        Panel::Loaded([]) => writeln!(out, "      No public repositories."),
        Panel::Loaded(repos) => {
            for repo in repos {
                writeln!(
                    out,
                    "      ★ {:<7} {:<30} {}",
                    repo.star_count,
                    truncate(&repo.name, 30),
                    repo.url
                )?;
                let description = repo
                    .description
                    .as_deref()
                    .unwrap_or("No description available.");
                writeln!(out, "                {}", truncate(description, 70))?;
            }
            Ok(())
        }
    }
}

fn write_rule(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{}", "=".repeat(80))
}

// Cuts on a char boundary, unlike slicing bytes
fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why `impl Write` instead of println!?
//    - write_table works on any writer: stdout in the program, a Vec<u8>
//      in the tests, which can then be compared as a String
//
// 2. Panel::Loaded([])
//    - Slice patterns match on the contents: `[]` is the empty slice, so
//      "no repositories" gets its own arm before the general case
// -----------------------------------------------------------------------------
