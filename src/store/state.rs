// src/store/state.rs
// =============================================================================
// The explorer's whole state, and every transition it can go through.
//
// Fields fall into three groups:
// - the search session: term, matched users, loading flag, error message
// - the repository cache: login -> repositories, filled by completed fetches
// - expansion: which login is expanded, which login's repos are loading
//
// Transitions are plain methods taking &mut self. They never do I/O; the
// orchestration layer (explorer.rs) performs the requests and calls the
// matching receive_* method when one finishes.
//
// Stale searches: every submitted search bumps `generation` and hands back a
// SearchTicket. receive_search_* ignores tickets from older generations, so
// a slow response to an old search can't overwrite a newer one.
// =============================================================================

use serde::Serialize;
use std::collections::BTreeMap;

use crate::github::{Repository, User};
use crate::ranking::TOP_USERS;

/// Identifies one submitted search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    pub generation: u64,
    pub term: String,
}

/// What the repository panel of a single user currently shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel<'a> {
    Collapsed,
    NotFetched,
    Loading,
    Loaded(&'a [Repository]),
    Failed,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ExplorerState {
    pub search_term: String,
    pub matched_users: Vec<User>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub repositories: BTreeMap<String, Vec<Repository>>,
    pub selected_login: Option<String>,
    pub loading_login: Option<String>,
    #[serde(skip)]
    generation: u64,
}

impl ExplorerState {
    /// Starts a new search session.
    ///
    /// A blank term resets everything and returns None: there is nothing
    /// to fetch. Otherwise all previous results, repositories and the
    /// expansion are dropped and a ticket for the new search is returned.
    pub fn submit_search(&mut self, term: &str) -> Option<SearchTicket> {
        if term.trim().is_empty() {
            self.reset();
            return None;
        }

        self.generation += 1;
        self.search_term = term.to_string();
        self.matched_users.clear();
        self.is_loading = true;
        self.error = None;
        self.repositories.clear();
        self.selected_login = None;
        // loading_login is left to the fetch that set it

        Some(SearchTicket {
            generation: self.generation,
            term: term.to_string(),
        })
    }

    /// Back to the initial, empty state. Outstanding search tickets become
    /// stale.
    pub fn reset(&mut self) {
        let generation = self.generation + 1;
        *self = ExplorerState {
            generation,
            ..ExplorerState::default()
        };
    }

    pub fn is_current(&self, ticket: &SearchTicket) -> bool {
        ticket.generation == self.generation
    }

    /// Returns false (and changes nothing) if the ticket is stale.
    pub fn receive_search_result(&mut self, ticket: &SearchTicket, mut items: Vec<User>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }

        items.truncate(TOP_USERS);
        self.is_loading = false;
        if items.is_empty() {
            self.error = Some(format!("No users found for \"{}\".", ticket.term));
        }
        self.matched_users = items;
        true
    }

    pub fn receive_search_failure(&mut self, ticket: &SearchTicket, message: String) -> bool {
        if !self.is_current(ticket) {
            return false;
        }

        self.is_loading = false;
        self.error = Some(message);
        self.matched_users.clear();
        true
    }

    /// Expands `login`, or collapses it if it is already expanded.
    /// Loading flags and the cache are left alone.
    pub fn toggle_expansion(&mut self, login: &str) {
        if self.selected_login.as_deref() == Some(login) {
            self.selected_login = None;
        } else {
            self.selected_login = Some(login.to_string());
        }
    }

    pub fn begin_repository_fetch(&mut self, login: &str) {
        self.loading_login = Some(login.to_string());
        self.error = None;
    }

    // The cache is keyed by login, so a completion always lands in its own
    // entry, even if the user has since been collapsed. Only the fetch that
    // set the loading flag may clear it.
    pub fn receive_repositories(&mut self, login: &str, repositories: Vec<Repository>) {
        self.repositories.insert(login.to_string(), repositories);
        if self.loading_login.as_deref() == Some(login) {
            self.loading_login = None;
        }
    }

    /// Any failure ends the loading state, whichever login was in flight.
    pub fn receive_repository_failure(&mut self, _login: &str, message: String) {
        self.error = Some(message);
        self.loading_login = None;
    }

    pub fn repositories_for(&self, login: &str) -> Option<&[Repository]> {
        self.repositories.get(login).map(Vec::as_slice)
    }

    pub fn panel(&self, login: &str) -> Panel<'_> {
        if self.selected_login.as_deref() != Some(login) {
            return Panel::Collapsed;
        }
        if self.loading_login.as_deref() == Some(login) {
            return Panel::Loading;
        }
        match self.repositories_for(login) {
            Some(repos) => Panel::Loaded(repos),
            None if self.error.is_some() => Panel::Failed,
            None => Panel::NotFetched,
        }
    }
}
