// src/explorer.rs
// =============================================================================
// The two user actions, as async functions:
//
//   run_search(term):  submit -> search + rank -> receive result / failure
//   run_expand(login): toggle -> begin fetch -> list repos -> receive / failure
//
// Explorer owns nothing global: it gets the API client and the Store handed
// in, and is cheap to clone (both are reference-counted), so several
// actions can be in flight at once. Ordering between them is handled by the
// store (search tickets, per-login repository completions).
//
// Errors never escape these functions. Whatever goes wrong ends up as the
// single error message in the state.
// =============================================================================

use std::sync::Arc;
use tracing::{debug, info};

use crate::github::GithubApi;
use crate::ranking::search_top_users;
use crate::store::Store;

#[derive(Clone)]
pub struct Explorer {
    api: Arc<dyn GithubApi>,
    store: Store,
}

impl Explorer {
    pub fn new(api: Arc<dyn GithubApi>, store: Store) -> Self {
        Explorer { api, store }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Searches for `term`. A blank term just resets the session.
    pub async fn run_search(&self, term: &str) {
        // Surrounding whitespace is never part of a login
        let term = term.trim();
        // Submitting hands back a ticket; only that ticket may finish the search
        let Some(ticket) = self.store.apply(|s| s.submit_search(term)) else {
            info!("blank search, session reset");
            return;
        };
        info!(term, "searching users");

        let applied = match search_top_users(self.api.as_ref(), term).await {
            Ok(ranked) => {
                info!(term, shown = ranked.total_count, "search finished");
                self.store
                    .apply(|s| s.receive_search_result(&ticket, ranked.items))
            }
            Err(e) => {
                info!(term, status = e.status(), error = %e, "search failed");
                self.store
                    .apply(|s| s.receive_search_failure(&ticket, e.to_string()))
            }
        };

        // A newer search (or a reset) started while we were waiting
        if !applied {
            debug!(term, "discarding stale search outcome");
        }
    }

    /// Toggles `login` and (re)loads its repositories.
    ///
    /// The fetch runs on every call, including when the toggle collapsed the
    /// row and when the repositories are already cached.
    pub async fn run_expand(&self, login: &str) {
        // Both happen under one lock, so a render never sees one without the other
        self.store.apply(|s| {
            s.toggle_expansion(login);
            s.begin_repository_fetch(login);
        });
        info!(login, "loading repositories");

        match self.api.fetch_user_repositories(login).await {
            Ok(repositories) => {
                info!(login, count = repositories.len(), "repositories loaded");
                self.store
                    .apply(|s| s.receive_repositories(login, repositories));
            }
            Err(e) => {
                info!(login, status = e.status(), error = %e, "repository fetch failed");
                self.store
                    .apply(|s| s.receive_repository_failure(login, e.to_string()));
            }
        }
    }

    /// Explicitly clears the session
    pub fn reset(&self) {
        self.store.apply(|s| s.reset());
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Arc<dyn GithubApi>
//    - `dyn GithubApi` is a trait object: the concrete client is picked at
//      runtime (GithubClient in main, the same client pointed at a mock
//      server in tests)
//    - Arc makes it shareable between clones of Explorer
//
// 2. let-else
//    - `let Some(ticket) = .. else { return; };` binds the value or leaves
//      the function; it avoids one level of nesting
//
// 3. Why does the store get a closure?
//    - `apply` locks, runs the closure, unlocks. The closure never awaits,
//      so the lock is never held while a request is in flight
// -----------------------------------------------------------------------------
