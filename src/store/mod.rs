// src/store/mod.rs
// =============================================================================
// The application state and the handle used to share it.
//
// ExplorerState (state.rs) is a plain struct with transition methods.
// Store wraps it in Arc<Mutex<..>> so the prompt loop and any in-flight
// request can each hold a clone of the same store.
//
// Rules:
// - one `apply` call = one transition, done under the lock
// - the lock is never held across an .await (closures passed to `apply`
//   are synchronous)
// - readers take a `snapshot()` and render from that copy
// =============================================================================

mod state;

pub use state::{ExplorerState, Panel};

use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Clone, Default)]
pub struct Store {
    state: Arc<Mutex<ExplorerState>>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs one transition against the state and returns its result
    pub fn apply<R>(&self, transition: impl FnOnce(&mut ExplorerState) -> R) -> R {
        transition(&mut self.lock())
    }

    /// A copy of the current state, for rendering
    pub fn snapshot(&self) -> ExplorerState {
        self.lock().clone()
    }

    // Poisoning is ignored; the state stays readable after a panic.
    fn lock(&self) -> MutexGuard<'_, ExplorerState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why Arc<Mutex<..>> and not a global?
//    - Arc lets several owners share one value; cloning the Store clones the
//      pointer, not the state
//    - Whoever needs the state is handed a Store explicitly, which keeps
//      tests independent from each other
//
// 2. Why std::sync::Mutex inside async code?
//    - Every lock is taken and released inside a synchronous closure
//    - tokio::sync::Mutex is only needed when a lock is held across .await
//
// 3. What does `impl FnOnce(&mut ExplorerState) -> R` mean?
//    - `apply` accepts any closure that takes the state mutably once and
//      returns some value R, so transitions can hand back results
//      (like the SearchTicket from submit_search)
// -----------------------------------------------------------------------------
