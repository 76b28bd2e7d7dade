// src/github/mod.rs
// =============================================================================
// Everything that talks to the GitHub REST API.
//
// Submodules:
// - client: the GithubApi trait and its reqwest implementation
// - models: wire types and the User / Repository domain types
// - error: ApiError (network / HTTP status / undecodable body)
// =============================================================================

mod client;
mod error;
mod models;

pub use client::{GithubApi, GithubClient};
pub use error::ApiError;
pub use models::{Repository, SearchHit, User};
