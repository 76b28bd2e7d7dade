// src/github/models.rs
// =============================================================================
// Data types for the GitHub REST API.
//
// Two layers live here:
// - Wire types (SearchResponse, SearchHit, UserDetail, RepoPayload) mirror
//   the JSON GitHub sends. They are Deserialize-only.
// - Domain types (User, Repository) are what the rest of the program works
//   with. They are Serialize so `--json` output can print them.
//
// Fields GitHub may leave out get #[serde(default)] so a sparse response
// still decodes.
// =============================================================================

use serde::{Deserialize, Serialize};

/// Response from `GET /search/users`
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    pub items: Vec<SearchHit>,
}

/// One search result. Search results carry no follower count.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchHit {
    pub login: String,
    pub id: u64,
    #[serde(default)]
    pub avatar_url: String,
    #[serde(default)]
    pub html_url: String,
}

/// Response from `GET /users/{login}`; we only need the follower count
#[derive(Debug, Clone, Deserialize)]
pub struct UserDetail {
    pub login: String,
    #[serde(default)]
    pub followers: u64,
}

#[derive(Debug, Deserialize)]
pub struct RepoOwner {
    pub login: String,
}

/// One element of `GET /users/{login}/repos`
#[derive(Debug, Deserialize)]
pub struct RepoPayload {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub html_url: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub owner: Option<RepoOwner>,
}

/// A GitHub account shown in the results list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: u64,
    pub login: String,
    pub avatar_url: String,
    pub profile_url: String,
    pub follower_count: u64,
}

impl User {
    pub fn from_hit(hit: SearchHit, follower_count: u64) -> Self {
        User {
            id: hit.id,
            login: hit.login,
            avatar_url: hit.avatar_url,
            profile_url: hit.html_url,
            follower_count,
        }
    }
}

/// A public repository belonging to one user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Repository {
    pub id: u64,
    pub name: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub star_count: u64,
    pub owner_login: String,
}

impl Repository {
    // `requested_for` fills in the owner when the payload has none
    pub fn from_payload(payload: RepoPayload, requested_for: &str) -> Self {
        Repository {
            id: payload.id,
            name: payload.name,
            url: payload.html_url,
            description: payload.description.filter(|d| !d.is_empty()),
            star_count: payload.stargazers_count,
            owner_login: payload
                .owner
                .map(|o| o.login)
                .unwrap_or_else(|| requested_for.to_string()),
        }
    }
}
