// src/github/client.rs
// =============================================================================
// HTTP client for the three GitHub endpoints we use:
//
//   GET /search/users?q={term}+in:login&per_page=10
//   GET /users/{login}
//   GET /users/{login}/repos?per_page=100&page={n}&sort=updated&direction=desc
//
// The client holds no state besides the reqwest::Client (which pools
// connections) and the API root. Everything above this layer talks to the
// GithubApi trait, so tests and other backends can swap the implementation.
// =============================================================================

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use super::error::ApiError;
use super::models::{RepoPayload, Repository, SearchHit, SearchResponse, UserDetail};
use crate::config::Config;

/// Page size for the user search
pub const SEARCH_PAGE_SIZE: usize = 10;

/// Page size for repository listings; a shorter page means it was the last one
pub const REPOS_PAGE_SIZE: usize = 100;

#[async_trait]
pub trait GithubApi: Send + Sync {
    /// Users whose login matches `term`. A blank term returns nothing
    /// without touching the network.
    async fn search_users(&self, term: &str) -> Result<Vec<SearchHit>, ApiError>;

    async fn fetch_user_detail(&self, login: &str) -> Result<UserDetail, ApiError>;

    /// Every public repository of `login`, most recently updated first.
    /// A failure on any page fails the whole listing.
    async fn fetch_user_repositories(&self, login: &str) -> Result<Vec<Repository>, ApiError>;
}

#[derive(Debug, Clone)]
pub struct GithubClient {
    client: Client,
    base_url: Url,
}

impl GithubClient {
    pub fn new(config: &Config) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("github-explorer/", env!("CARGO_PKG_VERSION"))),
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));

        if let Some(token) = &config.token {
            let value = HeaderValue::from_str(&format!("Bearer {}", token))
                .context("Invalid GitHub token value")?;
            headers.insert(AUTHORIZATION, value);
        }

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(GithubClient {
            client,
            base_url: config.base_url.clone(),
        })
    }

    // Appends path segments to the API root, percent-encoding each one
    // (a login can't contain '/', but we don't trust input either way).
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url, fallback: &str) -> Result<T, ApiError> {
        debug!(%url, "GET");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(ApiError::network)?;

        let status = response.status();
        if !status.is_success() {
            // The body usually carries GitHub's own message; an unreadable
            // body just means we fall back to the status text
            let body = response.text().await.unwrap_or_default();
            let error = ApiError::from_status(status, &body, fallback);
            debug!(status = status.as_u16(), %error, "request failed");
            return Err(error);
        }

        response.json::<T>().await.map_err(ApiError::decode)
    }
}

#[async_trait]
impl GithubApi for GithubClient {
    async fn search_users(&self, term: &str) -> Result<Vec<SearchHit>, ApiError> {
        let term = term.trim();
        if term.is_empty() {
            return Ok(Vec::new());
        }

        let mut url = self.endpoint(&["search", "users"]);
        url.query_pairs_mut()
            .append_pair("q", &format!("{} in:login", term))
            .append_pair("per_page", &SEARCH_PAGE_SIZE.to_string());

        let response: SearchResponse = self.get_json(url, "Failed to search users").await?;
        Ok(response.items)
    }

    async fn fetch_user_detail(&self, login: &str) -> Result<UserDetail, ApiError> {
        let url = self.endpoint(&["users", login]);
        self.get_json(url, &format!("Failed to fetch user {}", login))
            .await
    }

    async fn fetch_user_repositories(&self, login: &str) -> Result<Vec<Repository>, ApiError> {
        let fallback = format!("Failed to fetch repositories for {}", login);
        let mut repositories = Vec::new();
        let mut page = 1;

        loop {
            let mut url = self.endpoint(&["users", login, "repos"]);
            url.query_pairs_mut()
                .append_pair("per_page", &REPOS_PAGE_SIZE.to_string())
                .append_pair("page", &page.to_string())
                .append_pair("sort", "updated")
                .append_pair("direction", "desc");

            // `?` here aborts the whole listing, pages already read included
            let batch: Vec<RepoPayload> = self.get_json(url, &fallback).await?;
            let batch_len = batch.len();
            repositories.extend(
                batch
                    .into_iter()
                    .map(|payload| Repository::from_payload(payload, login)),
            );

            if batch_len < REPOS_PAGE_SIZE {
                break;
            }
            page += 1;
        }

        debug!(login, pages = page, count = repositories.len(), "fetched repositories");
        Ok(repositories)
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. #[async_trait]
//    - Trait methods returning futures can't be used as `dyn GithubApi`
//      directly; the macro rewrites them to return boxed futures
//
// 2. Default headers
//    - Set once on the reqwest::Client, sent with every request. GitHub
//      rejects requests without a User-Agent
//
// 3. url::Url instead of format!()
//    - path_segments_mut() and query_pairs_mut() do the percent-encoding,
//      so a login or a search term with spaces can't break the URL
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer, token: Option<&str>) -> GithubClient {
        let config = Config {
            base_url: Url::parse(&format!("{}/", server.uri())).unwrap(),
            token: token.map(str::to_string),
            share_url: Url::parse("http://localhost:3000/").unwrap(),
        };
        GithubClient::new(&config).unwrap()
    }

    fn repo_page(start: usize, count: usize) -> serde_json::Value {
        let repos: Vec<_> = (start..start + count)
            .map(|i| {
                json!({
                    "id": i,
                    "name": format!("repo-{}", i),
                    "html_url": format!("https://github.com/octo/repo-{}", i),
                    "stargazers_count": i,
                    "owner": {"login": "octo"}
                })
            })
            .collect();
        json!(repos)
    }

    #[tokio::test]
    async fn test_search_sends_login_query_and_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search/users"))
            .and(query_param("q", "example in:login"))
            .and(query_param("per_page", "10"))
            .and(header("authorization", "Bearer secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "total_count": 1,
                "items": [{"login": "example-user", "id": 1, "avatar_url": "a", "html_url": "h"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let hits = client_for(&server, Some("secret"))
            .search_users("example")
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].login, "example-user");
    }

    #[tokio::test]
    async fn test_blank_search_makes_no_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let hits = client_for(&server, None).search_users("   ").await.unwrap();
        assert!(hits.is_empty());
    }

    #[tokio::test]
    async fn test_search_error_uses_body_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search/users"))
            .respond_with(
                ResponseTemplate::new(403).set_body_json(json!({"message": "API rate limit exceeded"})),
            )
            .mount(&server)
            .await;

        let err = client_for(&server, None)
            .search_users("octo")
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ApiError::Api {
                status: 403,
                message: "API rate limit exceeded".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_undecodable_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/octo"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = client_for(&server, None)
            .fetch_user_detail("octo")
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_network_error() {
        // Nothing listens on port 1
        let config = Config {
            base_url: Url::parse("http://127.0.0.1:1/").unwrap(),
            token: None,
            share_url: Url::parse("http://localhost:3000/").unwrap(),
        };
        let err = GithubClient::new(&config)
            .unwrap()
            .fetch_user_detail("octo")
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
    }

    #[tokio::test]
    async fn test_repositories_paginate_until_short_page() {
        let server = MockServer::start().await;
        for (page, start, count) in [("1", 0, 100), ("2", 100, 100), ("3", 200, 7)] {
            Mock::given(method("GET"))
                .and(path("/users/octo/repos"))
                .and(query_param("page", page))
                .and(query_param("per_page", "100"))
                .and(query_param("sort", "updated"))
                .and(query_param("direction", "desc"))
                .respond_with(ResponseTemplate::new(200).set_body_json(repo_page(start, count)))
                .expect(1)
                .mount(&server)
                .await;
        }

        let repos = client_for(&server, None)
            .fetch_user_repositories("octo")
            .await
            .unwrap();
        assert_eq!(repos.len(), 207);
        // Pagination order is kept
        assert_eq!(repos[0].name, "repo-0");
        assert_eq!(repos[206].name, "repo-206");
    }

    #[tokio::test]
    async fn test_repositories_fail_on_any_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/octo/repos"))
            .and(query_param("page", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(repo_page(0, 100)))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/users/octo/repos"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = client_for(&server, None)
            .fetch_user_repositories("octo")
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ApiError::Api {
                status: 500,
                message: "Internal Server Error".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_empty_repository_listing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/octo/repos"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let repos = client_for(&server, None)
            .fetch_user_repositories("octo")
            .await
            .unwrap();
        assert!(repos.is_empty());
    }
}
