// src/config.rs
// =============================================================================
// Runtime configuration, read from environment variables.
//
//   GITHUB_BASE_URL            API root (default: https://api.github.com)
//   GITHUB_TOKEN               Personal access token (optional)
//   GITHUB_EXPLORER_SHARE_URL  Page that ?q= share links point at
//
// Without a token requests are still made, just unauthenticated (GitHub
// applies a much lower rate limit to those).
//
// Command-line flags (--base-url, --token) override the environment; see
// Config::with_overrides.
// =============================================================================

use anyhow::{anyhow, Context, Result};
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://api.github.com";
pub const DEFAULT_SHARE_URL: &str = "http://localhost:3000/";

#[derive(Debug, Clone)]
pub struct Config {
    /// API root, always ending in '/' so endpoint paths can be appended
    pub base_url: Url,
    /// Bearer token; None means unauthenticated
    pub token: Option<String>,
    /// Where share links point to
    pub share_url: Url,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    // Same as from_env, but with the variable source injected so tests don't
    // have to mutate the process environment.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let base_url = lookup("GITHUB_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let share_url =
            lookup("GITHUB_EXPLORER_SHARE_URL").unwrap_or_else(|| DEFAULT_SHARE_URL.to_string());

        Ok(Config {
            base_url: parse_base_url(&base_url)?,
            token: non_empty(lookup("GITHUB_TOKEN")),
            share_url: Url::parse(&share_url)
                .with_context(|| format!("Invalid share URL '{}'", share_url))?,
        })
    }

    /// Applies command-line overrides on top of the environment values
    pub fn with_overrides(mut self, base_url: Option<&str>, token: Option<&str>) -> Result<Self> {
        if let Some(base_url) = base_url {
            self.base_url = parse_base_url(base_url)?;
        }
        if let Some(token) = token {
            self.token = non_empty(Some(token.to_string()));
        }
        Ok(self)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

// "https://ghe.example.com/api/v3" -> "https://ghe.example.com/api/v3/"
fn parse_base_url(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw.trim()).with_context(|| format!("Invalid base URL '{}'", raw))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(anyhow!("Base URL must be http or https: {}", raw));
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}
