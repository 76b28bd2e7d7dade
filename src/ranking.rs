// src/ranking.rs
// =============================================================================
// Turns raw search hits into the list of users we show.
//
// Steps:
// 1. Look up each hit's follower count (concurrently, up to
//    DETAIL_CONCURRENCY at a time). A failed lookup counts as 0 followers;
//    it never fails the search.
// 2. Sort by follower count, highest first. The sort is stable and the
//    lookups keep search order, so ties stay in the order GitHub returned.
// 3. Keep the top TOP_USERS.
// 4. Shuffle those (Fisher-Yates), so the most-followed account isn't
//    always listed first.
// =============================================================================

use futures::stream::{self, StreamExt};
use rand::Rng;
use serde::Serialize;
use tracing::{debug, warn};

use crate::github::{ApiError, GithubApi, SearchHit, User};

/// How many users a search shows at most
pub const TOP_USERS: usize = 5;

/// Follower lookups in flight at once (the search page size is 10, so in
/// practice all of them)
const DETAIL_CONCURRENCY: usize = 10;

#[derive(Debug, Clone, Serialize)]
pub struct RankedUsers {
    pub total_count: usize,
    pub items: Vec<User>,
}

pub async fn search_top_users(api: &dyn GithubApi, term: &str) -> Result<RankedUsers, ApiError> {
    let hits = api.search_users(term).await?;
    debug!(term, hits = hits.len(), "search returned");

    let enriched = enrich(api, hits).await;
    let items = select_top(enriched, TOP_USERS, &mut rand::rng());

    Ok(RankedUsers {
        total_count: items.len(),
        items,
    })
}

// `.buffered` (not `.buffer_unordered`) so results come back in hit order
async fn enrich(api: &dyn GithubApi, hits: Vec<SearchHit>) -> Vec<User> {
    stream::iter(hits)
        .map(|hit| async move {
            let followers = match api.fetch_user_detail(&hit.login).await {
                Ok(detail) => {
                    debug!(login = %detail.login, followers = detail.followers, "follower count");
                    detail.followers
                }
                Err(e) => {
                    warn!(login = %hit.login, error = %e, "follower lookup failed, using 0");
                    0
                }
            };
            User::from_hit(hit, followers)
        })
        .buffered(DETAIL_CONCURRENCY)
        .collect()
        .await
}

/// Sorts by follower count (descending, stable), keeps `limit` users and
/// shuffles them.
pub fn select_top<R: Rng>(mut users: Vec<User>, limit: usize, rng: &mut R) -> Vec<User> {
    users.sort_by(|a, b| b.follower_count.cmp(&a.follower_count));
    users.truncate(limit);
    shuffle(&mut users, rng);
    users
}

fn shuffle<T, R: Rng>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. buffered vs buffer_unordered
//    - Both run up to N futures at once
//    - buffered(N) yields results in the order the futures were created
//    - buffer_unordered(N) yields them as they finish
//
// 2. Why pass the Rng in?
//    - Production uses rand::rng() (a thread-local generator)
//    - Tests pass a seeded StdRng so a shuffle is reproducible
//
// 3. Fisher-Yates
//    - Walk from the last slot down, swapping each slot with a random slot
//      at or before it; every ordering is equally likely
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::github::GithubClient;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use serde_json::json;
    use url::Url;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn user(login: &str, followers: u64) -> User {
        User {
            id: 0,
            login: login.to_string(),
            avatar_url: String::new(),
            profile_url: String::new(),
            follower_count: followers,
        }
    }

    fn sorted_followers(users: &[User]) -> Vec<u64> {
        let mut followers: Vec<u64> = users.iter().map(|u| u.follower_count).collect();
        followers.sort_unstable_by(|a, b| b.cmp(a));
        followers
    }

    #[test]
    fn test_select_top_keeps_five_highest() {
        let users = [10, 50, 5, 80, 20, 30, 1]
            .iter()
            .enumerate()
            .map(|(i, f)| user(&format!("u{}", i), *f))
            .collect();

        let top = select_top(users, TOP_USERS, &mut StdRng::seed_from_u64(3));
        assert_eq!(top.len(), 5);
        assert_eq!(sorted_followers(&top), vec![80, 50, 30, 20, 10]);
    }

    #[test]
    fn test_select_top_with_fewer_users() {
        let top = select_top(vec![user("a", 1), user("b", 2)], TOP_USERS, &mut rand::rng());
        assert_eq!(top.len(), 2);

        let top = select_top(Vec::new(), TOP_USERS, &mut rand::rng());
        assert!(top.is_empty());
    }

    #[test]
    fn test_shuffle_is_a_permutation() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..20 {
            let mut items: Vec<u32> = (0..5).collect();
            shuffle(&mut items, &mut rng);
            items.sort_unstable();
            assert_eq!(items, vec![0, 1, 2, 3, 4]);
        }
    }

    #[test]
    fn test_shuffle_varies_order() {
        // Over many seeds the first slot shouldn't always hold the top user
        let firsts: std::collections::HashSet<String> = (0..50)
            .map(|seed| {
                let users = (0..5).map(|i| user(&format!("u{}", i), 100 - i)).collect();
                select_top(users, TOP_USERS, &mut StdRng::seed_from_u64(seed))[0]
                    .login
                    .clone()
            })
            .collect();
        assert!(firsts.len() > 1);
    }

    async fn mock_users(server: &MockServer, followers: &[(&str, Option<u64>)]) {
        let items: Vec<_> = followers
            .iter()
            .enumerate()
            .map(|(i, (login, _))| {
                json!({"login": login, "id": i, "avatar_url": "", "html_url": ""})
            })
            .collect();
        Mock::given(method("GET"))
            .and(path("/search/users"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": items })))
            .mount(server)
            .await;

        for (login, count) in followers {
            let response = match count {
                Some(count) => ResponseTemplate::new(200)
                    .set_body_json(json!({"login": login, "followers": count})),
                None => ResponseTemplate::new(500),
            };
            Mock::given(method("GET"))
                .and(path(format!("/users/{}", login)))
                .respond_with(response)
                .mount(server)
                .await;
        }
    }

    fn client_for(server: &MockServer) -> GithubClient {
        let config = Config {
            base_url: Url::parse(&format!("{}/", server.uri())).unwrap(),
            token: None,
            share_url: Url::parse("http://localhost:3000/").unwrap(),
        };
        GithubClient::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_search_top_users_ranks_by_followers() {
        let server = MockServer::start().await;
        mock_users(
            &server,
            &[
                ("a", Some(10)),
                ("b", Some(50)),
                ("c", Some(5)),
                ("d", Some(80)),
                ("e", Some(20)),
                ("f", Some(30)),
                ("g", Some(1)),
            ],
        )
        .await;

        let ranked = search_top_users(&client_for(&server), "x").await.unwrap();
        assert_eq!(ranked.total_count, 5);
        assert_eq!(sorted_followers(&ranked.items), vec![80, 50, 30, 20, 10]);

        let mut logins: Vec<_> = ranked.items.iter().map(|u| u.login.as_str()).collect();
        logins.sort_unstable();
        assert_eq!(logins, vec!["a", "b", "d", "e", "f"]);
    }

    #[tokio::test]
    async fn test_failed_lookup_counts_as_zero() {
        let server = MockServer::start().await;
        mock_users(&server, &[("ok", Some(7)), ("broken", None)]).await;

        let ranked = search_top_users(&client_for(&server), "x").await.unwrap();
        assert_eq!(ranked.total_count, 2);

        let broken = ranked.items.iter().find(|u| u.login == "broken").unwrap();
        assert_eq!(broken.follower_count, 0);
        let ok = ranked.items.iter().find(|u| u.login == "ok").unwrap();
        assert_eq!(ok.follower_count, 7);
    }

    #[tokio::test]
    async fn test_search_failure_propagates() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search/users"))
            .respond_with(ResponseTemplate::new(422).set_body_json(json!({"message": "Validation Failed"})))
            .mount(&server)
            .await;

        let err = search_top_users(&client_for(&server), "x").await.unwrap_err();
        assert_eq!(err.to_string(), "Validation Failed");
    }
}
