// src/permalink.rs
// Share links: the current search term lives in the `q` query parameter, so
// a link like http://localhost:3000/?q=octocat reopens the same search.

use url::Url;

const QUERY_KEY: &str = "q";

/// The trimmed, non-blank `q` parameter of `link`, if any
pub fn read_query(link: &Url) -> Option<String> {
    link.query_pairs()
        .find(|(key, _)| key == QUERY_KEY)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// `base` with its `q` parameter set to `term`; other parameters are kept
pub fn share_link(base: &Url, term: &str) -> Url {
    let mut link = base.clone();
    let others: Vec<(String, String)> = base
        .query_pairs()
        .filter(|(key, _)| key != QUERY_KEY)
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    {
        let mut pairs = link.query_pairs_mut();
        pairs.clear();
        pairs.extend_pairs(others);
        pairs.append_pair(QUERY_KEY, term.trim());
    }
    link
}
