//! `Link` header parsing for GitHub's cursor pagination.
//!
//! GitHub advertises further pages as
//! `<https://api.github.com/...&page=2>; rel="next", <...>; rel="last"`.

use reqwest::header::{HeaderMap, LINK};

/// Return the URL tagged `rel="next"` in a `Link` header value, if any.
pub fn next_link(value: &str) -> Option<String> {
    value.split(',').find_map(|part| {
        let mut pieces = part.split(';');
        let target = pieces.next()?.trim();
        let url = target.strip_prefix('<')?.strip_suffix('>')?;
        let is_next = pieces.any(|param| {
            param
                .trim()
                .strip_prefix("rel=")
                .map(|rel| rel.trim_matches('"'))
                .is_some_and(|rel| rel.split_whitespace().any(|r| r == "next"))
        });
        is_next.then(|| url.to_string())
    })
}

/// Next-page URL from a response's headers; `None` on the last page.
pub fn next_page_url(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(LINK)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find_map(next_link)
}
