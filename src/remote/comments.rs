use serde::Deserialize;

use super::http::authed_get;
use super::link::next_page_url;
use crate::config::Config;

/// Comments requested per page; the REST API maximum.
pub const PAGE_SIZE: u32 = 100;

/// An issue comment as returned by the REST API. Fields not read here are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct Comment {
    pub id: u64,
    #[serde(default)]
    pub body: Option<String>,
}

impl Comment {
    /// Comment text; GitHub sends `null` for empty bodies.
    pub fn body(&self) -> &str {
        self.body.as_deref().unwrap_or_default()
    }
}

/// URL of the first comments page for the configured issue.
pub fn first_page_url(config: &Config) -> String {
    format!(
        "{}/repos/{}/{}/issues/{}/comments?per_page={PAGE_SIZE}",
        config.api_url, config.owner, config.name, config.issue
    )
}

/// Fetch every comment on the configured issue, following `rel="next"` links.
///
/// Pages are requested one after another; comments come back in page order.
///
/// # Errors
///
/// Returns an error on the first unreachable page, non-success status, or
/// undecodable body. Pages fetched before the failure are discarded.
pub fn fetch_issue_comments(
    client: &reqwest::blocking::Client,
    config: &Config,
) -> anyhow::Result<Vec<Comment>> {
    let mut comments = Vec::new();
    let mut next = Some(first_page_url(config));
    let mut page = 0u32;

    while let Some(url) = next {
        page += 1;
        tracing::debug!(page, %url, "fetching comments page");
        let resp = authed_get(client, &url, config)?;
        next = next_page_url(resp.headers());
        let batch = resp
            .json::<Vec<Comment>>()
            .map_err(|e| anyhow::anyhow!("invalid comments page from {url}: {e}"))?;
        tracing::debug!(page, count = batch.len(), "received comments");
        comments.extend(batch);
    }

    tracing::info!(
        "found {} comments on {}#{} across {page} page(s)",
        comments.len(),
        config.repo_slug(),
        config.issue
    );
    Ok(comments)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::RawConfig;

    #[test]
    fn deserialize_comment_ignores_extra_fields() {
        let json = r#"{
            "id": 1234,
            "node_id": "IC_abc",
            "user": { "login": "octocat" },
            "body": "hello",
            "created_at": "2024-01-01T00:00:00Z"
        }"#;
        let comment: Comment = serde_json::from_str(json).unwrap();
        assert_eq!(comment.id, 1234);
        assert_eq!(comment.body(), "hello");
    }

    #[test]
    fn null_or_missing_body_reads_as_empty() {
        let null: Comment = serde_json::from_str(r#"{"id": 1, "body": null}"#).unwrap();
        let missing: Comment = serde_json::from_str(r#"{"id": 2}"#).unwrap();
        assert_eq!(null.body(), "");
        assert_eq!(missing.body(), "");
    }

    #[test]
    fn first_page_url_includes_page_size() {
        let config = Config::from_raw(RawConfig {
            token: Some("t".to_string()),
            repo: Some("octo/tracker".to_string()),
            issue: Some("9".to_string()),
            ..RawConfig::default()
        })
        .unwrap();
        assert_eq!(
            first_page_url(&config),
            "https://api.github.com/repos/octo/tracker/issues/9/comments?per_page=100"
        );
    }
}
