pub mod comments;
pub mod http;
pub mod link;

/// Consume a response and return it if the status is successful.
///
/// On 401 Unauthorized, returns an error pointing at the credential.
/// On 403 with an exhausted rate limit, says so instead of echoing the body.
/// On 404, names the issue that could not be found.
/// On other non-2xx statuses, includes the response body in the error message.
///
/// # Errors
///
/// Returns an error for any non-2xx status code.
pub(crate) fn require_success(
    resp: reqwest::blocking::Response,
    what: &str,
) -> anyhow::Result<reqwest::blocking::Response> {
    let status = resp.status();
    if status == reqwest::StatusCode::UNAUTHORIZED {
        anyhow::bail!("GitHub returned HTTP 401 Unauthorized — check that GH_TOKEN is valid");
    }
    if status == reqwest::StatusCode::FORBIDDEN && rate_limit_exhausted(&resp) {
        let reset = resp
            .headers()
            .get("x-ratelimit-reset")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("unknown");
        anyhow::bail!("GitHub API rate limit exhausted (HTTP 403, resets at epoch {reset})");
    }
    if status == reqwest::StatusCode::NOT_FOUND {
        anyhow::bail!(
            "GitHub returned HTTP 404 for {what} — check REPO_NAME, ISSUE_NUMBER and token scope"
        );
    }
    if !status.is_success() {
        let text = resp
            .text()
            .map_err(|e| anyhow::anyhow!("could not read response body: {e}"))?;
        anyhow::bail!("GitHub returned HTTP {status}: {text}");
    }
    Ok(resp)
}

fn rate_limit_exhausted(resp: &reqwest::blocking::Response) -> bool {
    resp.headers()
        .get("x-ratelimit-remaining")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.trim() == "0")
}
