use crate::config::Config;

/// Media type pinning the v3 REST representation.
pub const ACCEPT_GITHUB_V3: &str = "application/vnd.github.v3+json";
const USER_AGENT: &str = concat!("usage-chart/", env!("CARGO_PKG_VERSION"));

/// Build the blocking HTTP client shared by every page request.
///
/// Transport default timeouts are left untouched.
///
/// # Errors
///
/// Returns an error if the client cannot be constructed (e.g., invalid TLS config).
pub fn build_client() -> anyhow::Result<reqwest::blocking::Client> {
    reqwest::blocking::Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| anyhow::anyhow!("could not build HTTP client: {e}"))
}

/// Send an authenticated `GET` to `url` and return the successful response.
///
/// # Errors
///
/// Returns an error if the server is unreachable or returns a non-success status.
pub fn authed_get(
    client: &reqwest::blocking::Client,
    url: &str,
    config: &Config,
) -> anyhow::Result<reqwest::blocking::Response> {
    let resp = client
        .get(url)
        .bearer_auth(&config.token)
        .header(reqwest::header::ACCEPT, ACCEPT_GITHUB_V3)
        .send()
        .map_err(|e| anyhow::anyhow!("could not reach {url}: {e}"))?;
    let what = format!("{}#{}", config.repo_slug(), config.issue);
    super::require_success(resp, &what)
}
