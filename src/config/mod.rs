use std::fmt;
use std::path::PathBuf;

/// Default GitHub REST endpoint; `GITHUB_API_URL` overrides it for Enterprise hosts.
pub const DEFAULT_API_URL: &str = "https://api.github.com";
/// Default chart location, relative to the working directory.
pub const DEFAULT_OUTPUT: &str = "assets/claude_usage.svg";
/// Number of most recent days rendered by default.
pub const DEFAULT_DAYS: usize = 14;

/// Settings as they arrive from the command line and environment, before validation.
#[derive(Debug, Clone)]
pub struct RawConfig {
    pub token: Option<String>,
    pub repo: Option<String>,
    pub issue: Option<String>,
    pub api_url: String,
    pub output: PathBuf,
    pub days: usize,
}

impl Default for RawConfig {
    fn default() -> Self {
        Self {
            token: None,
            repo: None,
            issue: None,
            api_url: DEFAULT_API_URL.to_string(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            days: DEFAULT_DAYS,
        }
    }
}

/// Validated run configuration, built once in `main` and handed to every stage.
#[derive(Clone)]
pub struct Config {
    pub token: String,
    pub owner: String,
    pub name: String,
    pub issue: u64,
    pub api_url: String,
    pub output: PathBuf,
    pub days: usize,
}

// Custom Debug masks the token so the struct is safe to log.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("token", &"<redacted>")
            .field("owner", &self.owner)
            .field("name", &self.name)
            .field("issue", &self.issue)
            .field("api_url", &self.api_url)
            .field("output", &self.output)
            .field("days", &self.days)
            .finish()
    }
}

/// A required setting is absent or has an unusable value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Environment variable names of every missing required setting.
    Missing(Vec<&'static str>),
    InvalidRepo(String),
    InvalidIssue(String),
    InvalidDays,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing(names) => write!(
                f,
                "missing required configuration: {} (set the environment variables or pass the matching flags)",
                names.join(", ")
            ),
            Self::InvalidRepo(value) => write!(
                f,
                "REPO_NAME must be in owner/name form, got {value:?}"
            ),
            Self::InvalidIssue(value) => write!(
                f,
                "ISSUE_NUMBER must be a positive integer, got {value:?}"
            ),
            Self::InvalidDays => write!(f, "--days must be at least 1"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    /// Validate raw settings.
    ///
    /// Blank values count as missing. All missing settings are reported in one
    /// error so the operator can fix them together.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a required setting is missing or malformed.
    pub fn from_raw(raw: RawConfig) -> Result<Self, ConfigError> {
        let token = non_blank(raw.token);
        let repo = non_blank(raw.repo);
        let issue = non_blank(raw.issue);

        let mut missing = Vec::new();
        if token.is_none() {
            missing.push("GH_TOKEN");
        }
        if repo.is_none() {
            missing.push("REPO_NAME");
        }
        if issue.is_none() {
            missing.push("ISSUE_NUMBER");
        }
        let (Some(token), Some(repo), Some(issue)) = (token, repo, issue) else {
            return Err(ConfigError::Missing(missing));
        };

        let (owner, name) =
            split_repo(&repo).ok_or_else(|| ConfigError::InvalidRepo(repo.clone()))?;
        let issue_number = parse_issue(&issue).ok_or(ConfigError::InvalidIssue(issue))?;
        if raw.days == 0 {
            return Err(ConfigError::InvalidDays);
        }

        Ok(Self {
            token,
            owner: owner.to_string(),
            name: name.to_string(),
            issue: issue_number,
            api_url: raw.api_url.trim_end_matches('/').to_string(),
            output: raw.output,
            days: raw.days,
        })
    }

    /// `owner/name` slug of the configured repository.
    pub fn repo_slug(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn split_repo(repo: &str) -> Option<(&str, &str)> {
    let (owner, name) = repo.split_once('/')?;
    if owner.is_empty() || name.is_empty() || name.contains('/') {
        return None;
    }
    Some((owner, name))
}

fn parse_issue(issue: &str) -> Option<u64> {
    // GitHub shows issues as "#123"; accept that spelling too.
    let digits = issue.strip_prefix('#').unwrap_or(issue);
    digits.parse::<u64>().ok().filter(|n| *n > 0)
}

#[cfg(test)]
mod tests;
