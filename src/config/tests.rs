#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;

fn raw(token: Option<&str>, repo: Option<&str>, issue: Option<&str>) -> RawConfig {
    RawConfig {
        token: token.map(ToOwned::to_owned),
        repo: repo.map(ToOwned::to_owned),
        issue: issue.map(ToOwned::to_owned),
        ..RawConfig::default()
    }
}

// --- required settings ---

#[test]
fn complete_settings_validate() {
    let cfg = Config::from_raw(raw(Some("ghp_x"), Some("octo/tracker"), Some("42"))).unwrap();
    assert_eq!(cfg.token, "ghp_x");
    assert_eq!(cfg.owner, "octo");
    assert_eq!(cfg.name, "tracker");
    assert_eq!(cfg.issue, 42);
    assert_eq!(cfg.api_url, DEFAULT_API_URL);
    assert_eq!(cfg.output, PathBuf::from(DEFAULT_OUTPUT));
    assert_eq!(cfg.days, 14);
    assert_eq!(cfg.repo_slug(), "octo/tracker");
}

#[test]
fn all_missing_settings_reported_together() {
    let err = Config::from_raw(raw(None, None, None)).unwrap_err();
    assert_eq!(
        err,
        ConfigError::Missing(vec!["GH_TOKEN", "REPO_NAME", "ISSUE_NUMBER"])
    );
    let msg = err.to_string();
    assert!(msg.contains("GH_TOKEN, REPO_NAME, ISSUE_NUMBER"), "{msg}");
}

#[test]
fn blank_value_counts_as_missing() {
    let err = Config::from_raw(raw(Some("  "), Some("octo/tracker"), Some("1"))).unwrap_err();
    assert_eq!(err, ConfigError::Missing(vec!["GH_TOKEN"]));
}

// --- repository ---

#[test]
fn repo_without_slash_is_rejected() {
    let err = Config::from_raw(raw(Some("t"), Some("tracker"), Some("1"))).unwrap_err();
    assert_eq!(err, ConfigError::InvalidRepo("tracker".to_string()));
}

#[test]
fn repo_with_empty_half_is_rejected() {
    for repo in ["/tracker", "octo/", "octo/tracker/extra"] {
        let err = Config::from_raw(raw(Some("t"), Some(repo), Some("1"))).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidRepo(_)), "{repo}: {err:?}");
    }
}

// --- issue ---

#[test]
fn issue_accepts_hash_prefix() {
    let cfg = Config::from_raw(raw(Some("t"), Some("o/r"), Some("#7"))).unwrap();
    assert_eq!(cfg.issue, 7);
}

#[test]
fn issue_must_be_positive_integer() {
    for issue in ["0", "-3", "abc", "1.5"] {
        let err = Config::from_raw(raw(Some("t"), Some("o/r"), Some(issue))).unwrap_err();
        assert_eq!(err, ConfigError::InvalidIssue(issue.to_string()));
    }
}

// --- optional settings ---

#[test]
fn zero_days_is_rejected() {
    let mut settings = raw(Some("t"), Some("o/r"), Some("1"));
    settings.days = 0;
    assert_eq!(Config::from_raw(settings).unwrap_err(), ConfigError::InvalidDays);
}

#[test]
fn api_url_trailing_slash_is_trimmed() {
    let mut settings = raw(Some("t"), Some("o/r"), Some("1"));
    settings.api_url = "https://ghe.example.com/api/v3/".to_string();
    let cfg = Config::from_raw(settings).unwrap();
    assert_eq!(cfg.api_url, "https://ghe.example.com/api/v3");
}

#[test]
fn debug_redacts_token() {
    let cfg = Config::from_raw(raw(Some("ghp_secret"), Some("o/r"), Some("1"))).unwrap();
    let debug = format!("{cfg:?}");
    assert!(!debug.contains("ghp_secret"), "{debug}");
    assert!(debug.contains("<redacted>"));
}
