use std::io::IsTerminal as _;
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use usage_chart::chart::{self, RenderOutcome};
use usage_chart::config::{self, Config, RawConfig};
use usage_chart::output::{self, WindowSummary};
use usage_chart::remote::{comments, http};
use usage_chart::usage;

#[derive(Parser)]
#[command(
    name = "usage-chart",
    version,
    about = "Chart daily token usage reported in a GitHub issue's comments"
)]
struct Cli {
    /// GitHub token with read access to the issue
    #[arg(long, env = "GH_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Repository holding the tracking issue, as owner/name
    #[arg(long, env = "REPO_NAME")]
    repo: Option<String>,

    /// Number of the tracking issue
    #[arg(long, env = "ISSUE_NUMBER")]
    issue: Option<String>,

    /// GitHub REST API base URL
    #[arg(long, env = "GITHUB_API_URL", default_value = config::DEFAULT_API_URL)]
    api_url: String,

    /// Where to write the SVG chart
    #[arg(short, long, default_value = config::DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Number of most recent days to chart
    #[arg(long, default_value_t = config::DEFAULT_DAYS)]
    days: usize,

    /// Also print the charted days as JSON on stdout
    #[arg(long)]
    json: bool,

    /// Log each page request and skipped payload
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn raw_config(&self) -> RawConfig {
        RawConfig {
            token: self.token.clone(),
            repo: self.repo.clone(),
            issue: self.issue.clone(),
            api_url: self.api_url.clone(),
            output: self.output.clone(),
            days: self.days,
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "usage_chart=debug"
    } else {
        "usage_chart=info"
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal())
                .with_target(false),
        )
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    std::process::exit(run(&cli));
}

fn run(cli: &Cli) -> i32 {
    let config = match Config::from_raw(cli.raw_config()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("[usage-chart] error: {e}");
            return 1;
        }
    };
    tracing::debug!(?config, "configuration loaded");

    match generate(&config, cli.json) {
        Ok(RenderOutcome::Written { path, days }) => {
            if !cli.json {
                println!("chart of {days} day(s) written to {}", path.display());
            }
            0
        }
        Ok(RenderOutcome::Skipped) => 0,
        Err(e) => {
            eprintln!("[usage-chart] error: {e:#}");
            1
        }
    }
}

/// Fetch, aggregate and render once.
fn generate(config: &Config, json: bool) -> anyhow::Result<RenderOutcome> {
    let client = http::build_client()?;
    let comments = comments::fetch_issue_comments(&client, config)?;
    let (usage, report) = usage::aggregate(&comments);
    if json {
        output::print_json(&WindowSummary::new(&usage, config.days, report));
    }
    chart::write_chart(&usage, config.days, &config.output)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use serial_test::serial;

    const VARS: [&str; 4] = ["GH_TOKEN", "REPO_NAME", "ISSUE_NUMBER", "GITHUB_API_URL"];

    fn clear_env() {
        for var in VARS {
            // SAFETY: test-only env mutation; #[serial] prevents races with other tests.
            unsafe { std::env::remove_var(var) };
        }
    }

    /// Must run serially: mutates the global process environment.
    #[test]
    #[serial]
    fn settings_come_from_environment() {
        clear_env();
        // SAFETY: test-only env mutation; #[serial] prevents races with other tests.
        unsafe {
            std::env::set_var("GH_TOKEN", "ghp_env");
            std::env::set_var("REPO_NAME", "octo/tracker");
            std::env::set_var("ISSUE_NUMBER", "12");
        }
        let cli = Cli::try_parse_from(["usage-chart"]).unwrap();
        clear_env();

        let cfg = Config::from_raw(cli.raw_config()).unwrap();
        assert_eq!(cfg.token, "ghp_env");
        assert_eq!(cfg.repo_slug(), "octo/tracker");
        assert_eq!(cfg.issue, 12);
        assert_eq!(cfg.api_url, config::DEFAULT_API_URL);
        assert_eq!(cfg.days, 14);
    }

    #[test]
    #[serial]
    fn flags_override_environment() {
        clear_env();
        // SAFETY: test-only env mutation; #[serial] prevents races with other tests.
        unsafe {
            std::env::set_var("REPO_NAME", "octo/tracker");
        }
        let cli = Cli::try_parse_from([
            "usage-chart",
            "--repo",
            "other/repo",
            "--token",
            "t",
            "--issue",
            "3",
            "--days",
            "7",
            "-o",
            "out/usage.svg",
        ])
        .unwrap();
        clear_env();

        let cfg = Config::from_raw(cli.raw_config()).unwrap();
        assert_eq!(cfg.repo_slug(), "other/repo");
        assert_eq!(cfg.days, 7);
        assert_eq!(cfg.output, PathBuf::from("out/usage.svg"));
    }

    #[test]
    #[serial]
    fn missing_settings_parse_but_fail_validation() {
        clear_env();
        let cli = Cli::try_parse_from(["usage-chart"]).unwrap();
        assert_eq!(run(&cli), 1);
    }
}
