use serde::Serialize;

use crate::chart::select_window;
use crate::usage::{AggregateReport, DailyUsage, TokenCounts};

/// Print a Serialize value as pretty JSON, logging errors to stderr.
pub fn print_json(value: &(impl Serialize + ?Sized)) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("[usage-chart] JSON serialization error: {e}"),
    }
}

#[derive(Debug, Serialize)]
pub struct DaySummary {
    pub date: String,
    #[serde(flatten)]
    pub counts: TokenCounts,
    pub total: u64,
}

/// Machine-readable view of the rendered window, for `--json`.
#[derive(Debug, Serialize)]
pub struct WindowSummary {
    pub report: AggregateReport,
    pub days: Vec<DaySummary>,
}

impl WindowSummary {
    pub fn new(usage: &DailyUsage, days: usize, report: AggregateReport) -> Self {
        let days = select_window(usage, days)
            .into_iter()
            .map(|d| {
                let counts = usage.day(d);
                DaySummary {
                    date: d.format("%Y-%m-%d").to_string(),
                    counts,
                    total: counts.total(),
                }
            })
            .collect();
        Self { report, days }
    }
}
