//! Stacked daily bar chart of the most recent days.

pub mod axis;
pub mod svg;

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use chrono::NaiveDate;

use crate::usage::{CounterKind, DailyUsage};

/// One stacked layer: a counter's value for every date in the window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Series {
    pub kind: CounterKind,
    pub values: Vec<u64>,
}

/// Everything the renderer needs, with missing values already filled with zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartData {
    /// Configured window size, shown in the title.
    pub window: usize,
    pub dates: Vec<NaiveDate>,
    /// Layers in [`CounterKind::STACK_ORDER`], bottom first.
    pub series: Vec<Series>,
}

/// The chronologically latest `days` dates, earliest first.
pub fn select_window(usage: &DailyUsage, days: usize) -> Vec<NaiveDate> {
    let mut dates: Vec<NaiveDate> = usage.dates().rev().take(days).collect();
    dates.reverse();
    dates
}

impl ChartData {
    pub fn build(usage: &DailyUsage, days: usize) -> Self {
        let dates = select_window(usage, days);
        let series = CounterKind::STACK_ORDER
            .iter()
            .map(|&kind| Series {
                kind,
                values: dates.iter().map(|&d| usage.get(d, kind)).collect(),
            })
            .collect();
        Self {
            window: days,
            dates,
            series,
        }
    }

    /// Baseline of each layer: the running sum of all layers beneath it.
    pub fn baselines(&self) -> Vec<Vec<u64>> {
        let mut running = vec![0u64; self.dates.len()];
        let mut out = Vec::with_capacity(self.series.len());
        for series in &self.series {
            out.push(running.clone());
            for (acc, v) in running.iter_mut().zip(&series.values) {
                *acc = acc.saturating_add(*v);
            }
        }
        out
    }

    /// Height of the full stack per date.
    pub fn stack_totals(&self) -> Vec<u64> {
        let mut totals = vec![0u64; self.dates.len()];
        for series in &self.series {
            for (acc, v) in totals.iter_mut().zip(&series.values) {
                *acc = acc.saturating_add(*v);
            }
        }
        totals
    }

    pub fn max_total(&self) -> u64 {
        self.stack_totals().into_iter().max().unwrap_or(0)
    }
}

/// What [`write_chart`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    /// Nothing was aggregated; no file was touched.
    Skipped,
    Written { path: PathBuf, days: usize },
}

/// Render the window of `usage` to an SVG at `path`, replacing any previous file.
///
/// # Errors
///
/// Returns an error if the parent directory cannot be created or the file
/// cannot be written.
pub fn write_chart(
    usage: &DailyUsage,
    days: usize,
    path: &Path,
) -> anyhow::Result<RenderOutcome> {
    if usage.is_empty() {
        tracing::info!("no usage data found, skipping chart");
        return Ok(RenderOutcome::Skipped);
    }

    let data = ChartData::build(usage, days);
    let document = svg::render_svg(&data);
    crate::fs::write_artifact(path, &document)
        .with_context(|| format!("write chart to {}", path.display()))?;
    tracing::info!(
        path = %path.display(),
        days = data.dates.len(),
        "chart written"
    );
    Ok(RenderOutcome::Written {
        path: path.to_path_buf(),
        days: data.dates.len(),
    })
}
