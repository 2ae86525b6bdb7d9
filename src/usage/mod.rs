//! Token usage records embedded in comment bodies, and their per-day totals.

pub mod aggregate;
pub mod extract;

use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Add, AddAssign};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub use aggregate::{AggregateReport, aggregate};
pub use extract::{Extraction, MARKER, extract};

/// The four tracked usage dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CounterKind {
    Input,
    Output,
    CacheRead,
    CacheWrite,
}

impl CounterKind {
    /// Bottom-to-top order of the chart's stacked layers.
    pub const STACK_ORDER: [Self; 4] = [
        Self::Input,
        Self::CacheWrite,
        Self::CacheRead,
        Self::Output,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Input => "Input",
            Self::Output => "Output",
            Self::CacheRead => "Cache Read",
            Self::CacheWrite => "Cache Write",
        }
    }

    /// Fixed fill colour; visual regression checks depend on these values.
    pub const fn color(self) -> &'static str {
        match self {
            Self::Input => "#7c7cff",
            Self::Output => "#51cf66",
            Self::CacheRead => "#fcc419",
            Self::CacheWrite => "#ff922b",
        }
    }
}

impl fmt::Display for CounterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One per-model entry of an embedded payload. Absent or `null` counters are zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StatEntry {
    #[serde(default)]
    pub input: Option<u64>,
    #[serde(default)]
    pub output: Option<u64>,
    #[serde(default)]
    pub cache_read: Option<u64>,
    #[serde(default)]
    pub cache_write: Option<u64>,
}

impl StatEntry {
    pub fn counts(&self) -> TokenCounts {
        TokenCounts {
            input: self.input.unwrap_or(0),
            output: self.output.unwrap_or(0),
            cache_read: self.cache_read.unwrap_or(0),
            cache_write: self.cache_write.unwrap_or(0),
        }
    }
}

/// A usable payload: a day and at least one stat entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageRecord {
    pub target_date: NaiveDate,
    pub stats: Vec<StatEntry>,
}

/// Summed counters for one day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TokenCounts {
    pub input: u64,
    pub output: u64,
    pub cache_read: u64,
    pub cache_write: u64,
}

impl TokenCounts {
    pub const fn get(&self, kind: CounterKind) -> u64 {
        match kind {
            CounterKind::Input => self.input,
            CounterKind::Output => self.output,
            CounterKind::CacheRead => self.cache_read,
            CounterKind::CacheWrite => self.cache_write,
        }
    }

    pub const fn total(&self) -> u64 {
        self.input
            .saturating_add(self.output)
            .saturating_add(self.cache_read)
            .saturating_add(self.cache_write)
    }
}

/// Saturating element-wise sum.
impl Add for TokenCounts {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            input: self.input.saturating_add(other.input),
            output: self.output.saturating_add(other.output),
            cache_read: self.cache_read.saturating_add(other.cache_read),
            cache_write: self.cache_write.saturating_add(other.cache_write),
        }
    }
}

impl AddAssign for TokenCounts {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

/// Per-day totals keyed by calendar date. A missing date means zero usage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DailyUsage {
    days: BTreeMap<NaiveDate, TokenCounts>,
}

impl DailyUsage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one record's stat entries into its day.
    pub fn add_record(&mut self, record: &UsageRecord) {
        let day = self.days.entry(record.target_date).or_default();
        for stat in &record.stats {
            *day += stat.counts();
        }
    }

    /// Counters for `date`, zero when the date never appeared.
    pub fn day(&self, date: NaiveDate) -> TokenCounts {
        self.days.get(&date).copied().unwrap_or_default()
    }

    pub fn get(&self, date: NaiveDate, kind: CounterKind) -> u64 {
        self.day(date).get(kind)
    }

    /// Dates in ascending calendar order.
    pub fn dates(&self) -> impl DoubleEndedIterator<Item = NaiveDate> + '_ {
        self.days.keys().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }
}
