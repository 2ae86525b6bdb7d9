use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

use super::{StatEntry, UsageRecord};

/// Keyword opening the hidden block, e.g.
///
/// ```text
/// <!-- token-usage
/// {"target_date": "2024-01-01", "stats": [{"input": 120, "output": 40}]}
/// -->
/// ```
pub const MARKER: &str = "token-usage";

#[allow(clippy::expect_used)] // pattern is fixed at compile time
static BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    // The keyword must end at whitespace or at the closing `-->`.
    let pattern = format!(r"(?s)<!--\s*{}(?:\s+(.*?))?\s*-->", regex::escape(MARKER));
    Regex::new(&pattern).expect("BLOCK_RE is a valid regex")
});

/// Outcome of scanning one comment body.
#[derive(Debug)]
pub enum Extraction {
    /// No hidden block; an ordinary comment.
    NoMarker,
    /// A block whose contents are not a valid payload.
    Malformed(String),
    /// A valid payload without a date or without stat entries.
    Empty,
    Record(UsageRecord),
}

/// Locate the first hidden block in `body` and return its raw contents.
pub fn find_block(body: &str) -> Option<&str> {
    let caps = BLOCK_RE.captures(body)?;
    Some(caps.get(1).map_or("", |m| m.as_str()))
}

/// Classify a comment body. Never fails: problems are reported as
/// [`Extraction::Malformed`] so a single bad comment cannot stop a run.
///
/// Missing fields are checked before any stat entry is decoded, so a payload
/// without a date is `Empty` however its entries look.
pub fn extract(body: &str) -> Extraction {
    let Some(block) = find_block(body) else {
        return Extraction::NoMarker;
    };
    let value: Value = match serde_json::from_str(block) {
        Ok(v) => v,
        Err(e) => return Extraction::Malformed(e.to_string()),
    };
    let Value::Object(payload) = value else {
        return Extraction::Malformed("payload is not a JSON object".to_string());
    };

    let date = payload.get("target_date");
    let stats = payload.get("stats");
    if is_blank(date) || is_blank(stats) {
        return Extraction::Empty;
    }

    let Some(date) = date.and_then(Value::as_str).map(str::trim) else {
        return Extraction::Malformed("target_date must be a string".to_string());
    };
    let target_date = match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        Ok(d) => d,
        Err(e) => return Extraction::Malformed(format!("invalid target_date {date:?}: {e}")),
    };
    let stats = match stats.map(Vec::<StatEntry>::deserialize) {
        Some(Ok(stats)) => stats,
        Some(Err(e)) => return Extraction::Malformed(format!("invalid stats: {e}")),
        None => return Extraction::Empty,
    };

    Extraction::Record(UsageRecord { target_date, stats })
}

/// Absent, `null`, a blank string or an empty array.
fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(Value::Array(items)) => items.is_empty(),
        Some(_) => false,
    }
}
