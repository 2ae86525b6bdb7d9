use serde::Serialize;

use super::DailyUsage;
use super::extract::{Extraction, extract};
use crate::remote::comments::Comment;

/// Counts describing what happened to each scanned comment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AggregateReport {
    pub comments: usize,
    pub records: usize,
    pub without_marker: usize,
    pub empty: usize,
    pub malformed: usize,
}

/// Fold every usable payload in `comments` into per-day totals.
///
/// Comments without a hidden block and payloads without usable data are
/// skipped silently; malformed payloads are logged with the comment id and
/// skipped. Totals do not depend on comment order.
pub fn aggregate(comments: &[Comment]) -> (DailyUsage, AggregateReport) {
    let mut usage = DailyUsage::new();
    let mut report = AggregateReport {
        comments: comments.len(),
        ..AggregateReport::default()
    };

    for comment in comments {
        match extract(comment.body()) {
            Extraction::NoMarker => report.without_marker += 1,
            Extraction::Empty => {
                tracing::debug!(comment_id = comment.id, "payload has no usable data");
                report.empty += 1;
            }
            Extraction::Malformed(reason) => {
                tracing::warn!(
                    comment_id = comment.id,
                    "could not parse usage payload in comment {}: {reason}",
                    comment.id
                );
                report.malformed += 1;
            }
            Extraction::Record(record) => {
                usage.add_record(&record);
                report.records += 1;
            }
        }
    }

    tracing::info!(
        comments = report.comments,
        records = report.records,
        malformed = report.malformed,
        days = usage.len(),
        "aggregated usage payloads"
    );
    (usage, report)
}
