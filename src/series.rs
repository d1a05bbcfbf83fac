use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// Millisecond field is a literal "000": capture times only carry second
// precision once persisted, and existing data files use this exact shape.
const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S.000Z";

/// One point in a petition's signature history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub time: String,
    pub signatures: u64,
    pub delta_signatures: i64,
}

impl Record {
    pub fn new(captured_at: DateTime<Utc>, signatures: u64, last_count: u64) -> Self {
        Record {
            time: captured_at.format(TIME_FORMAT).to_string(),
            signatures,
            delta_signatures: signatures as i64 - last_count as i64,
        }
    }
}

/// Seed for the next delta: the last recorded count, or 0 for a fresh
/// series.
pub fn last_count(series: &[Record]) -> u64 {
    series.last().map(|r| r.signatures).unwrap_or(0)
}

/// Append one record per (capture time, count) pair, threading the running
/// count so each delta is relative to the record before it. Pairs must
/// already be in chronological order; nothing here re-sorts them.
pub fn extend(series: &mut Vec<Record>, extracted: Vec<(DateTime<Utc>, u64)>) {
    let mut previous = last_count(series);
    for (captured_at, signatures) in extracted {
        series.push(Record::new(captured_at, signatures, previous));
        previous = signatures;
    }
}

// ── Tests ──
