pub mod count;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

use crate::snapshot::Snapshot;

/// One snapshot through the pipeline: markup stream → signature count,
/// paired with the snapshot's capture time.
pub fn process_snapshot(snap: &Snapshot) -> Result<(DateTime<Utc>, u64)> {
    let signatures = count::scan_count(&snap.html).with_context(|| {
        format!(
            "could not extract a signature count from {}",
            snap.path.display()
        )
    })?;
    Ok((snap.captured_at, signatures))
}
