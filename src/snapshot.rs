use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use tracing::debug;

/// One saved petition page: its markup plus the capture time taken from
/// filesystem metadata. The page content never carries its own timestamp.
#[derive(Debug)]
pub struct Snapshot {
    pub path: PathBuf,
    pub html: String,
    pub captured_at: DateTime<Utc>,
}

impl Snapshot {
    pub fn load(path: &Path) -> Result<Self> {
        let html = fs::read_to_string(path)
            .with_context(|| format!("failed to read snapshot {}", path.display()))?;
        let meta = fs::metadata(path)
            .with_context(|| format!("failed to stat snapshot {}", path.display()))?;

        // Not every filesystem records a birth time; mtime is the fallback.
        let captured = match meta.created() {
            Ok(t) => t,
            Err(_) => {
                debug!("no birth time for {}, using mtime", path.display());
                meta.modified()
                    .with_context(|| format!("no usable timestamp for {}", path.display()))?
            }
        };

        Ok(Snapshot {
            path: path.to_path_buf(),
            html,
            captured_at: DateTime::<Utc>::from(captured),
        })
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_reads_content_and_timestamp() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.html");
        fs::write(&path, "<html></html>").unwrap();

        let snap = Snapshot::load(&path).unwrap();
        assert_eq!(snap.html, "<html></html>");
        // A file written just now must not claim a capture time in the past
        // beyond clock skew, nor in the future.
        let age = (Utc::now() - snap.captured_at).num_seconds().abs();
        assert!(age < 60, "capture time off by {}s", age);
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = Snapshot::load(Path::new("no/such/snapshot.html")).unwrap_err();
        assert!(format!("{err}").contains("no/such/snapshot.html"));
    }
}
