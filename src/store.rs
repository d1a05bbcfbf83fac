use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::series::Record;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("not a valid signature series: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Load the persisted series. A missing file is first created as an empty
/// array, then read like any other.
pub fn load(path: &Path) -> Result<Vec<Record>, StoreError> {
    if !path.exists() {
        fs::write(path, "[]")?;
    }
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Rewrite the whole series in one shot. Called once per run, after every
/// snapshot in the batch has been folded in.
pub fn save(path: &Path, series: &[Record]) -> Result<(), StoreError> {
    let raw = serde_json::to_string(series)?;
    fs::write(path, raw)?;
    Ok(())
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_created_as_empty_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");

        let series = load(&path).unwrap();
        assert!(series.is_empty());
        assert_eq!(fs::read_to_string(&path).unwrap(), "[]");
    }

    #[test]
    fn round_trip_preserves_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");

        let series = vec![
            Record {
                time: "2019-03-21T12:00:00.000Z".into(),
                signatures: 100,
                delta_signatures: 100,
            },
            Record {
                time: "2019-03-21T13:00:00.000Z".into(),
                signatures: 90,
                delta_signatures: -10,
            },
        ];
        save(&path, &series).unwrap();
        assert_eq!(load(&path).unwrap(), series);
    }

    #[test]
    fn corrupt_file_is_a_typed_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        fs::write(&path, "{ not a series").unwrap();

        assert!(matches!(load(&path), Err(StoreError::Corrupt(_))));
        // The bad file is left exactly as it was.
        assert_eq!(fs::read_to_string(&path).unwrap(), "{ not a series");
    }

    #[test]
    fn wrong_shape_is_a_typed_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        fs::write(&path, r#"[{"time": "2019-03-21T12:00:00.000Z"}]"#).unwrap();

        assert!(matches!(load(&path), Err(StoreError::Corrupt(_))));
    }
}
