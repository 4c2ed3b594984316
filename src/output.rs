//! Snapshot assembly and output.
//!
//! A run captures its timestamp and resolved root once, collects every record
//! from the [`Walker`](crate::Walker), and writes the whole document with a
//! single write call. There is no partial output: if serialization or the write
//! fails, the run fails.

use crate::engine::walk;
use crate::error::SnapshotError;
use crate::options::SnapshotOptions;
use crate::types::{RunSummary, Snapshot};
use chrono::{DateTime, Local};
use std::fs;
use std::path::{Path, PathBuf};

/// Walks the configured root and assembles the in-memory snapshot.
pub fn capture(options: &SnapshotOptions) -> Result<Snapshot, SnapshotError> {
    let now = Local::now();
    let root = fs::canonicalize(&options.root).map_err(|e| SnapshotError::io(&options.root, e))?;
    let resolved = SnapshotOptions {
        root: root.clone(),
        ..options.clone()
    };
    let mut files = walk(&resolved)?;
    if options.sort_by_path {
        files.sort_by(|a, b| a.path.cmp(&b.path));
    }
    #[cfg(feature = "logging")]
    tracing::debug!("Captured {} records under {}", files.len(), root.display());
    Ok(Snapshot {
        generated_at: now.to_rfc3339(),
        root: root.display().to_string(),
        files,
    })
}

/// Serializes the snapshot to a JSON string. Non-ASCII text is kept as is.
pub fn to_json(snapshot: &Snapshot, pretty: bool) -> Result<String, SnapshotError> {
    let json = if pretty {
        serde_json::to_string_pretty(snapshot)?
    } else {
        serde_json::to_string(snapshot)?
    };
    Ok(json)
}

/// `project_snapshot_<YYYY-mm-dd_HH-MM-SS>.json`
pub fn snapshot_file_name(at: &DateTime<Local>) -> String {
    format!("project_snapshot_{}.json", at.format("%Y-%m-%d_%H-%M-%S"))
}

/// Writes the snapshot into `dir`, creating it if needed, and returns the file path.
pub fn write_snapshot(
    snapshot: &Snapshot,
    dir: impl AsRef<Path>,
    pretty: bool,
) -> Result<PathBuf, SnapshotError> {
    let dir = dir.as_ref();
    let at = DateTime::parse_from_rfc3339(&snapshot.generated_at)
        .map(|t| t.with_timezone(&Local))
        .map_err(|e| {
            SnapshotError::Config(format!(
                "invalid generated_at '{}': {}",
                snapshot.generated_at, e
            ))
        })?;
    let json = to_json(snapshot, pretty)?;
    fs::create_dir_all(dir).map_err(|e| SnapshotError::io(dir, e))?;
    let path = dir.join(snapshot_file_name(&at));
    fs::write(&path, json).map_err(|e| SnapshotError::io(&path, e))?;
    #[cfg(feature = "logging")]
    tracing::debug!("Snapshot written to {}", path.display());
    Ok(path)
}

/// Captures and writes one snapshot using `options.output_dir`.
pub fn run(options: &SnapshotOptions) -> Result<RunSummary, SnapshotError> {
    let snapshot = capture(options)?;
    let output_path = write_snapshot(&snapshot, &options.output_dir, options.pretty)?;
    Ok(RunSummary {
        output_path,
        file_count: snapshot.files.len(),
    })
}
