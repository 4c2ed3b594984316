use std::path::PathBuf;
use thiserror::Error;
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Walk error: {0}")]
    Walk(String),
    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),
    #[error("{} is not a git repository", .0.display())]
    NotARepository(PathBuf),
    #[error("Version control query failed: {0}")]
    Vcs(String),
    #[error("Serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
}
impl SnapshotError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SnapshotError::Io {
            path: path.into(),
            source,
        }
    }
}
