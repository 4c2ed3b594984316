use serde::{Deserialize, Serialize};

/// One retained file. Fields that were not produced stay `None` and are left
/// out of the JSON entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Path relative to the scan root, always with `/` separators.
    pub path: String,
    /// Lower-cased extension including the leading dot, or empty.
    #[serde(rename = "ext", default, skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    /// Derived from the bytes only, never from the extension.
    #[serde(rename = "binary", default, skip_serializing_if = "Option::is_none")]
    pub is_binary: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_base64: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FileRecord {
    pub fn text(path: String, extension: String, size: u64, content: String) -> Self {
        Self {
            path,
            extension: Some(extension),
            size: Some(size),
            is_binary: Some(false),
            content: Some(content),
            content_base64: None,
            error: None,
        }
    }

    /// A binary file; `payload` is `None` when binary content is not included.
    pub fn binary(path: String, extension: String, size: u64, payload: Option<String>) -> Self {
        Self {
            path,
            extension: Some(extension),
            size: Some(size),
            is_binary: Some(true),
            content: None,
            content_base64: payload,
            error: None,
        }
    }

    pub fn failed(path: String, error: String) -> Self {
        Self {
            path,
            extension: None,
            size: None,
            is_binary: None,
            content: None,
            content_base64: None,
            error: Some(error),
        }
    }

    /// Path and content only, as produced by the version-control source.
    pub fn plain(path: String, content: String) -> Self {
        Self {
            path,
            extension: None,
            size: None,
            is_binary: None,
            content: Some(content),
            content_base64: None,
            error: None,
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// The complete document for one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    /// RFC 3339 timestamp taken at the start of the run.
    pub generated_at: String,
    /// Canonical absolute path of the scanned root.
    pub root: String,
    pub files: Vec<FileRecord>,
}

/// What a completed run produced.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub output_path: std::path::PathBuf,
    pub file_count: usize,
}
