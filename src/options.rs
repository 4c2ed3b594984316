use crate::content::BinaryHeuristic;
use crate::error::SnapshotError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinaryDetection {
    #[default]
    Heuristic,
    Inspector,
    None,
}
/// Where the list of files comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    /// Recursive filesystem walk with exclusion and binary handling.
    #[default]
    Walk,
    /// Files tracked by git plus untracked files not ignored by it.
    Vcs,
}
pub const DEFAULT_EXCLUDED_DIRS: &[&str] = &[
    ".git",
    ".hg",
    ".svn",
    "node_modules",
    "bower_components",
    ".venv",
    "venv",
    "__pycache__",
    ".pytest_cache",
    ".mypy_cache",
    ".tox",
    "target",
    "build",
    "dist",
    ".next",
    ".gradle",
    ".idea",
    ".vscode",
    "project_snapshots",
];
pub const DEFAULT_OUTPUT_DIR: &str = "project_snapshots";
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotOptions {
    pub root: PathBuf,
    pub source: Source,
    pub excluded_dirs: Vec<String>,
    /// Only match excluded prefixes on whole leading path segments.
    pub aligned_prefixes: bool,
    pub ignore_patterns: Vec<String>,
    pub max_file_size: Option<u64>,
    pub include_binary: bool,
    pub binary_detection: BinaryDetection,
    pub heuristic: BinaryHeuristic,
    pub respect_gitignore: bool,
    pub include_hidden: bool,
    pub follow_links: bool,
    pub max_depth: Option<usize>,
    pub sort_by_path: bool,
    pub output_dir: PathBuf,
    pub pretty: bool,
}
impl Default for SnapshotOptions {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            source: Source::Walk,
            excluded_dirs: DEFAULT_EXCLUDED_DIRS.iter().map(|s| s.to_string()).collect(),
            aligned_prefixes: false,
            ignore_patterns: Vec::new(),
            max_file_size: None,
            include_binary: true,
            binary_detection: BinaryDetection::Heuristic,
            heuristic: BinaryHeuristic::default(),
            respect_gitignore: false,
            include_hidden: true,
            follow_links: false,
            max_depth: None,
            sort_by_path: true,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            pretty: true,
        }
    }
}
impl SnapshotOptions {
    /// Loads options from a JSON file; missing fields take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| SnapshotError::io(path, e))?;
        let options: Self = serde_json::from_str(&raw)
            .map_err(|e| SnapshotError::Config(format!("{}: {}", path.display(), e)))?;
        options.validate()?;
        Ok(options)
    }
    pub fn validate(&self) -> Result<(), SnapshotError> {
        let h = &self.heuristic;
        if !(0.0..=1.0).contains(&h.max_non_text_ratio) {
            return Err(SnapshotError::Config(format!(
                "max_non_text_ratio must be within 0.0..=1.0, got {}",
                h.max_non_text_ratio
            )));
        }
        if h.sample_window == 0 {
            return Err(SnapshotError::Config(
                "sample_window must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
#[derive(Debug, Default)]
pub struct SnapshotBuilder {
    options: SnapshotOptions,
}
impl SnapshotBuilder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            options: SnapshotOptions {
                root: root.into(),
                ..Default::default()
            },
        }
    }
    pub fn root(mut self, root: impl Into<PathBuf>) -> Self {
        self.options.root = root.into();
        self
    }
    pub fn source(mut self, source: Source) -> Self {
        self.options.source = source;
        self
    }
    pub fn excluded_dirs(mut self, dirs: Vec<String>) -> Self {
        self.options.excluded_dirs = dirs;
        self
    }
    pub fn exclude(mut self, dir: impl Into<String>) -> Self {
        self.options.excluded_dirs.push(dir.into());
        self
    }
    pub fn aligned_prefixes(mut self, yes: bool) -> Self {
        self.options.aligned_prefixes = yes;
        self
    }
    pub fn ignore_patterns(mut self, patterns: Vec<String>) -> Self {
        self.options.ignore_patterns = patterns;
        self
    }
    pub fn max_file_size(mut self, limit: Option<u64>) -> Self {
        self.options.max_file_size = limit;
        self
    }
    pub fn include_binary(mut self, yes: bool) -> Self {
        self.options.include_binary = yes;
        self
    }
    pub fn binary_detection(mut self, method: BinaryDetection) -> Self {
        self.options.binary_detection = method;
        self
    }
    pub fn heuristic(mut self, heuristic: BinaryHeuristic) -> Self {
        self.options.heuristic = heuristic;
        self
    }
    pub fn respect_gitignore(mut self, yes: bool) -> Self {
        self.options.respect_gitignore = yes;
        self
    }
    pub fn include_hidden(mut self, yes: bool) -> Self {
        self.options.include_hidden = yes;
        self
    }
    pub fn follow_links(mut self, yes: bool) -> Self {
        self.options.follow_links = yes;
        self
    }
    pub fn max_depth(mut self, depth: Option<usize>) -> Self {
        self.options.max_depth = depth;
        self
    }
    pub fn sort_by_path(mut self, yes: bool) -> Self {
        self.options.sort_by_path = yes;
        self
    }
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.options.output_dir = dir.into();
        self
    }
    pub fn pretty(mut self, yes: bool) -> Self {
        self.options.pretty = yes;
        self
    }
    pub fn build(self) -> SnapshotOptions {
        self.options
    }
}
impl From<SnapshotOptions> for SnapshotBuilder {
    fn from(options: SnapshotOptions) -> Self {
        Self { options }
    }
}
