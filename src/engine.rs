use crate::content::{self, BinaryHeuristic};
use crate::error::SnapshotError;
use crate::exclude::{ExcludeSet, to_slash};
use crate::options::{BinaryDetection, SnapshotOptions, Source};
use crate::types::FileRecord;
use crate::vcs;
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use std::fs;
use std::path::{Path, PathBuf};
enum Entries {
    Tree(ignore::Walk),
    Tracked(std::vec::IntoIter<String>),
}
/// Produces one [`FileRecord`] per retained file, reading each file fully
/// before moving on to the next.
pub struct Walker {
    root: PathBuf,
    entries: Entries,
    excludes: ExcludeSet,
    matcher: Option<GlobSet>,
    max_file_size: Option<u64>,
    include_binary: bool,
    binary_detection: BinaryDetection,
    heuristic: BinaryHeuristic,
}
impl Walker {
    pub fn new(options: &SnapshotOptions) -> Result<Self, SnapshotError> {
        options.validate()?;
        let root = options.root.clone();
        if !root.is_dir() {
            return Err(SnapshotError::Walk(format!(
                "root {} is not a directory",
                root.display()
            )));
        }
        let excludes =
            ExcludeSet::new(&options.excluded_dirs).aligned_prefixes(options.aligned_prefixes);
        let matcher = build_matcher(&options.ignore_patterns)?;
        let entries = match options.source {
            Source::Walk => Entries::Tree(build_walk(options, &root, &excludes, &matcher)),
            Source::Vcs => Entries::Tracked(vcs::list_files(&root)?.into_iter()),
        };
        Ok(Self {
            root,
            entries,
            excludes,
            matcher,
            max_file_size: options.max_file_size,
            include_binary: options.include_binary,
            binary_detection: options.binary_detection,
            heuristic: options.heuristic,
        })
    }
    fn is_filtered(&self, rel: &Path) -> bool {
        is_filtered(&self.excludes, &self.matcher, rel)
    }
    fn too_large(&self, size: u64) -> bool {
        self.max_file_size.is_some_and(|limit| size > limit)
    }
    fn tree_record(&self, path: &Path) -> Option<FileRecord> {
        let rel_path = path.strip_prefix(&self.root).unwrap_or(path);
        let rel = to_slash(rel_path);
        let metadata = match fs::metadata(path) {
            Ok(m) => m,
            Err(e) => return Some(self.failed(rel, path, e)),
        };
        if metadata.is_dir() {
            return None;
        }
        if !metadata.is_file() {
            #[cfg(feature = "logging")]
            tracing::debug!("Not a regular file, skipping {}", rel);
            return None;
        }
        let size = metadata.len();
        if self.too_large(size) {
            #[cfg(feature = "logging")]
            tracing::debug!("File too large ({} > {:?}), skipping {}", size, self.max_file_size, rel);
            return None;
        }
        let bytes = match fs::read(path) {
            Ok(b) => b,
            Err(e) => return Some(self.failed(rel, path, e)),
        };
        let extension = extension_of(rel_path);
        if content::is_binary(&bytes, self.binary_detection, &self.heuristic) {
            #[cfg(feature = "logging")]
            tracing::debug!("Binary file detected: {}", rel);
            let payload = self.include_binary.then(|| content::encode_binary(&bytes));
            Some(FileRecord::binary(rel, extension, size, payload))
        } else {
            Some(FileRecord::text(rel, extension, size, content::decode_text(bytes)))
        }
    }
    fn tracked_record(&self, rel: String) -> Option<FileRecord> {
        if self.is_filtered(Path::new(&rel)) {
            return None;
        }
        let path = self.root.join(&rel);
        if let Ok(metadata) = fs::metadata(&path) {
            if self.too_large(metadata.len()) {
                #[cfg(feature = "logging")]
                tracing::debug!("File too large ({}), skipping {}", metadata.len(), rel);
                return None;
            }
        }
        let content = match fs::read(&path) {
            Ok(bytes) => content::decode_text(bytes),
            Err(e) => {
                #[cfg(feature = "logging")]
                tracing::warn!("Could not read {}: {}", path.display(), e);
                format!("Could not read file: {}", e)
            }
        };
        Some(FileRecord::plain(rel, content))
    }
    /// Turns a walk error that names an entry into an error record; errors
    /// without a path are logged and skipped.
    fn walk_error_record(&self, err: ignore::Error) -> Option<FileRecord> {
        let Some(path) = error_path(&err) else {
            #[cfg(feature = "logging")]
            tracing::warn!("Walk error: {}", err);
            return None;
        };
        let rel_path = path.strip_prefix(&self.root).unwrap_or(path);
        if rel_path.as_os_str().is_empty() || self.is_filtered(rel_path) {
            return None;
        }
        #[cfg(feature = "logging")]
        tracing::warn!("Walk error: {}", err);
        Some(FileRecord::failed(to_slash(rel_path), err.to_string()))
    }
    fn failed(&self, rel: String, path: &Path, e: std::io::Error) -> FileRecord {
        let err = SnapshotError::io(path, e);
        #[cfg(feature = "logging")]
        tracing::warn!("{}", err);
        FileRecord::failed(rel, err.to_string())
    }
}
impl Iterator for Walker {
    type Item = FileRecord;
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let record = match &mut self.entries {
                Entries::Tree(walk) => match walk.next()? {
                    Ok(entry) => {
                        if entry.depth() == 0 || entry.file_type().is_some_and(|t| t.is_dir()) {
                            continue;
                        }
                        let path = entry.into_path();
                        self.tree_record(&path)
                    }
                    Err(err) => self.walk_error_record(err),
                },
                Entries::Tracked(paths) => {
                    let rel = paths.next()?;
                    self.tracked_record(rel)
                }
            };
            if let Some(record) = record {
                return Some(record);
            }
        }
    }
}
/// Collects every record for `options` in enumeration order.
pub fn walk(options: &SnapshotOptions) -> Result<Vec<FileRecord>, SnapshotError> {
    #[cfg(feature = "logging")]
    tracing::debug!("Walking {} ({:?})", options.root.display(), options.source);
    Ok(Walker::new(options)?.collect())
}
fn build_walk(
    options: &SnapshotOptions,
    root: &Path,
    excludes: &ExcludeSet,
    matcher: &Option<GlobSet>,
) -> ignore::Walk {
    let mut builder = WalkBuilder::new(root);
    builder
        .standard_filters(false)
        .hidden(!options.include_hidden)
        .git_ignore(options.respect_gitignore)
        .git_exclude(options.respect_gitignore)
        .require_git(false)
        .max_depth(options.max_depth)
        .follow_links(options.follow_links);
    let root = root.to_path_buf();
    let excludes = excludes.clone();
    let matcher = matcher.clone();
    builder.filter_entry(move |entry| {
        if entry.depth() == 0 {
            return true;
        }
        let rel = entry.path().strip_prefix(&root).unwrap_or(entry.path());
        if is_filtered(&excludes, &matcher, rel) {
            #[cfg(feature = "logging")]
            tracing::debug!("Pruned {}", rel.display());
            return false;
        }
        true
    });
    builder.build()
}
fn build_matcher(patterns: &[String]) -> Result<Option<GlobSet>, SnapshotError> {
    if patterns.is_empty() {
        return Ok(None);
    }
    let mut glob_builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|e| {
            SnapshotError::InvalidPattern(format!("Invalid glob pattern '{}': {}", pattern, e))
        })?;
        glob_builder.add(glob);
    }
    let set = glob_builder
        .build()
        .map_err(|e| SnapshotError::InvalidPattern(format!("Failed to build glob set: {}", e)))?;
    Ok(Some(set))
}
fn is_filtered(excludes: &ExcludeSet, matcher: &Option<GlobSet>, rel: &Path) -> bool {
    if excludes.is_excluded(rel) {
        return true;
    }
    matcher
        .as_ref()
        .is_some_and(|m| m.is_match(to_slash(rel)))
}
fn error_path(err: &ignore::Error) -> Option<&Path> {
    match err {
        ignore::Error::WithPath { path, .. } => Some(path.as_path()),
        ignore::Error::WithDepth { err, .. } => error_path(err),
        ignore::Error::WithLineNumber { err, .. } => error_path(err),
        ignore::Error::Loop { child, .. } => Some(child.as_path()),
        _ => None,
    }
}
fn extension_of(rel: &Path) -> String {
    rel.extension()
        .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
        .unwrap_or_default()
}
