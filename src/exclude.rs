//! Excluded-directory matching.
//!
//! An entry in the set matches a relative path in one of two ways: it equals one
//! of the path's segments, or the path's `/`-joined string starts with it.
//! Entries containing a `/` can never equal a single segment, so they only ever
//! match as prefixes. Matching is exact and case-sensitive.
//!
//! With [`ExcludeSet::aligned_prefixes`] the prefix must end on a segment
//! boundary, so `build` no longer swallows `build.rs` or `buildscripts/`.

use std::path::{Component, Path};

/// Directory names and path prefixes whose subtrees are skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExcludeSet {
    entries: Vec<String>,
    aligned: bool,
}

impl ExcludeSet {
    /// Builds a set from configured names, normalizing separators and dropping
    /// a leading `./` or trailing `/`.
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut entries: Vec<String> = entries
            .into_iter()
            .filter_map(|e| normalize_entry(e.as_ref()))
            .collect();
        entries.sort();
        entries.dedup();
        Self {
            entries,
            aligned: false,
        }
    }

    /// Restricts prefix matches to whole leading segments.
    pub fn aligned_prefixes(mut self, yes: bool) -> Self {
        self.aligned = yes;
        self
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if `rel` (relative to the scan root) lies under an
    /// excluded directory.
    pub fn is_excluded(&self, rel: &Path) -> bool {
        if self.entries.is_empty() {
            return false;
        }
        let segments: Vec<String> = rel
            .components()
            .filter_map(|c| match c {
                Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();
        if segments
            .iter()
            .any(|seg| self.entries.iter().any(|e| e == seg))
        {
            return true;
        }
        let joined = segments.join("/");
        self.entries.iter().any(|e| self.has_prefix(&joined, e))
    }

    fn has_prefix(&self, path: &str, prefix: &str) -> bool {
        match path.strip_prefix(prefix) {
            Some(rest) => !self.aligned || rest.is_empty() || rest.starts_with('/'),
            None => false,
        }
    }
}

/// Joins the normal components of `rel` with forward slashes.
pub fn to_slash(rel: &Path) -> String {
    rel.components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

fn normalize_entry(raw: &str) -> Option<String> {
    let mut s = raw.trim().replace('\\', "/");
    while let Some(rest) = s.strip_prefix("./") {
        s = rest.to_string();
    }
    let s = s.trim_matches('/');
    (!s.is_empty()).then(|| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn set(entries: &[&str]) -> ExcludeSet {
        ExcludeSet::new(entries.iter().copied())
    }

    #[test]
    fn single_segment_matches_anywhere() {
        let ex = set(&["node_modules", "target"]);
        assert!(ex.is_excluded(Path::new("node_modules")));
        assert!(ex.is_excluded(Path::new("web/node_modules/react/index.js")));
        assert!(ex.is_excluded(Path::new("crates/a/target/debug/a")));
        assert!(!ex.is_excluded(Path::new("src/targets.rs")));
    }

    #[test]
    fn multi_segment_matches_only_as_prefix() {
        let ex = set(&["db/migrations"]);
        assert!(ex.is_excluded(Path::new("db/migrations")));
        assert!(ex.is_excluded(Path::new("db/migrations/0001_init.sql")));
        assert!(!ex.is_excluded(Path::new("app/db/migrations/0001_init.sql")));
        assert!(ex.is_excluded(Path::new("db/migrations_old/x.sql")));
        assert!(!ex.is_excluded(Path::new("db/seed.sql")));
        assert!(!ex.is_excluded(Path::new("db/migration.sql")));
    }

    #[test]
    fn prefix_is_a_plain_string_prefix() {
        let ex = set(&["build"]);
        assert!(ex.is_excluded(Path::new("build/out.o")));
        assert!(ex.is_excluded(Path::new("buildscripts/run.sh")));
        assert!(!ex.is_excluded(Path::new("scripts/rebuild.sh")));
    }

    #[test]
    fn aligned_prefixes_stop_at_segment_boundaries() {
        let ex = set(&["build", "db/migrations"]).aligned_prefixes(true);
        assert!(ex.is_excluded(Path::new("build/out.o")));
        assert!(!ex.is_excluded(Path::new("build.rs")));
        assert!(!ex.is_excluded(Path::new("buildscripts/run.sh")));
        assert!(ex.is_excluded(Path::new("db/migrations/0001_init.sql")));
        assert!(!ex.is_excluded(Path::new("db/migrations_old/x.sql")));
    }

    #[test]
    fn comparison_is_case_sensitive() {
        let ex = set(&["Build"]);
        assert!(!ex.is_excluded(Path::new("build/out.o")));
        assert!(ex.is_excluded(Path::new("Build/out.o")));
    }

    #[test]
    fn no_glob_semantics() {
        let ex = set(&["*.log", "tmp?"]);
        assert!(!ex.is_excluded(Path::new("server.log")));
        assert!(!ex.is_excluded(Path::new("tmp1/a")));
    }

    #[test]
    fn entries_are_normalized() {
        let ex = set(&["./db\\migrations/", "", "  ", "/dist/"]);
        assert_eq!(ex.entries(), &["db/migrations".to_string(), "dist".to_string()]);
        assert!(ex.is_excluded(Path::new("db/migrations/a.sql")));
        assert!(ex.is_excluded(Path::new("dist")));
    }

    #[test]
    fn empty_set_excludes_nothing() {
        let ex = ExcludeSet::default();
        assert!(ex.is_empty());
        assert!(!ex.is_excluded(Path::new(".git/config")));
    }

    #[test]
    fn to_slash_joins_components() {
        let p: PathBuf = ["a", "b", "c.txt"].iter().collect();
        assert_eq!(to_slash(&p), "a/b/c.txt");
        assert_eq!(to_slash(Path::new("./x/y")), "x/y");
    }
}
