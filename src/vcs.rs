//! File discovery through git: tracked files plus untracked files that are not
//! ignored.

use crate::error::SnapshotError;
use std::path::Path;
use std::process::Command;

/// Fails unless `root` carries a `.git` marker (directory, or file for worktrees).
pub fn ensure_repository(root: &Path) -> Result<(), SnapshotError> {
    if root.join(".git").exists() {
        Ok(())
    } else {
        Err(SnapshotError::NotARepository(root.to_path_buf()))
    }
}

/// Returns root-relative paths, sorted and de-duplicated.
pub fn list_files(root: &Path) -> Result<Vec<String>, SnapshotError> {
    ensure_repository(root)?;
    let output = Command::new("git")
        .args([
            "ls-files",
            "-z",
            "--cached",
            "--others",
            "--exclude-standard",
            "--",
            ".",
        ])
        .current_dir(root)
        .output()
        .map_err(|e| SnapshotError::Vcs(format!("failed to run git: {}", e)))?;
    if !output.status.success() {
        return Err(SnapshotError::Vcs(format!(
            "git ls-files exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }
    let mut files: Vec<String> = output
        .stdout
        .split(|&b| b == 0)
        .filter_map(parse_output_chunk)
        .collect();
    files.sort();
    files.dedup();
    Ok(files)
}

fn parse_output_chunk(chunk: &[u8]) -> Option<String> {
    if chunk.is_empty() {
        return None;
    }
    Some(String::from_utf8_lossy(chunk).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_marker_is_rejected() {
        let dir = tempdir().unwrap();
        let err = list_files(dir.path()).unwrap_err();
        assert!(matches!(err, SnapshotError::NotARepository(_)));
    }

    #[test]
    fn marker_file_is_accepted() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join(".git"), "gitdir: ../main/.git/worktrees/x").unwrap();
        assert!(ensure_repository(dir.path()).is_ok());
    }

    #[test]
    fn output_chunks_are_kept_verbatim() {
        assert_eq!(parse_output_chunk(b""), None);
        assert_eq!(parse_output_chunk(b"src/lib.rs"), Some("src/lib.rs".to_string()));
        assert_eq!(parse_output_chunk(b" notes .txt "), Some(" notes .txt ".to_string()));
    }
}
