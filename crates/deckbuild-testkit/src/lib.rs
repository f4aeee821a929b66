//! Test utilities for deckbuild
//!
//! This crate provides shared testing utilities used across the deckbuild workspace.

use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Template used by the built-in `make-deck` recipe
pub const MAKE_DECK_TEMPLATE: &str = "make_deck.template.sh";
/// LaTeX source used by the built-in `make-deck` recipe
pub const MERGED_TEMPLATE: &str = "pandoc/templates/merged_template.latex";
/// Auxiliary script used by the built-in `make-deck-pptx` recipe
pub const PPTX_SCRIPT: &str = "pandoc/scripts/pptx_postprocess.py";

/// Creates a temporary directory within `.tmp/` at the current directory
///
/// All test files are kept under a single gitignored location.
/// The directory is removed when the returned `TempDir` is dropped.
///
/// # Panics
///
/// Panics if the current directory cannot be determined or `.tmp/` cannot
/// be created.
///
/// # Examples
///
/// ```rust
/// use deckbuild_testkit::temp_dir_in_workspace;
///
/// let temp = temp_dir_in_workspace();
/// std::fs::write(temp.path().join("make_deck"), "#!/bin/sh\n").unwrap();
/// ```
pub fn temp_dir_in_workspace() -> TempDir {
    try_temp_dir_in_workspace().expect("Failed to create temporary directory in .tmp/")
}

/// Alternative with Result for non-test code
pub fn try_temp_dir_in_workspace() -> std::io::Result<TempDir> {
    let workspace_root = std::env::current_dir()?;
    let tmp_base = workspace_root.join(".tmp");
    std::fs::create_dir_all(&tmp_base)?;
    TempDir::new_in(&tmp_base)
}

/// Write `content` to `root/relative`, creating parent directories
pub fn write_file(root: &Path, relative: &str, content: &str) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create parent directory");
    }
    std::fs::write(&path, content).expect("Failed to write fixture file");
    path
}

/// Lay out the inputs of the built-in `make-deck` recipe
pub fn write_make_deck_inputs(root: &Path, template: &str, latex: &str) {
    write_file(root, MAKE_DECK_TEMPLATE, template);
    write_file(root, MERGED_TEMPLATE, latex);
}

/// Hex SHA-256 of a file's contents
pub fn sha256_file(path: &Path) -> String {
    let bytes = std::fs::read(path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e));
    format!("{:x}", Sha256::digest(&bytes))
}

/// Permission bits of a file (without file type bits)
#[cfg(unix)]
pub fn file_mode(path: &Path) -> u32 {
    use std::os::unix::fs::PermissionsExt;

    std::fs::metadata(path)
        .unwrap_or_else(|e| panic!("Failed to stat {}: {}", path.display(), e))
        .permissions()
        .mode()
        & 0o7777
}

/// Names of entries in `dir`, sorted
pub fn dir_entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap_or_else(|e| panic!("Failed to list {}: {}", dir.display(), e))
        .map(|entry| {
            entry
                .expect("Failed to read directory entry")
                .file_name()
                .to_string_lossy()
                .into_owned()
        })
        .collect();
    names.sort();
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_dir_is_under_dot_tmp() {
        let temp = temp_dir_in_workspace();
        let cwd = std::env::current_dir().unwrap();
        assert!(temp.path().starts_with(cwd.join(".tmp")));
    }

    #[test]
    fn test_write_file_creates_parents() {
        let temp = temp_dir_in_workspace();
        let path = write_file(temp.path(), "a/b/c.txt", "x");
        assert_eq!(std::fs::read_to_string(path).unwrap(), "x");
    }

    #[test]
    fn test_sha256_known_value() {
        let temp = temp_dir_in_workspace();
        let path = write_file(temp.path(), "empty", "");
        assert_eq!(
            sha256_file(&path),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_dir_entries_sorted() {
        let temp = temp_dir_in_workspace();
        write_file(temp.path(), "b", "");
        write_file(temp.path(), "a", "");
        assert_eq!(dir_entries(temp.path()), vec!["a", "b"]);
    }
}
