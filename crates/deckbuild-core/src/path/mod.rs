//! Path helpers for recipe entries
//!
//! Recipe paths are always relative to the project root. Rust's
//! `Path::is_absolute()` is platform-dependent (`/tmp` is rooted but not
//! absolute on Windows), so validation is component-based instead:
//!
//! ```rust
//! use deckbuild_core::path::has_absolute_or_rooted_component;
//! use std::path::Path;
//!
//! assert!(has_absolute_or_rooted_component(Path::new("/tmp/make_deck")));
//! assert!(!has_absolute_or_rooted_component(Path::new("pandoc/templates")));
//! ```

use crate::error::{DeckbuildError, Result};
use std::path::{Component, Path, PathBuf};

/// Check if path is absolute OR rooted (cross-platform)
pub fn has_absolute_or_rooted_component(path: &Path) -> bool {
    if path.is_absolute() {
        return true;
    }

    path.components()
        .any(|c| matches!(c, Component::RootDir | Component::Prefix(_)))
}

/// Validate that a recipe path is non-empty and relative
///
/// `field` names the offending config entry in the error
/// (e.g. `recipe.make-deck.template`).
pub fn ensure_relative(field: &str, path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Err(DeckbuildError::invalid(field, "path must not be empty"));
    }
    if has_absolute_or_rooted_component(path) {
        return Err(DeckbuildError::invalid(
            field,
            format!(
                "path must be relative to the project root: '{}'",
                path.display()
            ),
        ));
    }
    Ok(())
}

/// Join a validated relative path onto the project root
pub fn resolve(root: &Path, relative: &Path) -> PathBuf {
    root.join(relative)
}

/// Lexically normalize a relative path for equality checks
///
/// Drops `.` components so `./make_deck` and `make_deck` compare equal.
/// `..` is kept as-is; no filesystem access happens here.
pub fn normalize(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}
