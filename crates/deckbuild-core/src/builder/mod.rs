//! Deck builder - render a recipe and replace its destination only on change
//!
//! A build always goes through a staging file created next to the
//! destination:
//! 1. Read the template and every substitution source
//! 2. Render the substitutions in recipe order
//! 3. Write the staging file, fsync it and apply the recipe mode
//! 4. Compare with the current destination (absent counts as different)
//! 5. Identical: remove the staging file. Different: persist (atomic rename)
//!
//! The staging file is a `tempfile::NamedTempFile`, so it is removed on drop
//! if any step after its creation fails.

use crate::config::consts::STAGING_SUFFIX;
use crate::config::Recipe;
use crate::error::{DeckbuildError, Result};
use crate::path;
use crate::render::{render, Rendered};
use log::{debug, warn};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// What a build did (or, for `check`, would do)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildOutcome {
    Updated,
    AlreadyUpToDate,
}

impl BuildOutcome {
    /// One-line status for a destination display name
    pub fn status_line(&self, name: &str) -> String {
        match self {
            BuildOutcome::Updated => format!("Updated {} executable", name),
            BuildOutcome::AlreadyUpToDate => format!("{} is already up to date", name),
        }
    }
}

pub struct DeckBuilder<'a> {
    root: PathBuf,
    recipe: &'a Recipe,
}

impl<'a> DeckBuilder<'a> {
    /// `root` is the directory all recipe paths are relative to
    pub fn new(root: impl Into<PathBuf>, recipe: &'a Recipe) -> Self {
        Self {
            root: root.into(),
            recipe,
        }
    }

    pub fn destination(&self) -> PathBuf {
        path::resolve(&self.root, &self.recipe.destination)
    }

    /// Read all inputs and render them in memory
    pub fn render(&self) -> Result<Rendered> {
        let template_path = path::resolve(&self.root, &self.recipe.template);
        debug!("Reading template {}", template_path.display());
        let template = read_text(&template_path)?;

        let mut payloads = Vec::with_capacity(self.recipe.substitutions.len());
        for sub in &self.recipe.substitutions {
            let source = path::resolve(&self.root, &sub.source);
            debug!("Reading {} payload from {}", sub.placeholder, source.display());
            payloads.push((sub.placeholder.as_str(), read_text(&source)?));
        }

        let rendered = render(&template, &payloads);
        for (placeholder, count) in &rendered.occurrences {
            debug!("{}: {} occurrence(s) replaced", placeholder, count);
        }
        for placeholder in rendered.unused_placeholders() {
            warn!(
                "{} does not occur in {}",
                placeholder,
                self.recipe.template.display()
            );
        }

        Ok(rendered)
    }

    /// Build the destination, replacing it only if the content changed
    pub fn build(&self) -> Result<BuildOutcome> {
        let rendered = self.render()?;
        let destination = self.destination();

        let staged = self.stage(&destination, rendered.text.as_bytes())?;

        match read_existing(&destination)? {
            Some(existing) if existing == rendered.text.as_bytes() => {
                debug!("{} unchanged, discarding staged output", destination.display());
                let staged_path = staged.path().to_path_buf();
                staged
                    .close()
                    .map_err(|e| DeckbuildError::write("remove temporary file", staged_path, e))?;
                Ok(BuildOutcome::AlreadyUpToDate)
            }
            existing => {
                debug!(
                    "{} {}, replacing",
                    destination.display(),
                    if existing.is_some() { "differs" } else { "does not exist" }
                );
                staged.persist(&destination).map_err(|e| {
                    DeckbuildError::write("rename temporary file onto", &destination, e.error)
                })?;
                sync_parent_dir(&destination)?;
                Ok(BuildOutcome::Updated)
            }
        }
    }

    /// Report whether `build` would update the destination, without writing
    pub fn check(&self) -> Result<BuildOutcome> {
        let rendered = self.render()?;
        let destination = self.destination();

        match read_existing(&destination)? {
            Some(existing) if existing == rendered.text.as_bytes() => {
                Ok(BuildOutcome::AlreadyUpToDate)
            }
            _ => Ok(BuildOutcome::Updated),
        }
    }

    /// Write `content` to a staging file in the destination's directory
    fn stage(&self, destination: &Path, content: &[u8]) -> Result<NamedTempFile> {
        let dir = match destination.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)
            .map_err(|e| DeckbuildError::write("create directory", dir, e))?;

        let prefix = match destination.file_name() {
            Some(name) => format!(".{}.", name.to_string_lossy()),
            None => ".deckbuild.".to_string(),
        };

        let mut staged = tempfile::Builder::new()
            .prefix(&prefix)
            .suffix(STAGING_SUFFIX)
            .tempfile_in(dir)
            .map_err(|e| DeckbuildError::write("create temporary file in", dir, e))?;

        staged
            .write_all(content)
            .map_err(|e| DeckbuildError::write("write temporary file", staged.path(), e))?;
        staged
            .as_file()
            .sync_all()
            .map_err(|e| DeckbuildError::write("sync temporary file", staged.path(), e))?;

        set_mode(staged.path(), self.recipe.mode)?;

        debug!("Staged {} bytes at {}", content.len(), staged.path().display());
        Ok(staged)
    }
}

fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| DeckbuildError::read(path, e))
}

/// Current destination bytes; `None` only when it does not exist
fn read_existing(path: &Path) -> Result<Option<Vec<u8>>> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(DeckbuildError::read(path, e)),
    }
}

/// Fsync the directory holding `path` so a completed rename is durable
#[cfg(unix)]
fn sync_parent_dir(path: &Path) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::File::open(dir)
        .and_then(|d| d.sync_all())
        .map_err(|e| DeckbuildError::write("sync directory", dir, e))
}

#[cfg(not(unix))]
fn sync_parent_dir(_path: &Path) -> Result<()> {
    Ok(())
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: u32) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(mode))
        .map_err(|e| DeckbuildError::write("set permissions on", path, e))
}

#[cfg(not(unix))]
fn set_mode(_path: &Path, _mode: u32) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use deckbuild_testkit::{temp_dir_in_workspace, write_file};

    fn echo_recipe() -> Recipe {
        Recipe::new("echo", "echo.template.sh", "echo").with_substitution("__X__", "x.txt")
    }

    #[test]
    fn test_status_lines() {
        assert_eq!(
            BuildOutcome::Updated.status_line("make_deck"),
            "Updated make_deck executable"
        );
        assert_eq!(
            BuildOutcome::AlreadyUpToDate.status_line("make_deck"),
            "make_deck is already up to date"
        );
    }

    #[test]
    fn test_render_reads_inputs_relative_to_root() {
        let temp = temp_dir_in_workspace();
        write_file(temp.path(), "echo.template.sh", "echo __X__");
        write_file(temp.path(), "x.txt", "hello");

        let recipe = echo_recipe();
        let rendered = DeckBuilder::new(temp.path(), &recipe).render().unwrap();
        assert_eq!(rendered.text, "echo hello");
    }

    #[test]
    fn test_missing_template_is_read_error() {
        let temp = temp_dir_in_workspace();
        write_file(temp.path(), "x.txt", "hello");

        let recipe = echo_recipe();
        let err = DeckBuilder::new(temp.path(), &recipe).build().unwrap_err();
        match err {
            DeckbuildError::ReadError { path, source } => {
                assert!(path.ends_with("echo.template.sh"));
                assert_eq!(source.kind(), io::ErrorKind::NotFound);
            }
            other => panic!("expected READ_ERROR, got: {other}"),
        }
        assert!(!temp.path().join("echo").exists());
    }

    #[test]
    fn test_missing_payload_is_read_error() {
        let temp = temp_dir_in_workspace();
        write_file(temp.path(), "echo.template.sh", "echo __X__");

        let recipe = echo_recipe();
        let err = DeckBuilder::new(temp.path(), &recipe).build().unwrap_err();
        assert!(matches!(err, DeckbuildError::ReadError { ref path, .. } if path.ends_with("x.txt")));
    }

    #[test]
    fn test_read_existing_absent_is_none() {
        let temp = temp_dir_in_workspace();
        assert!(read_existing(&temp.path().join("nothing")).unwrap().is_none());
    }

    #[test]
    fn test_read_existing_directory_is_error() {
        let temp = temp_dir_in_workspace();
        let err = read_existing(temp.path()).unwrap_err();
        assert!(matches!(err, DeckbuildError::ReadError { .. }));
    }

    #[test]
    fn test_stage_creates_sibling_with_mode() {
        let temp = temp_dir_in_workspace();
        let recipe = echo_recipe();
        let builder = DeckBuilder::new(temp.path(), &recipe);

        let destination = builder.destination();
        let staged = builder.stage(&destination, b"content").unwrap();
        assert_eq!(staged.path().parent(), destination.parent());
        assert_ne!(staged.path(), destination.as_path());
        assert_eq!(fs::read(staged.path()).unwrap(), b"content");

        #[cfg(unix)]
        assert_eq!(deckbuild_testkit::file_mode(staged.path()), 0o755);

        let staged_path = staged.path().to_path_buf();
        drop(staged);
        assert!(!staged_path.exists());
    }

    #[test]
    fn test_stage_creates_missing_parent() {
        let temp = temp_dir_in_workspace();
        let recipe = Recipe::new("nested", "t.sh", "bin/deck").with_substitution("__X__", "x");
        let builder = DeckBuilder::new(temp.path(), &recipe);

        let staged = builder.stage(&builder.destination(), b"x").unwrap();
        assert!(temp.path().join("bin").is_dir());
        assert!(staged.path().starts_with(temp.path().join("bin")));
    }
}
