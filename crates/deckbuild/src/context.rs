//! Shared context for CLI commands

use crate::cli::SelectArgs;
use anyhow::{Context as _, Result};
use deckbuild_core::{Config, Recipe};
use std::path::{Path, PathBuf};

/// Project root plus the recipes configured for it
pub struct Context {
    pub root: PathBuf,
    pub config: Config,
}

impl Context {
    /// Load recipes for `root`
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit config file is missing, or any
    /// config file cannot be parsed or fails validation.
    pub fn new(root: PathBuf, config_path: Option<&Path>) -> Result<Self> {
        let config = Config::discover(&root, config_path)
            .with_context(|| format!("Failed to load recipes for {}", root.display()))?;
        Ok(Self { root, config })
    }

    /// Recipes picked by `--recipe` / `--all`, default recipe otherwise
    pub fn select(&self, args: &SelectArgs) -> Result<Vec<&Recipe>> {
        if args.all {
            return Ok(self.config.recipes.iter().collect());
        }
        let recipe = match &args.recipe {
            Some(name) => self.config.recipe(name)?,
            None => self.config.default_recipe()?,
        };
        Ok(vec![recipe])
    }
}
