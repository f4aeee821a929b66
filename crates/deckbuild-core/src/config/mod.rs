//! Recipe configuration
//!
//! Without a `deckbuild.toml` the built-in `make-deck` recipes are used.
//! A config file replaces the built-ins entirely; it is parsed with `toml`
//! and then validated as a whole before any recipe is built.

pub mod consts;
mod model;

pub use model::{Config, Recipe, Substitution};

use crate::error::{DeckbuildError, Result};
use crate::path;
use consts::make_deck;
use log::debug;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

impl Config {
    /// Recipes compiled into the binary
    pub fn builtin() -> Self {
        let base = Recipe::new(make_deck::RECIPE, make_deck::TEMPLATE, make_deck::DESTINATION)
            .with_substitution(make_deck::LATEX_PLACEHOLDER, make_deck::LATEX_SOURCE);

        let mut pptx = base
            .clone()
            .with_substitution(make_deck::PPTX_PLACEHOLDER, make_deck::PPTX_SOURCE);
        pptx.name = make_deck::PPTX_RECIPE.to_string();

        Self {
            default: Some(make_deck::RECIPE.to_string()),
            recipes: vec![base, pptx],
        }
    }

    /// Parse and validate a config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| DeckbuildError::read(path, e))?;
        Self::parse(path, &content)
    }

    /// Parse and validate config text; `origin` is only used in errors
    pub fn parse(origin: &Path, content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| DeckbuildError::ConfigParseError {
            path: origin.to_path_buf(),
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Resolve the config for a project root
    ///
    /// An explicit path must exist. Otherwise `<root>/deckbuild.toml` is used
    /// when present, and the built-ins when not.
    pub fn discover(root: &Path, explicit: Option<&Path>) -> Result<Self> {
        if let Some(file) = explicit {
            let file = path::resolve(root, file);
            debug!("Loading config from {}", file.display());
            return Self::load(file);
        }

        let candidate = root.join(consts::CONFIG_FILE);
        match std::fs::metadata(&candidate) {
            Ok(_) => {
                debug!("Loading config from {}", candidate.display());
                Self::load(candidate)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No {} in {}, using built-in recipes", consts::CONFIG_FILE, root.display());
                Ok(Self::builtin())
            }
            Err(e) => Err(DeckbuildError::read(candidate, e)),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.recipes.is_empty() {
            return Err(DeckbuildError::invalid(
                "recipe",
                "at least one [[recipe]] is required",
            ));
        }

        let mut names = HashSet::new();
        for recipe in &self.recipes {
            if !names.insert(recipe.name.as_str()) {
                return Err(DeckbuildError::invalid(
                    format!("recipe.{}", recipe.name),
                    "duplicate recipe name",
                ));
            }
            recipe.validate()?;
        }

        if let Some(default) = &self.default {
            if !names.contains(default.as_str()) {
                return Err(DeckbuildError::invalid(
                    "default",
                    format!("'{}' does not name a recipe", default),
                ));
            }
        }

        Ok(())
    }

    pub fn recipe(&self, name: &str) -> Result<&Recipe> {
        self.recipes
            .iter()
            .find(|r| r.name == name)
            .ok_or_else(|| DeckbuildError::RecipeNotFound(name.to_string()))
    }

    pub fn default_recipe(&self) -> Result<&Recipe> {
        match &self.default {
            Some(name) => self.recipe(name),
            None => self
                .recipes
                .first()
                .ok_or_else(|| DeckbuildError::invalid("recipe", "no recipes configured")),
        }
    }

    pub fn default_name(&self) -> Option<&str> {
        self.default
            .as_deref()
            .or_else(|| self.recipes.first().map(|r| r.name.as_str()))
    }
}

impl Recipe {
    pub fn validate(&self) -> Result<()> {
        let field = |key: &str| format!("recipe.{}.{}", self.name, key);

        if self.name.trim().is_empty() {
            return Err(DeckbuildError::invalid("recipe.name", "must not be empty"));
        }

        path::ensure_relative(&field("template"), &self.template)?;
        path::ensure_relative(&field("destination"), &self.destination)?;
        if self.destination.file_name().is_none() {
            return Err(DeckbuildError::invalid(
                field("destination"),
                format!("'{}' has no file name", self.destination.display()),
            ));
        }

        if self.mode > 0o7777 {
            return Err(DeckbuildError::invalid(
                field("mode"),
                format!("{:#o} is not a permission mode", self.mode),
            ));
        }

        if self.substitutions.is_empty() {
            return Err(DeckbuildError::invalid(
                field("substitution"),
                "at least one substitution is required",
            ));
        }

        let destination = path::normalize(&self.destination);
        if destination == path::normalize(&self.template) {
            return Err(DeckbuildError::invalid(
                field("destination"),
                "destination must differ from the template",
            ));
        }

        let mut placeholders = HashSet::new();
        for sub in &self.substitutions {
            if sub.placeholder.is_empty() {
                return Err(DeckbuildError::invalid(
                    field("substitution.placeholder"),
                    "must not be empty",
                ));
            }
            if !placeholders.insert(sub.placeholder.as_str()) {
                return Err(DeckbuildError::invalid(
                    field("substitution.placeholder"),
                    format!("'{}' is configured more than once", sub.placeholder),
                ));
            }
            path::ensure_relative(&field("substitution.source"), &sub.source)?;
            if path::normalize(&sub.source) == destination {
                return Err(DeckbuildError::invalid(
                    field("substitution.source"),
                    "source must differ from the destination",
                ));
            }
        }

        Ok(())
    }
}
