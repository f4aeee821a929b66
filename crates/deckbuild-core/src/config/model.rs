use super::consts::EXECUTABLE_MODE;
use serde::Deserialize;
use std::path::PathBuf;

/// deckbuild.toml schema
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Recipe built when none is named; falls back to the first recipe
    #[serde(default)]
    pub default: Option<String>,
    #[serde(rename = "recipe", default)]
    pub recipes: Vec<Recipe>,
}

/// One buildable script: template + ordered substitutions -> destination
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Recipe {
    pub name: String,
    pub template: PathBuf,
    pub destination: PathBuf,
    #[serde(default = "default_mode")]
    pub mode: u32,
    /// Applied in declaration order
    #[serde(rename = "substitution", default)]
    pub substitutions: Vec<Substitution>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Substitution {
    pub placeholder: String,
    pub source: PathBuf,
}

impl Substitution {
    pub fn new(placeholder: impl Into<String>, source: impl Into<PathBuf>) -> Self {
        Self {
            placeholder: placeholder.into(),
            source: source.into(),
        }
    }
}

impl Recipe {
    pub fn new(
        name: impl Into<String>,
        template: impl Into<PathBuf>,
        destination: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            template: template.into(),
            destination: destination.into(),
            mode: EXECUTABLE_MODE,
            substitutions: Vec::new(),
        }
    }

    pub fn with_substitution(
        mut self,
        placeholder: impl Into<String>,
        source: impl Into<PathBuf>,
    ) -> Self {
        self.substitutions.push(Substitution::new(placeholder, source));
        self
    }

    /// Destination as shown in status lines
    pub fn display_name(&self) -> String {
        self.destination.display().to_string()
    }
}

fn default_mode() -> u32 {
    EXECUTABLE_MODE
}
