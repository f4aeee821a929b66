// Core modules
pub mod builder;
pub mod config;
pub mod error;
pub mod path;
pub mod render;

// Re-export commonly used types
pub use builder::{BuildOutcome, DeckBuilder};
pub use config::{Config, Recipe, Substitution};
pub use error::{DeckbuildError, Result};
