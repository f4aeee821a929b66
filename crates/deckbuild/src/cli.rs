//! CLI command structure using clap

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "deckbuild")]
#[command(version, about = "Assemble standalone deck scripts from templates", long_about = None)]
pub struct Cli {
    /// Defaults to `build` of the default recipe
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Project root all recipe paths are relative to
    #[arg(short = 'C', long, global = true, default_value = ".")]
    pub root: PathBuf,

    /// Recipe file (relative to the root); defaults to deckbuild.toml if present
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build recipes, replacing outputs only when their content changed
    Build(SelectArgs),

    /// Report recipes whose output is out of date, without writing
    Check(SelectArgs),

    /// List configured recipes
    List,
}

#[derive(Args, Default)]
pub struct SelectArgs {
    /// Recipe to use instead of the default
    #[arg(short, long, conflicts_with = "all")]
    pub recipe: Option<String>,

    /// Use every configured recipe
    #[arg(long)]
    pub all: bool,
}
