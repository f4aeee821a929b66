mod cli;
mod commands;
mod context;
mod output;

use crate::cli::{Cli, Commands};
use crate::commands::Command as _;
use crate::commands::build::BuildCommand;
use crate::commands::check::CheckCommand;
use crate::commands::list::ListCommand;
use crate::context::Context;
use anyhow::Result;
use clap::Parser;

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let ctx = Context::new(cli.root, cli.config.as_deref())?;

    match cli.command.unwrap_or_else(|| Commands::Build(Default::default())) {
        Commands::Build(select) => BuildCommand::new(ctx, select).run(),
        Commands::Check(select) => CheckCommand::new(ctx, select).run(),
        Commands::List => ListCommand { ctx }.run(),
    }
}
