//! Build command - render recipes and replace changed outputs

use crate::cli::SelectArgs;
use crate::context::Context;
use crate::output::print_text;
use anyhow::{Context as _, Result};
use deckbuild_core::DeckBuilder;
use log::info;

pub struct BuildCommand {
    pub ctx: Context,
    pub select: SelectArgs,
}

impl crate::commands::Command for BuildCommand {
    fn run(&self) -> Result<()> {
        for recipe in self.ctx.select(&self.select)? {
            info!("Building recipe '{}'", recipe.name);
            let outcome = DeckBuilder::new(&self.ctx.root, recipe)
                .build()
                .with_context(|| format!("Failed to build {}", recipe.display_name()))?;
            print_text(&outcome.status_line(&recipe.display_name()))?;
        }
        Ok(())
    }
}

impl BuildCommand {
    pub fn new(ctx: Context, select: SelectArgs) -> Self {
        Self { ctx, select }
    }
}
