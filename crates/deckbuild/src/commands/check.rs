//! Check command - report stale outputs without touching them

use crate::cli::SelectArgs;
use crate::context::Context;
use crate::output::print_text;
use anyhow::{Context as _, Result};
use deckbuild_core::{BuildOutcome, DeckBuilder};

pub struct CheckCommand {
    pub ctx: Context,
    pub select: SelectArgs,
}

impl crate::commands::Command for CheckCommand {
    fn run(&self) -> Result<()> {
        let mut stale = Vec::new();

        for recipe in self.ctx.select(&self.select)? {
            let name = recipe.display_name();
            let outcome = DeckBuilder::new(&self.ctx.root, recipe)
                .check()
                .with_context(|| format!("Failed to check {}", name))?;

            match outcome {
                BuildOutcome::AlreadyUpToDate => print_text(&outcome.status_line(&name))?,
                BuildOutcome::Updated => {
                    print_text(&format!("{} is out of date", name))?;
                    stale.push(name);
                }
            }
        }

        if !stale.is_empty() {
            anyhow::bail!(
                "Outputs not fresh: {:?}\nRun 'deckbuild build' to update them.",
                stale
            );
        }
        Ok(())
    }
}

impl CheckCommand {
    pub fn new(ctx: Context, select: SelectArgs) -> Self {
        Self { ctx, select }
    }
}
