use crate::context::Context;
use crate::output::print_text;
use anyhow::Result;

pub struct ListCommand {
    pub ctx: Context,
}

impl crate::commands::Command for ListCommand {
    fn run(&self) -> Result<()> {
        let default = self.ctx.config.default_name();
        for recipe in &self.ctx.config.recipes {
            let marker = if Some(recipe.name.as_str()) == default { "*" } else { " " };
            print_text(&format!(
                "{} {} -> {}",
                marker,
                recipe.name,
                recipe.display_name()
            ))?;
        }
        Ok(())
    }
}
