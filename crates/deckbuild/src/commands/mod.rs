use anyhow::Result;

pub mod build;
pub mod check;
pub mod list;

pub trait Command {
    fn run(&self) -> Result<()>;
}
