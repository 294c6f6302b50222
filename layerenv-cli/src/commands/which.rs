//! Which command implementation.
//!
//! Reports the layer that currently supplies a variable.

use crate::error::CliError;
use crate::utils::{load_environment, GlobalOptions};
use clap::Args;

/// Show which layer supplies a variable.
#[derive(Args)]
pub struct WhichCommand {
    /// Variable name
    pub name: String,

    /// Also print the value
    #[arg(long)]
    pub value: bool,
}

impl WhichCommand {
    /// Execute the which command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let (ctx, _env) = load_environment(global)?;

        let Some((layer, value)) = ctx.resolve(&self.name) else {
            return Err(CliError::SemanticFailure(format!(
                "{} is not set",
                self.name
            )));
        };

        if self.value {
            println!("{layer}\t{value}");
        } else {
            println!("{layer}");
        }

        Ok(())
    }
}
