//! Ctx command implementation.
//!
//! Dumps every layer of the context, plus any recorded load errors, as
//! pretty-printed JSON.

use crate::error::CliError;
use crate::utils::{load_environment, GlobalOptions};
use clap::Args;

/// Print the full layered context as JSON.
#[derive(Args)]
pub struct CtxCommand {}

impl CtxCommand {
    /// Execute the ctx command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let (ctx, _env) = load_environment(global)?;

        let json = serde_json::to_string_pretty(&ctx.ctx()).map_err(layerenv::Error::from)?;
        println!("{json}");

        Ok(())
    }
}
