//! Check command implementation.
//!
//! Exits with status 0 when every named variable is present in the merged
//! environment. Otherwise each missing name is logged and the command fails
//! with status 1.

use crate::error::CliError;
use crate::utils::{load_environment, GlobalOptions};
use clap::Args;
use layerenv::CheckOptions;

/// Check that variables are set.
#[derive(Args)]
pub struct CheckCommand {
    /// Variable names that must be set
    #[arg(required = true, value_name = "NAME")]
    pub names: Vec<String>,
}

impl CheckCommand {
    /// Execute the check command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let (ctx, _env) = load_environment(global)?;

        let options = CheckOptions {
            log_on_miss: true,
            ..CheckOptions::strict()
        };
        ctx.check(self.names.as_slice(), None, options)?;

        if !global.quiet {
            eprintln!("all {} variable(s) set", self.names.len());
        }

        Ok(())
    }
}
