//! Get command implementation.
//!
//! Prints a single merged value. Without `--miss-value` an unset variable is
//! a semantic failure; with it, the miss value is printed instead.

use crate::error::CliError;
use crate::utils::{load_environment, GlobalOptions};
use clap::Args;
use serde_json::Value;

/// Print one merged value.
#[derive(Args)]
pub struct GetCommand {
    /// Variable name
    pub name: String,

    /// Value to print when the variable is not set (parsed as JSON when possible)
    #[arg(long, value_name = "VALUE")]
    pub miss_value: Option<String>,
}

impl GetCommand {
    /// Execute the get command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let (_ctx, mut env) = load_environment(global)?;

        if let Some(raw) = &self.miss_value {
            env.live_mut().set_miss_value(parse_miss_value(raw));
        } else if !env.live().include(&self.name) {
            return Err(CliError::SemanticFailure(format!(
                "{} is not set",
                self.name
            )));
        }

        match env.live().get(&self.name) {
            Value::String(value) => println!("{value}"),
            other => println!("{other}"),
        }

        Ok(())
    }
}

/// Interpret `--miss-value` as JSON, falling back to a plain string.
fn parse_miss_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}
