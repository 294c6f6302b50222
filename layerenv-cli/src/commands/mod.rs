//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `show`: Print the merged environment
//! - `get`: Print one merged value
//! - `check`: Check that variables are set
//! - `which`: Show which layer supplies a variable
//! - `ctx`: Print the full layered context
//! - `completions`: Generate shell completion scripts

pub mod check;
pub mod completions;
pub mod ctx;
pub mod get;
pub mod show;
pub mod which;

pub use check::CheckCommand;
pub use completions::CompletionsCommand;
pub use ctx::CtxCommand;
pub use get::GetCommand;
pub use show::ShowCommand;
pub use which::WhichCommand;
