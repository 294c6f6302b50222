//! Main entry point for the layerenv CLI.
//!
//! This is the command-line interface for layered environment variables.
//! It provides commands for inspecting the merged environment:
//! - `show`: Print the merged environment
//! - `get`: Print one merged value
//! - `check`: Check that variables are set
//! - `which`: Show which layer supplies a variable
//! - `ctx`: Print the full layered context

use layerenv_cli::cli::{Cli, Command};
use layerenv_cli::utils::GlobalOptions;

fn main() {
    // Parse CLI arguments; the usage message already names the problem
    let cli = match Cli::parse_args(std::env::args_os()) {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(e.exit_code());
        }
    };

    // Convert CLI args to GlobalOptions
    let global = GlobalOptions {
        verbose: cli.verbose,
        quiet: cli.quiet,
        env_file: cli.env_file,
        no_dotenv: cli.no_dotenv,
        options: cli.options,
        defaults: cli.defaults,
        constants: cli.constants,
        ensure: cli.ensure,
        debug: cli.debug,
    };

    // Route library diagnostics through the same stderr logger
    let _ = global.logger().install();

    // Execute the command
    let result = match cli.command {
        Command::Show(cmd) => cmd.execute(&global),
        Command::Get(cmd) => cmd.execute(&global),
        Command::Check(cmd) => cmd.execute(&global),
        Command::Which(cmd) => cmd.execute(&global),
        Command::Ctx(cmd) => cmd.execute(&global),
        Command::Completions(cmd) => cmd.execute(&global),
    };

    // Handle errors and set exit code
    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
