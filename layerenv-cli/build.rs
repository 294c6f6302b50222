//! Build script for layerenv-cli.
//!
//! This script generates a man page at build time using clap_mangen.
//! The generated man page is placed in OUT_DIR for inclusion in release builds.
//!
//! Note: We build a minimal command structure here rather than importing from
//! the main crate, since build scripts cannot depend on the crate being built.

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Build the CLI command structure for man page generation.
///
/// IMPORTANT: Keep this structure synchronized with src/cli.rs
fn build_cli() -> Command {
    Command::new("layerenv")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Merge defaults, .env values, the process environment and constants")
        .long_about(
            "Command-line tool for inspecting and checking layered environment variables. \
             Values are merged with precedence defaults < .env < process < constants.",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("env-file")
                .long("env-file")
                .help("Read .env values from this file instead of ./.env")
                .value_name("PATH")
                .global(true)
                .env("LAYERENV_ENV_FILE"),
        )
        .arg(
            Arg::new("no-dotenv")
                .long("no-dotenv")
                .help("Do not read any .env file")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("options")
                .long("options")
                .help("Read update options from a YAML or JSON file")
                .value_name("PATH")
                .global(true),
        )
        .arg(
            Arg::new("default")
                .long("default")
                .help("Add a default value (lowest precedence)")
                .value_name("KEY=VALUE")
                .global(true)
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("constant")
                .long("constant")
                .help("Add a constant value (highest precedence)")
                .value_name("KEY=VALUE")
                .global(true)
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("ensure")
                .long("ensure")
                .help("Exit with status 1 unless this variable is set after merging")
                .value_name("NAME")
                .global(true)
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .help("Log .env lines that could not be parsed")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .subcommands(vec![
            Command::new("show")
                .about("Print the merged environment")
                .long_about("Print the merged environment as dotenv, JSON, shell exports or a table"),
            Command::new("get")
                .about("Print one merged value")
                .long_about("Print one merged value, or a miss value when it is not set"),
            Command::new("check")
                .about("Check that variables are set")
                .long_about("Exit with status 1 and log each missing name unless all are set"),
            Command::new("which")
                .about("Show which layer supplies a variable")
                .long_about("Print the layer (defaults, dotenv, process, constants) a value comes from"),
            Command::new("ctx")
                .about("Print the full layered context as JSON")
                .long_about("Dump every layer and any .env load error as JSON"),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell")
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Write the script to this file instead of stdout")
                        .value_name("PATH"),
                ),
        ])
}

fn main() {
    // Generate man pages at build time
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").unwrap());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).unwrap();

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();
    man.render(&mut buffer).unwrap();

    fs::write(man_dir.join("layerenv.1"), buffer).unwrap();

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
}
