//! Relink - rewrite local Markdown image links into templated relative-url form.

mod cli;
mod config;
mod core;
mod logger;
mod process;
mod rewrite;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::RelinkConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    let config = RelinkConfig::load(&cli)?;

    match &cli.command {
        Commands::Fix {
            paths,
            dry,
            verbose,
        } => {
            logger::set_verbose(*verbose);
            cli::fix::run_fix(&config, paths, *dry)
        }
        Commands::Check { paths, verbose } => {
            logger::set_verbose(*verbose);
            cli::check::run_check(&config, paths)
        }
    }
}
