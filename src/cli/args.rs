//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Relink Markdown image links to the templated relative-url form
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: relink.toml, optional)
    #[arg(short = 'C', long, default_value = "relink.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Rewrite local image links in place (with one-time backups)
    #[command(visible_alias = "f")]
    Fix {
        /// Files or directories to fix. If omitted, fixes the whole
        /// project. Use `-` to read paths from stdin.
        #[arg(value_name = "PATH")]
        paths: Vec<PathBuf>,

        /// Preview changes without writing any file
        #[arg(short, long)]
        dry: bool,

        /// Enable verbose output for debugging
        #[arg(short = 'V', long)]
        verbose: bool,
    },

    /// Report links that would be rewritten, without writing
    #[command(visible_alias = "c")]
    Check {
        /// Files or directories to check. If omitted, checks the whole
        /// project. Use `-` to read paths from stdin.
        #[arg(value_name = "PATH")]
        paths: Vec<PathBuf>,

        /// Enable verbose output for debugging
        #[arg(short = 'V', long)]
        verbose: bool,
    },
}
