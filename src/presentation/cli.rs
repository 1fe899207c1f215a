//! CLI Argument Parsing
//!
//! This module defines the CLI interface using clap.
//!
//! ## Design Notes
//!
//! - Global flags (--json, --color, --verbose) are inherited by all subcommands
//! - `build` runs in production mode unless `--watch` is given

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

/// bp - build tooling for web component libraries
#[derive(Parser, Debug)]
#[command(name = "bp")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Emit NDJSON events instead of human output
    #[arg(long, global = true)]
    pub json: bool,

    /// Color output mode
    #[arg(long, global = true, value_enum)]
    pub color: Option<ColorWhen>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the library into the output directory
    Build {
        /// Path to the config file (default: ./blueprint.config.toml)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Rebuild on source changes (development mode)
        #[arg(long)]
        watch: bool,
    },

    /// Scaffold a new library
    New {
        /// Library name, also the directory created
        name: String,
    },

    /// Verify or update the custom elements manifest lockfile
    Api {
        /// Path to the config file (default: ./blueprint.config.toml)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Overwrite the lockfile with the current API
        #[arg(long)]
        update: bool,

        /// Fail when the current API differs from the lockfile
        #[arg(long)]
        test: bool,
    },
}
