//! bp - build tooling for web component libraries
//!
//! Usage: bp <COMMAND>
//!
//! Commands:
//!   build   Build the library (`--watch` rebuilds on change)
//!   new     Scaffold a new library
//!   api     Verify or update the custom elements manifest lockfile

mod commands;
mod ui;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use blueprintui::presentation::{Cli, Commands};

use crate::ui::context::UiContext;
use crate::ui::error::print_error;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let ui = UiContext::new(cli.json, cli.verbose, cli.color);
    match run(cli.command, &ui) {
        Ok(code) => code,
        Err(err) => {
            print_error(&err, &ui);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands, ui: &UiContext) -> Result<ExitCode> {
    match command {
        Commands::Build { config, watch } => commands::build::cmd_build(config.as_deref(), watch, ui),
        Commands::New { name } => commands::new::cmd_new(&name, ui),
        Commands::Api {
            config,
            update,
            test,
        } => commands::api::cmd_api(config.as_deref(), test, update, ui),
    }
}

/// `-v` flags pick the default level; `RUST_LOG` overrides it.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .format_target(verbose > 1)
        .init();
}
