//! Rolegate CLI
//!
//! Command-line interface for Rolegate credential bootstrap and checks.

#![warn(clippy::all)]
#![forbid(unsafe_code)]

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use rolegate_cli::cli::{Cli, Command};
use rolegate_cli::commands;
use rolegate_cli::RolegateConfig;
use tracing_subscriber::EnvFilter;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Command::Config { action } = cli.command {
        commands::handle_config_command(cli.config.as_deref(), action)?;
        return Ok(ExitCode::SUCCESS);
    }

    let config = RolegateConfig::load(cli.config.as_deref())?;
    match cli.command {
        Command::Bootstrap => {
            commands::cmd_bootstrap(&config)?;
        }
        Command::Check {
            user,
            role,
            method,
            resource,
        } => {
            let allowed =
                commands::cmd_check(&config, user.as_deref(), role.as_deref(), method, resource)?;
            if !allowed {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Policies => commands::cmd_policies(&config)?,
        Command::Config { .. } => {}
    }

    Ok(ExitCode::SUCCESS)
}

/// Install the tracing subscriber; `log` records from the library crates
/// are forwarded to it.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!("Logging initialized at {default}");
}
