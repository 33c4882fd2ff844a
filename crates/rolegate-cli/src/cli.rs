//! Command-line argument definitions.

use clap::{Parser, Subcommand};
use rolegate_core::{ResourceKind, ResourceMethod};

use crate::config::CONFIG_ENV;

/// Rolegate - role-based authorization with generated credentials
#[derive(Parser, Debug)]
#[command(name = "rolegate")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, env = CONFIG_ENV)]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate missing passwords and persist the credential file
    Bootstrap,
    /// Decide whether a caller may perform an operation
    Check {
        /// Username of the caller; omit to check an unauthenticated caller
        #[arg(short, long)]
        user: Option<String>,
        /// Role to check with instead of the user's configured role
        #[arg(short, long)]
        role: Option<String>,
        /// Operation method (GET, POST, PUT, DELETE)
        #[arg(short, long, default_value = "GET")]
        method: ResourceMethod,
        /// Resource kind (configuration, connection, variable, pool, asset, dag, view, custom_view)
        #[arg(long)]
        resource: ResourceKind,
    },
    /// Print the effective policy table
    Policies,
    /// Configuration file operations
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// `config` subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the resolved config file path
    Path,
    /// Write a default config file
    Init {
        /// Where to write; defaults to the standard location
        #[arg(long)]
        file: Option<String>,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
