//! # rolegate-cli
//!
//! Command-line tools for Rolegate:
//! - Credential bootstrap for configured users
//! - One-off authorization checks
//! - Policy table inspection
//! - Config file creation

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;

pub use config::RolegateConfig;
pub use error::{Error, Result};
