//! Handler functions for CLI commands.

use std::path::PathBuf;

use rolegate_auth::resolve_caller;
use rolegate_core::{CallerIdentity, ResourceKind, ResourceMethod};
use rolegate_credentials::Bootstrap;

use crate::cli::ConfigAction;
use crate::config::RolegateConfig;
use crate::error::{Error, Result};

/// Prefix for operator-facing bootstrap output.
const OUTPUT_NAME: &str = "rolegate";

// ============================================================================
// bootstrap
// ============================================================================

/// Run credential bootstrap and print one line per configured user.
pub fn cmd_bootstrap(config: &RolegateConfig) -> Result<Bootstrap> {
    let users = config.users()?;
    let file = config.credential_file()?;
    let result = rolegate_credentials::bootstrap(&users, &file)?;
    for line in &result.lines {
        println!("{}", format_output_line(line));
    }
    Ok(result)
}

/// Format a line of operator output.
pub fn format_output_line(line: &str) -> String {
    format!("{OUTPUT_NAME:10} | {}", line.trim())
}

// ============================================================================
// check
// ============================================================================

/// Decide whether the described caller may perform `method` on `resource`.
///
/// With `role` the caller is `user` (or `"cli"`) with that role. Without it
/// the role comes from the last configured entry for `user`; an unknown or
/// missing user is an unauthenticated caller.
pub fn decide(
    config: &RolegateConfig,
    user: Option<&str>,
    role: Option<&str>,
    method: ResourceMethod,
    resource: ResourceKind,
) -> Result<bool> {
    let session_user = match (user, role) {
        (user, Some(role)) => Some(CallerIdentity::new(user.unwrap_or("cli"), role)),
        (Some(user), None) => config
            .users()?
            .into_iter()
            .rev()
            .find(|u| u.username == user)
            .map(|u| u.identity()),
        (None, None) => None,
    };

    let caller = resolve_caller(session_user, &config.auth_config());
    let table = config.policy_table()?;
    Ok(table.authorize(caller.as_ref(), method, resource))
}

/// Print `allow` or `deny` and return the decision.
pub fn cmd_check(
    config: &RolegateConfig,
    user: Option<&str>,
    role: Option<&str>,
    method: ResourceMethod,
    resource: ResourceKind,
) -> Result<bool> {
    let allowed = decide(config, user, role, method, resource)?;
    println!("{}", if allowed { "allow" } else { "deny" });
    Ok(allowed)
}

// ============================================================================
// policies
// ============================================================================

/// Render the effective policy table.
pub fn render_policies(config: &RolegateConfig) -> Result<String> {
    let table = config.policy_table()?;
    let mut out = format!("{:<16} {:<8} {}\n", "RESOURCE", "ALLOW", "ALLOW GET");
    for (kind, policy) in table.iter() {
        let read = policy
            .allow_get()
            .map_or_else(|| "-".to_string(), |r| r.to_string());
        out.push_str(&format!(
            "{:<16} {:<8} {}\n",
            kind.name(),
            policy.allow().to_string(),
            read
        ));
    }
    Ok(out)
}

/// Print the effective policy table.
pub fn cmd_policies(config: &RolegateConfig) -> Result<()> {
    print!("{}", render_policies(config)?);
    Ok(())
}

// ============================================================================
// config
// ============================================================================

/// Handle a config subcommand.
pub fn handle_config_command(config_path: Option<&str>, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Path => cmd_config_path(config_path),
        ConfigAction::Init { file, force } => cmd_config_init(file.as_deref(), force).map(|_| ()),
    }
}

/// The explicit config path, or the platform default.
fn resolve_config_path(explicit: Option<&str>) -> Result<PathBuf> {
    explicit
        .map(PathBuf::from)
        .or_else(RolegateConfig::default_config_path)
        .ok_or_else(|| Error::config("Could not determine config directory for this platform"))
}

/// Show the resolved config file path.
pub fn cmd_config_path(config_path: Option<&str>) -> Result<()> {
    let path = resolve_config_path(config_path)?;
    println!("{}", path.display());
    if !path.exists() {
        eprintln!("(file does not exist; run `rolegate config init` to create it)");
    }
    Ok(())
}

/// Write the default configuration, returning where it went.
///
/// An existing file is only replaced with `force`.
pub fn cmd_config_init(file: Option<&str>, force: bool) -> Result<PathBuf> {
    let path = resolve_config_path(file)?;
    if path.exists() && !force {
        return Err(Error::config(format!(
            "{} already exists; pass --force to replace it",
            path.display()
        )));
    }

    RolegateConfig::default().write_to(&path)?;
    log::info!("Wrote default configuration to {}", path.display());
    println!("{}", path.display());
    Ok(path)
}

// ============================================================================
// Tests
// ============================================================================
