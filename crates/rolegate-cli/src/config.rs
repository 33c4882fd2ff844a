//! Rolegate configuration.
//!
//! Loaded from a TOML file, then overridden from the environment:
//!
//! ```toml
//! [auth]
//! users = ["admin:admin", "vera:viewer"]
//! all_admins = false
//! credential_dir = "~/.rolegate"
//!
//! [policies.pool]
//! allow = "OP"
//! allow_get = "VIEWER"
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use rolegate_auth::AuthConfig;
use rolegate_core::{parse_users, ConfiguredUser, PolicyTable, ResourceKind, ResourcePolicy};
use rolegate_credentials::CredentialFile;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "ROLEGATE_CONFIG";

/// Environment variable overriding `auth.users` (comma separated).
pub const USERS_ENV: &str = "ROLEGATE_USERS";

/// Environment variable overriding `auth.all_admins`.
pub const ALL_ADMINS_ENV: &str = "ROLEGATE_ALL_ADMINS";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RolegateConfig {
    /// Users and login behavior.
    pub auth: AuthSettings,
    /// Per-resource-kind policy overrides, keyed by resource kind name.
    pub policies: BTreeMap<String, ResourcePolicy>,
}

/// The `[auth]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthSettings {
    /// `username:role` entries.
    pub users: Vec<String>,
    /// Treat every caller as admin.
    pub all_admins: bool,
    /// Directory holding the generated password file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credential_dir: Option<String>,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            users: vec!["admin:admin".to_string()],
            all_admins: false,
            credential_dir: None,
        }
    }
}

impl RolegateConfig {
    /// Default config file location (`<config dir>/rolegate/config.toml`).
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("rolegate").join("config.toml"))
    }

    /// Loads configuration and applies environment overrides.
    ///
    /// An explicit `path` must exist. Without one, the default location is
    /// used if present, otherwise built-in defaults.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let mut config = match path {
            Some(p) => Self::from_file(Path::new(p))?,
            None => match Self::default_config_path().filter(|p| p.exists()) {
                Some(p) => Self::from_file(&p)?,
                None => {
                    log::debug!("No config file found, using defaults");
                    Self::default()
                }
            },
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Reads and parses a TOML config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
        log::debug!("Loaded config from {}", path.display());
        Self::from_toml_str(&content)
            .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))
    }

    /// Parses TOML configuration.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::config(e.to_string()))
    }

    /// Serializes to pretty TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Writes this configuration as TOML, creating parent directories.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| Error::io_with_path(e, parent))?;
        }
        std::fs::write(path, self.to_toml_string()?).map_err(|e| Error::io_with_path(e, path))
    }

    /// Applies `ROLEGATE_USERS` and `ROLEGATE_ALL_ADMINS` from `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(users) = lookup(USERS_ENV) {
            self.auth.users = users
                .split(',')
                .map(str::trim)
                .filter(|entry| !entry.is_empty())
                .map(str::to_string)
                .collect();
        }

        if let Some(flag) = lookup(ALL_ADMINS_ENV) {
            self.auth.all_admins = parse_bool(&flag).ok_or_else(|| {
                Error::config(format!("{ALL_ADMINS_ENV} must be true or false, got '{flag}'"))
            })?;
        }

        Ok(())
    }

    /// The configured users, in order.
    pub fn users(&self) -> Result<Vec<ConfiguredUser>> {
        Ok(parse_users(&self.auth.users)?)
    }

    /// The reference policy table with this config's overrides applied.
    pub fn policy_table(&self) -> Result<PolicyTable> {
        let mut table = PolicyTable::new();
        for (name, policy) in &self.policies {
            let kind: ResourceKind = name.parse()?;
            table.set(kind, *policy);
        }
        Ok(table)
    }

    /// Settings for caller resolution.
    pub fn auth_config(&self) -> AuthConfig {
        AuthConfig {
            all_admins: self.auth.all_admins,
        }
    }

    /// Location of the generated password file.
    pub fn credential_file(&self) -> Result<CredentialFile> {
        Ok(CredentialFile::resolve(self.auth.credential_dir.as_deref())?)
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
