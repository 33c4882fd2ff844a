//! The fixed role hierarchy.
//!
//! Roles form a small, closed, totally ordered set. A role with rank `n`
//! grants everything granted to roles of rank `< n`:
//!
//! | Role     | Rank | Grants                                        |
//! |----------|------|-----------------------------------------------|
//! | `VIEWER` | 0    | read-only access                              |
//! | `USER`   | 1    | viewer access + DAG operations                |
//! | `OP`     | 2    | user access + configuration, connections, pools, variables, assets |
//! | `ADMIN`  | 3    | everything, regardless of policy              |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A ranked access tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
#[repr(u8)]
pub enum Role {
    /// Read-only access.
    Viewer = 0,
    /// Viewer access plus DAG operations.
    User = 1,
    /// User access plus operational resources.
    Op = 2,
    /// Unrestricted access.
    Admin = 3,
}

impl Role {
    /// Every role, in ascending rank order.
    pub const ALL: [Role; 4] = [Role::Viewer, Role::User, Role::Op, Role::Admin];

    /// The maximum-rank role.
    pub const MAX: Role = Role::Admin;

    /// Returns the rank of this role.
    pub const fn rank(self) -> u8 {
        self as u8
    }

    /// Returns the canonical (upper-case) name of this role.
    pub const fn name(self) -> &'static str {
        match self {
            Role::Viewer => "VIEWER",
            Role::User => "USER",
            Role::Op => "OP",
            Role::Admin => "ADMIN",
        }
    }

    /// Whether this is the maximum-rank role.
    pub const fn is_admin(self) -> bool {
        self.rank() == Role::MAX.rank()
    }

    /// Whether this role grants at least what `other` grants.
    ///
    /// # Examples
    ///
    /// ```
    /// use rolegate_core::Role;
    ///
    /// assert!(Role::Op.covers(Role::User));
    /// assert!(Role::User.covers(Role::User));
    /// assert!(!Role::Viewer.covers(Role::User));
    /// ```
    pub const fn covers(self, other: Role) -> bool {
        self.rank() >= other.rank()
    }

    /// Looks up a role by name, ignoring case.
    pub fn from_name(name: &str) -> Result<Self> {
        Role::ALL
            .into_iter()
            .find(|role| role.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| Error::unknown_role(name))
    }
}

/// Returns the rank of the role called `name` (case-insensitive).
///
/// # Errors
///
/// Returns [`Error::UnknownRole`] if no role has that name.
pub fn rank_of(name: &str) -> Result<u8> {
    Role::from_name(name).map(Role::rank)
}

/// Whether `role` is the maximum-rank role.
pub fn is_admin(role: Role) -> bool {
    role.is_admin()
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Role {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Role::from_name(s)
    }
}

impl TryFrom<String> for Role {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        Role::from_name(&s)
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.name().to_string()
    }
}
