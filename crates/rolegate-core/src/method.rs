//! Operation method tokens.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// The method of an operation on a resource.
///
/// Only [`ResourceMethod::Get`] is read-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ResourceMethod {
    /// Read.
    Get,
    /// Create.
    Post,
    /// Update.
    Put,
    /// Delete.
    Delete,
}

impl ResourceMethod {
    /// Every method token.
    pub const ALL: [ResourceMethod; 4] = [
        ResourceMethod::Get,
        ResourceMethod::Post,
        ResourceMethod::Put,
        ResourceMethod::Delete,
    ];

    /// Whether this method only reads.
    pub const fn is_read_only(self) -> bool {
        matches!(self, ResourceMethod::Get)
    }

    /// The upper-case token.
    pub const fn as_str(self) -> &'static str {
        match self {
            ResourceMethod::Get => "GET",
            ResourceMethod::Post => "POST",
            ResourceMethod::Put => "PUT",
            ResourceMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for ResourceMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResourceMethod::ALL
            .into_iter()
            .find(|method| method.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::UnknownMethod {
                method: s.to_string(),
            })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_only_get_is_read_only() {
        assert!(ResourceMethod::Get.is_read_only());
        assert!(!ResourceMethod::Post.is_read_only());
        assert!(!ResourceMethod::Put.is_read_only());
        assert!(!ResourceMethod::Delete.is_read_only());
    }

    #[test]
    fn test_parse_method() {
        assert_eq!("get".parse::<ResourceMethod>().unwrap(), ResourceMethod::Get);
        assert_eq!(
            "DELETE".parse::<ResourceMethod>().unwrap(),
            ResourceMethod::Delete
        );
        assert!("PATCH".parse::<ResourceMethod>().is_err());
    }
}
