//! RoleName - the closed set of authorization tags.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Named authorization tag attached to user accounts.
///
/// Membership is a set: granting a role twice has no additional effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoleName {
    User,
    Admin,
}

impl RoleName {
    /// All known roles, in grant order.
    pub fn all() -> &'static [RoleName] {
        &[RoleName::User, RoleName::Admin]
    }

    /// Canonical storage representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            RoleName::User => "USER",
            RoleName::Admin => "ADMIN",
        }
    }
}

impl fmt::Display for RoleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RoleName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "USER" => Ok(RoleName::User),
            "ADMIN" => Ok(RoleName::Admin),
            other => Err(format!("Unknown role name: {}", other)),
        }
    }
}
