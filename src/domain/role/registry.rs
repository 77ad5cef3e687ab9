//! Read-only role registry seeded at startup.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::RoleName;

/// A role record: the name plus a human-readable description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub name: RoleName,
    pub description: String,
}

/// Lookup table of role reference data, keyed by name.
///
/// Built once via [`RoleRegistry::seed`] and shared behind an `Arc`;
/// services look roles up here the way the original consulted its role
/// store, but the data never changes after startup.
#[derive(Debug)]
pub struct RoleRegistry {
    roles: HashMap<RoleName, Role>,
}

impl RoleRegistry {
    /// Builds the registry from the closed role enumeration.
    pub fn seed() -> Self {
        let mut roles = HashMap::new();
        roles.insert(
            RoleName::User,
            Role {
                name: RoleName::User,
                description: "Default role for every registered account".to_string(),
            },
        );
        roles.insert(
            RoleName::Admin,
            Role {
                name: RoleName::Admin,
                description: "Administrative access".to_string(),
            },
        );
        Self { roles }
    }

    /// Looks up a role by name.
    pub fn get(&self, name: RoleName) -> Option<&Role> {
        self.roles.get(&name)
    }

    /// Number of seeded roles.
    pub fn len(&self) -> usize {
        self.roles.len()
    }

    /// True when no roles are seeded.
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}

impl Default for RoleRegistry {
    fn default() -> Self {
        Self::seed()
    }
}
