//! User aggregate entity.
//!
//! # Invariants
//!
//! - `username` and `email` are each globally unique across live accounts
//! - `roles` always contains at least `USER` after registration
//! - `password_hash` is never empty once registered
//! - `username`, `password_hash` and `created_at` are not reachable through
//!   the profile-update path: `UserPatch` simply has no fields for them

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::role::RoleName;

/// User aggregate - a registered account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for this account.
    pub id: UserId,

    /// Globally unique login name. Immutable after registration.
    pub username: String,

    /// Globally unique email address.
    pub email: String,

    /// Display first name.
    pub first_name: Option<String>,

    /// Display last name.
    pub last_name: Option<String>,

    /// Free-text self description.
    pub about: Option<String>,

    /// Opaque one-way digest of the password. Never exposed in views.
    pub password_hash: String,

    /// Security question for password reset.
    pub security_question: Option<String>,

    /// Security answer, compared verbatim during password reset.
    pub security_answer: Option<String>,

    /// Accounts are enabled at registration; no toggle path exists here.
    pub enabled: bool,

    /// When the account was registered.
    pub created_at: Timestamp,

    /// Role membership. Unordered set with unique membership.
    pub roles: BTreeSet<RoleName>,
}

impl User {
    /// Creates a freshly registered account from validated registration
    /// details and an already-hashed password.
    ///
    /// Any roles supplied by the caller are discarded: every new account
    /// starts with exactly the default `USER` role.
    pub fn register(details: NewAccount, password_hash: String) -> Self {
        let mut roles = BTreeSet::new();
        roles.insert(RoleName::User);
        Self {
            id: UserId::new(),
            username: details.username,
            email: details.email,
            first_name: details.first_name,
            last_name: details.last_name,
            about: details.about,
            password_hash,
            security_question: details.security_question,
            security_answer: details.security_answer,
            enabled: true,
            created_at: Timestamp::now(),
            roles,
        }
    }

    /// Merges the present fields of a profile patch onto this account.
    ///
    /// Absent fields keep their prior values. Credentials and the creation
    /// date are untouched by construction.
    pub fn apply(&mut self, patch: &UserPatch) {
        if let Some(email) = &patch.email {
            self.email = email.clone();
        }
        if let Some(first_name) = &patch.first_name {
            self.first_name = Some(first_name.clone());
        }
        if let Some(last_name) = &patch.last_name {
            self.last_name = Some(last_name.clone());
        }
        if let Some(about) = &patch.about {
            self.about = Some(about.clone());
        }
        if let Some(question) = &patch.security_question {
            self.security_question = Some(question.clone());
        }
        if let Some(answer) = &patch.security_answer {
            self.security_answer = Some(answer.clone());
        }
    }

    /// True when this account holds the given role.
    pub fn has_role(&self, role: RoleName) -> bool {
        self.roles.contains(&role)
    }
}

/// Registration request for a new account.
///
/// `password` is optional so the service can report its absence as a
/// domain failure rather than a deserialization error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewAccount {
    pub username: String,
    pub email: String,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub about: Option<String>,
    pub security_question: Option<String>,
    pub security_answer: Option<String>,
}

/// Partial profile update, selected by username.
///
/// Deliberately has no hash or creation-date field; a supplied `password`
/// is rejected by the service (password changes go through reset only).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserPatch {
    /// Selector: which account to update. Not itself updatable.
    pub username: String,
    pub email: Option<String>,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub about: Option<String>,
    pub security_question: Option<String>,
    pub security_answer: Option<String>,
}

/// Password-reset request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetPassword {
    pub username: String,
    pub security_answer: String,
    pub new_password: String,
}

/// Read-side projection of an account.
///
/// Credentials (password hash, security answer) are never echoed back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountView {
    pub username: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub about: Option<String>,
    pub security_question: Option<String>,
    pub enabled: bool,
    pub created_at: Timestamp,
    pub roles: BTreeSet<RoleName>,
}

impl From<&User> for AccountView {
    fn from(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            about: user.about.clone(),
            security_question: user.security_question.clone(),
            enabled: user.enabled,
            created_at: user.created_at,
            roles: user.roles.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_account() -> NewAccount {
        NewAccount {
            username: "arthas".to_string(),
            email: "arthas@lordaeron.com".to_string(),
            password: Some("frostmourne hungers".to_string()),
            first_name: Some("Arthas".to_string()),
            last_name: Some("Menethil".to_string()),
            about: None,
            security_question: Some("Name of my steed?".to_string()),
            security_answer: Some("Invincible".to_string()),
        }
    }

    #[test]
    fn register_enables_account_and_assigns_default_role() {
        let user = User::register(new_account(), "digest".to_string());
        assert!(user.enabled);
        assert_eq!(user.roles.len(), 1);
        assert!(user.has_role(RoleName::User));
        assert_eq!(user.password_hash, "digest");
    }

    #[test]
    fn apply_merges_only_present_fields() {
        let mut user = User::register(new_account(), "digest".to_string());
        let created_at = user.created_at;

        user.apply(&UserPatch {
            username: "arthas".to_string(),
            about: Some("Former crown prince of Lordaeron".to_string()),
            ..Default::default()
        });

        assert_eq!(user.about.as_deref(), Some("Former crown prince of Lordaeron"));
        assert_eq!(user.email, "arthas@lordaeron.com");
        assert_eq!(user.first_name.as_deref(), Some("Arthas"));
        assert_eq!(user.password_hash, "digest");
        assert_eq!(user.created_at, created_at);
    }

    #[test]
    fn view_carries_no_credentials() {
        let user = User::register(new_account(), "digest".to_string());
        let view = AccountView::from(&user);
        let json = serde_json::to_string(&view).unwrap();
        assert!(!json.contains("digest"));
        assert!(!json.contains("Invincible"));
        assert_eq!(view.username, "arthas");
    }
}
