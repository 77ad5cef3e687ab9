//! AccountService - account lifecycle and authorization operations.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::foundation::{
    AuditEvent, DomainError, ErrorCode, EventAction, EventCategory, UserId,
};
use crate::domain::role::{RoleName, RoleRegistry};
use crate::domain::user::{AccountView, NewAccount, ResetPassword, User, UserPatch};
use crate::ports::{EventSink, HeroRepository, PasswordHasher, UserRepository};

/// Owns registration, profile update, password reset, role grants,
/// deletion, and the account queries.
///
/// Uniqueness checks are read-then-write; under concurrent duplicate
/// registrations the persistence layer's unique constraints are the last
/// line of defense. Every committed mutation publishes one audit event,
/// fire-and-forget.
pub struct AccountService {
    users: Arc<dyn UserRepository>,
    heroes: Arc<dyn HeroRepository>,
    roles: Arc<RoleRegistry>,
    hasher: Arc<dyn PasswordHasher>,
    events: Arc<dyn EventSink>,
}

impl AccountService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        heroes: Arc<dyn HeroRepository>,
        roles: Arc<RoleRegistry>,
        hasher: Arc<dyn PasswordHasher>,
        events: Arc<dyn EventSink>,
    ) -> Self {
        Self {
            users,
            heroes,
            roles,
            hasher,
            events,
        }
    }

    /// Registers a new account.
    ///
    /// The account comes out enabled, stamped with the current time, and
    /// holding exactly the default `USER` role; the password is hashed
    /// through the `PasswordHasher` port before anything is stored.
    pub async fn register(&self, details: NewAccount) -> Result<AccountView, DomainError> {
        if self.users.exists_by_username(&details.username).await? {
            return Err(DomainError::new(
                ErrorCode::UsernameExists,
                format!("Account with username '{}' already exists", details.username),
            )
            .with_detail("username", &details.username));
        }
        if self.users.exists_by_email(&details.email).await? {
            return Err(DomainError::new(
                ErrorCode::EmailExists,
                format!("Account with email '{}' already exists", details.email),
            )
            .with_detail("email", &details.email));
        }
        let password = details.password.clone().ok_or_else(|| {
            DomainError::new(ErrorCode::PasswordMissing, "Password missing for new account")
                .with_detail("username", &details.username)
        })?;

        let password_hash = self.hasher.hash(&password)?;
        let user = User::register(details, password_hash);
        self.users.save(&user).await?;
        info!(username = %user.username, "registered account");
        self.publish(&user.username, EventAction::Register).await;
        Ok(AccountView::from(&user))
    }

    /// Applies a partial profile update to an existing account.
    ///
    /// Password changes are not permitted through this path; a patch
    /// carrying one is rejected outright.
    pub async fn update(&self, patch: UserPatch) -> Result<AccountView, DomainError> {
        let mut user = self
            .users
            .find_by_username(&patch.username)
            .await?
            .ok_or_else(|| DomainError::username_not_found(&patch.username))?;

        if let Some(email) = &patch.email {
            // Collision only counts against a different account
            if email != &user.email && self.users.exists_by_email(email).await? {
                return Err(DomainError::new(
                    ErrorCode::EmailExists,
                    format!("Account with email '{}' already exists", email),
                )
                .with_detail("email", email));
            }
        }
        if patch.password.is_some() {
            return Err(DomainError::new(
                ErrorCode::IllegalPasswordArgument,
                "Use the password-reset operation to change a password",
            )
            .with_detail("username", &patch.username));
        }

        user.apply(&patch);
        self.users.save(&user).await?;
        info!(username = %user.username, "updated account profile");
        self.publish(&user.username, EventAction::Edit).await;
        Ok(AccountView::from(&user))
    }

    /// Resets an account's password after checking the security answer.
    ///
    /// The stored answer must equal the supplied one exactly
    /// (case-sensitive). Every failure path reports the same opaque
    /// `RESET_PASSWORD_FAILED` so callers cannot probe which check failed.
    pub async fn reset_password(&self, request: ResetPassword) -> Result<(), DomainError> {
        let failed = || {
            DomainError::new(
                ErrorCode::ResetPasswordFailed,
                "Password reset failed: invalid data",
            )
        };
        let mut user = self
            .users
            .find_by_username(&request.username)
            .await?
            .ok_or_else(failed)?;
        if user.security_answer.as_deref() != Some(request.security_answer.as_str()) {
            return Err(failed());
        }

        user.password_hash = self.hasher.hash(&request.new_password)?;
        self.users.save(&user).await?;
        info!(username = %user.username, "reset account password");
        self.publish(&user.username, EventAction::ChangePassword).await;
        Ok(())
    }

    /// Grants the ADMIN role to an account. Idempotent: role membership
    /// is a set.
    pub async fn grant_admin_role(&self, username: &str) -> Result<AccountView, DomainError> {
        let mut user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or_else(|| DomainError::username_not_found(username))?;

        let admin = self.roles.get(RoleName::Admin).ok_or_else(|| {
            DomainError::new(ErrorCode::InternalError, "ADMIN role missing from registry")
        })?;
        user.roles.insert(admin.name);
        self.users.save(&user).await?;
        info!(username = %user.username, "granted ADMIN role");
        self.publish(&user.username, EventAction::GrantAdmin).await;
        Ok(AccountView::from(&user))
    }

    /// Deletes an account and, first, every hero it owns.
    ///
    /// Cascade policy: owned heroes are removed before the account so no
    /// hero is ever left pointing at a missing owner. Each cascaded hero
    /// publishes its own DELETE event.
    pub async fn delete(&self, username: &str) -> Result<(), DomainError> {
        let user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or_else(|| DomainError::username_not_found(username))?;

        for hero in self.heroes.find_by_username(username).await? {
            self.heroes.delete(&hero.id).await?;
            let event = AuditEvent::new(EventCategory::Hero, &hero.name, EventAction::Delete);
            if let Err(err) = self.events.publish(event).await {
                warn!(%err, hero = %hero.name, "failed to publish hero event");
            }
        }
        self.users.delete(&user.id).await?;
        info!(username = %user.username, "deleted account");
        self.publish(&user.username, EventAction::Delete).await;
        Ok(())
    }

    // === Queries ===
    //
    // Singular lookups fail with the matching NotFound code; listing
    // queries treat an empty result set as USER_NOT_FOUND rather than an
    // empty success. The hero queries do the opposite; both behaviors are
    // long-standing contract.

    /// Returns every account.
    pub async fn all(&self) -> Result<Vec<AccountView>, DomainError> {
        self.listing(self.users.find_all().await?, "There are no accounts")
    }

    /// Looks an account up by username.
    pub async fn by_username(&self, username: &str) -> Result<AccountView, DomainError> {
        self.users
            .find_by_username(username)
            .await?
            .map(|u| AccountView::from(&u))
            .ok_or_else(|| DomainError::username_not_found(username))
    }

    /// Looks an account up by email.
    pub async fn by_email(&self, email: &str) -> Result<AccountView, DomainError> {
        self.users
            .find_by_email(email)
            .await?
            .map(|u| AccountView::from(&u))
            .ok_or_else(|| {
                DomainError::new(ErrorCode::EmailNotFound, format!("Email '{}' not found", email))
                    .with_detail("email", email)
            })
    }

    /// Returns accounts by display first name.
    pub async fn by_first_name(&self, first_name: &str) -> Result<Vec<AccountView>, DomainError> {
        self.listing(
            self.users.find_by_first_name(first_name).await?,
            format!("There is no account with first name '{}'", first_name),
        )
    }

    /// Returns accounts by display last name.
    pub async fn by_last_name(&self, last_name: &str) -> Result<Vec<AccountView>, DomainError> {
        self.listing(
            self.users.find_by_last_name(last_name).await?,
            format!("There is no account with last name '{}'", last_name),
        )
    }

    /// Returns the ten oldest accounts by registration time.
    pub async fn first_added(&self) -> Result<Vec<AccountView>, DomainError> {
        self.listing(self.users.find_oldest(10).await?, "There are no accounts")
    }

    /// Returns the ten newest accounts by registration time.
    pub async fn last_added(&self) -> Result<Vec<AccountView>, DomainError> {
        self.listing(self.users.find_newest(10).await?, "There are no accounts")
    }

    /// Returns all enabled accounts.
    pub async fn enabled(&self) -> Result<Vec<AccountView>, DomainError> {
        self.listing(self.users.find_enabled().await?, "There are no enabled accounts")
    }

    /// Returns all accounts holding the ADMIN role.
    pub async fn admins(&self) -> Result<Vec<AccountView>, DomainError> {
        self.listing(self.users.find_admins().await?, "There are no admins")
    }

    /// Free-text search: unions the username, display-name and email
    /// substring searches, de-duplicated by account identity.
    pub async fn search(&self, term: &str) -> Result<Vec<AccountView>, DomainError> {
        let mut seen: HashSet<UserId> = HashSet::new();
        let mut results: Vec<User> = Vec::new();
        for batch in [
            self.users.search_by_username(term).await?,
            self.users.search_by_name(term).await?,
            self.users.search_by_email(term).await?,
        ] {
            for user in batch {
                if seen.insert(user.id) {
                    results.push(user);
                }
            }
        }
        self.listing(results, format!("No accounts match '{}'", term))
    }

    fn listing(
        &self,
        users: Vec<User>,
        empty_message: impl Into<String>,
    ) -> Result<Vec<AccountView>, DomainError> {
        if users.is_empty() {
            return Err(DomainError::new(ErrorCode::UserNotFound, empty_message));
        }
        Ok(users.iter().map(AccountView::from).collect())
    }

    async fn publish(&self, username: &str, action: EventAction) {
        let event = AuditEvent::new(EventCategory::Account, username, action);
        if let Err(err) = self.events.publish(event).await {
            warn!(%err, username, "failed to publish account event");
        }
    }
}
