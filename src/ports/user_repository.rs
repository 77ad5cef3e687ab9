//! UserRepository port for account persistence operations.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::user::User;

/// Repository contract for user accounts.
///
/// Finders return `Ok(None)` / empty vectors for absent data; `Err` is
/// reserved for infrastructure failures. The empty-result policy of the
/// account queries lives in the service layer, not here.
///
/// Uniqueness of `username` and `email` is checked read-then-write by the
/// services; that check alone is not safe under concurrent duplicate
/// registrations. Implementations backed by a real store must also enforce
/// unique constraints at the persistence level as the last line of defense.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Finds an account by its unique username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;

    /// Finds an account by its unique email.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Checks whether the username is already taken.
    async fn exists_by_username(&self, username: &str) -> Result<bool, DomainError>;

    /// Checks whether the email is already taken.
    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError>;

    /// Persists an account, inserting or replacing by id.
    async fn save(&self, user: &User) -> Result<(), DomainError>;

    /// Deletes an account by id.
    async fn delete(&self, id: &UserId) -> Result<(), DomainError>;

    /// Returns every stored account.
    async fn find_all(&self) -> Result<Vec<User>, DomainError>;

    /// Returns accounts with the given display first name.
    async fn find_by_first_name(&self, first_name: &str) -> Result<Vec<User>, DomainError>;

    /// Returns accounts with the given display last name.
    async fn find_by_last_name(&self, last_name: &str) -> Result<Vec<User>, DomainError>;

    /// Returns up to `limit` accounts, oldest registration first.
    async fn find_oldest(&self, limit: u32) -> Result<Vec<User>, DomainError>;

    /// Returns up to `limit` accounts, newest registration first.
    async fn find_newest(&self, limit: u32) -> Result<Vec<User>, DomainError>;

    /// Returns all enabled accounts.
    async fn find_enabled(&self) -> Result<Vec<User>, DomainError>;

    /// Returns all accounts holding the ADMIN role.
    async fn find_admins(&self) -> Result<Vec<User>, DomainError>;

    /// Returns accounts whose username contains the term.
    async fn search_by_username(&self, term: &str) -> Result<Vec<User>, DomainError>;

    /// Returns accounts whose first or last name contains the term.
    async fn search_by_name(&self, term: &str) -> Result<Vec<User>, DomainError>;

    /// Returns accounts whose email contains the term.
    async fn search_by_email(&self, term: &str) -> Result<Vec<User>, DomainError>;
}
