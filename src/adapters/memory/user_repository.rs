//! In-memory implementation of UserRepository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::role::RoleName;
use crate::domain::user::User;
use crate::ports::UserRepository;

/// In-memory user store keyed by account id.
///
/// Substring searches are case-insensitive, matching the postgres
/// adapter's `ILIKE` behavior.
///
/// # Panics
///
/// Methods panic if the internal lock is poisoned.
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
        }
    }

    /// Number of stored accounts (for test assertions).
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// True when no accounts are stored.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<UserId, User>> {
        self.users
            .read()
            .expect("InMemoryUserRepository: lock poisoned")
    }

    fn collect_sorted<F>(&self, mut keep: F) -> Vec<User>
    where
        F: FnMut(&User) -> bool,
    {
        let mut users: Vec<User> = self.read().values().filter(|u| keep(u)).cloned().collect();
        // Stable order for deterministic listings
        users.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.username.cmp(&b.username))
        });
        users
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        Ok(self
            .read()
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        Ok(self.read().values().find(|u| u.email == email).cloned())
    }

    async fn exists_by_username(&self, username: &str) -> Result<bool, DomainError> {
        Ok(self.read().values().any(|u| u.username == username))
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        Ok(self.read().values().any(|u| u.email == email))
    }

    async fn save(&self, user: &User) -> Result<(), DomainError> {
        self.users
            .write()
            .expect("InMemoryUserRepository: lock poisoned")
            .insert(user.id, user.clone());
        Ok(())
    }

    async fn delete(&self, id: &UserId) -> Result<(), DomainError> {
        self.users
            .write()
            .expect("InMemoryUserRepository: lock poisoned")
            .remove(id);
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<User>, DomainError> {
        Ok(self.collect_sorted(|_| true))
    }

    async fn find_by_first_name(&self, first_name: &str) -> Result<Vec<User>, DomainError> {
        Ok(self.collect_sorted(|u| u.first_name.as_deref() == Some(first_name)))
    }

    async fn find_by_last_name(&self, last_name: &str) -> Result<Vec<User>, DomainError> {
        Ok(self.collect_sorted(|u| u.last_name.as_deref() == Some(last_name)))
    }

    async fn find_oldest(&self, limit: u32) -> Result<Vec<User>, DomainError> {
        let mut users = self.collect_sorted(|_| true);
        users.truncate(limit as usize);
        Ok(users)
    }

    async fn find_newest(&self, limit: u32) -> Result<Vec<User>, DomainError> {
        let mut users = self.collect_sorted(|_| true);
        users.reverse();
        users.truncate(limit as usize);
        Ok(users)
    }

    async fn find_enabled(&self) -> Result<Vec<User>, DomainError> {
        Ok(self.collect_sorted(|u| u.enabled))
    }

    async fn find_admins(&self) -> Result<Vec<User>, DomainError> {
        Ok(self.collect_sorted(|u| u.roles.contains(&RoleName::Admin)))
    }

    async fn search_by_username(&self, term: &str) -> Result<Vec<User>, DomainError> {
        Ok(self.collect_sorted(|u| contains_ci(&u.username, term)))
    }

    async fn search_by_name(&self, term: &str) -> Result<Vec<User>, DomainError> {
        Ok(self.collect_sorted(|u| {
            u.first_name
                .as_deref()
                .map(|n| contains_ci(n, term))
                .unwrap_or(false)
                || u.last_name
                    .as_deref()
                    .map(|n| contains_ci(n, term))
                    .unwrap_or(false)
        }))
    }

    async fn search_by_email(&self, term: &str) -> Result<Vec<User>, DomainError> {
        Ok(self.collect_sorted(|u| contains_ci(&u.email, term)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::NewAccount;

    fn stored_user(username: &str, email: &str) -> User {
        User::register(
            NewAccount {
                username: username.to_string(),
                email: email.to_string(),
                password: Some("p".to_string()),
                first_name: Some("Jaina".to_string()),
                last_name: Some("Proudmoore".to_string()),
                ..Default::default()
            },
            "digest".to_string(),
        )
    }

    #[tokio::test]
    async fn save_then_find_by_username() {
        let repo = InMemoryUserRepository::new();
        repo.save(&stored_user("jaina", "j@kt.com")).await.unwrap();

        let found = repo.find_by_username("jaina").await.unwrap().unwrap();
        assert_eq!(found.email, "j@kt.com");
        assert!(repo.exists_by_username("jaina").await.unwrap());
        assert!(!repo.exists_by_username("arthas").await.unwrap());
    }

    #[tokio::test]
    async fn save_replaces_by_id() {
        let repo = InMemoryUserRepository::new();
        let mut user = stored_user("jaina", "j@kt.com");
        repo.save(&user).await.unwrap();
        user.about = Some("Lady of Theramore".to_string());
        repo.save(&user).await.unwrap();

        assert_eq!(repo.len(), 1);
        let found = repo.find_by_username("jaina").await.unwrap().unwrap();
        assert_eq!(found.about.as_deref(), Some("Lady of Theramore"));
    }

    #[tokio::test]
    async fn delete_removes_account() {
        let repo = InMemoryUserRepository::new();
        let user = stored_user("jaina", "j@kt.com");
        repo.save(&user).await.unwrap();
        repo.delete(&user.id).await.unwrap();
        assert!(repo.is_empty());
    }

    #[tokio::test]
    async fn searches_are_case_insensitive_substrings() {
        let repo = InMemoryUserRepository::new();
        repo.save(&stored_user("jaina", "jaina@kt.com")).await.unwrap();
        repo.save(&stored_user("uther", "uther@sh.com")).await.unwrap();

        assert_eq!(repo.search_by_username("AIN").await.unwrap().len(), 1);
        assert_eq!(repo.search_by_email(".com").await.unwrap().len(), 2);
        assert_eq!(repo.search_by_name("proud").await.unwrap().len(), 2);
        assert!(repo.search_by_username("sylvanas").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn newest_reverses_oldest() {
        let repo = InMemoryUserRepository::new();
        repo.save(&stored_user("aaa", "a@x.com")).await.unwrap();
        repo.save(&stored_user("bbb", "b@x.com")).await.unwrap();
        repo.save(&stored_user("ccc", "c@x.com")).await.unwrap();

        let oldest = repo.find_oldest(2).await.unwrap();
        let newest = repo.find_newest(2).await.unwrap();
        assert_eq!(oldest.len(), 2);
        assert_eq!(newest.len(), 2);
        assert_eq!(oldest[0].username, "aaa");
        assert_eq!(newest[0].username, "ccc");
    }
}
