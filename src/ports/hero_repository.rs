//! HeroRepository port for hero persistence operations.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, HeroId};
use crate::domain::hero::{Hero, HeroType};

/// Repository contract for heroes.
///
/// Finders return `Ok(None)` / empty vectors for absent data; `Err` is
/// reserved for infrastructure failures. Hero names are globally unique;
/// store-backed implementations must enforce that with a unique constraint
/// in addition to the service-level check.
#[async_trait]
pub trait HeroRepository: Send + Sync {
    /// Finds a hero by its unique name.
    async fn find_by_name(&self, name: &str) -> Result<Option<Hero>, DomainError>;

    /// Checks whether the hero name is already taken.
    async fn exists_by_name(&self, name: &str) -> Result<bool, DomainError>;

    /// Persists a hero, inserting or replacing by id.
    async fn save(&self, hero: &Hero) -> Result<(), DomainError>;

    /// Deletes a hero by id.
    async fn delete(&self, id: &HeroId) -> Result<(), DomainError>;

    /// Returns every stored hero.
    async fn find_all(&self) -> Result<Vec<Hero>, DomainError>;

    /// Returns heroes owned by the given username.
    async fn find_by_username(&self, username: &str) -> Result<Vec<Hero>, DomainError>;

    /// Returns heroes of the given type.
    async fn find_by_type(&self, hero_type: HeroType) -> Result<Vec<Hero>, DomainError>;

    /// Returns heroes at exactly the given level.
    async fn find_by_level(&self, level: i32) -> Result<Vec<Hero>, DomainError>;

    /// Returns heroes strictly above the given level.
    async fn find_by_level_above(&self, level: i32) -> Result<Vec<Hero>, DomainError>;

    /// Returns heroes strictly below the given level.
    async fn find_by_level_below(&self, level: i32) -> Result<Vec<Hero>, DomainError>;

    /// Returns up to `limit` heroes, highest level first.
    async fn find_top_by_level(&self, limit: u32) -> Result<Vec<Hero>, DomainError>;

    /// Returns up to `limit` heroes, newest creation first.
    async fn find_newest(&self, limit: u32) -> Result<Vec<Hero>, DomainError>;
}
