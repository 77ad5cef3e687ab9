//! In-memory implementation of HeroRepository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::domain::foundation::{DomainError, HeroId};
use crate::domain::hero::{Hero, HeroType};
use crate::ports::HeroRepository;

/// In-memory hero store keyed by hero id.
///
/// # Panics
///
/// Methods panic if the internal lock is poisoned.
pub struct InMemoryHeroRepository {
    heroes: RwLock<HashMap<HeroId, Hero>>,
}

impl InMemoryHeroRepository {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            heroes: RwLock::new(HashMap::new()),
        }
    }

    /// Number of stored heroes (for test assertions).
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// True when no heroes are stored.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<HeroId, Hero>> {
        self.heroes
            .read()
            .expect("InMemoryHeroRepository: lock poisoned")
    }

    fn collect_sorted<F>(&self, mut keep: F) -> Vec<Hero>
    where
        F: FnMut(&Hero) -> bool,
    {
        let mut heroes: Vec<Hero> = self.read().values().filter(|h| keep(h)).cloned().collect();
        // Stable order for deterministic listings
        heroes.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.name.cmp(&b.name))
        });
        heroes
    }
}

impl Default for InMemoryHeroRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HeroRepository for InMemoryHeroRepository {
    async fn find_by_name(&self, name: &str) -> Result<Option<Hero>, DomainError> {
        Ok(self.read().values().find(|h| h.name == name).cloned())
    }

    async fn exists_by_name(&self, name: &str) -> Result<bool, DomainError> {
        Ok(self.read().values().any(|h| h.name == name))
    }

    async fn save(&self, hero: &Hero) -> Result<(), DomainError> {
        self.heroes
            .write()
            .expect("InMemoryHeroRepository: lock poisoned")
            .insert(hero.id, hero.clone());
        Ok(())
    }

    async fn delete(&self, id: &HeroId) -> Result<(), DomainError> {
        self.heroes
            .write()
            .expect("InMemoryHeroRepository: lock poisoned")
            .remove(id);
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<Hero>, DomainError> {
        Ok(self.collect_sorted(|_| true))
    }

    async fn find_by_username(&self, username: &str) -> Result<Vec<Hero>, DomainError> {
        Ok(self.collect_sorted(|h| h.username == username))
    }

    async fn find_by_type(&self, hero_type: HeroType) -> Result<Vec<Hero>, DomainError> {
        Ok(self.collect_sorted(|h| h.hero_type == hero_type))
    }

    async fn find_by_level(&self, level: i32) -> Result<Vec<Hero>, DomainError> {
        Ok(self.collect_sorted(|h| h.level == level))
    }

    async fn find_by_level_above(&self, level: i32) -> Result<Vec<Hero>, DomainError> {
        Ok(self.collect_sorted(|h| h.level > level))
    }

    async fn find_by_level_below(&self, level: i32) -> Result<Vec<Hero>, DomainError> {
        Ok(self.collect_sorted(|h| h.level < level))
    }

    async fn find_top_by_level(&self, limit: u32) -> Result<Vec<Hero>, DomainError> {
        let mut heroes = self.collect_sorted(|_| true);
        heroes.sort_by(|a, b| b.level.cmp(&a.level).then_with(|| a.name.cmp(&b.name)));
        heroes.truncate(limit as usize);
        Ok(heroes)
    }

    async fn find_newest(&self, limit: u32) -> Result<Vec<Hero>, DomainError> {
        let mut heroes = self.collect_sorted(|_| true);
        heroes.reverse();
        heroes.truncate(limit as usize);
        Ok(heroes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored_hero(name: &str, username: &str, hero_type: HeroType, level: i32) -> Hero {
        Hero::create(name.to_string(), username.to_string(), hero_type, level)
    }

    #[tokio::test]
    async fn save_then_find_by_name() {
        let repo = InMemoryHeroRepository::new();
        repo.save(&stored_hero("frostmourne", "arthas", HeroType::Warrior, 1))
            .await
            .unwrap();

        let found = repo.find_by_name("frostmourne").await.unwrap().unwrap();
        assert_eq!(found.username, "arthas");
        assert!(repo.exists_by_name("frostmourne").await.unwrap());
        assert!(!repo.exists_by_name("ashbringer").await.unwrap());
    }

    #[tokio::test]
    async fn level_filters_are_strict() {
        let repo = InMemoryHeroRepository::new();
        for (name, level) in [("a", 10), ("b", 20), ("c", 30)] {
            repo.save(&stored_hero(name, "arthas", HeroType::Mage, level))
                .await
                .unwrap();
        }

        assert_eq!(repo.find_by_level(20).await.unwrap().len(), 1);
        let above: Vec<String> = repo
            .find_by_level_above(20)
            .await
            .unwrap()
            .into_iter()
            .map(|h| h.name)
            .collect();
        assert_eq!(above, vec!["c"]);
        let below: Vec<String> = repo
            .find_by_level_below(20)
            .await
            .unwrap()
            .into_iter()
            .map(|h| h.name)
            .collect();
        assert_eq!(below, vec!["a"]);
    }

    #[tokio::test]
    async fn top_by_level_sorts_descending() {
        let repo = InMemoryHeroRepository::new();
        for (name, level) in [("a", 10), ("b", 30), ("c", 20)] {
            repo.save(&stored_hero(name, "arthas", HeroType::Rogue, level))
                .await
                .unwrap();
        }

        let top: Vec<i32> = repo
            .find_top_by_level(2)
            .await
            .unwrap()
            .into_iter()
            .map(|h| h.level)
            .collect();
        assert_eq!(top, vec![30, 20]);
    }

    #[tokio::test]
    async fn find_by_username_filters_owner() {
        let repo = InMemoryHeroRepository::new();
        repo.save(&stored_hero("frostmourne", "arthas", HeroType::Warrior, 1))
            .await
            .unwrap();
        repo.save(&stored_hero("ashbringer", "tirion", HeroType::Paladin, 1))
            .await
            .unwrap();

        let owned = repo.find_by_username("arthas").await.unwrap();
        assert_eq!(owned.len(), 1);
        assert_eq!(owned[0].name, "frostmourne");
        assert!(repo.find_by_username("jaina").await.unwrap().is_empty());
    }
}
