//! HeroService - hero lifecycle operations and queries.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::foundation::{
    AuditEvent, DomainError, ErrorCode, EventAction, EventCategory,
};
use crate::domain::hero::{Hero, HeroPatch, HeroType, HeroView, NewHero};
use crate::ports::{EventSink, HeroRepository, UserRepository};

/// Owns hero creation, update, deletion, and the hero queries.
///
/// Heroes reference their owning account by username; creation requires
/// the owner to exist. Unlike the account queries, hero listing queries
/// return empty sequences as success.
pub struct HeroService {
    heroes: Arc<dyn HeroRepository>,
    users: Arc<dyn UserRepository>,
    events: Arc<dyn EventSink>,
}

impl HeroService {
    pub fn new(
        heroes: Arc<dyn HeroRepository>,
        users: Arc<dyn UserRepository>,
        events: Arc<dyn EventSink>,
    ) -> Self {
        Self {
            heroes,
            users,
            events,
        }
    }

    /// Creates a new hero for an existing account.
    pub async fn create(&self, details: NewHero) -> Result<HeroView, DomainError> {
        if self.heroes.exists_by_name(&details.name).await? {
            return Err(DomainError::new(
                ErrorCode::HeroExists,
                format!("Hero named '{}' already exists", details.name),
            )
            .with_detail("name", &details.name));
        }
        if self.users.find_by_username(&details.username).await?.is_none() {
            return Err(DomainError::username_not_found(&details.username));
        }
        let hero_type = Self::resolve_type(&details.hero_type)?;

        let hero = Hero::create(details.name, details.username, hero_type, details.level);
        self.heroes.save(&hero).await?;
        info!(name = %hero.name, owner = %hero.username, "created hero");
        self.publish(&hero.name, EventAction::Add).await;
        Ok(HeroView::from(&hero))
    }

    /// Applies a partial update to an existing hero. Fields absent from
    /// the patch retain their prior values.
    pub async fn update(&self, patch: HeroPatch) -> Result<HeroView, DomainError> {
        let mut hero = self
            .heroes
            .find_by_name(&patch.name)
            .await?
            .ok_or_else(|| DomainError::hero_not_found(&patch.name))?;

        hero.apply(&patch);
        self.heroes.save(&hero).await?;
        info!(name = %hero.name, "updated hero");
        self.publish(&hero.name, EventAction::Edit).await;
        Ok(HeroView::from(&hero))
    }

    /// Deletes a hero by name.
    pub async fn delete(&self, name: &str) -> Result<(), DomainError> {
        let hero = self
            .heroes
            .find_by_name(name)
            .await?
            .ok_or_else(|| DomainError::hero_not_found(name))?;

        self.heroes.delete(&hero.id).await?;
        info!(name = %hero.name, "deleted hero");
        self.publish(&hero.name, EventAction::Delete).await;
        Ok(())
    }

    // === Queries ===

    /// Returns every hero. Empty stores yield an empty list.
    pub async fn all(&self) -> Result<Vec<HeroView>, DomainError> {
        Ok(Self::views(self.heroes.find_all().await?))
    }

    /// Looks a hero up by its unique name.
    pub async fn by_name(&self, name: &str) -> Result<HeroView, DomainError> {
        self.heroes
            .find_by_name(name)
            .await?
            .map(|h| HeroView::from(&h))
            .ok_or_else(|| DomainError::hero_not_found(name))
    }

    /// Returns the heroes owned by an account. The account must exist;
    /// an existing account with no heroes yields an empty list.
    pub async fn by_username(&self, username: &str) -> Result<Vec<HeroView>, DomainError> {
        if self.users.find_by_username(username).await?.is_none() {
            return Err(DomainError::username_not_found(username));
        }
        Ok(Self::views(self.heroes.find_by_username(username).await?))
    }

    /// Returns heroes of the named type. Names outside the closed
    /// enumeration are rejected.
    pub async fn by_type(&self, type_name: &str) -> Result<Vec<HeroView>, DomainError> {
        let hero_type = Self::resolve_type(type_name)?;
        Ok(Self::views(self.heroes.find_by_type(hero_type).await?))
    }

    /// Returns heroes at exactly the given level.
    pub async fn by_level(&self, level: i32) -> Result<Vec<HeroView>, DomainError> {
        Ok(Self::views(self.heroes.find_by_level(level).await?))
    }

    /// Returns heroes strictly above the given level.
    pub async fn by_min_level(&self, level: i32) -> Result<Vec<HeroView>, DomainError> {
        Ok(Self::views(self.heroes.find_by_level_above(level).await?))
    }

    /// Returns heroes strictly below the given level.
    pub async fn by_max_level(&self, level: i32) -> Result<Vec<HeroView>, DomainError> {
        Ok(Self::views(self.heroes.find_by_level_below(level).await?))
    }

    /// Returns the ten highest-level heroes.
    pub async fn top_by_level(&self) -> Result<Vec<HeroView>, DomainError> {
        Ok(Self::views(self.heroes.find_top_by_level(10).await?))
    }

    /// Returns the ten most recently created heroes.
    pub async fn last_added(&self) -> Result<Vec<HeroView>, DomainError> {
        Ok(Self::views(self.heroes.find_newest(10).await?))
    }

    fn resolve_type(type_name: &str) -> Result<HeroType, DomainError> {
        HeroType::parse(type_name).ok_or_else(|| {
            DomainError::new(
                ErrorCode::HeroTypeNotFound,
                format!("Hero type '{}' not found", type_name),
            )
            .with_detail("type", type_name)
        })
    }

    fn views(heroes: Vec<Hero>) -> Vec<HeroView> {
        heroes.iter().map(HeroView::from).collect()
    }

    async fn publish(&self, name: &str, action: EventAction) {
        let event = AuditEvent::new(EventCategory::Hero, name, action);
        if let Err(err) = self.events.publish(event).await {
            warn!(%err, name, "failed to publish hero event");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::adapters::events::RecordingEventSink;
    use crate::adapters::memory::{InMemoryHeroRepository, InMemoryUserRepository};
    use crate::domain::foundation::ErrorKind;
    use crate::domain::user::{NewAccount, User};

    struct Fixture {
        service: HeroService,
        users: Arc<InMemoryUserRepository>,
        heroes: Arc<InMemoryHeroRepository>,
        sink: Arc<RecordingEventSink>,
    }

    fn fixture() -> Fixture {
        let users = Arc::new(InMemoryUserRepository::new());
        let heroes = Arc::new(InMemoryHeroRepository::new());
        let sink = Arc::new(RecordingEventSink::new());
        let service = HeroService::new(heroes.clone(), users.clone(), sink.clone());
        Fixture {
            service,
            users,
            heroes,
            sink,
        }
    }

    async fn seed_user(f: &Fixture, username: &str) {
        let user = User::register(
            NewAccount {
                username: username.to_string(),
                email: format!("{}@x.com", username),
                password: Some("p".to_string()),
                ..Default::default()
            },
            "digest".to_string(),
        );
        f.users.save(&user).await.unwrap();
    }

    fn new_hero(name: &str, username: &str, hero_type: &str, level: i32) -> NewHero {
        NewHero {
            name: name.to_string(),
            username: username.to_string(),
            hero_type: hero_type.to_string(),
            level,
        }
    }

    #[tokio::test]
    async fn create_requires_owner_unique_name_and_known_type() {
        let f = fixture();
        seed_user(&f, "arthas").await;

        let view = f
            .service
            .create(new_hero("frostmourne", "arthas", "WARRIOR", 1))
            .await
            .unwrap();
        assert_eq!(view.username, "arthas");
        assert_eq!(view.hero_type, HeroType::Warrior);
        assert_eq!(f.sink.actions(), vec![EventAction::Add]);

        let err = f
            .service
            .create(new_hero("frostmourne", "arthas", "MAGE", 1))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::HeroExists);
        assert_eq!(err.kind(), ErrorKind::Conflict);

        let err = f
            .service
            .create(new_hero("ashbringer", "tirion", "PALADIN", 1))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::UsernameNotFound);

        let err = f
            .service
            .create(new_hero("ashbringer", "arthas", "NECROMANCER", 1))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::HeroTypeNotFound);

        assert_eq!(f.heroes.len(), 1);
    }

    #[tokio::test]
    async fn update_merges_partial_patch() {
        let f = fixture();
        seed_user(&f, "arthas").await;
        f.service
            .create(new_hero("frostmourne", "arthas", "WARRIOR", 1))
            .await
            .unwrap();

        let view = f
            .service
            .update(HeroPatch {
                name: "frostmourne".to_string(),
                level: Some(5),
                hero_type: None,
            })
            .await
            .unwrap();

        assert_eq!(view.level, 5);
        assert_eq!(view.hero_type, HeroType::Warrior);
        assert_eq!(view.username, "arthas");
        assert_eq!(f.sink.actions(), vec![EventAction::Add, EventAction::Edit]);

        let err = f
            .service
            .update(HeroPatch {
                name: "ashbringer".to_string(),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::HeroNotFound);
    }

    #[tokio::test]
    async fn delete_then_lookup_fails_not_found() {
        let f = fixture();
        seed_user(&f, "arthas").await;
        f.service
            .create(new_hero("frostmourne", "arthas", "WARRIOR", 1))
            .await
            .unwrap();

        f.service.delete("frostmourne").await.unwrap();

        assert!(f.heroes.is_empty());
        let err = f.service.by_name("frostmourne").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::HeroNotFound);
        assert_eq!(err.kind(), ErrorKind::NotFound);

        let err = f.service.delete("frostmourne").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::HeroNotFound);
    }

    #[tokio::test]
    async fn listing_queries_return_empty_success() {
        let f = fixture();

        assert!(f.service.all().await.unwrap().is_empty());
        assert!(f.service.by_level(10).await.unwrap().is_empty());
        assert!(f.service.by_min_level(0).await.unwrap().is_empty());
        assert!(f.service.by_max_level(100).await.unwrap().is_empty());
        assert!(f.service.top_by_level().await.unwrap().is_empty());
        assert!(f.service.last_added().await.unwrap().is_empty());
        assert!(f.service.by_type("MAGE").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn by_username_requires_known_owner() {
        let f = fixture();
        seed_user(&f, "arthas").await;

        // Known owner with no heroes: empty success
        assert!(f.service.by_username("arthas").await.unwrap().is_empty());

        let err = f.service.by_username("tirion").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::UsernameNotFound);
    }

    #[tokio::test]
    async fn by_type_rejects_unknown_names_but_accepts_any_case() {
        let f = fixture();
        seed_user(&f, "arthas").await;
        f.service
            .create(new_hero("frostmourne", "arthas", "warrior", 1))
            .await
            .unwrap();

        assert_eq!(f.service.by_type("Warrior").await.unwrap().len(), 1);

        let err = f.service.by_type("DEATHKNIGHT").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::HeroTypeNotFound);
    }

    #[tokio::test]
    async fn level_queries_are_strict_bounds() {
        let f = fixture();
        seed_user(&f, "arthas").await;
        for (name, level) in [("a", 10), ("b", 20), ("c", 30)] {
            f.service
                .create(new_hero(name, "arthas", "HUNTER", level))
                .await
                .unwrap();
        }

        assert_eq!(f.service.by_level(20).await.unwrap().len(), 1);
        let above = f.service.by_min_level(20).await.unwrap();
        assert_eq!(above.len(), 1);
        assert_eq!(above[0].level, 30);
        let below = f.service.by_max_level(20).await.unwrap();
        assert_eq!(below.len(), 1);
        assert_eq!(below[0].level, 10);

        let top = f.service.top_by_level().await.unwrap();
        assert_eq!(top[0].level, 30);
    }
}
