//! Hero aggregate entity.
//!
//! # Invariants
//!
//! - `name` is globally unique (not per-user)
//! - `username` references an account that existed at creation time
//! - `hero_type` is always one of the closed enumeration

use serde::{Deserialize, Serialize};

use super::HeroType;
use crate::domain::foundation::{HeroId, Timestamp};

/// Hero aggregate - a character owned by a user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hero {
    /// Unique identifier for this hero.
    pub id: HeroId,

    /// Globally unique character name.
    pub name: String,

    /// Username of the owning account. Usernames are immutable, so this
    /// natural key is stable for the hero's lifetime.
    pub username: String,

    /// Playable class.
    pub hero_type: HeroType,

    /// Character level.
    pub level: i32,

    /// When the hero was created.
    pub created_at: Timestamp,
}

impl Hero {
    /// Creates a new hero from validated creation details.
    ///
    /// The caller has already resolved the hero type and confirmed the
    /// owning account exists.
    pub fn create(name: String, username: String, hero_type: HeroType, level: i32) -> Self {
        Self {
            id: HeroId::new(),
            name,
            username,
            hero_type,
            level,
            created_at: Timestamp::now(),
        }
    }

    /// Merges the present fields of a patch onto this hero.
    ///
    /// Absent fields keep their prior values; the owner and creation date
    /// are not patchable.
    pub fn apply(&mut self, patch: &HeroPatch) {
        if let Some(hero_type) = patch.hero_type {
            self.hero_type = hero_type;
        }
        if let Some(level) = patch.level {
            self.level = level;
        }
    }
}

/// Creation request for a new hero.
///
/// `hero_type` arrives as a raw string and is resolved against the closed
/// enumeration by the service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewHero {
    pub name: String,
    pub username: String,
    pub hero_type: String,
    pub level: i32,
}

/// Partial hero update, selected by name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HeroPatch {
    /// Selector: which hero to update. Not itself updatable.
    pub name: String,
    pub hero_type: Option<HeroType>,
    pub level: Option<i32>,
}

/// Read-side projection of a hero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroView {
    pub name: String,
    pub username: String,
    pub hero_type: HeroType,
    pub level: i32,
    pub created_at: Timestamp,
}

impl From<&Hero> for HeroView {
    fn from(hero: &Hero) -> Self {
        Self {
            name: hero.name.clone(),
            username: hero.username.clone(),
            hero_type: hero.hero_type,
            level: hero.level,
            created_at: hero.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_merges_only_present_fields() {
        let mut hero = Hero::create(
            "frostmourne".to_string(),
            "arthas".to_string(),
            HeroType::Warrior,
            1,
        );
        let created_at = hero.created_at;

        hero.apply(&HeroPatch {
            name: "frostmourne".to_string(),
            level: Some(5),
            hero_type: None,
        });

        assert_eq!(hero.level, 5);
        assert_eq!(hero.hero_type, HeroType::Warrior);
        assert_eq!(hero.username, "arthas");
        assert_eq!(hero.created_at, created_at);
    }

    #[test]
    fn view_mirrors_the_aggregate() {
        let hero = Hero::create(
            "frostmourne".to_string(),
            "arthas".to_string(),
            HeroType::Paladin,
            60,
        );
        let view = HeroView::from(&hero);
        assert_eq!(view.name, "frostmourne");
        assert_eq!(view.username, "arthas");
        assert_eq!(view.hero_type, HeroType::Paladin);
        assert_eq!(view.level, 60);
    }
}
