//! HeroType - the closed enumeration of playable classes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Playable class of a hero. Closed set; unknown names are rejected at
/// the service boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HeroType {
    Warrior,
    Paladin,
    Mage,
    Rogue,
    Priest,
    Hunter,
}

impl HeroType {
    /// All known hero types.
    pub fn all() -> &'static [HeroType] {
        &[
            HeroType::Warrior,
            HeroType::Paladin,
            HeroType::Mage,
            HeroType::Rogue,
            HeroType::Priest,
            HeroType::Hunter,
        ]
    }

    /// Canonical storage representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            HeroType::Warrior => "WARRIOR",
            HeroType::Paladin => "PALADIN",
            HeroType::Mage => "MAGE",
            HeroType::Rogue => "ROGUE",
            HeroType::Priest => "PRIEST",
            HeroType::Hunter => "HUNTER",
        }
    }

    /// Case-insensitive lookup of a type by name. `None` for names outside
    /// the closed set.
    pub fn parse(name: &str) -> Option<HeroType> {
        let upper = name.to_ascii_uppercase();
        Self::all().iter().copied().find(|t| t.as_str() == upper)
    }
}

impl fmt::Display for HeroType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
