//! Hero domain module.
//!
//! The Hero aggregate owned by a user account, plus the closed hero-type
//! enumeration.

mod hero;
mod hero_type;

pub use hero::{Hero, HeroPatch, HeroView, NewHero};
pub use hero_type::HeroType;
