//! Domain layer - entities, value objects, and pure validation rules.

pub mod foundation;
pub mod hero;
pub mod role;
pub mod user;
