//! In-memory repository implementations.
//!
//! Synchronous, deterministic storage for unit and integration tests, and
//! good enough for single-process deployments without a database.
//!
//! These adapters use `.expect()` on lock operations and will panic if a
//! lock is poisoned; durable deployments should use the postgres adapters.

mod hero_repository;
mod user_repository;

pub use hero_repository::InMemoryHeroRepository;
pub use user_repository::InMemoryUserRepository;
