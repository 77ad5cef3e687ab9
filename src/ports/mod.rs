//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `UserRepository` / `HeroRepository` - persistence contracts
//! - `EventSink` - fire-and-forget audit-event publication
//! - `PasswordHasher` - opaque one-way password digests

mod event_sink;
mod hero_repository;
mod password_hasher;
mod user_repository;

pub use event_sink::EventSink;
pub use hero_repository::HeroRepository;
pub use password_hasher::PasswordHasher;
pub use user_repository::UserRepository;
