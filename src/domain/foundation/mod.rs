//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, the timestamp value object, error types and the
//! audit-event vocabulary shared by the account and hero modules.

mod audit;
mod errors;
mod ids;
mod timestamp;

pub use audit::{AuditEvent, EventCategory, EventAction};
pub use errors::{DomainError, ErrorCode, ErrorKind};
pub use ids::{HeroId, UserId};
pub use timestamp::Timestamp;
