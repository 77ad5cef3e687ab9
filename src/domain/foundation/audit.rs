//! Audit events emitted after committed mutations.
//!
//! Every state change in the account and hero modules publishes one
//! `AuditEvent` through the `EventSink` port. Publication is
//! fire-and-forget: a failed publish never rolls back or fails the
//! triggering operation.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::Timestamp;

/// The aggregate family an event refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventCategory {
    Account,
    Hero,
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Account => write!(f, "ACCOUNT"),
            Self::Hero => write!(f, "HERO"),
        }
    }
}

/// The mutation that occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventAction {
    Add,
    Edit,
    Delete,
    Register,
    ChangePassword,
    GrantAdmin,
}

impl fmt::Display for EventAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Add => write!(f, "ADD"),
            Self::Edit => write!(f, "EDIT"),
            Self::Delete => write!(f, "DELETE"),
            Self::Register => write!(f, "REGISTER"),
            Self::ChangePassword => write!(f, "CHANGE_PASSWORD"),
            Self::GrantAdmin => write!(f, "GRANT_ADMIN"),
        }
    }
}

/// A single audit record: which aggregate family, which subject (its
/// natural key), what happened, and when.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEvent {
    /// Unique ID for this event instance (deduplication downstream).
    pub event_id: Uuid,

    /// Aggregate family.
    pub category: EventCategory,

    /// Natural key of the subject (username or hero name).
    pub subject: String,

    /// The mutation that occurred.
    pub action: EventAction,

    /// When the event was emitted.
    pub occurred_at: Timestamp,
}

impl AuditEvent {
    /// Creates a new event stamped with the current time.
    pub fn new(category: EventCategory, subject: impl Into<String>, action: EventAction) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            category,
            subject: subject.into(),
            action,
            occurred_at: Timestamp::now(),
        }
    }
}

impl fmt::Display for AuditEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} {}", self.category, self.action, self.subject)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_displays_category_action_subject() {
        let event = AuditEvent::new(EventCategory::Account, "arthas", EventAction::Register);
        assert_eq!(format!("{}", event), "ACCOUNT/REGISTER arthas");
    }

    #[test]
    fn event_ids_are_unique() {
        let a = AuditEvent::new(EventCategory::Hero, "frostmourne", EventAction::Add);
        let b = AuditEvent::new(EventCategory::Hero, "frostmourne", EventAction::Add);
        assert_ne!(a.event_id, b.event_id);
    }

    #[test]
    fn serializes_enums_as_screaming_snake() {
        let event = AuditEvent::new(EventCategory::Account, "arthas", EventAction::ChangePassword);
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["category"], "ACCOUNT");
        assert_eq!(json["action"], "CHANGE_PASSWORD");
    }
}
