//! Recording event sink for testing.
//!
//! Provides synchronous, deterministic event capture for assertions.
//! Not meant for production use.

use async_trait::async_trait;
use std::sync::RwLock;

use crate::domain::foundation::{AuditEvent, DomainError, EventAction};
use crate::ports::EventSink;

/// Event sink that records everything published to it.
///
/// # Panics
///
/// Methods panic if the internal lock is poisoned. Acceptable for test
/// code; production should use [`super::TracingEventSink`].
pub struct RecordingEventSink {
    published: RwLock<Vec<AuditEvent>>,
}

impl RecordingEventSink {
    /// Creates a new empty sink.
    pub fn new() -> Self {
        Self {
            published: RwLock::new(Vec::new()),
        }
    }

    /// Returns all published events in publication order.
    pub fn published_events(&self) -> Vec<AuditEvent> {
        self.published
            .read()
            .expect("RecordingEventSink: lock poisoned")
            .clone()
    }

    /// Returns the events published about a given subject.
    pub fn events_for_subject(&self, subject: &str) -> Vec<AuditEvent> {
        self.published_events()
            .into_iter()
            .filter(|e| e.subject == subject)
            .collect()
    }

    /// Returns the actions published, in order (compact assertion helper).
    pub fn actions(&self) -> Vec<EventAction> {
        self.published_events().into_iter().map(|e| e.action).collect()
    }

    /// Number of published events.
    pub fn event_count(&self) -> usize {
        self.published
            .read()
            .expect("RecordingEventSink: lock poisoned")
            .len()
    }

    /// Clears all published events (for test isolation).
    pub fn clear(&self) {
        self.published
            .write()
            .expect("RecordingEventSink: lock poisoned")
            .clear();
    }
}

impl Default for RecordingEventSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventSink for RecordingEventSink {
    async fn publish(&self, event: AuditEvent) -> Result<(), DomainError> {
        self.published
            .write()
            .expect("RecordingEventSink: lock poisoned")
            .push(event);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::EventCategory;

    #[tokio::test]
    async fn records_in_publication_order() {
        let sink = RecordingEventSink::new();
        sink.publish(AuditEvent::new(
            EventCategory::Account,
            "arthas",
            EventAction::Register,
        ))
        .await
        .unwrap();
        sink.publish(AuditEvent::new(
            EventCategory::Hero,
            "frostmourne",
            EventAction::Add,
        ))
        .await
        .unwrap();

        assert_eq!(sink.event_count(), 2);
        assert_eq!(sink.actions(), vec![EventAction::Register, EventAction::Add]);
        assert_eq!(sink.events_for_subject("arthas").len(), 1);

        sink.clear();
        assert_eq!(sink.event_count(), 0);
    }
}
