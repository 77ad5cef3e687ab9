//! Tracing-backed event sink.

use async_trait::async_trait;
use tracing::info;

use crate::domain::foundation::{AuditEvent, DomainError};
use crate::ports::EventSink;

/// Event sink that emits each audit event as a structured log record.
///
/// This is the default production sink when no message broker is wired in:
/// the services only require fire-and-forget semantics, which a log line
/// satisfies. Infallible by construction.
pub struct TracingEventSink;

impl TracingEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TracingEventSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventSink for TracingEventSink {
    async fn publish(&self, event: AuditEvent) -> Result<(), DomainError> {
        info!(
            event_id = %event.event_id,
            category = %event.category,
            action = %event.action,
            subject = %event.subject,
            "audit event"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{EventAction, EventCategory};

    #[tokio::test]
    async fn publish_never_fails() {
        let sink = TracingEventSink::new();
        let event = AuditEvent::new(EventCategory::Hero, "frostmourne", EventAction::Delete);
        assert!(sink.publish(event).await.is_ok());
    }
}
