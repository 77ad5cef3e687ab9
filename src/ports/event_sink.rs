//! EventSink port - Interface for publishing audit events.
//!
//! This port defines how the services publish events without knowing
//! about the underlying transport mechanism.

use async_trait::async_trait;

use crate::domain::foundation::{AuditEvent, DomainError};

/// Port for publishing audit events.
///
/// Publication is fire-and-forget from the services' point of view: they
/// publish after the write is committed, log a failure, and never let it
/// roll back or fail the triggering operation. No delivery or retry
/// guarantees are imposed on implementations.
#[async_trait]
pub trait EventSink: Send + Sync {
    /// Publish a single audit event.
    async fn publish(&self, event: AuditEvent) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Compile-time check that the trait is object-safe
    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn EventSink) {}
}
