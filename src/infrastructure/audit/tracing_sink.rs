//! Audit sink that writes events to the log

use async_trait::async_trait;
use tracing::info;

use crate::domain::{AuditError, AuditEvent, AuditSink};

/// Records audit events as structured log lines; used when no audit service is configured
#[derive(Debug, Clone, Default)]
pub struct TracingAuditSink;

impl TracingAuditSink {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AuditSink for TracingAuditSink {
    async fn send(&self, event: AuditEvent) -> Result<(), AuditError> {
        info!(
            target: "audit",
            entity = event.entity.as_str(),
            action = event.action.as_str(),
            entity_id = event.entity_id,
            timestamp = %event.timestamp.to_rfc3339(),
            "Audit event"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserId;

    #[tokio::test]
    async fn test_never_fails() {
        let sink = TracingAuditSink::new();
        assert!(sink.send(AuditEvent::user_logged_in(UserId::new(1))).await.is_ok());
    }
}
