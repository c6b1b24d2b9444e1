//! Audit sink trait

use async_trait::async_trait;

use super::entity::AuditEvent;
use crate::domain::AuditError;

#[cfg(test)]
use mockall::automock;

/// Best-effort destination for audit events
///
/// Callers log and discard delivery errors.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AuditSink: Send + Sync {
    async fn send(&self, event: AuditEvent) -> Result<(), AuditError>;
}
