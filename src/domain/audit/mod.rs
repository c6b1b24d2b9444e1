//! Audit domain

mod entity;
mod sink;

pub use entity::{AuditAction, AuditEntity, AuditEvent};
pub use sink::AuditSink;

#[cfg(test)]
pub use sink::MockAuditSink;
