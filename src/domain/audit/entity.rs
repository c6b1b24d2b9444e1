//! Audit event types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::user::UserId;

/// Kind of entity an audit event refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditEntity {
    User,
}

impl AuditEntity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "USER",
        }
    }
}

/// Lifecycle action recorded by an audit event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    Register,
    Login,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Register => "REGISTER",
            Self::Login => "LOGIN",
        }
    }
}

/// A discrete lifecycle event delivered to the audit sink
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEvent {
    pub entity: AuditEntity,
    pub action: AuditAction,
    pub entity_id: i64,
    pub timestamp: DateTime<Utc>,
}

impl AuditEvent {
    pub fn new(entity: AuditEntity, action: AuditAction, entity_id: i64) -> Self {
        Self {
            entity,
            action,
            entity_id,
            timestamp: Utc::now(),
        }
    }

    pub fn user_registered(user_id: UserId) -> Self {
        Self::new(AuditEntity::User, AuditAction::Register, user_id.value())
    }

    pub fn user_logged_in(user_id: UserId) -> Self {
        Self::new(AuditEntity::User, AuditAction::Login, user_id.value())
    }
}
