//! HTTP audit sink

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use crate::domain::{AuditError, AuditEvent, AuditSink};

/// Delivers audit events as JSON POSTs to a remote audit service
#[derive(Debug, Clone)]
pub struct HttpAuditSink {
    endpoint: String,
    http_client: Client,
}

impl HttpAuditSink {
    /// Create a sink whose requests give up after `timeout`
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, AuditError> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AuditError::delivery(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: endpoint.into(),
            http_client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl AuditSink for HttpAuditSink {
    async fn send(&self, event: AuditEvent) -> Result<(), AuditError> {
        let response = self
            .http_client
            .post(&self.endpoint)
            .json(&event)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AuditError::delivery("Request timed out")
                } else if e.is_connect() {
                    AuditError::delivery("Connection failed")
                } else {
                    AuditError::delivery(format!("Request failed: {}", e))
                }
            })?;

        let status = response.status();

        if !status.is_success() {
            return Err(AuditError::Rejected {
                status: status.as_u16(),
            });
        }

        debug!(
            entity = event.entity.as_str(),
            action = event.action.as_str(),
            entity_id = event.entity_id,
            "Audit event delivered"
        );

        Ok(())
    }
}
