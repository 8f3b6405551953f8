//! Shared fixtures for unit tests.

use std::sync::Mutex;

use crate::error::CartError;
use crate::mutator::{UpdateItemRequest, UpdateTransport};

/// One request seen by [`RecordingTransport`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub body: serde_json::Value,
    pub csrf_token: String,
}

/// Transport that records every request and answers with a canned outcome.
pub struct RecordingTransport {
    calls: Mutex<Vec<RecordedCall>>,
    fail_status: Option<u16>,
}

impl RecordingTransport {
    /// Acknowledges every request the way the storefront does.
    pub fn ok() -> Self {
        Self { calls: Mutex::new(Vec::new()), fail_status: None }
    }

    /// Answers every request with `status`.
    pub fn failing(status: u16) -> Self {
        Self { calls: Mutex::new(Vec::new()), fail_status: Some(status) }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl UpdateTransport for RecordingTransport {
    async fn post_update(
        &self,
        request: &UpdateItemRequest<'_>,
        csrf_token: &str,
    ) -> Result<serde_json::Value, CartError> {
        self.calls.lock().unwrap().push(RecordedCall {
            body: serde_json::to_value(request).unwrap(),
            csrf_token: csrf_token.to_string(),
        });
        match self.fail_status {
            Some(status) => Err(CartError::Status { status, body: "server error".into() }),
            None => Ok(serde_json::json!("Item Was Added")),
        }
    }
}
