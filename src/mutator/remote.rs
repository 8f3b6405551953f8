//! Remote strategy — server-side cart for authenticated shoppers.
//!
//! One click is one `POST /update_item/` with a JSON body and the CSRF token
//! in `X-CSRFToken`. Any JSON body on a 2xx status is accepted as the
//! acknowledgement. Failures are returned to the caller so the page can show
//! a notice instead of reloading. The HTTP call sits behind
//! [`UpdateTransport`] so tests can count and inspect requests.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tracing::{error, info};

use super::{CartMutator, CartState, Strategy};
use crate::command::{Action, MutationCommand};
use crate::config::CartConfig;
use crate::error::{CartError, ErrorCode};

pub const CSRF_HEADER: &str = "X-CSRFToken";

// =============================================================================
// WIRE TYPES
// =============================================================================

/// Body of `POST /update_item/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UpdateItemRequest<'a> {
    #[serde(rename = "pizzaId")]
    pub pizza_id: &'a str,
    pub action: Action,
}

impl<'a> From<&'a MutationCommand> for UpdateItemRequest<'a> {
    fn from(command: &'a MutationCommand) -> Self {
        Self { pizza_id: &command.item_id, action: command.action }
    }
}

fn parse_acknowledgement(body: &str) -> Result<serde_json::Value, CartError> {
    serde_json::from_str(body).map_err(|e| CartError::Decode(e.to_string()))
}

// =============================================================================
// TRANSPORT
// =============================================================================

/// Sends one cart update to the storefront. Enables mocking in tests.
#[async_trait::async_trait]
pub trait UpdateTransport: Send + Sync {
    async fn post_update(
        &self,
        request: &UpdateItemRequest<'_>,
        csrf_token: &str,
    ) -> Result<serde_json::Value, CartError>;
}

pub struct HttpTransport {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    /// # Errors
    ///
    /// Returns [`CartError::HttpClientBuild`] if the HTTP client cannot be built.
    pub fn new(config: &CartConfig) -> Result<Self, CartError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| CartError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, endpoint: config.update_item_url() })
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait::async_trait]
impl UpdateTransport for HttpTransport {
    async fn post_update(
        &self,
        request: &UpdateItemRequest<'_>,
        csrf_token: &str,
    ) -> Result<serde_json::Value, CartError> {
        let response = self
            .http
            .post(&self.endpoint)
            .header(CSRF_HEADER, csrf_token)
            .json(request)
            .send()
            .await
            .map_err(|e| CartError::Transport(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| CartError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(CartError::Status { status: status.as_u16(), body: text });
        }

        parse_acknowledgement(&text)
    }
}

// =============================================================================
// MUTATOR
// =============================================================================

pub struct RemoteMutator {
    transport: Arc<dyn UpdateTransport>,
    csrf_token: String,
}

impl RemoteMutator {
    #[must_use]
    pub fn new(transport: Arc<dyn UpdateTransport>, csrf_token: impl Into<String>) -> Self {
        Self { transport, csrf_token: csrf_token.into() }
    }
}

#[async_trait::async_trait]
impl CartMutator for RemoteMutator {
    fn strategy(&self) -> Strategy {
        Strategy::Remote
    }

    async fn apply_mutation(&mut self, command: &MutationCommand) -> Result<CartState, CartError> {
        let request = UpdateItemRequest::from(command);
        match self.transport.post_update(&request, &self.csrf_token).await {
            Ok(acknowledgement) => {
                info!(item_id = %command.item_id, action = %command.action, "cart update acknowledged");
                Ok(CartState::Remote { acknowledgement })
            }
            Err(e) => {
                error!(
                    error = %e,
                    item_id = %command.item_id,
                    action = %command.action,
                    retryable = e.retryable(),
                    "cart update failed"
                );
                Err(e)
            }
        }
    }
}

#[cfg(test)]
#[path = "remote_test.rs"]
mod tests;
