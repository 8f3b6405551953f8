//! Cart errors and the inline notice shown to the shopper.
//!
//! ERROR HANDLING
//! ==============
//! Every failure ends the current click. Nothing retries automatically; the
//! shopper retries by clicking again, so each error carries a stable code and
//! a `retryable` hint that the page renders as an inline [`Notice`].

use serde::Serialize;

/// Stable machine-readable code plus retry hint for an error.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;

    fn retryable(&self) -> bool {
        false
    }
}

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced while dispatching or applying a cart mutation.
#[derive(Debug, thiserror::Error)]
pub enum CartError {
    /// The clicked control is missing its item id or carries an unknown action.
    #[error("malformed update-cart control: {0}")]
    MalformedControl(String),

    /// The clicked control was not bound when the dispatcher was built.
    #[error("control {0} is not bound to the cart dispatcher")]
    UnboundControl(String),

    /// `remove` was applied to an item that is not in the cart.
    #[error("item {item_id} is not in the cart")]
    ItemNotInCart { item_id: String },

    /// `add` would push the item's quantity past `u32::MAX`.
    #[error("item {item_id} is already at the maximum quantity")]
    QuantityOverflow { item_id: String },

    /// The strategy chosen for the viewer was not configured.
    #[error("no {0} cart strategy is configured")]
    StrategyUnavailable(&'static str),

    /// The serialized cart does not fit in a single cookie.
    #[error("cart cookie is {size} bytes, limit is {limit}")]
    CookieTooLarge { size: usize, limit: usize },

    /// The cart could not be serialized.
    #[error("cart serialization failed: {0}")]
    Serialize(String),

    /// The HTTP request to the update endpoint failed before a response arrived.
    #[error("update request failed: {0}")]
    Transport(String),

    /// The update endpoint answered with a non-success status.
    #[error("update endpoint returned status {status}")]
    Status { status: u16, body: String },

    /// A cart cookie or endpoint response was not valid JSON.
    #[error("decode failed: {0}")]
    Decode(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl ErrorCode for CartError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::MalformedControl(_) => "E_MALFORMED_CONTROL",
            Self::UnboundControl(_) => "E_UNBOUND_CONTROL",
            Self::ItemNotInCart { .. } => "E_ITEM_NOT_IN_CART",
            Self::QuantityOverflow { .. } => "E_QUANTITY_OVERFLOW",
            Self::StrategyUnavailable(_) => "E_STRATEGY_UNAVAILABLE",
            Self::CookieTooLarge { .. } => "E_COOKIE_TOO_LARGE",
            Self::Serialize(_) => "E_SERIALIZE",
            Self::Transport(_) => "E_TRANSPORT",
            Self::Status { .. } => "E_STATUS",
            Self::Decode(_) => "E_DECODE",
            Self::HttpClientBuild(_) => "E_HTTP_CLIENT_BUILD",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Status { status: 429 | 500..=599, .. })
    }
}

// =============================================================================
// NOTICE
// =============================================================================

/// Inline failure notice rendered next to the cart controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub code: &'static str,
    pub message: String,
    pub retryable: bool,
}

impl Notice {
    #[must_use]
    pub fn from_error(err: &impl ErrorCode) -> Self {
        Self { code: err.error_code(), message: err.to_string(), retryable: err.retryable() }
    }
}

impl From<&CartError> for Notice {
    fn from(err: &CartError) -> Self {
        Self::from_error(err)
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
