//! Page context — the values the server template injects into the page.
//!
//! The storefront renders three globals: `user` (the username, or
//! `AnonymousUser`), `cart` (the cookie cart as JSON) and `csrftoken`. They
//! are captured once here and handed to the dispatcher at construction.

use crate::cart::Cart;
use crate::cookie::decode_cart_cookie_lenient;

/// Marker the template renders for a visitor who is not logged in.
pub const ANONYMOUS_USER: &str = "AnonymousUser";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewerIdentity {
    Anonymous,
    Authenticated { username: String },
}

impl ViewerIdentity {
    /// Interpret the template's `user` marker.
    #[must_use]
    pub fn from_marker(user: &str) -> Self {
        let user = user.trim();
        if user.is_empty() || user == ANONYMOUS_USER {
            Self::Anonymous
        } else {
            Self::Authenticated { username: user.to_string() }
        }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageContext {
    pub viewer: ViewerIdentity,
    /// Cart snapshot as of page load; only the local strategy uses it.
    pub initial_cart: Cart,
    /// Anti-forgery token; only the remote strategy uses it.
    pub csrf_token: String,
}

impl PageContext {
    #[must_use]
    pub fn new(viewer: ViewerIdentity, initial_cart: Cart, csrf_token: impl Into<String>) -> Self {
        Self { viewer, initial_cart, csrf_token: csrf_token.into() }
    }

    /// Capture the raw template globals. The `cart` snapshot is read like the
    /// cookie it came from: unreadable entries are dropped, and a blank or
    /// unreadable snapshot is an empty cart.
    #[must_use]
    pub fn from_page(user: &str, cart_json: &str, csrf_token: &str) -> Self {
        let initial_cart =
            if cart_json.trim().is_empty() { Cart::new() } else { decode_cart_cookie_lenient(cart_json) };
        Self::new(ViewerIdentity::from_marker(user), initial_cart, csrf_token)
    }
}

#[cfg(test)]
#[path = "context_test.rs"]
mod tests;
