//! Cart cookie codec and client-side cookie store.
//!
//! The anonymous cart lives in a single cookie: `cart=<json>; Path=/`, no
//! domain and no expiry, so the browser keeps it for the session. The same
//! cookie is read back on the next page load, either by the client store or
//! from a request `Cookie` header on the server.
//!
//! Reading is lenient per entry: an entry that is not a positive
//! `{"quantity": n}` is dropped and the rest of the cart survives. Only a
//! value that is not a JSON object at all reads as an empty cart. Writing is
//! strict, and the local strategy re-reads its own cookie strictly.

use std::collections::BTreeMap;

use axum_extra::extract::cookie::{Cookie, CookieJar};
use tracing::warn;

use crate::cart::{Cart, CartLine};
use crate::error::CartError;

pub const CART_COOKIE_NAME: &str = "cart";

/// Common per-cookie limit enforced by browsers (name, value and attributes).
pub const DEFAULT_COOKIE_MAX_BYTES: usize = 4096;

// =============================================================================
// CODEC
// =============================================================================

/// Build the `cart` cookie for `cart`, rejecting it if it exceeds `max_bytes`.
///
/// # Errors
///
/// Returns [`CartError::Serialize`] if the cart cannot be serialized and
/// [`CartError::CookieTooLarge`] if the serialized cookie is over the limit.
pub fn encode_cart_cookie(cart: &Cart, max_bytes: usize) -> Result<Cookie<'static>, CartError> {
    let cookie = Cookie::build((CART_COOKIE_NAME, cart.to_json()?)).path("/").build();
    let size = cookie.to_string().len();
    if size > max_bytes {
        return Err(CartError::CookieTooLarge { size, limit: max_bytes });
    }
    Ok(cookie)
}

/// Decode a `cart` cookie value.
///
/// # Errors
///
/// Returns [`CartError::Decode`] if the value is not a valid cart.
pub fn decode_cart_cookie(value: &str) -> Result<Cart, CartError> {
    Cart::from_json(value)
}

/// Decode a `cart` cookie value entry by entry, dropping unreadable entries.
#[must_use]
pub fn decode_cart_cookie_lenient(value: &str) -> Cart {
    let entries: BTreeMap<String, serde_json::Value> = match serde_json::from_str(value) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(error = %e, "discarding unreadable cart cookie");
            return Cart::new();
        }
    };

    entries
        .into_iter()
        .filter_map(|(item_id, raw)| match serde_json::from_value::<CartLine>(raw) {
            Ok(line) => Some((item_id, line.quantity)),
            Err(e) => {
                warn!(%item_id, error = %e, "dropping unreadable cart entry");
                None
            }
        })
        .collect()
}

/// Extract the cart from a request `Cookie` header. A missing cookie is an
/// empty cart.
#[must_use]
pub fn read_cookie_cart(cookie_header: &str) -> Cart {
    Cookie::split_parse(cookie_header)
        .flatten()
        .find(|c| c.name() == CART_COOKIE_NAME)
        .map_or_else(Cart::new, |cookie| decode_cart_cookie_lenient(cookie.value()))
}

// =============================================================================
// STORE
// =============================================================================

/// Client-side persistent key/value store for cookies.
pub trait CookieStore: Send {
    /// Current value of cookie `name`, if set.
    fn get(&self, name: &str) -> Option<String>;

    fn set(&mut self, cookie: Cookie<'static>);
}

/// In-process cookie store backed by a cookie jar.
#[derive(Debug, Clone)]
pub struct MemoryCookieStore {
    jar: CookieJar,
}

impl MemoryCookieStore {
    #[must_use]
    pub fn new() -> Self {
        Self { jar: CookieJar::new() }
    }

    /// The store rendered like `document.cookie`: `name=value` pairs joined by `; `.
    #[must_use]
    pub fn document_cookie(&self) -> String {
        self.jar
            .iter()
            .map(|c| format!("{}={}", c.name(), c.value()))
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// The stored cookie with its attributes.
    #[must_use]
    pub fn cookie(&self, name: &str) -> Option<&Cookie<'static>> {
        self.jar.get(name)
    }
}

impl Default for MemoryCookieStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CookieStore for MemoryCookieStore {
    fn get(&self, name: &str) -> Option<String> {
        self.jar.get(name).map(|c| c.value().to_owned())
    }

    fn set(&mut self, cookie: Cookie<'static>) {
        self.jar = std::mem::replace(&mut self.jar, CookieJar::new()).add(cookie);
    }
}

#[cfg(test)]
#[path = "cookie_test.rs"]
mod tests;
