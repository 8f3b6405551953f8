//! Local strategy — cookie-backed cart for anonymous shoppers.

use tracing::{info, warn};

use super::{CartMutator, CartState, Strategy};
use crate::cart::Cart;
use crate::command::MutationCommand;
use crate::cookie::{CART_COOKIE_NAME, CookieStore, decode_cart_cookie, encode_cart_cookie};
use crate::error::CartError;

pub struct LocalMutator<S> {
    cart: Cart,
    store: S,
    max_cookie_bytes: usize,
}

impl<S: CookieStore> LocalMutator<S> {
    #[must_use]
    pub fn new(initial_cart: Cart, store: S, max_cookie_bytes: usize) -> Self {
        Self { cart: initial_cart, store, max_cookie_bytes }
    }

    /// Cart as of the last reload.
    #[must_use]
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Re-read the cart the way a fresh page load would.
    fn reload(&self) -> Result<Cart, CartError> {
        match self.store.get(CART_COOKIE_NAME) {
            Some(value) => decode_cart_cookie(&value),
            None => Ok(Cart::new()),
        }
    }
}

#[async_trait::async_trait]
impl<S: CookieStore + 'static> CartMutator for LocalMutator<S> {
    fn strategy(&self) -> Strategy {
        Strategy::Local
    }

    async fn apply_mutation(&mut self, command: &MutationCommand) -> Result<CartState, CartError> {
        let mut next = self.cart.clone();
        if let Err(e) = next.apply(command) {
            warn!(error = %e, item_id = %command.item_id, action = %command.action, "cart mutation rejected");
            return Err(e);
        }

        let cookie = match encode_cart_cookie(&next, self.max_cookie_bytes) {
            Ok(cookie) => cookie,
            Err(e) => {
                warn!(error = %e, items = next.len(), "cart cookie not written");
                return Err(e);
            }
        };

        self.store.set(cookie);
        self.cart = self.reload()?;

        info!(item_id = %command.item_id, action = %command.action, items = self.cart.len(), "cart cookie updated");
        Ok(CartState::Local(self.cart.clone()))
    }
}

#[cfg(test)]
#[path = "local_test.rs"]
mod tests;
