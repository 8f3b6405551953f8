//! Cart mutators — the two interchangeable persistence strategies.
//!
//! DESIGN
//! ======
//! Anonymous shoppers keep their cart in a cookie ([`LocalMutator`]);
//! authenticated shoppers post each change to the storefront
//! ([`RemoteMutator`]). Both implement [`CartMutator`], so the dispatcher and
//! the tests drive them through the same call. A successful mutation returns
//! the state the page would show after reloading; a failed one returns the
//! error and leaves the previous state in place.

pub mod local;
pub mod remote;

pub use local::LocalMutator;
pub use remote::{HttpTransport, RemoteMutator, UpdateItemRequest, UpdateTransport};

use crate::cart::Cart;
use crate::command::MutationCommand;
use crate::error::CartError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Local,
    Remote,
}

/// What the page shows after the post-mutation reload.
#[derive(Debug, Clone, PartialEq)]
pub enum CartState {
    /// Cookie cart, as re-read from the cookie store.
    Local(Cart),
    /// The server owns the cart; its acknowledgement body is kept as-is.
    Remote { acknowledgement: serde_json::Value },
}

/// A persistence strategy for one click's add/remove command.
#[async_trait::async_trait]
pub trait CartMutator: Send {
    fn strategy(&self) -> Strategy;

    /// Apply `command` and persist the result.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] when the command is rejected or persisting it
    /// fails; nothing is persisted in that case.
    async fn apply_mutation(&mut self, command: &MutationCommand) -> Result<CartState, CartError>;
}
