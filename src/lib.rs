//! Shopping-cart updater for the pizza storefront.
//!
//! Clicking an "update-cart" button adds or removes one pizza. Anonymous
//! shoppers keep the cart in a `cart` cookie; logged-in shoppers post the
//! change to `/update_item/`. Either way the result is the state the page
//! shows after reloading, or an error rendered as an inline notice.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`dispatcher`] | Binds controls, picks a strategy per click, tracks the click phase |
//! | [`mutator`] | [`mutator::CartMutator`] and the local (cookie) and remote (HTTP) strategies |
//! | [`cart`] | Item id to quantity map and the add/remove rules |
//! | [`command`] | Rendered controls, actions and the per-click command |
//! | [`cookie`] | `cart` cookie codec, header reader and cookie store |
//! | [`context`] | Viewer identity, page cart snapshot and CSRF token |
//! | [`summary`] | Cookie cart priced against the catalog |
//! | [`config`] | Endpoint, timeouts and cookie limit from the environment |
//! | [`error`] | [`error::CartError`] and the inline [`error::Notice`] |

pub mod cart;
pub mod command;
pub mod config;
pub mod context;
pub mod cookie;
pub mod dispatcher;
pub mod error;
pub mod mutator;
pub mod summary;

#[cfg(test)]
mod test_helpers;

pub use cart::Cart;
pub use command::{Action, MutationCommand, UpdateControl};
pub use config::CartConfig;
pub use context::{PageContext, ViewerIdentity};
pub use dispatcher::{ClickDispatcher, ClickPhase, ControlHandle};
pub use error::{CartError, Notice};
pub use mutator::{CartMutator, CartState, Strategy};
