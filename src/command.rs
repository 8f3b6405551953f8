//! Click commands — what an "update-cart" control asks the cart to do.
//!
//! A rendered control is modelled as [`UpdateControl`]: an id, its classes,
//! and its `data-*` attributes. Clicking it produces a [`MutationCommand`]
//! that either cart strategy can consume.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CartError;

/// Class that marks a control as a cart button.
pub const UPDATE_CART_CLASS: &str = "update-cart";

/// `data-*` key holding the item identifier.
pub const DATA_ITEM: &str = "pizza";

/// `data-*` key holding the action.
pub const DATA_ACTION: &str = "action";

// =============================================================================
// ACTION
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Add,
    Remove,
}

impl Action {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Remove => "remove",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = CartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "add" => Ok(Self::Add),
            "remove" => Ok(Self::Remove),
            other => Err(CartError::MalformedControl(format!("unknown action '{other}'"))),
        }
    }
}

// =============================================================================
// COMMAND
// =============================================================================

/// A single add/remove request for one item, produced per click.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MutationCommand {
    pub item_id: String,
    pub action: Action,
}

impl MutationCommand {
    #[must_use]
    pub fn new(item_id: impl Into<String>, action: Action) -> Self {
        Self { item_id: item_id.into(), action }
    }

    #[must_use]
    pub fn add(item_id: impl Into<String>) -> Self {
        Self::new(item_id, Action::Add)
    }

    #[must_use]
    pub fn remove(item_id: impl Into<String>) -> Self {
        Self::new(item_id, Action::Remove)
    }
}

// =============================================================================
// CONTROL
// =============================================================================

/// A clickable element as rendered by the page template.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UpdateControl {
    pub id: String,
    pub classes: Vec<String>,
    pub data: BTreeMap<String, String>,
}

impl UpdateControl {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into(), ..Self::default() }
    }

    /// A fully-formed cart button for `item_id`.
    #[must_use]
    pub fn cart_button(id: impl Into<String>, item_id: impl Into<String>, action: Action) -> Self {
        Self::new(id)
            .with_class(UPDATE_CART_CLASS)
            .with_data(DATA_ITEM, item_id)
            .with_data(DATA_ACTION, action.as_str())
    }

    #[must_use]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    #[must_use]
    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn is_update_cart(&self) -> bool {
        self.classes.iter().any(|c| c == UPDATE_CART_CLASS)
    }

    /// Read `data-pizza` and `data-action` into a command.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::MalformedControl`] if either attribute is missing
    /// or empty, or the action is not `add`/`remove`.
    pub fn command(&self) -> Result<MutationCommand, CartError> {
        let item_id = self
            .data
            .get(DATA_ITEM)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| CartError::MalformedControl(format!("control {} has no data-{DATA_ITEM}", self.id)))?;
        let action = self
            .data
            .get(DATA_ACTION)
            .ok_or_else(|| CartError::MalformedControl(format!("control {} has no data-{DATA_ACTION}", self.id)))?
            .parse::<Action>()?;

        Ok(MutationCommand::new(item_id.clone(), action))
    }
}

#[cfg(test)]
#[path = "command_test.rs"]
mod tests;
