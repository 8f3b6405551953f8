//! Cart — flat map of item id to quantity.
//!
//! DESIGN
//! ======
//! Quantities are `NonZeroU32`, so a zero entry cannot be represented and a
//! snapshot containing one fails to decode. Removing the last unit deletes
//! the key; adding past `u32::MAX` is rejected. Entries are kept in a
//! `BTreeMap` so the serialized cookie is stable across runs.

use std::collections::BTreeMap;
use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use crate::command::{Action, MutationCommand};
use crate::error::CartError;

/// One cart entry, serialized as `{"quantity": n}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub quantity: NonZeroU32,
}

impl CartLine {
    const ONE: Self = Self { quantity: NonZeroU32::MIN };
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: BTreeMap<String, CartLine>,
}

impl Cart {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a cart from its JSON form.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Decode`] if the JSON is malformed or holds a
    /// non-positive quantity.
    pub fn from_json(json: &str) -> Result<Self, CartError> {
        serde_json::from_str(json).map_err(|e| CartError::Decode(e.to_string()))
    }

    /// Serialize the cart to compact JSON.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Serialize`] if serialization fails.
    pub fn to_json(&self) -> Result<String, CartError> {
        serde_json::to_string(self).map_err(|e| CartError::Serialize(e.to_string()))
    }

    /// Apply one add/remove command in place.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ItemNotInCart`] when removing an absent item and
    /// [`CartError::QuantityOverflow`] when adding to an item already at
    /// `u32::MAX`. The cart is unchanged in both cases.
    pub fn apply(&mut self, command: &MutationCommand) -> Result<(), CartError> {
        match command.action {
            Action::Add => match self.lines.get_mut(&command.item_id) {
                Some(line) => {
                    line.quantity = line
                        .quantity
                        .checked_add(1)
                        .ok_or_else(|| CartError::QuantityOverflow { item_id: command.item_id.clone() })?;
                }
                None => {
                    self.lines.insert(command.item_id.clone(), CartLine::ONE);
                }
            },
            Action::Remove => {
                let Some(line) = self.lines.get_mut(&command.item_id) else {
                    return Err(CartError::ItemNotInCart { item_id: command.item_id.clone() });
                };
                match NonZeroU32::new(line.quantity.get() - 1) {
                    Some(quantity) => line.quantity = quantity,
                    None => {
                        self.lines.remove(&command.item_id);
                    }
                }
            }
        }
        Ok(())
    }

    /// Quantity of `item_id`, or `None` if absent.
    #[must_use]
    pub fn quantity(&self, item_id: &str) -> Option<u32> {
        self.lines.get(item_id).map(|line| line.quantity.get())
    }

    #[must_use]
    pub fn contains(&self, item_id: &str) -> bool {
        self.lines.contains_key(item_id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Sum of all quantities (the badge count over the cart icon).
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.lines.values().map(|line| u64::from(line.quantity.get())).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.lines.iter().map(|(id, line)| (id.as_str(), line.quantity.get()))
    }
}

impl<S: Into<String>> FromIterator<(S, NonZeroU32)> for Cart {
    fn from_iter<I: IntoIterator<Item = (S, NonZeroU32)>>(iter: I) -> Self {
        Self { lines: iter.into_iter().map(|(id, quantity)| (id.into(), CartLine { quantity })).collect() }
    }
}

#[cfg(test)]
#[path = "cart_test.rs"]
mod tests;
