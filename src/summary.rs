//! Cart summary — the cookie cart joined with the pizza catalog.
//!
//! Used when rendering the page for an anonymous shopper: the badge count,
//! the per-pizza lines, the order total and the bonus points the order would
//! earn. Items whose id is not in the catalog still count toward the badge
//! but are left out of the lines and totals.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::cart::Cart;

/// Percentage of the order total credited as bonus points.
pub const BONUS_PERCENT: u64 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pizza {
    pub id: String,
    pub name: String,
    pub price: u64,
    pub image_url: String,
}

/// Pizzas keyed by id.
pub type Catalog = BTreeMap<String, Pizza>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryLine {
    pub pizza: Pizza,
    pub quantity: u32,
    pub total: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CartSummary {
    /// Badge count: every unit in the cart, known to the catalog or not.
    pub notifications: u64,
    pub items: Vec<SummaryLine>,
    pub cart_items: u64,
    pub cart_total: u64,
    pub bonus_points: u64,
}

impl CartSummary {
    #[must_use]
    pub fn build(cart: &Cart, catalog: &Catalog) -> Self {
        let mut summary = Self { notifications: cart.total_quantity(), ..Self::default() };

        for (id, quantity) in cart.iter() {
            let Some(pizza) = catalog.get(id) else {
                continue;
            };
            let total = pizza.price.saturating_mul(u64::from(quantity));
            summary.cart_items += u64::from(quantity);
            summary.cart_total = summary.cart_total.saturating_add(total);
            summary.items.push(SummaryLine { pizza: pizza.clone(), quantity, total });
        }

        summary.bonus_points = summary.cart_total.saturating_mul(BONUS_PERCENT) / 100;
        summary
    }
}

#[cfg(test)]
#[path = "summary_test.rs"]
mod tests;
