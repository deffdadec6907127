//! Cart

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{
    items::{LineItem, LineKey},
    pricing::total_price,
};

/// Ticket lines a user intends to buy, unique by [`LineKey`].
///
/// Serializes as a bare sequence of lines, which is also the persisted form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Create a new, empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cart from previously reconciled lines.
    pub fn with_items(items: impl Into<Vec<LineItem>>) -> Self {
        Self {
            items: items.into(),
        }
    }

    /// Merges `items` into the cart.
    ///
    /// A line whose key is already present is folded into the existing line,
    /// adding quantity and total. Other lines are appended in order.
    /// Zero-quantity lines are dropped, as are lines whose merged quantity or
    /// total would overflow; the existing line is then left as it was.
    pub fn add_items(&mut self, items: impl IntoIterator<Item = LineItem>) {
        for item in items {
            if item.quantity == 0 {
                continue;
            }

            match self.find_mut(item.key()) {
                Some(existing) => {
                    if !existing.absorb(&item) {
                        warn!(
                            event = %item.event_id,
                            ticket_type = %item.ticket_type_id,
                            "merged line would overflow, addition ignored"
                        );
                    }
                }
                None => self.items.push(item),
            }
        }
    }

    /// Sets the quantity of the line at `index`.
    ///
    /// Returns `false` and leaves the cart unchanged when `quantity` is below
    /// one, does not fit a ticket count, makes the line total overflow, or
    /// `index` is out of range.
    pub fn update_quantity(&mut self, index: usize, quantity: i64) -> bool {
        let Ok(quantity) = u32::try_from(quantity) else {
            return false;
        };

        if quantity == 0 {
            return false;
        }

        let Some(item) = self.items.get_mut(index) else {
            return false;
        };

        item.set_quantity(quantity)
    }

    /// Removes and returns the line at `index`, if there is one.
    pub fn remove_item(&mut self, index: usize) -> Option<LineItem> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    /// Removes every line.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Lines in the cart.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Line with the given key.
    pub fn find(&self, key: LineKey) -> Option<&LineItem> {
        self.items.iter().find(|item| item.key() == key)
    }

    fn find_mut(&mut self, key: LineKey) -> Option<&mut LineItem> {
        self.items.iter_mut().find(|item| item.key() == key)
    }

    /// Sum of every line total.
    pub fn total(&self) -> Decimal {
        total_price(&self.items)
    }

    /// Number of lines in the cart.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl IntoIterator for Cart {
    type Item = LineItem;
    type IntoIter = std::vec::IntoIter<LineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
