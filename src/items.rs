//! Line Items

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    catalog::{Event, EventId, TicketType, TicketTypeId},
    pricing::line_total,
};

/// Identity of a cart line: one ticket type of one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineKey {
    pub event_id: EventId,
    pub ticket_type_id: TicketTypeId,
}

/// A quantity of one ticket type of one event, as kept in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub event_id: EventId,
    pub event_name: String,
    pub ticket_type_id: TicketTypeId,
    pub ticket_name: String,
    /// Unit price.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub quantity: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_price: Decimal,
}

impl LineItem {
    /// Creates a line for `quantity` tickets of `ticket_type` at `event`.
    ///
    /// Returns `None` when the line total does not fit a [`Decimal`].
    pub fn new(event: &Event, ticket_type: &TicketType, quantity: u32) -> Option<Self> {
        Some(Self {
            event_id: event.id,
            event_name: event.name.clone(),
            ticket_type_id: ticket_type.id,
            ticket_name: ticket_type.name.clone(),
            price: ticket_type.price,
            quantity,
            total_price: line_total(ticket_type.price, quantity)?,
        })
    }

    /// Returns the merge key of the line.
    pub fn key(&self) -> LineKey {
        LineKey {
            event_id: self.event_id,
            ticket_type_id: self.ticket_type_id,
        }
    }

    /// Sets the quantity and recomputes the total from the unit price.
    ///
    /// Returns `false` and leaves the line unchanged when the total overflows.
    pub fn set_quantity(&mut self, quantity: u32) -> bool {
        let Some(total_price) = line_total(self.price, quantity) else {
            return false;
        };

        self.quantity = quantity;
        self.total_price = total_price;

        true
    }

    /// Folds `other` into this line: quantities and totals are added as given.
    ///
    /// Returns `false` and leaves the line unchanged when either sum overflows.
    pub fn absorb(&mut self, other: &Self) -> bool {
        let (Some(quantity), Some(total_price)) = (
            self.quantity.checked_add(other.quantity),
            self.total_price.checked_add(other.total_price),
        ) else {
            return false;
        };

        self.quantity = quantity;
        self.total_price = total_price;

        true
    }
}
