//! Ticket Selector
//!
//! Per ticket type quantities chosen on an event page before they are added
//! to the cart.

use tracing::warn;

use crate::{
    catalog::{Event, EventId, TicketType, TicketTypeId},
    items::LineItem,
    pricing::line_total,
};

/// One ticket type offered by an event, with the quantity picked so far.
#[derive(Debug, Clone, PartialEq)]
pub struct TicketOption {
    pub ticket_type: TicketType,
    pub quantity: u32,
}

/// Quantities picked for the ticket types of a single event.
#[derive(Debug, Clone, PartialEq)]
pub struct TicketSelector {
    event_id: EventId,
    event_name: String,
    options: Vec<TicketOption>,
}

impl TicketSelector {
    /// Create a selector for `event` with every quantity at zero.
    pub fn new(event: &Event, ticket_types: impl IntoIterator<Item = TicketType>) -> Self {
        Self {
            event_id: event.id,
            event_name: event.name.clone(),
            options: ticket_types
                .into_iter()
                .map(|ticket_type| TicketOption {
                    ticket_type,
                    quantity: 0,
                })
                .collect(),
        }
    }

    /// Event the tickets belong to.
    pub fn event_id(&self) -> EventId {
        self.event_id
    }

    /// Ticket types on offer, in the order they were given.
    pub fn options(&self) -> &[TicketOption] {
        &self.options
    }

    /// Quantity picked for `ticket_type_id`; unknown types are zero.
    pub fn quantity(&self, ticket_type_id: TicketTypeId) -> u32 {
        self.option(ticket_type_id)
            .map_or(0, |option| option.quantity)
    }

    /// Adds one ticket of `ticket_type_id`. Returns `false` for unknown types.
    pub fn increment(&mut self, ticket_type_id: TicketTypeId) -> bool {
        self.update(ticket_type_id, |quantity| quantity.saturating_add(1))
    }

    /// Removes one ticket of `ticket_type_id`, never going below zero.
    /// Returns `false` for unknown types.
    pub fn decrement(&mut self, ticket_type_id: TicketTypeId) -> bool {
        self.update(ticket_type_id, |quantity| quantity.saturating_sub(1))
    }

    /// Sets the quantity of `ticket_type_id`. Returns `false` for unknown types.
    pub fn set_quantity(&mut self, ticket_type_id: TicketTypeId, quantity: u32) -> bool {
        self.update(ticket_type_id, |_| quantity)
    }

    /// Whether any ticket type has a positive quantity.
    pub fn has_selection(&self) -> bool {
        self.options.iter().any(|option| option.quantity > 0)
    }

    /// Cart lines for every ticket type with a positive quantity.
    ///
    /// Ticket types whose line total would overflow are left out.
    pub fn line_items(&self) -> Vec<LineItem> {
        self.options
            .iter()
            .filter(|option| option.quantity > 0)
            .filter_map(|option| {
                let Some(total_price) = line_total(option.ticket_type.price, option.quantity)
                else {
                    warn!(
                        ticket_type = %option.ticket_type.id,
                        quantity = option.quantity,
                        "line total would overflow, selection skipped"
                    );

                    return None;
                };

                Some(LineItem {
                    event_id: self.event_id,
                    event_name: self.event_name.clone(),
                    ticket_type_id: option.ticket_type.id,
                    ticket_name: option.ticket_type.name.clone(),
                    price: option.ticket_type.price,
                    quantity: option.quantity,
                    total_price,
                })
            })
            .collect()
    }

    fn option(&self, ticket_type_id: TicketTypeId) -> Option<&TicketOption> {
        self.options
            .iter()
            .find(|option| option.ticket_type.id == ticket_type_id)
    }

    fn option_mut(&mut self, ticket_type_id: TicketTypeId) -> Option<&mut TicketOption> {
        self.options
            .iter_mut()
            .find(|option| option.ticket_type.id == ticket_type_id)
    }

    fn update(&mut self, ticket_type_id: TicketTypeId, f: impl FnOnce(u32) -> u32) -> bool {
        let Some(option) = self.option_mut(ticket_type_id) else {
            return false;
        };

        option.quantity = f(option.quantity);

        true
    }
}
