//! Summary Tables
//!
//! Terminal tables for carts, order history, events and sales.

use std::{io, ops::Range};

use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    cart::Cart,
    catalog::{Category, Event, TicketType, TicketTypeSales, format_date},
    orders::OrderSummary,
    pricing::format_price,
};

/// Errors that can occur when writing a summary.
#[derive(Debug, Error)]
pub enum SummaryError {
    /// The output could not be written.
    #[error("failed to write summary")]
    Io(#[from] io::Error),
}

/// Writes the cart lines followed by the cart total.
///
/// Line numbers start at one; they are the numbers cart commands accept.
///
/// # Errors
///
/// Returns a [`SummaryError`] if the output cannot be written.
pub fn write_cart(mut out: impl io::Write, cart: &Cart) -> Result<(), SummaryError> {
    if cart.is_empty() {
        writeln!(out, "Your cart is empty.")?;

        return Ok(());
    }

    let mut builder = Builder::default();

    builder.push_record(["#", "Event", "Ticket", "Unit Price", "Qty", "Total"]);

    for (idx, item) in cart.items().iter().enumerate() {
        builder.push_record([
            (idx + 1).to_string(),
            item.event_name.clone(),
            item.ticket_name.clone(),
            format_price(item.price),
            item.quantity.to_string(),
            format_price(item.total_price),
        ]);
    }

    write_table(&mut out, builder, 3..6)?;

    writeln!(out, " \x1b[1mTotal:\x1b[0m {}\n", format_price(cart.total()))?;

    Ok(())
}

/// Writes a user's order history.
///
/// # Errors
///
/// Returns a [`SummaryError`] if the output cannot be written.
pub fn write_orders(mut out: impl io::Write, orders: &[OrderSummary]) -> Result<(), SummaryError> {
    if orders.is_empty() {
        writeln!(out, "No orders found.")?;

        return Ok(());
    }

    let mut builder = Builder::default();

    builder.push_record(["Order", "Event", "Date", "Ticket", "Qty", "Total", "Status"]);

    for order in orders {
        builder.push_record([
            order.id.to_string(),
            order.event.name.clone(),
            format_date(&order.event.date),
            order.ticket_type.name.clone(),
            order.quantity.to_string(),
            format_price(order.total_price),
            order.status.to_string(),
        ]);
    }

    write_table(&mut out, builder, 4..6)
}

/// Writes a list of events.
///
/// # Errors
///
/// Returns a [`SummaryError`] if the output cannot be written.
pub fn write_events(mut out: impl io::Write, events: &[Event]) -> Result<(), SummaryError> {
    if events.is_empty() {
        writeln!(out, "No events found.")?;

        return Ok(());
    }

    let mut builder = Builder::default();

    builder.push_record(["Id", "Event", "Date", "Local", "Capacity", "Price"]);

    for event in events {
        builder.push_record([
            event.id.to_string(),
            event.name.clone(),
            format_date(&event.date),
            event.local.clone(),
            event.capacity.to_string(),
            format_price(event.price),
        ]);
    }

    write_table(&mut out, builder, 4..6)
}

/// Writes the details of one event and the ticket types on offer.
///
/// # Errors
///
/// Returns a [`SummaryError`] if the output cannot be written.
pub fn write_event(
    mut out: impl io::Write,
    event: &Event,
    ticket_types: &[TicketType],
) -> Result<(), SummaryError> {
    writeln!(out, "\n \x1b[1m{}\x1b[0m", event.name)?;
    writeln!(out, " {} · {}", format_date(&event.date), event.local)?;

    if let Some(category) = &event.category {
        writeln!(out, " {}", category.name)?;
    }

    if !event.description.is_empty() {
        writeln!(out, "\n {}", event.description)?;
    }

    write_ticket_types(out, ticket_types)
}

/// Writes a list of ticket types.
///
/// # Errors
///
/// Returns a [`SummaryError`] if the output cannot be written.
pub fn write_ticket_types(
    mut out: impl io::Write,
    ticket_types: &[TicketType],
) -> Result<(), SummaryError> {
    if ticket_types.is_empty() {
        writeln!(out, "\nNo tickets available.")?;

        return Ok(());
    }

    let mut builder = Builder::default();

    builder.push_record(["Id", "Ticket", "Description", "Capacity", "Price"]);

    for ticket_type in ticket_types {
        builder.push_record([
            ticket_type.id.to_string(),
            ticket_type.name.clone(),
            ticket_type.description.clone(),
            ticket_type.capacity.to_string(),
            format_price(ticket_type.price),
        ]);
    }

    write_table(&mut out, builder, 3..5)
}

/// Writes a list of categories.
///
/// # Errors
///
/// Returns a [`SummaryError`] if the output cannot be written.
pub fn write_categories(
    mut out: impl io::Write,
    categories: &[Category],
) -> Result<(), SummaryError> {
    if categories.is_empty() {
        writeln!(out, "No categories found.")?;

        return Ok(());
    }

    let mut builder = Builder::default();

    builder.push_record(["Id", "Category", "Description"]);

    for category in categories {
        builder.push_record([
            category.id.to_string(),
            category.name.clone(),
            category.description.clone().unwrap_or_default(),
        ]);
    }

    write_table(&mut out, builder, 0..1)
}

/// Writes tickets sold per ticket type of an event.
///
/// # Errors
///
/// Returns a [`SummaryError`] if the output cannot be written.
pub fn write_sales(mut out: impl io::Write, sales: &[TicketTypeSales]) -> Result<(), SummaryError> {
    if sales.is_empty() {
        writeln!(out, "No tickets sold yet.")?;

        return Ok(());
    }

    let mut builder = Builder::default();

    builder.push_record(["Ticket", "Capacity", "Sold", "Remaining"]);

    for sale in sales {
        let detail = &sale.ticket_type;

        builder.push_record([
            detail.name.clone(),
            detail.capacity.to_string(),
            detail.sold.to_string(),
            detail.remaining().to_string(),
        ]);
    }

    write_table(&mut out, builder, 1..4)
}

fn write_table(
    out: &mut impl io::Write,
    builder: Builder,
    numeric_columns: Range<usize>,
) -> Result<(), SummaryError> {
    let mut table = builder.build();
    let mut theme = Theme::from(Style::modern_rounded());

    theme.remove_horizontal_lines();
    theme.insert_horizontal_line(
        1,
        HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤')),
    );

    table.with(theme);
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(numeric_columns), Alignment::right());

    writeln!(out, "\n{table}")?;

    Ok(())
}
