use std::{num::ParseIntError, str::FromStr};

use clap::{Args, Subcommand};
use thiserror::Error;

use boxoffice::{
    catalog::{EventId, TicketTypeId},
    pricing::format_price,
    selector::TicketSelector,
    summary,
};
use boxoffice_app::{
    checkout::{CheckoutError, CheckoutFailure},
    context::AppContext,
};

use super::{line_index, print_with, read_failed, storage_failed};

#[derive(Debug, Args)]
pub(crate) struct CartCommand {
    #[command(subcommand)]
    command: CartSubcommand,
}

#[derive(Debug, Subcommand)]
enum CartSubcommand {
    /// Add tickets of one event to the cart
    Add(AddArgs),
    /// Show the cart
    Show,
    /// Change the quantity of a cart line
    Update {
        /// Line number as shown by `cart show`
        line: usize,
        /// New quantity; values below 1 are ignored
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove a cart line
    Remove {
        /// Line number as shown by `cart show`
        line: usize,
    },
    /// Place one order per cart line
    Checkout,
}

#[derive(Debug, Args)]
struct AddArgs {
    /// Event id
    #[arg(long)]
    event: u64,

    /// Ticket type and quantity as `<ticket type id>=<quantity>`; repeatable
    #[arg(long = "ticket", required = true)]
    tickets: Vec<TicketChoice>,
}

/// A `<ticket type id>=<quantity>` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TicketChoice {
    ticket_type: TicketTypeId,
    quantity: u32,
}

#[derive(Debug, Error, PartialEq, Eq)]
enum TicketChoiceError {
    #[error("expected `<ticket type id>=<quantity>`")]
    Format,

    #[error("invalid number: {0}")]
    Number(#[from] ParseIntError),
}

impl FromStr for TicketChoice {
    type Err = TicketChoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (ticket_type, quantity) = s.split_once('=').ok_or(TicketChoiceError::Format)?;

        Ok(Self {
            ticket_type: TicketTypeId::new(ticket_type.trim().parse()?),
            quantity: quantity.trim().parse()?,
        })
    }
}

pub(crate) async fn run(ctx: &AppContext, command: CartCommand) -> Result<(), String> {
    match command.command {
        CartSubcommand::Add(args) => add(ctx, args).await,
        CartSubcommand::Show => {
            let cart = ctx.carts.load();

            print_with(|out| summary::write_cart(out, &cart))
        }
        CartSubcommand::Update { line, quantity } => {
            let mut cart = ctx.carts.load();
            let index = line_index(line)?;

            let updated = ctx
                .carts
                .update_quantity(&mut cart, index, quantity)
                .map_err(|error| storage_failed("save cart", &error))?;

            if !updated {
                println!("cart unchanged");
            }

            print_with(|out| summary::write_cart(out, &cart))
        }
        CartSubcommand::Remove { line } => {
            let mut cart = ctx.carts.load();
            let index = line_index(line)?;

            let removed = ctx
                .carts
                .remove_item(&mut cart, index)
                .map_err(|error| storage_failed("save cart", &error))?;

            if let Some(item) = removed {
                println!("removed {} - {}", item.event_name, item.ticket_name);
            }

            print_with(|out| summary::write_cart(out, &cart))
        }
        CartSubcommand::Checkout => checkout(ctx).await,
    }
}

async fn add(ctx: &AppContext, args: AddArgs) -> Result<(), String> {
    let id = EventId::new(args.event);

    let (event, ticket_types) = futures::try_join!(
        ctx.events.get_event(id),
        ctx.ticket_types.event_ticket_types(id),
    )
    .map_err(|error| read_failed("event", &error))?;

    let mut selector = TicketSelector::new(&event, ticket_types);

    for choice in &args.tickets {
        if !selector.set_quantity(choice.ticket_type, choice.quantity) {
            return Err(format!(
                "event {} has no ticket type {}",
                event.id, choice.ticket_type
            ));
        }
    }

    let mut cart = ctx.carts.load();

    let added = ctx
        .carts
        .add_selection(&mut cart, &selector)
        .map_err(|error| storage_failed("save cart", &error))?;

    if added == 0 {
        println!("no tickets selected");
        return Ok(());
    }

    println!("added {added} ticket line(s) for {}", event.name);

    print_with(|out| summary::write_cart(out, &cart))
}

async fn checkout(ctx: &AppContext) -> Result<(), String> {
    let mut cart = ctx.carts.load();
    let user = ctx.auth.session().map(|session| session.user_id());

    match ctx.checkout.checkout(&mut cart, user).await {
        Ok(receipt) => {
            for order in &receipt.orders {
                println!(
                    "order {}: {} ticket(s), {} ({})",
                    order.id,
                    order.quantity,
                    format_price(order.total_price),
                    order.status
                );
            }

            println!(
                "placed {} order(s), total {}",
                receipt.orders.len(),
                format_price(receipt.total)
            );

            Ok(())
        }
        Err(CheckoutError::Failed(failure)) => Err(describe_failure(&failure)),
        Err(CheckoutError::CartNotCleared { orders, source }) => Err(format!(
            "placed {} order(s) but failed to clear the cart: {source}\nremove the lines with `boxoffice cart remove` to avoid ordering twice",
            orders.len()
        )),
        Err(error) => Err(error.to_string()),
    }
}

fn describe_failure(failure: &CheckoutFailure) -> String {
    let mut lines = vec![failure.to_string()];

    for failed in &failure.failed {
        lines.push(format!(
            "  line {} ({} - {}): {}",
            failed.line + 1,
            failed.item.event_name,
            failed.item.ticket_name,
            failed.error
        ));
    }

    for cancellation in &failure.compensation {
        match &cancellation.result {
            Ok(()) => lines.push(format!("  order {} cancelled", cancellation.order)),
            Err(error) => lines.push(format!(
                "  order {} could not be cancelled: {error}",
                cancellation.order
            )),
        }
    }

    for order in failure.outstanding_orders() {
        lines.push(format!("  order {} remains placed", order.id));
    }

    lines.push("your cart was kept".to_string());

    lines.join("\n")
}
