use clap::{Args, Subcommand};

use boxoffice::{
    catalog::{EventId, TicketTypeId},
    forms::{Form, TicketTypeForm},
    pricing::parse_price_input,
    summary,
};
use boxoffice_app::context::AppContext;

use crate::cli::{invalid, print_with, read_failed, write_failed};

#[derive(Debug, Args)]
pub(crate) struct TicketTypesCommand {
    #[command(subcommand)]
    command: TicketTypesSubcommand,
}

#[derive(Debug, Subcommand)]
enum TicketTypesSubcommand {
    /// List ticket types
    List {
        /// Only list the ticket types of this event
        #[arg(long)]
        event: Option<u64>,
    },
    /// Create a ticket type
    Create(TicketTypeArgs),
    /// Edit a ticket type; omitted fields keep their value
    Update {
        /// Ticket type id
        id: u64,
        #[command(flatten)]
        fields: TicketTypeArgs,
    },
    /// Delete a ticket type
    Delete {
        /// Ticket type id
        id: u64,
    },
}

#[derive(Debug, Args)]
struct TicketTypeArgs {
    #[arg(long)]
    name: Option<String>,

    #[arg(long)]
    description: Option<String>,

    /// Price; digits are read as cents, so `150,00` and `15000` are both 150.00
    #[arg(long)]
    price: Option<String>,

    #[arg(long, allow_negative_numbers = true)]
    capacity: Option<i64>,

    /// Event the ticket type belongs to
    #[arg(long)]
    event: Option<u64>,
}

impl TicketTypeArgs {
    fn apply(self, form: &mut TicketTypeForm) {
        if let Some(name) = self.name {
            form.name = name;
        }

        if let Some(description) = self.description {
            form.description = description;
        }

        if let Some(price) = self.price {
            form.price = parse_price_input(&price);
        }

        if let Some(capacity) = self.capacity {
            form.capacity = capacity;
        }

        if let Some(event) = self.event {
            form.event_id = EventId::new(event);
        }
    }
}

pub(crate) async fn run(ctx: &AppContext, command: TicketTypesCommand) -> Result<(), String> {
    match command.command {
        TicketTypesSubcommand::List { event } => {
            let ticket_types = match event {
                Some(event) => {
                    ctx.ticket_types
                        .event_ticket_types(EventId::new(event))
                        .await
                }
                None => ctx.ticket_types.list_ticket_types().await,
            }
            .map_err(|error| read_failed("ticket types", &error))?;

            print_with(|out| summary::write_ticket_types(out, &ticket_types))
        }
        TicketTypesSubcommand::Create(fields) => {
            let mut form = TicketTypeForm::default();

            fields.apply(&mut form);

            let draft = form.submit().map_err(|errors| invalid(&errors))?;

            let ticket_type = ctx
                .ticket_types
                .create_ticket_type(draft)
                .await
                .map_err(|error| write_failed("create ticket type", &error))?;

            println!(
                "created ticket type {} ({})",
                ticket_type.id, ticket_type.name
            );

            Ok(())
        }
        TicketTypesSubcommand::Update { id, fields } => {
            let ticket_type = ctx
                .ticket_types
                .get_ticket_type(TicketTypeId::new(id))
                .await
                .map_err(|error| read_failed("ticket type", &error))?;

            let mut form = TicketTypeForm::from(&ticket_type);

            fields.apply(&mut form);

            let draft = form.submit().map_err(|errors| invalid(&errors))?;

            let ticket_type = ctx
                .ticket_types
                .update_ticket_type(ticket_type.id, draft)
                .await
                .map_err(|error| write_failed("update ticket type", &error))?;

            println!(
                "updated ticket type {} ({})",
                ticket_type.id, ticket_type.name
            );

            Ok(())
        }
        TicketTypesSubcommand::Delete { id } => {
            ctx.ticket_types
                .delete_ticket_type(TicketTypeId::new(id))
                .await
                .map_err(|error| write_failed("delete ticket type", &error))?;

            println!("deleted ticket type {id}");

            Ok(())
        }
    }
}
