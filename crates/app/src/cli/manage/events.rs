use clap::{Args, Subcommand};

use boxoffice::{
    catalog::{CategoryId, EventId},
    forms::{EventForm, Form},
    pricing::parse_price_input,
    summary,
    users::Session,
};
use boxoffice_app::context::AppContext;

use crate::cli::{invalid, print_with, read_failed, write_failed};

#[derive(Debug, Args)]
pub(crate) struct EventsCommand {
    #[command(subcommand)]
    command: EventsSubcommand,
}

#[derive(Debug, Subcommand)]
enum EventsSubcommand {
    /// List the events you organize
    List,
    /// Create an event
    Create(EventArgs),
    /// Edit an event; omitted fields keep their value
    Update {
        /// Event id
        id: u64,
        #[command(flatten)]
        fields: EventArgs,
    },
    /// Delete an event
    Delete {
        /// Event id
        id: u64,
    },
    /// Tickets sold per ticket type
    Sales {
        /// Event id
        id: u64,
    },
}

#[derive(Debug, Args)]
struct EventArgs {
    #[arg(long)]
    name: Option<String>,

    #[arg(long)]
    description: Option<String>,

    /// Venue
    #[arg(long)]
    local: Option<String>,

    /// Date as YYYY-MM-DD
    #[arg(long)]
    date: Option<String>,

    #[arg(long, allow_negative_numbers = true)]
    capacity: Option<i64>,

    /// Base price; digits are read as cents, so `80,00` and `8000` are both 80.00
    #[arg(long)]
    price: Option<String>,

    /// Category id
    #[arg(long)]
    category: Option<u64>,
}

impl EventArgs {
    fn apply(self, form: &mut EventForm) {
        if let Some(name) = self.name {
            form.name = name;
        }

        if let Some(description) = self.description {
            form.description = description;
        }

        if let Some(local) = self.local {
            form.local = local;
        }

        if let Some(date) = self.date {
            form.date = date;
        }

        if let Some(capacity) = self.capacity {
            form.capacity = capacity;
        }

        if let Some(price) = self.price {
            form.price = parse_price_input(&price);
        }

        if let Some(category) = self.category {
            form.category_id = Some(CategoryId::new(category));
        }
    }
}

pub(crate) async fn run(
    ctx: &AppContext,
    session: &Session,
    command: EventsCommand,
) -> Result<(), String> {
    match command.command {
        EventsSubcommand::List => {
            let events = ctx
                .events
                .organizer_events(session.user_id())
                .await
                .map_err(|error| read_failed("events", &error))?;

            print_with(|out| summary::write_events(out, &events))
        }
        EventsSubcommand::Create(fields) => {
            let mut form = EventForm::new(session.user_id());

            fields.apply(&mut form);

            let draft = form.submit().map_err(|errors| invalid(&errors))?;

            let event = ctx
                .events
                .create_event(draft, session.user.role)
                .await
                .map_err(|error| write_failed("create event", &error))?;

            println!("created event {} ({})", event.id, event.name);

            Ok(())
        }
        EventsSubcommand::Update { id, fields } => {
            let event = ctx
                .events
                .get_event(EventId::new(id))
                .await
                .map_err(|error| read_failed("event", &error))?;

            let mut form = EventForm::from(&event);

            fields.apply(&mut form);

            let draft = form.submit().map_err(|errors| invalid(&errors))?;

            let event = ctx
                .events
                .update_event(event.id, draft, session.user.role)
                .await
                .map_err(|error| write_failed("update event", &error))?;

            println!("updated event {} ({})", event.id, event.name);

            Ok(())
        }
        EventsSubcommand::Delete { id } => {
            ctx.events
                .delete_event(EventId::new(id))
                .await
                .map_err(|error| write_failed("delete event", &error))?;

            println!("deleted event {id}");

            Ok(())
        }
        EventsSubcommand::Sales { id } => {
            let id = EventId::new(id);

            let (sales, total) = futures::try_join!(
                ctx.events.ticket_sales(id),
                ctx.events.sold_tickets(id),
            )
            .map_err(|error| read_failed("sales", &error))?;

            print_with(|out| summary::write_sales(out, &sales))?;

            println!("tickets sold: {}", total.sold_tickets);

            Ok(())
        }
    }
}
