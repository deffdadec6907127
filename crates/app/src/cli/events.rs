use clap::{Args, Subcommand};

use boxoffice::{catalog::EventId, summary};
use boxoffice_app::context::AppContext;

use super::{print_with, read_failed};

#[derive(Debug, Args)]
pub(crate) struct EventsCommand {
    #[command(subcommand)]
    command: EventsSubcommand,
}

#[derive(Debug, Subcommand)]
enum EventsSubcommand {
    /// List every event
    List,
    /// Show an event and its ticket types
    Show {
        /// Event id
        id: u64,
    },
}

pub(crate) async fn run(ctx: &AppContext, command: EventsCommand) -> Result<(), String> {
    match command.command {
        EventsSubcommand::List => {
            let events = ctx
                .events
                .list_events()
                .await
                .map_err(|error| read_failed("events", &error))?;

            print_with(|out| summary::write_events(out, &events))
        }
        EventsSubcommand::Show { id } => {
            let id = EventId::new(id);

            let (event, ticket_types) = futures::try_join!(
                ctx.events.get_event(id),
                ctx.ticket_types.event_ticket_types(id),
            )
            .map_err(|error| read_failed("event", &error))?;

            print_with(|out| summary::write_event(out, &event, &ticket_types))
        }
    }
}
