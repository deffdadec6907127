use clap::{Args, Subcommand};

use boxoffice_app::context::AppContext;

mod categories;
mod events;
mod ticket_types;

#[derive(Debug, Args)]
pub(crate) struct ManageCommand {
    #[command(subcommand)]
    command: ManageSubcommand,
}

#[derive(Debug, Subcommand)]
enum ManageSubcommand {
    /// Your events and their sales
    Events(events::EventsCommand),
    /// Event categories
    Categories(categories::CategoriesCommand),
    /// Ticket types of your events
    TicketTypes(ticket_types::TicketTypesCommand),
}

pub(crate) async fn run(ctx: &AppContext, command: ManageCommand) -> Result<(), String> {
    let session = ctx
        .auth
        .require_organizer()
        .map_err(|error| error.to_string())?;

    match command.command {
        ManageSubcommand::Events(command) => events::run(ctx, &session, command).await,
        ManageSubcommand::Categories(command) => categories::run(ctx, command).await,
        ManageSubcommand::TicketTypes(command) => ticket_types::run(ctx, command).await,
    }
}
