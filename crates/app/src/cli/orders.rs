use clap::{Args, Subcommand};

use boxoffice::{orders::search_history, summary};
use boxoffice_app::context::AppContext;

use super::{print_with, read_failed};

#[derive(Debug, Args)]
pub(crate) struct OrdersCommand {
    #[command(subcommand)]
    command: OrdersSubcommand,
}

#[derive(Debug, Subcommand)]
enum OrdersSubcommand {
    /// List your orders, sorted by event name
    List {
        /// Only show orders whose event name contains this text
        #[arg(long, default_value = "")]
        search: String,
    },
}

pub(crate) async fn run(ctx: &AppContext, command: OrdersCommand) -> Result<(), String> {
    match command.command {
        OrdersSubcommand::List { search } => {
            let session = ctx.auth.require_session().map_err(|error| error.to_string())?;

            let orders = ctx
                .orders
                .user_orders(session.user_id())
                .await
                .map_err(|error| read_failed("orders", &error))?;

            let orders = search_history(orders, &search);

            print_with(|out| summary::write_orders(out, &orders))
        }
    }
}
