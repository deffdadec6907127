use std::io;

use clap::{Parser, Subcommand};

use boxoffice::{
    forms::{FieldErrors, FormField},
    storage::StorageError,
    summary::SummaryError,
};
use boxoffice_app::{api::ApiError, config::AppConfig, context::AppContext, observability};

mod account;
mod cart;
mod events;
mod manage;
mod orders;

#[derive(Debug, Parser)]
#[command(name = "boxoffice", about = "Event ticket marketplace", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    config: AppConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Create an account
    Register(account::RegisterArgs),
    /// Log in and remember the session
    Login(account::LoginArgs),
    /// Forget the stored session
    Logout,
    /// Show or edit your profile
    Profile(account::ProfileCommand),
    /// Browse events
    Events(events::EventsCommand),
    /// Manage your cart and check out
    Cart(cart::CartCommand),
    /// Your order history
    Orders(orders::OrdersCommand),
    /// Manage the catalog (organizers only)
    Manage(manage::ManageCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        observability::init(&self.config.logging).map_err(|error| error.to_string())?;

        let ctx = AppContext::from_config(&self.config).map_err(|error| error.to_string())?;

        match self.command {
            Commands::Register(args) => account::register(&ctx, args).await,
            Commands::Login(args) => account::login(&ctx, args).await,
            Commands::Logout => account::logout(&ctx),
            Commands::Profile(command) => account::run(&ctx, command).await,
            Commands::Events(command) => events::run(&ctx, command).await,
            Commands::Cart(command) => cart::run(&ctx, command).await,
            Commands::Orders(command) => orders::run(&ctx, command).await,
            Commands::Manage(command) => manage::run(&ctx, command).await,
        }
    }
}

/// Message for a failed read; reads are safe to repeat.
pub(crate) fn read_failed(what: &str, error: &ApiError) -> String {
    format!("failed to load {what}: {error}\ncheck your connection and try again")
}

/// Message for a failed write.
pub(crate) fn write_failed(action: &str, error: &ApiError) -> String {
    format!("failed to {action}: {error}")
}

pub(crate) fn storage_failed(action: &str, error: &StorageError) -> String {
    format!("failed to {action}: {error}")
}

/// One line per rejected field.
pub(crate) fn invalid<F: FormField>(errors: &FieldErrors<F>) -> String {
    errors
        .iter()
        .map(|(field, error)| format!("{field}: {error}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Writes a summary table to stdout.
pub(crate) fn print_with(
    write: impl FnOnce(io::StdoutLock<'static>) -> Result<(), SummaryError>,
) -> Result<(), String> {
    write(io::stdout().lock()).map_err(|error| error.to_string())
}

/// Converts a one-based line number into a cart index.
pub(crate) fn line_index(line: usize) -> Result<usize, String> {
    line.checked_sub(1)
        .ok_or_else(|| "line numbers start at 1".to_string())
}
