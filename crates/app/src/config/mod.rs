//! Application configuration module

use clap::Args;

use crate::config::{
    api::ApiConfig,
    checkout::CheckoutConfig,
    observability::LoggingConfig,
    storage::StorageConfig,
};

pub mod api;
pub mod checkout;
pub mod observability;
pub mod storage;

pub use observability::LogFormat;

/// Settings shared by every `boxoffice` command.
#[derive(Debug, Args)]
pub struct AppConfig {
    /// Backend service settings.
    #[command(flatten)]
    pub api: ApiConfig,

    /// Local state settings.
    #[command(flatten)]
    pub storage: StorageConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Checkout behaviour.
    #[command(flatten)]
    pub checkout: CheckoutConfig,
}
