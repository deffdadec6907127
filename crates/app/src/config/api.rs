//! API Config

use std::time::Duration;

use clap::Args;

/// Backend service settings.
#[derive(Debug, Args)]
pub struct ApiConfig {
    /// Base URL of the identity service (users, login, registration)
    #[arg(
        long,
        env = "IDENTITY_API_URL",
        default_value = "http://localhost:8000",
        global = true
    )]
    pub identity_api_url: String,

    /// Base URL of the events service (events, categories, ticket types, orders)
    #[arg(
        long,
        env = "EVENTS_API_URL",
        default_value = "http://localhost:3000",
        global = true
    )]
    pub events_api_url: String,

    /// HTTP request timeout in seconds
    #[arg(long, env = "HTTP_TIMEOUT_SECONDS", default_value_t = 30u64, global = true)]
    pub http_timeout_seconds: u64,
}

impl ApiConfig {
    /// Request timeout applied to both services.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_seconds)
    }
}
