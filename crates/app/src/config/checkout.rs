//! Checkout Config

use clap::Args;

use crate::checkout::PartialFailurePolicy;

/// Checkout settings.
#[derive(Debug, Args)]
pub struct CheckoutConfig {
    /// What to do with accepted orders when another order is refused (report, compensate)
    #[arg(
        long,
        env = "CHECKOUT_PARTIAL_FAILURE",
        value_enum,
        default_value_t = PartialFailurePolicy::Report,
        global = true
    )]
    pub partial_failure: PartialFailurePolicy,
}
