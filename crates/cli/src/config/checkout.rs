//! Checkout Config

use std::time::Duration;

use clap::Args;

/// Checkout settings.
#[derive(Debug, Args)]
pub struct CheckoutConfig {
    /// Simulated order processing time in milliseconds
    #[arg(long, env = "RANDOSTORE_CHECKOUT_DELAY_MS", default_value_t = 1500u64)]
    pub checkout_delay_ms: u64,
}

impl CheckoutConfig {
    /// Simulated processing delay.
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.checkout_delay_ms)
    }
}
