//! Catalog API Config

use std::time::Duration;

use clap::Args;

use randostore_client::{ClientConfig, config::DEFAULT_API_URL};

/// Catalog API settings.
#[derive(Debug, Args)]
pub struct ApiConfig {
    /// Base URL of the catalog API
    #[arg(long, env = "RANDOSTORE_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Request timeout in seconds
    #[arg(long, env = "RANDOSTORE_API_TIMEOUT_SECONDS", default_value_t = 15u64)]
    pub api_timeout_seconds: u64,
}

impl ApiConfig {
    /// Builds the HTTP client configuration.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.api_url.clone())
            .with_timeout(Duration::from_secs(self.api_timeout_seconds))
    }
}
