//! CLI configuration module

use clap::{Parser, Subcommand};

use crate::config::{
    api::ApiConfig, checkout::CheckoutConfig, observability::LoggingConfig,
    storage::StorageConfig,
};

pub(crate) mod api;
pub(crate) mod checkout;
pub(crate) mod observability;
pub(crate) mod storage;

/// RandoStore terminal client configuration
#[derive(Debug, Parser)]
#[command(name = "randostore", about = "Browse the RandoStore catalog and manage a cart", long_about = None)]
pub struct CliConfig {
    /// Catalog API settings.
    #[command(flatten)]
    pub api: ApiConfig,

    /// Local cart storage settings.
    #[command(flatten)]
    pub storage: StorageConfig,

    /// Checkout settings.
    #[command(flatten)]
    pub checkout: CheckoutConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// What to do.
    #[command(subcommand)]
    pub command: Command,
}

impl CliConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}

/// Top-level commands.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Browse and manage catalog items.
    #[command(subcommand)]
    Items(ItemsCommand),

    /// Inspect and change the local cart.
    #[command(subcommand)]
    Cart(CartCommand),

    /// Place an order for everything in the cart.
    Checkout,
}

/// Catalog commands.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum ItemsCommand {
    /// List every item in the catalog.
    List,

    /// Show a single item.
    Show {
        /// Item id
        id: u64,
    },

    /// Put a new item up for sale.
    Create {
        /// Item name
        #[arg(long)]
        name: String,

        /// Unit price, e.g. 12.50
        #[arg(long)]
        price: String,

        /// Image URL
        #[arg(long)]
        img: String,
    },

    /// Change an existing item. Omitted fields keep their current value.
    Update {
        /// Item id
        id: u64,

        /// New name
        #[arg(long)]
        name: Option<String>,

        /// New unit price
        #[arg(long)]
        price: Option<String>,

        /// New image URL
        #[arg(long)]
        img: Option<String>,
    },

    /// Remove an item from the catalog.
    Delete {
        /// Item id
        id: u64,
    },
}

/// Cart commands.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum CartCommand {
    /// Show the cart contents and totals.
    Show,

    /// Add one unit of a catalog item.
    Add {
        /// Item id
        id: u64,
    },

    /// Remove an item's line entirely.
    Remove {
        /// Item id
        id: u64,
    },

    /// Set the quantity of an item already in the cart. Zero or below removes it.
    Set {
        /// Item id
        id: u64,

        /// New quantity
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },

    /// Empty the cart.
    Clear,
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn parses_nested_commands() -> TestResult {
        let config = CliConfig::try_parse_from(["randostore", "cart", "set", "4", "-2"])?;

        assert_eq!(
            config.command,
            Command::Cart(CartCommand::Set { id: 4, quantity: -2 })
        );

        Ok(())
    }

    #[test]
    fn defaults_apply_without_flags() -> TestResult {
        let config = CliConfig::try_parse_from(["randostore", "checkout"])?;

        assert_eq!(config.api.api_timeout_seconds, 15);
        assert_eq!(config.checkout.checkout_delay_ms, 1500);
        assert_eq!(config.storage.data_dir.to_str(), Some(".randostore"));

        Ok(())
    }

    #[test]
    fn create_requires_every_field() {
        let result = CliConfig::try_parse_from(["randostore", "items", "create", "--name", "Lamp"]);

        assert!(result.is_err(), "missing --price and --img should fail");
    }
}
