//! RandoStore terminal client

use std::{io, process};

use tracing::{debug, error};

use randostore::{storage::FileStorage, store::CartStore};
use randostore_client::HttpItemsClient;

use crate::{
    commands::Context,
    config::CliConfig,
    errors::CliError,
};

mod commands;
mod config;
mod errors;
mod logging;
mod render;

/// RandoStore terminal client entry point
#[tokio::main]
pub async fn main() {
    // Load configuration from .env and CLI arguments
    let config = CliConfig::load().unwrap_or_else(|parse_error| parse_error.exit());

    if let Err(init_error) = logging::init_subscriber(&config.logging) {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized, must use eprintln for subscriber errors"
        )]
        {
            eprintln!("{init_error}");
        }

        process::exit(1);
    }

    if let Err(run_error) = run(config).await {
        error!("command failed: {run_error}");

        #[expect(
            clippy::print_stderr,
            reason = "command errors are reported to the user on stderr"
        )]
        {
            eprintln!("Error: {run_error}");
        }

        process::exit(1);
    }
}

async fn run(config: CliConfig) -> Result<(), CliError> {
    let client = HttpItemsClient::new(config.api.client_config())?;
    let mut store = CartStore::load(FileStorage::new(&config.storage.data_dir));

    debug!(
        api_url = %config.api.api_url,
        data_dir = %config.storage.data_dir.display(),
        "starting"
    );

    let mut stdout = io::stdout().lock();

    let mut context = Context {
        client: &client,
        store: &mut store,
        checkout_delay: config.checkout.delay(),
        out: &mut stdout,
    };

    commands::run(config.command, &mut context).await
}
