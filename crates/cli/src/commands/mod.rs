//! Command dispatch.

use std::{io, time::Duration};

use randostore::{storage::CartStorage, store::CartStore};
use randostore_client::ItemsClient;

use crate::{config::Command, errors::CliError};

pub(crate) mod cart;
pub(crate) mod checkout;
pub(crate) mod items;

/// Everything a command needs to run.
pub(crate) struct Context<'a, S: CartStorage> {
    /// Catalog API
    pub(crate) client: &'a dyn ItemsClient,

    /// Persisted cart
    pub(crate) store: &'a mut CartStore<S>,

    /// Simulated order processing time
    pub(crate) checkout_delay: Duration,

    /// Where command output is written
    pub(crate) out: &'a mut dyn io::Write,
}

/// Runs a single command.
pub(crate) async fn run<S: CartStorage>(
    command: Command,
    context: &mut Context<'_, S>,
) -> Result<(), CliError> {
    match command {
        Command::Items(command) => items::run(command, context).await,
        Command::Cart(command) => cart::run(command, context).await,
        Command::Checkout => checkout::run(context).await,
    }
}
