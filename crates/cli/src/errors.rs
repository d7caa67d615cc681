//! CLI errors.

use thiserror::Error;

use randostore::{checkout::CheckoutError, items::ItemId};
use randostore_client::{ClientError, forms::ItemFormError};

/// Errors surfaced to the user by a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// The catalog API call failed.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// The submitted item fields are invalid.
    #[error(transparent)]
    Form(#[from] ItemFormError),

    /// The order could not be placed.
    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    /// The item is not in the cart.
    #[error("item {0} is not in the cart")]
    NotInCart(ItemId),

    /// Nothing to change.
    #[error("nothing to update; pass --name, --price or --img")]
    EmptyUpdate,

    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),

    /// Failed to initialise the tracing subscriber.
    #[error("failed to initialise tracing subscriber: {0}")]
    TracingSubscriber(#[from] tracing_subscriber::util::TryInitError),
}
