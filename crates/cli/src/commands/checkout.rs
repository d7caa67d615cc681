//! Checkout command.

use tracing::info;

use randostore::{
    checkout::{CheckoutError, OrderSummary},
    storage::CartStorage,
};

use crate::{commands::Context, errors::CliError, render};

/// Prints the order breakdown, simulates processing, then places the order.
pub(crate) async fn run<S: CartStorage>(context: &mut Context<'_, S>) -> Result<(), CliError> {
    if context.store.cart().is_empty() {
        return Err(CheckoutError::EmptyCart.into());
    }

    render::write_summary(context.out, &OrderSummary::for_cart(context.store.cart()))?;

    writeln!(context.out, "Placing order...")?;
    context.out.flush()?;

    tokio::time::sleep(context.checkout_delay).await;

    let confirmation = context.store.checkout()?;

    info!(
        items = confirmation.summary.items,
        total = %confirmation.summary.total,
        "order placed"
    );

    writeln!(
        context.out,
        "Order placed! {} item(s) for {}.",
        confirmation.summary.items,
        confirmation.summary.total_money()
    )?;

    Ok(())
}
