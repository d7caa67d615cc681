//! Cart commands.

use randostore::{items::ItemId, storage::CartStorage};

use crate::{commands::Context, config::CartCommand, errors::CliError, render};

pub(crate) async fn run<S: CartStorage>(
    command: CartCommand,
    context: &mut Context<'_, S>,
) -> Result<(), CliError> {
    match command {
        CartCommand::Show => render::write_cart(context.out, context.store.cart())?,
        CartCommand::Add { id } => {
            let item = context.client.get_item(ItemId::new(id)).await?;
            let name = item.name.clone();

            context.store.add(item);

            writeln!(
                context.out,
                "Added {name} to your cart ({} in cart).",
                context.store.quantity_of(ItemId::new(id))
            )?;
        }
        CartCommand::Remove { id } => {
            let id = ItemId::new(id);

            if !context.store.contains(id) {
                return Err(CliError::NotInCart(id));
            }

            context.store.remove(id);

            writeln!(context.out, "Removed item {id} from your cart.")?;
        }
        CartCommand::Set { id, quantity } => {
            let id = ItemId::new(id);

            if !context.store.contains(id) {
                return Err(CliError::NotInCart(id));
            }

            context.store.set_quantity(id, quantity);

            if context.store.contains(id) {
                writeln!(
                    context.out,
                    "Item {id} quantity set to {}.",
                    context.store.quantity_of(id)
                )?;
            } else {
                writeln!(context.out, "Removed item {id} from your cart.")?;
            }
        }
        CartCommand::Clear => {
            context.store.clear();

            writeln!(context.out, "Your cart is empty.")?;
        }
    }

    Ok(())
}
