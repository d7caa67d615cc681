//! Catalog commands.

use tracing::info;

use randostore::{
    items::{ItemId, ItemUpdate},
    storage::CartStorage,
};
use randostore_client::{catalog::list_items_or_empty, forms::ItemForm};

use crate::{commands::Context, config::ItemsCommand, errors::CliError, render};

pub(crate) async fn run<S: CartStorage>(
    command: ItemsCommand,
    context: &mut Context<'_, S>,
) -> Result<(), CliError> {
    match command {
        ItemsCommand::List => {
            let items = list_items_or_empty(context.client).await;

            render::write_items(context.out, &items)?;
        }
        ItemsCommand::Show { id } => {
            let item = context.client.get_item(ItemId::new(id)).await?;

            render::write_item(context.out, &item)?;
        }
        ItemsCommand::Create { name, price, img } => {
            let new_item = ItemForm { name, price, img }.validate()?;
            let item = context.client.create_item(new_item).await?;

            info!(id = %item.id, "created item");

            writeln!(context.out, "Created item {}.", item.id)?;
            render::write_item(context.out, &item)?;
        }
        ItemsCommand::Update {
            id,
            name,
            price,
            img,
        } => update(context, ItemId::new(id), name, price, img).await?,
        ItemsCommand::Delete { id } => {
            let id = ItemId::new(id);

            context.client.delete_item(id).await?;

            info!(%id, "deleted item");

            writeln!(context.out, "Deleted item {id}.")?;
        }
    }

    Ok(())
}

/// Validates the changed fields against the current item, then sends only
/// those fields.
async fn update<S: CartStorage>(
    context: &mut Context<'_, S>,
    id: ItemId,
    name: Option<String>,
    price: Option<String>,
    img: Option<String>,
) -> Result<(), CliError> {
    if name.is_none() && price.is_none() && img.is_none() {
        return Err(CliError::EmptyUpdate);
    }

    let current = context.client.get_item(id).await?;

    let form = ItemForm {
        name: name.clone().unwrap_or(current.name),
        price: price.clone().unwrap_or_else(|| current.price.to_string()),
        img: img.clone().unwrap_or_else(|| current.img.unwrap_or_default()),
    };

    let validated = form.validate()?;

    let update = ItemUpdate {
        name: name.is_some().then_some(validated.name),
        price: price.is_some().then_some(validated.price),
        img: img.is_some().then_some(validated.img),
    };

    let item = context.client.update_item(id, update).await?;

    info!(%id, "updated item");

    writeln!(context.out, "Updated item {id}.")?;
    render::write_item(context.out, &item)?;

    Ok(())
}
