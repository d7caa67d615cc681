//! Catalog listing for browse screens.

use tracing::warn;

use randostore::items::Item;

use crate::items::ItemsClient;

/// Lists the catalog, or returns an empty list when the request fails.
///
/// Browse screens render an empty catalog rather than an error; the failure
/// is logged.
pub async fn list_items_or_empty(client: &dyn ItemsClient) -> Vec<Item> {
    match client.list_items().await {
        Ok(items) => items,
        Err(error) => {
            warn!("failed to load catalog: {error}");

            Vec::new()
        }
    }
}
