//! Cart Store
//!
//! Wraps a [`Cart`] and writes the full state to a [`CartStorage`] backend
//! after every mutation. The store is an ordinary value owned by whichever
//! client drives it; there is no global instance.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    cart::{Cart, CartLine},
    checkout::{CheckoutError, OrderConfirmation, place_order},
    items::{Item, ItemId},
    storage::{CartStorage, StorageError},
};

/// Key the cart is persisted under.
pub const CART_STORAGE_KEY: &str = "randostore-cart";

/// Version of the persisted envelope.
pub const CART_STORAGE_VERSION: u32 = 0;

#[derive(Debug, Serialize)]
struct PersistedCartRef<'a> {
    state: &'a Cart,
    version: u32,
}

#[derive(Debug, Deserialize)]
struct PersistedCart {
    state: Cart,

    #[serde(default)]
    version: u32,
}

/// Cart state persisted through a storage backend.
#[derive(Debug)]
pub struct CartStore<S: CartStorage> {
    cart: Cart,
    storage: S,
}

impl<S: CartStorage> CartStore<S> {
    /// Rehydrates the cart from `storage`.
    ///
    /// Falls back to an empty cart when nothing is stored, or when the stored
    /// value can't be read or parsed.
    pub fn load(storage: S) -> Self {
        let cart = match read_cart(&storage) {
            Ok(Some(cart)) => {
                debug!(
                    lines = cart.len(),
                    total_items = cart.total_items(),
                    "rehydrated cart"
                );

                cart
            }
            Ok(None) => Cart::new(),
            Err(reason) => {
                warn!(key = CART_STORAGE_KEY, "discarding stored cart: {reason}");

                Cart::new()
            }
        };

        Self { cart, storage }
    }

    /// Returns the current cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Returns the storage backend.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Consumes the store, returning the storage backend.
    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Adds one of `item` and persists.
    pub fn add(&mut self, item: Item) {
        self.cart.add(item);
        self.persist();
    }

    /// Removes the line for `id` and persists.
    pub fn remove(&mut self, id: ItemId) {
        self.cart.remove(id);
        self.persist();
    }

    /// Sets the quantity for `id` and persists. Zero or below removes the line.
    pub fn set_quantity(&mut self, id: ItemId, quantity: i64) {
        self.cart.set_quantity(id, quantity);
        self.persist();
    }

    /// Empties the cart and persists.
    pub fn clear(&mut self) {
        self.cart.clear();
        self.persist();
    }

    /// Check if the cart holds `id`.
    pub fn contains(&self, id: ItemId) -> bool {
        self.cart.contains(id)
    }

    /// Returns the quantity held for `id`, or zero.
    pub fn quantity_of(&self, id: ItemId) -> u32 {
        self.cart.quantity_of(id)
    }

    /// Sum of all line quantities.
    pub fn total_items(&self) -> u64 {
        self.cart.total_items()
    }

    /// Sum of price × quantity over all lines.
    pub fn total_price(&self) -> Decimal {
        self.cart.total_price()
    }

    /// The lines, in the order they were first added.
    pub fn lines(&self) -> &[CartLine] {
        self.cart.lines()
    }

    /// Places an order for the whole cart, then clears and persists it.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::EmptyCart`] when there is nothing to order.
    pub fn checkout(&mut self) -> Result<OrderConfirmation, CheckoutError> {
        let confirmation = place_order(&mut self.cart)?;

        self.persist();

        Ok(confirmation)
    }

    fn persist(&mut self) {
        if let Err(error) = self.write() {
            warn!(key = CART_STORAGE_KEY, "failed to persist cart: {error}");
        }
    }

    fn write(&mut self) -> Result<(), PersistError> {
        let value = serde_json::to_string(&PersistedCartRef {
            state: &self.cart,
            version: CART_STORAGE_VERSION,
        })?;

        self.storage.save(CART_STORAGE_KEY, &value)?;

        Ok(())
    }
}

#[derive(Debug, Error)]
enum PersistError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("malformed cart data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported cart version {0}")]
    Version(u32),
}

fn read_cart<S: CartStorage>(storage: &S) -> Result<Option<Cart>, PersistError> {
    let Some(value) = storage.load(CART_STORAGE_KEY)? else {
        return Ok(None);
    };

    let persisted: PersistedCart = serde_json::from_str(&value)?;

    if persisted.version != CART_STORAGE_VERSION {
        return Err(PersistError::Version(persisted.version));
    }

    Ok(Some(persisted.state))
}
