//! RandoStore prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartLine},
    checkout::{CheckoutError, OrderConfirmation, OrderSummary, place_order},
    items::{Item, ItemId, ItemUpdate, NewItem},
    prices::{Price, PriceError, format_amount},
    storage::{CartStorage, FileStorage, MemoryStorage, StorageError},
    store::{CART_STORAGE_KEY, CartStore},
};
