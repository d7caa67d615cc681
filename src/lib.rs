//! RandoStore
//!
//! Shared cart state for the RandoStore clients: the item and price model, a
//! pure cart state machine, the persistence seam each client plugs its own
//! storage into, and the maths behind the simulated checkout.

pub mod cart;
pub mod checkout;
pub mod items;
pub mod prelude;
pub mod prices;
pub mod storage;
pub mod store;
