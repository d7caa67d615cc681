//! RandoStore catalog client.
//!
//! A thin async wrapper over the `/items` REST endpoints, plus validation of
//! the seller forms that feed it.

pub mod catalog;
pub mod config;
pub mod errors;
pub mod forms;
pub mod items;

#[cfg(test)]
mod test_server;

pub use config::ClientConfig;
pub use errors::ClientError;
pub use items::{HttpItemsClient, ItemsClient, MockItemsClient};
