//! Infrastructure layer: persistence and configuration.

pub mod config;
pub mod store;

pub use config::StoreConfig;
pub use store::{InMemoryStore, InventoryStore, JsonFileStore, LoadWarning, Loaded, StoreError};
