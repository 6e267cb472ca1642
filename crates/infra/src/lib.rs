//! Infrastructure layer: JSON file storage, data directory bootstrap, config.

pub mod bootstrap;
pub mod config;
pub mod store;

pub use bootstrap::{BootstrapReport, bootstrap, seed_inventory, seed_menu};
pub use config::{ConfigError, ServerConfig};
pub use store::JsonFileStore;
