//! Generator configuration persistence

pub mod store;

pub use store::{ConfigError, ConfigStore, JsonConfigStore};
