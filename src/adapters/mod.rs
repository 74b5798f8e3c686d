//! Infrastructure adapters for external systems.

pub mod config;
pub mod sqlite;

pub use config::{ConfigError, ConfigLoader};
