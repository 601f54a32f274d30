//! Infrastructure layer: repository adapters and configuration.

pub mod config;
pub mod memory;

mod integration_tests;

pub use config::{AppConfig, ConfigError};
pub use memory::InMemoryStore;
