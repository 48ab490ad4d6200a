//! Configuration module.
//!
//! Provides:
//! - Configuration loading from TOML
//! - Naming mode definitions
//! - Up-front validation

pub mod loader;
pub mod modes;
pub mod validation;

pub use loader::{Config, FolderPolicy, NamingConfig};
pub use modes::{ConversionMode, FolderSource};
pub use validation::validate_config;
