//! Error and notice types for the archive-repertory crate.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type. Every variant is fatal for the operation that
/// produced it; recoverable conditions travel as [`Notice`] values
/// alongside a successful result instead.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration value for '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    #[error("Missing required configuration: {0}")]
    MissingConfig(String),

    // Name/path validation errors
    #[error("Invalid name: {0}")]
    InvalidName(String),

    // Relocation errors
    #[error("Original file is missing: {0}")]
    SourceMissing(PathBuf),

    #[error("Cannot move original file from '{from}' to '{to}'")]
    RenameFailed { from: PathBuf, to: PathBuf },

    #[error("Destination '{0}' exists but is not a writable directory")]
    BadDestinationDir(PathBuf),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Config file parsing
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// A recoverable condition observed during an otherwise successful
/// operation. Notices are accumulated and returned to the caller;
/// nothing is silently discarded.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    #[error("Storage id '{storage_id}' exceeds {limit} characters; keeping previous id")]
    NameTooLong { storage_id: String, limit: usize },

    #[error("Derivative '{kind}' could not be moved from '{from}' to '{to}'")]
    DerivativeRenameFailed {
        kind: String,
        from: PathBuf,
        to: PathBuf,
    },
}

/// Exit codes for the CLI.
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const CONFIG_ERROR: i32 = 3;
    pub const VALIDATION_ERROR: i32 = 4;
    pub const IO_ERROR: i32 = 5;
    pub const UNEXPECTED_ERROR: i32 = 6;
}
