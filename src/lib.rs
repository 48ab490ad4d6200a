//! Archive Repertory - deterministic, human-readable storage layout
//! for media archives.
//!
//! Given metadata about a resource and an uploaded artifact, this
//! library derives a readable, collision-free relative storage path,
//! and safely relocates the artifact and all of its derivatives
//! whenever the resource's identifying metadata changes.
//!
//! # Features
//!
//! - Name sanitization and transliteration (several conversion modes)
//! - Folder names derived from configurable resource metadata
//! - Stable collision avoidance with numeric suffixes
//! - Synchronized moves across the original and every derivative root
//! - Folder lifecycle bookkeeping (create on demand, prune when empty)
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use archive_repertory::archive::{ArchiveRelocator, DerivativeRegistry, LocalFs};
//! use archive_repertory::config::{validate_config, Config};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load(Path::new("config.toml"))?;
//!     validate_config(&config)?;
//!
//!     let registry = DerivativeRegistry::new(config.derivatives.clone())?;
//!     let relocator = ArchiveRelocator::new(&registry, &LocalFs);
//!     let outcome = relocator.relocate("Old_title/photo", "New_title/photo", "jpg")?;
//!     println!("{} file(s) moved", outcome.moved);
//!     Ok(())
//! }
//! ```

pub mod archive;
pub mod cli;
pub mod config;
pub mod error;
pub mod layout;
pub mod model;
pub mod naming;
pub mod output;

// Re-exports for convenience
pub use archive::{ArchiveRelocator, DerivativeRegistry, DerivativeSpec, LocalFs, MoveOutcome};
pub use config::{Config, ConversionMode, FolderPolicy, FolderSource};
pub use error::{Error, Notice, Result};
pub use layout::{StorageIdBuilder, StorageIdOutcome};
pub use model::{Artifact, Resource};
