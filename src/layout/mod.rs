//! Storage layout derivation.
//!
//! Provides:
//! - Folder name resolution from resource metadata
//! - Collision-free base filenames
//! - Full storage id composition

pub mod collision;
pub mod folder;
pub mod storage_id;

pub use collision::get_single_filename;
pub use folder::resolve_folder;
pub use storage_id::{StorageIdBuilder, StorageIdOutcome};
