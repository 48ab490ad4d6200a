//! Archive relocation.
//!
//! Provides:
//! - The derivative registry (kinds, roots, extension policies)
//! - The filesystem adapter
//! - The relocator itself

pub mod fsops;
pub mod registry;
pub mod relocate;

pub use fsops::{ArchiveFs, LocalFs};
pub use registry::{DerivativeRegistry, DerivativeSpec, ExtensionPolicy, ORIGINAL_KIND};
pub use relocate::{normalize_storage_id, ArchiveRelocator, MoveOutcome};
