//! Data model: resources and artifacts.

pub mod artifact;
pub mod resource;

pub use artifact::{append_extension, Artifact};
pub use resource::{PropertyValue, Resource};
