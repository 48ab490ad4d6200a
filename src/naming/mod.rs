//! Name sanitization and transliteration.
//!
//! Provides:
//! - Sanitization of arbitrary text into a safe path segment
//! - Conversion policies applied on top of a sanitized name

pub mod convert;
pub mod sanitize;

pub use convert::convert;
pub use sanitize::{sanitize, SanitizeOptions};
