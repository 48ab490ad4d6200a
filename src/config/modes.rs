//! Naming mode definitions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Transliteration strategy applied to a name destined to become a
/// folder or file segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConversionMode {
    /// Keep the sanitized name as-is (default).
    #[default]
    Keep,
    /// Replace whitespace runs with underscores.
    Spaces,
    /// ASCII-transliterate only the first character.
    FirstLetter,
    /// First-letter transliteration, then underscore spaces.
    FirstAndSpaces,
    /// Full ASCII transliteration with an allow-set.
    FullAscii,
    /// Name files by a content hash instead of their source name.
    /// Only valid for file naming, never for folder names.
    Hash,
}

impl fmt::Display for ConversionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionMode::Keep => write!(f, "keep"),
            ConversionMode::Spaces => write!(f, "spaces"),
            ConversionMode::FirstLetter => write!(f, "first-letter"),
            ConversionMode::FirstAndSpaces => write!(f, "first-and-spaces"),
            ConversionMode::FullAscii => write!(f, "full-ascii"),
            ConversionMode::Hash => write!(f, "hash"),
        }
    }
}

impl FromStr for ConversionMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "keep" => Ok(ConversionMode::Keep),
            "spaces" => Ok(ConversionMode::Spaces),
            "first-letter" => Ok(ConversionMode::FirstLetter),
            "first-and-spaces" => Ok(ConversionMode::FirstAndSpaces),
            "full-ascii" => Ok(ConversionMode::FullAscii),
            "hash" => Ok(ConversionMode::Hash),
            _ => Err(format!("Unknown conversion mode: {}", s)),
        }
    }
}

/// Where a resource's folder name comes from.
///
/// Serialized as `"none"`, `"id"`, or a property id like `"property:50"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum FolderSource {
    /// No per-resource folder.
    #[default]
    None,
    /// Use the resource's numeric id.
    Id,
    /// Use the first value of the named property.
    Property(u64),
}

impl fmt::Display for FolderSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FolderSource::None => write!(f, "none"),
            FolderSource::Id => write!(f, "id"),
            FolderSource::Property(id) => write!(f, "property:{}", id),
        }
    }
}

impl FromStr for FolderSource {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "" | "none" => Ok(FolderSource::None),
            "id" => Ok(FolderSource::Id),
            other => {
                let id = other
                    .strip_prefix("property:")
                    .unwrap_or(other)
                    .parse::<u64>()
                    .map_err(|_| format!("Unknown folder source: {}", s))?;
                Ok(FolderSource::Property(id))
            }
        }
    }
}

impl TryFrom<String> for FolderSource {
    type Error = String;

    fn try_from(s: String) -> std::result::Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<FolderSource> for String {
    fn from(source: FolderSource) -> Self {
        source.to_string()
    }
}
