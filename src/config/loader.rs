//! Configuration structures and loading logic.

use crate::archive::registry::{DerivativeSpec, ORIGINAL_KIND};
use crate::config::modes::{ConversionMode, FolderSource};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Global naming options.
    #[serde(default)]
    pub naming: NamingConfig,

    /// Folder policy for items.
    #[serde(default)]
    pub item_folder: FolderPolicy,

    /// Folder policy for item sets.
    #[serde(default)]
    pub item_set_folder: FolderPolicy,

    /// Derivative kinds, each with its own root.
    #[serde(default, rename = "derivative")]
    pub derivatives: Vec<DerivativeSpec>,
}

/// Global naming options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamingConfig {
    /// Conversion mode applied to uploaded filenames.
    #[serde(default)]
    pub file_naming: ConversionMode,

    /// Leave literal parentheses untouched instead of mapping them to
    /// square brackets. Less safe; off by default.
    #[serde(default)]
    pub keep_parenthesis: bool,

    /// Maximum length of a single sanitized segment, in characters.
    #[serde(default = "default_segment_max_len")]
    pub segment_max_len: usize,

    /// Maximum length of a full storage id, in characters.
    #[serde(default = "default_storage_id_max_len")]
    pub storage_id_max_len: usize,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            file_naming: ConversionMode::default(),
            keep_parenthesis: false,
            segment_max_len: default_segment_max_len(),
            storage_id_max_len: default_storage_id_max_len(),
        }
    }
}

/// Per-resource-kind folder derivation policy.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FolderPolicy {
    /// Where the folder name comes from (none, id, or a property).
    #[serde(default)]
    pub source: FolderSource,

    /// Only property values starting with this prefix are considered;
    /// the prefix itself is stripped from the folder name.
    #[serde(default)]
    pub prefix: String,

    /// Conversion mode for the derived folder name.
    #[serde(default)]
    pub convert: ConversionMode,
}

fn default_segment_max_len() -> usize {
    180
}

fn default_storage_id_max_len() -> usize {
    190
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::Config(format!(
                    "Configuration file not found: {}",
                    path.display()
                ))
            } else {
                Error::Io(e)
            }
        })?;

        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// The spec configured for the original kind, if any.
    pub fn original_derivative(&self) -> Option<&DerivativeSpec> {
        self.derivatives.iter().find(|d| d.name == ORIGINAL_KIND)
    }
}
