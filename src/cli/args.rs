//! Command-line argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::ConversionMode;
use crate::error::{Error, Result};
use crate::model::{PropertyValue, Resource};

/// Archive layout inspection and maintenance CLI.
#[derive(Parser, Debug)]
#[command(
    name = "archive-repertory",
    version,
    about = "Derive and maintain human-readable archive storage paths",
    long_about = "Derives deterministic, collision-free storage paths for archived media\n\
                  and relocates files (original plus derivatives) when resource metadata\n\
                  changes."
)]
pub struct Args {
    /// Path to configuration file.
    #[arg(short, long, default_value = "config.toml", env = "ARCHIVE_REPERTORY_CONFIG")]
    pub config: PathBuf,

    /// Enable debug logging.
    #[arg(long)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sanitize and convert a name into a safe path segment.
    Sanitize {
        /// The name to sanitize.
        name: String,

        /// Conversion mode to apply after sanitizing.
        #[arg(long, default_value = "keep")]
        mode: ConversionMode,
    },

    /// Compute the storage id an upload would get (dry run, no files
    /// are touched).
    StorageId {
        /// The uploaded filename.
        filename: String,

        /// Media id of the artifact.
        #[arg(long, default_value_t = 0)]
        media_id: u64,

        /// Numeric id of the owning item.
        #[arg(long)]
        item_id: u64,

        /// Item metadata value as `<property id>=<text>`. Repeatable;
        /// order is preserved.
        #[arg(long = "value", value_parser = parse_property_value)]
        values: Vec<PropertyValue>,

        /// Numeric id of the parent item set, if any.
        #[arg(long)]
        item_set_id: Option<u64>,

        /// Item-set metadata value as `<property id>=<text>`. Repeatable.
        #[arg(long = "set-value", value_parser = parse_property_value)]
        set_values: Vec<PropertyValue>,
    },

    /// Relocate an artifact and its derivatives between storage ids.
    Relocate {
        /// Current storage id.
        old: String,

        /// Target storage id.
        new: String,

        /// The artifact's file extension, without the dot.
        #[arg(long, default_value = "")]
        extension: String,
    },
}

fn parse_property_value(s: &str) -> std::result::Result<PropertyValue, String> {
    let (id, text) = s
        .split_once('=')
        .ok_or_else(|| format!("expected '<property id>=<text>', got '{}'", s))?;
    let property_id = id
        .trim()
        .parse::<u64>()
        .map_err(|_| format!("'{}' is not a numeric property id", id))?;
    Ok(PropertyValue::new(property_id, text))
}

/// Build a [`Resource`] from an id and parsed `--value` pairs.
pub fn build_resource(id: u64, values: &[PropertyValue]) -> Result<Resource> {
    if id == 0 {
        return Err(Error::InvalidName("resource id must be non-zero".to_string()));
    }
    Ok(Resource {
        id,
        values: values.to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_property_value() {
        let value = parse_property_value("1=My title").unwrap();
        assert_eq!(value.property_id, 1);
        assert_eq!(value.value, "My title");

        // Text may itself contain '='
        let value = parse_property_value("2=a=b").unwrap();
        assert_eq!(value.value, "a=b");

        assert!(parse_property_value("notanid=x").is_err());
        assert!(parse_property_value("justtext").is_err());
    }
}
