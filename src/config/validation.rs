//! Configuration validation logic.
//!
//! All configuration is checked once, up front; malformed derivative
//! entries are rejected instead of silently dropped.

use std::collections::HashSet;

use crate::archive::registry::{ExtensionPolicy, ORIGINAL_KIND};
use crate::config::loader::{Config, FolderPolicy};
use crate::config::modes::ConversionMode;
use crate::error::{Error, Result};

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_naming(config)?;
    validate_folder_policy("item_folder", &config.item_folder)?;
    validate_folder_policy("item_set_folder", &config.item_set_folder)?;
    validate_derivatives(config)?;

    Ok(())
}

fn validate_naming(config: &Config) -> Result<()> {
    if config.naming.segment_max_len == 0 {
        return Err(Error::ConfigValidation {
            field: "naming.segment_max_len".to_string(),
            message: "must be at least 1".to_string(),
        });
    }

    if config.naming.storage_id_max_len < config.naming.segment_max_len {
        return Err(Error::ConfigValidation {
            field: "naming.storage_id_max_len".to_string(),
            message: format!(
                "must be at least segment_max_len ({})",
                config.naming.segment_max_len
            ),
        });
    }

    Ok(())
}

/// Validate a single folder policy.
pub fn validate_folder_policy(field: &str, policy: &FolderPolicy) -> Result<()> {
    // Hash naming applies to files, never to folders
    if policy.convert == ConversionMode::Hash {
        return Err(Error::ConfigValidation {
            field: format!("{}.convert", field),
            message: "hash naming is not valid for folder names".to_string(),
        });
    }

    if policy.prefix.contains('/') || policy.prefix.contains('\\') {
        return Err(Error::ConfigValidation {
            field: format!("{}.prefix", field),
            message: "prefix must not contain path separators".to_string(),
        });
    }

    Ok(())
}

fn validate_derivatives(config: &Config) -> Result<()> {
    if config.derivatives.is_empty() {
        return Err(Error::MissingConfig("derivative".to_string()));
    }

    if config.original_derivative().is_none() {
        return Err(Error::MissingConfig(format!(
            "derivative named '{}'",
            ORIGINAL_KIND
        )));
    }

    let mut names = HashSet::new();
    let mut roots = HashSet::new();

    for (index, spec) in config.derivatives.iter().enumerate() {
        let field = format!("derivative[{}]", index);

        if spec.name.trim().is_empty() {
            return Err(Error::ConfigValidation {
                field: format!("{}.name", field),
                message: "name must not be empty".to_string(),
            });
        }

        if spec.root.as_os_str().is_empty() {
            return Err(Error::ConfigValidation {
                field: format!("{}.root", field),
                message: "root must not be empty".to_string(),
            });
        }

        if !names.insert(spec.name.clone()) {
            return Err(Error::ConfigValidation {
                field: format!("{}.name", field),
                message: format!("duplicate derivative name '{}'", spec.name),
            });
        }

        if !roots.insert(spec.root.clone()) {
            return Err(Error::ConfigValidation {
                field: format!("{}.root", field),
                message: format!("duplicate derivative root '{}'", spec.root.display()),
            });
        }

        if let ExtensionPolicy::Fixed(ext) = &spec.extension {
            if ext.is_empty() || ext.contains('.') || ext.contains('/') {
                return Err(Error::ConfigValidation {
                    field: format!("{}.extension", field),
                    message: format!("'{}' is not a bare extension", ext),
                });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::registry::DerivativeSpec;
    use crate::config::modes::FolderSource;
    use std::path::PathBuf;

    fn make_valid_config() -> Config {
        Config {
            derivatives: vec![
                DerivativeSpec {
                    name: "original".to_string(),
                    root: PathBuf::from("/files/original"),
                    extension: ExtensionPolicy::Same,
                },
                DerivativeSpec {
                    name: "large".to_string(),
                    root: PathBuf::from("/files/large"),
                    extension: ExtensionPolicy::Fixed("jpg".to_string()),
                },
            ],
            ..Config::default()
        }
    }

    #[test]
    fn test_valid_config() {
        assert!(validate_config(&make_valid_config()).is_ok());
    }

    #[test]
    fn test_missing_original() {
        let mut config = make_valid_config();
        config.derivatives.remove(0);
        assert!(matches!(
            validate_config(&config),
            Err(Error::MissingConfig(_))
        ));
    }

    #[test]
    fn test_no_derivatives() {
        let mut config = make_valid_config();
        config.derivatives.clear();
        assert!(matches!(
            validate_config(&config),
            Err(Error::MissingConfig(_))
        ));
    }

    #[test]
    fn test_duplicate_name() {
        let mut config = make_valid_config();
        config.derivatives[1].name = "original".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_duplicate_root() {
        let mut config = make_valid_config();
        config.derivatives[1].root = PathBuf::from("/files/original");
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_bad_fixed_extension() {
        let mut config = make_valid_config();
        config.derivatives[1].extension = ExtensionPolicy::Fixed(".jpg".to_string());
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_hash_rejected_for_folders() {
        let mut config = make_valid_config();
        config.item_folder = FolderPolicy {
            source: FolderSource::Id,
            prefix: String::new(),
            convert: ConversionMode::Hash,
        };
        assert!(validate_config(&config).is_err());
    }
}
