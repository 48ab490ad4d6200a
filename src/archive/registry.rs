//! Derivative kinds and their filesystem roots.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Name of the special kind holding original files.
pub const ORIGINAL_KIND: &str = "original";

/// How a derivative kind's file extension is determined at move time.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ExtensionPolicy {
    /// Use the artifact's extension verbatim (default).
    #[default]
    Same,
    /// Recompute from whatever file is currently stored under the old
    /// name.
    Dynamic,
    /// Force a specific extension.
    Fixed(String),
}

impl fmt::Display for ExtensionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtensionPolicy::Same => write!(f, "same"),
            ExtensionPolicy::Dynamic => write!(f, "dynamic"),
            ExtensionPolicy::Fixed(ext) => write!(f, "fixed:{}", ext),
        }
    }
}

impl FromStr for ExtensionPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "same" => Ok(ExtensionPolicy::Same),
            "dynamic" => Ok(ExtensionPolicy::Dynamic),
            other => match other.strip_prefix("fixed:") {
                Some(ext) if !ext.is_empty() => Ok(ExtensionPolicy::Fixed(ext.to_string())),
                _ => Err(format!("Unknown extension policy: {}", s)),
            },
        }
    }
}

impl TryFrom<String> for ExtensionPolicy {
    type Error = String;

    fn try_from(s: String) -> std::result::Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<ExtensionPolicy> for String {
    fn from(policy: ExtensionPolicy) -> Self {
        policy.to_string()
    }
}

/// One derivative kind: a name, a filesystem root, and an extension
/// policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivativeSpec {
    pub name: String,
    pub root: PathBuf,
    #[serde(default)]
    pub extension: ExtensionPolicy,
}

impl DerivativeSpec {
    pub fn is_original(&self) -> bool {
        self.name == ORIGINAL_KIND
    }
}

/// The full set of derivative kinds for a run, original first.
///
/// Built once from validated configuration and passed down explicitly;
/// there is no process-global path table.
#[derive(Debug, Clone)]
pub struct DerivativeRegistry {
    specs: Vec<DerivativeSpec>,
}

impl DerivativeRegistry {
    /// Build a registry. The original kind must be present; it is
    /// moved to the front, other kinds keep their configured order.
    pub fn new(mut specs: Vec<DerivativeSpec>) -> Result<Self> {
        let position = specs
            .iter()
            .position(DerivativeSpec::is_original)
            .ok_or_else(|| Error::MissingConfig(format!("derivative named '{}'", ORIGINAL_KIND)))?;

        let original = specs.remove(position);
        specs.insert(0, original);
        Ok(Self { specs })
    }

    /// The original kind.
    pub fn original(&self) -> &DerivativeSpec {
        &self.specs[0]
    }

    /// All kinds, original first.
    pub fn iter(&self) -> impl Iterator<Item = &DerivativeSpec> {
        self.specs.iter()
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(name: &str, root: &str) -> DerivativeSpec {
        DerivativeSpec {
            name: name.to_string(),
            root: PathBuf::from(root),
            extension: ExtensionPolicy::Same,
        }
    }

    #[test]
    fn test_original_moved_to_front() {
        let registry = DerivativeRegistry::new(vec![
            spec("large", "/files/large"),
            spec("original", "/files/original"),
            spec("square", "/files/square"),
        ])
        .unwrap();

        let names: Vec<&str> = registry.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["original", "large", "square"]);
        assert_eq!(registry.original().root, PathBuf::from("/files/original"));
    }

    #[test]
    fn test_missing_original_rejected() {
        let result = DerivativeRegistry::new(vec![spec("large", "/files/large")]);
        assert!(matches!(result, Err(Error::MissingConfig(_))));
    }

    #[test]
    fn test_extension_policy_parse() {
        assert_eq!("same".parse(), Ok(ExtensionPolicy::Same));
        assert_eq!("dynamic".parse(), Ok(ExtensionPolicy::Dynamic));
        assert_eq!(
            "fixed:jpg".parse(),
            Ok(ExtensionPolicy::Fixed("jpg".to_string()))
        );
        assert!("fixed:".parse::<ExtensionPolicy>().is_err());
        assert!("nope".parse::<ExtensionPolicy>().is_err());
    }
}
