//! Folder name derivation from resource metadata.

use regex::Regex;

use crate::config::{FolderPolicy, FolderSource};
use crate::model::Resource;
use crate::naming::{convert, sanitize, SanitizeOptions};

/// Derive the folder name for one resource from its policy.
///
/// Falls back to the numeric id when the configured property yields
/// nothing usable. Returns an empty string when no folder is wanted.
pub fn resolve_folder(
    resource: &Resource,
    policy: &FolderPolicy,
    opts: &SanitizeOptions,
) -> String {
    let property_id = match policy.source {
        FolderSource::None => return String::new(),
        FolderSource::Id => return resource.id.to_string(),
        FolderSource::Property(id) => id,
    };

    let identifier = find_identifier(resource, property_id, &policy.prefix);

    if identifier.is_empty() {
        return resource.id.to_string();
    }

    convert(&sanitize(&identifier, opts), policy.convert, opts)
}

/// First usable value of the property, in stored order.
///
/// With a prefix configured, values not starting with it are skipped
/// entirely; the matching value is used with the prefix stripped.
fn find_identifier(resource: &Resource, property_id: u64, prefix: &str) -> String {
    if prefix.is_empty() {
        return resource
            .values_of(property_id)
            .next()
            .unwrap_or_default()
            .to_string();
    }

    let pattern = Regex::new(&format!("^{}(.*)", regex::escape(prefix))).unwrap();
    resource
        .values_of(property_id)
        .find_map(|value| pattern.captures(value))
        .and_then(|captures| captures.get(1))
        .map(|remainder| remainder.as_str().trim().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConversionMode;

    fn opts() -> SanitizeOptions {
        SanitizeOptions::default()
    }

    fn policy(source: FolderSource, prefix: &str, convert: ConversionMode) -> FolderPolicy {
        FolderPolicy {
            source,
            prefix: prefix.to_string(),
            convert,
        }
    }

    #[test]
    fn test_no_folder() {
        let resource = Resource::new(42);
        let p = policy(FolderSource::None, "", ConversionMode::Keep);
        assert_eq!(resolve_folder(&resource, &p, &opts()), "");
    }

    #[test]
    fn test_id_folder() {
        let resource = Resource::new(42);
        let p = policy(FolderSource::Id, "", ConversionMode::Keep);
        assert_eq!(resolve_folder(&resource, &p, &opts()), "42");
    }

    #[test]
    fn test_prefixed_property_skips_non_matching_values() {
        let resource = Resource::new(42)
            .with_value(1, "My modified title")
            .with_value(1, "prefix:Other modified title");

        let p = policy(
            FolderSource::Property(1),
            "prefix:",
            ConversionMode::Spaces,
        );
        assert_eq!(
            resolve_folder(&resource, &p, &opts()),
            "Other_modified_title"
        );
    }

    #[test]
    fn test_unprefixed_property_uses_first_value() {
        let resource = Resource::new(42)
            .with_value(1, "My modified title")
            .with_value(1, "prefix:Other modified title");

        let p = policy(FolderSource::Property(1), "", ConversionMode::Spaces);
        assert_eq!(resolve_folder(&resource, &p, &opts()), "My_modified_title");
    }

    #[test]
    fn test_prefix_with_regex_metacharacters() {
        let resource = Resource::new(42).with_value(1, "doc(a):Report");
        let p = policy(FolderSource::Property(1), "doc(a):", ConversionMode::Keep);
        assert_eq!(resolve_folder(&resource, &p, &opts()), "Report");
    }

    #[test]
    fn test_fallback_to_id_when_nothing_matches() {
        let resource = Resource::new(42).with_value(1, "My title");
        let p = policy(
            FolderSource::Property(1),
            "prefix:",
            ConversionMode::Keep,
        );
        assert_eq!(resolve_folder(&resource, &p, &opts()), "42");

        // Property entirely absent
        let empty = Resource::new(7);
        let p = policy(FolderSource::Property(1), "", ConversionMode::Keep);
        assert_eq!(resolve_folder(&empty, &p, &opts()), "7");
    }

    #[test]
    fn test_value_is_sanitized_and_converted() {
        let resource = Resource::new(42).with_value(1, "  Café (René)  ");
        let p = policy(FolderSource::Property(1), "", ConversionMode::FullAscii);
        assert_eq!(resolve_folder(&resource, &p, &opts()), "Cafe_[Rene]");
    }
}
