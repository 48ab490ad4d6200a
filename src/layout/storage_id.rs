//! Storage id composition.

use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use crate::archive::fsops::ArchiveFs;
use crate::archive::registry::DerivativeRegistry;
use crate::config::{Config, ConversionMode};
use crate::error::{Error, Notice, Result};
use crate::layout::collision::get_single_filename;
use crate::layout::folder::resolve_folder;
use crate::model::{Artifact, Resource};
use crate::naming::{convert, sanitize, SanitizeOptions};

/// Hex length of a content-hash filename.
const HASH_NAME_LEN: usize = 40;

/// A computed storage id plus any recoverable notices raised while
/// computing it.
#[derive(Debug, Clone)]
pub struct StorageIdOutcome {
    pub storage_id: String,
    pub notices: Vec<Notice>,
}

impl StorageIdOutcome {
    fn clean(storage_id: String) -> Self {
        Self {
            storage_id,
            notices: Vec::new(),
        }
    }
}

/// Composes the full relative storage id for an artifact.
pub struct StorageIdBuilder<'a, F: ArchiveFs> {
    config: &'a Config,
    registry: &'a DerivativeRegistry,
    fs: &'a F,
}

impl<'a, F: ArchiveFs> StorageIdBuilder<'a, F> {
    pub fn new(config: &'a Config, registry: &'a DerivativeRegistry, fs: &'a F) -> Self {
        Self {
            config,
            registry,
            fs,
        }
    }

    /// Compute the storage id the artifact should have, given its
    /// owning item and (if any) the item's parent item set.
    ///
    /// An id that would exceed the configured cap is not produced:
    /// the artifact's previous id is returned unchanged alongside a
    /// [`Notice::NameTooLong`].
    pub fn build(
        &self,
        artifact: &Artifact,
        item: &Resource,
        item_set: Option<&Resource>,
    ) -> Result<StorageIdOutcome> {
        let opts = self.sanitize_options();

        let set_folder = item_set
            .map(|set| resolve_folder(set, &self.config.item_set_folder, &opts))
            .unwrap_or_default();
        let item_folder = resolve_folder(item, &self.config.item_folder, &opts);

        let folder = join_segments(&set_folder, &item_folder);

        let stem = self.base_stem(artifact, &opts)?;
        let unique = get_single_filename(
            self.fs,
            &self.registry.original().root,
            &folder,
            &stem,
            artifact,
        )?;

        let storage_id = if folder.is_empty() {
            unique
        } else {
            format!("{}/{}", folder, unique)
        };

        let limit = self.config.naming.storage_id_max_len;
        if storage_id.chars().count() > limit {
            warn!(
                "storage id '{}' exceeds {} characters; keeping '{}'",
                storage_id, limit, artifact.storage_id
            );
            return Ok(StorageIdOutcome {
                storage_id: artifact.storage_id.clone(),
                notices: vec![Notice::NameTooLong { storage_id, limit }],
            });
        }

        debug!("storage id for media {}: '{}'", artifact.id, storage_id);
        Ok(StorageIdOutcome::clean(storage_id))
    }

    /// The candidate base filename, before collision resolution.
    fn base_stem(&self, artifact: &Artifact, opts: &SanitizeOptions) -> Result<String> {
        if self.config.naming.file_naming == ConversionMode::Hash {
            return Ok(hash_name(artifact));
        }

        let stem = convert(
            &sanitize(artifact.source_stem(), opts),
            self.config.naming.file_naming,
            opts,
        );
        if stem.is_empty() {
            return Err(Error::InvalidName(format!(
                "source filename '{}' yields an empty name",
                artifact.source_filename
            )));
        }
        Ok(stem)
    }

    fn sanitize_options(&self) -> SanitizeOptions {
        SanitizeOptions {
            keep_parenthesis: self.config.naming.keep_parenthesis,
            max_len: self.config.naming.segment_max_len,
        }
    }
}

/// Content-hash filename: leading hex of SHA-256 over
/// `"{media id}/{source filename}"`.
fn hash_name(artifact: &Artifact) -> String {
    let mut hasher = Sha256::new();
    hasher.update(artifact.id.to_string().as_bytes());
    hasher.update(b"/");
    hasher.update(artifact.source_filename.as_bytes());

    let digest = hex::encode(hasher.finalize());
    digest[..HASH_NAME_LEN].to_string()
}

/// Join two folder segments, omitting empty ones; never a leading or
/// doubled separator.
fn join_segments(parent: &str, child: &str) -> String {
    match (parent.is_empty(), child.is_empty()) {
        (true, true) => String::new(),
        (true, false) => child.to_string(),
        (false, true) => parent.to_string(),
        (false, false) => format!("{}/{}", parent, child),
    }
}
