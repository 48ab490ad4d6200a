//! Synchronized relocation of an artifact and its derivatives.

use std::path::Path;

use tracing::{debug, warn};

use crate::archive::fsops::ArchiveFs;
use crate::archive::registry::{DerivativeRegistry, DerivativeSpec, ExtensionPolicy};
use crate::error::{Error, Notice, Result};
use crate::layout::collision::{filename_of, folder_of};
use crate::model::append_extension;

/// Result of a relocation: how many files actually moved, plus any
/// recoverable notices raised along the way.
#[derive(Debug, Clone, Default)]
pub struct MoveOutcome {
    pub moved: usize,
    pub notices: Vec<Notice>,
}

/// Moves the original artifact and every configured derivative kind
/// between two storage ids, creating destination folders and pruning
/// emptied source folders.
///
/// Individual file moves are idempotent, so a failed call can safely
/// be re-invoked. Moves across derivative kinds are not transactional:
/// a derivative rename failure after a successful original move leaves
/// the locations mismatched and is reported as a notice, not rolled
/// back.
pub struct ArchiveRelocator<'a, F: ArchiveFs> {
    registry: &'a DerivativeRegistry,
    fs: &'a F,
}

impl<'a, F: ArchiveFs> ArchiveRelocator<'a, F> {
    pub fn new(registry: &'a DerivativeRegistry, fs: &'a F) -> Self {
        Self { registry, fs }
    }

    /// Move an artifact from `old_storage_id` to `new_storage_id`.
    /// `extension` is the artifact's literal extension, used by the
    /// `same` extension policy.
    pub fn relocate(
        &self,
        old_storage_id: &str,
        new_storage_id: &str,
        extension: &str,
    ) -> Result<MoveOutcome> {
        let old_id = normalize_storage_id(old_storage_id)?;
        let new_id = normalize_storage_id(new_storage_id)?;

        let mut outcome = MoveOutcome::default();
        if old_id == new_id {
            debug!("'{}' is already in place", old_id);
            return Ok(outcome);
        }

        for spec in self.registry.iter() {
            self.relocate_kind(spec, &old_id, &new_id, extension, &mut outcome)?;
        }

        let old_folder = folder_of(&old_id);
        if old_folder != folder_of(&new_id) {
            for spec in self.registry.iter() {
                self.prune_folder(&spec.root, old_folder);
            }
        }

        Ok(outcome)
    }

    /// Move one derivative kind. Fatal only for the original kind.
    fn relocate_kind(
        &self,
        spec: &DerivativeSpec,
        old_id: &str,
        new_id: &str,
        extension: &str,
        outcome: &mut MoveOutcome,
    ) -> Result<()> {
        // Destination folder is created even when nothing will be
        // moved, so producers that expect it keep working.
        self.ensure_folder(&spec.root, folder_of(new_id))?;

        let ext = match &spec.extension {
            ExtensionPolicy::Same => extension.to_string(),
            ExtensionPolicy::Fixed(ext) => ext.clone(),
            ExtensionPolicy::Dynamic => {
                match self.stored_extension(&spec.root, old_id)? {
                    Some(ext) => ext,
                    None => {
                        // A previous call may already have moved the file
                        if self.stored_extension(&spec.root, new_id)?.is_some() {
                            debug!("'{}' already under '{}'", spec.name, new_id);
                            return Ok(());
                        }
                        if spec.is_original() {
                            return Err(Error::SourceMissing(spec.root.join(old_id)));
                        }
                        debug!("no '{}' derivative for '{}', skipping", spec.name, old_id);
                        return Ok(());
                    }
                }
            }
        };

        let old_path = spec.root.join(append_extension(old_id, &ext));
        let new_path = spec.root.join(append_extension(new_id, &ext));

        if !self.fs.exists(&old_path) {
            // An absent source with the file already at the
            // destination is a completed move, not a missing original;
            // re-invoking after a partial relocation must succeed.
            if self.fs.exists(&new_path) {
                debug!("'{}' already at '{}'", spec.name, new_path.display());
                return Ok(());
            }
            if spec.is_original() {
                return Err(Error::SourceMissing(old_path));
            }
            debug!("no '{}' derivative at '{}', skipping", spec.name, old_path.display());
            return Ok(());
        }

        if self.fs.exists(&new_path) {
            debug!("'{}' already at '{}'", spec.name, new_path.display());
            return Ok(());
        }

        if self.fs.rename(&old_path, &new_path) {
            debug!(
                "moved '{}' file '{}' -> '{}'",
                spec.name,
                old_path.display(),
                new_path.display()
            );
            outcome.moved += 1;
            return Ok(());
        }

        if spec.is_original() {
            return Err(Error::RenameFailed {
                from: old_path,
                to: new_path,
            });
        }

        warn!(
            "could not move '{}' file '{}' -> '{}'",
            spec.name,
            old_path.display(),
            new_path.display()
        );
        outcome.notices.push(Notice::DerivativeRenameFailed {
            kind: spec.name.clone(),
            from: old_path,
            to: new_path,
        });
        Ok(())
    }

    fn ensure_folder(&self, root: &Path, folder: &str) -> Result<()> {
        let dir = if folder.is_empty() {
            root.to_path_buf()
        } else {
            root.join(folder)
        };

        self.fs.mkdir_all(&dir)?;
        if !self.fs.is_dir(&dir) || !self.fs.is_writable(&dir) {
            return Err(Error::BadDestinationDir(dir));
        }
        Ok(())
    }

    /// Extension of whatever file is currently stored under
    /// `storage_id`, if one exists.
    ///
    /// Suffixed sibling artifacts ("photo.1.webp" next to
    /// "photo.webp") share the stem prefix; only a name whose
    /// remainder is a single extension belongs to this id.
    fn stored_extension(&self, root: &Path, storage_id: &str) -> Result<Option<String>> {
        let folder = folder_of(storage_id);
        let dir = if folder.is_empty() {
            root.to_path_buf()
        } else {
            root.join(folder)
        };

        let stem = filename_of(storage_id);
        let names = self.fs.list_matching(&dir, &stem)?;
        Ok(names.iter().find_map(|name| {
            let remainder = name[stem.len()..].trim_start_matches('.');
            if remainder.contains('.') {
                return None;
            }
            Some(remainder.to_string())
        }))
    }

    /// Remove the emptied folder and any emptied ancestors under one
    /// root. Never touches the root itself, never removes a non-empty
    /// directory.
    fn prune_folder(&self, root: &Path, folder: &str) {
        let mut rel = folder;
        while !rel.is_empty() {
            let path = root.join(rel);
            if !self.fs.remove_empty_dir(&path) {
                break;
            }
            debug!("removed emptied folder '{}'", path.display());
            rel = folder_of(rel);
        }
    }
}

/// Collapse doubled separators and current-directory segments, and
/// validate a storage id: non-empty, no parent-directory traversal.
pub fn normalize_storage_id(storage_id: &str) -> Result<String> {
    let segments: Vec<&str> = storage_id
        .split('/')
        .filter(|s| !s.is_empty() && *s != ".")
        .collect();

    if segments.is_empty() {
        return Err(Error::InvalidName("empty storage id".to_string()));
    }
    if segments.iter().any(|s| *s == "..") {
        return Err(Error::InvalidName(format!(
            "storage id '{}' contains a parent-directory segment",
            storage_id
        )));
    }

    Ok(segments.join("/"))
}
