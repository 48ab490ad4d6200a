//! Filesystem adapter: the sole I/O boundary of the relocation engine.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::Result;

/// Low-level filesystem operations used by the relocator and the
/// collision resolver. Kept narrow so tests can substitute their own
/// implementation.
pub trait ArchiveFs {
    fn exists(&self, path: &Path) -> bool;

    fn is_dir(&self, path: &Path) -> bool;

    fn is_writable(&self, path: &Path) -> bool;

    /// Recursively create a directory. Creating an existing directory
    /// is a no-op success.
    fn mkdir_all(&self, path: &Path) -> Result<()>;

    /// Rename a file. Returns false on failure instead of an error;
    /// the caller decides whether the failure is fatal.
    fn rename(&self, from: &Path, to: &Path) -> bool;

    /// Filenames in `folder` whose stem equals `stem`, for any
    /// extension or none. Missing folders yield an empty list.
    ///
    /// An explicit listing filtered by stem equality; no glob, so
    /// metacharacters in stems need no escaping.
    fn list_matching(&self, folder: &Path, stem: &str) -> Result<Vec<String>>;

    /// Remove a directory only if it is empty. Returns true if it was
    /// removed.
    fn remove_empty_dir(&self, path: &Path) -> bool;

    /// Remove a directory and everything under it. For administrative
    /// cleanup only; the relocation path never calls this.
    fn remove_dir_force(&self, path: &Path) -> Result<()>;
}

/// Does `name` equal `stem` or start with `stem.`?
pub fn matches_stem(name: &str, stem: &str) -> bool {
    name == stem
        || (name.len() > stem.len() + 1
            && name.starts_with(stem)
            && name.as_bytes()[stem.len()] == b'.')
}

/// [`ArchiveFs`] backed by the local filesystem.
#[derive(Debug, Clone, Default)]
pub struct LocalFs;

impl ArchiveFs for LocalFs {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn is_writable(&self, path: &Path) -> bool {
        match fs::metadata(path) {
            Ok(metadata) => !metadata.permissions().readonly(),
            Err(_) => false,
        }
    }

    fn mkdir_all(&self, path: &Path) -> Result<()> {
        if path.is_dir() {
            return Ok(());
        }
        fs::create_dir_all(path)?;
        fixup_mode(path);
        Ok(())
    }

    fn rename(&self, from: &Path, to: &Path) -> bool {
        match fs::rename(from, to) {
            Ok(()) => true,
            Err(e) => {
                debug!(
                    "rename '{}' -> '{}' failed: {}",
                    from.display(),
                    to.display(),
                    e
                );
                false
            }
        }
    }

    fn list_matching(&self, folder: &Path, stem: &str) -> Result<Vec<String>> {
        if !folder.is_dir() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(folder)? {
            let entry = entry?;
            if !entry.path().is_file() {
                continue;
            }
            let name = match entry.file_name().into_string() {
                Ok(name) => name,
                Err(_) => continue,
            };
            if matches_stem(&name, stem) {
                names.push(name);
            }
        }

        names.sort();
        Ok(names)
    }

    fn remove_empty_dir(&self, path: &Path) -> bool {
        if !path.is_dir() {
            return false;
        }
        // remove_dir refuses non-empty directories
        fs::remove_dir(path).is_ok()
    }

    fn remove_dir_force(&self, path: &Path) -> Result<()> {
        if path.is_dir() {
            fs::remove_dir_all(path)?;
        }
        Ok(())
    }
}

#[cfg(unix)]
fn fixup_mode(path: &Path) {
    use std::os::unix::fs::PermissionsExt;
    let _ = fs::set_permissions(path, fs::Permissions::from_mode(0o755));
}

#[cfg(not(unix))]
fn fixup_mode(_path: &Path) {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_stem() {
        assert!(matches_stem("photo", "photo"));
        assert!(matches_stem("photo.jpg", "photo"));
        assert!(matches_stem("photo.1.jpg", "photo"));
        assert!(matches_stem("photo.1", "photo.1"));
        assert!(!matches_stem("photograph", "photo"));
        assert!(!matches_stem("photo1.jpg", "photo"));
        assert!(!matches_stem("photo.", "photo"));
    }

    #[test]
    fn test_list_matching() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["photo", "photo.jpg", "photo.1.jpg", "photograph.jpg"] {
            std::fs::write(dir.path().join(name), b"x").unwrap();
        }
        std::fs::create_dir(dir.path().join("photo.d")).unwrap();

        let fs = LocalFs;
        let names = fs.list_matching(dir.path(), "photo").unwrap();
        assert_eq!(names, vec!["photo", "photo.1.jpg", "photo.jpg"]);

        // Missing folder is an empty list, not an error
        let names = fs.list_matching(&dir.path().join("nope"), "photo").unwrap();
        assert!(names.is_empty());
    }

    #[test]
    fn test_remove_empty_dir_is_guarded() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("sub");
        std::fs::create_dir(&sub).unwrap();
        std::fs::write(sub.join("file"), b"x").unwrap();

        let fs = LocalFs;
        assert!(!fs.remove_empty_dir(&sub));
        assert!(sub.exists());

        std::fs::remove_file(sub.join("file")).unwrap();
        assert!(fs.remove_empty_dir(&sub));
        assert!(!sub.exists());
    }

    #[test]
    fn test_remove_dir_force_removes_contents() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("sub");
        std::fs::create_dir_all(sub.join("nested")).unwrap();
        std::fs::write(sub.join("nested/file"), b"x").unwrap();

        let fs = LocalFs;
        fs.remove_dir_force(&sub).unwrap();
        assert!(!sub.exists());

        // Removing a missing directory is a no-op success
        fs.remove_dir_force(&sub).unwrap();
    }

    #[test]
    fn test_mkdir_all_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a/b/c");

        let fs = LocalFs;
        fs.mkdir_all(&nested).unwrap();
        fs.mkdir_all(&nested).unwrap();
        assert!(nested.is_dir());
    }
}
