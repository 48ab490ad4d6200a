//! Stable collision avoidance for base filenames.

use std::path::Path;

use crate::archive::fsops::ArchiveFs;
use crate::error::Result;
use crate::model::Artifact;

/// Resolve `stem` to a name unique among files of any extension in
/// `folder` (relative to the original root).
///
/// The artifact's own file never forces a rename: a candidate whose
/// only occupant is the artifact itself is a rename-in-place, and an
/// artifact already sharing its stem with other files keeps its
/// current stem to avoid renaming thrash. Otherwise a numeric `.N`
/// suffix is appended until an unused stem is found.
///
/// There is a window between this probe and the subsequent rename;
/// two concurrent saves computing overlapping candidates can both
/// pass the probe and collide on rename. Accepted for the low
/// concurrency of metadata edits.
pub fn get_single_filename<F: ArchiveFs>(
    fs: &F,
    original_root: &Path,
    folder: &str,
    stem: &str,
    artifact: &Artifact,
) -> Result<String> {
    let dir = if folder.is_empty() {
        original_root.to_path_buf()
    } else {
        original_root.join(folder)
    };

    let matches = fs.list_matching(&dir, stem)?;
    if matches.is_empty() {
        return Ok(stem.to_string());
    }

    let current_name = filename_of(&artifact.current_filename());
    let current_in_folder = folder_of(&artifact.storage_id) == folder;

    if current_in_folder && matches.iter().any(|name| name == &current_name) {
        if matches.len() == 1 {
            // The candidate refers to the artifact's own file
            return Ok(stem.to_string());
        }
        // Several files already share this stem; keep the current one
        return Ok(filename_of(&artifact.storage_id));
    }

    // The name is owned by an unrelated file
    let mut counter = 1u32;
    loop {
        let probe = format!("{}.{}", stem, counter);
        if fs.list_matching(&dir, &probe)?.is_empty() {
            return Ok(probe);
        }
        counter += 1;
    }
}

/// The folder part of a storage id ("" for top-level ids).
pub fn folder_of(storage_id: &str) -> &str {
    match storage_id.rfind('/') {
        Some(pos) => &storage_id[..pos],
        None => "",
    }
}

/// The filename part of a storage id.
pub fn filename_of(storage_id: &str) -> String {
    match storage_id.rfind('/') {
        Some(pos) => storage_id[pos + 1..].to_string(),
        None => storage_id.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::fsops::LocalFs;
    use std::fs as stdfs;
    use tempfile::TempDir;

    fn setup(files: &[&str]) -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        for file in files {
            let path = dir.path().join(file);
            stdfs::create_dir_all(path.parent().unwrap()).unwrap();
            stdfs::write(path, b"x").unwrap();
        }
        dir
    }

    fn resolve(root: &Path, folder: &str, stem: &str, artifact: &Artifact) -> String {
        get_single_filename(&LocalFs, root, folder, stem, artifact).unwrap()
    }

    #[test]
    fn test_free_name_is_kept() {
        let dir = setup(&[]);
        let artifact = Artifact::new(1, "image_test.png", "png", "old/image_test");
        assert_eq!(
            resolve(dir.path(), "My_modified_title", "image_test", &artifact),
            "image_test"
        );
    }

    #[test]
    fn test_own_file_is_not_a_collision() {
        let dir = setup(&["a/photo.jpg"]);
        let artifact = Artifact::new(1, "photo.jpg", "jpg", "a/photo");
        assert_eq!(resolve(dir.path(), "a", "photo", &artifact), "photo");
    }

    #[test]
    fn test_unrelated_owner_gets_suffix() {
        let dir = setup(&["My_modified_title/image_test.png"]);
        let artifact = Artifact::new(2, "image_test.png", "png", "tmp/image_test");
        assert_eq!(
            resolve(dir.path(), "My_modified_title", "image_test", &artifact),
            "image_test.1"
        );
    }

    #[test]
    fn test_suffix_increments_past_taken_names() {
        let dir = setup(&["a/photo.jpg", "a/photo.1.jpg", "a/photo.2.png"]);
        let artifact = Artifact::new(2, "photo.jpg", "jpg", "tmp/photo");
        assert_eq!(resolve(dir.path(), "a", "photo", &artifact), "photo.3");
    }

    #[test]
    fn test_shared_stem_keeps_current_name() {
        // The artifact's own file plus an unrelated one share the stem;
        // renaming again would thrash.
        let dir = setup(&["a/photo.jpg", "a/photo.1.jpg"]);
        let artifact = Artifact::new(1, "photo.jpg", "jpg", "a/photo.1");
        assert_eq!(resolve(dir.path(), "a", "photo", &artifact), "photo.1");
    }

    #[test]
    fn test_collision_across_extensions() {
        let dir = setup(&["a/photo"]);
        let artifact = Artifact::new(2, "photo.jpg", "jpg", "tmp/photo");
        assert_eq!(resolve(dir.path(), "a", "photo", &artifact), "photo.1");
    }

    #[test]
    fn test_folder_and_filename_helpers() {
        assert_eq!(folder_of("a/b/photo"), "a/b");
        assert_eq!(folder_of("photo"), "");
        assert_eq!(filename_of("a/b/photo"), "photo");
        assert_eq!(filename_of("photo"), "photo");
    }
}
