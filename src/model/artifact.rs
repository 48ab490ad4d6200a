//! Uploaded artifact metadata.

/// An uploaded file as the layout engine sees it: identity, its source
/// filename, and where it currently lives.
#[derive(Debug, Clone)]
pub struct Artifact {
    /// Numeric media id.
    pub id: u64,
    /// Filename the artifact was uploaded under.
    pub source_filename: String,
    /// File extension, without the dot. May be empty.
    pub extension: String,
    /// Current storage id: '/'-separated relative path without
    /// extension, unique within the original root.
    pub storage_id: String,
}

impl Artifact {
    pub fn new(
        id: u64,
        source_filename: impl Into<String>,
        extension: impl Into<String>,
        storage_id: impl Into<String>,
    ) -> Self {
        Self {
            id,
            source_filename: source_filename.into(),
            extension: extension.into(),
            storage_id: storage_id.into(),
        }
    }

    /// The source filename without its extension.
    pub fn source_stem(&self) -> &str {
        match self.source_filename.rfind('.') {
            Some(0) | None => &self.source_filename,
            Some(pos) => &self.source_filename[..pos],
        }
    }

    /// The filename the original file is currently stored under,
    /// relative to the original root.
    pub fn current_filename(&self) -> String {
        append_extension(&self.storage_id, &self.extension)
    }
}

/// Join a stem and an extension, tolerating an empty extension.
pub fn append_extension(stem: &str, extension: &str) -> String {
    if extension.is_empty() {
        stem.to_string()
    } else {
        format!("{}.{}", stem, extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_stem() {
        let artifact = Artifact::new(1, "photo.final.jpeg", "jpeg", "a/photo.final");
        assert_eq!(artifact.source_stem(), "photo.final");

        let bare = Artifact::new(2, "README", "", "b/README");
        assert_eq!(bare.source_stem(), "README");

        let dotfile = Artifact::new(3, ".htaccess", "", "c/.htaccess");
        assert_eq!(dotfile.source_stem(), ".htaccess");
    }

    #[test]
    fn test_current_filename() {
        let artifact = Artifact::new(1, "photo.jpg", "jpg", "a/photo");
        assert_eq!(artifact.current_filename(), "a/photo.jpg");

        let bare = Artifact::new(2, "README", "", "b/README");
        assert_eq!(bare.current_filename(), "b/README");
    }
}
