//! Local directory backend.
//!
//! Saves go to `<dir>/<slug>.json`; publishing additionally writes
//! `<dir>/published/<slug>.json` and reports its `file://` URL.

use pagecraft_editor::{PersistenceError, PersistenceGateway, PublishReceipt, SaveReceipt, Snapshot};
use std::path::{Path, PathBuf};

pub struct FileGateway {
    dir: PathBuf,
}

impl FileGateway {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Where a snapshot with `slug` is saved
    pub fn save_path(&self, slug: &str) -> PathBuf {
        self.dir.join(format!("{}.json", file_stem(slug)))
    }

    /// Where a snapshot with `slug` is published
    pub fn publish_path(&self, slug: &str) -> PathBuf {
        self.dir.join("published").join(format!("{}.json", file_stem(slug)))
    }

    fn write(path: &Path, snapshot: &Snapshot) -> Result<(), PersistenceError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(&snapshot.document)?)?;
        Ok(())
    }
}

impl PersistenceGateway for FileGateway {
    fn save(&self, snapshot: &Snapshot) -> Result<SaveReceipt, PersistenceError> {
        let path = self.save_path(&snapshot.slug);
        Self::write(&path, snapshot)?;

        tracing::info!(path = %path.display(), version = snapshot.version, "page saved");
        Ok(SaveReceipt {
            location: Some(path.display().to_string()),
        })
    }

    fn publish(&self, snapshot: &Snapshot) -> Result<PublishReceipt, PersistenceError> {
        self.save(snapshot)?;

        let path = self.publish_path(&snapshot.slug);
        Self::write(&path, snapshot)?;

        let absolute = std::fs::canonicalize(&path).unwrap_or(path);
        tracing::info!(path = %absolute.display(), "page published");
        Ok(PublishReceipt {
            url: Some(format!("file://{}", absolute.display())),
        })
    }
}

/// Slugs come from document metadata; keep them to a single path component
fn file_stem(slug: &str) -> String {
    let stem: String = slug
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '-' })
        .collect();

    if stem.is_empty() {
        "page".to_string()
    } else {
        stem
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_stem_sanitizes_slug() {
        assert_eq!(file_stem("summer-sale"), "summer-sale");
        assert_eq!(file_stem("../etc/passwd"), "---etc-passwd");
        assert_eq!(file_stem(""), "page");
    }
}
