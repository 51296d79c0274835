//! Local storage-format files as a document source.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::ClientError;
use crate::source::{DocumentSource, SourceDocument};

/// A page exported to disk. Title is the file stem, version is 0.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl DocumentSource for FileSource {
    async fn fetch(&self) -> Result<SourceDocument, ClientError> {
        let io_err = |source| ClientError::Io {
            path: self.path.clone(),
            source,
        };
        let body = tokio::fs::read_to_string(&self.path).await.map_err(io_err)?;
        let last_modified = tokio::fs::metadata(&self.path)
            .await
            .ok()
            .and_then(|meta| meta.modified().ok())
            .map(|time| DateTime::<Utc>::from(time).to_rfc3339());

        Ok(SourceDocument {
            title: self
                .path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default(),
            version: 0,
            last_modified,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reads_file_with_stem_as_title() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("situation-wall.xml");
        std::fs::write(&path, "<h2>PRIORITIES</h2>").unwrap();

        let doc = FileSource::new(&path).fetch().await.unwrap();
        assert_eq!(doc.title, "situation-wall");
        assert_eq!(doc.version, 0);
        assert_eq!(doc.body, "<h2>PRIORITIES</h2>");
        assert!(doc.last_modified.is_some());
    }

    #[tokio::test]
    async fn missing_file_is_an_io_error() {
        let err = FileSource::new("/nonexistent/page.xml").fetch().await.unwrap_err();
        assert!(matches!(err, ClientError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/page.xml"));
    }
}
