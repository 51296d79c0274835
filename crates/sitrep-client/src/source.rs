//! The document-source seam.

use async_trait::async_trait;
use sitrep_core::PageMeta;

use crate::error::ClientError;

/// A fetched page: metadata plus the raw storage-format body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceDocument {
    pub title: String,
    pub version: u64,
    pub last_modified: Option<String>,
    pub body: String,
}

impl SourceDocument {
    #[must_use]
    pub fn meta(&self) -> PageMeta {
        PageMeta {
            title: self.title.clone(),
            version: self.version,
            last_modified: self.last_modified.clone(),
        }
    }
}

/// Where the situation page comes from.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    async fn fetch(&self) -> Result<SourceDocument, ClientError>;
}
