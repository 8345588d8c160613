//! # Catalog Module
//!
//! File records and the paginated lister abstraction.
//!
//! A remote drive exposes its file catalog one page at a time, each page
//! carrying an opaque continuation token for the next. This module wraps
//! that contract behind [`CatalogLister`] so the deduplication engine never
//! deals with transport or token mechanics directly.

mod lister;
mod snapshot;

pub use lister::{CatalogLister, Pages, StaticCatalog};
pub use snapshot::{SnapshotCatalog, DEFAULT_PAGE_SIZE};

use serde::{Deserialize, Serialize};

/// Opaque stable identifier of a remote file.
///
/// Unique per remote file, not per content: two files with identical bytes
/// have different ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileId(pub String);

impl FileId {
    pub fn new(id: impl Into<String>) -> Self {
        FileId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for FileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Opaque continuation token returned by a paginated listing API.
///
/// Tokens are stable: a caller may persist one and resume listing from it
/// in a later scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageToken(pub String);

impl PageToken {
    pub fn new(token: impl Into<String>) -> Self {
        PageToken(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One remote file observation.
///
/// Created fresh for each page fetched, folded into the grouping index,
/// then discarded; nothing beyond the scan retains it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Opaque stable identifier.
    pub id: FileId,
    /// Display name. Informational only, never part of content identity.
    pub title: String,
    /// Content hash. Empty means "unknown content" - folders and
    /// provider-native document types carry no checksum.
    #[serde(default)]
    pub checksum: String,
    /// Byte length.
    #[serde(default)]
    pub size: u64,
}

impl FileRecord {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        checksum: impl Into<String>,
        size: u64,
    ) -> Self {
        Self {
            id: FileId::new(id),
            title: title.into(),
            checksum: checksum.into(),
            size,
        }
    }

    /// The grouping key for this record, or `None` when the content is
    /// unknown (empty checksum) and the record is excluded from dedup.
    pub fn content_key(&self) -> Option<ContentKey> {
        if self.checksum.is_empty() {
            None
        } else {
            Some(ContentKey {
                checksum: self.checksum.clone(),
                size: self.size,
            })
        }
    }
}

/// Content identity: the (checksum, size) pair that decides two files are
/// duplicates.
///
/// Including the size in the key means a checksum observed with two
/// different sizes lands in two distinct groups - conflicting observations
/// are never merged. In practice the checksum alone determines the size;
/// the engine flags checksums that violate that (see `core::dedup`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentKey {
    pub checksum: String,
    pub size: u64,
}

/// One page of catalog records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogPage {
    /// Records on this page, in catalog order.
    pub records: Vec<FileRecord>,
    /// Token for the next page; `None` signals end of data.
    pub next_token: Option<PageToken>,
}
