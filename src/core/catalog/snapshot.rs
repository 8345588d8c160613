//! A lister backed by a JSON catalog snapshot on disk.
//!
//! Snapshots are a JSON array of file records, e.g. an export of a remote
//! listing. The snapshot is paged by a configurable page size so the rest
//! of the system sees exactly the same contract a live remote lister
//! presents, continuation tokens included.

use super::{CatalogLister, CatalogPage, FileRecord, PageToken};
use crate::error::{ListError, SnapshotError};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Default records per page, matching common remote listing page limits.
pub const DEFAULT_PAGE_SIZE: usize = 1000;

/// A [`CatalogLister`] over a JSON snapshot file.
pub struct SnapshotCatalog {
    records: Vec<FileRecord>,
    page_size: usize,
}

impl SnapshotCatalog {
    /// Load a snapshot from disk.
    pub fn load(path: &Path, page_size: usize) -> Result<Self, SnapshotError> {
        let file = File::open(path).map_err(|source| SnapshotError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let records = serde_json::from_reader(BufReader::new(file)).map_err(|source| {
            SnapshotError::Parse {
                path: path.to_path_buf(),
                source,
            }
        })?;
        Ok(Self::from_records(records, page_size))
    }

    /// Build a snapshot catalog from records already in memory.
    pub fn from_records(records: Vec<FileRecord>, page_size: usize) -> Self {
        Self {
            records,
            page_size: page_size.max(1),
        }
    }

    /// Total records in the snapshot.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl CatalogLister for SnapshotCatalog {
    fn fetch_page(&mut self, token: Option<&PageToken>) -> Result<CatalogPage, ListError> {
        let offset = match token {
            None => 0,
            Some(token) => {
                let offset: usize =
                    token.as_str().parse().map_err(|_| ListError::BadToken {
                        token: token.as_str().to_string(),
                    })?;
                if offset >= self.records.len() && offset != 0 {
                    return Err(ListError::BadToken {
                        token: token.as_str().to_string(),
                    });
                }
                offset
            }
        };

        let end = (offset + self.page_size).min(self.records.len());
        let records = self.records[offset..end].to_vec();
        let next_token = if end < self.records.len() {
            Some(PageToken::new(end.to_string()))
        } else {
            None
        };

        Ok(CatalogPage {
            records,
            next_token,
        })
    }
}
