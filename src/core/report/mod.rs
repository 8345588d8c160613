//! # Report Module
//!
//! The aggregate result of a scan and its human-readable rendering.
//!
//! A [`ScanReport`] is built by the deduplicator and read-only afterward.
//! The renderers turn it into a plain-text or HTML message body for the
//! notification boundary; no persisted format is owned here.

mod render;

pub use render::{render_html, render_text};

use crate::core::catalog::FileId;
use serde::{Deserialize, Serialize};

/// Aggregate result of one scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanReport {
    /// Total records observed, including those with no checksum.
    pub total_files_scanned: u64,
    /// Files safe to remove: sum over groups of (members - 1).
    pub reapable_file_count: u64,
    /// Bytes reclaimed by removing them.
    pub reapable_bytes: u64,
    /// Ids of every reapable file, in group discovery order then
    /// within-group arrival order. Never contains a kept file.
    pub reapable_file_ids: Vec<FileId>,
    /// Per-group detail for the rendered message.
    pub groups: Vec<GroupSummary>,
    /// Checksums observed with more than one size. Such observations are
    /// kept in separate groups and surfaced here for operator review.
    pub checksum_size_conflicts: Vec<String>,
}

impl ScanReport {
    /// Whether the scan found anything reapable.
    pub fn has_duplicates(&self) -> bool {
        self.reapable_file_count > 0
    }
}

/// A file referenced by the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    pub id: FileId,
    pub title: String,
}

/// One duplicate group: the kept file and its reapable copies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupSummary {
    /// Content checksum shared by every member.
    pub checksum: String,
    /// Byte size of one member (all members agree by construction).
    pub size: u64,
    /// The member the keeper policy chose to keep.
    pub kept: FileEntry,
    /// Everything else - the reapable copies.
    pub reapable: Vec<FileEntry>,
}

/// Storage quota figures reported by the remote drive, rendered alongside
/// the report when available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageQuota {
    pub used_bytes: u64,
    pub total_bytes: u64,
}
