//! Event type definitions for progress reporting.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// All events emitted during a scan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    /// Catalog listing events
    List(ListEvent),
    /// Scan-level events
    Scan(ScanEvent),
}

/// Events from the page-by-page catalog traversal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ListEvent {
    /// Listing started, possibly from a checkpoint token
    Started { resume_token: Option<String> },
    /// A page was fetched and ingested
    PageFetched {
        page_index: usize,
        records: usize,
        total_records: u64,
    },
    /// Listing reached the last page
    Completed {
        pages: usize,
        total_records: u64,
    },
    /// A page fetch failed; the scan aborts
    Failed { page_index: usize, message: String },
}

/// Scan lifecycle events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ScanEvent {
    /// A scan began
    Started { scan_id: Uuid },
    /// The scan finished and a report is available
    Completed { scan_id: Uuid, summary: ScanSummary },
    /// The scan aborted with no report
    Failed { scan_id: Uuid, message: String },
}

/// Summary of a completed scan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanSummary {
    /// Total records observed, including checksum-less ones
    pub total_files_scanned: u64,
    /// Duplicate groups found
    pub duplicate_groups: usize,
    /// Files safe to remove
    pub reapable_files: u64,
    /// Bytes reclaimed by removing them
    pub reapable_bytes: u64,
    /// Duration in milliseconds
    pub duration_ms: u64,
}
