//! # Core Module
//!
//! The duplicate detection engine.
//!
//! ## Modules
//! - `catalog` - File records and the paginated lister abstraction
//! - `dedup` - Groups records by content identity
//! - `report` - The scan report and its rendering
//! - `scan` - Drives a lister page-by-page through the deduplicator

pub mod catalog;
pub mod dedup;
pub mod report;
pub mod scan;

// Re-export commonly used types
pub use catalog::{CatalogLister, CatalogPage, ContentKey, FileId, FileRecord, PageToken};
pub use dedup::{Deduplicator, FirstSeen, KeeperPolicy, LastSeen, ScanState};
pub use report::{GroupSummary, ScanReport, StorageQuota};
pub use scan::{ScanOutcome, ScanRunner};
