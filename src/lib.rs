//! # Drive Reaper
//!
//! Finds reclaimable duplicate files in a remote drive catalog and reports
//! which ones are safe to remove.
//!
//! ## Core Philosophy
//! - **Never delete** - the engine only identifies reapable files
//! - **Pure computation** - transport, auth, and delivery stay behind traits
//! - **Deterministic** - the same catalog in the same order yields the same report
//!
//! ## Architecture
//! The library is split into a core engine and thin boundary layers:
//! - `core::catalog` - File records and the paginated lister abstraction
//! - `core::dedup` - Groups records by content identity
//! - `core::report` - The scan report and its text/HTML rendering
//! - `core::scan` - Drives a lister page-by-page through the deduplicator
//! - `events` - Event-driven progress reporting (GUI-ready)
//! - `notify` - Outbound message delivery boundary
//! - `error` - Error types

pub mod core;
pub mod error;
pub mod events;
pub mod notify;

// Re-export commonly used types at the crate root
pub use error::{ReaperError, Result};

/// Initialize tracing for the library
///
/// This should be called by the application entry point (CLI or GUI).
pub fn init_tracing() {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set global default tracing subscriber");
}
