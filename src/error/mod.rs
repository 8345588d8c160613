//! # Error Module
//!
//! Error types for the drive reaper.
//!
//! ## Design Principles
//! - **Never panic** on remote data - return errors instead
//! - **Include context** - tokens, file identifiers, what went wrong
//! - **Surface transport failures unmodified** - retries belong to the
//!   transport collaborator, not to this crate

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum ReaperError {
    #[error("Catalog listing error: {0}")]
    List(#[from] ListError),

    #[error("Deduplication error: {0}")]
    Dedup(#[from] DedupError),

    #[error("Notification error: {0}")]
    Notify(#[from] NotifyError),

    #[error("Catalog snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Errors that occur while fetching pages from a catalog lister
#[derive(Error, Debug)]
pub enum ListError {
    /// The remote call failed (network, auth expiry, quota).
    ///
    /// Propagated unmodified to the caller; the in-progress scan aborts
    /// with no partial report.
    #[error("catalog fetch failed: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("continuation token not recognized: {token:?}")]
    BadToken { token: String },
}

impl ListError {
    /// Wrap any transport-layer error.
    pub fn transport<E>(source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        ListError::Transport(Box::new(source))
    }
}

/// Errors from the deduplication engine
#[derive(Error, Debug)]
pub enum DedupError {
    #[error("scan already finalized; start a new scan with a new deduplicator")]
    AlreadyFinalized,
}

/// Errors that occur while delivering a report message
#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("failed to deliver message to {recipient}: {reason}")]
    DeliveryFailed { recipient: String, reason: String },
}

/// Errors that occur while loading a catalog snapshot file
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("failed to read catalog snapshot {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("catalog snapshot {path} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Convenience Result type alias
pub type Result<T> = std::result::Result<T, ReaperError>;
