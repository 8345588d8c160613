//! # Dedup Module
//!
//! Groups file records by content identity and computes the scan report.
//!
//! ## How It Works
//! 1. Records are ingested page-by-page, appended to the group for their
//!    (checksum, size) key in arrival order
//! 2. Records without a checksum count as scanned but never enter a group
//! 3. Finalizing walks the groups: every group with two or more members
//!    keeps one file (per the keeper policy) and marks the rest reapable
//!
//! The deduplicator is pure and deterministic given an ordered input
//! sequence; it holds no network state. The whole catalog's id/checksum/
//! size data stays in memory for the duration of a scan, which bounds
//! practical use to catalogs whose metadata fits in memory.

mod policy;

pub use policy::{FirstSeen, KeeperPolicy, LastSeen};

use crate::core::catalog::{ContentKey, FileId, FileRecord};
use crate::core::report::{FileEntry, GroupSummary, ScanReport};
use crate::error::DedupError;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use tracing::warn;

/// One member of a duplicate group, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupMember {
    pub id: FileId,
    /// Kept for the rendered report; never part of content identity.
    pub title: String,
}

/// Scan lifecycle states.
///
/// `NotStarted -> Scanning -> Finalized`, with no way back: a new scan
/// requires a new deduplicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    NotStarted,
    Scanning,
    Finalized,
}

struct Group {
    key: ContentKey,
    members: Vec<GroupMember>,
}

/// The duplicate detection engine.
///
/// Accumulates records across pages and computes a [`ScanReport`] on
/// finalize. One instance per scan; independent scans may run concurrently
/// in separate instances with no shared state.
pub struct Deduplicator {
    /// Groups in discovery order.
    groups: Vec<Group>,
    index: HashMap<ContentKey, usize>,
    /// First size observed per checksum, to flag conflicting observations.
    size_by_checksum: HashMap<String, u64>,
    conflicted_checksums: BTreeSet<String>,
    total_files_scanned: u64,
    state: ScanState,
    policy: Arc<dyn KeeperPolicy>,
}

impl Deduplicator {
    /// A deduplicator with the default first-seen keeper policy.
    pub fn new() -> Self {
        Self::with_policy(Arc::new(FirstSeen))
    }

    /// A deduplicator with an injected keeper policy.
    pub fn with_policy(policy: Arc<dyn KeeperPolicy>) -> Self {
        Self {
            groups: Vec::new(),
            index: HashMap::new(),
            size_by_checksum: HashMap::new(),
            conflicted_checksums: BTreeSet::new(),
            total_files_scanned: 0,
            state: ScanState::NotStarted,
            policy,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ScanState {
        self.state
    }

    /// Records observed so far, including checksum-less ones.
    pub fn total_files_scanned(&self) -> u64 {
        self.total_files_scanned
    }

    /// Fold one page of records into the grouping index.
    ///
    /// Every record counts toward `total_files_scanned`; only records with
    /// a non-empty checksum join a group. Rejects ingestion after
    /// [`finalize`](Self::finalize) has sealed the scan.
    pub fn ingest(&mut self, records: &[FileRecord]) -> Result<(), DedupError> {
        if self.state == ScanState::Finalized {
            return Err(DedupError::AlreadyFinalized);
        }
        self.state = ScanState::Scanning;
        self.total_files_scanned += records.len() as u64;

        for record in records {
            let Some(key) = record.content_key() else {
                // Unknown content (folders, provider-native docs): scanned
                // but never grouped.
                continue;
            };

            match self.size_by_checksum.get(&key.checksum) {
                Some(&seen) if seen != record.size => {
                    if self.conflicted_checksums.insert(key.checksum.clone()) {
                        warn!(
                            checksum = %key.checksum,
                            first_size = seen,
                            conflicting_size = record.size,
                            "checksum observed with conflicting sizes; keeping groups separate"
                        );
                    }
                }
                Some(_) => {}
                None => {
                    self.size_by_checksum
                        .insert(key.checksum.clone(), record.size);
                }
            }

            let member = GroupMember {
                id: record.id.clone(),
                title: record.title.clone(),
            };
            match self.index.get(&key) {
                Some(&at) => self.groups[at].members.push(member),
                None => {
                    self.index.insert(key.clone(), self.groups.len());
                    self.groups.push(Group {
                        key,
                        members: vec![member],
                    });
                }
            }
        }

        Ok(())
    }

    /// Seal the scan and compute the report.
    ///
    /// Callable mid-scan, in which case the report covers only the pages
    /// ingested so far with no special marking - callers are responsible
    /// for knowing scan completeness. Idempotent: finalizing twice with no
    /// intervening ingest returns an identical report (ingest is rejected
    /// once finalized).
    pub fn finalize(&mut self) -> ScanReport {
        self.state = ScanState::Finalized;

        let mut report = ScanReport {
            total_files_scanned: self.total_files_scanned,
            reapable_file_count: 0,
            reapable_bytes: 0,
            reapable_file_ids: Vec::new(),
            groups: Vec::new(),
            checksum_size_conflicts: self.conflicted_checksums.iter().cloned().collect(),
        };

        for group in &self.groups {
            let members = &group.members;
            if members.len() < 2 {
                continue;
            }

            let keep = self.policy.keeper(members).min(members.len() - 1);
            let reapable: Vec<FileEntry> = members
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != keep)
                .map(|(_, m)| FileEntry {
                    id: m.id.clone(),
                    title: m.title.clone(),
                })
                .collect();

            report.reapable_file_count += reapable.len() as u64;
            // Group members share a size by construction of the key; u64
            // arithmetic because aggregate totals exceed 32-bit range on
            // large catalogs.
            report.reapable_bytes += group.key.size * reapable.len() as u64;
            report
                .reapable_file_ids
                .extend(reapable.iter().map(|e| e.id.clone()));
            report.groups.push(GroupSummary {
                checksum: group.key.checksum.clone(),
                size: group.key.size,
                kept: FileEntry {
                    id: members[keep].id.clone(),
                    title: members[keep].title.clone(),
                },
                reapable,
            });
        }

        report
    }
}

impl Default for Deduplicator {
    fn default() -> Self {
        Self::new()
    }
}
