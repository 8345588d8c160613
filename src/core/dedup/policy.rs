//! Keeper selection policies.
//!
//! Every duplicate group keeps exactly one member; the rest are reapable.
//! Which member is kept is a policy decision made once per group, injected
//! into the deduplicator so alternate policies can be swapped in without
//! touching the grouping logic.

use super::GroupMember;

/// Strategy trait for choosing which member of a duplicate group to keep.
///
/// Implementations must be deterministic given a fixed member order, so a
/// scan over the same catalog in the same order always produces the same
/// report.
pub trait KeeperPolicy: Send + Sync {
    /// Index of the member to keep. `members` is in arrival order and has
    /// at least two entries.
    fn keeper(&self, members: &[GroupMember]) -> usize;

    /// Human-readable description of the policy
    fn description(&self) -> String;
}

/// Keep the first-seen member of each group (the default).
///
/// Matches the convention that the earliest-listed file is the original
/// and later arrivals are the copies.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstSeen;

impl KeeperPolicy for FirstSeen {
    fn keeper(&self, _members: &[GroupMember]) -> usize {
        0
    }

    fn description(&self) -> String {
        "keep the first-seen file in each group".to_string()
    }
}

/// Keep the last-seen member of each group.
#[derive(Debug, Clone, Copy, Default)]
pub struct LastSeen;

impl KeeperPolicy for LastSeen {
    fn keeper(&self, members: &[GroupMember]) -> usize {
        members.len().saturating_sub(1)
    }

    fn description(&self) -> String {
        "keep the last-seen file in each group".to_string()
    }
}
