//! Result of a conditional set insertion.

use serde::{Deserialize, Serialize};

/// Outcome of an "add if absent" mutation on a membership set.
///
/// Stores report whether the element was newly inserted so callers can keep
/// enrollment idempotent without a read-then-write race.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MembershipChange {
    /// The element was not present and has been inserted.
    Added,
    /// The element was already present; nothing changed.
    AlreadyPresent,
}

impl MembershipChange {
    /// Maps the boolean returned by `HashSet::insert` or a row count.
    pub fn from_inserted(inserted: bool) -> Self {
        if inserted {
            MembershipChange::Added
        } else {
            MembershipChange::AlreadyPresent
        }
    }

    pub fn was_added(&self) -> bool {
        matches!(self, MembershipChange::Added)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_inserted_maps_both_ways() {
        assert_eq!(MembershipChange::from_inserted(true), MembershipChange::Added);
        assert_eq!(
            MembershipChange::from_inserted(false),
            MembershipChange::AlreadyPresent
        );
        assert!(MembershipChange::Added.was_added());
        assert!(!MembershipChange::AlreadyPresent.was_added());
    }
}
