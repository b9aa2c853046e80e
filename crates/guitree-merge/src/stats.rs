//! Counters reported by merge passes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Counters collected during one or more merge passes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeStats {
    /// Actions removed because their command does not exist.
    pub actions_pruned: usize,
    /// Separators flagged weak by a pass.
    pub separators_weakened: usize,
    /// Separators removed as redundant.
    pub separators_collapsed: usize,
    /// Overlay nodes inserted at a MergeLocal marker.
    pub nodes_spliced: usize,
    /// Overlay nodes appended after the base children.
    pub nodes_appended: usize,
    /// Base containers that found an overlay counterpart.
    pub containers_matched: usize,
    /// Base containers removed because nothing live was left in them.
    pub containers_pruned: usize,
}

impl MergeStats {
    /// Add another set of counters into this one.
    pub fn absorb(&mut self, other: &MergeStats) {
        self.actions_pruned += other.actions_pruned;
        self.separators_weakened += other.separators_weakened;
        self.separators_collapsed += other.separators_collapsed;
        self.nodes_spliced += other.nodes_spliced;
        self.nodes_appended += other.nodes_appended;
        self.containers_matched += other.containers_matched;
        self.containers_pruned += other.containers_pruned;
    }

    /// Returns `true` if the pass changed nothing.
    pub fn is_noop(&self) -> bool {
        *self == Self::default()
    }
}

impl fmt::Display for MergeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} matched, {} spliced, {} appended, {} actions pruned, {} containers pruned, {} separators weakened, {} collapsed",
            self.containers_matched,
            self.nodes_spliced,
            self.nodes_appended,
            self.actions_pruned,
            self.containers_pruned,
            self.separators_weakened,
            self.separators_collapsed,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absorb_sums_counters() {
        let mut total = MergeStats {
            actions_pruned: 1,
            nodes_spliced: 2,
            ..Default::default()
        };
        total.absorb(&MergeStats {
            actions_pruned: 3,
            separators_weakened: 2,
            containers_pruned: 1,
            ..Default::default()
        });
        assert_eq!(total.actions_pruned, 4);
        assert_eq!(total.nodes_spliced, 2);
        assert_eq!(total.containers_pruned, 1);
        assert_eq!(total.separators_weakened, 2);
        assert!(!total.is_noop());
        assert!(MergeStats::default().is_noop());
    }

    #[test]
    fn display_lists_counters() {
        let stats = MergeStats {
            nodes_appended: 5,
            ..Default::default()
        };
        assert!(stats.to_string().contains("5 appended"));
    }
}
