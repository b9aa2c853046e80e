//! The recursive base/overlay merge.
//!
//! [`MergeEngine`] folds an overlay document into a base document in place.
//! Each container of the base is walked once, in order:
//!
//! - Actions whose command is not registered are removed.
//! - Separators become weak; a weak separator directly after another weak
//!   separator is removed.
//! - A MergeLocal marker is replaced by the overlay children addressed to it.
//! - Containers are merged recursively with their overlay counterpart (or
//!   with nothing) and removed when the recursion reports them prunable.
//!
//! Overlay children that were neither spliced nor matched are then appended,
//! and the container reports whether anything live is left in it.
//!
//! Contributed nodes go through the same walk as base children, against an
//! empty overlay, so an unregistered overlay action never reaches the result
//! and a second pass over the merged tree changes nothing.
//!
//! # Invariants
//!
//! - The overlay tree is never modified; contributed nodes are deep copies.
//! - Surviving base children keep their relative order.
//! - An overlay node is contributed at most once per pass.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use guitree_types::{ElementKind, NodeId, UiTree};

use crate::config::MergeConfig;
use crate::matcher::find_match;
use crate::registry::CommandRegistry;
use crate::stats::MergeStats;

/// Result of a merge call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeOutcome {
    /// `true` if the merged node holds nothing live and may be removed by
    /// its parent.
    pub prunable: bool,
    /// Counters for the work done.
    pub stats: MergeStats,
}

/// Merges overlay documents into a base document against a command registry.
#[derive(Clone, Debug)]
pub struct MergeEngine<R> {
    registry: R,
    config: MergeConfig,
}

impl<R: CommandRegistry> MergeEngine<R> {
    /// Engine with the default [`MergeConfig`].
    pub fn new(registry: R) -> Self {
        Self::with_config(registry, MergeConfig::default())
    }

    /// Engine with an explicit policy.
    pub fn with_config(registry: R, config: MergeConfig) -> Self {
        Self { registry, config }
    }

    /// The active policy.
    pub fn config(&self) -> &MergeConfig {
        &self.config
    }

    /// The registry consulted for Actions.
    pub fn registry(&self) -> &R {
        &self.registry
    }

    /// Merge `overlay` into `base`, root onto root.
    ///
    /// Returns `true` if the merged root is prunable.
    pub fn merge(&self, base: &mut UiTree, overlay: &UiTree) -> bool {
        self.merge_with_stats(base, overlay).prunable
    }

    /// Like [`merge`](Self::merge), also reporting counters.
    pub fn merge_with_stats(&self, base: &mut UiTree, overlay: &UiTree) -> MergeOutcome {
        let base_root = base.root();
        self.merge_node(base, base_root, overlay, Some(overlay.root()))
    }

    /// Merge the overlay subtree at `overlay_id` into the base subtree at
    /// `base_id`. `None` merges against an empty overlay, which only prunes.
    ///
    /// The caller removes `base_id` from its parent if the outcome is
    /// prunable.
    pub fn merge_node(
        &self,
        base: &mut UiTree,
        base_id: NodeId,
        overlay: &UiTree,
        overlay_id: Option<NodeId>,
    ) -> MergeOutcome {
        let mut pass = Pass {
            engine: self,
            overlay,
            visited: HashSet::new(),
            contributed: HashSet::new(),
            stats: MergeStats::default(),
        };
        let prunable = pass.merge(base, base_id, overlay_id);
        debug!(
            base = %base.node(base_id).label(),
            prunable,
            stats = %pass.stats,
            "merge pass complete"
        );
        MergeOutcome {
            prunable,
            stats: pass.stats,
        }
    }

    /// Merge against an empty overlay: drop unregistered actions, weaken
    /// separators and remove containers left empty.
    pub fn prune(&self, base: &mut UiTree) -> MergeOutcome {
        let empty = UiTree::empty("", "");
        let base_root = base.root();
        self.merge_node(base, base_root, &empty, None)
    }

    /// Merge each overlay into `base` in order.
    ///
    /// With no overlays this is [`prune`](Self::prune). The returned
    /// prunability is that of the last pass; counters are summed.
    ///
    /// Removed and replaced nodes stay allocated in `base`; call
    /// [`UiTree::compact`] to reclaim them after many passes.
    pub fn merge_all<'a, I>(&self, base: &mut UiTree, overlays: I) -> MergeOutcome
    where
        I: IntoIterator<Item = &'a UiTree>,
    {
        let mut outcome: Option<MergeOutcome> = None;
        for overlay in overlays {
            let pass = self.merge_with_stats(base, overlay);
            outcome = Some(match outcome {
                Some(mut total) => {
                    total.prunable = pass.prunable;
                    total.stats.absorb(&pass.stats);
                    total
                }
                None => pass,
            });
        }
        match outcome {
            Some(outcome) => outcome,
            None => self.prune(base),
        }
    }

    /// Returns `true` if nothing among `id`'s children keeps it alive.
    ///
    /// Registered actions, non-weak separators, Merge markers, containers
    /// and MergeLocal markers are live; Text and weak separators are not.
    pub fn is_prunable(&self, tree: &UiTree, id: NodeId) -> bool {
        tree.children(id).iter().all(|child| {
            let node = tree.node(*child);
            match node.kind {
                ElementKind::Action => !self.registry.exists(&node.name),
                ElementKind::Separator => node.weak_separator,
                ElementKind::Text => true,
                ElementKind::Merge | ElementKind::MergeLocal | ElementKind::Container => false,
            }
        })
    }
}

/// Merge `overlay` into `base` with the default policy.
///
/// Returns `true` if the merged root is prunable.
pub fn merge<R: CommandRegistry>(base: &mut UiTree, overlay: &UiTree, registry: R) -> bool {
    MergeEngine::new(registry).merge(base, overlay)
}

/// State of one top-level merge call.
struct Pass<'e, R> {
    engine: &'e MergeEngine<R>,
    overlay: &'e UiTree,
    /// Overlay nodes already matched or contributed.
    visited: HashSet<NodeId>,
    /// Base copies of contributed overlay nodes.
    contributed: HashSet<NodeId>,
    stats: MergeStats,
}

impl<R: CommandRegistry> Pass<'_, R> {
    fn merge(&mut self, base: &mut UiTree, base_id: NodeId, overlay_id: Option<NodeId>) -> bool {
        let overlay = self.overlay;
        let engine = self.engine;
        let config = &engine.config;
        let overlay_children: &[NodeId] = match overlay_id {
            Some(id) => overlay.children(id),
            None => &[],
        };

        if let Some(id) = overlay_id {
            if config.merge_attributes {
                let attributes = &overlay.node(id).attributes;
                if !attributes.is_empty() {
                    base.node_mut(base_id)
                        .attributes
                        .extend(attributes.iter().map(|(k, v)| (k.clone(), v.clone())));
                }
            }
        }

        self.walk(base, base_id, 0, overlay_children);

        let appended_from = base.children(base_id).len();
        for &candidate in overlay_children {
            let node = overlay.node(candidate);
            if node.kind == ElementKind::Text || self.visited.contains(&candidate) {
                continue;
            }
            if find_match(base, base.children(base_id), node).is_some() {
                continue;
            }
            trace!(node = %node.label(), parent = %base.node(base_id).label(), "appending overlay node");
            let copy = base.graft(overlay, candidate);
            base.push_child(base_id, copy);
            self.visited.insert(candidate);
            self.contributed.insert(copy);
            self.stats.nodes_appended += 1;
        }
        self.walk(base, base_id, appended_from, &[]);

        if config.drop_trailing_weak_separator {
            if let Some(&last) = base.children(base_id).last() {
                if base.node(last).is_weak_separator() {
                    let last_index = base.children(base_id).len() - 1;
                    base.remove_child(base_id, last_index);
                    self.stats.separators_collapsed += 1;
                }
            }
        }

        engine.is_prunable(base, base_id)
    }

    /// Step 1 over the children of `base_id` from `from` on.
    ///
    /// Nodes contributed by this pass are walked against an empty overlay.
    fn walk(&mut self, base: &mut UiTree, base_id: NodeId, from: usize, overlay_children: &[NodeId]) {
        let engine = self.engine;
        let mut index = from;
        while index < base.children(base_id).len() {
            let child = base.children(base_id)[index];
            let source: &[NodeId] = if self.contributed.contains(&child) {
                &[]
            } else {
                overlay_children
            };
            match base.node(child).kind {
                ElementKind::Action => {
                    if !engine.registry.exists(&base.node(child).name) {
                        trace!(action = %base.node(child).name, "pruning unregistered action");
                        base.remove_child(base_id, index);
                        self.stats.actions_pruned += 1;
                        continue;
                    }
                }
                ElementKind::Separator => {
                    let node = base.node_mut(child);
                    if !node.weak_separator {
                        node.weak_separator = true;
                        self.stats.separators_weakened += 1;
                    }
                    if self.separator_is_redundant(base, base_id, index) {
                        trace!(parent = %base.node(base_id).label(), index, "collapsing separator");
                        base.remove_child(base_id, index);
                        self.stats.separators_collapsed += 1;
                        continue;
                    }
                }
                ElementKind::MergeLocal => {
                    // The spliced nodes take the marker's place and are walked next.
                    self.splice(base, base_id, index, source);
                    continue;
                }
                ElementKind::Merge | ElementKind::Text => {}
                ElementKind::Container => {
                    let counterpart = find_match(self.overlay, source, base.node(child));
                    if let Some(matched) = counterpart {
                        self.visited.insert(matched);
                        self.stats.containers_matched += 1;
                    }
                    if self.merge(base, child, counterpart) {
                        trace!(container = %base.node(child).label(), "pruning empty container");
                        base.remove_child(base_id, index);
                        self.stats.containers_pruned += 1;
                        continue;
                    }
                }
            }
            index += 1;
        }
    }

    /// Whether the separator at `index` duplicates what precedes it.
    fn separator_is_redundant(&self, base: &UiTree, parent: NodeId, index: usize) -> bool {
        let drop_leading = self.engine.config.drop_leading_separators;
        match index.checked_sub(1) {
            Some(prev) => {
                let prev = base.node(base.children(parent)[prev]);
                prev.is_weak_separator() || (drop_leading && prev.kind == ElementKind::Text)
            }
            None => drop_leading,
        }
    }

    /// Replace the MergeLocal marker at `index` with the overlay children
    /// addressed to it.
    fn splice(
        &mut self,
        base: &mut UiTree,
        base_id: NodeId,
        index: usize,
        overlay_children: &[NodeId],
    ) {
        let overlay = self.overlay;
        let marker = base.children(base_id)[index];
        let target = base.node(marker).name.clone();

        let mut at = index;
        for &candidate in overlay_children {
            let node = overlay.node(candidate);
            if node.kind == ElementKind::Text
                || self.visited.contains(&candidate)
                || node.append != target
            {
                continue;
            }
            // Nodes with a base counterpart are merged when that counterpart
            // is reached.
            if node.kind != ElementKind::Separator
                && find_match(base, base.children(base_id), node).is_some()
            {
                continue;
            }
            trace!(node = %node.label(), marker = %target, "splicing overlay node");
            let copy = base.graft(overlay, candidate);
            base.insert_child(base_id, at, copy);
            self.visited.insert(candidate);
            self.contributed.insert(copy);
            self.stats.nodes_spliced += 1;
            at += 1;
        }

        base.remove_child(base_id, at);
    }
}
