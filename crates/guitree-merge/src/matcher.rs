//! Sibling matching between a base and an overlay tree.
//!
//! Two elements correspond when they have the same kind and name, and for
//! containers also the same tag (ASCII case-insensitive). Actions and
//! MergeLocal markers never serve as anchors: they carry no child structure
//! to merge.

use guitree_types::{ElementKind, Node, NodeId, UiTree};

/// Returns `true` if `candidate` may anchor a merge of `target`.
pub fn corresponds(candidate: &Node, target: &Node) -> bool {
    if matches!(candidate.kind, ElementKind::Action | ElementKind::MergeLocal) {
        return false;
    }
    candidate.kind == target.kind
        && candidate.name == target.name
        && (!candidate.kind.is_container() || candidate.tag.eq_ignore_ascii_case(&target.tag))
}

/// Find the first node among `siblings` of `tree` that corresponds to
/// `target`.
///
/// `target` usually lives in the other tree of the merge. The lookup is pure.
pub fn find_match(tree: &UiTree, siblings: &[NodeId], target: &Node) -> Option<NodeId> {
    siblings
        .iter()
        .copied()
        .find(|id| corresponds(tree.node(*id), target))
}

#[cfg(test)]
mod tests {
    use super::*;
    use guitree_types::Element;

    fn overlay() -> UiTree {
        UiTree::from(Element::container("MainWindow", "main").with_children(vec![
            Element::action("file"),
            Element::merge_local("file"),
            Element::toolbar("file"),
            Element::menu("file"),
            Element::menu("edit"),
            Element::separator(),
        ]))
    }

    fn target(element: Element) -> Node {
        let tree = UiTree::from(element);
        tree.node(tree.root()).clone()
    }

    #[test]
    fn matches_container_by_tag_and_name() {
        let tree = overlay();
        let siblings = tree.children(tree.root());
        let found = find_match(&tree, siblings, &target(Element::menu("file"))).unwrap();
        assert_eq!(found, siblings[3]);
    }

    #[test]
    fn tag_comparison_ignores_case() {
        let tree = overlay();
        let siblings = tree.children(tree.root());
        let found = find_match(&tree, siblings, &target(Element::container("TOOLBAR", "file")));
        assert_eq!(found, Some(siblings[2]));
    }

    #[test]
    fn actions_and_merge_locals_are_never_anchors() {
        let tree = overlay();
        let siblings = tree.children(tree.root());
        assert_eq!(find_match(&tree, siblings, &target(Element::action("file"))), None);
        assert_eq!(
            find_match(&tree, siblings, &target(Element::merge_local("file"))),
            None
        );
    }

    #[test]
    fn separators_match_by_kind() {
        let tree = overlay();
        let siblings = tree.children(tree.root());
        assert_eq!(
            find_match(&tree, siblings, &target(Element::separator())),
            Some(siblings[5])
        );
    }

    #[test]
    fn missing_name_or_kind_gives_none() {
        let tree = overlay();
        let siblings = tree.children(tree.root());
        assert_eq!(find_match(&tree, siblings, &target(Element::menu("help"))), None);
        assert_eq!(find_match(&tree, siblings, &target(Element::merge())), None);
        assert_eq!(find_match(&tree, &[], &target(Element::menu("file"))), None);
    }
}
