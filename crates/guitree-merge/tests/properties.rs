//! Property-based tests for the merge engine.
//!
//! 1. Idempotence — a second pass against an empty overlay changes nothing,
//!    also after a pass that spliced and appended overlay content
//! 2. Pruning — with no registered command the root is prunable
//! 3. Survival — registered actions all survive, in order
//! 4. Separators — no two weak separators end up adjacent
//! 5. Splicing — MergeLocal content lands at the marker in overlay order

use guitree_merge::{merge, CommandSet, MergeConfig, MergeEngine};
use guitree_types::{Element, ElementKind, UiTree};
use proptest::prelude::*;

const POOL: &[&str] = &["file_new", "file_open", "file_save", "edit_copy", "edit_paste", "help"];

// ── Strategies ──────────────────────────────────────────────────────────

fn leaf() -> impl Strategy<Value = Element> {
    prop_oneof![
        4 => prop::sample::select(POOL).prop_map(Element::action),
        2 => Just(Element::separator()),
        1 => Just(Element::text("label")),
        1 => Just(Element::merge_local("")),
    ]
}

fn subtree() -> impl Strategy<Value = Element> {
    leaf().prop_recursive(3, 48, 6, |inner| {
        prop::collection::vec(inner, 0..6)
            .prop_map(|children| Element::menu("").with_children(children))
    })
}

/// Give every container a name unique among its siblings.
fn name_containers(element: &mut Element) {
    for (i, child) in element.children.iter_mut().enumerate() {
        if child.kind == ElementKind::Container {
            child.name = format!("m{i}");
        }
        name_containers(child);
    }
}

fn document() -> impl Strategy<Value = Element> {
    prop::collection::vec(subtree(), 0..6).prop_map(|children| {
        let mut root = Element::container("gui", "app").with_children(children);
        name_containers(&mut root);
        root
    })
}

/// A document with a default splice point at the top.
fn spliceable_document() -> impl Strategy<Value = Element> {
    document().prop_map(|mut root| {
        root.children.insert(0, Element::merge_local(""));
        root
    })
}

/// An overlay mixing matching containers with a plugin menu the base lacks.
fn overlay() -> impl Strategy<Value = Element> {
    (document(), prop::collection::vec(subtree(), 0..4)).prop_map(|(mut root, extra)| {
        let mut plugin = Element::menu("plugin").with_children(extra);
        name_containers(&mut plugin);
        root.children.push(plugin);
        root
    })
}

fn registry() -> impl Strategy<Value = CommandSet> {
    prop::sample::subsequence(POOL, 0..=POOL.len()).prop_map(|names| names.into_iter().collect())
}

// ── Helpers ─────────────────────────────────────────────────────────────

fn has_adjacent_weak_separators(element: &Element) -> bool {
    element
        .children
        .windows(2)
        .any(|pair| pair.iter().all(|e| e.kind == ElementKind::Separator && e.weak_separator))
        || element.children.iter().any(has_adjacent_weak_separators)
}

fn empty_overlay() -> UiTree {
    UiTree::empty("gui", "app")
}

// ── Properties ──────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn second_pass_is_a_noop(doc in document(), commands in registry()) {
        let engine = MergeEngine::new(&commands);
        let mut base = UiTree::from(&doc);
        let first = engine.prune(&mut base);
        let snapshot = base.to_element();

        let second = engine.merge_with_stats(&mut base, &empty_overlay());
        prop_assert_eq!(base.to_element(), snapshot);
        prop_assert_eq!(second.prunable, first.prunable);
        prop_assert!(second.stats.is_noop(), "second pass did work: {}", second.stats);
    }

    #[test]
    fn second_pass_after_overlay_is_a_noop(doc in spliceable_document(), plugin in overlay(), commands in registry()) {
        let engine = MergeEngine::new(&commands);
        let mut base = UiTree::from(&doc);
        let first = engine.merge_with_stats(&mut base, &UiTree::from(&plugin));
        let snapshot = base.to_element();
        prop_assert!(snapshot
            .action_names()
            .iter()
            .all(|name| commands.iter().any(|c| c == *name)));

        let second = engine.prune(&mut base);
        prop_assert_eq!(base.to_element(), snapshot);
        prop_assert_eq!(second.prunable, first.prunable);
        prop_assert!(second.stats.is_noop(), "second pass did work: {}", second.stats);
    }

    #[test]
    fn nothing_registered_means_prunable(doc in document()) {
        let mut base = UiTree::from(&doc);
        prop_assert!(merge(&mut base, &empty_overlay(), CommandSet::new()));
        prop_assert!(base.to_element().action_names().is_empty());
    }

    #[test]
    fn registered_actions_survive_in_order(doc in document(), commands in registry()) {
        let expected: Vec<&str> = doc
            .action_names()
            .into_iter()
            .filter(|name| commands.iter().any(|c| c == *name))
            .collect();

        let mut base = UiTree::from(&doc);
        let prunable = merge(&mut base, &empty_overlay(), &commands);
        let merged = base.to_element();

        prop_assert_eq!(merged.action_names(), expected.clone());
        if !expected.is_empty() {
            prop_assert!(!prunable);
        }
    }

    #[test]
    fn weak_separators_never_adjacent(doc in document(), commands in registry()) {
        for config in [MergeConfig::literal(), MergeConfig::classic()] {
            let mut base = UiTree::from(&doc);
            MergeEngine::with_config(&commands, config).prune(&mut base);
            prop_assert!(!has_adjacent_weak_separators(&base.to_element()));
        }
    }

    #[test]
    fn merge_local_splices_in_overlay_order(contributed in prop::collection::btree_set("[a-z]{1,6}", 0..8)) {
        let contributed: Vec<String> = contributed.into_iter().map(|n| format!("x_{n}")).collect();
        let mut base = UiTree::from(Element::container("gui", "app").with_children(vec![
            Element::action("first"),
            Element::merge_local(""),
            Element::action("last"),
        ]));
        let overlay = UiTree::from(
            Element::container("gui", "plugin")
                .with_children(contributed.iter().map(Element::action).collect()),
        );
        let mut commands: CommandSet = contributed.iter().cloned().collect();
        commands.extend(["first", "last"]);

        prop_assert!(!merge(&mut base, &overlay, &commands));

        let mut expected = vec!["first".to_string()];
        expected.extend(contributed.iter().cloned());
        expected.push("last".to_string());
        let merged = base.to_element();
        prop_assert_eq!(merged.action_names(), expected.iter().map(String::as_str).collect::<Vec<_>>());
    }
}
