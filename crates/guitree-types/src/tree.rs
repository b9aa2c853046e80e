//! Arena-backed element tree.
//!
//! [`UiTree`] owns every node of one document in a flat vector and links them
//! through [`NodeId`] handles. Splicing, moving and removing nodes only edits
//! child vectors, so no handle ever dangles.
//!
//! # Invariants
//!
//! - Every node reachable from the root has exactly one parent, except the
//!   root, which has none.
//! - A node appears at most once in any child vector.
//! - Detached nodes stay allocated until the tree is [`compact`]ed.
//!
//! Handles are only meaningful for the tree that produced them. Passing a
//! handle from another tree is a precondition violation and panics when it
//! falls outside this tree's arena.
//!
//! [`compact`]: UiTree::compact

use std::collections::BTreeMap;
use std::fmt;

use crate::element::{compose_label, Element, ElementKind};

/// Handle of a node inside a [`UiTree`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in the arena.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

/// One node of a [`UiTree`]: the element's own data plus its links.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    /// What this node is.
    pub kind: ElementKind,
    /// Container tag.
    pub tag: String,
    /// Identifier used for matching and command lookup.
    pub name: String,
    /// Target MergeLocal name.
    pub append: String,
    /// Set on separators that came from a merge base.
    pub weak_separator: bool,
    /// Text content.
    pub content: String,
    /// Presentation attributes.
    pub attributes: BTreeMap<String, String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    fn detached(element: &Element) -> Self {
        Self {
            kind: element.kind,
            tag: element.tag.clone(),
            name: element.name.clone(),
            append: element.append.clone(),
            weak_separator: element.weak_separator,
            content: element.content.clone(),
            attributes: element.attributes.clone(),
            parent: None,
            children: Vec::new(),
        }
    }

    fn copy_detached(&self) -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            ..self.clone()
        }
    }

    /// The node's parent, or `None` for the root and detached nodes.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Ordered child handles.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Returns `true` for a separator carrying the weak flag.
    pub fn is_weak_separator(&self) -> bool {
        self.kind == ElementKind::Separator && self.weak_separator
    }

    /// Short label: `Tag:name`, `Action:name`, or the bare kind.
    pub fn label(&self) -> String {
        compose_label(self.kind, &self.tag, &self.name)
    }

    fn to_element(&self) -> Element {
        Element {
            kind: self.kind,
            tag: self.tag.clone(),
            name: self.name.clone(),
            append: self.append.clone(),
            weak_separator: self.weak_separator,
            content: self.content.clone(),
            attributes: self.attributes.clone(),
            children: Vec::new(),
        }
    }
}

/// A document held as an arena of [`Node`]s.
#[derive(Clone, Debug)]
pub struct UiTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl UiTree {
    /// Build a tree from a nested element.
    pub fn from_element(element: &Element) -> Self {
        let mut tree = Self {
            nodes: Vec::with_capacity(element.count()),
            root: NodeId(0),
        };
        tree.root = tree.build(element);
        tree
    }

    /// A tree holding a single childless container, used as an empty
    /// overlay.
    pub fn empty(tag: impl Into<String>, name: impl Into<String>) -> Self {
        Self::from_element(&Element::container(tag, name))
    }

    fn build(&mut self, element: &Element) -> NodeId {
        let id = self.alloc(Node::detached(element));
        for child in &element.children {
            let child_id = self.build(child);
            self.push_child(id, child_id);
        }
        id
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Handle of the root node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The node behind `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not produced by this tree.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Mutable access to the node's data.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not produced by this tree.
    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    /// The node behind `id`, or `None` if it is out of range.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Ordered children of `id`.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Parent of `id`, if attached.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// Number of nodes reachable from the root.
    pub fn len(&self) -> usize {
        self.preorder(self.root).count()
    }

    /// Always `false`: a tree has at least its root.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Number of allocated nodes, including detached ones.
    pub fn allocated(&self) -> usize {
        self.nodes.len()
    }

    // ---------------------------------------------------------------
    // Mutation
    // ---------------------------------------------------------------

    /// Insert the detached node `child` at `index` among `parent`'s children.
    ///
    /// # Panics
    ///
    /// Panics if `child` is still attached or `index` is past the end.
    pub fn insert_child(&mut self, parent: NodeId, index: usize, child: NodeId) {
        assert!(
            self.nodes[child.0].parent.is_none() && child != self.root,
            "node {child:?} is already attached"
        );
        self.nodes[parent.0].children.insert(index, child);
        self.nodes[child.0].parent = Some(parent);
    }

    /// Append the detached node `child` to `parent`'s children.
    pub fn push_child(&mut self, parent: NodeId, child: NodeId) {
        let index = self.nodes[parent.0].children.len();
        self.insert_child(parent, index, child);
    }

    /// Detach and return the child at `index` of `parent`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn remove_child(&mut self, parent: NodeId, index: usize) -> NodeId {
        let child = self.nodes[parent.0].children.remove(index);
        self.nodes[child.0].parent = None;
        child
    }

    /// Detach `id` from its parent. Returns `false` if it was not attached.
    pub fn detach(&mut self, id: NodeId) -> bool {
        let Some(parent) = self.nodes[id.0].parent else {
            return false;
        };
        match self.nodes[parent.0].children.iter().position(|c| *c == id) {
            Some(index) => {
                self.remove_child(parent, index);
                true
            }
            None => false,
        }
    }

    /// Deep-copy the subtree at `source_id` of `source` into this arena.
    ///
    /// The copy is returned detached; attach it with [`insert_child`] or
    /// [`push_child`]. `source` is not modified.
    ///
    /// [`insert_child`]: UiTree::insert_child
    /// [`push_child`]: UiTree::push_child
    pub fn graft(&mut self, source: &UiTree, source_id: NodeId) -> NodeId {
        let id = self.alloc(source.node(source_id).copy_detached());
        for &child in source.children(source_id) {
            let copied = self.graft(source, child);
            self.push_child(id, copied);
        }
        id
    }

    // ---------------------------------------------------------------
    // Traversal and conversion
    // ---------------------------------------------------------------

    /// Pre-order iterator over `id` and all of its descendants.
    pub fn preorder(&self, id: NodeId) -> Preorder<'_> {
        Preorder {
            tree: self,
            stack: vec![id],
        }
    }

    /// Nested form of the whole tree.
    pub fn to_element(&self) -> Element {
        self.subtree_to_element(self.root)
    }

    /// Nested form of the subtree at `id`.
    pub fn subtree_to_element(&self, id: NodeId) -> Element {
        let node = self.node(id);
        let mut element = node.to_element();
        element.children = node
            .children
            .iter()
            .map(|child| self.subtree_to_element(*child))
            .collect();
        element
    }

    /// Rebuild the tree without detached nodes. Handles are renumbered.
    pub fn compact(&self) -> UiTree {
        UiTree::from_element(&self.to_element())
    }
}

impl From<&Element> for UiTree {
    fn from(element: &Element) -> Self {
        Self::from_element(element)
    }
}

impl From<Element> for UiTree {
    fn from(element: Element) -> Self {
        Self::from_element(&element)
    }
}

/// Iterator returned by [`UiTree::preorder`].
pub struct Preorder<'a> {
    tree: &'a UiTree,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for Preorder<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let node = self.tree.node(id);
        self.stack.extend(node.children.iter().rev().copied());
        Some((id, node))
    }
}
