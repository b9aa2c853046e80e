//! The element model of a structure document.
//!
//! An [`Element`] is the owned, nested form of a node: it is what documents
//! deserialize into and what the merged result serializes back to. The merge
//! engine works on the arena form, [`UiTree`](crate::tree::UiTree), which is
//! built from and converted back into `Element`s.

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{TreeError, TreeResult};

/// The role an element plays in the merge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    /// Reference to a named command.
    Action,
    /// Visual divider.
    Separator,
    /// Persistent extension point.
    Merge,
    /// Splice point consumed by a merge pass.
    MergeLocal,
    /// Named grouping node (menu, toolbar, submenu).
    Container,
    /// Decorative content, ignored by the merge.
    Text,
}

impl ElementKind {
    /// Classify a document tag name.
    ///
    /// Comparison is ASCII case-insensitive. Any tag that is not one of the
    /// reserved names denotes a container.
    pub fn from_tag(tag: &str) -> Self {
        const RESERVED: [(&str, ElementKind); 5] = [
            ("action", ElementKind::Action),
            ("separator", ElementKind::Separator),
            ("merge", ElementKind::Merge),
            ("mergelocal", ElementKind::MergeLocal),
            ("text", ElementKind::Text),
        ];
        RESERVED
            .iter()
            .find(|(name, _)| tag.eq_ignore_ascii_case(name))
            .map(|(_, kind)| *kind)
            .unwrap_or(ElementKind::Container)
    }

    /// Returns `true` for kinds that may hold children.
    pub fn is_container(self) -> bool {
        matches!(self, Self::Container)
    }

    /// Returns `true` for kinds that must carry a name.
    pub fn requires_name(self) -> bool {
        matches!(self, Self::Action | Self::Container)
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Action => write!(f, "Action"),
            Self::Separator => write!(f, "Separator"),
            Self::Merge => write!(f, "Merge"),
            Self::MergeLocal => write!(f, "MergeLocal"),
            Self::Container => write!(f, "Container"),
            Self::Text => write!(f, "Text"),
        }
    }
}

/// A node of a structure document, with its children.
///
/// `name` and `append` use the empty string for "absent". `tag` is only
/// meaningful for containers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    /// What this element is.
    pub kind: ElementKind,
    /// Container tag such as `Menu` or `ToolBar`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub tag: String,
    /// Identifier used for matching and command lookup.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Name of the MergeLocal marker this element should be spliced into.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub append: String,
    /// Set on separators that came from a merge base.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub weak_separator: bool,
    /// Text content of a Text element.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub content: String,
    /// Free-form presentation attributes (label, icon, ...).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
    /// Ordered children.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Element>,
}

impl Element {
    /// Create a bare element of the given kind.
    pub fn new(kind: ElementKind) -> Self {
        Self {
            kind,
            tag: String::new(),
            name: String::new(),
            append: String::new(),
            weak_separator: false,
            content: String::new(),
            attributes: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    /// An Action referencing the command `name`.
    pub fn action(name: impl Into<String>) -> Self {
        Self::new(ElementKind::Action).with_name(name)
    }

    /// An unnamed separator.
    pub fn separator() -> Self {
        Self::new(ElementKind::Separator)
    }

    /// An unnamed Merge marker.
    pub fn merge() -> Self {
        Self::new(ElementKind::Merge)
    }

    /// A MergeLocal marker; pass an empty name for the default splice point.
    pub fn merge_local(name: impl Into<String>) -> Self {
        Self::new(ElementKind::MergeLocal).with_name(name)
    }

    /// A container with the given tag and name.
    pub fn container(tag: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::new(ElementKind::Container)
        }
        .with_name(name)
    }

    /// A `Menu` container.
    pub fn menu(name: impl Into<String>) -> Self {
        Self::container("Menu", name)
    }

    /// A `ToolBar` container.
    pub fn toolbar(name: impl Into<String>) -> Self {
        Self::container("ToolBar", name)
    }

    /// A Text element holding `content`.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::new(ElementKind::Text)
        }
    }

    /// Set the name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the splice target.
    pub fn with_append(mut self, target: impl Into<String>) -> Self {
        self.append = target.into();
        self
    }

    /// Set an attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Replace the children.
    pub fn with_children(mut self, children: Vec<Element>) -> Self {
        self.children = children;
        self
    }

    /// Append one child.
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Short label used in paths and outlines: `Tag:name`, `Action:name`, or
    /// the bare kind.
    pub fn label(&self) -> String {
        compose_label(self.kind, &self.tag, &self.name)
    }

    /// Check the well-formedness precondition of the merge engine.
    ///
    /// Actions and containers must be named, containers must carry a tag,
    /// only containers may have children, and no two containers in one
    /// sibling list may share tag and name.
    pub fn validate(&self) -> TreeResult<()> {
        self.validate_at(&self.label())
    }

    fn validate_at(&self, path: &str) -> TreeResult<()> {
        if self.kind.requires_name() && self.name.is_empty() {
            return Err(TreeError::MissingName {
                kind: self.kind,
                path: path.to_string(),
            });
        }
        if !self.kind.is_container() {
            if !self.children.is_empty() {
                return Err(TreeError::UnexpectedChildren {
                    kind: self.kind,
                    path: path.to_string(),
                });
            }
            return Ok(());
        }
        if self.tag.is_empty() {
            return Err(TreeError::MissingTag {
                path: path.to_string(),
            });
        }

        let mut seen = HashSet::new();
        for child in &self.children {
            let child_path = format!("{path}/{}", child.label());
            if child.kind.is_container()
                && !seen.insert((child.tag.to_ascii_lowercase(), child.name.as_str()))
            {
                return Err(TreeError::DuplicateSibling {
                    tag: child.tag.clone(),
                    name: child.name.clone(),
                    path: path.to_string(),
                });
            }
            child.validate_at(&child_path)?;
        }
        Ok(())
    }

    /// Total number of elements in this subtree, including `self`.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(Element::count).sum::<usize>()
    }

    /// Names of every Action in this subtree, in document order.
    pub fn action_names(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_actions(&mut out);
        out
    }

    fn collect_actions<'a>(&'a self, out: &mut Vec<&'a str>) {
        if self.kind == ElementKind::Action {
            out.push(self.name.as_str());
        }
        for child in &self.children {
            child.collect_actions(out);
        }
    }
}

pub(crate) fn compose_label(kind: ElementKind, tag: &str, name: &str) -> String {
    let head = if kind.is_container() && !tag.is_empty() {
        tag.to_string()
    } else {
        kind.to_string()
    };
    if name.is_empty() {
        head
    } else {
        format!("{head}:{name}")
    }
}
