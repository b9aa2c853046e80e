//! Error types for structure documents.

use crate::element::ElementKind;

/// A well-formedness violation found while validating an element tree.
///
/// Every variant carries the slash-separated `path` of the offending element,
/// built from container tags and names (for example `MenuBar/Menu:file`).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// An Action or Container has an empty `name`.
    #[error("{kind} at '{path}' has no name")]
    MissingName {
        /// Kind of the unnamed element.
        kind: ElementKind,
        /// Location of the element.
        path: String,
    },

    /// A Container has no tag.
    #[error("container at '{path}' has no tag")]
    MissingTag {
        /// Location of the element.
        path: String,
    },

    /// A leaf kind (anything but Container) was given children.
    #[error("{kind} at '{path}' cannot have children")]
    UnexpectedChildren {
        /// Kind of the element holding children.
        kind: ElementKind,
        /// Location of the element.
        path: String,
    },

    /// Two containers in one sibling list share tag and name.
    #[error("duplicate container '{tag}:{name}' under '{path}'")]
    DuplicateSibling {
        /// Tag of the duplicated container.
        tag: String,
        /// Name of the duplicated container.
        name: String,
        /// Location of the parent.
        path: String,
    },
}

/// Convenience alias for validation results.
pub type TreeResult<T> = Result<T, TreeError>;
