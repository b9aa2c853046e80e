//! Foundation types for guitree structure documents.
//!
//! A structure document describes menus, toolbars and their entries as a tree
//! of elements. This crate provides both representations of that tree:
//!
//! - [`Element`] — owned, nested and serializable; what documents load into
//! - [`UiTree`] — arena of [`Node`]s addressed by [`NodeId`]; what the merge
//!   engine mutates in place
//!
//! and [`Element::validate`], which checks the well-formedness precondition
//! every merge input must satisfy.

pub mod element;
pub mod error;
pub mod tree;

pub use element::{Element, ElementKind};
pub use error::{TreeError, TreeResult};
pub use tree::{Node, NodeId, Preorder, UiTree};
