//! Merge engine for guitree structure documents.
//!
//! Combines a base menu/toolbar structure with overlay structures contributed
//! by plugins into one tree, ready to be turned into widgets:
//!
//! - [`CommandRegistry`] — which commands the application implements
//! - [`find_match`] — pairing of base and overlay siblings
//! - [`MergeEngine`] — the recursive in-place merge and pruning
//! - [`MergeConfig`] — separator and attribute policies
//!
//! ```
//! use guitree_merge::{merge, CommandSet};
//! use guitree_types::{Element, UiTree};
//!
//! let mut base = UiTree::from(Element::container("gui", "app").with_children(vec![
//!     Element::action("file_save"),
//!     Element::merge_local(""),
//!     Element::action("file_quit"),
//! ]));
//! let overlay = UiTree::from(
//!     Element::container("gui", "plugin").with_child(Element::action("file_export")),
//! );
//! let registry: CommandSet = ["file_save", "file_export"].into_iter().collect();
//!
//! assert!(!merge(&mut base, &overlay, &registry));
//! assert_eq!(base.to_element().action_names(), vec!["file_save", "file_export"]);
//! ```

pub mod config;
pub mod engine;
pub mod matcher;
pub mod registry;
pub mod stats;

pub use config::MergeConfig;
pub use engine::{merge, MergeEngine, MergeOutcome};
pub use matcher::{corresponds, find_match};
pub use registry::{CommandRegistry, CommandSet, FnRegistry, Restricted};
pub use stats::MergeStats;
