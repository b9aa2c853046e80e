//! Command registries consulted by the merge engine.
//!
//! The engine only ever asks one question: does a command with this name
//! exist right now? [`CommandRegistry`] is that question as a trait, with
//! implementations for the common set types, closures, and a deny-list
//! wrapper.

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

/// Answers whether a named command is implemented by the running
/// application.
///
/// Implementations must be free of side effects and answer consistently for
/// the duration of one merge call. The engine may call [`exists`] many times
/// per node.
///
/// [`exists`]: CommandRegistry::exists
pub trait CommandRegistry {
    /// Returns `true` if a command named `name` is registered.
    fn exists(&self, name: &str) -> bool;
}

impl<R: CommandRegistry + ?Sized> CommandRegistry for &R {
    fn exists(&self, name: &str) -> bool {
        (**self).exists(name)
    }
}

impl<R: CommandRegistry + ?Sized> CommandRegistry for Box<R> {
    fn exists(&self, name: &str) -> bool {
        (**self).exists(name)
    }
}

impl CommandRegistry for HashSet<String> {
    fn exists(&self, name: &str) -> bool {
        self.contains(name)
    }
}

impl CommandRegistry for BTreeSet<String> {
    fn exists(&self, name: &str) -> bool {
        self.contains(name)
    }
}

/// An owned, ordered set of command names.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommandSet {
    names: BTreeSet<String>,
}

impl CommandSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command. Returns `false` if it was already present.
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        self.names.insert(name.into())
    }

    /// Unregister a command. Returns `true` if it was present.
    pub fn remove(&mut self, name: &str) -> bool {
        self.names.remove(name)
    }

    /// Number of registered commands.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` if no command is registered.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Registered names in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl CommandRegistry for CommandSet {
    fn exists(&self, name: &str) -> bool {
        self.names.contains(name)
    }
}

impl<S: Into<String>> FromIterator<S> for CommandSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<S: Into<String>> Extend<S> for CommandSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.names.extend(iter.into_iter().map(Into::into));
    }
}

/// Registry backed by a predicate.
pub struct FnRegistry<F>(pub F);

impl<F: Fn(&str) -> bool> CommandRegistry for FnRegistry<F> {
    fn exists(&self, name: &str) -> bool {
        (self.0)(name)
    }
}

/// A registry with some commands withheld.
///
/// A denied command reports as absent even if the inner registry has it, so
/// its actions are pruned like unimplemented ones.
#[derive(Clone, Debug)]
pub struct Restricted<R> {
    inner: R,
    denied: BTreeSet<String>,
}

impl<R: CommandRegistry> Restricted<R> {
    /// Wrap `inner` with an empty deny list.
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            denied: BTreeSet::new(),
        }
    }

    /// Withhold `name`.
    pub fn deny(mut self, name: impl Into<String>) -> Self {
        self.denied.insert(name.into());
        self
    }

    /// Withhold every name in `names`.
    pub fn deny_all<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.denied.extend(names.into_iter().map(Into::into));
        self
    }

    /// Returns `true` if `name` is on the deny list.
    pub fn is_denied(&self, name: &str) -> bool {
        self.denied.contains(name)
    }

    /// The wrapped registry.
    pub fn inner(&self) -> &R {
        &self.inner
    }
}

impl<R: CommandRegistry> CommandRegistry for Restricted<R> {
    fn exists(&self, name: &str) -> bool {
        !self.denied.contains(name) && self.inner.exists(name)
    }
}
