// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Listener table with dotted namespaces.
//!
//! Listeners are attached to a node with a namespace such as
//! `checkboxes.range`, an optional selector (making them delegated), and an
//! opaque handler payload. Removal is by namespace: [`Listeners::off`] drops
//! every listener on the node whose namespace contains *all* the components
//! of the requested one, so `off(node, "checkboxes.range")` leaves a
//! `checkboxes.max` listener in place while `off(node, "checkboxes")` removes
//! both.
//!
//! ```
//! use understory_delegate::listeners::Listeners;
//!
//! let mut table: Listeners<u32, &str, &str> = Listeners::new();
//! table.on(1, "checkboxes.max", Some(":checkbox"), "max");
//! table.on(1, "checkboxes.range", Some(":checkbox, label"), "range");
//!
//! assert_eq!(table.off(1, "checkboxes.range"), 1);
//! assert!(table.has(1, "checkboxes.max"));
//! assert_eq!(table.off(1, "checkboxes"), 1);
//! assert!(table.is_empty());
//! ```

use alloc::string::String;
use alloc::vec::Vec;
use smallvec::SmallVec;

/// A set of namespace components, order-insensitive.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Namespace(SmallVec<[String; 2]>);

impl Namespace {
    /// Parse `a.b.c` into components; empty components are dropped.
    pub fn parse(src: &str) -> Self {
        let mut parts: SmallVec<[String; 2]> = src
            .split('.')
            .filter(|p| !p.is_empty())
            .map(String::from)
            .collect();
        parts.sort_unstable();
        parts.dedup();
        Self(parts)
    }

    /// Returns true if every component of `other` is present in `self`.
    ///
    /// An empty `other` is contained in every namespace.
    pub fn contains_all(&self, other: &Self) -> bool {
        other.0.iter().all(|c| self.0.contains(c))
    }
}

/// A registered listener.
#[derive(Clone, Debug)]
pub struct Listener<K, S, H> {
    /// Element the listener is attached to.
    pub node: K,
    /// Namespace used for removal.
    pub namespace: Namespace,
    /// Delegation selector; `None` for a direct listener.
    pub selector: Option<S>,
    /// Opaque handler payload.
    pub handler: H,
}

/// Listener table, kept in registration order.
#[derive(Clone, Debug)]
pub struct Listeners<K, S, H> {
    entries: Vec<Listener<K, S, H>>,
}

impl<K, S, H> Default for Listeners<K, S, H> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<K: Copy + PartialEq, S, H> Listeners<K, S, H> {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a listener to `node`.
    pub fn on(&mut self, node: K, namespace: &str, selector: Option<S>, handler: H) {
        self.entries.push(Listener {
            node,
            namespace: Namespace::parse(namespace),
            selector,
            handler,
        });
    }

    /// Remove listeners on `node` whose namespace contains all of `namespace`.
    ///
    /// Returns how many were removed.
    pub fn off(&mut self, node: K, namespace: &str) -> usize {
        let ns = Namespace::parse(namespace);
        let before = self.entries.len();
        self.entries
            .retain(|l| !(l.node == node && l.namespace.contains_all(&ns)));
        before - self.entries.len()
    }

    /// Remove every listener attached to `node`.
    pub fn off_all(&mut self, node: K) -> usize {
        let before = self.entries.len();
        self.entries.retain(|l| l.node != node);
        before - self.entries.len()
    }

    /// Returns true if `node` has a listener whose namespace contains all of `namespace`.
    pub fn has(&self, node: K, namespace: &str) -> bool {
        let ns = Namespace::parse(namespace);
        self.entries
            .iter()
            .any(|l| l.node == node && l.namespace.contains_all(&ns))
    }

    /// Listeners attached to `node`, in registration order.
    pub fn attached_to(&self, node: K) -> impl Iterator<Item = &Listener<K, S, H>> + '_ {
        self.entries.iter().filter(move |l| l.node == node)
    }

    /// Total number of listeners.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no listener is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
