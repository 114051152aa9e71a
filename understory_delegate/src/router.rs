// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Router implementation.
//!
//! ## Overview
//!
//! Reconstructs the target → root path and builds the handler queue for a
//! single event from a [`Listeners`] table.
//!
//! ## Queue order
//!
//! Nodes are visited nearest first, starting at the target. For each visited
//! node `d`:
//!
//! 1. Delegated listeners on `d` (those with a selector) are matched against
//!    every element between the target and `d`, excluding `d`, deepest first.
//!    For each matching element, matching listeners queue in registration
//!    order.
//! 2. Direct listeners on `d` (no selector) queue afterwards with
//!    `current == d`.
//!
//! The queue carries [`Phase::Target`] for entries attached to the target and
//! [`Phase::Bubble`] for everything else.

use alloc::vec::Vec;

use crate::listeners::Listeners;
use crate::types::{Dispatch, Matcher, NoParent, ParentLookup, Phase};

/// Deterministic delegation router.
///
/// ## Usage
///
/// - Construct with [`Router::new`] when events only ever reach their target,
///   or with [`Router::with_parent`] to enable bubbling via a [`ParentLookup`].
/// - Call [`Router::delegate`] per event to obtain the handler queue, then run
///   it with [`dispatcher::run`](crate::dispatcher::run).
pub struct Router<K, P: ParentLookup<K> = NoParent> {
    pub(crate) parent: P,
    pub(crate) _phantom: core::marker::PhantomData<fn() -> K>,
}

impl<K, P: ParentLookup<K>> core::fmt::Debug for Router<K, P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Router").finish_non_exhaustive()
    }
}

impl<K: Copy + Eq, P: ParentLookup<K> + Default> Router<K, P> {
    /// Create a router with a default parent lookup.
    pub fn new() -> Self {
        Self {
            parent: P::default(),
            _phantom: core::marker::PhantomData,
        }
    }
}

impl<K: Copy + Eq, P: ParentLookup<K> + Default> Default for Router<K, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Copy + Eq, P: ParentLookup<K>> Router<K, P> {
    /// Create a router with an explicit parent lookup provider.
    pub fn with_parent(parent: P) -> Self {
        Self {
            parent,
            _phantom: core::marker::PhantomData,
        }
    }

    /// The target → root path, target first.
    pub fn bubble_path(&self, target: K) -> Vec<K> {
        let mut out = Vec::new();
        let mut cur = target;
        // Collect to root; caller ensures acyclic ancestry.
        loop {
            out.push(cur);
            match self.parent.parent_of(&cur) {
                Some(p) => cur = p,
                None => break,
            }
        }
        out
    }

    /// Build the handler queue for an event on `target`.
    pub fn delegate<S, H, M>(
        &self,
        listeners: &Listeners<K, S, H>,
        matcher: &M,
        target: K,
    ) -> Vec<Dispatch<K, H>>
    where
        H: Clone,
        M: Matcher<K, S>,
    {
        let path = self.bubble_path(target);
        let mut out = Vec::new();
        for (depth, &node) in path.iter().enumerate() {
            let phase = if depth == 0 {
                Phase::Target
            } else {
                Phase::Bubble
            };
            // Elements strictly below `node` on the way to the target, deepest first.
            for &current in &path[..depth] {
                for l in listeners.attached_to(node) {
                    if let Some(sel) = &l.selector
                        && matcher.matches(&current, sel)
                    {
                        out.push(Dispatch::delegated(node, current, l.handler.clone()));
                    }
                }
            }
            for l in listeners.attached_to(node) {
                if l.selector.is_none() {
                    out.push(Dispatch::direct(phase, node, l.handler.clone()));
                }
            }
        }
        out
    }
}
