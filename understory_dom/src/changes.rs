// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Change summary drained from [`crate::Document::take_changes`].

use alloc::vec::Vec;

use crate::types::{ElementState, NodeId};

/// A single state transition on one element.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Change {
    /// The element whose state changed.
    pub node: NodeId,
    /// State before the mutation.
    pub before: ElementState,
    /// State after the mutation.
    pub after: ElementState,
}

/// State transitions accumulated since the last drain, in mutation order.
///
/// Hosts use this to fire their own `change` notifications; the document
/// itself never emits events.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Changes {
    /// Recorded transitions. An element may appear more than once.
    pub entries: Vec<Change>,
}

impl Changes {
    /// Returns true if nothing changed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Elements whose `CHECKED` flag differs between their first and last recorded state.
    pub fn checked_toggled(&self) -> Vec<NodeId> {
        self.net_changed(ElementState::CHECKED)
    }

    /// Elements whose `DISABLED` flag differs between their first and last recorded state.
    pub fn disabled_toggled(&self) -> Vec<NodeId> {
        self.net_changed(ElementState::DISABLED)
    }

    pub(crate) fn record(&mut self, node: NodeId, before: ElementState, after: ElementState) {
        if before != after {
            self.entries.push(Change {
                node,
                before,
                after,
            });
        }
    }

    fn net_changed(&self, flag: ElementState) -> Vec<NodeId> {
        let mut seen: Vec<NodeId> = Vec::new();
        let mut out: Vec<NodeId> = Vec::new();
        for (i, c) in self.entries.iter().enumerate() {
            if seen.contains(&c.node) {
                continue;
            }
            seen.push(c.node);
            let first = c.before;
            let last = self.entries[i..]
                .iter()
                .rev()
                .find(|e| e.node == c.node)
                .map_or(c.after, |e| e.after);
            if first.contains(flag) != last.contains(flag) {
                out.push(c.node);
            }
        }
        out
    }
}
