// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types shared by the router, listener table, and dispatcher.

/// Dispatch phase of a queued handler.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// The listener is attached to the event target itself.
    Target,
    /// The listener is attached to an ancestor of the target.
    Bubble,
}

/// Propagation control returned by handlers.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Keep going.
    Continue,
    /// Stop propagation once the remaining handlers for the current matched element have run.
    Stop,
    /// Stop right now; no further handlers run.
    StopImmediate,
}

/// One queued handler invocation.
///
/// `node` is the element the listener is attached to (the delegate), and
/// `current` is the element the handler runs for: a matching descendant for
/// delegated listeners, or `node` itself for direct ones.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dispatch<K, H> {
    /// Phase relative to the event target.
    pub phase: Phase,
    /// Element the listener is attached to.
    pub node: K,
    /// Element the handler runs for.
    pub current: K,
    /// Listener payload.
    pub handler: H,
}

impl<K: Copy, H> Dispatch<K, H> {
    /// A direct (non-delegated) invocation on `node`.
    pub fn direct(phase: Phase, node: K, handler: H) -> Self {
        Self {
            phase,
            node,
            current: node,
            handler,
        }
    }

    /// A delegated invocation on `node` for the matched descendant `current`.
    pub fn delegated(node: K, current: K, handler: H) -> Self {
        Self {
            phase: Phase::Bubble,
            node,
            current,
            handler,
        }
    }
}

/// Parent lookup used to reconstruct the target → root path.
pub trait ParentLookup<K> {
    /// Returns the parent of `node`, or `None` for a root.
    fn parent_of(&self, node: &K) -> Option<K>;
}

/// Parent lookup that treats every node as a root.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoParent;

impl<K> ParentLookup<K> for NoParent {
    fn parent_of(&self, _: &K) -> Option<K> {
        None
    }
}

/// Decides whether an element matches a listener's selector.
pub trait Matcher<K, S> {
    /// Returns true if `node` matches `selector`.
    fn matches(&self, node: &K, selector: &S) -> bool;
}

bitflags::bitflags! {
    /// Keyboard modifiers held while an event was produced.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Shift.
        const SHIFT = 0b0000_0001;
        /// Control.
        const CTRL  = 0b0000_0010;
        /// Alt / Option.
        const ALT   = 0b0000_0100;
        /// Meta / Command / Windows.
        const META  = 0b0000_1000;
    }
}

/// A pointer click travelling through the dispatcher.
///
/// `default_prevented` and `propagation_stopped` are set by handlers and read
/// by the host afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClickEvent<K> {
    /// The element that was clicked.
    pub target: K,
    /// Modifiers held during the click.
    pub modifiers: Modifiers,
    /// A handler asked the host to skip its default action.
    pub default_prevented: bool,
    /// A handler asked to stop propagation.
    pub propagation_stopped: bool,
}

impl<K> ClickEvent<K> {
    /// A fresh click on `target`.
    pub fn new(target: K, modifiers: Modifiers) -> Self {
        Self {
            target,
            modifiers,
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    /// Ask the host to skip its default action.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Stop propagation after the current matched element.
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Returns true if Shift was held.
    pub fn shift_key(&self) -> bool {
        self.modifiers.contains(Modifiers::SHIFT)
    }

    /// The [`Outcome`] matching the current propagation flag.
    pub fn outcome(&self) -> Outcome {
        if self.propagation_stopped {
            Outcome::Stop
        } else {
            Outcome::Continue
        }
    }
}
