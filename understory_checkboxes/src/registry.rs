// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scope registry: one [`Checkboxes`] instance per scope element.

use hashbrown::HashMap;
use log::{debug, trace};
use understory_dom::{Document, NodeId};

use crate::controller::{CheckboxListeners, Checkboxes};
use crate::operation::{Invocation, Operation, Options};

/// Lookup-or-create storage for per-scope controllers.
///
/// Instances are keyed by the scope's [`NodeId`]. Repeated invocations on the
/// same scope reuse the same instance, so listeners are never duplicated.
#[derive(Clone, Debug, Default)]
pub struct Registry {
    instances: HashMap<NodeId, Checkboxes>,
}

impl Registry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The instance bound to `scope`, if one was created.
    pub fn get(&self, scope: NodeId) -> Option<&Checkboxes> {
        self.instances.get(&scope)
    }

    /// Mutable access to the instance bound to `scope`.
    pub fn get_mut(&mut self, scope: NodeId) -> Option<&mut Checkboxes> {
        self.instances.get_mut(&scope)
    }

    /// Number of live instances.
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// Returns true if no instance exists.
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Look up or create the instance for `scope`, then run `invocation`.
    ///
    /// - [`Invocation::Call`] runs the operation on the instance.
    /// - [`Invocation::Init`] only matters when the instance is new: its
    ///   options are stored and applied (`max`, then `range`). An existing
    ///   instance is left untouched.
    ///
    /// A stale `scope` is ignored.
    pub fn invoke(
        &mut self,
        doc: &mut Document,
        listeners: &mut CheckboxListeners,
        scope: NodeId,
        invocation: Invocation,
    ) {
        if !doc.is_alive(scope) {
            debug!("ignoring checkboxes invocation on stale scope {scope:?}");
            return;
        }
        let fresh = !self.instances.contains_key(&scope);
        let options = match invocation {
            Invocation::Init(options) if fresh => options,
            _ => Options::default(),
        };
        let instance = self
            .instances
            .entry(scope)
            .or_insert_with(|| Checkboxes::new(scope, options));
        match invocation {
            Invocation::Call(op) => {
                trace!("{} on {scope:?}", op.name());
                instance.apply(doc, listeners, op);
            }
            Invocation::Init(_) if fresh => {
                if options.max > 0 {
                    instance.apply(doc, listeners, Operation::Max(options.max));
                }
                if options.range {
                    instance.apply(doc, listeners, Operation::Range(true));
                }
            }
            Invocation::Init(_) => {}
        }
    }

    /// Drop the instance for `scope` along with every listener attached to it.
    pub fn remove(&mut self, listeners: &mut CheckboxListeners, scope: NodeId) -> bool {
        listeners.off_all(scope);
        self.instances.remove(&scope).is_some()
    }

    /// Drop instances whose scope is no longer alive in `doc`.
    pub fn prune(&mut self, doc: &Document, listeners: &mut CheckboxListeners) {
        self.instances.retain(|&scope, _| {
            let alive = doc.is_alive(scope);
            if !alive {
                listeners.off_all(scope);
            }
            alive
        });
    }
}
