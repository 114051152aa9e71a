// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-scope controller: bulk operations, max selection, and range selection.
//!
//! A [`Checkboxes`] instance owns nothing but the scope handle, the "last
//! interacted checkbox" memory used by range selection, and the options it
//! was created with. Checkbox state lives in the [`Document`], and the
//! max/range behaviors are listeners in a shared [`CheckboxListeners`] table
//! tagged with a [`Behavior`], so a host runs them by matching on the tag.

use alloc::vec::Vec;

use log::trace;
use understory_delegate::listeners::Listeners;
use understory_delegate::types::ClickEvent;
use understory_dom::{Document, NodeId, Selector};

use crate::operation::{Operation, Options};

/// Namespace of the max-selection listener.
pub const MAX_NAMESPACE: &str = "checkboxes.max";
/// Namespace of the range-selection listener.
pub const RANGE_NAMESPACE: &str = "checkboxes.range";

/// Listener payload understood by the host.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Behavior {
    /// Enforce a selection limit after every checkbox click.
    Max {
        /// The limit; always positive.
        limit: usize,
    },
    /// Track the last checkbox and extend on shift-click.
    Range,
    /// Declarative binding on the document root.
    DataApi,
}

/// The listener table shared by every scope of a document.
pub type CheckboxListeners = Listeners<NodeId, Selector, Behavior>;

/// Behavior bound to one scope.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Checkboxes {
    scope: NodeId,
    last: Option<NodeId>,
    options: Options,
}

impl Checkboxes {
    pub(crate) fn new(scope: NodeId, options: Options) -> Self {
        Self {
            scope,
            last: None,
            options,
        }
    }

    /// The scope this instance is bound to.
    pub fn scope(&self) -> NodeId {
        self.scope
    }

    /// The checkbox last acted on while range selection was enabled.
    pub fn last(&self) -> Option<NodeId> {
        self.last
    }

    /// Options the instance was created with.
    pub fn options(&self) -> Options {
        self.options
    }

    /// Returns true if a max-selection listener is installed for this scope.
    pub fn is_max_enabled(&self, listeners: &CheckboxListeners) -> bool {
        listeners.has(self.scope, MAX_NAMESPACE)
    }

    /// Returns true if range selection is enabled for this scope.
    pub fn is_range_enabled(&self, listeners: &CheckboxListeners) -> bool {
        listeners.has(self.scope, RANGE_NAMESPACE)
    }

    /// Run one operation.
    pub fn apply(&mut self, doc: &mut Document, listeners: &mut CheckboxListeners, op: Operation) {
        match op {
            Operation::Check => self.check(doc),
            Operation::Uncheck => self.uncheck(doc),
            Operation::Toggle => self.toggle(doc),
            Operation::Max(limit) => self.max(listeners, limit),
            Operation::Range(enable) => self.range(listeners, enable),
        }
    }

    /// Check every enabled checkbox in scope.
    pub fn check(&self, doc: &mut Document) {
        for cb in self.enabled_checkboxes(doc) {
            doc.set_checked(cb, true);
        }
    }

    /// Uncheck every enabled checkbox in scope.
    pub fn uncheck(&self, doc: &mut Document) {
        for cb in self.enabled_checkboxes(doc) {
            doc.set_checked(cb, false);
        }
    }

    /// Flip every enabled checkbox in scope independently.
    pub fn toggle(&self, doc: &mut Document) {
        for cb in self.enabled_checkboxes(doc) {
            let checked = doc.is_checked(cb);
            doc.set_checked(cb, !checked);
        }
    }

    /// Install (`limit > 0`) or remove (`limit <= 0`) the max-selection listener.
    ///
    /// A new positive limit replaces the previous one. Removing the limit does
    /// not re-enable checkboxes it disabled.
    pub fn max(&mut self, listeners: &mut CheckboxListeners, limit: i64) {
        listeners.off(self.scope, MAX_NAMESPACE);
        if limit <= 0 {
            trace!("max selection off on {:?}", self.scope);
            return;
        }
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);
        trace!("max selection {limit} on {:?}", self.scope);
        listeners.on(
            self.scope,
            MAX_NAMESPACE,
            Some(Selector::Checkbox),
            Behavior::Max { limit },
        );
    }

    /// Enable or disable shift-click range selection.
    ///
    /// At most one range listener is active per scope.
    pub fn range(&mut self, listeners: &mut CheckboxListeners, enable: bool) {
        listeners.off(self.scope, RANGE_NAMESPACE);
        if enable {
            trace!("range selection on for {:?}", self.scope);
            listeners.on(
                self.scope,
                RANGE_NAMESPACE,
                Some(Selector::checkbox_or_label()),
                Behavior::Range,
            );
        } else {
            trace!("range selection off for {:?}", self.scope);
        }
    }

    /// Max-selection handler, run after each checkbox click in scope.
    ///
    /// Unchecked boxes are disabled when exactly `limit` boxes are checked and
    /// enabled otherwise. Checked boxes are never touched.
    pub fn enforce_max(&self, doc: &mut Document, limit: usize) {
        let boxes = doc.checkboxes_in(self.scope);
        let checked = boxes.iter().filter(|&&cb| doc.is_checked(cb)).count();
        let disable = checked == limit;
        for cb in boxes {
            if !doc.is_checked(cb) {
                doc.set_disabled(cb, disable);
            }
        }
    }

    /// Range-selection handler, run for clicks on checkboxes and labels in scope.
    ///
    /// `current` is the matched element on the click's path, which may be an
    /// ancestor of the event target.
    ///
    /// - A label click is taken over: the default is prevented and the
    ///   associated checkbox (by `for` within the scope, else nested) is
    ///   toggled unless disabled.
    /// - A checkbox click stops propagation so an enclosing label does not
    ///   handle it again.
    /// - With Shift held and a previous checkbox recorded, every enabled
    ///   checkbox between the two (inclusive, document order) takes the
    ///   acting checkbox's state.
    pub fn on_range_click(
        &mut self,
        doc: &mut Document,
        current: NodeId,
        event: &mut ClickEvent<NodeId>,
    ) {
        let mut acting = None;

        if doc.is_label(current) {
            event.prevent_default();
            acting = self.label_checkbox(doc, current);
            if let Some(cb) = acting
                && !doc.is_disabled(cb)
            {
                let checked = doc.is_checked(cb);
                doc.set_checked(cb, !checked);
            }
        }

        if doc.is_checkbox(current) {
            event.stop_propagation();
            acting = Some(current);
        }

        let Some(acting) = acting else {
            return;
        };

        if event.shift_key()
            && let Some(last) = self.last
        {
            self.extend_range(doc, last, acting);
        }
        self.last = Some(acting);
    }

    fn extend_range(&self, doc: &mut Document, last: NodeId, acting: NodeId) {
        let boxes = doc.checkboxes_in(self.scope);
        let (Some(from), Some(to)) = (
            boxes.iter().position(|&cb| cb == last),
            boxes.iter().position(|&cb| cb == acting),
        ) else {
            trace!("range endpoint left {:?}; not extending", self.scope);
            return;
        };
        let (start, end) = (from.min(to), from.max(to));
        let checked = doc.is_checked(acting);
        trace!("range {start}..={end} -> {checked} in {:?}", self.scope);
        for &cb in &boxes[start..=end] {
            if !doc.is_disabled(cb) {
                doc.set_checked(cb, checked);
            }
        }
    }

    /// `for` must name a checkbox inside the scope; otherwise the first
    /// checkbox nested in the label is used.
    fn label_checkbox(&self, doc: &Document, label: NodeId) -> Option<NodeId> {
        doc.attr(label, "for")
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .and_then(|id| doc.element_by_id_in(self.scope, id))
            .filter(|&n| doc.is_checkbox(n))
            .or_else(|| doc.first_checkbox_in(label))
    }

    fn enabled_checkboxes(&self, doc: &Document) -> Vec<NodeId> {
        let mut boxes = doc.checkboxes_in(self.scope);
        boxes.retain(|&cb| !doc.is_disabled(cb));
        boxes
    }
}
