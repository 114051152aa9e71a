// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Headless host: a document, its listener table, and the scope registry.
//!
//! [`Page`] plays the browser's part. It routes clicks through the delegated
//! listeners, runs the behavior each listener is tagged with, and performs
//! the default actions a real page would (checkbox activation, label
//! activation, link navigation).

use alloc::string::String;

use log::{debug, trace};
use understory_delegate::dispatcher;
use understory_delegate::router::Router;
use understory_delegate::types::{ClickEvent, Modifiers};
use understory_dom::{Changes, Document, NodeId};

use crate::controller::{Behavior, CheckboxListeners};
use crate::data_api;
use crate::operation::{Invocation, Operation};
use crate::registry::Registry;

/// What a simulated click did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClickOutcome {
    /// A listener called `prevent_default` on the click.
    pub default_prevented: bool,
    /// The `href` the click would have followed.
    pub navigation: Option<String>,
    /// State transitions drained from the document after the click.
    ///
    /// This includes anything recorded since the change log was last drained,
    /// not only the click's own mutations. A reverted checkbox flip appears
    /// twice and nets out in [`Changes::checked_toggled`].
    pub changes: Changes,
}

/// A document with checkbox behaviors attached.
///
/// ## Example
///
/// ```
/// use understory_checkboxes::{Operation, Page};
/// use understory_delegate::types::Modifiers;
/// use understory_dom::{Document, ElementData};
///
/// let mut doc = Document::new();
/// let list = doc.append(doc.root(), ElementData::new("ul"));
/// let boxes: Vec<_> = (0..3)
///     .map(|_| doc.append(list, ElementData::checkbox()))
///     .collect();
///
/// let mut page = Page::new(doc);
/// page.checkboxes(list, Operation::Range(true));
/// page.click(boxes[0], Modifiers::empty());
/// page.click(boxes[2], Modifiers::SHIFT);
/// assert!(boxes.iter().all(|&cb| page.document().is_checked(cb)));
/// ```
#[derive(Debug)]
pub struct Page {
    doc: Document,
    listeners: CheckboxListeners,
    registry: Registry,
}

impl Page {
    /// Wrap a document with the declarative binding listener installed.
    pub fn new(doc: Document) -> Self {
        Self::with_data_api(doc, true)
    }

    /// Wrap a document, optionally installing the declarative binding listener.
    pub fn with_data_api(doc: Document, data_api: bool) -> Self {
        let mut listeners = CheckboxListeners::new();
        if data_api {
            listeners.on(
                doc.root(),
                data_api::NAMESPACE,
                Some(data_api::marker_selector()),
                Behavior::DataApi,
            );
        }
        Self {
            doc,
            listeners,
            registry: Registry::new(),
        }
    }

    /// The underlying document.
    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// Mutable access to the underlying document.
    ///
    /// Use [`Page::remove`] to remove elements so the registry stays in sync.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    /// The listener table.
    pub fn listeners(&self) -> &CheckboxListeners {
        &self.listeners
    }

    /// The scope registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Run an operation on `scope`, or create its instance with options.
    pub fn checkboxes(&mut self, scope: NodeId, invocation: impl Into<Invocation>) {
        self.registry
            .invoke(&mut self.doc, &mut self.listeners, scope, invocation.into());
    }

    /// String form of [`Page::checkboxes`]; unknown names are ignored.
    pub fn checkboxes_named(&mut self, scope: NodeId, name: &str, value: Option<&str>) {
        match Operation::parse(name, value) {
            Ok(op) => self.checkboxes(scope, op),
            Err(err) => debug!("ignoring checkboxes call on {scope:?}: {err}"),
        }
    }

    /// Returns true while the declarative binding listener is installed.
    pub fn is_data_api_bound(&self) -> bool {
        self.listeners.has(self.doc.root(), data_api::NAMESPACE)
    }

    /// Remove the declarative binding listener.
    pub fn unbind_data_api(&mut self) {
        let removed = self.listeners.off(self.doc.root(), "data-api");
        trace!("unbound {removed} data-api listener(s)");
    }

    /// Apply declarative bindings, as on document ready.
    ///
    /// Each marked element's operations run, in attribute order, on every
    /// scope it resolves to. Does nothing once the binding has been removed.
    pub fn ready(&mut self) {
        if !self.is_data_api_bound() {
            return;
        }
        for el in data_api::marked_elements(&self.doc) {
            let scopes = data_api::resolve_scopes(&self.doc, el);
            if scopes.is_empty() {
                debug!("no scope for marked element {el:?}");
                continue;
            }
            for op in data_api::ready_operations(&self.doc, el) {
                for &scope in &scopes {
                    self.checkboxes(scope, op);
                }
            }
        }
    }

    /// Remove an element and its subtree, dropping instances bound inside it.
    pub fn remove(&mut self, node: NodeId) {
        self.doc.remove(node);
        self.registry.prune(&self.doc, &mut self.listeners);
    }

    /// Simulate a user click on `target`.
    pub fn click(&mut self, target: NodeId, modifiers: Modifiers) -> ClickOutcome {
        let (default_prevented, navigation) = self.activate(target, modifiers);
        ClickOutcome {
            default_prevented,
            navigation,
            changes: self.doc.take_changes(),
        }
    }

    fn activate(&mut self, target: NodeId, modifiers: Modifiers) -> (bool, Option<String>) {
        if !self.doc.is_alive(target) || self.doc.is_disabled(target) {
            debug!("click on stale or disabled {target:?} ignored");
            return (false, None);
        }

        let is_checkbox = self.doc.is_checkbox(target);
        if is_checkbox {
            let checked = self.doc.is_checked(target);
            self.doc.set_checked(target, !checked);
        }

        let queue = Router::with_parent(&self.doc).delegate(&self.listeners, &self.doc, target);
        let mut event = ClickEvent::new(target, modifiers);
        let Self {
            doc,
            listeners,
            registry,
        } = self;
        dispatcher::run(&queue, &mut event, |d, ev| {
            match d.handler {
                Behavior::Max { limit } => {
                    if let Some(instance) = registry.get(d.node) {
                        instance.enforce_max(doc, limit);
                    }
                }
                Behavior::Range => {
                    if let Some(instance) = registry.get_mut(d.node) {
                        instance.on_range_click(doc, d.current, ev);
                    }
                }
                Behavior::DataApi => {
                    data_api_click(doc, listeners, registry, d.current, ev);
                }
            }
            ev.outcome()
        });

        if event.default_prevented {
            if is_checkbox {
                let checked = self.doc.is_checked(target);
                self.doc.set_checked(target, !checked);
            }
            return (true, None);
        }

        if !is_checkbox
            && let Some(control) = self.label_control(target)
        {
            trace!("label activation {target:?} -> {control:?}");
            self.activate(control, modifiers);
        }
        let navigation = self
            .ancestor_or_self(target, |doc, n| doc.attr(n, "href").is_some())
            .and_then(|n| self.doc.attr(n, "href"))
            .map(String::from);
        (false, navigation)
    }

    /// The checkbox a click on `target` activates through an enclosing label.
    fn label_control(&self, target: NodeId) -> Option<NodeId> {
        let label = self.ancestor_or_self(target, Document::is_label)?;
        self.doc
            .attr(label, "for")
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .and_then(|id| self.doc.element_by_id(id))
            .filter(|&n| self.doc.is_checkbox(n))
            .or_else(|| self.doc.first_checkbox_in(label))
    }

    fn ancestor_or_self(
        &self,
        node: NodeId,
        pred: impl Fn(&Document, NodeId) -> bool,
    ) -> Option<NodeId> {
        let mut cur = Some(node);
        while let Some(n) = cur {
            if pred(&self.doc, n) {
                return Some(n);
            }
            cur = self.doc.parent_of(n);
        }
        None
    }
}

/// Click-time declarative binding on a marked element.
fn data_api_click(
    doc: &mut Document,
    listeners: &mut CheckboxListeners,
    registry: &mut Registry,
    el: NodeId,
    event: &mut ClickEvent<NodeId>,
) {
    let scopes = data_api::resolve_scopes(doc, el);
    if scopes.is_empty() {
        return;
    }
    let Some(op) = data_api::click_operation(doc, el) else {
        return;
    };
    if !doc.is_checkbox(el) {
        event.prevent_default();
    }
    for scope in scopes {
        registry.invoke(doc, listeners, scope, op.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use understory_dom::ElementData;

    use crate::Options;

    /// `<ul id="list">` holding `n` checkboxes, each in its own `<li>`.
    fn list_page(n: usize) -> (Page, NodeId, Vec<NodeId>) {
        let mut doc = Document::new();
        let list = doc.append(doc.root(), ElementData::new("ul").with_id("list"));
        let boxes = (0..n)
            .map(|i| {
                let li = doc.append(list, ElementData::new("li"));
                let id = alloc::format!("cb{i}");
                doc.append(li, ElementData::checkbox().with_id(&id))
            })
            .collect();
        (Page::new(doc), list, boxes)
    }

    fn checked(page: &Page, boxes: &[NodeId]) -> Vec<bool> {
        boxes.iter().map(|&cb| page.document().is_checked(cb)).collect()
    }

    fn disabled(page: &Page, boxes: &[NodeId]) -> Vec<bool> {
        boxes
            .iter()
            .map(|&cb| page.document().is_disabled(cb))
            .collect()
    }

    #[test]
    fn max_two_disables_and_re_enables() {
        let (mut page, list, boxes) = list_page(4);
        page.checkboxes(list, Operation::Max(2));
        page.click(boxes[0], Modifiers::empty());
        page.click(boxes[1], Modifiers::empty());
        assert_eq!(disabled(&page, &boxes), [false, false, true, true]);

        let out = page.click(boxes[2], Modifiers::empty());
        assert!(out.changes.is_empty(), "disabled boxes get no click");
        assert_eq!(checked(&page, &boxes), [true, true, false, false]);

        page.click(boxes[1], Modifiers::empty());
        assert_eq!(disabled(&page, &boxes), [false, false, false, false]);
    }

    #[test]
    fn disabling_max_keeps_earlier_disables() {
        let (mut page, list, boxes) = list_page(3);
        page.checkboxes(list, Operation::Max(1));
        page.click(boxes[0], Modifiers::empty());
        assert_eq!(disabled(&page, &boxes), [false, true, true]);

        page.checkboxes_named(list, "max", Some("0"));
        page.click(boxes[0], Modifiers::empty());
        assert_eq!(disabled(&page, &boxes), [false, true, true]);
        page.click(boxes[0], Modifiers::empty());
        assert_eq!(checked(&page, &boxes), [true, false, false]);
        assert_eq!(disabled(&page, &boxes), [false, true, true]);
    }

    /// `#a.list` and `#b.list`, one checkbox each.
    fn two_lists() -> (Document, [NodeId; 2]) {
        let mut doc = Document::new();
        let root = doc.root();
        let mut boxes = [root; 2];
        for (slot, id) in boxes.iter_mut().zip(["a", "b"]) {
            let list = doc.append(
                root,
                ElementData::new("ul").with_id(id).with_attr("class", "list"),
            );
            *slot = doc.append(list, ElementData::checkbox());
        }
        (doc, boxes)
    }

    #[test]
    fn ready_binds_every_matching_scope() {
        for context in ["#a, #b", ".list"] {
            let (mut doc, boxes) = two_lists();
            doc.append(
                doc.root(),
                ElementData::new("div")
                    .with_attr("data-toggle", "checkboxes")
                    .with_attr("data-context", context)
                    .with_attr("data-action", "check")
                    .with_attr("data-range", "true"),
            );
            let mut page = Page::new(doc);
            page.ready();
            assert_eq!(checked(&page, &boxes), [true, true], "context {context:?}");
            assert_eq!(page.registry().len(), 2, "context {context:?}");
        }
    }

    #[test]
    fn data_api_click_runs_on_every_matching_scope() {
        let (mut doc, boxes) = two_lists();
        let button = doc.append(
            doc.root(),
            ElementData::new("button")
                .with_attr("data-toggle", "checkboxes")
                .with_attr("data-context", ".list")
                .with_attr("data-action", "toggle"),
        );
        let mut page = Page::new(doc);
        let out = page.click(button, Modifiers::empty());
        assert!(out.default_prevented);
        assert_eq!(checked(&page, &boxes), [true, true]);
        assert_eq!(out.changes.checked_toggled(), boxes);
    }

    #[test]
    fn shift_click_on_labels_extends_range() {
        let mut doc = Document::new();
        let list = doc.append(doc.root(), ElementData::new("ul"));
        let mut texts = Vec::new();
        let mut boxes = Vec::new();
        for _ in 0..5 {
            let label = doc.append(list, ElementData::label(None));
            texts.push(doc.append(label, ElementData::new("span")));
            boxes.push(doc.append(label, ElementData::checkbox()));
        }
        let mut page = Page::new(doc);
        page.checkboxes(list, Operation::Range(true));

        let out = page.click(texts[0], Modifiers::empty());
        assert!(out.default_prevented);
        page.click(texts[3], Modifiers::SHIFT);
        assert_eq!(checked(&page, &boxes), [true, true, true, true, false]);
        assert_eq!(page.registry().get(list).and_then(|c| c.last()), Some(boxes[3]));
    }

    #[test]
    fn shift_click_selects_range() {
        let (mut page, list, boxes) = list_page(5);
        page.checkboxes(list, Operation::Range(true));
        let out = page.click(boxes[0], Modifiers::empty());
        assert!(!out.default_prevented);
        assert_eq!(out.changes.checked_toggled(), [boxes[0]]);
        assert_eq!(page.registry().get(list).and_then(|c| c.last()), Some(boxes[0]));

        page.click(boxes[3], Modifiers::SHIFT);
        assert_eq!(checked(&page, &boxes), [true, true, true, true, false]);
    }

    #[test]
    fn label_click_toggles_once() {
        for range in [false, true] {
            for max in [0, 3] {
                let (mut page, list, boxes) = list_page(3);
                let label = page
                    .document_mut()
                    .append(list, ElementData::label(Some("cb1")));
                page.checkboxes(list, Operation::Range(range));
                page.checkboxes(list, Operation::Max(max));
                page.click(label, Modifiers::empty());
                assert_eq!(
                    checked(&page, &boxes),
                    [false, true, false],
                    "range={range} max={max}"
                );
            }
        }
    }

    #[test]
    fn checkbox_inside_label_toggles_once() {
        for range in [false, true] {
            let mut doc = Document::new();
            let list = doc.append(doc.root(), ElementData::new("div"));
            let label = doc.append(list, ElementData::label(None));
            let text = doc.append(label, ElementData::new("span"));
            let cb = doc.append(label, ElementData::checkbox());
            let mut page = Page::new(doc);
            page.checkboxes(list, Operation::Range(range));

            page.click(cb, Modifiers::empty());
            assert!(page.document().is_checked(cb), "range={range}");
            page.click(text, Modifiers::empty());
            assert!(!page.document().is_checked(cb), "range={range}");
        }
    }

    #[test]
    fn label_activation_skips_disabled_control() {
        let (mut page, list, boxes) = list_page(1);
        page.document_mut().set_disabled(boxes[0], true);
        let label = page
            .document_mut()
            .append(list, ElementData::label(Some("cb0")));
        page.click(label, Modifiers::empty());
        assert!(!page.document().is_checked(boxes[0]));
    }

    #[test]
    fn ready_applies_declarative_bindings() {
        let (mut page, list, boxes) = list_page(3);
        let root = page.document().root();
        page.document_mut().append(
            root,
            ElementData::new("div")
                .with_attr("data-toggle", "checkboxes")
                .with_attr("data-context", "#list")
                .with_attr("data-action", "check")
                .with_attr("data-range", "true"),
        );
        page.ready();
        assert_eq!(checked(&page, &boxes), [true, true, true]);
        let instance = page.registry().get(list).unwrap();
        assert!(instance.is_range_enabled(page.listeners()));
    }

    #[test]
    fn ready_is_inert_once_unbound() {
        let (mut page, _, boxes) = list_page(2);
        let root = page.document().root();
        page.document_mut().append(
            root,
            ElementData::new("a")
                .with_attr("href", "#list")
                .with_attr("data-toggle", "checkboxes")
                .with_attr("data-action", "check"),
        );
        page.unbind_data_api();
        assert!(!page.is_data_api_bound());
        page.ready();
        assert_eq!(checked(&page, &boxes), [false, false]);
        assert!(page.registry().is_empty());
    }

    #[test]
    fn data_api_link_prevents_navigation() {
        let (mut page, _, boxes) = list_page(2);
        let root = page.document().root();
        let link = page.document_mut().append(
            root,
            ElementData::new("a")
                .with_attr("href", "page.html#list")
                .with_attr("data-toggle", "checkboxes")
                .with_attr("data-action", "toggle"),
        );
        let out = page.click(link, Modifiers::empty());
        assert!(out.default_prevented);
        assert_eq!(out.navigation, None);
        assert_eq!(checked(&page, &boxes), [true, true]);
    }

    #[test]
    fn data_api_on_nested_target_uses_marked_element() {
        let (mut page, _, boxes) = list_page(2);
        let root = page.document().root();
        let link = page.document_mut().append(
            root,
            ElementData::new("a")
                .with_attr("href", "#list")
                .with_attr("data-toggle", "checkboxes")
                .with_attr("data-action", "check"),
        );
        let icon = page.document_mut().append(link, ElementData::new("i"));
        let out = page.click(icon, Modifiers::empty());
        assert!(out.default_prevented);
        assert_eq!(checked(&page, &boxes), [true, true]);
    }

    #[test]
    fn data_api_checkbox_keeps_default() {
        let (mut page, _, boxes) = list_page(2);
        let root = page.document().root();
        let master = page.document_mut().append(
            root,
            ElementData::checkbox()
                .with_attr("data-toggle", "checkboxes")
                .with_attr("data-context", "#list")
                .with_attr("data-action", "toggle"),
        );
        let out = page.click(master, Modifiers::empty());
        assert!(!out.default_prevented);
        assert!(page.document().is_checked(master));
        assert_eq!(checked(&page, &boxes), [true, true]);
    }

    #[test]
    fn marked_element_without_scope_keeps_navigation() {
        let (mut page, _, _) = list_page(1);
        let root = page.document().root();
        let link = page.document_mut().append(
            root,
            ElementData::new("a")
                .with_attr("href", "#nowhere")
                .with_attr("data-toggle", "checkboxes")
                .with_attr("data-action", "check"),
        );
        let out = page.click(link, Modifiers::empty());
        assert!(!out.default_prevented);
        assert_eq!(out.navigation.as_deref(), Some("#nowhere"));
        assert!(page.registry().is_empty());
    }

    #[test]
    fn prevented_checkbox_click_is_reverted() {
        let (mut page, _, boxes) = list_page(2);
        let root = page.document().root();
        let label = page.document_mut().append(
            root,
            ElementData::label(None)
                .with_attr("data-toggle", "checkboxes")
                .with_attr("data-context", "#list")
                .with_attr("data-action", "check"),
        );
        let cb = page.document_mut().append(label, ElementData::checkbox());
        let out = page.click(cb, Modifiers::empty());
        assert!(out.default_prevented);
        assert!(!page.document().is_checked(cb));
        assert_eq!(checked(&page, &boxes), [true, true]);
        assert_eq!(out.changes.checked_toggled(), boxes);
    }

    #[test]
    fn unknown_names_and_stale_scopes_are_ignored() {
        let (mut page, list, boxes) = list_page(2);
        page.checkboxes_named(list, "explode", None);
        page.checkboxes_named(list, "max", Some("lots"));
        assert!(page.registry().is_empty());
        page.remove(list);
        page.checkboxes(list, Operation::Check);
        assert!(page.registry().is_empty());
        assert!(!page.document().is_checked(boxes[0]));
        let out = page.click(boxes[0], Modifiers::empty());
        assert_eq!(out, ClickOutcome::default());
    }

    #[test]
    fn removing_a_scope_drops_its_listeners() {
        let (mut page, list, _) = list_page(2);
        page.checkboxes(list, Operation::Range(true));
        page.checkboxes(list, Operation::Max(1));
        assert_eq!(page.listeners().len(), 3);
        page.remove(list);
        assert!(page.registry().get(list).is_none());
        assert_eq!(page.listeners().len(), 1);
        assert!(page.is_data_api_bound());
    }

    #[test]
    fn initial_options_apply_once() {
        let (mut page, list, boxes) = list_page(3);
        page.checkboxes(
            list,
            Options {
                max: 1,
                range: false,
            },
        );
        page.click(boxes[1], Modifiers::empty());
        assert_eq!(disabled(&page, &boxes), [true, false, true]);
        page.checkboxes(list, Options::default());
        let instance = page.registry().get(list).unwrap();
        assert!(instance.is_max_enabled(page.listeners()));
        assert!(!instance.is_range_enabled(page.listeners()));
    }
}
