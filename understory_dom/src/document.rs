// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core document implementation: structure, state updates, queries.

use alloc::string::String;
use alloc::vec::Vec;
use hashbrown::HashMap;

use crate::changes::Changes;
use crate::selector::{AttrOp, Selector};
use crate::types::{
    Attributes, ElementData, ElementKind, ElementState, NodeId, classify, get_attr, set_attr,
};

/// Tag of the implicit root element.
pub const ROOT_TAG: &str = "#document";

/// Element tree with form-control state.
///
/// A document always has exactly one root, created by [`Document::new`] and
/// never removed. Elements are appended under a live parent; their children
/// keep insertion order, which together with pre-order traversal defines
/// document order.
///
/// State mutations ([`Document::set_checked`], [`Document::set_disabled`])
/// take effect immediately and are also recorded; drain them with
/// [`Document::take_changes`].
///
/// ## Example
///
/// ```rust
/// use understory_dom::{Document, ElementData};
///
/// let mut doc = Document::new();
/// let list = doc.append(doc.root(), ElementData::new("ul").with_id("list"));
/// let a = doc.append(list, ElementData::checkbox());
/// let b = doc.append(list, ElementData::checkbox());
///
/// assert_eq!(doc.checkboxes_in(list), vec![a, b]);
/// doc.set_checked(b, true);
/// assert!(doc.is_checked(b));
/// assert_eq!(doc.take_changes().checked_toggled(), vec![b]);
/// ```
pub struct Document {
    /// slots
    nodes: Vec<Option<Node>>,
    /// last generation per slot (persists across frees)
    generations: Vec<u32>,
    free_list: Vec<usize>,
    root: NodeId,
    ids: HashMap<String, Vec<NodeId>>,
    changes: Changes,
}

impl core::fmt::Debug for Document {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        let free = self.free_list.len();
        f.debug_struct("Document")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &free)
            .field("pending_changes", &self.changes.entries.len())
            .finish_non_exhaustive()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Debug)]
struct Node {
    generation: u32,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    tag: String,
    attrs: Attributes,
    state: ElementState,
}

impl Node {
    fn new(generation: u32, data: ElementData) -> Self {
        Self {
            generation,
            parent: None,
            children: Vec::new(),
            tag: data.tag,
            attrs: data.attrs,
            state: data.state,
        }
    }
}

impl Document {
    /// Create a document containing only its root.
    pub fn new() -> Self {
        let mut doc = Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            root: NodeId::new(0, 1),
            ids: HashMap::new(),
            changes: Changes::default(),
        };
        doc.root = doc.alloc(ElementData::new(ROOT_TAG));
        doc
    }

    /// The root element.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Append a new element as the last child of `parent`.
    ///
    /// A stale `parent` falls back to the root so the element is never orphaned.
    pub fn append(&mut self, parent: NodeId, data: ElementData) -> NodeId {
        let parent = if self.is_alive(parent) {
            parent
        } else {
            self.root
        };
        let id = self.alloc(data);
        self.link_parent(id, parent);
        id
    }

    /// Remove an element and its subtree. Removing the root is a no-op.
    pub fn remove(&mut self, id: NodeId) {
        if !self.is_alive(id) || id == self.root {
            return;
        }
        if let Some(parent) = self.node(id).parent {
            self.unlink_parent(id, parent);
        }
        let children = self.node(id).children.clone();
        for child in children {
            self.remove(child);
        }
        if let Some(element_id) = get_attr(&self.node(id).attrs, "id").map(String::from) {
            self.unindex_id(&element_id, id);
        }
        self.nodes[id.idx()] = None;
        self.free_list.push(id.idx());
    }

    /// Move `id` to be the last child of `new_parent`.
    ///
    /// Ignored if either handle is stale, if `id` is the root, or if it would
    /// create a cycle.
    pub fn reparent(&mut self, id: NodeId, new_parent: NodeId) {
        if !self.is_alive(id)
            || !self.is_alive(new_parent)
            || id == self.root
            || self.contains(id, new_parent)
        {
            return;
        }
        if let Some(parent) = self.node(id).parent {
            self.unlink_parent(id, parent);
        }
        self.link_parent(id, new_parent);
    }

    /// Returns true if `id` refers to a live element.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.nodes
            .get(id.idx())
            .and_then(|n| n.as_ref())
            .map(|n| n.generation == id.1)
            .unwrap_or(false)
    }

    /// Returns the tag of a live element.
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        self.get(id).map(|n| n.tag.as_str())
    }

    /// Returns the value of an attribute on a live element.
    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.get(id).and_then(|n| get_attr(&n.attrs, name))
    }

    /// Returns all attributes of a live element in source order (empty if stale).
    pub fn attrs(&self, id: NodeId) -> &[(String, String)] {
        self.get(id).map(|n| n.attrs.as_slice()).unwrap_or(&[])
    }

    /// Set an attribute, keeping the id index in sync.
    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) {
        if !self.is_alive(id) {
            return;
        }
        if name.eq_ignore_ascii_case("id") {
            if let Some(old) = get_attr(&self.node(id).attrs, "id").map(String::from) {
                self.unindex_id(&old, id);
            }
            self.index_id(value, id);
        }
        set_attr(&mut self.node_mut(id).attrs, name, value);
    }

    /// Classify a live element; stale handles are [`ElementKind::Other`].
    pub fn kind(&self, id: NodeId) -> ElementKind {
        let Some(n) = self.get(id) else {
            return ElementKind::Other;
        };
        classify(&n.tag, &n.attrs)
    }

    /// Returns true for a live checkbox.
    pub fn is_checkbox(&self, id: NodeId) -> bool {
        self.kind(id) == ElementKind::Checkbox
    }

    /// Returns true for a live label.
    pub fn is_label(&self, id: NodeId) -> bool {
        self.kind(id) == ElementKind::Label
    }

    /// Returns the state flags of a live element.
    pub fn state(&self, id: NodeId) -> Option<ElementState> {
        self.get(id).map(|n| n.state)
    }

    /// Returns true if the element is live and checked.
    pub fn is_checked(&self, id: NodeId) -> bool {
        self.state(id)
            .is_some_and(|s| s.contains(ElementState::CHECKED))
    }

    /// Returns true if the element is live and disabled.
    pub fn is_disabled(&self, id: NodeId) -> bool {
        self.state(id)
            .is_some_and(|s| s.contains(ElementState::DISABLED))
    }

    /// Update the checked flag.
    pub fn set_checked(&mut self, id: NodeId, checked: bool) {
        self.set_state_flag(id, ElementState::CHECKED, checked);
    }

    /// Update the disabled flag.
    pub fn set_disabled(&mut self, id: NodeId, disabled: bool) {
        self.set_state_flag(id, ElementState::DISABLED, disabled);
    }

    /// Drain the state transitions recorded since the last call.
    pub fn take_changes(&mut self) -> Changes {
        core::mem::take(&mut self.changes)
    }

    /// Returns the parent of an element if live, or `None` for the root or stale ids.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Get the children of an element, or an empty slice if it is stale.
    pub fn children_of(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Returns true if `node` is `ancestor` or lies inside its subtree.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        if !self.is_alive(ancestor) || !self.is_alive(node) {
            return false;
        }
        let mut cur = Some(node);
        while let Some(n) = cur {
            if n == ancestor {
                return true;
            }
            cur = self.parent_of(n);
        }
        false
    }

    /// Get the next element in depth-first (document) order.
    ///
    /// Returns `None` at the end of the document or if `current` is stale.
    pub fn next_depth_first(&self, current: NodeId) -> Option<NodeId> {
        if !self.is_alive(current) {
            return None;
        }
        self.next_in_order(current, None)
    }

    /// Get the previous element in reverse depth-first order.
    pub fn prev_depth_first(&self, current: NodeId) -> Option<NodeId> {
        if !self.is_alive(current) {
            return None;
        }
        if let Some(prev_sibling) = self.prev_sibling(current) {
            return Some(self.last_in_subtree(prev_sibling));
        }
        self.parent_of(current)
    }

    /// Iterate the strict descendants of `scope` in document order.
    pub fn descendants(&self, scope: NodeId) -> Descendants<'_> {
        let next = if self.is_alive(scope) {
            self.node(scope).children.first().copied()
        } else {
            None
        };
        Descendants {
            doc: self,
            scope,
            next,
        }
    }

    /// All checkboxes inside `scope` in document order.
    pub fn checkboxes_in(&self, scope: NodeId) -> Vec<NodeId> {
        self.descendants(scope)
            .filter(|&id| self.is_checkbox(id))
            .collect()
    }

    /// The first checkbox nested inside `node`, if any.
    pub fn first_checkbox_in(&self, node: NodeId) -> Option<NodeId> {
        self.descendants(node).find(|&id| self.is_checkbox(id))
    }

    /// Look up an element by `id` anywhere in the document.
    ///
    /// When several elements share an id, the first in document order wins.
    pub fn element_by_id(&self, element_id: &str) -> Option<NodeId> {
        let candidates = self.ids.get(element_id)?;
        self.descendants(self.root).find(|n| candidates.contains(n))
    }

    /// Look up an element by `id` among the strict descendants of `scope`.
    pub fn element_by_id_in(&self, scope: NodeId, element_id: &str) -> Option<NodeId> {
        let candidates = self.ids.get(element_id)?;
        self.descendants(scope).find(|n| candidates.contains(n))
    }

    /// Returns true if a live element matches the selector.
    pub fn matches(&self, id: NodeId, selector: &Selector) -> bool {
        let Some(n) = self.get(id) else {
            return false;
        };
        match selector {
            Selector::Id(want) => get_attr(&n.attrs, "id") == Some(want.as_str()),
            Selector::Tag(tag) => n.tag == *tag,
            Selector::Class(class) => get_attr(&n.attrs, "class")
                .is_some_and(|v| v.split_ascii_whitespace().any(|c| c == class)),
            Selector::Checkbox => self.is_checkbox(id),
            Selector::Attr { name, op } => match (get_attr(&n.attrs, name), op) {
                (None, _) => false,
                (Some(_), AttrOp::Exists) => true,
                (Some(v), AttrOp::Equals(want)) => v == want,
                (Some(v), AttrOp::Prefix(prefix)) => v.starts_with(prefix.as_str()),
            },
            Selector::Any(alternatives) => alternatives.iter().any(|s| self.matches(id, s)),
        }
    }

    /// All strict descendants of `scope` matching `selector`, in document order.
    pub fn query_all(&self, scope: NodeId, selector: &Selector) -> Vec<NodeId> {
        self.descendants(scope)
            .filter(|&id| self.matches(id, selector))
            .collect()
    }

    /// The first strict descendant of `scope` matching `selector`.
    pub fn query(&self, scope: NodeId, selector: &Selector) -> Option<NodeId> {
        if let Selector::Id(want) = selector {
            return self.element_by_id_in(scope, want);
        }
        self.descendants(scope).find(|&id| self.matches(id, selector))
    }

    // --- internals ---

    fn alloc(&mut self, data: ElementData) -> NodeId {
        let element_id = data.attr("id").map(String::from);
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, data));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Node::new(generation, data)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            ((self.nodes.len() - 1) as u32, generation)
        };
        let id = NodeId::new(idx, generation);
        if let Some(element_id) = element_id {
            self.index_id(&element_id, id);
        }
        id
    }

    fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes
            .get(id.idx())
            .and_then(|slot| slot.as_ref())
            .filter(|n| n.generation == id.1)
    }

    /// Access a live node; panics if `id` is stale.
    fn node(&self, id: NodeId) -> &Node {
        self.nodes[id.idx()].as_ref().expect("dangling NodeId")
    }

    /// Access a live node mutably; panics if `id` is stale.
    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.nodes[id.idx()].as_mut().expect("dangling NodeId")
    }

    fn set_state_flag(&mut self, id: NodeId, flag: ElementState, on: bool) {
        if !self.is_alive(id) {
            return;
        }
        let n = self.node_mut(id);
        let before = n.state;
        n.state.set(flag, on);
        let after = n.state;
        self.changes.record(id, before, after);
    }

    fn index_id(&mut self, element_id: &str, id: NodeId) {
        self.ids.entry(element_id.into()).or_default().push(id);
    }

    fn unindex_id(&mut self, element_id: &str, id: NodeId) {
        if let Some(list) = self.ids.get_mut(element_id) {
            list.retain(|n| *n != id);
            if list.is_empty() {
                self.ids.remove(element_id);
            }
        }
    }

    /// Next in pre-order, never leaving the subtree of `limit` when one is given.
    fn next_in_order(&self, current: NodeId, limit: Option<NodeId>) -> Option<NodeId> {
        if let Some(&first_child) = self.node(current).children.first() {
            return Some(first_child);
        }
        let mut node = current;
        while Some(node) != limit {
            let parent = self.parent_of(node)?;
            if let Some(next_sibling) = self.next_sibling(node) {
                return Some(next_sibling);
            }
            node = parent;
        }
        None
    }

    fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        let parent = self.parent_of(node)?;
        let siblings = &self.node(parent).children;
        let pos = siblings.iter().position(|&id| id == node)?;
        siblings.get(pos + 1).copied()
    }

    fn prev_sibling(&self, node: NodeId) -> Option<NodeId> {
        let parent = self.parent_of(node)?;
        let siblings = &self.node(parent).children;
        let pos = siblings.iter().position(|&id| id == node)?;
        pos.checked_sub(1).and_then(|p| siblings.get(p).copied())
    }

    fn last_in_subtree(&self, node: NodeId) -> NodeId {
        let mut cur = node;
        while let Some(&last) = self.node(cur).children.last() {
            cur = last;
        }
        cur
    }

    fn link_parent(&mut self, id: NodeId, parent: NodeId) {
        self.node_mut(parent).children.push(id);
        self.node_mut(id).parent = Some(parent);
    }

    fn unlink_parent(&mut self, id: NodeId, parent: NodeId) {
        self.node_mut(parent).children.retain(|c| *c != id);
        self.node_mut(id).parent = None;
    }
}

/// Iterator over the strict descendants of a scope, in document order.
///
/// Created by [`Document::descendants`].
#[derive(Debug)]
pub struct Descendants<'a> {
    doc: &'a Document,
    scope: NodeId,
    next: Option<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let cur = self.next?;
        self.next = self.doc.next_in_order(cur, Some(self.scope));
        Some(cur)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    /// root -> [list -> [a, group -> [b, c], d], e]
    fn sample() -> (Document, NodeId, [NodeId; 5]) {
        let mut doc = Document::new();
        let root = doc.root();
        let list = doc.append(root, ElementData::new("ul").with_id("list"));
        let a = doc.append(list, ElementData::checkbox().with_id("a"));
        let group = doc.append(list, ElementData::new("li"));
        let b = doc.append(group, ElementData::checkbox().with_id("b"));
        let c = doc.append(group, ElementData::checkbox().with_id("c"));
        let d = doc.append(list, ElementData::checkbox().with_id("d"));
        let e = doc.append(root, ElementData::checkbox().with_id("e"));
        (doc, list, [a, b, c, d, e])
    }

    #[test]
    fn document_order_is_pre_order() {
        let (doc, list, [a, b, c, d, e]) = sample();
        assert_eq!(doc.checkboxes_in(list), vec![a, b, c, d]);
        assert_eq!(doc.checkboxes_in(doc.root()), vec![a, b, c, d, e]);
    }

    #[test]
    fn descendants_stay_inside_scope() {
        let (doc, list, [_, b, c, _, _]) = sample();
        let group = doc.parent_of(b).unwrap();
        let inside: Vec<NodeId> = doc.descendants(group).collect();
        assert_eq!(inside, vec![b, c]);
        assert!(doc.descendants(b).next().is_none());
        assert!(!doc.descendants(list).any(|n| n == list));
    }

    #[test]
    fn depth_first_walks_both_directions() {
        let (doc, list, [a, b, c, d, e]) = sample();
        let group = doc.parent_of(b).unwrap();
        let root = doc.root();
        let forward = [root, list, a, group, b, c, d, e];
        for pair in forward.windows(2) {
            assert_eq!(doc.next_depth_first(pair[0]), Some(pair[1]));
            assert_eq!(doc.prev_depth_first(pair[1]), Some(pair[0]));
        }
        assert!(doc.next_depth_first(e).is_none());
        assert!(doc.prev_depth_first(root).is_none());
    }

    #[test]
    fn state_changes_are_recorded_once_per_transition() {
        let (mut doc, _, [a, b, ..]) = sample();
        doc.set_checked(a, true);
        doc.set_checked(a, true);
        doc.set_disabled(b, true);
        doc.set_checked(b, false);
        let changes = doc.take_changes();
        assert_eq!(changes.entries.len(), 2);
        assert_eq!(changes.checked_toggled(), vec![a]);
        assert_eq!(changes.disabled_toggled(), vec![b]);
        assert!(doc.take_changes().is_empty());
    }

    #[test]
    fn net_changes_cancel_out() {
        let (mut doc, _, [a, ..]) = sample();
        doc.set_checked(a, true);
        doc.set_checked(a, false);
        let changes = doc.take_changes();
        assert_eq!(changes.entries.len(), 2);
        assert!(changes.checked_toggled().is_empty());
    }

    #[test]
    fn liveness_insert_remove_reuse() {
        let (mut doc, list, [a, b, ..]) = sample();
        let group = doc.parent_of(b).unwrap();
        doc.remove(group);
        assert!(!doc.is_alive(group));
        assert!(!doc.is_alive(b));
        assert!(doc.is_alive(a));
        assert!(doc.element_by_id("b").is_none());

        let reused = doc.append(list, ElementData::checkbox());
        assert!(doc.is_alive(reused));
        assert!(!doc.is_alive(b));
        assert!(!doc.is_checked(b));
        doc.set_checked(b, true);
        assert!(!doc.is_checked(reused), "stale id must not alias a reused slot");
    }

    #[test]
    fn root_cannot_be_removed_or_moved() {
        let (mut doc, list, _) = sample();
        let root = doc.root();
        doc.remove(root);
        assert!(doc.is_alive(root));
        doc.reparent(root, list);
        assert_eq!(doc.parent_of(list), Some(root));
    }

    #[test]
    fn reparent_rejects_cycles_and_moves_subtrees() {
        let (mut doc, list, [a, b, c, d, e]) = sample();
        let group = doc.parent_of(b).unwrap();
        doc.reparent(list, group);
        assert_eq!(doc.parent_of(list), Some(doc.root()));

        doc.reparent(e, group);
        assert_eq!(doc.parent_of(e), Some(group));
        assert_eq!(doc.checkboxes_in(list), vec![a, b, c, e, d]);
    }

    #[test]
    fn id_lookup_respects_scope() {
        let (mut doc, list, [a, _, _, _, e]) = sample();
        assert_eq!(doc.element_by_id_in(list, "a"), Some(a));
        assert!(doc.element_by_id_in(list, "e").is_none());
        assert_eq!(doc.element_by_id("e"), Some(e));
        assert!(doc.element_by_id_in(list, "list").is_none());

        doc.set_attr(e, "id", "renamed");
        assert!(doc.element_by_id("e").is_none());
        assert_eq!(doc.element_by_id("renamed"), Some(e));
    }

    #[test]
    fn kind_follows_tag_and_type() {
        let mut doc = Document::new();
        let root = doc.root();
        let upper = doc.append(root, ElementData::new("INPUT").with_attr("TYPE", "CheckBox"));
        let text = doc.append(root, ElementData::new("input").with_attr("type", "text"));
        let label = doc.append(root, ElementData::label(Some("x")));
        assert_eq!(doc.kind(upper), ElementKind::Checkbox);
        assert_eq!(doc.kind(text), ElementKind::Other);
        assert_eq!(doc.kind(label), ElementKind::Label);
        assert_eq!(doc.attr(label, "FOR"), Some("x"));
    }

    #[test]
    fn selectors_match_elements() {
        let (mut doc, list, [a, b, c, d, _]) = sample();
        let label = doc.append(list, ElementData::label(None));
        let toggle = doc.append(
            list,
            ElementData::new("a").with_attr("data-toggle", "checkboxes-x"),
        );
        let sel = Selector::parse(":checkbox, label").unwrap();
        assert_eq!(doc.query_all(list, &sel), vec![a, b, c, d, label]);
        let sel = Selector::parse("[data-toggle^=checkboxes]").unwrap();
        assert_eq!(doc.query(doc.root(), &sel), Some(toggle));
        let sel = Selector::parse("#list").unwrap();
        assert_eq!(doc.query(doc.root(), &sel), Some(list));
    }

    #[test]
    fn class_selector_matches_whole_tokens() {
        let mut doc = Document::new();
        let root = doc.root();
        let one = doc.append(root, ElementData::new("ul").with_attr("class", "list main"));
        doc.append(root, ElementData::new("ul").with_attr("class", "listing"));
        let two = doc.append(root, ElementData::new("div").with_attr("class", " list\tside"));
        let sel = Selector::parse(".list").unwrap();
        assert_eq!(doc.query_all(root, &sel), vec![one, two]);
        assert!(!doc.matches(one, &Selector::parse(".lis").unwrap()));
    }

    #[test]
    fn stale_ids_are_tolerated() {
        let (mut doc, _, [a, ..]) = sample();
        doc.remove(a);
        assert!(doc.tag(a).is_none());
        assert!(doc.attrs(a).is_empty());
        assert!(doc.children_of(a).is_empty());
        assert!(doc.next_depth_first(a).is_none());
        assert_eq!(doc.kind(a), ElementKind::Other);
        doc.set_disabled(a, true);
        assert!(doc.take_changes().is_empty());
        let orphan = doc.append(a, ElementData::new("div"));
        assert_eq!(doc.parent_of(orphan), Some(doc.root()));
    }
}
