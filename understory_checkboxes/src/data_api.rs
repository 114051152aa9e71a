// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Declarative binding through `data-*` attributes.
//!
//! Markup opts in with `data-toggle="checkboxes"` (any value starting with
//! `checkboxes`). The scope is named by `data-context` (a selector) or, when
//! absent, by the fragment of the element's `href`:
//!
//! ```html
//! <a href="#list" data-toggle="checkboxes" data-action="toggle">Toggle</a>
//! <div data-toggle="checkboxes" data-context="#list" data-max="2"></div>
//! ```
//!
//! This module only reads markup. [`Page`](crate::Page) decides when the
//! resulting operations run.

use alloc::vec::Vec;

use log::debug;
use understory_dom::{Document, NodeId, Selector};

use crate::operation::Operation;

/// Attribute marking an element for declarative binding.
pub const TOGGLE_ATTR: &str = "data-toggle";
/// Required prefix of the marker's value.
pub const TOGGLE_PREFIX: &str = "checkboxes";
/// Attribute holding the scope selector.
pub const CONTEXT_ATTR: &str = "data-context";
/// Attribute holding the click-time action.
pub const ACTION_ATTR: &str = "data-action";
/// Namespace of the click-time listener on the document root.
pub const NAMESPACE: &str = "checkboxes.data-api";

/// `[data-toggle^=checkboxes]`
pub fn marker_selector() -> Selector {
    Selector::attr_prefix(TOGGLE_ATTR, TOGGLE_PREFIX)
}

/// Marked elements in document order.
pub fn marked_elements(doc: &Document) -> Vec<NodeId> {
    doc.query_all(doc.root(), &marker_selector())
}

/// The trailing `#fragment` of a link target.
///
/// The fragment starts at the last `#` whose remainder (`#` included) has at
/// least one more character and no whitespace.
///
/// ```
/// use understory_checkboxes::data_api::href_fragment;
///
/// assert_eq!(href_fragment("page.html#list"), Some("#list"));
/// assert_eq!(href_fragment("#a#b"), Some("#b"));
/// assert_eq!(href_fragment("#a b"), None);
/// assert_eq!(href_fragment("page.html#"), None);
/// ```
pub fn href_fragment(href: &str) -> Option<&str> {
    href.match_indices('#')
        .rev()
        .map(|(at, _)| &href[at..])
        .find(|tail| tail.len() > 1 && !tail.chars().any(char::is_whitespace))
}

/// Resolve the scopes an element refers to, in document order.
///
/// `data-context` wins when present and non-empty. Otherwise the `href`
/// fragment is used. Every element matching the reference is a scope, so
/// `data-context=".list"` or `"#a, #b"` binds several at once.
pub fn resolve_scopes(doc: &Document, el: NodeId) -> Vec<NodeId> {
    let Some(reference) = doc
        .attr(el, CONTEXT_ATTR)
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .or_else(|| doc.attr(el, "href").and_then(href_fragment))
    else {
        return Vec::new();
    };
    let Some(selector) = Selector::parse(reference) else {
        debug!("unsupported scope reference {reference:?} on {el:?}");
        return Vec::new();
    };
    doc.query_all(doc.root(), &selector)
}

/// Operations declared on a marked element, in attribute order.
///
/// `data-toggle` and `data-context` are skipped. `data-action="name"` yields
/// `name` with no argument; any other `data-name="value"` yields
/// `name(value)`. Attributes that do not name a valid operation are logged
/// and dropped.
pub fn ready_operations(doc: &Document, el: NodeId) -> Vec<Operation> {
    let mut ops = Vec::new();
    for (name, value) in doc.attrs(el) {
        let Some(key) = name.strip_prefix("data-") else {
            continue;
        };
        if name == TOGGLE_ATTR || name == CONTEXT_ATTR {
            continue;
        }
        let parsed = if name == ACTION_ATTR {
            Operation::parse(value.trim(), None)
        } else {
            Operation::parse(key, Some(value))
        };
        match parsed {
            Ok(op) => ops.push(op),
            Err(err) => debug!("skipping {name}={value:?} on {el:?}: {err}"),
        }
    }
    ops
}

/// The action a click on a marked element performs, if any.
pub fn click_operation(doc: &Document, el: NodeId) -> Option<Operation> {
    let action = doc.attr(el, ACTION_ATTR)?.trim();
    if action.is_empty() {
        return None;
    }
    Operation::parse(action, None)
        .inspect_err(|err| debug!("ignoring click action on {el:?}: {err}"))
        .ok()
}
