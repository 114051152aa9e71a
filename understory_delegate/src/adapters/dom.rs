// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adapter for Understory DOM.
//!
//! ## Feature
//!
//! Enable with `dom_adapter`.
//!
//! A [`Document`] borrowed immutably provides both the parent chain and
//! selector matching, so a router over a document is just
//! `Router::with_parent(&doc)`.

use understory_dom::{Document, NodeId, Selector};

use crate::types::{Matcher, ParentLookup};

impl ParentLookup<NodeId> for &Document {
    fn parent_of(&self, node: &NodeId) -> Option<NodeId> {
        Document::parent_of(self, *node)
    }
}

impl Matcher<NodeId, Selector> for Document {
    fn matches(&self, node: &NodeId, selector: &Selector) -> bool {
        Document::matches(self, *node, selector)
    }
}
