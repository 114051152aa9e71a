// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory DOM: a small, headless element tree for form-control behavior.
//!
//! This crate is the stand-in for a host DOM. It models just enough of one for
//! behavior layers such as `understory_checkboxes` to be written and tested
//! without a browser:
//!
//! - A generational element tree with a single root and ordered children.
//! - Tag names and attributes, with an id index.
//! - Checked and disabled state per element ([`ElementState`]), with every
//!   transition recorded in a [`Changes`] log.
//! - A tiny [`Selector`] language and document-order queries.
//!
//! ## Document order
//!
//! Document order is pre-order depth-first traversal with children in
//! insertion order. [`Document::descendants`] yields the strict descendants
//! of a scope in this order and [`Document::checkboxes_in`] filters them to
//! checkboxes. Behaviors that reason about "ranges" of controls rely on it.
//!
//! ## Not a browser
//!
//! There is no layout, styling, parsing, or event dispatch here. Event
//! delegation lives in `understory_delegate`; click activation semantics live
//! with the host that drives both.
//!
//! ## API overview
//!
//! - [`Document`]: the element tree.
//! - [`ElementData`]: initial tag, attributes, and state for a new element.
//! - [`NodeId`]: generational handle of an element.
//! - [`ElementKind`]: checkbox / label / other classification.
//! - [`Selector`]: parsed selector used by queries and by delegated listeners.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod changes;
mod document;
mod selector;
mod types;

pub use changes::{Change, Changes};
pub use document::{Descendants, Document, ROOT_TAG};
pub use selector::{AttrOp, Selector};
pub use types::{Attributes, ElementData, ElementKind, ElementState, NodeId};
