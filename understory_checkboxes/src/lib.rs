// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Checkboxes: group-selection behavior for checkboxes.
//!
//! A scope is any element of an [`understory_dom::Document`]. Binding
//! behavior to a scope gives it:
//!
//! - Bulk operations: check, uncheck, or toggle every enabled checkbox.
//! - Max selection: once `n` boxes are checked the unchecked ones are
//!   disabled, and re-enabled when the count drops.
//! - Range selection: Shift-clicking a checkbox applies its new state to
//!   every enabled checkbox between it and the previously clicked one.
//! - Declarative bindings through `data-toggle="checkboxes"` markup
//!   (see [`data_api`]).
//!
//! Checkbox state lives in the document. Max and range are delegated click
//! listeners attached to the scope (see `understory_delegate`), tagged with a
//! [`Behavior`] and namespaced so each can be removed on its own.
//!
//! ## Example
//!
//! ```
//! use understory_checkboxes::{Operation, Page};
//! use understory_delegate::types::Modifiers;
//! use understory_dom::{Document, ElementData};
//!
//! let mut doc = Document::new();
//! let list = doc.append(doc.root(), ElementData::new("ul").with_id("list"));
//! let boxes: Vec<_> = (0..4)
//!     .map(|_| doc.append(list, ElementData::checkbox()))
//!     .collect();
//! doc.append(
//!     doc.root(),
//!     ElementData::new("div")
//!         .with_attr("data-toggle", "checkboxes")
//!         .with_attr("data-context", "#list")
//!         .with_attr("data-max", "2"),
//! );
//!
//! let mut page = Page::new(doc);
//! page.ready();
//! page.click(boxes[0], Modifiers::empty());
//! page.click(boxes[1], Modifiers::empty());
//! assert!(page.document().is_disabled(boxes[2]));
//!
//! page.checkboxes(list, Operation::Max(0));
//! page.checkboxes(list, Operation::Toggle);
//! assert!(!page.document().is_checked(boxes[0]));
//! // Disabled boxes are left alone, including after the limit is removed.
//! assert!(!page.document().is_checked(boxes[2]));
//! ```
//!
//! ## Layers
//!
//! - [`Checkboxes`]: the per-scope controller.
//! - [`Registry`]: one controller per scope, created on first use.
//! - [`Page`]: a host that owns the document, routes clicks, and performs
//!   default actions.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod controller;
pub mod data_api;
mod error;
mod operation;
mod page;
mod registry;

pub use controller::{Behavior, CheckboxListeners, Checkboxes, MAX_NAMESPACE, RANGE_NAMESPACE};
pub use error::CheckboxesError;
pub use operation::{Invocation, Operation, Options};
pub use page::{ClickOutcome, Page};
pub use registry::Registry;
