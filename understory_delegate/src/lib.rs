// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Delegate: deterministic, `no_std` event delegation for UI.
//!
//! ## Overview
//!
//! This crate turns one input event into an ordered queue of handler
//! invocations and then runs that queue. It does not hit test and it does not
//! own handlers: listeners carry an opaque payload `H` (typically a small enum
//! the host matches on), so the host keeps full control over mutable state.
//!
//! ## Pieces
//!
//! - [`listeners::Listeners`]: per-node listeners with dotted namespaces and an
//!   optional selector that makes them *delegated*.
//! - [`router::Router`]: reconstructs the target → root path through a
//!   [`ParentLookup`](types::ParentLookup) and builds the queue, matching
//!   selectors through a [`Matcher`](types::Matcher).
//! - [`dispatcher::run`]: walks the queue, honoring
//!   [`Outcome::Stop`](types::Outcome::Stop) and
//!   [`Outcome::StopImmediate`](types::Outcome::StopImmediate).
//! - [`types::ClickEvent`]: a click payload with modifiers and the
//!   `default_prevented` / `propagation_stopped` flags.
//!
//! ## Workflow
//!
//! 1) Register listeners with [`Listeners::on`](listeners::Listeners::on).
//! 2) On each click, build the queue with [`Router::delegate`](router::Router::delegate).
//! 3) Run it with [`dispatcher::run`], mutating your event payload in the handler.
//! 4) After the run, inspect the payload to decide whether to perform default actions.
//!
//! ```
//! use understory_delegate::dispatcher;
//! use understory_delegate::listeners::Listeners;
//! use understory_delegate::router::Router;
//! use understory_delegate::types::{ClickEvent, Matcher, Modifiers, ParentLookup};
//!
//! // 1 -> 2 -> 3, selectors are plain node ids.
//! #[derive(Default)]
//! struct Parents;
//! impl ParentLookup<u32> for Parents {
//!     fn parent_of(&self, n: &u32) -> Option<u32> {
//!         (*n > 1).then(|| n - 1)
//!     }
//! }
//! struct Exact;
//! impl Matcher<u32, u32> for Exact {
//!     fn matches(&self, n: &u32, s: &u32) -> bool {
//!         n == s
//!     }
//! }
//!
//! let mut table = Listeners::new();
//! table.on(1, "demo", Some(3), "delegated");
//!
//! let router: Router<u32, Parents> = Router::new();
//! let seq = router.delegate(&table, &Exact, 3);
//! let mut ev = ClickEvent::new(3, Modifiers::empty());
//! dispatcher::run(&seq, &mut ev, |_, e| {
//!     e.prevent_default();
//!     e.outcome()
//! });
//! assert!(ev.default_prevented);
//! ```
//!
//! ## Adapters
//!
//! - **DOM Adapter** (`dom_adapter` feature): routes over an
//!   [`understory_dom::Document`].
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod adapters;
pub mod dispatcher;
pub mod listeners;
pub mod router;
pub mod types;
