// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adapters to integrate with other Understory crates.
//!
//! Each adapter is gated behind a feature flag to keep the core lightweight and `no_std` by default.
//!
//! ## Available Adapters
//!
//! - [`dom`] (`dom_adapter` feature): lets an [`understory_dom::Document`] act as the
//!   [`ParentLookup`](crate::types::ParentLookup) and selector
//!   [`Matcher`](crate::types::Matcher) for routing.

#[cfg(feature = "dom_adapter")]
pub mod dom;
