// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dispatcher helper: walk a handler queue and honor stop outcomes.
//!
//! ## Semantics
//!
//! - Entries are processed in order; [`Router::delegate`](crate::router::Router::delegate)
//!   already groups them by delegate node and matched element.
//! - [`Outcome::Stop`] lets the remaining entries for the same `(node, current)`
//!   pair run, then ends the walk. This mirrors `stopPropagation` in DOM
//!   delegation, where sibling handlers on one element still fire.
//! - [`Outcome::StopImmediate`] ends the walk right away.
//! - Returns the entry whose handler requested the stop, or `None` if the
//!   queue ran to completion.
//!
//! Flags such as "default prevented" live on the event payload you pass to
//! [`run`], typically a [`ClickEvent`](crate::types::ClickEvent).
//!
//! ## Example
//!
//! ```
//! use understory_delegate::dispatcher;
//! use understory_delegate::types::{ClickEvent, Dispatch, Modifiers};
//!
//! let seq = vec![
//!     Dispatch::delegated(1_u32, 3, "range"),
//!     Dispatch::delegated(1, 3, "max"),
//!     Dispatch::delegated(1, 2, "range"),
//! ];
//!
//! let mut ev = ClickEvent::new(3_u32, Modifiers::SHIFT);
//! let mut seen = Vec::new();
//! let stopped = dispatcher::run(&seq, &mut ev, |d, e| {
//!     seen.push((d.current, d.handler));
//!     if d.handler == "range" {
//!         e.stop_propagation();
//!     }
//!     e.outcome()
//! });
//!
//! // Both handlers for element 3 ran; element 2 was skipped.
//! assert_eq!(seen, vec![(3, "range"), (3, "max")]);
//! assert_eq!(stopped.map(|d| d.handler), Some("range"));
//! ```

use crate::types::{Dispatch, Outcome};

/// Run a handler over a queue and honor stop outcomes.
pub fn run<'a, K, H, E>(
    seq: &'a [Dispatch<K, H>],
    event: &mut E,
    mut handler: impl FnMut(&Dispatch<K, H>, &mut E) -> Outcome,
) -> Option<&'a Dispatch<K, H>>
where
    K: PartialEq,
{
    let mut stop_at: Option<&'a Dispatch<K, H>> = None;
    for d in seq {
        if let Some(s) = stop_at
            && (s.node != d.node || s.current != d.current)
        {
            return stop_at;
        }
        match handler(d, event) {
            Outcome::Continue => {}
            Outcome::Stop => {
                stop_at.get_or_insert(d);
            }
            Outcome::StopImmediate => return Some(d),
        }
    }
    stop_at
}
