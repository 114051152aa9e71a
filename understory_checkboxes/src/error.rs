// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reasons a textual operation is rejected.
//!
//! None of these reach the user: bindings log them and move on.

use alloc::string::String;
use core::fmt;

/// Why an operation name or argument could not be turned into an [`Operation`](crate::Operation).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CheckboxesError {
    /// The name is not one of `check`, `uncheck`, `toggle`, `max`, `range`.
    UnknownOperation(String),
    /// The argument does not fit the operation.
    InvalidArgument {
        /// Operation name.
        operation: &'static str,
        /// Offending value.
        value: String,
    },
}

impl fmt::Display for CheckboxesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownOperation(name) => write!(f, "unknown checkboxes operation: {name}"),
            Self::InvalidArgument { operation, value } => {
                write!(f, "invalid argument for {operation}: {value:?}")
            }
        }
    }
}

impl core::error::Error for CheckboxesError {}
