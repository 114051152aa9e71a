// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A deliberately small selector language.
//!
//! Supported forms, optionally joined by commas:
//!
//! - `#id`
//! - `.class` (matches one whitespace-separated token of `class`)
//! - `tag` (ASCII alphanumerics and `-`)
//! - `:checkbox`
//! - `[attr]`, `[attr=value]`, `[attr^=prefix]` (values may be quoted)
//!
//! Compound and combinator selectors (`div > input`, `input.foo`) are not
//! supported and fail to parse.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

/// A parsed selector.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selector {
    /// Element whose `id` attribute equals the value.
    Id(String),
    /// Element with this (lowercase) tag name.
    Tag(String),
    /// Element whose `class` attribute lists this token.
    Class(String),
    /// `<input type="checkbox">`.
    Checkbox,
    /// Attribute presence or value test.
    Attr {
        /// Lowercase attribute name.
        name: String,
        /// How the value is compared.
        op: AttrOp,
    },
    /// Matches if any alternative matches.
    Any(Box<[Selector]>),
}

/// Comparison used by [`Selector::Attr`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AttrOp {
    /// The attribute is present.
    Exists,
    /// The value equals the string.
    Equals(String),
    /// The value starts with the string.
    Prefix(String),
}

impl Selector {
    /// Parse a selector string. Returns `None` for empty or unsupported input.
    ///
    /// ```rust
    /// use understory_dom::{AttrOp, Selector};
    ///
    /// assert_eq!(Selector::parse("#list"), Some(Selector::Id("list".into())));
    /// assert_eq!(
    ///     Selector::parse("[data-toggle^=checkboxes]"),
    ///     Some(Selector::Attr {
    ///         name: "data-toggle".into(),
    ///         op: AttrOp::Prefix("checkboxes".into()),
    ///     })
    /// );
    /// assert!(Selector::parse("div > input").is_none());
    /// ```
    pub fn parse(src: &str) -> Option<Self> {
        let mut parts: Vec<Self> = Vec::new();
        for piece in src.split(',') {
            parts.push(parse_simple(piece.trim())?);
        }
        match parts.len() {
            0 => None,
            1 => parts.pop(),
            _ => Some(Self::Any(parts.into_boxed_slice())),
        }
    }

    /// `:checkbox, label`
    pub fn checkbox_or_label() -> Self {
        Self::Any(Box::new([Self::Checkbox, Self::Tag("label".into())]))
    }

    /// `[name^=prefix]`
    pub fn attr_prefix(name: &str, prefix: &str) -> Self {
        Self::Attr {
            name: name.to_ascii_lowercase(),
            op: AttrOp::Prefix(prefix.into()),
        }
    }
}

fn parse_simple(src: &str) -> Option<Selector> {
    if src.is_empty() {
        return None;
    }
    if let Some(id) = src.strip_prefix('#') {
        return is_ident(id).then(|| Selector::Id(id.into()));
    }
    if let Some(class) = src.strip_prefix('.') {
        return is_ident(class).then(|| Selector::Class(class.into()));
    }
    if src == ":checkbox" {
        return Some(Selector::Checkbox);
    }
    if let Some(inner) = src.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
        return parse_attr(inner);
    }
    is_ident(src).then(|| Selector::Tag(src.to_ascii_lowercase()))
}

fn parse_attr(inner: &str) -> Option<Selector> {
    let (name, op) = match inner.find('=') {
        None => (inner, AttrOp::Exists),
        Some(eq) => {
            let value = unquote(inner[eq + 1..].trim());
            match inner[..eq].strip_suffix('^') {
                Some(name) => (name, AttrOp::Prefix(value.into())),
                None => (&inner[..eq], AttrOp::Equals(value.into())),
            }
        }
    };
    let name = name.trim();
    is_ident(name).then(|| Selector::Attr {
        name: name.to_ascii_lowercase(),
        op,
    })
}

fn unquote(v: &str) -> &str {
    for q in ['"', '\''] {
        if let Some(inner) = v.strip_prefix(q).and_then(|s| s.strip_suffix(q)) {
            return inner;
        }
    }
    v
}

fn is_ident(s: &str) -> bool {
    !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
