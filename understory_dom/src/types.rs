// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the element tree: node identifiers, state flags, and element data.

use alloc::string::String;
use smallvec::SmallVec;

/// Identifier for an element in the document (generational).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

bitflags::bitflags! {
    /// Mutable form-control state of an element.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ElementState: u8 {
        /// The control is checked.
        const CHECKED  = 0b0000_0001;
        /// The control is disabled and receives no clicks.
        const DISABLED = 0b0000_0010;
    }
}

/// What an element is, as far as checkbox behavior is concerned.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ElementKind {
    /// `<input type="checkbox">`.
    Checkbox,
    /// `<label>`.
    Label,
    /// Anything else.
    Other,
}

/// Attribute storage; most elements carry only a handful.
pub type Attributes = SmallVec<[(String, String); 4]>;

/// Initial data for an element.
///
/// Build with [`ElementData::new`] and the chained setters, then hand it to
/// [`Document::append`](crate::Document::append).
///
/// ```rust
/// use understory_dom::{ElementData, ElementKind, ElementState};
///
/// let data = ElementData::checkbox().with_id("a").with_state(ElementState::CHECKED);
/// assert_eq!(data.kind(), ElementKind::Checkbox);
/// assert_eq!(data.attr("id"), Some("a"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct ElementData {
    /// Lowercase tag name.
    pub tag: String,
    /// Attributes in source order. Names are lowercase.
    pub attrs: Attributes,
    /// Checked and disabled state.
    pub state: ElementState,
}

impl ElementData {
    /// Create an element with the given tag and no attributes.
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attrs: Attributes::new(),
            state: ElementState::empty(),
        }
    }

    /// Shorthand for `<input type="checkbox">`.
    pub fn checkbox() -> Self {
        Self::new("input").with_attr("type", "checkbox")
    }

    /// Shorthand for `<label>`, optionally with a `for` reference.
    pub fn label(for_id: Option<&str>) -> Self {
        let data = Self::new("label");
        match for_id {
            Some(id) => data.with_attr("for", id),
            None => data,
        }
    }

    /// Set (or replace) an attribute.
    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        set_attr(&mut self.attrs, name, value);
        self
    }

    /// Set the `id` attribute.
    pub fn with_id(self, id: &str) -> Self {
        self.with_attr("id", id)
    }

    /// Set the initial state flags.
    pub fn with_state(mut self, state: ElementState) -> Self {
        self.state = state;
        self
    }

    /// Look up an attribute value by (case-insensitive) name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        get_attr(&self.attrs, name)
    }

    /// Classify the element.
    pub fn kind(&self) -> ElementKind {
        classify(&self.tag, &self.attrs)
    }
}

pub(crate) fn classify(tag: &str, attrs: &Attributes) -> ElementKind {
    match tag {
        "input" if get_attr(attrs, "type").is_some_and(|t| t.eq_ignore_ascii_case("checkbox")) => {
            ElementKind::Checkbox
        }
        "label" => ElementKind::Label,
        _ => ElementKind::Other,
    }
}

pub(crate) fn get_attr<'a>(attrs: &'a Attributes, name: &str) -> Option<&'a str> {
    attrs
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_str())
}

pub(crate) fn set_attr(attrs: &mut Attributes, name: &str, value: &str) {
    if let Some(slot) = attrs.iter_mut().find(|(n, _)| n.eq_ignore_ascii_case(name)) {
        slot.1 = value.into();
    } else {
        attrs.push((name.to_ascii_lowercase(), value.into()));
    }
}
