// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A mail-style list: select all, limit the selection, Shift-click ranges.
//!
//! This example shows how to combine:
//! - `understory_dom` for the element tree and checkbox state,
//! - `understory_checkboxes` for max selection, range selection, and
//!   declarative `data-*` bindings,
//! - `understory_delegate` modifiers for Shift-clicks.
//!
//! Run:
//! - `RUST_LOG=trace cargo run -p understory_demos --example checkbox_list`

use understory_checkboxes::{Operation, Options, Page};
use understory_delegate::types::Modifiers;
use understory_dom::{Document, ElementData, NodeId};

fn print_list(page: &Page, label: &str, boxes: &[NodeId]) {
    let doc = page.document();
    let row: String = boxes
        .iter()
        .map(|&cb| match (doc.is_checked(cb), doc.is_disabled(cb)) {
            (true, _) => 'x',
            (false, true) => '-',
            (false, false) => '.',
        })
        .collect();
    println!("{label:<28} [{row}]");
}

fn main() {
    env_logger::Builder::from_default_env()
        .filter_module("understory_checkboxes", log::LevelFilter::Debug)
        .init();

    // <ul id="inbox"> with six messages, each a label wrapping a checkbox.
    let mut doc = Document::new();
    let root = doc.root();
    let inbox = doc.append(root, ElementData::new("ul").with_id("inbox"));
    let mut texts = Vec::new();
    let mut boxes = Vec::new();
    for i in 0..6 {
        let li = doc.append(inbox, ElementData::new("li"));
        let label = doc.append(li, ElementData::label(None));
        let title = format!("message {i}");
        texts.push(doc.append(label, ElementData::new("span").with_attr("title", &title)));
        boxes.push(doc.append(label, ElementData::checkbox()));
    }

    // Toolbar links bound declaratively.
    let select_all = doc.append(
        root,
        ElementData::new("a")
            .with_attr("href", "#inbox")
            .with_attr("data-toggle", "checkboxes")
            .with_attr("data-action", "check"),
    );
    let invert = doc.append(
        root,
        ElementData::new("a")
            .with_attr("href", "#inbox")
            .with_attr("data-toggle", "checkboxes")
            .with_attr("data-action", "toggle"),
    );
    doc.append(
        root,
        ElementData::new("div")
            .with_attr("data-toggle", "checkboxes")
            .with_attr("data-context", "#inbox")
            .with_attr("data-range", "true"),
    );

    let mut page = Page::new(doc);
    page.ready();
    print_list(&page, "initial", &boxes);

    page.click(boxes[1], Modifiers::empty());
    page.click(boxes[4], Modifiers::SHIFT);
    print_list(&page, "click 1, shift-click 4", &boxes);

    let out = page.click(invert, Modifiers::empty());
    print_list(&page, "invert", &boxes);
    println!("  navigation suppressed: {}", out.navigation.is_none());

    page.click(select_all, Modifiers::empty());
    page.checkboxes(inbox, Operation::Uncheck);
    page.checkboxes(inbox, Operation::Max(2));
    print_list(&page, "clear, max 2", &boxes);

    // Clicking the message text goes through the wrapping label.
    page.click(texts[0], Modifiers::empty());
    let out = page.click(boxes[5], Modifiers::empty());
    print_list(&page, "click text 0, box 5", &boxes);
    println!("  disabled by that click: {}", out.changes.disabled_toggled().len());

    // Options only apply when the scope has no instance yet.
    page.checkboxes(
        inbox,
        Options {
            max: 0,
            range: false,
        },
    );
    println!(
        "  max still enabled: {}",
        page.registry()
            .get(inbox)
            .is_some_and(|c| c.is_max_enabled(page.listeners()))
    );
}
