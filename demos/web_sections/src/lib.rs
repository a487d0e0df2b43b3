// Copyright 2026 the Snapline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Landing page with snap-scrolled sections.
//!
//! Mounts a controller over `hero`, `services`, `pricing`, and `contact`,
//! with `pricing` excluded so it scrolls freely. The page also has a
//! position indicator, snapping `#id` nav links, a status line, and a button
//! that switches snapping off and on.
//!
//! Build with: `wasm-pack build --target web demos/web_sections`
//! Then serve `demos/web_sections/` and open `index.html`.

#![no_std]
#![cfg_attr(
    not(target_arch = "wasm32"),
    allow(dead_code, reason = "this crate only runs in the browser")
)]

extern crate alloc;

use alloc::format;

use snapline_backend_web::{
    ConsoleSink, DomIndicator, EventBinding, NavLinks, PageOptions, SnapHandle, SnapPage,
};
use snapline_core::store::ChangeCause;
use wasm_bindgen::JsCast as _;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, HtmlElement};

const SECTIONS: &[&str] = &["hero", "services", "pricing", "contact"];
const FREE_SCROLL: &[&str] = &["pricing"];

fn cause_label(cause: ChangeCause) -> &'static str {
    match cause {
        ChangeCause::Navigation => "navigated",
        ChangeCause::Observer => "scrolled",
        ChangeCause::Registration => "registered",
    }
}

fn by_id(document: &Document, id: &str) -> Option<Element> {
    document.get_element_by_id(id)
}

fn bind_toggle(document: &Document, handle: &SnapHandle) -> Result<Option<EventBinding>, JsValue> {
    let Some(button) = by_id(document, "snap-toggle") else {
        return Ok(None);
    };
    let page = handle.downgrade();
    let label = button.clone();
    let on_click = move |_: Event| {
        let Some(handle) = page.upgrade() else {
            return;
        };
        let enabled = !handle.snap_enabled();
        handle.set_snap_enabled(enabled);
        label.set_text_content(Some(if enabled { "Snap: on" } else { "Snap: off" }));
    };
    let binding = EventBinding::listen(button.as_ref(), "click", false, on_click)?;
    Ok(Some(binding))
}

/// Entry point, called automatically by `wasm_bindgen(start)`.
#[cfg_attr(all(target_arch = "wasm32", not(test)), wasm_bindgen(start))]
pub fn main() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let mut options = PageOptions::new(SECTIONS);
    options.excluded = FREE_SCROLL;
    let page = SnapPage::mount(&options)?;
    let handle = page.handle();
    handle.set_trace_sink(ConsoleSink::new());

    if let Some(status) = by_id(&document, "status") {
        let show = |status: &Element, id: &str, how: &str| {
            status.set_text_content(Some(&format!("{id} ({how})")));
        };
        if let Some(id) = handle.active_id() {
            show(&status, id.as_str(), "initial");
        }
        let _ = handle.on_section_change(move |change| {
            show(&status, change.id.as_str(), cause_label(change.cause));
        });
    }

    let indicator = match by_id(&document, "snap-indicator") {
        Some(container) => Some(DomIndicator::attach(
            container.dyn_into::<HtmlElement>()?,
            &handle,
        )?),
        None => None,
    };
    let links = NavLinks::bind(&document, &handle)?;
    let toggle = bind_toggle(&document, &handle)?;

    // The page lives as long as the document.
    core::mem::forget(toggle);
    core::mem::forget(links);
    core::mem::forget(indicator);
    core::mem::forget(page);
    Ok(())
}
