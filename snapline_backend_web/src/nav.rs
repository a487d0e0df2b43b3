// Copyright 2026 the Snapline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-page navigation links.
//!
//! Anchors whose `href` is `#<id>` of an active section snap to it instead
//! of jumping. Links to other routes, or to ids the controller does not
//! know, keep their ordinary browser behavior.

use alloc::string::String;
use alloc::vec::Vec;

use wasm_bindgen::JsCast as _;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event};

use snapline_core::Rejection;

use crate::events::{self, EventBinding};
use crate::page::SnapHandle;

/// Selector for candidate links.
pub const NAV_LINK_SELECTOR: &str = "a[href^='#']";

/// Click bindings for a document's in-page links. Dropping unbinds them.
#[derive(Debug)]
pub struct NavLinks {
    bindings: Vec<EventBinding>,
}

impl NavLinks {
    /// Binds every anchor under `document` matching [`NAV_LINK_SELECTOR`].
    pub fn bind(document: &Document, handle: &SnapHandle) -> Result<Self, JsValue> {
        let links = document.query_selector_all(NAV_LINK_SELECTOR)?;
        let mut bindings = Vec::with_capacity(links.length() as usize);
        for i in 0..links.length() {
            let Some(node) = links.get(i) else {
                continue;
            };
            let Ok(link) = node.dyn_into::<Element>() else {
                continue;
            };
            let Some(href) = link.get_attribute("href") else {
                continue;
            };
            let Some(id) = events::anchor_target(&href).map(String::from) else {
                continue;
            };
            let page = handle.downgrade();
            let on_click = move |event: Event| {
                let Some(handle) = page.upgrade() else {
                    return;
                };
                if claims_click(handle.navigate_to_id(&id)) {
                    event.prevent_default();
                }
            };
            let click = EventBinding::listen(link.as_ref(), "click", false, on_click)?;
            bindings.push(click);
        }
        Ok(Self { bindings })
    }

    /// Number of bound links.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Returns `true` if no link was bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// Whether a navigation result means the controller handled the click.
///
/// Unknown or missing sections, and unmounted pages, fall back to the
/// browser's anchor jump.
fn claims_click(result: Result<(), Rejection>) -> bool {
    !matches!(
        result,
        Err(Rejection::UnknownSection
            | Rejection::MissingTarget { .. }
            | Rejection::NoSections
            | Rejection::Unmounted)
    )
}
