// Copyright 2026 the Snapline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! [`Viewport`] over `window` and `document`.
//!
//! Sections are located by a `data-section="<id>"` attribute, falling back to
//! an element with `id="<id>"`. The overlay is the first element matching a
//! CSS selector; its rendered height is re-measured on every query so a bar
//! that collapses on scroll is tracked.

use alloc::format;
use alloc::string::String;

use kurbo::{Rect, Size};
use web_sys::{Document, Element, ScrollBehavior, ScrollToOptions, Window};

use snapline_core::backend::Viewport;
use snapline_core::section::SectionId;

/// Attribute that tags a section's DOM region.
pub const SECTION_ATTRIBUTE: &str = "data-section";

/// Selector used for the fixed overlay when none is given.
pub const DEFAULT_OVERLAY_SELECTOR: &str = "header";

/// The browser window as seen by the snap controller.
pub struct DomViewport {
    window: Window,
    document: Document,
    overlay_selector: Option<String>,
}

impl core::fmt::Debug for DomViewport {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DomViewport")
            .field("overlay_selector", &self.overlay_selector)
            .finish_non_exhaustive()
    }
}

impl DomViewport {
    /// Creates a viewport using [`DEFAULT_OVERLAY_SELECTOR`].
    #[must_use]
    pub fn new(window: Window, document: Document) -> Self {
        Self::with_overlay(window, document, Some(DEFAULT_OVERLAY_SELECTOR))
    }

    /// Creates a viewport measuring the overlay matched by `selector`, or
    /// none at all.
    #[must_use]
    pub fn with_overlay(window: Window, document: Document, selector: Option<&str>) -> Self {
        Self {
            window,
            document,
            overlay_selector: selector.map(String::from),
        }
    }

    /// The window.
    #[must_use]
    pub fn window(&self) -> &Window {
        &self.window
    }

    /// The document.
    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Finds the DOM region for `id`.
    #[must_use]
    pub fn section_element(&self, id: &str) -> Option<Element> {
        let selector = section_selector(id);
        self.document
            .query_selector(&selector)
            .ok()
            .flatten()
            .or_else(|| self.document.get_element_by_id(id))
    }

    fn window_dimension(value: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>) -> f64 {
        value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
    }
}

impl Viewport for DomViewport {
    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn max_scroll_y(&self) -> f64 {
        let content = self
            .document
            .document_element()
            .map_or(0.0, |root| f64::from(root.scroll_height()));
        (content - self.size().height).max(0.0)
    }

    fn size(&self) -> Size {
        Size::new(
            Self::window_dimension(self.window.inner_width()),
            Self::window_dimension(self.window.inner_height()),
        )
    }

    fn section_bounds(&self, id: &SectionId) -> Option<Rect> {
        let element = self.section_element(id.as_str())?;
        let rect = element.get_bounding_client_rect();
        let bounds = Rect::new(rect.left(), rect.top(), rect.right(), rect.bottom());
        Some(bounds)
    }

    fn overlay_height(&self) -> Option<f64> {
        let selector = self.overlay_selector.as_deref()?;
        let overlay = self.document.query_selector(selector).ok().flatten()?;
        Some(overlay.get_bounding_client_rect().height())
    }

    fn scroll_to(&mut self, y: f64) {
        let options = ScrollToOptions::new();
        options.set_top(y);
        options.set_behavior(ScrollBehavior::Instant);
        self.window.scroll_to_with_scroll_to_options(&options);
    }
}

/// CSS selector for the region tagged with `id`.
pub(crate) fn section_selector(id: &str) -> String {
    let mut escaped = String::with_capacity(id.len());
    for c in id.chars() {
        if matches!(c, '"' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    format!("[{SECTION_ATTRIBUTE}=\"{escaped}\"]")
}
