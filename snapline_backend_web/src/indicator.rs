// Copyright 2026 the Snapline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! DOM position indicator.
//!
//! Renders one `<button>` per active section into a container and marks the
//! active one. Clicking a marker navigates to its section.

use alloc::format;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;

use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, HtmlElement};

use snapline_core::controller::Marker;
use snapline_core::section::SectionId;

use crate::events::EventBinding;
use crate::page::{SnapHandle, WeakSnapHandle};

/// Class added to the active marker.
pub const ACTIVE_CLASS: &str = "is-active";

struct MarkerElement {
    id: SectionId,
    element: Element,
    _click: EventBinding,
}

/// Maps the controller's markers to live `<button>` elements.
///
/// Call [`render`](Self::render) after every section change; the usual way
/// is [`DomIndicator::attach`], which subscribes for you.
pub struct DomIndicator {
    container: HtmlElement,
    handle: WeakSnapHandle,
    markers: Vec<MarkerElement>,
}

impl core::fmt::Debug for DomIndicator {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DomIndicator")
            .field("container", &"HtmlElement")
            .field("markers_len", &self.markers.len())
            .finish_non_exhaustive()
    }
}

impl DomIndicator {
    /// Creates an indicator that manages child elements of `container`.
    #[must_use]
    pub fn new(container: HtmlElement, handle: &SnapHandle) -> Self {
        Self {
            container,
            handle: handle.downgrade(),
            markers: Vec::new(),
        }
    }

    /// Creates an indicator, renders it, and re-renders on every change.
    pub fn attach(
        container: HtmlElement,
        handle: &SnapHandle,
    ) -> Result<Rc<RefCell<Self>>, JsValue> {
        let indicator = Rc::new(RefCell::new(Self::new(container, handle)));
        indicator.borrow_mut().render(&handle.markers())?;

        let weak = Rc::downgrade(&indicator);
        let page = handle.downgrade();
        handle
            .on_section_change(move |_| {
                let (Some(indicator), Some(page)) = (weak.upgrade(), page.upgrade()) else {
                    return;
                };
                if let Ok(mut indicator) = indicator.try_borrow_mut() {
                    let _ = indicator.render(&page.markers());
                }
            })
            .ok_or_else(|| JsValue::from_str("cannot subscribe during delivery"))?;
        Ok(indicator)
    }

    /// Returns a reference to the container element.
    #[must_use]
    pub fn container(&self) -> &HtmlElement {
        &self.container
    }

    /// Synchronizes the buttons with `markers`.
    ///
    /// Buttons are rebuilt only when the section list changed; otherwise the
    /// active state is toggled in place.
    pub fn render(&mut self, markers: &[Marker]) -> Result<(), JsValue> {
        if !same_sections(self.markers.iter().map(|m| &m.id), markers) {
            self.rebuild(markers)?;
        }
        for (existing, marker) in self.markers.iter().zip(markers) {
            let _ = existing
                .element
                .class_list()
                .toggle_with_force(ACTIVE_CLASS, marker.active);
            if marker.active {
                let _ = existing.element.set_attribute("aria-current", "true");
            } else {
                let _ = existing.element.remove_attribute("aria-current");
            }
        }
        Ok(())
    }

    fn rebuild(&mut self, markers: &[Marker]) -> Result<(), JsValue> {
        for old in self.markers.drain(..) {
            old.element.remove();
        }
        let document: Document = self
            .container
            .owner_document()
            .ok_or_else(|| JsValue::from_str("container has no owner document"))?;
        for marker in markers {
            let element = document.create_element("button")?;
            element.set_attribute("type", "button")?;
            element.set_attribute("data-marker", marker.id.as_str())?;
            element.set_attribute("aria-label", &format!("Go to {}", marker.id))?;

            let handle = self.handle.clone();
            let index = marker.index;
            let on_click = move |event: Event| {
                if let Some(handle) = handle.upgrade() {
                    if handle.navigate_to(index).is_ok() {
                        event.prevent_default();
                    }
                }
            };
            let click = EventBinding::listen(element.as_ref(), "click", false, on_click)?;
            self.container.append_child(&element)?;
            self.markers.push(MarkerElement {
                id: marker.id.clone(),
                element,
                _click: click,
            });
        }
        Ok(())
    }
}

/// Whether `ids` already lists exactly the marker sections, in order.
fn same_sections<'a>(
    ids: impl ExactSizeIterator<Item = &'a SectionId>,
    markers: &[Marker],
) -> bool {
    ids.len() == markers.len() && ids.zip(markers).all(|(id, marker)| *id == marker.id)
}

impl Drop for DomIndicator {
    fn drop(&mut self) {
        for marker in self.markers.drain(..) {
            marker.element.remove();
        }
    }
}
