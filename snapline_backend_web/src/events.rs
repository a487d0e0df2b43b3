// Copyright 2026 the Snapline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! DOM event plumbing: listener registration and raw event normalisation.

use alloc::boxed::Box;

use wasm_bindgen::JsCast as _;
use wasm_bindgen::prelude::*;
use web_sys::{AddEventListenerOptions, Event, EventTarget, KeyboardEvent, TouchEvent, WheelEvent};

use snapline_core::input::NavKey;
use snapline_core::time::{Duration, HostTime};

/// Pixels per line for `WheelEvent.DOM_DELTA_LINE`.
pub const WHEEL_LINE_HEIGHT: f64 = 16.0;

/// An event listener that is removed when dropped.
pub struct EventBinding {
    target: EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl core::fmt::Debug for EventBinding {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EventBinding")
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

impl EventBinding {
    /// Adds `handler` for `kind` events on `target`.
    ///
    /// Listeners that may call `preventDefault()` must pass
    /// `passive = false`; browsers treat wheel and touch listeners on the
    /// document as passive otherwise.
    pub fn listen(
        target: &EventTarget,
        kind: &'static str,
        passive: bool,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, JsValue> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        let options = AddEventListenerOptions::new();
        options.set_passive(passive);
        target.add_event_listener_with_callback_and_add_event_listener_options(
            kind,
            closure.as_ref().unchecked_ref::<js_sys::Function>(),
            &options,
        )?;
        Ok(Self {
            target: target.clone(),
            kind,
            closure,
        })
    }

    /// The event type.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        self.kind
    }
}

impl Drop for EventBinding {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.closure.as_ref().unchecked_ref());
    }
}

/// Converts a wheel delta to CSS pixels.
///
/// `mode` is `WheelEvent.deltaMode`: pixels, lines, or pages.
#[must_use]
pub fn normalize_wheel_delta(delta: f64, mode: u32, page_height: f64) -> f64 {
    match mode {
        WheelEvent::DOM_DELTA_LINE => delta * WHEEL_LINE_HEIGHT,
        WheelEvent::DOM_DELTA_PAGE => delta * page_height,
        _ => delta,
    }
}

/// Vertical wheel delta of `event` in CSS pixels.
pub(crate) fn wheel_delta(event: &Event, page_height: f64) -> Option<f64> {
    let wheel = event.dyn_ref::<WheelEvent>()?;
    Some(normalize_wheel_delta(
        wheel.delta_y(),
        wheel.delta_mode(),
        page_height,
    ))
}

/// `clientY` of the first touch, using `changedTouches` for `touchend`.
pub(crate) fn touch_y(event: &Event, changed: bool) -> Option<f64> {
    let touch_event = event.dyn_ref::<TouchEvent>()?;
    let list = if changed {
        touch_event.changed_touches()
    } else {
        touch_event.touches()
    };
    list.get(0).map(|touch| f64::from(touch.client_y()))
}

/// Returns `true` for elements that consume navigation keys themselves.
#[must_use]
pub fn is_editable_tag(tag_name: &str) -> bool {
    ["INPUT", "TEXTAREA", "SELECT"]
        .iter()
        .any(|tag| tag.eq_ignore_ascii_case(tag_name))
}

/// The navigation key carried by `event`, if it should drive snapping.
///
/// Keys pressed with a modifier, or while focus is in an editable element,
/// are left to the browser.
pub(crate) fn nav_key(event: &Event) -> Option<NavKey> {
    let key_event = event.dyn_ref::<KeyboardEvent>()?;
    if key_event.alt_key() || key_event.ctrl_key() || key_event.meta_key() || key_event.shift_key()
    {
        return None;
    }
    if let Some(target) = event.target() {
        if let Some(element) = target.dyn_ref::<web_sys::HtmlElement>() {
            if element.is_content_editable() || is_editable_tag(&element.tag_name()) {
                return None;
            }
        }
    }
    NavKey::from_key(&key_event.key())
}

/// Section id targeted by an in-page link, e.g. `"#services"`.
#[must_use]
pub fn anchor_target(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// `setTimeout` delay, in whole milliseconds, from `now` until `deadline`.
#[must_use]
pub fn timeout_delay_ms(now: HostTime, deadline: HostTime) -> i32 {
    let remaining: Duration = deadline.saturating_duration_since(now);
    // Round up so the timer never fires before the deadline.
    let ms = remaining.micros().div_ceil(1_000);
    i32::try_from(ms).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wheel_modes_scale_to_pixels() {
        assert_eq!(
            normalize_wheel_delta(3.0, WheelEvent::DOM_DELTA_PIXEL, 900.0),
            3.0
        );
        assert_eq!(
            normalize_wheel_delta(3.0, WheelEvent::DOM_DELTA_LINE, 900.0),
            48.0
        );
        assert_eq!(
            normalize_wheel_delta(-1.0, WheelEvent::DOM_DELTA_PAGE, 900.0),
            -900.0
        );
    }

    #[test]
    fn editable_tags() {
        assert!(is_editable_tag("INPUT"));
        assert!(is_editable_tag("textarea"));
        assert!(!is_editable_tag("DIV"));
    }

    #[test]
    fn anchors() {
        assert_eq!(anchor_target("#contact"), Some("contact"));
        assert_eq!(anchor_target("#"), None);
        assert_eq!(anchor_target("/about"), None);
    }

    #[test]
    fn delay_rounds_up_and_saturates() {
        let now = HostTime::from_millis(1_000);
        assert_eq!(timeout_delay_ms(now, HostTime(1_000_001)), 1);
        assert_eq!(timeout_delay_ms(now, HostTime::from_millis(1_300)), 300);
        assert_eq!(timeout_delay_ms(now, HostTime::from_millis(900)), 0);
        assert_eq!(timeout_delay_ms(HostTime(0), HostTime(u64::MAX)), i32::MAX);
    }
}
