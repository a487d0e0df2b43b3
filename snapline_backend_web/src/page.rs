// Copyright 2026 the Snapline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Page-lifetime snap context.
//!
//! [`SnapPage::mount`] creates the controller, installs the DOM listeners,
//! and returns the page. [`SnapPage::handle`] gives out cheap [`SnapHandle`]
//! clones for nav links, the position indicator, and anything else that
//! needs the active section or wants to navigate. Dropping the page removes
//! every listener and stops the frame driver; in-flight state is discarded.
//!
//! # Delivery
//!
//! Every handle operation and DOM handler runs the controller inside a short
//! borrow, releases it, then drains the outbox into the registered
//! listeners. A listener may therefore call back into the handle. Changes
//! produced by such a call are delivered by the outer drain loop.

use alloc::boxed::Box;
use alloc::rc::{Rc, Weak};
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};

use wasm_bindgen::JsCast as _;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Event, Window};

use snapline_core::backend::Viewport as _;
use snapline_core::controller::Marker;
use snapline_core::store::{ListenerId, Listeners};
use snapline_core::time::HostTime;
use snapline_core::trace::TraceSink;
use snapline_core::{
    ActiveSections, Disposition, Rejection, SectionChange, SectionId, SnapConfig, SnapController,
    SnapOverride, SnapToggle,
};

use crate::events::{self, EventBinding};
use crate::raf::RafLoop;
use crate::viewport::DomViewport;

type Controller = SnapController<DomViewport>;

/// Options for [`SnapPage::mount`].
#[derive(Clone, Debug)]
pub struct PageOptions<'a> {
    /// Section ids in page order.
    pub sections: &'a [&'a str],
    /// Ids to exclude from snapping.
    pub excluded: &'a [&'a str],
    /// Selector for the fixed top overlay, or `None` for no overlay.
    pub overlay_selector: Option<&'a str>,
    /// Controller configuration.
    pub config: SnapConfig,
}

impl<'a> PageOptions<'a> {
    /// Options for `sections` with the web defaults.
    #[must_use]
    pub fn new(sections: &'a [&'a str]) -> Self {
        Self {
            sections,
            excluded: &[],
            overlay_selector: Some(crate::viewport::DEFAULT_OVERLAY_SELECTOR),
            config: SnapConfig::web(),
        }
    }
}

struct PageInner {
    mounted: Cell<bool>,
    controller: RefCell<Controller>,
    listeners: RefCell<Listeners>,
    draining: Cell<bool>,
    raf: RafLoop,
    timer: SafetyTimer,
}

/// A mounted snap page. Dropping it unmounts.
pub struct SnapPage {
    handle: SnapHandle,
    _bindings: Vec<EventBinding>,
}

impl core::fmt::Debug for SnapPage {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SnapPage")
            .field("handle", &self.handle)
            .field("bindings", &self._bindings.len())
            .finish()
    }
}

impl SnapPage {
    /// Creates the controller for the current document and installs the
    /// wheel, touch, keyboard, and scroll listeners.
    pub fn mount(options: &PageOptions<'_>) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let viewport =
            DomViewport::with_overlay(window.clone(), document.clone(), options.overlay_selector);
        let mut controller = SnapController::new(viewport, options.config);
        controller.register_sections(
            options.sections.iter().copied(),
            options.excluded.iter().copied(),
        );

        let inner = Rc::new_cyclic(|weak: &Weak<PageInner>| {
            let frame = weak.clone();
            let expire = weak.clone();
            PageInner {
                mounted: Cell::new(true),
                controller: RefCell::new(controller),
                listeners: RefCell::new(Listeners::new()),
                draining: Cell::new(false),
                raf: RafLoop::new(move |now| {
                    frame
                        .upgrade()
                        .is_some_and(|inner| SnapHandle { inner }.frame(now))
                }),
                timer: SafetyTimer::new(window.clone(), move || {
                    if let Some(inner) = expire.upgrade() {
                        // Fired timers must not block re-arming for the same deadline.
                        inner.timer.armed.set(None);
                        SnapHandle { inner }.update(|c| c.expire(crate::now()));
                    }
                }),
            }
        });
        let handle = SnapHandle { inner };
        let bindings = install(&window, &document, &handle)?;
        // Pick up the section already in view.
        handle.update(|c| c.on_scroll(crate::now()));

        Ok(Self {
            handle,
            _bindings: bindings,
        })
    }

    /// A handle to this page's controller.
    #[must_use]
    pub fn handle(&self) -> SnapHandle {
        self.handle.clone()
    }
}

impl Drop for SnapPage {
    fn drop(&mut self) {
        self.handle.inner.mounted.set(false);
        self.handle.inner.raf.stop();
        self.handle.inner.timer.cancel();
    }
}

fn install(
    window: &Window,
    document: &Document,
    handle: &SnapHandle,
) -> Result<Vec<EventBinding>, JsValue> {
    let mut bindings = Vec::with_capacity(7);
    let target: &web_sys::EventTarget = window.as_ref();
    let document: &web_sys::EventTarget = document.as_ref();

    let h = handle.downgrade();
    let wheel = move |event: Event| {
        h.dispatch(&event, |c, event| {
            let page_height = c.viewport().size().height;
            match events::wheel_delta(event, page_height) {
                Some(delta) => c.on_wheel(delta, crate::now()),
                None => Disposition::Allow,
            }
        });
    };
    bindings.push(EventBinding::listen(target, "wheel", false, wheel)?);

    let h = handle.downgrade();
    let start = move |event: Event| {
        h.dispatch(&event, |c, event| {
            if let Some(y) = events::touch_y(event, false) {
                c.on_touch_start(y, crate::now());
            }
            Disposition::Allow
        });
    };
    bindings.push(EventBinding::listen(target, "touchstart", true, start)?);

    let h = handle.downgrade();
    let moved = move |event: Event| {
        h.dispatch(&event, |c, _| c.on_touch_move(crate::now()));
    };
    bindings.push(EventBinding::listen(target, "touchmove", false, moved)?);

    let h = handle.downgrade();
    let end = move |event: Event| {
        h.dispatch(&event, |c, event| match events::touch_y(event, true) {
            Some(y) => c.on_touch_end(y, crate::now()),
            None => {
                c.on_touch_cancel();
                Disposition::Allow
            }
        });
    };
    bindings.push(EventBinding::listen(target, "touchend", false, end)?);

    let h = handle.downgrade();
    let cancel = move |event: Event| {
        h.dispatch(&event, |c, _| {
            c.on_touch_cancel();
            Disposition::Allow
        });
    };
    bindings.push(EventBinding::listen(target, "touchcancel", true, cancel)?);

    let h = handle.downgrade();
    let key = move |event: Event| {
        h.dispatch(&event, |c, event| match events::nav_key(event) {
            Some(key) => c.on_key(key, crate::now()),
            None => Disposition::Allow,
        });
    };
    bindings.push(EventBinding::listen(document, "keydown", false, key)?);

    let h = handle.downgrade();
    let scroll = move |event: Event| {
        h.dispatch(&event, |c, _| {
            c.on_scroll(crate::now());
            Disposition::Allow
        });
    };
    bindings.push(EventBinding::listen(target, "scroll", true, scroll)?);

    Ok(bindings)
}

/// Shared access to a mounted page's controller.
///
/// Handles are cheap to clone. They keep the controller alive but not the
/// DOM listeners, which belong to the [`SnapPage`].
#[derive(Clone)]
pub struct SnapHandle {
    inner: Rc<PageInner>,
}

impl core::fmt::Debug for SnapHandle {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SnapHandle")
            .field("active_index", &self.active_index())
            .field("animating", &self.is_animating())
            .finish_non_exhaustive()
    }
}

impl SnapHandle {
    /// A non-owning handle, for closures stored inside the page itself.
    #[must_use]
    pub fn downgrade(&self) -> WeakSnapHandle {
        WeakSnapHandle {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Returns `false` once the [`SnapPage`] has been dropped. Navigation
    /// requests then fail with [`Rejection::Unmounted`].
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.inner.mounted.get()
    }

    /// Index of the active section.
    #[must_use]
    pub fn active_index(&self) -> usize {
        self.inner.controller.borrow().active_index()
    }

    /// Id of the active section.
    #[must_use]
    pub fn active_id(&self) -> Option<SectionId> {
        self.inner.controller.borrow().active_id().cloned()
    }

    /// The active section list.
    #[must_use]
    pub fn sections(&self) -> ActiveSections {
        self.inner.controller.borrow().sections().clone()
    }

    /// One marker per active section.
    #[must_use]
    pub fn markers(&self) -> Vec<Marker> {
        self.inner.controller.borrow().markers()
    }

    /// Returns `true` while a snap animation is in flight.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.inner.controller.borrow().is_animating()
    }

    /// Replaces the section list (e.g. after a client-side route change).
    pub fn register_sections(&self, ordered: &[&str], excluded: &[&str]) -> ActiveSections {
        self.update(|c| {
            c.register_sections(ordered.iter().copied(), excluded.iter().copied())
                .clone()
        })
    }

    /// Starts an animated navigation to `index`.
    pub fn navigate_to(&self, index: usize) -> Result<(), Rejection> {
        self.navigate(|c| c.navigate_to(index, crate::now()))
    }

    /// Starts an animated navigation and runs `completion` when it settles.
    pub fn navigate_to_with(
        &self,
        index: usize,
        completion: impl FnOnce(&SectionChange) + 'static,
    ) -> Result<(), Rejection> {
        self.navigate(|c| c.navigate_to_with(index, crate::now(), completion))
    }

    /// Starts an animated navigation to the section with id `id`.
    pub fn navigate_to_id(&self, id: &str) -> Result<(), Rejection> {
        self.navigate(|c| c.navigate_to_id(id, crate::now()))
    }

    /// Scrolls to `index` immediately, e.g. when restoring a position.
    pub fn jump_to(&self, index: usize) -> Result<(), Rejection> {
        self.navigate(|c| c.jump_to(index, crate::now()))
    }

    /// Switches input snapping and returns the previous value.
    pub fn set_snap_enabled(&self, enabled: bool) -> bool {
        self.update(|c| c.set_snap_enabled(enabled))
    }

    /// Whether input snapping is on.
    #[must_use]
    pub fn snap_enabled(&self) -> bool {
        self.inner.controller.borrow().snap_enabled()
    }

    /// Switches input snapping until the returned guard is dropped.
    #[must_use = "dropping the guard immediately restores the previous value"]
    pub fn override_snap(&self, enabled: bool) -> SnapOverride<Self> {
        SnapOverride::new(self.clone(), enabled)
    }

    /// Replaces the controller's trace sink.
    pub fn set_trace_sink(&self, sink: impl TraceSink + 'static) {
        self.inner
            .controller
            .borrow_mut()
            .set_trace_sink(Some(Box::new(sink)));
    }

    /// Registers `listener` for every settled section change.
    ///
    /// Returns `None` when called from inside a listener; subscriptions
    /// cannot change while changes are being delivered.
    pub fn on_section_change(
        &self,
        listener: impl FnMut(&SectionChange) + 'static,
    ) -> Option<ListenerId> {
        let mut listeners = self.inner.listeners.try_borrow_mut().ok()?;
        Some(listeners.subscribe(listener))
    }

    /// Removes a listener. Returns `false` if it was not registered or if
    /// called from inside a listener.
    pub fn off_section_change(&self, id: ListenerId) -> bool {
        self.inner
            .listeners
            .try_borrow_mut()
            .is_ok_and(|mut listeners| listeners.unsubscribe(id))
    }

    /// Runs `f` on the controller, then delivers queued changes and updates
    /// the frame driver.
    fn update<R>(&self, f: impl FnOnce(&mut Controller) -> R) -> R {
        let result = f(&mut self.inner.controller.borrow_mut());
        self.drain();
        self.sync_driver();
        result
    }

    /// Runs a navigation request, refusing it once the page is unmounted.
    fn navigate(
        &self,
        f: impl FnOnce(&mut Controller) -> Result<(), Rejection>,
    ) -> Result<(), Rejection> {
        if !self.is_mounted() {
            return Err(Rejection::Unmounted);
        }
        self.update(f)
    }

    fn frame(&self, now: HostTime) -> bool {
        self.update(|c| c.tick(now));
        self.is_animating()
    }

    fn drain(&self) {
        if self.inner.draining.replace(true) {
            return;
        }
        loop {
            let outbox = self.inner.controller.borrow_mut().take_outbox();
            if outbox.is_empty() {
                break;
            }
            outbox.deliver(&mut self.inner.listeners.borrow_mut());
        }
        self.inner.draining.set(false);
    }

    fn sync_driver(&self) {
        let (deadline, animating) = {
            let controller = self.inner.controller.borrow();
            (controller.deadline(), controller.is_animating())
        };
        if !self.is_mounted() {
            self.inner.raf.stop();
            self.inner.timer.cancel();
            return;
        }
        if animating {
            self.inner.raf.start();
        }
        match deadline {
            Some(deadline) => self.inner.timer.arm(deadline),
            None => self.inner.timer.cancel(),
        }
    }
}

impl SnapToggle for SnapHandle {
    fn snap_enabled(&self) -> bool {
        Self::snap_enabled(self)
    }

    fn try_snap_enabled(&self) -> Option<bool> {
        self.inner
            .controller
            .try_borrow()
            .ok()
            .map(|controller| controller.snap_enabled())
    }

    fn set_snap_enabled(&self, enabled: bool) {
        Self::set_snap_enabled(self, enabled);
    }
}

/// A [`SnapHandle`] that does not keep the page alive.
#[derive(Clone, Debug)]
pub struct WeakSnapHandle {
    inner: Weak<PageInner>,
}

impl WeakSnapHandle {
    /// The strong handle, if the page still exists.
    #[must_use]
    pub fn upgrade(&self) -> Option<SnapHandle> {
        self.inner.upgrade().map(|inner| SnapHandle { inner })
    }

    /// Runs a DOM handler and applies its disposition to `event`.
    fn dispatch(
        &self,
        event: &Event,
        handler: impl FnOnce(&mut Controller, &Event) -> Disposition,
    ) {
        let Some(handle) = self.upgrade() else {
            return;
        };
        if handle.update(|c| handler(c, event)).should_prevent() && event.cancelable() {
            event.prevent_default();
        }
    }
}

/// One-shot `setTimeout` that force-completes a stuck animation.
///
/// Covers the case where `requestAnimationFrame` stops firing (e.g. the tab
/// is hidden) and no input arrives to reach the controller's deadline check.
struct SafetyTimer {
    window: Window,
    callback: Closure<dyn FnMut()>,
    armed: Cell<Option<(i32, HostTime)>>,
}

impl SafetyTimer {
    fn new(window: Window, on_fire: impl FnMut() + 'static) -> Self {
        Self {
            window,
            callback: Closure::wrap(Box::new(on_fire) as Box<dyn FnMut()>),
            armed: Cell::new(None),
        }
    }

    /// Arms the timer for `deadline` unless it already is.
    fn arm(&self, deadline: HostTime) {
        let current = self.armed.get();
        if current.is_some_and(|(_, armed_for)| armed_for == deadline) {
            return;
        }
        self.cancel();
        let delay_ms = events::timeout_delay_ms(crate::now(), deadline);
        let callback: &js_sys::Function = self.callback.as_ref().unchecked_ref();
        let window = &self.window;
        let scheduled =
            window.set_timeout_with_callback_and_timeout_and_arguments_0(callback, delay_ms);
        if let Ok(id) = scheduled {
            self.armed.set(Some((id, deadline)));
        }
    }

    fn cancel(&self) {
        if let Some((id, _)) = self.armed.take() {
            self.window.clear_timeout_with_handle(id);
        }
    }
}

impl core::fmt::Debug for PageInner {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PageInner")
            .field("raf", &self.raf)
            .field("timer_armed", &self.timer.armed.get().is_some())
            .finish_non_exhaustive()
    }
}
