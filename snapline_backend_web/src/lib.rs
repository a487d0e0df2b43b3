// Copyright 2026 the Snapline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Browser backend for snapline.
//!
//! This crate wires a [`SnapController`] to the DOM:
//!
//! - [`SnapPage`]: mounts the controller, installs wheel, touch, keyboard,
//!   and scroll listeners, and owns their lifetime
//! - [`SnapHandle`]: the shared page context used to read the active section,
//!   navigate, toggle snapping, and subscribe to changes
//! - [`DomViewport`]: section lookup, overlay measurement, and scroll writes
//! - [`RafLoop`]: `requestAnimationFrame` driver for snap animations
//! - [`DomIndicator`]: a position indicator with one marker per section
//! - [`NavLinks`]: snap navigation for `#id` anchors
//! - [`ConsoleSink`]: a trace sink that logs to the console
//!
//! ```rust,ignore
//! let page = SnapPage::mount(&PageOptions::new(&["hero", "services", "contact"]))?;
//! let handle = page.handle();
//! handle.on_section_change(|change| { /* ... */ });
//! let _links = NavLinks::bind(&document, &handle)?;
//! ```
//!
//! [`SnapController`]: snapline_core::SnapController

#![no_std]

extern crate alloc;

mod console;
mod events;
mod indicator;
mod nav;
mod page;
mod raf;
mod viewport;

pub use console::ConsoleSink;
pub use events::{
    EventBinding, WHEEL_LINE_HEIGHT, anchor_target, is_editable_tag, normalize_wheel_delta,
    timeout_delay_ms,
};
pub use indicator::{ACTIVE_CLASS, DomIndicator};
pub use nav::{NAV_LINK_SELECTOR, NavLinks};
pub use page::{PageOptions, SnapHandle, SnapPage, WeakSnapHandle};
pub use raf::RafLoop;
pub use snapline_core::backend::Viewport;
pub use viewport::{DEFAULT_OVERLAY_SELECTOR, DomViewport, SECTION_ATTRIBUTE};

use snapline_core::time::HostTime;

/// Returns the current host time from `performance.now()`.
#[must_use]
pub fn now() -> HostTime {
    HostTime::from_millis_f64(raf::performance_now())
}
