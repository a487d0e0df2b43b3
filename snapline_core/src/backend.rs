// Copyright 2026 the Snapline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host contract for platform integrations.
//!
//! The controller never touches a DOM. A host crate provides:
//!
//! - **Time**: a `now() -> HostTime` free function reading the platform's
//!   monotonic clock, passed into every controller entry point.
//!
//! - **Frame source**: something that calls
//!   [`SnapController::tick`](crate::SnapController::tick) once per frame
//!   while [`is_animating`](crate::SnapController::is_animating) is `true`
//!   (on the web, `requestAnimationFrame`).
//!
//! - **Event plumbing**: listeners that forward wheel, touch, key, and
//!   scroll events to the controller and honour the returned
//!   [`Disposition`](crate::Disposition).
//!
//! - **Viewport**: an implementation of the [`Viewport`] trait, which is the
//!   controller's only window onto layout and the only path through which it
//!   writes the scroll position.

use kurbo::{Rect, Size};

use crate::section::SectionId;

/// Layout queries and the scroll-position write used by the controller.
///
/// DOM hosts implement this over `window`/`document`; tests use an in-memory
/// page. All coordinates are CSS pixels.
pub trait Viewport {
    /// Current vertical document scroll position.
    fn scroll_y(&self) -> f64;

    /// Largest reachable scroll position.
    fn max_scroll_y(&self) -> f64;

    /// Viewport size.
    fn size(&self) -> Size;

    /// Viewport-relative bounds of the region tagged with `id`, or `None` if
    /// it is not in the document (yet).
    fn section_bounds(&self, id: &SectionId) -> Option<Rect>;

    /// Rendered height of the fixed top overlay, or `None` if it is absent.
    fn overlay_height(&self) -> Option<f64>;

    /// Writes the vertical document scroll position.
    fn scroll_to(&mut self, y: f64);
}

impl<V: Viewport + ?Sized> Viewport for &mut V {
    fn scroll_y(&self) -> f64 {
        (**self).scroll_y()
    }

    fn max_scroll_y(&self) -> f64 {
        (**self).max_scroll_y()
    }

    fn size(&self) -> Size {
        (**self).size()
    }

    fn section_bounds(&self, id: &SectionId) -> Option<Rect> {
        (**self).section_bounds(id)
    }

    fn overlay_height(&self) -> Option<f64> {
        (**self).overlay_height()
    }

    fn scroll_to(&mut self, y: f64) {
        (**self).scroll_to(y);
    }
}
