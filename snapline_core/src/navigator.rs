// Copyright 2026 the Snapline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Snap target alignment and the eased scroll animation.
//!
//! A section is aligned just below the page's fixed overlay, not at the
//! literal top of the viewport:
//!
//! ```text
//! offset   = overlay_height + base_padding + min(height * ratio, max) * scale
//! target_y = clamp(scroll_y + section_top - offset, 0, max_scroll_y)
//! ```
//!
//! where `scale` is [`mobile_padding_scale`] below the mobile breakpoint and
//! `1.0` otherwise. [`ScrollAnimation`] then interpolates from the current
//! position to `target_y` with an ease-in-out cubic curve.
//!
//! [`mobile_padding_scale`]: crate::config::NavigatorConfig::mobile_padding_scale

use kurbo::Size;

use crate::config::NavigatorConfig;
use crate::time::{Duration, HostTime};

/// Whether `viewport` counts as a mobile viewport.
#[must_use]
pub fn is_mobile(viewport: Size, config: &NavigatorConfig) -> bool {
    viewport.width < config.mobile_breakpoint
}

/// Distance between the viewport top and an aligned section's top edge.
///
/// Falls back to the configured default overlay height when the overlay
/// cannot be measured.
#[must_use]
pub fn scroll_offset(overlay_height: Option<f64>, viewport: Size, config: &NavigatorConfig) -> f64 {
    let mobile = is_mobile(viewport, config);
    let overlay = overlay_height
        .filter(|h| h.is_finite() && *h >= 0.0)
        .unwrap_or(if mobile {
            config.default_overlay_mobile
        } else {
            config.default_overlay_desktop
        });
    let proportional =
        (viewport.height * config.viewport_padding_ratio).clamp(0.0, config.max_viewport_padding);
    let scale = if mobile {
        config.mobile_padding_scale
    } else {
        1.0
    };
    overlay + config.base_padding + proportional * scale
}

/// Document scroll position that aligns a section under the overlay.
///
/// `section_top` is the section's viewport-relative top edge (as reported by
/// `getBoundingClientRect`).
#[must_use]
pub fn target_scroll_y(scroll_y: f64, section_top: f64, offset: f64, max_scroll_y: f64) -> f64 {
    let target = scroll_y + section_top - offset;
    target.clamp(0.0, max_scroll_y.max(0.0))
}

/// Ease-in-out cubic on `t` in `[0, 1]`.
#[must_use]
pub fn ease_in_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let u = -2.0 * t + 2.0;
        1.0 - u * u * u / 2.0
    }
}

/// One frame of a [`ScrollAnimation`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollSample {
    /// Scroll position to write for this frame.
    pub y: f64,
    /// `true` on the final frame, where `y` equals the destination.
    pub finished: bool,
}

/// A time-parameterised scroll from one position to another.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollAnimation {
    from: f64,
    to: f64,
    start: HostTime,
    duration: Duration,
}

impl ScrollAnimation {
    /// Creates an animation starting at `start`.
    #[must_use]
    pub const fn new(from: f64, to: f64, start: HostTime, duration: Duration) -> Self {
        Self {
            from,
            to,
            start,
            duration,
        }
    }

    /// Starting scroll position.
    #[must_use]
    pub const fn from(&self) -> f64 {
        self.from
    }

    /// Destination scroll position.
    #[must_use]
    pub const fn to(&self) -> f64 {
        self.to
    }

    /// When the animation started.
    #[must_use]
    pub const fn start(&self) -> HostTime {
        self.start
    }

    /// When the animation reaches its destination.
    #[must_use]
    pub fn end(&self) -> HostTime {
        self.start + self.duration
    }

    /// Samples the animation at `now`.
    #[must_use]
    pub fn sample(&self, now: HostTime) -> ScrollSample {
        let elapsed = now.saturating_duration_since(self.start);
        if self.duration.is_zero() || elapsed >= self.duration {
            return ScrollSample {
                y: self.to,
                finished: true,
            };
        }
        let t = elapsed.micros() as f64 / self.duration.micros() as f64;
        ScrollSample {
            y: self.from + (self.to - self.from) * ease_in_out_cubic(t),
            finished: false,
        }
    }
}
