// Copyright 2026 the Snapline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tunable thresholds for input debouncing, navigation, and observation.
//!
//! Every "feel" constant lives here as a named field rather than an inline
//! literal. [`SnapConfig::web`] carries the production values;
//! [`SnapConfig::fast`] keeps the same shape with tiny durations so tests can
//! step time in small increments.

use crate::time::Duration;

/// Thresholds for collapsing raw input into directional intents.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InputConfig {
    /// Minimum accumulated `|deltaY|` (CSS pixels) before a wheel intent can
    /// be emitted.
    pub wheel_threshold: f64,
    /// Minimum time since the previous wheel intent before another can be
    /// emitted.
    pub wheel_cooldown: Duration,
    /// Minimum vertical travel (CSS pixels) for a touch gesture to count as
    /// a swipe.
    pub swipe_min_distance: f64,
    /// Maximum duration of a touch gesture that still counts as a swipe.
    pub swipe_max_duration: Duration,
}

/// Parameters for snap animation and target alignment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NavigatorConfig {
    /// Length of the eased scroll animation. Zero makes every navigation
    /// instantaneous.
    pub duration: Duration,
    /// Extra time past `duration` after which an in-flight animation is
    /// force-completed.
    pub timeout_grace: Duration,
    /// Fixed padding (CSS pixels) between the overlay and the section top.
    pub base_padding: f64,
    /// Additional padding as a fraction of the viewport height.
    pub viewport_padding_ratio: f64,
    /// Upper bound for the viewport-proportional padding.
    pub max_viewport_padding: f64,
    /// Viewports narrower than this (CSS pixels) are treated as mobile.
    pub mobile_breakpoint: f64,
    /// Multiplier applied to the viewport-proportional padding on mobile.
    pub mobile_padding_scale: f64,
    /// Overlay height assumed on desktop when none can be measured.
    pub default_overlay_desktop: f64,
    /// Overlay height assumed on mobile when none can be measured.
    pub default_overlay_mobile: f64,
}

/// The intersection band used by the position observer.
///
/// Both values are fractions of the viewport height measured from its top
/// edge. A section is in band while its rectangle overlaps
/// `[band_top * height, band_bottom * height]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ObserverConfig {
    /// Upper edge of the band.
    pub band_top: f64,
    /// Lower edge of the band.
    pub band_bottom: f64,
}

/// Complete configuration for a [`SnapController`](crate::SnapController).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SnapConfig {
    /// Input debouncing thresholds.
    pub input: InputConfig,
    /// Navigation and alignment parameters.
    pub navigator: NavigatorConfig,
    /// Observer band.
    pub observer: ObserverConfig,
}

impl InputConfig {
    /// Production thresholds for browsers.
    #[must_use]
    pub const fn web() -> Self {
        Self {
            wheel_threshold: 50.0,
            wheel_cooldown: Duration::from_millis(800),
            swipe_min_distance: 50.0,
            swipe_max_duration: Duration::from_millis(500),
        }
    }
}

impl NavigatorConfig {
    /// Production animation and padding values for browsers.
    #[must_use]
    pub const fn web() -> Self {
        Self {
            duration: Duration::from_millis(700),
            timeout_grace: Duration::from_millis(300),
            base_padding: 16.0,
            viewport_padding_ratio: 0.02,
            max_viewport_padding: 32.0,
            mobile_breakpoint: 768.0,
            mobile_padding_scale: 0.5,
            default_overlay_desktop: 80.0,
            default_overlay_mobile: 64.0,
        }
    }
}

impl ObserverConfig {
    /// The middle third of the viewport.
    #[must_use]
    pub const fn web() -> Self {
        Self {
            band_top: 1.0 / 3.0,
            band_bottom: 2.0 / 3.0,
        }
    }
}

impl SnapConfig {
    /// Default configuration for the web.
    #[must_use]
    pub const fn web() -> Self {
        Self {
            input: InputConfig::web(),
            navigator: NavigatorConfig::web(),
            observer: ObserverConfig::web(),
        }
    }

    /// Same distances as [`web`](Self::web) with millisecond-scale timing.
    ///
    /// Wheel cooldown 8 ms, swipe window 5 ms, animation 10 ms, grace 5 ms.
    #[must_use]
    pub const fn fast() -> Self {
        let mut config = Self::web();
        config.input.wheel_cooldown = Duration::from_millis(8);
        config.input.swipe_max_duration = Duration::from_millis(5);
        config.navigator.duration = Duration::from_millis(10);
        config.navigator.timeout_grace = Duration::from_millis(5);
        config
    }
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self::web()
    }
}
