// Copyright 2026 the Snapline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input normalisation: wheel, touch, and keyboard to directional intents.
//!
//! Each modality has its own debouncer:
//!
//! - [`WheelGate`] accumulates `deltaY` and emits a [`Direction`] once the
//!   accumulated magnitude reaches
//!   [`wheel_threshold`](crate::config::InputConfig::wheel_threshold) **and**
//!   at least [`wheel_cooldown`](crate::config::InputConfig::wheel_cooldown)
//!   has passed since the previous emission. A delta whose sign opposes the
//!   accumulated sign restarts accumulation from that delta.
//! - [`SwipeTracker`] compares touch-start and touch-end positions; a gesture
//!   counts only if it travels far enough within the allowed time.
//! - [`NavKey`] maps `KeyboardEvent.key` names to an [`Intent`].
//!
//! None of these know about sections; range checks happen in the controller.

use crate::config::InputConfig;
use crate::time::HostTime;

/// A step towards the previous or next section.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards index 0.
    Previous,
    /// Towards the last index.
    Next,
}

impl Direction {
    /// Direction implied by a signed vertical delta, where positive means
    /// "content moves up" (scrolling down the page).
    #[must_use]
    pub fn from_delta(delta: f64) -> Option<Self> {
        if delta > 0.0 {
            Some(Self::Next)
        } else if delta < 0.0 {
            Some(Self::Previous)
        } else {
            None
        }
    }

    /// Applies this step to `index` within `0..len`.
    ///
    /// Returns `Err` with the would-be index when the step leaves the range.
    pub fn apply(self, index: usize, len: usize) -> Result<usize, i64> {
        let signed = i64::try_from(index).unwrap_or(i64::MAX);
        match self {
            Self::Previous => index.checked_sub(1).ok_or(signed - 1),
            Self::Next => {
                let next = index.saturating_add(1);
                if next < len {
                    Ok(next)
                } else {
                    Err(signed.saturating_add(1))
                }
            }
        }
    }
}

/// A normalised navigation request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Intent {
    /// Move one section.
    Step(Direction),
    /// Jump to the first section.
    First,
    /// Jump to the last section.
    Last,
}

/// Which input produced an intent or request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputSource {
    /// Mouse wheel or trackpad.
    Wheel,
    /// Touch swipe.
    Touch,
    /// Keyboard.
    Key,
    /// A programmatic call such as a nav-link click or indicator marker.
    Api,
}

/// Keys that drive section navigation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NavKey {
    /// `ArrowUp`.
    ArrowUp,
    /// `ArrowDown`.
    ArrowDown,
    /// `PageUp`.
    PageUp,
    /// `PageDown`.
    PageDown,
    /// `Home`.
    Home,
    /// `End`.
    End,
}

impl NavKey {
    /// Parses a `KeyboardEvent.key` value.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Some(match key {
            "ArrowUp" => Self::ArrowUp,
            "ArrowDown" => Self::ArrowDown,
            "PageUp" => Self::PageUp,
            "PageDown" => Self::PageDown,
            "Home" => Self::Home,
            "End" => Self::End,
            _ => return None,
        })
    }

    /// The intent this key expresses.
    #[must_use]
    pub const fn intent(self) -> Intent {
        match self {
            Self::ArrowUp | Self::PageUp => Intent::Step(Direction::Previous),
            Self::ArrowDown | Self::PageDown => Intent::Step(Direction::Next),
            Self::Home => Intent::First,
            Self::End => Intent::Last,
        }
    }
}

/// Accumulating wheel debouncer.
#[derive(Clone, Copy, Debug, Default)]
pub struct WheelGate {
    accumulated: f64,
    last_emit: Option<HostTime>,
}

impl WheelGate {
    /// Creates an empty gate.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            accumulated: 0.0,
            last_emit: None,
        }
    }

    /// Feeds one wheel event and returns a direction if the gate opens.
    pub fn feed(&mut self, delta_y: f64, now: HostTime, config: &InputConfig) -> Option<Direction> {
        if !delta_y.is_finite() || delta_y == 0.0 {
            return None;
        }

        if self.accumulated * delta_y < 0.0 {
            self.accumulated = delta_y;
        } else {
            self.accumulated += delta_y;
        }

        if self.accumulated.abs() < config.wheel_threshold {
            return None;
        }
        let cooldown = config.wheel_cooldown;
        let cooled = self
            .last_emit
            .is_none_or(|last| now.saturating_duration_since(last) >= cooldown);
        if !cooled {
            return None;
        }

        let direction = Direction::from_delta(self.accumulated);
        self.accumulated = 0.0;
        self.last_emit = Some(now);
        direction
    }

    /// Discards the accumulated delta. The cooldown clock is kept.
    pub fn reset(&mut self) {
        self.accumulated = 0.0;
    }

    /// The delta accumulated since the last emission or reset.
    #[must_use]
    pub const fn accumulated(&self) -> f64 {
        self.accumulated
    }
}

/// Touch swipe detector.
#[derive(Clone, Copy, Debug, Default)]
pub struct SwipeTracker {
    start: Option<(f64, HostTime)>,
}

impl SwipeTracker {
    /// Creates an idle tracker.
    #[must_use]
    pub const fn new() -> Self {
        Self { start: None }
    }

    /// Records the start of a gesture at vertical position `y`.
    pub fn begin(&mut self, y: f64, now: HostTime) {
        self.start = Some((y, now));
    }

    /// Returns `true` while a gesture is being tracked.
    #[must_use]
    pub const fn is_tracking(&self) -> bool {
        self.start.is_some()
    }

    /// Ends the gesture at vertical position `y` and returns its direction
    /// if it qualifies as a swipe.
    ///
    /// A finger moving up the screen scrolls towards the next section.
    pub fn end(&mut self, y: f64, now: HostTime, config: &InputConfig) -> Option<Direction> {
        let (start_y, start_at) = self.start.take()?;
        let travel = start_y - y;
        if !travel.is_finite() || travel.abs() < config.swipe_min_distance {
            return None;
        }
        if now.saturating_duration_since(start_at) > config.swipe_max_duration {
            return None;
        }
        Direction::from_delta(travel)
    }

    /// Abandons the current gesture.
    pub fn cancel(&mut self) {
        self.start = None;
    }
}
