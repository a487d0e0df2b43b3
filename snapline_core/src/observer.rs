// Copyright 2026 the Snapline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll-position section detection.
//!
//! [`PositionObserver`] is fed the viewport-relative bounds of every active
//! section after each scroll. A section is *in band* while its rectangle
//! overlaps the horizontal band described by
//! [`ObserverConfig`](crate::config::ObserverConfig). The observer remembers
//! which sections were in band on the previous sample and reports the one
//! that most recently *entered*.
//!
//! The observer only reads geometry. Whether its report is applied (it is
//! ignored while a snap animation is in flight) is the controller's call.

use alloc::vec;
use alloc::vec::Vec;

use kurbo::Rect;

use crate::config::ObserverConfig;

/// Tracks which sections are inside the observation band.
#[derive(Clone, Debug, Default)]
pub struct PositionObserver {
    in_band: Vec<bool>,
    last_scroll_y: Option<f64>,
}

impl PositionObserver {
    /// Creates an observer for `len` sections, none of them in band.
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self {
            in_band: vec![false; len],
            last_scroll_y: None,
        }
    }

    /// Forgets all band membership and resizes for `len` sections.
    ///
    /// Called when the section list changes.
    pub fn reset(&mut self, len: usize) {
        self.in_band.clear();
        self.in_band.resize(len, false);
        self.last_scroll_y = None;
    }

    /// Whether section `index` was in band on the last sample.
    #[must_use]
    pub fn is_in_band(&self, index: usize) -> bool {
        self.in_band.get(index).copied().unwrap_or(false)
    }

    /// Takes a sample and returns the index of the section that entered the
    /// band, if any.
    ///
    /// `bounds[i]` is the viewport-relative rectangle of section `i`, or
    /// `None` when its element is absent. When several sections enter in the
    /// same sample, the one leading in the scroll direction wins.
    pub fn observe(
        &mut self,
        scroll_y: f64,
        viewport_height: f64,
        bounds: &[Option<Rect>],
        config: &ObserverConfig,
    ) -> Option<usize> {
        if self.in_band.len() != bounds.len() {
            self.reset(bounds.len());
        }

        let band_top = viewport_height * config.band_top;
        let band_bottom = viewport_height * config.band_bottom;
        let scrolling_up = self.last_scroll_y.is_some_and(|last| scroll_y < last);
        self.last_scroll_y = Some(scroll_y);

        let mut entered = None;
        for (index, rect) in bounds.iter().enumerate() {
            let now_in = rect.is_some_and(|r| r.y0 < band_bottom && r.y1 > band_top);
            let was_in = core::mem::replace(&mut self.in_band[index], now_in);
            if now_in && !was_in {
                // Ascending iteration: keep the first hit when scrolling up,
                // the last when scrolling down.
                if !(scrolling_up && entered.is_some()) {
                    entered = Some(index);
                }
            }
        }
        entered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SnapConfig;

    const VIEWPORT_H: f64 = 900.0;
    const SECTION_H: f64 = 900.0;

    fn stacked(count: usize, scroll_y: f64) -> Vec<Option<Rect>> {
        (0..count)
            .map(|i| {
                let top = i as f64 * SECTION_H - scroll_y;
                Some(Rect::new(0.0, top, 1280.0, top + SECTION_H))
            })
            .collect()
    }

    fn band() -> ObserverConfig {
        SnapConfig::web().observer
    }

    #[test]
    fn first_sample_reports_the_visible_section() {
        let mut observer = PositionObserver::new(3);
        let entered = observer.observe(0.0, VIEWPORT_H, &stacked(3, 0.0), &band());
        assert_eq!(entered, Some(0));
        assert!(observer.is_in_band(0));
        assert!(!observer.is_in_band(1));
    }

    #[test]
    fn scrolling_down_enters_next_section() {
        let mut observer = PositionObserver::new(3);
        observer.observe(0.0, VIEWPORT_H, &stacked(3, 0.0), &band());
        // Section 1's top is still below the band.
        assert_eq!(
            observer.observe(200.0, VIEWPORT_H, &stacked(3, 200.0), &band()),
            None
        );
        // Section 1's top crossed two-thirds of the viewport.
        assert_eq!(
            observer.observe(400.0, VIEWPORT_H, &stacked(3, 400.0), &band()),
            Some(1)
        );
        // Staying in band is not a new entry.
        assert_eq!(
            observer.observe(500.0, VIEWPORT_H, &stacked(3, 500.0), &band()),
            None
        );
    }

    #[test]
    fn scrolling_back_up_reenters_previous_section() {
        let mut observer = PositionObserver::new(3);
        observer.observe(900.0, VIEWPORT_H, &stacked(3, 900.0), &band());
        assert_eq!(
            observer.observe(300.0, VIEWPORT_H, &stacked(3, 300.0), &band()),
            Some(0)
        );
    }

    #[test]
    fn simultaneous_entries_follow_scroll_direction() {
        let short = |scroll_y: f64| -> Vec<Option<Rect>> {
            (0..4)
                .map(|i| {
                    let top = i as f64 * 100.0 - scroll_y;
                    Some(Rect::new(0.0, top, 100.0, top + 100.0))
                })
                .collect()
        };

        let mut down = PositionObserver::new(4);
        down.observe(-2_000.0, VIEWPORT_H, &short(-2_000.0), &band());
        assert_eq!(
            down.observe(-250.0, VIEWPORT_H, &short(-250.0), &band()),
            Some(3)
        );

        let mut up = PositionObserver::new(4);
        up.observe(2_000.0, VIEWPORT_H, &short(2_000.0), &band());
        assert_eq!(
            up.observe(-250.0, VIEWPORT_H, &short(-250.0), &band()),
            Some(0)
        );
    }

    #[test]
    fn missing_elements_are_never_in_band() {
        let mut observer = PositionObserver::new(2);
        let bounds = [None, Some(Rect::new(0.0, 0.0, 100.0, 900.0))];
        assert_eq!(observer.observe(0.0, VIEWPORT_H, &bounds, &band()), Some(1));
        assert!(!observer.is_in_band(0));
    }

    #[test]
    fn length_change_resets_membership() {
        let mut observer = PositionObserver::new(3);
        observer.observe(0.0, VIEWPORT_H, &stacked(3, 0.0), &band());
        assert_eq!(
            observer.observe(0.0, VIEWPORT_H, &stacked(2, 0.0), &band()),
            Some(0),
            "a new list starts with nothing in band"
        );
    }
}
