// Copyright 2026 the Snapline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The `{Idle, Animating}` snap state machine.
//!
//! [`SnapController`] owns the section list, the navigation state, and the
//! animation token. It is driven entirely by the host:
//!
//! - input handlers ([`on_wheel`](SnapController::on_wheel),
//!   [`on_touch_end`](SnapController::on_touch_end),
//!   [`on_key`](SnapController::on_key), ...) return a [`Disposition`] telling
//!   the host whether to suppress the browser default action;
//! - [`on_scroll`](SnapController::on_scroll) feeds the position observer;
//! - [`tick`](SnapController::tick) advances an in-flight animation, once per
//!   frame;
//! - [`take_outbox`](SnapController::take_outbox) hands over settled changes
//!   for delivery once the host has released its borrow.
//!
//! # Transitions
//!
//! ```text
//!            navigate_to / intent              tick: finished
//!   Idle ─────────────────────────► Animating ───────────────► Idle + change
//!    ▲  jump_to: settle at once         │  any entry at deadline
//!    └──────────────────────────────────┘  (force-complete)
//! ```
//!
//! While `Animating`, new intents and navigation requests are dropped and
//! observer reports are not applied. Every entry point first checks the
//! flight's deadline, so a lost frame callback cannot leave the token set.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;

use kurbo::Rect;

use crate::backend::Viewport;
use crate::config::SnapConfig;
use crate::error::Rejection;
use crate::input::{InputSource, Intent, NavKey, SwipeTracker, WheelGate};
use crate::navigator::{self, ScrollAnimation};
use crate::observer::PositionObserver;
use crate::section::{ActiveSections, SectionId, SectionRegistry};
use crate::store::{ChangeCause, Completion, NavigationState, Outbox, SectionChange, SnapToggle};
use crate::time::{Duration, HostTime};
use crate::trace::{
    IntentEvent, NavigationSettledEvent, NavigationStartEvent, ObserverEvent, RejectedEvent,
    SectionsRegisteredEvent, TraceSink, Tracer,
};

/// What the host should do with the browser event that was just handled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[must_use]
pub enum Disposition {
    /// Let the browser perform its default action.
    Allow,
    /// Call `preventDefault()`.
    Prevent,
}

impl Disposition {
    /// Returns `true` for [`Disposition::Prevent`].
    #[must_use]
    pub const fn should_prevent(self) -> bool {
        matches!(self, Self::Prevent)
    }
}

/// One position-indicator marker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Marker {
    /// Section id.
    pub id: SectionId,
    /// Index in the active section list.
    pub index: usize,
    /// Whether this is the active section.
    pub active: bool,
}

/// An in-flight snap navigation. Holding one is holding the animation token.
struct Flight {
    target: usize,
    animation: ScrollAnimation,
    deadline: HostTime,
    completion: Option<Completion>,
}

impl fmt::Debug for Flight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Flight")
            .field("target", &self.target)
            .field("animation", &self.animation)
            .field("deadline", &self.deadline)
            .field("has_completion", &self.completion.is_some())
            .finish()
    }
}

#[derive(Debug, Default)]
enum Phase {
    #[default]
    Idle,
    Animating(Flight),
}

/// Section snap controller for one page.
///
/// Create one per page mount and drop it on unmount; dropping discards any
/// in-flight navigation. See the [module docs](self) for the state machine.
pub struct SnapController<V> {
    config: SnapConfig,
    viewport: V,
    registry: SectionRegistry,
    sections: ActiveSections,
    state: NavigationState,
    phase: Phase,
    wheel: WheelGate,
    swipe: SwipeTracker,
    observer: PositionObserver,
    outbox: Outbox,
    sink: Option<Box<dyn TraceSink>>,
}

impl<V: fmt::Debug> fmt::Debug for SnapController<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnapController")
            .field("viewport", &self.viewport)
            .field("sections", &self.sections)
            .field("state", &self.state)
            .field("phase", &self.phase)
            .field("outbox", &self.outbox)
            .finish_non_exhaustive()
    }
}

impl<V: Viewport> SnapController<V> {
    /// Creates a controller with no sections registered.
    #[must_use]
    pub fn new(viewport: V, config: SnapConfig) -> Self {
        Self {
            config,
            viewport,
            registry: SectionRegistry::default(),
            sections: ActiveSections::default(),
            state: NavigationState::default(),
            phase: Phase::Idle,
            wheel: WheelGate::new(),
            swipe: SwipeTracker::new(),
            observer: PositionObserver::default(),
            outbox: Outbox::default(),
            sink: None,
        }
    }

    /// Attaches a trace sink. Events reach it only with the `trace` feature.
    #[must_use]
    pub fn with_trace_sink(mut self, sink: impl TraceSink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Replaces or removes the trace sink.
    pub fn set_trace_sink(&mut self, sink: Option<Box<dyn TraceSink>>) {
        self.sink = sink;
    }

    /// The configuration in use.
    #[must_use]
    pub fn config(&self) -> &SnapConfig {
        &self.config
    }

    /// The host viewport.
    #[must_use]
    pub fn viewport(&self) -> &V {
        &self.viewport
    }

    /// The host viewport, mutably.
    pub fn viewport_mut(&mut self) -> &mut V {
        &mut self.viewport
    }

    /// The registered ids, including excluded ones.
    #[must_use]
    pub fn registry(&self) -> &SectionRegistry {
        &self.registry
    }

    /// The active section list.
    #[must_use]
    pub fn sections(&self) -> &ActiveSections {
        &self.sections
    }

    /// Snapshot of the navigation state.
    #[must_use]
    pub fn state(&self) -> NavigationState {
        self.state
    }

    /// Index of the active section; `0` when nothing is registered.
    #[must_use]
    pub fn active_index(&self) -> usize {
        self.state.active_index
    }

    /// Id of the active section, or `None` when nothing is registered.
    #[must_use]
    pub fn active_id(&self) -> Option<&SectionId> {
        self.sections.get(self.state.active_index)
    }

    /// Whether wheel, touch, and keyboard input snap.
    #[must_use]
    pub fn snap_enabled(&self) -> bool {
        self.state.snap_enabled
    }

    /// Switches input snapping on or off and returns the previous value.
    ///
    /// Programmatic navigation and position tracking are unaffected. Prefer
    /// [`SnapOverride`](crate::SnapOverride) for scoped changes.
    pub fn set_snap_enabled(&mut self, enabled: bool) -> bool {
        let previous = core::mem::replace(&mut self.state.snap_enabled, enabled);
        if !enabled {
            self.wheel.reset();
            self.swipe.cancel();
        }
        if previous != enabled {
            self.tracer().snap_toggle(enabled);
        }
        previous
    }

    /// Returns `true` while the animation token is held.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        matches!(self.phase, Phase::Animating(_))
    }

    /// Target index of the in-flight navigation.
    #[must_use]
    pub fn target_index(&self) -> Option<usize> {
        match &self.phase {
            Phase::Animating(flight) => Some(flight.target),
            Phase::Idle => None,
        }
    }

    /// When the in-flight navigation will be force-completed.
    #[must_use]
    pub fn deadline(&self) -> Option<HostTime> {
        match &self.phase {
            Phase::Animating(flight) => Some(flight.deadline),
            Phase::Idle => None,
        }
    }

    /// One marker per active section, for a position indicator.
    #[must_use]
    pub fn markers(&self) -> Vec<Marker> {
        self.sections
            .iter()
            .enumerate()
            .map(|(index, id)| Marker {
                id: id.clone(),
                index,
                active: index == self.state.active_index,
            })
            .collect()
    }

    /// Replaces the section list and returns the new active list.
    ///
    /// The active id is kept when it survives; otherwise the previous index
    /// is clamped into the new range. An in-flight navigation is abandoned
    /// without settling and its completion is dropped. A
    /// [`ChangeCause::Registration`] change is queued when the active id,
    /// its index, or the active list differs from before, so indicators can
    /// re-render from the change alone.
    pub fn register_sections<I, E>(&mut self, ordered: I, excluded: E) -> &ActiveSections
    where
        I: IntoIterator,
        I::Item: Into<SectionId>,
        E: IntoIterator,
        E::Item: Into<SectionId>,
    {
        let previous = self.active_id().cloned();
        let previous_index = self.state.active_index;
        let previous_sections = core::mem::take(&mut self.sections);
        self.phase = Phase::Idle;
        self.registry = SectionRegistry::new(ordered, excluded);
        self.sections = self.registry.active();
        self.observer.reset(self.sections.len());
        self.wheel.reset();
        self.swipe.cancel();

        let index = previous
            .as_ref()
            .and_then(|id| self.sections.position(id.as_str()))
            .unwrap_or_else(|| {
                self.state
                    .active_index
                    .min(self.sections.len().saturating_sub(1))
            });
        self.state.active_index = index;

        let event = SectionsRegisteredEvent {
            registered: self.registry.ordered().len(),
            active: self.sections.len(),
            active_index: index,
        };
        self.tracer().sections_registered(&event);

        let layout_changed = index != previous_index || self.sections != previous_sections;
        if let Some(id) = self.sections.get(index).cloned() {
            if layout_changed || previous.as_ref() != Some(&id) {
                self.outbox.push_change(SectionChange {
                    id,
                    index,
                    cause: ChangeCause::Registration,
                });
            }
        }
        &self.sections
    }

    /// Starts an animated navigation to `index`.
    ///
    /// Works whether or not input snapping is enabled. The change is queued
    /// when the animation settles.
    pub fn navigate_to(&mut self, index: usize, now: HostTime) -> Result<(), Rejection> {
        let duration = self.config.navigator.duration;
        self.start(index, now, InputSource::Api, duration, None)
    }

    /// Like [`navigate_to`](Self::navigate_to), running `completion` with the
    /// settled change. A rejected request drops `completion` unrun.
    pub fn navigate_to_with(
        &mut self,
        index: usize,
        now: HostTime,
        completion: impl FnOnce(&SectionChange) + 'static,
    ) -> Result<(), Rejection> {
        let duration = self.config.navigator.duration;
        let completion: Completion = Box::new(completion);
        self.start(index, now, InputSource::Api, duration, Some(completion))
    }

    /// Starts an animated navigation to the active section with id `id`.
    pub fn navigate_to_id(&mut self, id: &str, now: HostTime) -> Result<(), Rejection> {
        match self.sections.position(id) {
            Some(index) => self.navigate_to(index, now),
            None => {
                let rejection = Rejection::UnknownSection;
                Err(self.reject(now, InputSource::Api, rejection))
            }
        }
    }

    /// Scrolls to `index` without animating and settles immediately.
    pub fn jump_to(&mut self, index: usize, now: HostTime) -> Result<(), Rejection> {
        self.start(index, now, InputSource::Api, Duration::ZERO, None)
    }

    /// Handles a wheel event with a pixel `delta_y`.
    pub fn on_wheel(&mut self, delta_y: f64, now: HostTime) -> Disposition {
        if let Some(disposition) = self.admit(now, InputSource::Wheel) {
            return disposition;
        }
        if !delta_y.is_finite() || delta_y == 0.0 {
            return Disposition::Allow;
        }
        match self.wheel.feed(delta_y, now, &self.config.input) {
            Some(direction) => self.apply(Intent::Step(direction), InputSource::Wheel, now),
            None => Disposition::Prevent,
        }
    }

    /// Records the start of a touch gesture at vertical position `y`.
    pub fn on_touch_start(&mut self, y: f64, now: HostTime) {
        self.expire(now);
        if self.state.snap_enabled && !self.sections.is_empty() {
            self.swipe.begin(y, now);
        } else {
            self.swipe.cancel();
        }
    }

    /// Handles a touch move. Native scrolling is suppressed while a swipe is
    /// being tracked or an animation is in flight.
    pub fn on_touch_move(&mut self, now: HostTime) -> Disposition {
        self.expire(now);
        let snapping = self.state.snap_enabled && !self.sections.is_empty();
        if snapping && (self.swipe.is_tracking() || self.is_animating()) {
            Disposition::Prevent
        } else {
            Disposition::Allow
        }
    }

    /// Ends a touch gesture at vertical position `y`.
    ///
    /// Gestures that do not qualify as swipes are allowed through so taps
    /// still click.
    pub fn on_touch_end(&mut self, y: f64, now: HostTime) -> Disposition {
        if let Some(disposition) = self.admit(now, InputSource::Touch) {
            self.swipe.cancel();
            return disposition;
        }
        match self.swipe.end(y, now, &self.config.input) {
            Some(direction) => self.apply(Intent::Step(direction), InputSource::Touch, now),
            None => Disposition::Allow,
        }
    }

    /// Abandons the current touch gesture.
    pub fn on_touch_cancel(&mut self) {
        self.swipe.cancel();
    }

    /// Handles a navigation key.
    pub fn on_key(&mut self, key: NavKey, now: HostTime) -> Disposition {
        if let Some(disposition) = self.admit(now, InputSource::Key) {
            return disposition;
        }
        self.apply(key.intent(), InputSource::Key, now)
    }

    /// Samples the position observer after a scroll.
    ///
    /// Returns the new active index when an observer report was applied.
    /// Reports are ignored while animating and when the entered section is
    /// already active.
    pub fn on_scroll(&mut self, now: HostTime) -> Option<usize> {
        self.expire(now);
        let entered = self.sample_observer()?;
        let applied = !self.is_animating();
        self.tracer().observer(&ObserverEvent {
            at: now,
            index: entered,
            applied,
        });
        if !applied || entered == self.state.active_index {
            return None;
        }
        let id = self.sections.get(entered)?.clone();
        self.state.active_index = entered;
        self.outbox.push_change(SectionChange {
            id,
            index: entered,
            cause: ChangeCause::Observer,
        });
        Some(entered)
    }

    /// Advances the in-flight animation to `now`.
    ///
    /// Returns `true` while another frame is needed.
    pub fn tick(&mut self, now: HostTime) -> bool {
        let (deadline, sample) = match &self.phase {
            Phase::Animating(flight) => (flight.deadline, flight.animation.sample(now)),
            Phase::Idle => return false,
        };
        if now >= deadline {
            self.land(now, true);
            return false;
        }
        if sample.finished {
            self.land(now, false);
            return false;
        }
        self.viewport.scroll_to(sample.y);
        true
    }

    /// Force-completes the in-flight navigation if its deadline has passed.
    ///
    /// Returns `true` if a navigation was completed.
    pub fn expire(&mut self, now: HostTime) -> bool {
        let expired = matches!(&self.phase, Phase::Animating(flight) if now >= flight.deadline);
        if expired {
            self.land(now, true);
        }
        expired
    }

    /// Takes the queued changes and completions.
    pub fn take_outbox(&mut self) -> Outbox {
        core::mem::take(&mut self.outbox)
    }

    fn tracer(&mut self) -> Tracer<'_> {
        match self.sink.as_deref_mut() {
            Some(sink) => Tracer::new(sink),
            None => Tracer::none(),
        }
    }

    fn reject(&mut self, now: HostTime, source: InputSource, reason: Rejection) -> Rejection {
        self.tracer().rejected(&RejectedEvent {
            at: now,
            source,
            reason,
        });
        reason
    }

    /// Gate shared by the input handlers. `Some` short-circuits the handler.
    fn admit(&mut self, now: HostTime, source: InputSource) -> Option<Disposition> {
        self.expire(now);
        if !self.state.snap_enabled {
            self.reject(now, source, Rejection::SnapDisabled);
            return Some(Disposition::Allow);
        }
        if self.sections.is_empty() {
            self.reject(now, source, Rejection::NoSections);
            return Some(Disposition::Allow);
        }
        if self.is_animating() {
            self.wheel.reset();
            self.reject(now, source, Rejection::Animating);
            return Some(Disposition::Prevent);
        }
        None
    }

    fn apply(&mut self, intent: Intent, source: InputSource, now: HostTime) -> Disposition {
        self.tracer().intent(&IntentEvent {
            at: now,
            source,
            intent,
        });
        let len = self.sections.len();
        let target = match intent {
            Intent::Step(direction) => match direction.apply(self.state.active_index, len) {
                Ok(index) => index,
                Err(index) => {
                    self.reject(now, source, Rejection::OutOfRange { index, len });
                    return Disposition::Prevent;
                }
            },
            Intent::First => 0,
            Intent::Last => len.saturating_sub(1),
        };
        let duration = self.config.navigator.duration;
        match self.start(target, now, source, duration, None) {
            Err(Rejection::MissingTarget { .. }) => Disposition::Allow,
            Ok(()) | Err(_) => Disposition::Prevent,
        }
    }

    fn start(
        &mut self,
        index: usize,
        now: HostTime,
        source: InputSource,
        duration: Duration,
        completion: Option<Completion>,
    ) -> Result<(), Rejection> {
        self.expire(now);
        let len = self.sections.len();
        if len == 0 {
            return Err(self.reject(now, source, Rejection::NoSections));
        }
        if self.is_animating() {
            return Err(self.reject(now, source, Rejection::Animating));
        }
        let Some(id) = self.sections.get(index).cloned() else {
            let index = i64::try_from(index).unwrap_or(i64::MAX);
            let rejection = Rejection::OutOfRange { index, len };
            return Err(self.reject(now, source, rejection));
        };
        let Some(bounds) = self.viewport.section_bounds(&id) else {
            return Err(self.reject(now, source, Rejection::MissingTarget { index }));
        };

        let offset = navigator::scroll_offset(
            self.viewport.overlay_height(),
            self.viewport.size(),
            &self.config.navigator,
        );
        let from = self.viewport.scroll_y();
        let to = navigator::target_scroll_y(from, bounds.y0, offset, self.viewport.max_scroll_y());
        let from_index = self.state.active_index;
        self.tracer().navigation_start(&NavigationStartEvent {
            at: now,
            from_index,
            target_index: index,
            from_y: from,
            to_y: to,
            duration,
        });

        self.wheel.reset();
        self.swipe.cancel();
        let grace = self.config.navigator.timeout_grace;
        let flight = Flight {
            target: index,
            animation: ScrollAnimation::new(from, to, now, duration),
            deadline: now.saturating_add(duration.saturating_add(grace)),
            completion,
        };
        if duration.is_zero() {
            self.viewport.scroll_to(to);
            self.settle(flight, now, false);
        } else {
            self.phase = Phase::Animating(flight);
        }
        Ok(())
    }

    /// Writes the final position of the in-flight navigation and settles it.
    fn land(&mut self, now: HostTime, timed_out: bool) {
        if let Phase::Animating(flight) = core::mem::take(&mut self.phase) {
            self.viewport.scroll_to(flight.animation.to());
            self.settle(flight, now, timed_out);
        }
    }

    fn settle(&mut self, flight: Flight, now: HostTime, timed_out: bool) {
        let Flight {
            target, completion, ..
        } = flight;
        self.state.active_index = target;
        self.wheel.reset();
        // Absorb band entries caused by the programmatic scroll so the
        // trailing scroll event does not report them.
        let _ = self.sample_observer();
        self.tracer().navigation_settled(&NavigationSettledEvent {
            at: now,
            index: target,
            timed_out,
        });
        if let Some(id) = self.sections.get(target).cloned() {
            self.outbox.push_change(SectionChange {
                id,
                index: target,
                cause: ChangeCause::Navigation,
            });
            if let Some(completion) = completion {
                self.outbox.push_completion(completion);
            }
        }
    }

    fn sample_observer(&mut self) -> Option<usize> {
        let bounds: Vec<Option<Rect>> = self
            .sections
            .iter()
            .map(|id| self.viewport.section_bounds(id))
            .collect();
        let scroll_y = self.viewport.scroll_y();
        let height = self.viewport.size().height;
        self.observer
            .observe(scroll_y, height, &bounds, &self.config.observer)
    }
}

/// Lets a shared controller back a [`SnapOverride`](crate::SnapOverride).
///
/// A controller that is already mutably borrowed cannot be read: the override
/// then skips its restore, and the write is ignored.
impl<V: Viewport> SnapToggle for RefCell<SnapController<V>> {
    fn snap_enabled(&self) -> bool {
        self.try_snap_enabled().unwrap_or(true)
    }

    fn try_snap_enabled(&self) -> Option<bool> {
        self.try_borrow()
            .ok()
            .map(|controller| controller.snap_enabled())
    }

    fn set_snap_enabled(&self, enabled: bool) {
        if let Ok(mut controller) = self.try_borrow_mut() {
            controller.set_snap_enabled(enabled);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SnapOverride;
    use crate::input::Direction;
    use crate::store::Listeners;
    use crate::testing::FakeViewport;
    use alloc::rc::Rc;
    use alloc::string::{String, ToString};
    use alloc::vec;
    use core::cell::Cell;

    const IDS: [&str; 3] = ["hero", "services", "contact"];
    const NONE: [&str; 0] = [];
    /// 80 px overlay + 16 px base + min(800 * 2 %, 32 px).
    const OFFSET: f64 = 112.0;

    fn at(ms: u64) -> HostTime {
        HostTime::from_millis(ms)
    }

    fn page() -> SnapController<FakeViewport> {
        let mut controller =
            SnapController::new(FakeViewport::stacked(&IDS, 800.0), SnapConfig::web());
        controller.register_sections(IDS, NONE);
        drop(controller.take_outbox());
        controller
    }

    /// Ticks at 60 Hz from `from_ms` until the animation settles and returns
    /// the settle time.
    fn run_until_settled(controller: &mut SnapController<FakeViewport>, from_ms: u64) -> u64 {
        let mut ms = from_ms;
        while controller.tick(at(ms)) {
            ms += 16;
            assert!(ms < from_ms + 5_000, "animation never settled");
        }
        ms
    }

    fn drained(controller: &mut SnapController<FakeViewport>) -> Vec<(String, usize)> {
        controller
            .take_outbox()
            .into_changes()
            .into_iter()
            .map(|change| (change.id.to_string(), change.index))
            .collect()
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn navigate_to_every_index_settles_once() {
        for target in 0..IDS.len() {
            let mut controller = page();
            controller.navigate_to(target, at(1_000)).unwrap();
            assert!(controller.is_animating());
            run_until_settled(&mut controller, 1_016);
            assert_eq!(controller.active_index(), target);
            assert_eq!(
                drained(&mut controller),
                vec![(IDS[target].to_string(), target)]
            );
        }
    }

    #[test]
    fn out_of_range_navigation_is_a_no_op() {
        let mut controller = page();
        assert_eq!(
            controller.navigate_to(3, at(1_000)),
            Err(Rejection::OutOfRange { index: 3, len: 3 })
        );
        assert_eq!(
            controller.navigate_to(usize::MAX, at(1_000)),
            Err(Rejection::OutOfRange {
                index: i64::MAX,
                len: 3
            })
        );
        assert!(!controller.is_animating());
        assert_eq!(controller.active_index(), 0);
        assert!(controller.take_outbox().is_empty());
        assert!(controller.viewport().writes.is_empty());
    }

    #[test]
    fn second_request_while_animating_is_dropped() {
        let mut controller = page();
        controller.navigate_to(1, at(1_000)).unwrap();
        controller.tick(at(1_200));
        assert_eq!(
            controller.navigate_to(2, at(1_250)),
            Err(Rejection::Animating)
        );
        assert_eq!(controller.target_index(), Some(1));
        run_until_settled(&mut controller, 1_300);
        assert_eq!(controller.active_index(), 1);
        assert_eq!(drained(&mut controller), vec![("services".to_string(), 1)]);
    }

    #[test]
    fn animation_lands_under_the_overlay() {
        let mut controller = page();
        controller.navigate_to(1, at(1_000)).unwrap();
        assert!(controller.tick(at(1_350)));
        let mid = controller.viewport().scroll_y;
        assert!(
            mid > 0.0 && mid < 800.0 - OFFSET,
            "mid-flight position {mid}"
        );
        assert!(!controller.tick(at(1_700)));
        assert!(close(controller.viewport().scroll_y, 800.0 - OFFSET));
    }

    #[test]
    fn small_wheel_deltas_collapse_into_one_navigation() {
        let mut controller = page();
        for i in 0..30 {
            let disposition = controller.on_wheel(5.0, at(1_000 + i * 4));
            assert_eq!(disposition, Disposition::Prevent);
        }
        assert_eq!(controller.target_index(), Some(1));
        run_until_settled(&mut controller, 1_200);
        assert_eq!(drained(&mut controller), vec![("services".to_string(), 1)]);
    }

    #[test]
    fn wheel_while_animating_is_ignored_and_prevented() {
        let mut controller = page();
        assert_eq!(controller.on_wheel(120.0, at(1_000)), Disposition::Prevent);
        assert_eq!(controller.on_wheel(120.0, at(1_100)), Disposition::Prevent);
        assert_eq!(controller.target_index(), Some(1));
        run_until_settled(&mut controller, 1_116);
        assert_eq!(controller.active_index(), 1);
    }

    #[test]
    fn unqualified_swipes_produce_nothing() {
        let mut controller = page();

        controller.on_touch_start(600.0, at(1_000));
        assert_eq!(controller.on_touch_move(at(1_010)), Disposition::Prevent);
        assert_eq!(
            controller.on_touch_end(580.0, at(1_050)),
            Disposition::Allow
        );

        controller.on_touch_start(600.0, at(2_000));
        assert_eq!(
            controller.on_touch_end(300.0, at(2_900)),
            Disposition::Allow
        );

        assert!(!controller.is_animating());
        assert!(controller.take_outbox().is_empty());
    }

    #[test]
    fn qualifying_swipe_navigates() {
        let mut controller = page();
        controller.on_touch_start(600.0, at(1_000));
        assert_eq!(
            controller.on_touch_end(400.0, at(1_150)),
            Disposition::Prevent
        );
        assert_eq!(controller.target_index(), Some(1));

        run_until_settled(&mut controller, 1_166);
        controller.on_touch_start(300.0, at(3_000));
        assert_eq!(
            controller.on_touch_end(500.0, at(3_100)),
            Disposition::Prevent
        );
        assert_eq!(controller.target_index(), Some(0));
    }

    #[test]
    fn touch_cancel_drops_the_gesture() {
        let mut controller = page();
        controller.on_touch_start(600.0, at(1_000));
        controller.on_touch_cancel();
        assert_eq!(controller.on_touch_move(at(1_010)), Disposition::Allow);
        assert_eq!(
            controller.on_touch_end(300.0, at(1_050)),
            Disposition::Allow
        );
        assert!(!controller.is_animating());
    }

    #[test]
    fn steps_past_either_end_are_prevented_no_ops() {
        let mut controller = page();
        assert_eq!(
            controller.on_key(NavKey::ArrowUp, at(1_000)),
            Disposition::Prevent
        );
        assert!(!controller.is_animating());

        controller.jump_to(2, at(1_100)).unwrap();
        drop(controller.take_outbox());
        assert_eq!(
            controller.on_key(NavKey::ArrowDown, at(1_200)),
            Disposition::Prevent
        );
        assert!(!controller.is_animating());
        assert_eq!(controller.active_index(), 2);
        assert!(controller.take_outbox().is_empty());
    }

    #[test]
    fn disabled_snapping_passes_input_through() {
        let mut controller = page();
        assert!(controller.set_snap_enabled(false));

        assert_eq!(controller.on_wheel(200.0, at(1_000)), Disposition::Allow);
        assert_eq!(
            controller.on_key(NavKey::PageDown, at(1_100)),
            Disposition::Allow
        );
        controller.on_touch_start(600.0, at(1_200));
        assert_eq!(controller.on_touch_move(at(1_210)), Disposition::Allow);
        assert_eq!(
            controller.on_touch_end(100.0, at(1_250)),
            Disposition::Allow
        );
        assert!(!controller.is_animating());
        assert!(controller.take_outbox().is_empty());

        assert!(!controller.set_snap_enabled(true));
        assert_eq!(
            controller.on_key(NavKey::PageDown, at(2_000)),
            Disposition::Prevent
        );
        assert_eq!(controller.target_index(), Some(1));
    }

    #[test]
    fn navigate_to_works_while_snapping_is_disabled() {
        let mut controller = page();
        controller.set_snap_enabled(false);
        controller.navigate_to(2, at(1_000)).unwrap();
        run_until_settled(&mut controller, 1_016);
        assert_eq!(controller.active_index(), 2);
    }

    #[test]
    fn hero_services_contact_scenario() {
        let mut controller = page();

        assert_eq!(controller.on_wheel(100.0, at(1_000)), Disposition::Prevent);
        let t = run_until_settled(&mut controller, 1_016);
        assert_eq!(drained(&mut controller), vec![("services".to_string(), 1)]);

        assert_eq!(
            controller.on_key(NavKey::Home, at(t + 100)),
            Disposition::Prevent
        );
        let t = run_until_settled(&mut controller, t + 116);
        assert_eq!(drained(&mut controller), vec![("hero".to_string(), 0)]);

        controller.navigate_to(2, at(t + 100)).unwrap();
        let t = run_until_settled(&mut controller, t + 116);
        assert_eq!(drained(&mut controller), vec![("contact".to_string(), 2)]);

        assert_eq!(
            controller.on_key(NavKey::ArrowDown, at(t + 100)),
            Disposition::Prevent
        );
        assert!(!controller.is_animating());
        assert!(controller.take_outbox().is_empty());
        assert_eq!(
            controller.active_id().map(SectionId::as_str),
            Some("contact")
        );
    }

    #[test]
    fn end_key_jumps_to_the_last_section() {
        let mut controller = page();
        assert_eq!(
            controller.on_key(NavKey::End, at(1_000)),
            Disposition::Prevent
        );
        assert_eq!(controller.target_index(), Some(2));
    }

    #[test]
    fn lost_frames_are_recovered_by_the_deadline() {
        let mut controller = page();
        controller.navigate_to(1, at(1_000)).unwrap();
        assert_eq!(controller.deadline(), Some(at(2_000)));
        assert!(!controller.expire(at(1_999)));
        assert!(controller.is_animating());

        // No ticks ever arrive; the next scroll event is past the deadline.
        controller.on_scroll(at(2_000));
        assert!(!controller.is_animating());
        assert_eq!(controller.active_index(), 1);
        assert!(close(controller.viewport().scroll_y, 800.0 - OFFSET));
        assert_eq!(drained(&mut controller), vec![("services".to_string(), 1)]);
    }

    #[test]
    fn observer_updates_state_while_idle() {
        let mut controller = page();
        controller.viewport_mut().user_scroll(0.0);
        assert_eq!(
            controller.on_scroll(at(1_000)),
            None,
            "hero is already active"
        );

        controller.viewport_mut().user_scroll(800.0);
        assert_eq!(controller.on_scroll(at(1_100)), Some(1));
        assert_eq!(drained(&mut controller), vec![("services".to_string(), 1)]);

        controller.viewport_mut().user_scroll(0.0);
        assert_eq!(controller.on_scroll(at(1_200)), Some(0));
        assert_eq!(controller.active_index(), 0);
    }

    #[test]
    fn observer_is_suppressed_while_animating() {
        let mut controller = page();
        controller.on_scroll(at(900));
        controller.navigate_to(2, at(1_000)).unwrap();
        let mut ms = 1_016;
        while controller.tick(at(ms)) {
            // Intermediate positions pass through `services`.
            assert_eq!(controller.on_scroll(at(ms)), None);
            assert_eq!(controller.active_index(), 0);
            ms += 16;
        }
        assert_eq!(
            controller.on_scroll(at(ms + 16)),
            None,
            "settle absorbed the final entry"
        );
        assert_eq!(drained(&mut controller), vec![("contact".to_string(), 2)]);
    }

    #[test]
    fn jump_settles_immediately() {
        let mut controller = page();
        controller.jump_to(1, at(1_000)).unwrap();
        assert!(!controller.is_animating());
        assert_eq!(controller.viewport().writes.len(), 1);
        assert!(close(controller.viewport().scroll_y, 800.0 - OFFSET));
        assert_eq!(drained(&mut controller), vec![("services".to_string(), 1)]);
    }

    #[test]
    fn missing_target_is_soft() {
        let mut controller = page();
        controller.viewport_mut().unmount("services");
        assert_eq!(
            controller.navigate_to(1, at(1_000)),
            Err(Rejection::MissingTarget { index: 1 })
        );
        assert_eq!(
            controller.on_key(NavKey::ArrowDown, at(1_100)),
            Disposition::Allow
        );
        assert!(!controller.is_animating());
        assert_eq!(controller.active_index(), 0);
    }

    #[test]
    fn navigate_by_id() {
        let mut controller = page();
        controller.navigate_to_id("contact", at(1_000)).unwrap();
        assert_eq!(controller.target_index(), Some(2));
        run_until_settled(&mut controller, 1_016);
        assert_eq!(
            controller.navigate_to_id("pricing", at(3_000)),
            Err(Rejection::UnknownSection)
        );
    }

    #[test]
    fn completion_runs_after_listeners() {
        let mut controller = page();
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut listeners = Listeners::new();
        let l = Rc::clone(&log);
        listeners.subscribe(move |c| l.borrow_mut().push(("listener", c.index)));

        let l = Rc::clone(&log);
        controller
            .navigate_to_with(2, at(1_000), move |c: &SectionChange| {
                l.borrow_mut().push(("done", c.index));
            })
            .unwrap();
        run_until_settled(&mut controller, 1_016);
        controller.take_outbox().deliver(&mut listeners);

        assert_eq!(*log.borrow(), [("listener", 2), ("done", 2)]);
    }

    #[test]
    fn rejected_request_drops_its_completion() {
        let mut controller = page();
        let ran = Rc::new(Cell::new(false));
        let r = Rc::clone(&ran);
        let completion = move |_: &SectionChange| r.set(true);
        let result = controller.navigate_to_with(7, at(1_000), completion);
        assert!(result.is_err());
        controller.take_outbox().deliver(&mut Listeners::new());
        assert!(!ran.get());
    }

    #[test]
    fn empty_registry_passes_everything_through() {
        let viewport = FakeViewport::stacked(&[], 800.0);
        let mut controller = SnapController::new(viewport, SnapConfig::web());
        assert_eq!(controller.active_index(), 0);
        assert_eq!(controller.active_id(), None);
        assert_eq!(controller.on_wheel(500.0, at(1_000)), Disposition::Allow);
        assert_eq!(
            controller.on_key(NavKey::End, at(1_100)),
            Disposition::Allow
        );
        assert_eq!(
            controller.navigate_to(0, at(1_200)),
            Err(Rejection::NoSections)
        );
        assert!(controller.markers().is_empty());
    }

    #[test]
    fn registration_excludes_and_keeps_the_active_id() {
        let mut controller =
            SnapController::new(FakeViewport::stacked(&IDS, 800.0), SnapConfig::web());
        let active = controller.register_sections(IDS, ["services"]).clone();
        assert_eq!(active.as_slice(), ["hero", "contact"]);
        assert_eq!(drained(&mut controller), vec![("hero".to_string(), 0)]);

        controller.jump_to(1, at(1_000)).unwrap();
        drop(controller.take_outbox());

        controller.register_sections(IDS, NONE);
        assert_eq!(controller.active_index(), 2, "contact keeps its identity");
        assert_eq!(
            drained(&mut controller),
            vec![("contact".to_string(), 2)],
            "same id at a new index is still a change"
        );

        controller.register_sections(["hero", "services"], NONE);
        assert_eq!(controller.active_index(), 1, "removed id clamps into range");
        assert_eq!(drained(&mut controller), vec![("services".to_string(), 1)]);
    }

    #[test]
    fn identical_registration_is_silent() {
        let mut controller = page();
        controller.jump_to(1, at(1_000)).unwrap();
        drop(controller.take_outbox());
        controller.register_sections(IDS, NONE);
        assert!(
            controller.take_outbox().is_empty(),
            "same list and index, nothing to report"
        );
    }

    #[test]
    fn list_growth_around_the_active_id_notifies_and_updates_markers() {
        let mut controller =
            SnapController::new(FakeViewport::stacked(&IDS, 800.0), SnapConfig::web());
        controller.register_sections(IDS, ["contact"]);
        drop(controller.take_outbox());
        assert_eq!(controller.markers().len(), 2, "contact excluded");

        // hero stays at index 0; only the list grows.
        controller.register_sections(IDS, NONE);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut listeners = Listeners::new();
        let sink = Rc::clone(&seen);
        listeners.subscribe(move |change: &SectionChange| {
            sink.borrow_mut().push((change.index, change.cause));
        });
        controller.take_outbox().deliver(&mut listeners);
        assert_eq!(
            *seen.borrow(),
            [(0, ChangeCause::Registration)],
            "listeners hear about the new list"
        );
        assert_eq!(
            controller
                .markers()
                .iter()
                .map(|m| m.active)
                .collect::<Vec<_>>(),
            [true, false, false],
            "one marker per section after the change"
        );
    }

    #[test]
    fn registration_abandons_an_in_flight_navigation() {
        let mut controller = page();
        controller.navigate_to(2, at(1_000)).unwrap();
        controller.register_sections(["hero", "services"], NONE);
        assert!(!controller.is_animating());
        assert!(!controller.tick(at(1_100)));
        let changes = controller.take_outbox().into_changes();
        assert_eq!(changes.len(), 1, "only the shrunk list is reported");
        assert_eq!(changes[0].cause, ChangeCause::Registration);
        assert_eq!(changes[0].index, 0, "the flight never settled");
    }

    #[test]
    fn markers_follow_the_active_section() {
        let mut controller = page();
        controller.jump_to(1, at(1_000)).unwrap();
        let markers = controller.markers();
        assert_eq!(markers.len(), 3);
        assert_eq!(
            markers.iter().map(|m| m.active).collect::<Vec<_>>(),
            [false, true, false]
        );
        assert_eq!(markers[2].id, "contact");
    }

    #[test]
    fn snap_override_restores_previous_value() {
        let shared = RefCell::new(page());
        {
            let _guard = SnapOverride::new(&shared, false);
            assert!(!shared.borrow().snap_enabled());
            let d = shared.borrow_mut().on_key(NavKey::ArrowDown, at(1_000));
            assert_eq!(d, Disposition::Allow);
        }
        assert!(shared.borrow().snap_enabled());
        let d = shared.borrow_mut().on_key(NavKey::ArrowDown, at(1_100));
        assert_eq!(d, Disposition::Prevent);
    }

    #[test]
    fn override_on_a_busy_controller_keeps_disabled_snapping() {
        let shared = RefCell::new(page());
        shared.borrow_mut().set_snap_enabled(false);
        let guard = {
            let _busy = shared.borrow_mut();
            SnapOverride::new(&shared, true)
        };
        assert_eq!(guard.previous(), None, "borrowed controller is unreadable");
        drop(guard);
        assert!(
            !shared.borrow().snap_enabled(),
            "dropping the guard must not switch snapping back on"
        );
    }

    #[test]
    fn step_direction_matches_wheel_sign() {
        let mut controller = page();
        controller.jump_to(1, at(500)).unwrap();
        assert_eq!(controller.on_wheel(-80.0, at(1_000)), Disposition::Prevent);
        assert_eq!(
            controller.target_index(),
            Direction::Previous.apply(1, 3).ok()
        );
    }

    #[cfg(feature = "trace")]
    #[test]
    fn trace_sink_sees_the_navigation() {
        #[derive(Clone, Default)]
        struct Recording(Rc<RefCell<Vec<&'static str>>>);

        impl TraceSink for Recording {
            fn on_intent(&mut self, _: &IntentEvent) {
                self.0.borrow_mut().push("intent");
            }
            fn on_rejected(&mut self, _: &RejectedEvent) {
                self.0.borrow_mut().push("rejected");
            }
            fn on_navigation_start(&mut self, _: &NavigationStartEvent) {
                self.0.borrow_mut().push("start");
            }
            fn on_navigation_settled(&mut self, _: &NavigationSettledEvent) {
                self.0.borrow_mut().push("settled");
            }
        }

        let recording = Recording::default();
        let mut controller = page().with_trace_sink(recording.clone());
        let _ = controller.on_key(NavKey::ArrowDown, at(1_000));
        let _ = controller.on_key(NavKey::ArrowDown, at(1_100));
        run_until_settled(&mut controller, 1_116);

        assert_eq!(
            *recording.0.borrow(),
            ["intent", "start", "rejected", "settled"]
        );
    }

    #[cfg(feature = "trace")]
    #[test]
    fn navigation_start_reports_where_it_left_from() {
        #[derive(Clone, Default)]
        struct Starts(Rc<RefCell<Vec<(usize, usize)>>>);

        impl TraceSink for Starts {
            fn on_navigation_start(&mut self, e: &NavigationStartEvent) {
                self.0.borrow_mut().push((e.from_index, e.target_index));
            }
        }

        let starts = Starts::default();
        let mut controller = page().with_trace_sink(starts.clone());
        assert_eq!(controller.navigate_to(2, at(1_000)), Ok(()));
        let settled = run_until_settled(&mut controller, 1_016);
        assert_eq!(controller.navigate_to(1, at(settled + 100)), Ok(()));
        assert_eq!(
            *starts.0.borrow(),
            [(0, 2), (2, 1)],
            "from is the index active before the request"
        );
    }
}
