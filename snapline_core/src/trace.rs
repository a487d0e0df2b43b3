// Copyright 2026 the Snapline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Instrumentation for the snap controller.
//!
//! This module provides a [`TraceSink`] trait with one method per controller
//! event. All method bodies default to no-ops, so implementing only the
//! events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing (zero overhead). When
//! **on**, each method performs a single `Option` branch before dispatching.
//!
//! # Crate features
//!
//! - `trace`: enables the `Tracer` method bodies (one branch per call).

use crate::error::Rejection;
use crate::input::{InputSource, Intent};
use crate::time::{Duration, HostTime};

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when an input debouncer produces an intent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IntentEvent {
    /// When the causing input arrived.
    pub at: HostTime,
    /// Which input produced it.
    pub source: InputSource,
    /// The intent.
    pub intent: Intent,
}

/// Emitted when an intent or navigation request is dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RejectedEvent {
    /// When the request arrived.
    pub at: HostTime,
    /// Which input or API made the request.
    pub source: InputSource,
    /// Why it was dropped.
    pub reason: Rejection,
}

/// Emitted when a snap navigation begins.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NavigationStartEvent {
    /// When the navigation started.
    pub at: HostTime,
    /// Active index before the navigation.
    pub from_index: usize,
    /// Target index.
    pub target_index: usize,
    /// Scroll position at the start.
    pub from_y: f64,
    /// Destination scroll position.
    pub to_y: f64,
    /// Animation length; zero for instant jumps.
    pub duration: Duration,
}

/// Emitted when a snap navigation settles and the token is cleared.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavigationSettledEvent {
    /// When the navigation settled.
    pub at: HostTime,
    /// The now-active index.
    pub index: usize,
    /// `true` if the safety timeout force-completed the animation.
    pub timed_out: bool,
}

/// Emitted when the position observer reports a newly entered section.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ObserverEvent {
    /// When the scroll sample was taken.
    pub at: HostTime,
    /// The entered section.
    pub index: usize,
    /// `false` if the report was suppressed by an in-flight animation.
    pub applied: bool,
}

/// Emitted when the section list is replaced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SectionsRegisteredEvent {
    /// Number of registered ids, including excluded ones.
    pub registered: usize,
    /// Number of active (navigable) sections.
    pub active: usize,
    /// The active index after recomputation.
    pub active_index: usize,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the snap controller.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called when input becomes an intent.
    fn on_intent(&mut self, e: &IntentEvent) {
        _ = e;
    }

    /// Called when an intent or request is dropped.
    fn on_rejected(&mut self, e: &RejectedEvent) {
        _ = e;
    }

    /// Called when a navigation starts.
    fn on_navigation_start(&mut self, e: &NavigationStartEvent) {
        _ = e;
    }

    /// Called when a navigation settles.
    fn on_navigation_settled(&mut self, e: &NavigationSettledEvent) {
        _ = e;
    }

    /// Called when the observer reports an entered section.
    fn on_observer(&mut self, e: &ObserverEvent) {
        _ = e;
    }

    /// Called when snapping is switched on or off.
    fn on_snap_toggle(&mut self, enabled: bool) {
        _ = enabled;
    }

    /// Called when the section list is replaced.
    fn on_sections_registered(&mut self, e: &SectionsRegisteredEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer over an optional sink.
    #[inline]
    #[must_use]
    pub fn from_option(sink: Option<&'a mut dyn TraceSink>) -> Self {
        match sink {
            Some(sink) => Self::new(sink),
            None => Self::none(),
        }
    }

    /// Emits an [`IntentEvent`].
    #[inline]
    pub fn intent(&mut self, e: &IntentEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_intent(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`RejectedEvent`].
    #[inline]
    pub fn rejected(&mut self, e: &RejectedEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_rejected(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`NavigationStartEvent`].
    #[inline]
    pub fn navigation_start(&mut self, e: &NavigationStartEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_navigation_start(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`NavigationSettledEvent`].
    #[inline]
    pub fn navigation_settled(&mut self, e: &NavigationSettledEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_navigation_settled(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits an [`ObserverEvent`].
    #[inline]
    pub fn observer(&mut self, e: &ObserverEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_observer(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a snap toggle.
    #[inline]
    pub fn snap_toggle(&mut self, enabled: bool) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_snap_toggle(enabled);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = enabled;
        }
    }

    /// Emits a [`SectionsRegisteredEvent`].
    #[inline]
    pub fn sections_registered(&mut self, e: &SectionsRegisteredEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_sections_registered(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Direction;

    fn sample_intent() -> IntentEvent {
        IntentEvent {
            at: HostTime::from_millis(10),
            source: InputSource::Wheel,
            intent: Intent::Step(Direction::Next),
        }
    }

    #[test]
    fn noop_sink_compiles() {
        let mut sink = NoopSink;
        sink.on_intent(&sample_intent());
        sink.on_snap_toggle(false);
        sink.on_navigation_settled(&NavigationSettledEvent {
            at: HostTime(0),
            index: 0,
            timed_out: false,
        });
    }

    #[test]
    fn tracer_none_does_nothing() {
        let mut tracer = Tracer::none();
        tracer.intent(&sample_intent());
        tracer.snap_toggle(true);
    }

    #[cfg(feature = "trace")]
    #[test]
    fn tracer_dispatches_to_sink() {
        use alloc::vec::Vec;

        struct RecordingSink {
            intents: Vec<InputSource>,
            toggles: Vec<bool>,
        }
        impl TraceSink for RecordingSink {
            fn on_intent(&mut self, e: &IntentEvent) {
                self.intents.push(e.source);
            }
            fn on_snap_toggle(&mut self, enabled: bool) {
                self.toggles.push(enabled);
            }
        }

        let mut sink = RecordingSink {
            intents: Vec::new(),
            toggles: Vec::new(),
        };
        let mut tracer = Tracer::new(&mut sink);
        tracer.intent(&sample_intent());
        tracer.snap_toggle(false);
        // Access sink after tracer is dropped.
        drop(tracer);
        assert_eq!(sink.intents, &[InputSource::Wheel]);
        assert_eq!(sink.toggles, &[false]);
    }
}
