// Copyright 2026 the Snapline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sink fan-out.

use snapline_core::trace::{
    IntentEvent, NavigationSettledEvent, NavigationStartEvent, ObserverEvent, RejectedEvent,
    SectionsRegisteredEvent, TraceSink,
};

/// Forwards every event to `A`, then to `B`.
///
/// A controller holds a single sink; nest `Tee`s to feed more than two.
#[derive(Clone, Debug, Default)]
pub struct Tee<A, B>(pub A, pub B);

impl<A: TraceSink, B: TraceSink> TraceSink for Tee<A, B> {
    fn on_intent(&mut self, e: &IntentEvent) {
        self.0.on_intent(e);
        self.1.on_intent(e);
    }

    fn on_rejected(&mut self, e: &RejectedEvent) {
        self.0.on_rejected(e);
        self.1.on_rejected(e);
    }

    fn on_navigation_start(&mut self, e: &NavigationStartEvent) {
        self.0.on_navigation_start(e);
        self.1.on_navigation_start(e);
    }

    fn on_navigation_settled(&mut self, e: &NavigationSettledEvent) {
        self.0.on_navigation_settled(e);
        self.1.on_navigation_settled(e);
    }

    fn on_observer(&mut self, e: &ObserverEvent) {
        self.0.on_observer(e);
        self.1.on_observer(e);
    }

    fn on_snap_toggle(&mut self, enabled: bool) {
        self.0.on_snap_toggle(enabled);
        self.1.on_snap_toggle(enabled);
    }

    fn on_sections_registered(&mut self, e: &SectionsRegisteredEvent) {
        self.0.on_sections_registered(e);
        self.1.on_sections_registered(e);
    }
}
