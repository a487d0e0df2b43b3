// Copyright 2026 the Snapline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr). Timestamps
//! are printed in milliseconds.

use std::io::Write;

use snapline_core::input::{Direction, InputSource, Intent};
use snapline_core::trace::{
    IntentEvent, NavigationSettledEvent, NavigationStartEvent, ObserverEvent, RejectedEvent,
    SectionsRegisteredEvent, TraceSink,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Returns the destination.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn source_name(source: InputSource) -> &'static str {
    match source {
        InputSource::Wheel => "wheel",
        InputSource::Touch => "touch",
        InputSource::Key => "key",
        InputSource::Api => "api",
    }
}

fn intent_name(intent: Intent) -> &'static str {
    match intent {
        Intent::Step(Direction::Previous) => "previous",
        Intent::Step(Direction::Next) => "next",
        Intent::First => "first",
        Intent::Last => "last",
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_intent(&mut self, e: &IntentEvent) {
        let _ = writeln!(
            self.writer,
            "[intent] at={:.1}ms source={} intent={}",
            e.at.as_millis_f64(),
            source_name(e.source),
            intent_name(e.intent),
        );
    }

    fn on_rejected(&mut self, e: &RejectedEvent) {
        let _ = writeln!(
            self.writer,
            "[reject] at={:.1}ms source={} reason=\"{}\"",
            e.at.as_millis_f64(),
            source_name(e.source),
            e.reason,
        );
    }

    fn on_navigation_start(&mut self, e: &NavigationStartEvent) {
        let _ = writeln!(
            self.writer,
            "[navigate] at={:.1}ms {}->{} y={:.1}->{:.1} duration={:.1}ms",
            e.at.as_millis_f64(),
            e.from_index,
            e.target_index,
            e.from_y,
            e.to_y,
            e.duration.as_millis_f64(),
        );
    }

    fn on_navigation_settled(&mut self, e: &NavigationSettledEvent) {
        let _ = writeln!(
            self.writer,
            "[settled] at={:.1}ms index={}{}",
            e.at.as_millis_f64(),
            e.index,
            if e.timed_out { " timed_out" } else { "" },
        );
    }

    fn on_observer(&mut self, e: &ObserverEvent) {
        let _ = writeln!(
            self.writer,
            "[observe] at={:.1}ms index={}{}",
            e.at.as_millis_f64(),
            e.index,
            if e.applied { "" } else { " suppressed" },
        );
    }

    fn on_snap_toggle(&mut self, enabled: bool) {
        let _ = writeln!(
            self.writer,
            "[snap] {}",
            if enabled { "enabled" } else { "disabled" }
        );
    }

    fn on_sections_registered(&mut self, e: &SectionsRegisteredEvent) {
        let _ = writeln!(
            self.writer,
            "[sections] registered={} active={} index={}",
            e.registered, e.active, e.active_index,
        );
    }
}
