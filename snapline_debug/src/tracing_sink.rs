// Copyright 2026 the Snapline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bridge to the [`tracing`] ecosystem.
//!
//! [`TracingSink`] turns controller events into structured `tracing` events
//! under the `snapline` target. Observer samples are logged at `TRACE`,
//! everything else at `DEBUG`. [`init`] installs a `fmt` subscriber filtered
//! by `RUST_LOG`.

use snapline_core::trace::{
    IntentEvent, NavigationSettledEvent, NavigationStartEvent, ObserverEvent, RejectedEvent,
    SectionsRegisteredEvent, TraceSink,
};
use tracing::{debug, trace};
use tracing_subscriber::EnvFilter;

/// A [`TraceSink`] that emits [`tracing`] events.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl TraceSink for TracingSink {
    fn on_intent(&mut self, e: &IntentEvent) {
        debug!(
            target: "snapline",
            at_ms = e.at.as_millis_f64(),
            source = ?e.source,
            intent = ?e.intent,
            "intent"
        );
    }

    fn on_rejected(&mut self, e: &RejectedEvent) {
        debug!(
            target: "snapline",
            at_ms = e.at.as_millis_f64(),
            source = ?e.source,
            reason = %e.reason,
            "request dropped"
        );
    }

    fn on_navigation_start(&mut self, e: &NavigationStartEvent) {
        debug!(
            target: "snapline",
            at_ms = e.at.as_millis_f64(),
            from = e.from_index,
            to = e.target_index,
            from_y = e.from_y,
            to_y = e.to_y,
            duration_ms = e.duration.as_millis_f64(),
            "navigation started"
        );
    }

    fn on_navigation_settled(&mut self, e: &NavigationSettledEvent) {
        debug!(
            target: "snapline",
            at_ms = e.at.as_millis_f64(),
            index = e.index,
            timed_out = e.timed_out,
            "navigation settled"
        );
    }

    fn on_observer(&mut self, e: &ObserverEvent) {
        trace!(
            target: "snapline",
            at_ms = e.at.as_millis_f64(),
            index = e.index,
            applied = e.applied,
            "section entered"
        );
    }

    fn on_snap_toggle(&mut self, enabled: bool) {
        debug!(target: "snapline", enabled, "snap toggled");
    }

    fn on_sections_registered(&mut self, e: &SectionsRegisteredEvent) {
        debug!(
            target: "snapline",
            registered = e.registered,
            active = e.active,
            index = e.active_index,
            "sections registered"
        );
    }
}

/// Installs a global `fmt` subscriber.
///
/// `RUST_LOG` takes precedence; `default_directive` (for example
/// `"snapline=debug"`) applies when it is unset or invalid.
pub fn init(default_directive: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
}
