// Copyright 2026 the Snapline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! [`TraceSink`] that writes to the browser console.

use alloc::format;
use alloc::string::String;

use wasm_bindgen::JsValue;

use snapline_core::trace::{
    IntentEvent, NavigationSettledEvent, NavigationStartEvent, ObserverEvent, RejectedEvent,
    SectionsRegisteredEvent, TraceSink,
};

/// Forwards controller events to `console.debug`, one line each.
///
/// Events only arrive with the `trace` feature enabled.
#[derive(Clone, Debug)]
pub struct ConsoleSink {
    prefix: String,
}

impl ConsoleSink {
    /// Creates a sink that prefixes every line with `[snapline]`.
    #[must_use]
    pub fn new() -> Self {
        Self::with_prefix("[snapline]")
    }

    /// Creates a sink with a custom line prefix.
    #[must_use]
    pub fn with_prefix(prefix: &str) -> Self {
        Self {
            prefix: String::from(prefix),
        }
    }

    fn emit(&self, line: &str) {
        web_sys::console::debug_1(&JsValue::from_str(&format!("{} {line}", self.prefix)));
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl TraceSink for ConsoleSink {
    fn on_intent(&mut self, e: &IntentEvent) {
        self.emit(&format!("intent {:?} from {:?}", e.intent, e.source));
    }

    fn on_rejected(&mut self, e: &RejectedEvent) {
        self.emit(&format!("rejected {:?}: {}", e.source, e.reason));
    }

    fn on_navigation_start(&mut self, e: &NavigationStartEvent) {
        self.emit(&format!(
            "navigate {} -> {} (y {:.0} -> {:.0}, {:.0}ms)",
            e.from_index,
            e.target_index,
            e.from_y,
            e.to_y,
            e.duration.as_millis_f64()
        ));
    }

    fn on_navigation_settled(&mut self, e: &NavigationSettledEvent) {
        let how = if e.timed_out { " (timed out)" } else { "" };
        self.emit(&format!("settled at {}{how}", e.index));
    }

    fn on_observer(&mut self, e: &ObserverEvent) {
        let how = if e.applied { "" } else { " (suppressed)" };
        self.emit(&format!("observed {}{how}", e.index));
    }

    fn on_snap_toggle(&mut self, enabled: bool) {
        self.emit(if enabled { "snap on" } else { "snap off" });
    }

    fn on_sections_registered(&mut self, e: &SectionsRegisteredEvent) {
        self.emit(&format!(
            "sections {}/{} active, index {}",
            e.active, e.registered, e.active_index
        ));
    }
}
