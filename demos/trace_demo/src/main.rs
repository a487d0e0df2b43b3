// Copyright 2026 the Snapline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Simulated snap session that exercises the tracing and diagnostics pipeline.
//!
//! Drives a controller over an in-memory landing page with wheel, keyboard,
//! touch, and free-scroll input at 60 Hz, printing every event with a
//! [`PrettyPrintSink`](snapline_debug::pretty::PrettyPrintSink) and
//! journaling it with a [`JournalSink`](snapline_debug::journal::JournalSink).
//! The journal is exported as Chrome trace JSON to `snapline-trace.json`.
//!
//! Set `RUST_LOG=snapline=trace` to also see the events through `tracing`.

use std::fs::File;
use std::io::{BufWriter, Write as _};

use kurbo::Size;
use snapline_core::input::NavKey;
use snapline_core::store::Listeners;
use snapline_core::time::HostTime;
use snapline_core::{SnapConfig, SnapController};
use snapline_debug::journal::JournalSink;
use snapline_debug::pretty::PrettyPrintSink;
use snapline_debug::sim::StackedPage;
use snapline_debug::tee::Tee;
use snapline_debug::tracing_sink::{self, TracingSink};

/// One 60 Hz frame, in milliseconds.
const FRAME_MS: u64 = 16;
const OUTPUT: &str = "snapline-trace.json";

struct Session {
    controller: SnapController<StackedPage>,
    listeners: Listeners,
    now_ms: u64,
}

impl Session {
    fn now(&self) -> HostTime {
        HostTime::from_millis(self.now_ms)
    }

    /// Runs frames until the controller is idle, then lets `idle_ms` pass.
    fn run(&mut self, idle_ms: u64) {
        loop {
            self.now_ms += FRAME_MS;
            let now = self.now();
            let more = self.controller.tick(now);
            let _ = self.controller.on_scroll(now);
            self.deliver();
            if !more {
                break;
            }
        }
        self.now_ms += idle_ms;
    }

    fn deliver(&mut self) {
        self.controller.take_outbox().deliver(&mut self.listeners);
    }
}

fn main() -> std::io::Result<()> {
    if let Err(err) = tracing_sink::init("snapline=debug") {
        eprintln!("tracing disabled: {err}");
    }

    let page = StackedPage::new(Size::new(1280.0, 800.0))
        .section("hero", 800.0)
        .section("services", 1400.0)
        .section("pricing", 900.0)
        .section("contact", 700.0)
        .with_overlay(80.0);

    let journal = JournalSink::new();
    let pretty = PrettyPrintSink::new(Box::new(std::io::stdout()));
    let sink = Tee(Tee(pretty, journal.clone()), TracingSink);
    let mut controller = SnapController::new(page, SnapConfig::web()).with_trace_sink(sink);
    controller.register_sections(["hero", "services", "pricing", "contact"], ["pricing"]);

    let mut listeners = Listeners::new();
    listeners.subscribe(|change| {
        println!("  -> active: {} ({:?})", change.id, change.cause);
    });
    let mut session = Session {
        controller,
        listeners,
        now_ms: 1_000,
    };
    session.deliver();

    // A trackpad flick: small deltas accumulate past the threshold once.
    for delta in [12.0, 18.0, 25.0, 30.0, 40.0] {
        let now = session.now();
        let _ = session.controller.on_wheel(delta, now);
        session.now_ms += 8;
    }
    session.run(900);

    // Keyboard to the end, then back to the top.
    let now = session.now();
    let _ = session.controller.on_key(NavKey::End, now);
    session.run(200);
    let now = session.now();
    let _ = session.controller.on_key(NavKey::Home, now);
    session.run(200);

    // Swipe: finger moves up 180 px in 120 ms.
    let now = session.now();
    session.controller.on_touch_start(600.0, now);
    session.now_ms += 120;
    let now = session.now();
    let _ = session.controller.on_touch_end(420.0, now);
    session.run(200);

    // Free scroll with snapping switched off; the observer still tracks it.
    session.controller.set_snap_enabled(false);
    let contact = session.controller.viewport().top_of("contact");
    let top = contact.unwrap_or(0.0);
    session.controller.viewport_mut().user_scroll(top - 100.0);
    let now = session.now();
    let _ = session.controller.on_scroll(now);
    session.deliver();
    session.controller.set_snap_enabled(true);

    let file = File::create(OUTPUT)?;
    let mut writer = BufWriter::new(file);
    snapline_debug::chrome::export(&journal.entries(), &mut writer)?;
    writer.flush()?;
    println!(
        "wrote {} events to {OUTPUT}; settled at {:?}",
        journal.len(),
        journal.settled_indices()
    );
    Ok(())
}
