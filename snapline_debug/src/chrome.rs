// Copyright 2026 the Snapline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`export`] turns [`JournalEntry`] records into [Chrome Trace Event
//! Format][format] JSON. Navigations become duration slices (`B`/`E` pairs);
//! everything else is an instant event.
//!
//! [format]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};

use serde_json::{Value, json};

use crate::journal::JournalEntry;

/// Converts entries to a JSON array of trace event objects.
///
/// Entries without a timestamp are placed at the time of the entry before
/// them (or zero).
#[must_use]
pub fn to_json(entries: &[JournalEntry]) -> Value {
    let mut events: Vec<Value> = Vec::with_capacity(entries.len());
    let mut last_ts = 0_u64;

    for entry in entries {
        let ts = entry.at().map_or(last_ts, |at| at.micros());
        last_ts = ts;
        let event = match entry {
            JournalEntry::Intent(e) => instant(
                "Intent",
                "Input",
                ts,
                json!({
                    "source": format!("{:?}", e.source),
                    "intent": format!("{:?}", e.intent),
                }),
            ),
            JournalEntry::Rejected(e) => instant(
                "Rejected",
                "Input",
                ts,
                json!({
                    "source": format!("{:?}", e.source),
                    "reason": e.reason.to_string(),
                }),
            ),
            JournalEntry::NavigationStart(e) => json!({
                "ph": "B",
                "name": "Navigate",
                "cat": "Navigation",
                "ts": ts,
                "pid": 0,
                "tid": 0,
                "args": {
                    "from_index": e.from_index,
                    "target_index": e.target_index,
                    "from_y": e.from_y,
                    "to_y": e.to_y,
                    "duration_ms": e.duration.as_millis_f64(),
                }
            }),
            JournalEntry::NavigationSettled(e) => json!({
                "ph": "E",
                "name": "Navigate",
                "cat": "Navigation",
                "ts": ts,
                "pid": 0,
                "tid": 0,
                "args": {
                    "index": e.index,
                    "timed_out": e.timed_out,
                }
            }),
            JournalEntry::Observer(e) => instant(
                "Observer",
                "Observer",
                ts,
                json!({
                    "index": e.index,
                    "applied": e.applied,
                }),
            ),
            JournalEntry::SnapToggle(enabled) => {
                instant("SnapToggle", "Config", ts, json!({ "enabled": enabled }))
            }
            JournalEntry::SectionsRegistered(e) => instant(
                "SectionsRegistered",
                "Config",
                ts,
                json!({
                    "registered": e.registered,
                    "active": e.active,
                    "active_index": e.active_index,
                }),
            ),
        };
        events.push(event);
    }

    Value::Array(events)
}

/// Writes entries as Chrome Trace Event Format JSON.
///
/// The output is a complete JSON array, suitable for loading into
/// `chrome://tracing` or [Perfetto](https://ui.perfetto.dev/).
pub fn export(entries: &[JournalEntry], writer: &mut dyn Write) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, &to_json(entries))?;
    writer.write_all(b"\n")
}

fn instant(name: &str, cat: &str, ts: u64, args: Value) -> Value {
    json!({
        "ph": "i",
        "name": name,
        "cat": cat,
        "ts": ts,
        "pid": 0,
        "tid": 0,
        "s": "g",
        "args": args,
    })
}
