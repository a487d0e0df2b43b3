// Copyright 2026 the Snapline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pretty-printing, journaling, and trace export for snapline diagnostics.
//!
//! This crate provides [`TraceSink`](snapline_core::trace::TraceSink)
//! implementations for development and post-mortem analysis:
//!
//! - [`pretty::PrettyPrintSink`]: human-readable one-line-per-event output.
//! - [`journal::JournalSink`]: a shared in-memory event log.
//! - [`chrome::export`]: writes Chrome Trace Event Format JSON from a journal.
//! - [`tracing_sink::TracingSink`]: forwards events to [`tracing`].
//! - [`tee::Tee`]: fans one event stream out to two sinks.
//!
//! [`sim::StackedPage`] is an in-memory [`Viewport`](snapline_core::backend::Viewport)
//! for driving a controller without a browser.

pub mod chrome;
pub mod journal;
pub mod pretty;
pub mod sim;
pub mod tee;
pub mod tracing_sink;
