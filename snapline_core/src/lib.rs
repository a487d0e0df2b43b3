// Copyright 2026 the Snapline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deterministic section-snap controller.
//!
//! `snapline_core` turns a scrolling page into a sequence of discrete
//! *sections* that the viewport snaps to. It is `no_std` compatible (with
//! `alloc`) and never touches a real DOM: the host supplies time stamps and a
//! [`Viewport`](backend::Viewport) implementation, and applies the
//! [`Disposition`](controller::Disposition) each input handler returns.
//!
//! # Architecture
//!
//! ```text
//!   wheel / touch / key ──► input::{WheelGate, SwipeTracker, NavKey}
//!                                   │ Intent
//!                                   ▼
//!   navigate_to(i) ───────► SnapController ──► navigator::ScrollAnimation
//!                            {Idle, Animating}          │ tick(now)
//!                                   ▲                   ▼
//!   scroll ──► observer::PositionObserver        Viewport::scroll_to
//!                                   │
//!                                   ▼
//!                        store::Outbox ──► store::Listeners
//! ```
//!
//! **[`section`]**: Ordered section ids and the active (non-excluded) list
//! that defines the navigable index space.
//!
//! **[`observer`]**: Intersection-band tracking that reports which section
//! was most recently scrolled into view.
//!
//! **[`input`]**: Wheel accumulation, swipe detection, and key mapping that
//! collapse raw input into directional intents.
//!
//! **[`navigator`]**: Overlay-aware target offsets and the eased scroll
//! animation.
//!
//! **[`store`]**: Navigation state, change listeners, the outbox used to
//! deliver settled changes, and the scoped snap override guard.
//!
//! **[`controller`]**: The `{Idle, Animating}` state machine that ties the
//! pieces together and owns the animation token.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types, with
//! a zero-overhead [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod backend;
pub mod config;
pub mod controller;
pub mod error;
pub mod input;
pub mod navigator;
pub mod observer;
pub mod section;
pub mod store;
pub mod time;
pub mod trace;

#[cfg(test)]
mod testing;

pub use config::SnapConfig;
pub use controller::{Disposition, Marker, SnapController};
pub use error::Rejection;
pub use section::{ActiveSections, SectionId};
pub use store::{SectionChange, SnapOverride, SnapToggle};
