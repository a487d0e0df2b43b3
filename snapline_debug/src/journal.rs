// Copyright 2026 the Snapline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory event log.
//!
//! [`JournalSink`] stores every event it receives. Clones share the same log,
//! so one clone can be handed to the controller while another is kept for
//! inspection or export via [`chrome::export`](crate::chrome::export).

use std::cell::RefCell;
use std::rc::Rc;

use snapline_core::time::HostTime;
use snapline_core::trace::{
    IntentEvent, NavigationSettledEvent, NavigationStartEvent, ObserverEvent, RejectedEvent,
    SectionsRegisteredEvent, TraceSink,
};

/// A recorded event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum JournalEntry {
    /// See [`TraceSink::on_intent`].
    Intent(IntentEvent),
    /// See [`TraceSink::on_rejected`].
    Rejected(RejectedEvent),
    /// See [`TraceSink::on_navigation_start`].
    NavigationStart(NavigationStartEvent),
    /// See [`TraceSink::on_navigation_settled`].
    NavigationSettled(NavigationSettledEvent),
    /// See [`TraceSink::on_observer`].
    Observer(ObserverEvent),
    /// See [`TraceSink::on_snap_toggle`].
    SnapToggle(bool),
    /// See [`TraceSink::on_sections_registered`].
    SectionsRegistered(SectionsRegisteredEvent),
}

impl JournalEntry {
    /// When the event happened, if it carries a timestamp.
    #[must_use]
    pub fn at(&self) -> Option<HostTime> {
        match self {
            Self::Intent(e) => Some(e.at),
            Self::Rejected(e) => Some(e.at),
            Self::NavigationStart(e) => Some(e.at),
            Self::NavigationSettled(e) => Some(e.at),
            Self::Observer(e) => Some(e.at),
            Self::SnapToggle(_) | Self::SectionsRegistered(_) => None,
        }
    }
}

/// A [`TraceSink`] that appends every event to a shared log.
#[derive(Clone, Debug, Default)]
pub struct JournalSink {
    entries: Rc<RefCell<Vec<JournalEntry>>>,
}

impl JournalSink {
    /// Creates an empty journal.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies out the recorded entries.
    #[must_use]
    pub fn entries(&self) -> Vec<JournalEntry> {
        self.entries.borrow().clone()
    }

    /// Number of recorded entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Returns `true` if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Discards all recorded entries.
    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }

    /// Indices of completed navigations, in order.
    #[must_use]
    pub fn settled_indices(&self) -> Vec<usize> {
        self.entries
            .borrow()
            .iter()
            .filter_map(|entry| match entry {
                JournalEntry::NavigationSettled(e) => Some(e.index),
                _ => None,
            })
            .collect()
    }

    fn push(&self, entry: JournalEntry) {
        self.entries.borrow_mut().push(entry);
    }
}

impl TraceSink for JournalSink {
    fn on_intent(&mut self, e: &IntentEvent) {
        self.push(JournalEntry::Intent(*e));
    }

    fn on_rejected(&mut self, e: &RejectedEvent) {
        self.push(JournalEntry::Rejected(*e));
    }

    fn on_navigation_start(&mut self, e: &NavigationStartEvent) {
        self.push(JournalEntry::NavigationStart(*e));
    }

    fn on_navigation_settled(&mut self, e: &NavigationSettledEvent) {
        self.push(JournalEntry::NavigationSettled(*e));
    }

    fn on_observer(&mut self, e: &ObserverEvent) {
        self.push(JournalEntry::Observer(*e));
    }

    fn on_snap_toggle(&mut self, enabled: bool) {
        self.push(JournalEntry::SnapToggle(enabled));
    }

    fn on_sections_registered(&mut self, e: &SectionsRegisteredEvent) {
        self.push(JournalEntry::SectionsRegistered(*e));
    }
}
