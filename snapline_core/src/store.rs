// Copyright 2026 the Snapline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Navigation state, change listeners, and scoped snap toggling.
//!
//! The controller never calls listeners while it is mutably borrowed.
//! Settled changes and one-shot completions are queued in an [`Outbox`]; the
//! host drains it with
//! [`SnapController::take_outbox`](crate::SnapController::take_outbox) once
//! the controller borrow is released and hands it to [`Listeners`]. A
//! listener may therefore call straight back into the page handle.
//!
//! # Scoped snap override
//!
//! Content that needs ordinary free scrolling switches snapping off for as
//! long as it is mounted. [`SnapOverride`] captures the previous value and
//! restores it on drop, so nested overrides unwind correctly:
//!
//! ```rust,ignore
//! let guard = SnapOverride::new(handle.clone(), false);
//! // ... free scrolling ...
//! drop(guard); // restores whatever was set before
//! ```

use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::section::SectionId;

/// The externally observable navigation state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NavigationState {
    /// Index of the active section. Always `< len` for a non-empty list and
    /// `0` for an empty one.
    pub active_index: usize,
    /// Whether wheel, touch, and keyboard input snap between sections.
    pub snap_enabled: bool,
}

impl Default for NavigationState {
    fn default() -> Self {
        Self {
            active_index: 0,
            snap_enabled: true,
        }
    }
}

/// What caused a [`SectionChange`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChangeCause {
    /// A snap navigation settled (animated, instant, or timed out).
    Navigation,
    /// The position observer detected a new section while idle.
    Observer,
    /// The section list was replaced and the active id changed.
    Registration,
}

/// A settled transition of the active section.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SectionChange {
    /// Id of the now-active section.
    pub id: SectionId,
    /// Index of the now-active section.
    pub index: usize,
    /// What caused the change.
    pub cause: ChangeCause,
}

/// One-shot callback invoked when a specific navigation settles.
pub type Completion = Box<dyn FnOnce(&SectionChange)>;

/// Handle returned by [`Listeners::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Registered `onSectionChange` callbacks.
#[derive(Default)]
pub struct Listeners {
    next_id: u64,
    entries: Vec<(ListenerId, Box<dyn FnMut(&SectionChange)>)>,
}

impl core::fmt::Debug for Listeners {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Listeners")
            .field("next_id", &self.next_id)
            .field("len", &self.entries.len())
            .finish()
    }
}

impl Listeners {
    /// Creates an empty listener set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a callback for every settled section change.
    pub fn subscribe(&mut self, listener: impl FnMut(&SectionChange) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, Box::new(listener)));
        id
    }

    /// Removes a callback. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(candidate, _)| *candidate != id);
        self.entries.len() != before
    }

    /// Number of registered callbacks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no callbacks are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Calls every listener with `change`, in subscription order.
    pub fn notify(&mut self, change: &SectionChange) {
        for (_, listener) in &mut self.entries {
            listener(change);
        }
    }
}

/// Changes and completions waiting to be delivered.
#[derive(Default)]
pub struct Outbox {
    changes: Vec<SectionChange>,
    completions: Vec<(Completion, usize)>,
}

impl core::fmt::Debug for Outbox {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Outbox")
            .field("changes", &self.changes)
            .field("completions", &self.completions.len())
            .finish()
    }
}

impl Outbox {
    /// Returns `true` if nothing is waiting.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty() && self.completions.is_empty()
    }

    /// The queued changes, oldest first.
    #[must_use]
    pub fn changes(&self) -> &[SectionChange] {
        &self.changes
    }

    /// Consumes the outbox and returns the queued changes, dropping any
    /// completions.
    #[must_use]
    pub fn into_changes(self) -> Vec<SectionChange> {
        self.changes
    }

    pub(crate) fn push_change(&mut self, change: SectionChange) {
        self.changes.push(change);
    }

    /// Queues `completion` to run with the most recently pushed change.
    pub(crate) fn push_completion(&mut self, completion: Completion) {
        if let Some(last) = self.changes.len().checked_sub(1) {
            self.completions.push((completion, last));
        }
    }

    /// Delivers every change to `listeners`, then runs each completion with
    /// the change it belongs to.
    pub fn deliver(self, listeners: &mut Listeners) {
        for change in &self.changes {
            listeners.notify(change);
        }
        for (completion, index) in self.completions {
            completion(&self.changes[index]);
        }
    }
}

/// Something whose snapping can be switched on and off.
pub trait SnapToggle {
    /// Current value.
    fn snap_enabled(&self) -> bool;

    /// Current value, or `None` if it cannot be read right now.
    ///
    /// [`SnapOverride`] restores nothing when this returns `None`.
    fn try_snap_enabled(&self) -> Option<bool> {
        Some(self.snap_enabled())
    }

    /// Sets the value.
    fn set_snap_enabled(&self, enabled: bool);
}

impl<T: SnapToggle + ?Sized> SnapToggle for &T {
    fn snap_enabled(&self) -> bool {
        (**self).snap_enabled()
    }

    fn try_snap_enabled(&self) -> Option<bool> {
        (**self).try_snap_enabled()
    }

    fn set_snap_enabled(&self, enabled: bool) {
        (**self).set_snap_enabled(enabled);
    }
}

/// Scoped [`SnapToggle`] override that restores the previous value on drop.
#[derive(Debug)]
pub struct SnapOverride<T: SnapToggle> {
    target: T,
    previous: Option<bool>,
}

impl<T: SnapToggle> SnapOverride<T> {
    /// Sets snapping to `enabled` until the returned guard is dropped.
    #[must_use = "dropping the guard immediately restores the previous value"]
    pub fn new(target: T, enabled: bool) -> Self {
        let previous = target.try_snap_enabled();
        target.set_snap_enabled(enabled);
        Self { target, previous }
    }

    /// The value that will be restored, or `None` if it could not be read
    /// when the guard was created.
    #[must_use]
    pub fn previous(&self) -> Option<bool> {
        self.previous
    }
}

impl<T: SnapToggle> Drop for SnapOverride<T> {
    fn drop(&mut self) {
        if let Some(previous) = self.previous {
            self.target.set_snap_enabled(previous);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use core::cell::{Cell, RefCell};

    fn change(id: &str, index: usize) -> SectionChange {
        SectionChange {
            id: SectionId::new(id),
            index,
            cause: ChangeCause::Navigation,
        }
    }

    #[test]
    fn listeners_receive_changes_in_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut listeners = Listeners::new();
        let sink = Rc::clone(&seen);
        listeners.subscribe(move |c| sink.borrow_mut().push(c.index));

        let mut outbox = Outbox::default();
        outbox.push_change(change("a", 0));
        outbox.push_change(change("b", 1));
        outbox.deliver(&mut listeners);

        assert_eq!(*seen.borrow(), [0, 1]);
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let count = Rc::new(Cell::new(0));
        let mut listeners = Listeners::new();
        let c = Rc::clone(&count);
        let id = listeners.subscribe(move |_| c.set(c.get() + 1));
        assert!(listeners.unsubscribe(id));
        assert!(!listeners.unsubscribe(id), "second removal is a no-op");
        listeners.notify(&change("a", 0));
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn completion_runs_after_listeners_with_its_change() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut listeners = Listeners::new();
        let l = Rc::clone(&log);
        listeners.subscribe(move |c| l.borrow_mut().push(("listener", c.index)));

        let mut outbox = Outbox::default();
        outbox.push_change(change("a", 0));
        let l = Rc::clone(&log);
        let done = move |c: &SectionChange| l.borrow_mut().push(("done", c.index));
        outbox.push_completion(Box::new(done));
        outbox.push_change(change("b", 1));
        outbox.deliver(&mut listeners);

        assert_eq!(
            *log.borrow(),
            [("listener", 0), ("listener", 1), ("done", 0)]
        );
    }

    #[test]
    fn completion_without_change_is_dropped() {
        let mut outbox = Outbox::default();
        outbox.push_completion(Box::new(|_: &SectionChange| panic!("must not run")));
        assert!(outbox.is_empty());
    }

    struct Flag(Cell<bool>);

    impl SnapToggle for Flag {
        fn snap_enabled(&self) -> bool {
            self.0.get()
        }

        fn set_snap_enabled(&self, enabled: bool) {
            self.0.set(enabled);
        }
    }

    #[test]
    fn override_restores_previous_value() {
        let flag = Flag(Cell::new(true));
        {
            let outer = SnapOverride::new(&flag, false);
            assert_eq!(outer.previous(), Some(true), "read before the write");
            assert!(!flag.snap_enabled());
            {
                let _inner = SnapOverride::new(&flag, false);
                assert!(!flag.snap_enabled());
            }
            assert!(!flag.snap_enabled(), "inner guard restores outer's value");
        }
        assert!(flag.snap_enabled());
    }

    #[test]
    fn override_does_not_hardcode_true() {
        let flag = Flag(Cell::new(false));
        drop(SnapOverride::new(&flag, true));
        assert!(!flag.snap_enabled());
    }

    /// Reads as unavailable, like a shared value that is already borrowed.
    struct Busy(Cell<Option<bool>>);

    impl SnapToggle for Busy {
        fn snap_enabled(&self) -> bool {
            self.0.get().unwrap_or(true)
        }

        fn try_snap_enabled(&self) -> Option<bool> {
            None
        }

        fn set_snap_enabled(&self, enabled: bool) {
            self.0.set(Some(enabled));
        }
    }

    #[test]
    fn unreadable_value_is_not_restored() {
        let busy = Busy(Cell::new(None));
        let guard = SnapOverride::new(&busy, false);
        assert_eq!(guard.previous(), None, "nothing was read");
        drop(guard);
        assert_eq!(busy.0.get(), Some(false), "no guessed value written back");
    }
}
