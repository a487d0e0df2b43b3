// Copyright 2026 the Snapline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reasons a navigation request or intent was a no-op.
//!
//! None of these are failures the page should surface. Hosts typically drop
//! the error; it exists so callers, tests, and trace sinks can tell *why*
//! nothing happened.

/// Why a navigation request or directional intent had no effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, thiserror::Error)]
pub enum Rejection {
    /// Wheel, touch, and keyboard snapping is switched off.
    #[error("section snapping is disabled")]
    SnapDisabled,
    /// The active section list is empty.
    #[error("no sections are registered")]
    NoSections,
    /// A snap animation is already in flight; the request was dropped.
    #[error("a snap animation is already in flight")]
    Animating,
    /// The requested index lies outside the active section list.
    #[error("section index {index} is outside 0..{len}")]
    OutOfRange {
        /// The requested index. A step before the first section reports
        /// `-1`.
        index: i64,
        /// Number of active sections.
        len: usize,
    },
    /// No active section carries the requested id.
    #[error("no active section has the requested id")]
    UnknownSection,
    /// The page hosting the controller has been unmounted.
    #[error("the page is no longer mounted")]
    Unmounted,
    /// The target section is not present in the document.
    #[error("section {index} is not present in the document")]
    MissingTarget {
        /// Index of the missing section.
        index: usize,
    },
}
