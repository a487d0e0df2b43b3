// Copyright 2026 the Snapline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Section identifiers and the active section list.
//!
//! A [`SectionRegistry`] holds the page's ordered section ids plus the ids
//! excluded from snapping. [`SectionRegistry::active`] derives the
//! [`ActiveSections`]: the ordered, de-duplicated ids that define the valid
//! navigation index space `0..len`.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::fmt;

/// Identifier of a page section, matching the id its renderer tags the DOM
/// region with.
///
/// Cheap to clone; the string is shared.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SectionId(Rc<str>);

impl SectionId {
    /// Creates a section id.
    #[must_use]
    pub fn new(id: &str) -> Self {
        Self(Rc::from(id))
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SectionId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl AsRef<str> for SectionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for SectionId {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for SectionId {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

impl fmt::Debug for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SectionId({:?})", &*self.0)
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The page's static section configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SectionRegistry {
    ordered: Vec<SectionId>,
    excluded: Vec<SectionId>,
}

impl SectionRegistry {
    /// Creates a registry from ordered ids and the ids to exclude from
    /// snapping.
    pub fn new<I, E>(ordered: I, excluded: E) -> Self
    where
        I: IntoIterator,
        I::Item: Into<SectionId>,
        E: IntoIterator,
        E::Item: Into<SectionId>,
    {
        Self {
            ordered: ordered.into_iter().map(Into::into).collect(),
            excluded: excluded.into_iter().map(Into::into).collect(),
        }
    }

    /// Every registered id in page order, including excluded ones.
    #[must_use]
    pub fn ordered(&self) -> &[SectionId] {
        &self.ordered
    }

    /// Ids excluded from snapping.
    #[must_use]
    pub fn excluded(&self) -> &[SectionId] {
        &self.excluded
    }

    /// Computes the active section list.
    ///
    /// Excluded ids are dropped and repeated ids keep their first position.
    #[must_use]
    pub fn active(&self) -> ActiveSections {
        let mut ids: Vec<SectionId> = Vec::with_capacity(self.ordered.len());
        for id in &self.ordered {
            if self.excluded.contains(id) || ids.contains(id) {
                continue;
            }
            ids.push(id.clone());
        }
        ActiveSections { ids }
    }
}

/// The ordered sections currently eligible for snap navigation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ActiveSections {
    ids: Vec<SectionId>,
}

impl ActiveSections {
    /// Number of active sections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns `true` if no sections are active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Returns the id at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&SectionId> {
        self.ids.get(index)
    }

    /// Returns the index of `id`, if it is active.
    #[must_use]
    pub fn position(&self, id: &str) -> Option<usize> {
        self.ids
            .iter()
            .position(|candidate| candidate.as_str() == id)
    }

    /// Index of the last section, if any.
    #[must_use]
    pub fn last_index(&self) -> Option<usize> {
        self.ids.len().checked_sub(1)
    }

    /// The ids in order.
    #[must_use]
    pub fn as_slice(&self) -> &[SectionId] {
        &self.ids
    }

    /// Iterates the ids in order.
    pub fn iter(&self) -> core::slice::Iter<'_, SectionId> {
        self.ids.iter()
    }
}

impl<'a> IntoIterator for &'a ActiveSections {
    type Item = &'a SectionId;
    type IntoIter = core::slice::Iter<'a, SectionId>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.iter()
    }
}
