// Copyright 2026 the Snapline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory page used by the controller tests.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Rect, Size};

use crate::backend::Viewport;
use crate::section::SectionId;

/// A page of vertically stacked sections with a fixed overlay.
#[derive(Clone, Debug)]
pub(crate) struct FakeViewport {
    /// `(id, document top, height)` per rendered section.
    pub(crate) sections: Vec<(String, f64, f64)>,
    pub(crate) size: Size,
    pub(crate) overlay: Option<f64>,
    pub(crate) scroll_y: f64,
    /// Every value passed to `scroll_to`, in order.
    pub(crate) writes: Vec<f64>,
}

impl FakeViewport {
    /// Sections of `height` each, stacked from the document top, in a
    /// 1280×800 viewport with an 80 px overlay.
    pub(crate) fn stacked(ids: &[&str], height: f64) -> Self {
        let sections = ids
            .iter()
            .enumerate()
            .map(|(i, id)| (String::from(*id), i as f64 * height, height))
            .collect();
        Self {
            sections,
            size: Size::new(1280.0, 800.0),
            overlay: Some(80.0),
            scroll_y: 0.0,
            writes: Vec::new(),
        }
    }

    /// Removes a section from the document.
    pub(crate) fn unmount(&mut self, id: &str) {
        self.sections.retain(|(candidate, _, _)| candidate != id);
    }

    /// Moves the scroll position as a user would, without recording a write.
    pub(crate) fn user_scroll(&mut self, y: f64) {
        self.scroll_y = y.clamp(0.0, self.max_scroll_y());
    }

    fn document_height(&self) -> f64 {
        self.sections
            .iter()
            .map(|(_, top, height)| top + height)
            .fold(0.0, f64::max)
    }
}

impl Viewport for FakeViewport {
    fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    fn max_scroll_y(&self) -> f64 {
        (self.document_height() - self.size.height).max(0.0)
    }

    fn size(&self) -> Size {
        self.size
    }

    fn section_bounds(&self, id: &SectionId) -> Option<Rect> {
        self.sections
            .iter()
            .find(|(candidate, _, _)| id == candidate.as_str())
            .map(|(_, top, height)| {
                let y0 = top - self.scroll_y;
                Rect::new(0.0, y0, self.size.width, y0 + height)
            })
    }

    fn overlay_height(&self) -> Option<f64> {
        self.overlay
    }

    fn scroll_to(&mut self, y: f64) {
        self.scroll_y = y;
        self.writes.push(y);
    }
}
