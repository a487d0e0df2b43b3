// Copyright 2026 the Snapline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A simulated page for driving a controller off-browser.

use kurbo::{Rect, Size};

use snapline_core::backend::Viewport;
use snapline_core::section::SectionId;

#[derive(Clone, Debug)]
struct Block {
    id: String,
    top: f64,
    height: f64,
}

/// Sections laid out top to bottom in a fixed-size viewport.
///
/// Scroll writes from the controller are applied immediately, the way
/// `ScrollBehavior::Instant` behaves in a browser, and counted so callers can
/// tell programmatic scrolling from [`user_scroll`](Self::user_scroll).
#[derive(Clone, Debug)]
pub struct StackedPage {
    blocks: Vec<Block>,
    size: Size,
    overlay: Option<f64>,
    scroll_y: f64,
    writes: usize,
}

impl StackedPage {
    /// Creates an empty page with the given viewport size and no overlay.
    #[must_use]
    pub fn new(size: Size) -> Self {
        Self {
            blocks: Vec::new(),
            size,
            overlay: None,
            scroll_y: 0.0,
            writes: 0,
        }
    }

    /// Appends a section of `height` below the existing ones.
    #[must_use]
    pub fn section(mut self, id: &str, height: f64) -> Self {
        let top = self.document_height();
        self.blocks.push(Block {
            id: String::from(id),
            top,
            height,
        });
        self
    }

    /// Sets the fixed overlay height.
    #[must_use]
    pub fn with_overlay(mut self, height: f64) -> Self {
        self.overlay = Some(height);
        self
    }

    /// Scrolls as a user would. The position is clamped to the document.
    pub fn user_scroll(&mut self, y: f64) {
        self.scroll_y = y.clamp(0.0, self.max_scroll_y());
    }

    /// Number of programmatic scroll writes so far.
    #[must_use]
    pub fn writes(&self) -> usize {
        self.writes
    }

    /// Document-space top edge of `id`.
    #[must_use]
    pub fn top_of(&self, id: &str) -> Option<f64> {
        self.blocks.iter().find(|b| b.id == id).map(|b| b.top)
    }

    fn document_height(&self) -> f64 {
        self.blocks.last().map_or(0.0, |b| b.top + b.height)
    }
}

impl Viewport for StackedPage {
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
        let block = self.blocks.iter().find(|b| id == b.id.as_str())?;
        let y0 = block.top - self.scroll_y;
        Some(Rect::new(0.0, y0, self.size.width, y0 + block.height))
    }

    fn overlay_height(&self) -> Option<f64> {
        self.overlay
    }

    fn scroll_to(&mut self, y: f64) {
        self.scroll_y = y.clamp(0.0, self.max_scroll_y());
        self.writes += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> StackedPage {
        StackedPage::new(Size::new(1280.0, 800.0))
            .section("hero", 800.0)
            .section("services", 1200.0)
            .section("contact", 600.0)
            .with_overlay(80.0)
    }

    #[test]
    fn sections_stack_in_order() {
        let page = page();
        assert_eq!(page.top_of("services"), Some(800.0), "after hero");
        assert_eq!(page.top_of("contact"), Some(2000.0), "after services");
        assert_eq!(page.max_scroll_y(), 1800.0, "document minus viewport");
    }

    #[test]
    fn bounds_follow_the_scroll_position() {
        let mut page = page();
        page.user_scroll(500.0);
        let bounds = page
            .section_bounds(&SectionId::new("services"))
            .expect("services is rendered");
        assert_eq!(bounds.y0, 300.0, "800 - 500");
        assert_eq!(page.writes(), 0, "user scrolls are not writes");
    }

    #[test]
    fn writes_are_clamped_and_counted() {
        let mut page = page();
        page.scroll_to(5000.0);
        assert_eq!(page.scroll_y(), 1800.0, "clamped to the bottom");
        assert_eq!(page.writes(), 1, "one write");
    }
}
