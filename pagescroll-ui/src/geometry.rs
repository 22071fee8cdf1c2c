//! Read-only page geometry.
//!
//! The page list belongs to the host: it measures and lays out the pages, and
//! the engine only ever reads where they ended up. [`GeometryProvider`] is
//! that read-only view. Offsets are measured within the container's total
//! scroll extent, and pages are laid out contiguously from top to bottom.
//!
//! [`PageStack`] is a provider built directly from page heights, which is
//! what a host without a real view tree (tests, the demo) uses. A host that
//! re-lays out pages while the engine holds the provider can share it as
//! `Arc<RwLock<G>>`.
//!
//! ```
//! use pagescroll_ui::{geometry::{GeometryProvider, PageStack}, Px};
//!
//! let pages = PageStack::from_heights([800, 1600, 800]);
//! assert_eq!(pages.count(), 3);
//! assert_eq!(pages.top_of(1), Some(Px(800)));
//! assert_eq!(pages.bottom_of(1), Some(Px(2400)));
//! assert_eq!(pages.top_of(3), None);
//! ```

use std::sync::Arc;

use parking_lot::RwLock;

use crate::px::Px;

/// Where one page sits in the scroll extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageBounds {
    /// Offset of the page's top edge.
    pub top: Px,
    /// Offset of the page's bottom edge.
    pub bottom: Px,
    /// Measured height of the page.
    pub height: Px,
}

impl PageBounds {
    /// The scroll offset that aligns the page's bottom edge with the bottom of
    /// a viewport of the given height.
    pub fn bottom_aligned(&self, viewport: Px) -> Px {
        self.bottom - viewport
    }

    /// Returns `true` if the whole page fits in the viewport at once.
    pub fn fits_in(&self, viewport: Px) -> bool {
        self.height <= viewport
    }
}

/// Read access to the geometry of the pages in the page list.
///
/// Lookups return `None` for indices the provider has no page for.
pub trait GeometryProvider {
    /// Number of pages.
    fn count(&self) -> usize;

    /// Measured height of page `index`.
    fn height_of(&self, index: usize) -> Option<Px>;

    /// Top edge of page `index` within the scroll extent.
    fn top_of(&self, index: usize) -> Option<Px>;

    /// Bottom edge of page `index` within the scroll extent.
    fn bottom_of(&self, index: usize) -> Option<Px>;

    /// All three measurements of page `index` at once.
    fn bounds_of(&self, index: usize) -> Option<PageBounds> {
        Some(PageBounds {
            top: self.top_of(index)?,
            bottom: self.bottom_of(index)?,
            height: self.height_of(index)?,
        })
    }
}

impl<G: GeometryProvider + ?Sized> GeometryProvider for &G {
    fn count(&self) -> usize {
        (**self).count()
    }

    fn height_of(&self, index: usize) -> Option<Px> {
        (**self).height_of(index)
    }

    fn top_of(&self, index: usize) -> Option<Px> {
        (**self).top_of(index)
    }

    fn bottom_of(&self, index: usize) -> Option<Px> {
        (**self).bottom_of(index)
    }
}

impl<G: GeometryProvider + ?Sized> GeometryProvider for Arc<RwLock<G>> {
    fn count(&self) -> usize {
        self.read().count()
    }

    fn height_of(&self, index: usize) -> Option<Px> {
        self.read().height_of(index)
    }

    fn top_of(&self, index: usize) -> Option<Px> {
        self.read().top_of(index)
    }

    fn bottom_of(&self, index: usize) -> Option<Px> {
        self.read().bottom_of(index)
    }

    fn bounds_of(&self, index: usize) -> Option<PageBounds> {
        // One lock for the three reads.
        self.read().bounds_of(index)
    }
}

/// Contiguous pages described by their heights.
///
/// Negative heights are treated as zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageStack {
    heights: Vec<Px>,
    /// `tops[i]` is the top of page `i`; one extra entry holds the total
    /// height.
    tops: Vec<Px>,
}

impl PageStack {
    /// Creates an empty page list.
    pub fn new() -> Self {
        Self {
            heights: Vec::new(),
            tops: vec![Px::ZERO],
        }
    }

    /// Creates a page list from raw pixel heights.
    pub fn from_heights(heights: impl IntoIterator<Item = i32>) -> Self {
        let mut stack = Self::new();
        for height in heights {
            stack.push(Px(height));
        }
        stack
    }

    /// Appends a page at the bottom.
    pub fn push(&mut self, height: Px) {
        let height = height.max(Px::ZERO);
        let top = self.total_height();
        self.heights.push(height);
        self.tops.push(top.saturating_add(height));
    }

    /// Changes the measured height of one page and re-lays out the pages
    /// below it. Returns `false` if there is no such page.
    pub fn set_height(&mut self, index: usize, height: Px) -> bool {
        let Some(slot) = self.heights.get_mut(index) else {
            return false;
        };
        *slot = height.max(Px::ZERO);
        self.relayout();
        true
    }

    /// Removes the last page, if any.
    pub fn pop(&mut self) -> Option<Px> {
        let height = self.heights.pop()?;
        self.tops.pop();
        Some(height)
    }

    /// Removes every page.
    pub fn clear(&mut self) {
        self.heights.clear();
        self.tops.clear();
        self.tops.push(Px::ZERO);
    }

    /// Total height of the scroll extent.
    pub fn total_height(&self) -> Px {
        self.tops.last().copied().unwrap_or(Px::ZERO)
    }

    /// Returns `true` if there are no pages.
    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }

    fn relayout(&mut self) {
        self.tops.clear();
        self.tops.push(Px::ZERO);
        let mut top = Px::ZERO;
        for height in &self.heights {
            top = top.saturating_add(*height);
            self.tops.push(top);
        }
    }
}

impl Default for PageStack {
    fn default() -> Self {
        Self::new()
    }
}

impl GeometryProvider for PageStack {
    fn count(&self) -> usize {
        self.heights.len()
    }

    fn height_of(&self, index: usize) -> Option<Px> {
        self.heights.get(index).copied()
    }

    fn top_of(&self, index: usize) -> Option<Px> {
        if index < self.heights.len() {
            self.tops.get(index).copied()
        } else {
            None
        }
    }

    fn bottom_of(&self, index: usize) -> Option<Px> {
        if index < self.heights.len() {
            self.tops.get(index + 1).copied()
        } else {
            None
        }
    }
}
