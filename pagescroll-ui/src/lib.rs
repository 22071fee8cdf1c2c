//! Host-side capabilities for the pagescroll paging container.
//!
//! The paging engine in `pagescroll-components` never owns a view tree. It
//! talks to the host toolkit through the small set of capabilities in this
//! crate:
//!
//! - [`ScrollableSurface`] - the host scroll container (offset, viewport,
//!   jumps, smooth scrolls, frame requests)
//! - [`GeometryProvider`] - read-only geometry of the pages in the page list
//! - [`FlingScroller`] - a physics fling simulator, with
//!   [`DecelerateScroller`] as the default
//! - [`FlingDetector`] - velocity-based fling recognition over
//!   [`PointerEvent`]s
//!
//! # Example
//!
//! ```
//! use pagescroll_ui::{GeometryProvider, PageStack, Px};
//!
//! let pages = PageStack::from_heights([800, 1600, 800]);
//! let viewport = Px(800);
//! let second = pages.bounds_of(1).expect("page 1");
//! assert!(!second.fits_in(viewport));
//! assert_eq!(second.bottom_aligned(viewport), Px(1600));
//! ```
#![deny(missing_docs, clippy::unwrap_used)]

pub mod fling_detector;
pub mod geometry;
pub mod logging;
pub mod pointer;
pub mod px;
pub mod scroller;
pub mod surface;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use crate::{
    fling_detector::{Fling, FlingDetector, FlingDetectorConfig},
    geometry::{GeometryProvider, PageBounds, PageStack},
    pointer::{PointerAction, PointerEvent, ViewId},
    px::{Px, PxPosition},
    scroller::{DecelerateScroller, FlingScroller},
    surface::ScrollableSurface,
};
