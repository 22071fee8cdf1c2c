//! Paging engine for scroll containers that snap to vertical pages.
//!
//! The engine sits next to a host scroll container whose single child is a
//! vertical list of pages. It watches the container's touch stream, decides
//! on release whether a drag or fling should flip to a neighbouring page,
//! issues one smooth scroll to snap there (or back), and keeps free flings
//! from crossing into another page.
//!
//! # Example
//!
//! ```
//! use pagescroll_components::{ChildView, EventSource, PagingConfig, PagingEngine};
//! use pagescroll_ui::{PageStack, Px, PxPosition, ScrollableSurface, ViewId};
//!
//! #[derive(Default)]
//! struct Host {
//!     y: Px,
//! }
//!
//! impl ScrollableSurface for Host {
//!     fn scroll_offset(&self) -> PxPosition {
//!         PxPosition::new(Px::ZERO, self.y)
//!     }
//!     fn viewport_height(&self) -> Px {
//!         Px(800)
//!     }
//!     fn scroll_to(&mut self, _x: Px, y: Px) {
//!         self.y = y;
//!     }
//!     fn smooth_scroll_to(&mut self, _x: Px, y: Px) {
//!         self.y = y;
//!     }
//!     fn request_frame(&mut self) {}
//! }
//!
//! let mut engine = PagingEngine::new(Host::default(), PagingConfig::default(), EventSource::Dispatch);
//! engine
//!     .on_child_added(ChildView::PageList {
//!         id: ViewId(7),
//!         pages: PageStack::from_heights([800, 1600, 800]),
//!     })
//!     .expect("page list child");
//!
//! engine.go_to_next_page();
//! assert_eq!(engine.current_page(), 1);
//! assert_eq!(engine.surface().y, Px(800));
//! ```
#![deny(missing_docs, clippy::unwrap_used)]

pub mod config;
pub mod engine;
pub mod error;
pub mod gesture;
pub mod listeners;
pub mod rebound;
pub mod resolver;
pub mod saved_state;

pub use crate::{
    config::PagingConfig,
    engine::{ChildView, Dispatch, EventSource, PagingEngine, Phase},
    error::PagingError,
    gesture::{Gesture, GestureClassifier},
    listeners::{ListenerRegistry, PageChangeListener},
    saved_state::SavedState,
};
