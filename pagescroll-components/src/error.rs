//! Errors surfaced by the paging engine.

use thiserror::Error;

/// Everything that can go wrong while paging.
///
/// Only [`PagingError::NotAPageList`] and [`PagingError::TruncatedState`]
/// ever reach the application. [`PagingError::MissingGeometry`] is recovered
/// at the touch entry points.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PagingError {
    /// The container's child is not a vertical page list.
    #[error("container child must be a vertical page list, got `{kind}`")]
    NotAPageList {
        /// Host-reported kind of the offending child.
        kind: String,
    },
    /// The geometry provider has no measurements for a page it counts.
    #[error("no geometry for page {index}")]
    MissingGeometry {
        /// Index of the page that could not be measured.
        index: usize,
    },
    /// A persisted snapshot is too short to decode.
    #[error("saved state is truncated: {len} bytes, expected 5")]
    TruncatedState {
        /// Length of the rejected buffer.
        len: usize,
    },
}
