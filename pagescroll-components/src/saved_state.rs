//! Snapshot of the paging state across pause and resume.
//!
//! The encoding is fixed: the active index as a little-endian `i32`, then one
//! byte that is `1` when flings are disabled. Hosts embed it in their own
//! state bundles, so trailing bytes after the fifth are ignored.

use crate::error::PagingError;

/// Length of an encoded [`SavedState`].
pub const ENCODED_LEN: usize = 5;

/// Persisted paging state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SavedState {
    /// Index of the active page.
    pub active_item: i32,
    /// Whether flings were disabled on the active page.
    pub fling_disabled: bool,
}

impl SavedState {
    /// Encodes the snapshot.
    pub fn to_bytes(&self) -> [u8; ENCODED_LEN] {
        let mut out = [0u8; ENCODED_LEN];
        out[..4].copy_from_slice(&self.active_item.to_le_bytes());
        out[4] = u8::from(self.fling_disabled);
        out
    }

    /// Decodes a snapshot. Any flag byte other than `1` reads as `false`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PagingError> {
        let Some((index, rest)) = bytes.split_first_chunk::<4>() else {
            return Err(PagingError::TruncatedState { len: bytes.len() });
        };
        let Some(&flag) = rest.first() else {
            return Err(PagingError::TruncatedState { len: bytes.len() });
        };
        Ok(Self {
            active_item: i32::from_le_bytes(*index),
            fling_disabled: flag == 1,
        })
    }
}
