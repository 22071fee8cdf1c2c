//! Tuning for the paging engine.
//!
//! ## Usage
//!
//! Build a [`PagingConfig`] with its setters, or read it from a declarative
//! attribute set with [`PagingConfig::from_attributes`].
//!
//! ```
//! use std::time::Duration;
//! use pagescroll_components::config::PagingConfig;
//!
//! let config = PagingConfig::default()
//!     .page_change_threshold(35)
//!     .fling_duration(Duration::from_millis(300));
//! assert_eq!(config.page_change_threshold, 35);
//!
//! let from_xml = PagingConfig::from_attributes([("page_change_threshold", "150")]);
//! assert_eq!(from_xml.page_change_threshold, 100);
//! ```

use std::time::Duration;

use derive_setters::Setters;
use pagescroll_ui::FlingDetectorConfig;
use tracing::warn;

/// Percentage of the neighbouring page that must be revealed to flip.
pub const DEFAULT_PAGE_CHANGE_THRESHOLD: i32 = 20;

/// How far ahead a fling's velocity is projected when deciding a flip.
pub const DEFAULT_FLING_DURATION: Duration = Duration::from_millis(275);

/// Drags shorter than this (pixels) are left to the host.
pub const DEFAULT_MIN_SCROLL_TRIGGER: f32 = 20.0;

/// Attribute key read by [`PagingConfig::from_attributes`].
pub const PAGE_CHANGE_THRESHOLD_ATTR: &str = "page_change_threshold";

/// Configuration of a [`PagingEngine`](crate::PagingEngine).
#[derive(Debug, Clone, PartialEq, Setters)]
pub struct PagingConfig {
    /// Percentage (0..=100) of the neighbouring page that a drag or fling
    /// must reveal before the engine flips to it. Out-of-range values are
    /// clamped when the engine is built.
    pub page_change_threshold: i32,
    /// Projection window applied to fling velocity.
    pub fling_duration: Duration,
    /// Minimum vertical drag distance, in pixels, that the engine acts on.
    pub min_scroll_trigger: f32,
    /// Tuning of the fling detector fed by the touch stream.
    pub fling_detector: FlingDetectorConfig,
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            page_change_threshold: DEFAULT_PAGE_CHANGE_THRESHOLD,
            fling_duration: DEFAULT_FLING_DURATION,
            min_scroll_trigger: DEFAULT_MIN_SCROLL_TRIGGER,
            fling_detector: FlingDetectorConfig::default(),
        }
    }
}

impl PagingConfig {
    /// Reads the configuration from a declarative attribute set.
    ///
    /// Only [`PAGE_CHANGE_THRESHOLD_ATTR`] is recognized. A missing or
    /// unparsable value falls back to the default; the result is already
    /// validated.
    pub fn from_attributes<K, V>(attributes: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut config = Self::default();
        for (key, value) in attributes {
            if key.as_ref() != PAGE_CHANGE_THRESHOLD_ATTR {
                continue;
            }
            match value.as_ref().trim().parse::<i32>() {
                Ok(threshold) => config.page_change_threshold = threshold,
                Err(err) => {
                    warn!(value = value.as_ref(), %err, "ignoring unparsable page_change_threshold");
                }
            }
        }
        config.validated()
    }

    /// Returns the configuration with every value brought into range.
    pub fn validated(mut self) -> Self {
        self.page_change_threshold = self.page_change_threshold.clamp(0, 100);
        if !self.min_scroll_trigger.is_finite() || self.min_scroll_trigger < 0.0 {
            self.min_scroll_trigger = DEFAULT_MIN_SCROLL_TRIGGER;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(-10, 0)]
    #[case(0, 0)]
    #[case(20, 20)]
    #[case(100, 100)]
    #[case(250, 100)]
    fn threshold_is_clamped(#[case] raw: i32, #[case] expected: i32) {
        let config = PagingConfig::default().page_change_threshold(raw).validated();
        assert_eq!(config.page_change_threshold, expected);
    }

    #[rstest]
    #[case(&[], 20)]
    #[case(&[("page_change_threshold", "45")], 45)]
    #[case(&[("page_change_threshold", " 7 ")], 7)]
    #[case(&[("page_change_threshold", "lots")], 20)]
    #[case(&[("page_change_threshold", "-3")], 0)]
    #[case(&[("layout_width", "match_parent")], 20)]
    fn threshold_from_attributes(#[case] attributes: &[(&str, &str)], #[case] expected: i32) {
        let config = PagingConfig::from_attributes(attributes.iter().copied());
        assert_eq!(config.page_change_threshold, expected);
    }

    #[test]
    fn negative_trigger_falls_back_to_default() {
        let config = PagingConfig::default().min_scroll_trigger(-1.0).validated();
        assert_eq!(config.min_scroll_trigger, DEFAULT_MIN_SCROLL_TRIGGER);
    }

    #[test]
    fn defaults() {
        let config = PagingConfig::default();
        assert_eq!(config.fling_duration, Duration::from_millis(275));
        assert_eq!(config.page_change_threshold, DEFAULT_PAGE_CHANGE_THRESHOLD);
    }
}
