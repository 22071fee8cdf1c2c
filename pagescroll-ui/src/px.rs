//! Integer pixels for scroll offsets and page geometry.
//!
//! Page edges, heights and scroll offsets are whole physical pixels, measured
//! from the top of the scroll extent with y growing downward. Pointer
//! coordinates and velocities stay in `f32` and only become [`Px`] when they
//! are turned into an offset.
//!
//! ```
//! use pagescroll_ui::px::{Px, PxPosition};
//!
//! let page_top = Px(800);
//! let bottom_aligned = page_top + Px(1600) - Px(800);
//! assert_eq!(bottom_aligned, Px(1600));
//!
//! let nudged = PxPosition::new(Px::ZERO, page_top).saturating_offset(Px::ZERO, Px(-20));
//! assert_eq!(nudged.y, Px(780));
//! ```

/// A physical pixel value. Negative values address offsets above the top of
/// the scroll extent.
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd, Eq, Ord, Hash)]
pub struct Px(pub i32);

impl Px {
    /// Zero pixels.
    pub const ZERO: Self = Self(0);

    /// Creates a pixel value.
    pub const fn new(value: i32) -> Self {
        Px(value)
    }

    /// Returns the raw value.
    pub fn raw(self) -> i32 {
        self.0
    }

    /// Converts to `f32` for threshold math against pointer coordinates.
    pub fn to_f32(self) -> f32 {
        self.0 as f32
    }

    /// Converts from `f32`, truncating toward zero and saturating at the
    /// bounds of `i32`. NaN maps to zero.
    ///
    /// ```
    /// use pagescroll_ui::px::Px;
    ///
    /// assert_eq!(Px::saturating_from_f32(959.9), Px(959));
    /// assert_eq!(Px::saturating_from_f32(f32::MAX), Px(i32::MAX));
    /// ```
    pub fn saturating_from_f32(value: f32) -> Self {
        Px(value.clamp(i32::MIN as f32, i32::MAX as f32) as i32)
    }

    /// Addition that stops at the bounds of `i32`.
    pub fn saturating_add(self, rhs: Self) -> Self {
        Px(self.0.saturating_add(rhs.0))
    }
}

impl std::ops::Add for Px {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Px(self.0 + rhs.0)
    }
}

impl std::ops::Sub for Px {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Px(self.0 - rhs.0)
    }
}

/// A scroll offset. Paging only moves along y, but the host reports and
/// accepts both axes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PxPosition {
    /// Horizontal offset.
    pub x: Px,
    /// Vertical offset.
    pub y: Px,
}

impl PxPosition {
    /// The origin.
    pub const ZERO: Self = Self { x: Px(0), y: Px(0) };

    /// Creates an offset from its components.
    pub const fn new(x: Px, y: Px) -> Self {
        Self { x, y }
    }

    /// Moves the offset by `(dx, dy)`, stopping at the bounds of `i32`.
    pub fn saturating_offset(self, dx: Px, dy: Px) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_from_heights() {
        let top = Px(800);
        let height = Px(1600);
        let viewport = Px(800);
        assert_eq!(top + height, Px(2400));
        assert_eq!(top + height - viewport, Px(1600));
        assert_eq!(Px::new(-40).raw(), -40);
    }

    #[test]
    fn float_conversion_truncates_and_saturates() {
        assert_eq!(Px::saturating_from_f32(-12.8), Px(-12));
        assert_eq!(Px::saturating_from_f32(f32::MIN), Px(i32::MIN));
        assert_eq!(Px::saturating_from_f32(f32::NAN), Px::ZERO);
        assert_eq!(Px(640).to_f32(), 640.0);
    }

    #[test]
    fn offsets_saturate() {
        let bottom = PxPosition::new(Px::ZERO, Px(i32::MAX));
        assert_eq!(bottom.saturating_offset(Px::ZERO, Px(1)).y, Px(i32::MAX));
        assert_eq!(
            PxPosition::ZERO.saturating_offset(Px(3), Px(-5)),
            PxPosition::new(Px(3), Px(-5))
        );
    }
}
