//! Layout axes
//!
//! Row and column flows are the same algorithm with width and height
//! swapped. Everything axis-dependent goes through [`Axis`] so the measurer
//! and positioner are written once.

/// A physical layout axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Left to right (width)
    Horizontal,
    /// Top to bottom (height)
    Vertical,
}

impl Axis {
    /// The perpendicular axis
    pub fn cross(self) -> Self {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }

    /// Select the horizontal or vertical value
    #[inline]
    pub fn pick<T>(self, horizontal: T, vertical: T) -> T {
        match self {
            Axis::Horizontal => horizontal,
            Axis::Vertical => vertical,
        }
    }

    /// Map a (main, cross) pair onto (horizontal, vertical)
    #[inline]
    pub fn to_physical<T>(self, main: T, cross: T) -> (T, T) {
        match self {
            Axis::Horizontal => (main, cross),
            Axis::Vertical => (cross, main),
        }
    }
}
