//! Size Constraints
//!
//! How much space a node may use along one axis, and how strictly.

use serde::{Deserialize, Serialize};

use crate::Axis;

/// Raw sentinel for "property not set"
///
/// Hosts that hand over raw integers use this value for unset lengths.
/// Inside the crate unset lengths are `None`; see [`dimension`].
pub const UNDEFINED: i32 = i32::MAX;

/// Convert a raw host length into an optional dimension
pub fn dimension(raw: i32) -> Option<i32> {
    if raw == UNDEFINED { None } else { Some(raw) }
}

/// How strictly a constraint value applies
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MeasureMode {
    /// The node must be exactly this size
    Exactly,
    /// The node may be at most this size
    AtMost,
    /// No limit; the value is only a hint
    #[default]
    Unspecified,
}

/// Available space along one axis
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SizeConstraint {
    pub value: i32,
    pub mode: MeasureMode,
}

impl SizeConstraint {
    pub fn new(value: i32, mode: MeasureMode) -> Self {
        debug_assert!(
            mode == MeasureMode::Unspecified || value != UNDEFINED,
            "UNDEFINED used as a {mode:?} constraint"
        );
        Self { value: value.max(0), mode }
    }

    pub fn exactly(value: i32) -> Self {
        Self::new(value, MeasureMode::Exactly)
    }

    pub fn at_most(value: i32) -> Self {
        Self::new(value, MeasureMode::AtMost)
    }

    pub fn unspecified(value: i32) -> Self {
        Self::new(value, MeasureMode::Unspecified)
    }

    pub fn is_exact(&self) -> bool {
        self.mode == MeasureMode::Exactly
    }

    pub fn is_unspecified(&self) -> bool {
        self.mode == MeasureMode::Unspecified
    }

    /// `AtMost(value)`, unless this constraint is unspecified
    pub(crate) fn bounded(&self, value: i32) -> Self {
        if self.is_unspecified() {
            Self::unspecified(value)
        } else {
            Self::at_most(value)
        }
    }

    /// Same mode, value reduced by `amount` (floored at zero)
    pub(crate) fn shrink(&self, amount: i32) -> Self {
        Self {
            value: self.value.saturating_sub(amount).max(0),
            mode: self.mode,
        }
    }
}

/// A measured size
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const ZERO: Size = Size { width: 0, height: 0 };

    /// Create a size; negative components are clamped to zero
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width: width.max(0),
            height: height.max(0),
        }
    }

    /// Build from main/cross extents
    pub fn from_axes(main_axis: Axis, main: i32, cross: i32) -> Self {
        let (width, height) = main_axis.to_physical(main, cross);
        Self::new(width, height)
    }

    /// Extent along `axis`
    #[inline]
    pub fn along(&self, axis: Axis) -> i32 {
        axis.pick(self.width, self.height)
    }

    /// Component-wise maximum
    pub fn max(self, other: Size) -> Size {
        Size {
            width: self.width.max(other.width),
            height: self.height.max(other.height),
        }
    }
}
