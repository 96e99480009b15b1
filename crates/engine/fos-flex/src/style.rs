//! Style Snapshot
//!
//! Every layout-relevant property of one node. A snapshot is read-only for
//! the duration of a measure + layout pass; callers replace it through
//! [`LayoutTree::set_style`](crate::LayoutTree::set_style) between passes.

use serde::{Deserialize, Serialize};

use crate::Axis;

// ============================================================================
// Keywords
// ============================================================================

/// Display type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Display {
    #[default]
    Flex,
    None,
}

/// Positioning scheme
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    #[default]
    Relative,
    Absolute,
    Fixed,
}

/// Flex direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlexDirection {
    #[default]
    Row,
    RowReverse,
    Column,
    ColumnReverse,
}

impl FlexDirection {
    pub fn is_row(&self) -> bool {
        matches!(self, Self::Row | Self::RowReverse)
    }

    pub fn is_reversed(&self) -> bool {
        matches!(self, Self::RowReverse | Self::ColumnReverse)
    }

    /// The axis items flow along
    pub fn main_axis(&self) -> Axis {
        if self.is_row() { Axis::Horizontal } else { Axis::Vertical }
    }
}

/// Flex wrap
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlexWrap {
    #[default]
    Nowrap,
    Wrap,
    WrapReverse,
}

impl FlexWrap {
    pub fn is_wrapping(&self) -> bool {
        !matches!(self, Self::Nowrap)
    }
}

/// Justify content (main axis)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JustifyContent {
    #[default]
    FlexStart,
    FlexEnd,
    Center,
    SpaceBetween,
    SpaceAround,
}

/// Align items / align self (cross axis)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlignItems {
    FlexStart,
    FlexEnd,
    Center,
    #[default]
    Stretch,
}

// ============================================================================
// Edges
// ============================================================================

/// Edge sizes (top, right, bottom, left)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edges {
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub left: i32,
}

impl Edges {
    pub fn new(top: i32, right: i32, bottom: i32, left: i32) -> Self {
        Self { top, right, bottom, left }
    }

    /// Same value on every side
    pub fn all(value: i32) -> Self {
        Self::new(value, value, value, value)
    }

    /// Leading edge (left or top)
    pub fn start(&self, axis: Axis) -> i32 {
        axis.pick(self.left, self.top)
    }

    /// Trailing edge (right or bottom)
    pub fn end(&self, axis: Axis) -> i32 {
        axis.pick(self.right, self.bottom)
    }

    pub fn sum(&self, axis: Axis) -> i32 {
        self.start(axis) + self.end(axis)
    }
}

// ============================================================================
// Style
// ============================================================================

/// Layout-relevant style of one node
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Style {
    pub display: Display,
    pub position: Position,

    // Container
    pub direction: FlexDirection,
    pub wrap: FlexWrap,
    pub justify_content: JustifyContent,
    pub align_items: AlignItems,

    // Item
    /// Grow factor; 0 means "do not grow"
    pub flex: f32,
    /// Sort key among in-flow siblings
    pub order: i32,
    /// Overrides the container's `align_items`; `None` is `auto`
    pub align_self: Option<AlignItems>,

    // Box model
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub min_width: i32,
    pub min_height: i32,
    pub max_width: Option<i32>,
    pub max_height: Option<i32>,
    pub margin: Edges,
    pub padding: Edges,
    /// Uniform border width
    pub border_width: i32,

    // Offsets, only meaningful for absolute/fixed
    pub left: Option<i32>,
    pub right: Option<i32>,
    pub top: Option<i32>,
    pub bottom: Option<i32>,
}

impl Style {
    pub fn is_displayed(&self) -> bool {
        self.display == Display::Flex
    }

    /// Grow factor, never negative
    pub fn flex_factor(&self) -> f32 {
        if self.flex > 0.0 { self.flex } else { 0.0 }
    }

    /// Effective cross-axis alignment of this item inside `container`
    pub fn alignment_in(&self, container: &Style) -> AlignItems {
        self.align_self.unwrap_or(container.align_items)
    }

    pub fn size(&self, axis: Axis) -> Option<i32> {
        axis.pick(self.width, self.height)
    }

    pub fn min_size(&self, axis: Axis) -> i32 {
        axis.pick(self.min_width, self.min_height)
    }

    pub fn max_size(&self, axis: Axis) -> Option<i32> {
        axis.pick(self.max_width, self.max_height)
    }

    /// Clamp `value` into `[min, max]`; min wins when they conflict
    pub fn clamp_exact(&self, axis: Axis, value: i32) -> i32 {
        let value = match self.max_size(axis) {
            Some(max) => value.min(max),
            None => value,
        };
        value.max(self.min_size(axis)).max(0)
    }

    /// Like [`clamp_exact`](Self::clamp_exact), but an explicit size replaces `value`
    pub fn clamp(&self, axis: Axis, value: i32) -> i32 {
        self.clamp_exact(axis, self.size(axis).unwrap_or(value))
    }

    /// Padding on both sides plus border on both sides
    pub fn box_extent(&self, axis: Axis) -> i32 {
        self.padding.sum(axis) + self.border_width * 2
    }

    /// Offset of the content box from the border box's leading edge
    pub fn content_start(&self, axis: Axis) -> i32 {
        self.padding.start(axis) + self.border_width
    }

    /// `left` or `top`
    pub fn inset_start(&self, axis: Axis) -> Option<i32> {
        axis.pick(self.left, self.top)
    }

    /// `right` or `bottom`
    pub fn inset_end(&self, axis: Axis) -> Option<i32> {
        axis.pick(self.right, self.bottom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let style = Style::default();
        assert!(style.is_displayed());
        assert_eq!(style.direction, FlexDirection::Row);
        assert_eq!(style.align_items, AlignItems::Stretch);
        assert_eq!(style.width, None);
        assert_eq!(style.min_width, 0);
    }

    #[test]
    fn test_clamp_prefers_explicit_size() {
        let style = Style { width: Some(80), ..Default::default() };
        assert_eq!(style.clamp(Axis::Horizontal, 10), 80);
        assert_eq!(style.clamp_exact(Axis::Horizontal, 10), 10);
    }

    #[test]
    fn test_min_wins_over_max() {
        let style = Style {
            min_height: 50,
            max_height: Some(20),
            ..Default::default()
        };
        assert_eq!(style.clamp(Axis::Vertical, 30), 50);
    }

    #[test]
    fn test_clamp_never_negative() {
        let style = Style { width: Some(-40), ..Default::default() };
        assert_eq!(style.clamp(Axis::Horizontal, 0), 0);
    }

    #[test]
    fn test_box_extent() {
        let style = Style {
            padding: Edges::new(1, 2, 3, 4),
            border_width: 5,
            ..Default::default()
        };
        assert_eq!(style.box_extent(Axis::Horizontal), 16);
        assert_eq!(style.box_extent(Axis::Vertical), 14);
        assert_eq!(style.content_start(Axis::Horizontal), 9);
        assert_eq!(style.content_start(Axis::Vertical), 6);
    }

    #[test]
    fn test_negative_flex_ignored() {
        let style = Style { flex: -2.0, ..Default::default() };
        assert_eq!(style.flex_factor(), 0.0);
    }

    #[test]
    fn test_direction_axes() {
        assert_eq!(FlexDirection::ColumnReverse.main_axis(), Axis::Vertical);
        assert!(FlexDirection::RowReverse.is_reversed());
        assert!(!FlexDirection::Column.is_reversed());
    }
}
