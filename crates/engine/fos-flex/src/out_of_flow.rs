//! Out-of-flow Resolver
//!
//! `position: absolute` and `position: fixed` children. They never take part
//! in sibling flow; each axis is resolved on its own from the `left/right`
//! (`top/bottom`) offsets, or from the container's justify/align rules when
//! neither offset is set.

use crate::measure::measure_node;
use crate::position::rounded_div;
use crate::{AlignItems, Axis, Config, Frame, JustifyContent, LayoutTree, NodeId, Size, SizeConstraint, Style};

// ============================================================================
// Measure
// ============================================================================

/// Measure an absolute child against its container's extent
pub(crate) fn measure_absolute(tree: &mut LayoutTree, child: NodeId, extent: Size, config: &Config) -> Size {
    let style = *tree.node(child).style();
    let width = available(&style, Axis::Horizontal, extent.width);
    let height = available(&style, Axis::Vertical, extent.height);
    measure_node(tree, child, SizeConstraint::at_most(width), SizeConstraint::at_most(height), config)
}

/// Measure a fixed child against the viewport, inset by the root's padding and border
pub(crate) fn measure_fixed(tree: &mut LayoutTree, child: NodeId, config: &Config) -> Size {
    let root = tree.root_of(child);
    let root_style = tree.node(root).style();
    let extent = Size::new(
        config.viewport.width - root_style.box_extent(Axis::Horizontal),
        config.viewport.height - root_style.box_extent(Axis::Vertical),
    );
    measure_absolute(tree, child, extent, config)
}

fn available(style: &Style, axis: Axis, extent: i32) -> i32 {
    style
        .size(axis)
        .unwrap_or(extent)
        .saturating_sub(style.inset_start(axis).unwrap_or(0))
        .saturating_sub(style.inset_end(axis).unwrap_or(0))
        .saturating_sub(style.margin.sum(axis))
        .max(0)
}

// ============================================================================
// Placement
// ============================================================================

/// Where an item sits inside free space
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement {
    Start,
    Center,
    End,
}

/// Frame of an out-of-flow child inside a container of size `extent`
pub(crate) fn place(container: &Style, child: &Style, measured: Size, extent: Size) -> Frame {
    let horizontal = span(container, child, measured, Axis::Horizontal, extent.width);
    let vertical = span(container, child, measured, Axis::Vertical, extent.height);
    Frame::from_spans(Axis::Horizontal, horizontal, vertical)
}

fn span(container: &Style, child: &Style, measured: Size, axis: Axis, extent: i32) -> (i32, i32) {
    let size = measured.along(axis);
    let lead = child.margin.start(axis) + container.border_width;
    let trail = child.margin.end(axis) + container.border_width;

    match (child.inset_start(axis), child.inset_end(axis)) {
        (None, None) => {
            let start = fallback_offset(container, child, size, axis, extent)
                + lead
                + container.padding.start(axis);
            (start, start + size)
        }
        (Some(start), Some(end)) if child.size(axis).is_none() => {
            let start = start + lead;
            // An inverted span collapses at the start edge
            let end = (extent - end - trail).max(start);
            (start, end)
        }
        (Some(start), _) => (start + lead, start + lead + size),
        (None, Some(end)) => {
            let end = extent - end - trail;
            (end - size, end)
        }
    }
}

/// Offset of a lone item placed by the container's own alignment rules
fn fallback_offset(container: &Style, child: &Style, size: i32, axis: Axis, extent: i32) -> i32 {
    let free = extent - container.box_extent(axis) - child.margin.sum(axis) - size;

    let placement = if axis == container.direction.main_axis() {
        let reversed = container.direction.is_reversed();
        match container.justify_content {
            JustifyContent::FlexStart | JustifyContent::SpaceBetween if reversed => Placement::End,
            JustifyContent::FlexStart | JustifyContent::SpaceBetween => Placement::Start,
            JustifyContent::FlexEnd if reversed => Placement::Start,
            JustifyContent::FlexEnd => Placement::End,
            JustifyContent::Center | JustifyContent::SpaceAround => Placement::Center,
        }
    } else {
        // Out-of-flow items never stretch
        match child.alignment_in(container) {
            AlignItems::FlexStart | AlignItems::Stretch => Placement::Start,
            AlignItems::FlexEnd => Placement::End,
            AlignItems::Center => Placement::Center,
        }
    };

    match placement {
        Placement::Start => 0,
        Placement::Center => rounded_div(free, 2),
        Placement::End => free,
    }
}
