//! Flex Positioner
//!
//! Top-down pass: assigns each node its frame from the sizes cached by the
//! measure pass, then places its children inside its content box.

use crate::items::{classify, Classified};
use crate::lines::break_lines;
use crate::out_of_flow;
use crate::{AlignItems, Axis, Config, FlexWrap, Frame, JustifyContent, LayoutTree, NodeId, Size, Style};

/// Display state inherited from the ancestor chain
///
/// Passed by value down each recursive call so sibling subtrees never see
/// each other's state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum SubtreeState {
    #[default]
    Displayed,
    /// An ancestor (or this node) has `display: none`
    Suppressed,
}

/// Assign `frame` to `id` and lay out its subtree
pub(crate) fn layout_node(
    tree: &mut LayoutTree,
    id: NodeId,
    frame: Frame,
    state: SubtreeState,
    config: &Config,
) {
    tree.node_mut(id).frame = Some(frame);
    if config.debug_log_frames {
        tracing::debug!(node = %id, ?frame, "frame");
    }

    let style = *tree.node(id).style();
    let state = if style.is_displayed() { state } else { SubtreeState::Suppressed };

    if state == SubtreeState::Suppressed {
        let children = tree.children(id).to_vec();
        for child in children {
            layout_node(tree, child, Frame::ZERO, SubtreeState::Suppressed, config);
        }
        return;
    }

    layout_children(tree, id, &style, frame.size(), config);
}

/// Size cached by the measure pass
fn measured(tree: &LayoutTree, id: NodeId) -> Size {
    tree.node(id).measured_size().unwrap_or_else(|| {
        tracing::warn!(node = %id, "laid out before being measured");
        Size::ZERO
    })
}

/// Round `numerator / denominator` to the nearest integer
pub(crate) fn rounded_div(numerator: i32, denominator: i32) -> i32 {
    if denominator == 0 {
        return 0;
    }
    (f64::from(numerator) / f64::from(denominator)).round() as i32
}

fn layout_children(tree: &mut LayoutTree, id: NodeId, style: &Style, size: Size, config: &Config) {
    let Classified { hidden, absolute, fixed, mut in_flow } = classify(tree, id);

    for child in hidden {
        layout_node(tree, child, Frame::ZERO, SubtreeState::Displayed, config);
    }
    for child in absolute {
        let frame = out_of_flow::place(style, tree.node(child).style(), measured(tree, child), size);
        layout_node(tree, child, frame, SubtreeState::Displayed, config);
    }
    for child in fixed {
        let frame = out_of_flow::place(style, tree.node(child).style(), measured(tree, child), config.viewport);
        layout_node(tree, child, frame, SubtreeState::Displayed, config);
    }

    if in_flow.is_empty() {
        return;
    }

    let axis = style.direction.main_axis();
    let cross_axis = axis.cross();
    let content = FlexContent {
        style,
        axis,
        main: (size.along(axis) - style.box_extent(axis)).max(0),
        cross: (size.along(cross_axis) - style.box_extent(cross_axis)).max(0),
        config,
    };

    let lines = if style.wrap.is_wrapping() {
        content.place_wrapped(tree, id, &mut in_flow)
    } else {
        let base = style.content_start(cross_axis);
        content.place_line(tree, &mut in_flow, content.cross, base, false);
        1
    };

    tracing::debug!(node = %id, axis = ?axis, items = in_flow.len(), lines, "laid out flex container");
}

/// Main/cross start offset and between-item gap for one line
fn justify(justify: JustifyContent, reversed: bool, available: i32, usage: i32, count: usize) -> (i32, i32) {
    if count == 0 {
        return (0, 0);
    }
    let free = available - usage;
    let count = i32::try_from(count).unwrap_or(i32::MAX);

    match justify {
        JustifyContent::FlexStart if reversed => (free, 0),
        JustifyContent::FlexStart => (0, 0),
        JustifyContent::FlexEnd if reversed => (0, 0),
        JustifyContent::FlexEnd => (free, 0),
        JustifyContent::Center => (rounded_div(free, 2), 0),
        JustifyContent::SpaceBetween if free >= 0 && count > 1 => (0, rounded_div(free, count - 1)),
        JustifyContent::SpaceAround if free >= 0 => {
            let interval = f64::from(free) / (2.0 * f64::from(count));
            (interval.round() as i32, (interval * 2.0).round() as i32)
        }
        JustifyContent::SpaceBetween | JustifyContent::SpaceAround => (0, 0),
    }
}

/// A container's content box, seen along its main axis
struct FlexContent<'a> {
    style: &'a Style,
    axis: Axis,
    /// Available main-axis space
    main: i32,
    /// Available cross-axis space
    cross: i32,
    config: &'a Config,
}

impl FlexContent<'_> {
    /// Outer main-axis extent of an item (size plus margins)
    fn outer_main(&self, tree: &LayoutTree, child: NodeId) -> i32 {
        measured(tree, child).along(self.axis) + tree.node(child).style().margin.sum(self.axis)
    }

    /// Outer cross-axis extent of an item
    fn outer_cross(&self, tree: &LayoutTree, child: NodeId) -> i32 {
        let cross_axis = self.axis.cross();
        measured(tree, child).along(cross_axis) + tree.node(child).style().margin.sum(cross_axis)
    }

    /// Place items on consecutive lines; returns the line count
    ///
    /// Reuses the lines `container` was measured with, so every line lands
    /// inside the measured box.
    fn place_wrapped(&self, tree: &mut LayoutTree, container: NodeId, items: &mut [NodeId]) -> usize {
        let cached = &tree.node(container).lines;
        let lines = match cached.last() {
            Some(last) if last.end == items.len() => cached.clone(),
            _ => {
                let extents: Vec<i32> = items.iter().map(|&c| self.outer_main(tree, c)).collect();
                break_lines(&extents, self.main)
            }
        };

        let cross_axis = self.axis.cross();
        let wrap_reverse = self.style.wrap == FlexWrap::WrapReverse;
        let single_line = lines.len() == 1;
        let mut used = 0;

        for line in &lines {
            let line_items = &mut items[line.clone()];
            let line_cross = if single_line {
                self.cross
            } else {
                line_items.iter().map(|&c| self.outer_cross(tree, c)).max().unwrap_or(0)
            };

            // wrap-reverse stacks lines from the far cross edge
            let base = self.style.content_start(cross_axis)
                + if wrap_reverse { self.cross - used } else { used };
            used += self.place_line(tree, line_items, line_cross, base, wrap_reverse);
        }

        lines.len()
    }

    /// Place one line of items; returns the cross extent it used
    ///
    /// `base` is the line's leading cross edge, or its trailing edge when
    /// `mirrored` (wrap-reverse).
    fn place_line(
        &self,
        tree: &mut LayoutTree,
        items: &mut [NodeId],
        line_cross: i32,
        base: i32,
        mirrored: bool,
    ) -> i32 {
        let axis = self.axis;
        let cross_axis = axis.cross();
        let reversed = self.style.direction.is_reversed();
        if reversed {
            items.reverse();
        }

        let usage: i32 = items.iter().map(|&c| self.outer_main(tree, c)).sum();
        let (start, gap) = justify(self.style.justify_content, reversed, self.main, usage, items.len());

        let mut cursor = self.style.content_start(axis) + start;
        let mut extent = 0;

        for (i, &child) in items.iter().enumerate() {
            let child_style = *tree.node(child).style();
            let size = measured(tree, child);

            if i > 0 {
                cursor += gap;
            }
            cursor += child_style.margin.start(axis);
            let main = (cursor, cursor + size.along(axis));

            let lead = child_style.margin.start(cross_axis);
            let trail = child_style.margin.end(cross_axis);
            let free = line_cross - lead - trail;
            let natural = size.along(cross_axis);

            let (cross_size, offset) = match child_style.alignment_in(self.style) {
                AlignItems::FlexStart => (natural, 0),
                AlignItems::FlexEnd => (natural, free - natural),
                AlignItems::Center => (natural, rounded_div(free - natural, 2)),
                AlignItems::Stretch => (child_style.clamp(cross_axis, free), 0),
            };

            let cross = if mirrored {
                let end = base - trail - offset;
                (end - cross_size, end)
            } else {
                let start = base + lead + offset;
                (start, start + cross_size)
            };

            let frame = Frame::from_spans(axis, main, cross);
            layout_node(tree, child, frame, SubtreeState::Displayed, self.config);

            cursor = main.1 + child_style.margin.end(axis);
            extent = extent.max(cross_size + lead + trail);
        }

        extent
    }
}
