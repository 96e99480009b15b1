//! Flex Measurer
//!
//! Bottom-up pass: every container measures its children before sizing
//! itself, and each node caches its result for the layout pass.

use std::ops::Range;

use crate::items::{classify, Classified};
use crate::lines::break_lines;
use crate::out_of_flow;
use crate::{Axis, Config, LayoutTree, MeasureMode, NodeId, Size, SizeConstraint, Style};

/// Measure `id` against the given constraints and cache the result
pub(crate) fn measure_node(
    tree: &mut LayoutTree,
    id: NodeId,
    width: SizeConstraint,
    height: SizeConstraint,
    config: &Config,
) -> Size {
    let style = *tree.node(id).style();

    // Outer intent: an explicit size or max makes the axis exact
    let inner_width = resolve(&style, Axis::Horizontal, width);
    let inner_height = resolve(&style, Axis::Vertical, height);

    let content = measure_content(tree, id, &style, inner_width, inner_height, config);
    let width = finish(&style, Axis::Horizontal, width, content.width);
    let height = finish(&style, Axis::Vertical, height, content.height);

    let size = Size::new(width, height);
    tree.node_mut(id).measured = Some(size);
    size
}

fn resolve(style: &Style, axis: Axis, incoming: SizeConstraint) -> SizeConstraint {
    let mut resolved = incoming;
    if style.size(axis).is_some() || style.max_size(axis).is_some() {
        resolved.mode = MeasureMode::Exactly;
    }
    if !resolved.is_unspecified() {
        resolved.value = style.clamp(axis, incoming.value);
    }
    resolved
}

fn finish(style: &Style, axis: Axis, incoming: SizeConstraint, measured: i32) -> i32 {
    if incoming.is_exact() {
        style.clamp_exact(axis, incoming.value)
    } else {
        style.clamp(axis, measured)
    }
}

/// Border-box size from the content box inward
fn measure_content(
    tree: &mut LayoutTree,
    id: NodeId,
    style: &Style,
    width: SizeConstraint,
    height: SizeConstraint,
    config: &Config,
) -> Size {
    let width = width.shrink(style.box_extent(Axis::Horizontal));
    let height = height.shrink(style.box_extent(Axis::Vertical));

    let mut content = measure_flex(tree, id, style, width, height, config);
    if let Some(measurer) = tree.node(id).measurer.as_ref() {
        content = content.max(measurer.measure(width, height));
    }

    Size::new(
        content.width + style.box_extent(Axis::Horizontal),
        content.height + style.box_extent(Axis::Vertical),
    )
}

/// Measure a container's children and return its content size
fn measure_flex(
    tree: &mut LayoutTree,
    id: NodeId,
    style: &Style,
    width: SizeConstraint,
    height: SizeConstraint,
    config: &Config,
) -> Size {
    let Classified { hidden, absolute, fixed, in_flow } = classify(tree, id);

    // Out of flow: measured for a consistent cache, never part of the flow
    for child in hidden {
        measure_node(tree, child, SizeConstraint::exactly(0), SizeConstraint::exactly(0), config);
    }
    for child in absolute {
        out_of_flow::measure_absolute(tree, child, Size::new(width.value, height.value), config);
    }
    for child in fixed {
        out_of_flow::measure_fixed(tree, child, config);
    }

    if in_flow.is_empty() {
        return Size::ZERO;
    }

    let axis = style.direction.main_axis();
    let (main, cross) = axis.to_physical(width, height);
    let container = FlexContainer { style, axis, main, cross };

    let (main_size, cross_size) = if style.wrap.is_wrapping() {
        let (main_size, cross_size, lines) = container.measure_wrapped(tree, &in_flow, config);
        tree.node_mut(id).lines = lines;
        (main_size, cross_size)
    } else {
        container.measure_line(tree, &in_flow, config)
    };

    tracing::debug!(
        node = %id,
        axis = ?axis,
        items = in_flow.len(),
        main = main_size,
        cross = cross_size,
        "measured flex container"
    );

    Size::from_axes(axis, main_size, cross_size)
}

/// A container's style and content-box constraints, seen along its main axis
struct FlexContainer<'a> {
    style: &'a Style,
    axis: Axis,
    main: SizeConstraint,
    cross: SizeConstraint,
}

impl FlexContainer<'_> {
    /// Measure a child from (main, cross) constraints
    fn measure_child(
        &self,
        tree: &mut LayoutTree,
        child: NodeId,
        main: SizeConstraint,
        cross: SizeConstraint,
        config: &Config,
    ) -> Size {
        let (width, height) = self.axis.to_physical(main, cross);
        measure_node(tree, child, width, height, config)
    }

    /// Outer main-axis extent of an already measured item
    fn outer_main(&self, tree: &LayoutTree, child: NodeId) -> i32 {
        let node = tree.node(child);
        node.measured.unwrap_or(Size::ZERO).along(self.axis) + node.style().margin.sum(self.axis)
    }

    /// Measure one line of items; returns (main, cross) extents
    fn measure_line(&self, tree: &mut LayoutTree, items: &[NodeId], config: &Config) -> (i32, i32) {
        let axis = self.axis;
        let cross_axis = axis.cross();

        let mut usage: i32 = 0;
        let mut max_cross: i32 = 0;
        let mut total_flex: f32 = 0.0;

        // Inflexible items take what they need first
        for &child in items {
            let child_style = *tree.node(child).style();
            let main_margins = child_style.margin.sum(axis);
            let cross_margins = child_style.margin.sum(cross_axis);

            if child_style.flex_factor() > 0.0 {
                total_flex += child_style.flex_factor();
                usage += main_margins;
                continue;
            }

            let main = match child_style.size(axis) {
                Some(explicit) => SizeConstraint::at_most(child_style.clamp(axis, explicit)),
                None => SizeConstraint::unspecified(
                    self.main.value.saturating_sub(usage).saturating_sub(main_margins),
                ),
            };
            let cross = self.cross.bounded(self.cross.value - cross_margins);

            let size = self.measure_child(tree, child, main, cross, config);
            usage += size.along(axis) + main_margins;
            max_cross = max_cross.max(size.along(cross_axis) + cross_margins);
        }

        let mut residual = self.residual(usage, total_flex);
        let mut consumed: i32 = 0;

        // Flexible items split the residual. Each share is taken from what is
        // left, so rounding error never accumulates across siblings.
        for &child in items {
            let child_style = *tree.node(child).style();
            let flex = child_style.flex_factor();
            if flex <= 0.0 {
                continue;
            }
            if total_flex <= 0.0 {
                break;
            }

            let share = (f64::from(residual) * f64::from(flex) / f64::from(total_flex)).round() as i32;
            let main = if share <= 0 {
                SizeConstraint::at_most(self.main.value)
            } else if self.main.is_unspecified() {
                SizeConstraint::at_most(share)
            } else {
                SizeConstraint::exactly(share)
            };
            let cross_margins = child_style.margin.sum(cross_axis);
            let cross = self.cross.bounded(self.cross.value - cross_margins);

            let size = self.measure_child(tree, child, main, cross, config);
            tracing::trace!(node = %child, share, used = size.along(axis), "flex share");

            consumed += size.along(axis);
            max_cross = max_cross.max(size.along(cross_axis) + cross_margins);
            residual = (residual - size.along(axis)).max(0);
            total_flex -= flex;
        }

        (usage + consumed, max_cross)
    }

    /// Main-axis space left for flexible items after `usage`
    fn residual(&self, usage: i32, total_flex: f32) -> i32 {
        let style = self.style;
        let axis = self.axis;
        let box_extent = style.box_extent(axis);

        let sized_by_constraint = (usage == 0 && total_flex > 0.0)
            || (style.size(axis).is_none()
                && style.max_size(axis).is_none()
                && style.min_size(axis) == 0);

        let residual = if sized_by_constraint {
            // An explicit size replaces the content-box value with a
            // border-box one, which still carries padding and border
            let clamped = style.clamp(axis, self.main.value);
            let available = if clamped != self.main.value { clamped - box_extent } else { clamped };
            available - usage
        } else {
            style.clamp(axis, usage) - box_extent - usage
        };
        residual.max(0)
    }

    /// Measure items across as many lines as needed
    ///
    /// Returns (main, cross) and the line ranges the positioner must reuse.
    fn measure_wrapped(
        &self,
        tree: &mut LayoutTree,
        items: &[NodeId],
        config: &Config,
    ) -> (i32, i32, Vec<Range<usize>>) {
        let axis = self.axis;
        let cross_axis = axis.cross();

        // First estimate: inflexible items at their preferred size, flexible
        // items contribute only their margins
        let mut extents = Vec::with_capacity(items.len());
        for &child in items {
            let child_style = *tree.node(child).style();
            let main_margins = child_style.margin.sum(axis);
            let mut extent = main_margins;
            if child_style.flex_factor() <= 0.0 {
                let main = self.main.bounded(self.main.value - main_margins);
                let cross = self.cross.bounded(self.cross.value - child_style.margin.sum(cross_axis));
                extent += self.measure_child(tree, child, main, cross, config).along(axis);
            }
            extents.push(extent);
        }

        let available = if self.main.is_unspecified() { i32::MAX } else { self.main.value };
        let mut lines = break_lines(&extents, available);
        let (mut main_size, mut cross_size) = self.measure_lines(tree, items, &lines, config);

        // Flex items can end up wider than their first estimate (min sizes); break
        // again on the final sizes so the container holds every line
        let extents: Vec<i32> = items.iter().map(|&c| self.outer_main(tree, c)).collect();
        let settled = break_lines(&extents, available);
        if settled != lines {
            (main_size, cross_size) = self.measure_lines(tree, items, &settled, config);
            lines = settled;
        }

        tracing::trace!(lines = lines.len(), axis = ?cross_axis, "wrapped lines");
        (main_size, cross_size, lines)
    }

    /// Measure each line on its own; returns (widest main, summed cross)
    fn measure_lines(
        &self,
        tree: &mut LayoutTree,
        items: &[NodeId],
        lines: &[Range<usize>],
        config: &Config,
    ) -> (i32, i32) {
        let mut main_size = 0;
        let mut cross_size = 0;
        for line in lines {
            let (line_main, line_cross) = self.measure_line(tree, &items[line.clone()], config);
            main_size = main_size.max(line_main);
            cross_size += line_cross;
        }
        (main_size, cross_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Display, Edges, FlexDirection, FlexWrap};

    fn measure(tree: &mut LayoutTree, id: NodeId, w: SizeConstraint, h: SizeConstraint) -> Size {
        measure_node(tree, id, w, h, &Config::default())
    }

    fn fixed_box(tree: &mut LayoutTree, parent: NodeId, width: i32, height: i32) -> NodeId {
        let id = tree.create_node(Style {
            width: Some(width),
            height: Some(height),
            ..Default::default()
        });
        tree.append_child(parent, id).unwrap();
        id
    }

    #[test]
    fn test_leaf_uses_explicit_size() {
        let mut tree = LayoutTree::new();
        let leaf = tree.create_node(Style { width: Some(40), height: Some(10), ..Default::default() });

        let size = measure(&mut tree, leaf, SizeConstraint::unspecified(0), SizeConstraint::unspecified(0));
        assert_eq!(size, Size::new(40, 10));
        assert_eq!(tree.measured_size(leaf), Some(size));
    }

    #[test]
    fn test_exact_constraint_wins_over_content() {
        let mut tree = LayoutTree::new();
        let leaf = tree.create_node(Style::default());

        let size = measure(&mut tree, leaf, SizeConstraint::exactly(120), SizeConstraint::at_most(50));
        assert_eq!(size, Size::new(120, 0));
    }

    #[test]
    fn test_row_sums_main_and_maxes_cross() {
        let mut tree = LayoutTree::new();
        let root = tree.create_node(Style::default());
        fixed_box(&mut tree, root, 30, 10);
        let b = fixed_box(&mut tree, root, 20, 25);
        tree.set_style(b, Style {
            width: Some(20),
            height: Some(25),
            margin: Edges::new(1, 2, 3, 4),
            ..Default::default()
        }).unwrap();

        let size = measure(&mut tree, root, SizeConstraint::at_most(500), SizeConstraint::at_most(500));
        assert_eq!(size, Size::new(30 + 20 + 6, 25 + 4));
    }

    #[test]
    fn test_column_mirrors_row() {
        let mut tree = LayoutTree::new();
        let root = tree.create_node(Style { direction: FlexDirection::Column, ..Default::default() });
        fixed_box(&mut tree, root, 30, 10);
        fixed_box(&mut tree, root, 20, 25);

        let size = measure(&mut tree, root, SizeConstraint::at_most(500), SizeConstraint::at_most(500));
        assert_eq!(size, Size::new(30, 35));
    }

    #[test]
    fn test_padding_and_border_added() {
        let mut tree = LayoutTree::new();
        let root = tree.create_node(Style {
            padding: Edges::all(5),
            border_width: 2,
            ..Default::default()
        });
        fixed_box(&mut tree, root, 10, 10);

        let size = measure(&mut tree, root, SizeConstraint::at_most(100), SizeConstraint::at_most(100));
        assert_eq!(size, Size::new(24, 24));
    }

    #[test]
    fn test_flex_shares_renormalize() {
        let mut tree = LayoutTree::new();
        let root = tree.create_node(Style::default());
        let a = tree.create_node(Style { flex: 1.0, ..Default::default() });
        let b = tree.create_node(Style { flex: 2.0, ..Default::default() });
        tree.append_child(root, a).unwrap();
        tree.append_child(root, b).unwrap();

        measure(&mut tree, root, SizeConstraint::exactly(200), SizeConstraint::exactly(50));
        let wa = tree.measured_size(a).unwrap().width;
        let wb = tree.measured_size(b).unwrap().width;
        assert_eq!(wa, 67);
        assert_eq!(wa + wb, 200);
    }

    #[test]
    fn test_flex_takes_residual_after_fixed_items() {
        let mut tree = LayoutTree::new();
        let root = tree.create_node(Style::default());
        fixed_box(&mut tree, root, 50, 10);
        let grow = tree.create_node(Style { flex: 1.0, ..Default::default() });
        tree.append_child(root, grow).unwrap();

        measure(&mut tree, root, SizeConstraint::exactly(300), SizeConstraint::exactly(40));
        assert_eq!(tree.measured_size(grow).unwrap().width, 250);
    }

    #[test]
    fn test_max_width_caps_flex_item() {
        let mut tree = LayoutTree::new();
        let root = tree.create_node(Style::default());
        let capped = tree.create_node(Style { flex: 1.0, max_width: Some(30), ..Default::default() });
        let other = tree.create_node(Style { flex: 1.0, ..Default::default() });
        tree.append_child(root, capped).unwrap();
        tree.append_child(root, other).unwrap();

        measure(&mut tree, root, SizeConstraint::exactly(100), SizeConstraint::exactly(10));
        assert_eq!(tree.measured_size(capped).unwrap().width, 30);
        assert_eq!(tree.measured_size(other).unwrap().width, 70);
    }

    #[test]
    fn test_hidden_child_measured_but_ignored() {
        let mut tree = LayoutTree::new();
        let root = tree.create_node(Style::default());
        fixed_box(&mut tree, root, 10, 10);
        let hidden = tree.create_node(Style {
            display: Display::None,
            width: Some(500),
            ..Default::default()
        });
        tree.append_child(root, hidden).unwrap();

        let size = measure(&mut tree, root, SizeConstraint::at_most(100), SizeConstraint::at_most(100));
        assert_eq!(size, Size::new(10, 10));
        assert!(tree.measured_size(hidden).is_some());
    }

    #[test]
    fn test_wrap_stacks_lines() {
        let mut tree = LayoutTree::new();
        let root = tree.create_node(Style { wrap: FlexWrap::Wrap, ..Default::default() });
        for _ in 0..5 {
            fixed_box(&mut tree, root, 40, 10);
        }

        let size = measure(&mut tree, root, SizeConstraint::at_most(100), SizeConstraint::at_most(500));
        // 2 + 2 + 1 items per line
        assert_eq!(size, Size::new(80, 30));
    }

    #[test]
    fn test_wrap_rebreaks_when_flex_items_outgrow_share() {
        let mut tree = LayoutTree::new();
        let root = tree.create_node(Style { wrap: FlexWrap::Wrap, ..Default::default() });
        for _ in 0..2 {
            let item = tree.create_node(Style {
                flex: 1.0,
                min_width: 60,
                height: Some(10),
                ..Default::default()
            });
            tree.append_child(root, item).unwrap();
        }

        let size = measure(&mut tree, root, SizeConstraint::exactly(100), SizeConstraint::unspecified(0));
        assert_eq!(size, Size::new(100, 20));
        assert_eq!(tree.node(root).lines, vec![0..1, 1..2]);
    }

    #[test]
    fn test_wrap_unspecified_main_is_one_line() {
        let mut tree = LayoutTree::new();
        let root = tree.create_node(Style { wrap: FlexWrap::Wrap, ..Default::default() });
        for _ in 0..3 {
            fixed_box(&mut tree, root, 40, 10);
        }

        let size = measure(&mut tree, root, SizeConstraint::unspecified(0), SizeConstraint::unspecified(0));
        assert_eq!(size, Size::new(120, 10));
    }

    #[test]
    fn test_content_measurer() {
        let mut tree = LayoutTree::new();
        let text = tree.create_leaf(
            Style { padding: Edges::all(2), ..Default::default() },
            |w: SizeConstraint, _h: SizeConstraint| Size::new(w.value.min(70), 12),
        );

        let size = measure(&mut tree, text, SizeConstraint::at_most(50), SizeConstraint::unspecified(0));
        assert_eq!(size, Size::new(50, 16));
    }

    #[test]
    fn test_min_greater_than_max_does_not_panic() {
        let mut tree = LayoutTree::new();
        let leaf = tree.create_node(Style {
            min_width: 60,
            max_width: Some(10),
            ..Default::default()
        });

        let size = measure(&mut tree, leaf, SizeConstraint::at_most(100), SizeConstraint::at_most(100));
        assert_eq!(size.width, 60);
    }
}
