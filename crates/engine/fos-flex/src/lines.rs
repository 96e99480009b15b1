//! Flex line breaking
//!
//! One greedy rule, shared by the measurer and the positioner so both agree
//! on where lines end.

use std::ops::Range;

/// Split items into lines given each item's outer main-axis extent
///
/// An item starts a new line when it would push the current line past
/// `available` and the current line is not empty. An item wider than
/// `available` therefore sits alone on its line.
pub(crate) fn break_lines(extents: &[i32], available: i32) -> Vec<Range<usize>> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut used: i32 = 0;

    for (i, &extent) in extents.iter().enumerate() {
        if i > start && used.saturating_add(extent) > available {
            lines.push(start..i);
            start = i;
            used = 0;
        }
        used = used.saturating_add(extent);
    }

    if start < extents.len() {
        lines.push(start..extents.len());
    }
    lines
}
