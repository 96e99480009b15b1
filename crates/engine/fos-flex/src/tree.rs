//! Layout Tree
//!
//! Arena of styled nodes. Children are index lists, the parent link is an
//! optional index, so there are no reference cycles. Each node caches the
//! result of its last measure pass and its last layout pass.

use std::fmt;
use std::ops::Range;

use crate::{Axis, Size, SizeConstraint, Style, TreeError};

/// Layout node identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ============================================================================
// Frame
// ============================================================================

/// Final edges of a node, relative to its parent's border box
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Frame {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Frame {
    pub const ZERO: Frame = Frame { left: 0, top: 0, right: 0, bottom: 0 };

    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self { left, top, right, bottom }
    }

    /// Frame at the origin with the given size
    pub fn from_size(size: Size) -> Self {
        Self::new(0, 0, size.width, size.height)
    }

    /// Build from (start, end) spans along the main and cross axes
    pub fn from_spans(main_axis: Axis, main: (i32, i32), cross: (i32, i32)) -> Self {
        let ((left, right), (top, bottom)) = main_axis.to_physical(main, cross);
        Self { left, top, right, bottom }
    }

    pub fn width(&self) -> i32 {
        (self.right - self.left).max(0)
    }

    pub fn height(&self) -> i32 {
        (self.bottom - self.top).max(0)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }

    /// (start, end) along `axis`
    pub fn span(&self, axis: Axis) -> (i32, i32) {
        axis.pick((self.left, self.right), (self.top, self.bottom))
    }

    pub fn translate(&self, dx: i32, dy: i32) -> Frame {
        Frame::new(self.left + dx, self.top + dy, self.right + dx, self.bottom + dy)
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.left && x <= self.right && y >= self.top && y <= self.bottom
    }
}

// ============================================================================
// Content measurement
// ============================================================================

/// Measures a node's own content (text, images, embedded views)
///
/// Called with the node's content-box constraints; returns the content size
/// without padding or border.
pub trait Measure: Send + Sync {
    fn measure(&self, width: SizeConstraint, height: SizeConstraint) -> Size;
}

impl<F> Measure for F
where
    F: Fn(SizeConstraint, SizeConstraint) -> Size + Send + Sync,
{
    fn measure(&self, width: SizeConstraint, height: SizeConstraint) -> Size {
        self(width, height)
    }
}

// ============================================================================
// Nodes
// ============================================================================

/// A node in the layout tree
pub struct LayoutNode {
    /// Style snapshot
    pub(crate) style: Style,
    /// Parent node
    pub(crate) parent: Option<NodeId>,
    /// Children in tree order
    pub(crate) children: Vec<NodeId>,
    /// Leaf content measurer
    pub(crate) measurer: Option<Box<dyn Measure>>,
    /// Result of the last measure pass
    pub(crate) measured: Option<Size>,
    /// Result of the last layout pass
    pub(crate) frame: Option<Frame>,
    /// Line ranges over the `order`-sorted in-flow children, from the last
    /// wrapped measure
    pub(crate) lines: Vec<Range<usize>>,
}

impl LayoutNode {
    fn new(style: Style, measurer: Option<Box<dyn Measure>>) -> Self {
        Self {
            style,
            parent: None,
            children: Vec::new(),
            measurer,
            measured: None,
            frame: None,
            lines: Vec::new(),
        }
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Size from the last measure pass, if it is still valid
    pub fn measured_size(&self) -> Option<Size> {
        self.measured
    }

    /// Frame from the last layout pass, if it is still valid
    pub fn frame(&self) -> Option<Frame> {
        self.frame
    }
}

impl fmt::Debug for LayoutNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutNode")
            .field("style", &self.style)
            .field("parent", &self.parent)
            .field("children", &self.children)
            .field("measurer", &self.measurer.is_some())
            .field("measured", &self.measured)
            .field("frame", &self.frame)
            .field("lines", &self.lines)
            .finish()
    }
}

// ============================================================================
// Tree
// ============================================================================

/// Layout tree - arena of styled nodes
#[derive(Debug, Default)]
pub struct LayoutTree {
    nodes: Vec<LayoutNode>,
}

impl LayoutTree {
    pub fn new() -> Self {
        Self { nodes: Vec::with_capacity(64) }
    }

    /// Create a detached node and return its id
    pub fn create_node(&mut self, style: Style) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(LayoutNode::new(style, None));
        id
    }

    /// Create a detached node whose content is sized by `measurer`
    pub fn create_leaf(&mut self, style: Style, measurer: impl Measure + 'static) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(LayoutNode::new(style, Some(Box::new(measurer))));
        id
    }

    pub fn get(&self, id: NodeId) -> Option<&LayoutNode> {
        self.nodes.get(id.0)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        id.0 < self.nodes.len()
    }

    /// Number of nodes, attached or not
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Append `child` as the last child of `parent`
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), TreeError> {
        self.check(parent)?;
        self.check(child)?;
        if let Some(existing) = self.nodes[child.0].parent {
            return Err(TreeError::AlreadyAttached { child, parent: existing });
        }
        if parent == child || self.ancestors(parent).any(|a| a == child) {
            return Err(TreeError::WouldCycle { parent, child });
        }

        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
        self.invalidate(parent);
        Ok(())
    }

    /// Detach `child` from `parent`; the child keeps its own subtree
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), TreeError> {
        self.check(parent)?;
        self.check(child)?;
        let children = &mut self.nodes[parent.0].children;
        let index = children
            .iter()
            .position(|&c| c == child)
            .ok_or(TreeError::NotAChild { parent, child })?;
        children.remove(index);
        self.nodes[child.0].parent = None;
        self.invalidate(parent);
        Ok(())
    }

    /// Replace a node's style, invalidating cached results up to the root
    pub fn set_style(&mut self, id: NodeId, style: Style) -> Result<(), TreeError> {
        self.check(id)?;
        self.nodes[id.0].style = style;
        self.invalidate(id);
        Ok(())
    }

    /// Drop cached measure/layout results of `id` and all its ancestors
    pub fn invalidate(&mut self, id: NodeId) {
        let mut current = Some(id);
        while let Some(node_id) = current {
            let Some(node) = self.nodes.get_mut(node_id.0) else { break };
            node.measured = None;
            node.frame = None;
            node.lines.clear();
            current = node.parent;
        }
    }

    pub fn style(&self, id: NodeId) -> Option<&Style> {
        self.get(id).map(|n| &n.style)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Children of `id` in tree order (empty for unknown ids)
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    pub fn child_count(&self, id: NodeId) -> usize {
        self.children(id).len()
    }

    pub fn child_at(&self, id: NodeId, index: usize) -> Option<NodeId> {
        self.children(id).get(index).copied()
    }

    /// Walk the parent chain up to the topmost ancestor
    pub fn root_of(&self, id: NodeId) -> NodeId {
        self.ancestors(id).last().unwrap_or(id)
    }

    /// Strict ancestors of `id`, nearest first
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors { tree: self, current: self.parent(id) }
    }

    pub fn measured_size(&self, id: NodeId) -> Option<Size> {
        self.get(id).and_then(|n| n.measured)
    }

    pub fn frame(&self, id: NodeId) -> Option<Frame> {
        self.get(id).and_then(|n| n.frame)
    }

    /// Frame in the coordinate space of the root's parent
    ///
    /// `None` if the node or one of its ancestors has not been laid out.
    pub fn absolute_frame(&self, id: NodeId) -> Option<Frame> {
        let mut frame = self.frame(id)?;
        for ancestor in self.ancestors(id) {
            let outer = self.frame(ancestor)?;
            frame = frame.translate(outer.left, outer.top);
        }
        Some(frame)
    }

    /// Deepest laid-out node under `root` containing the point
    pub fn hit_test(&self, root: NodeId, x: i32, y: i32) -> Option<NodeId> {
        let origin = match self.parent(root) {
            Some(parent) => self.absolute_frame(parent)?,
            None => Frame::ZERO,
        };
        self.hit_test_node(root, origin.left, origin.top, x, y)
    }

    fn hit_test_node(&self, id: NodeId, dx: i32, dy: i32, x: i32, y: i32) -> Option<NodeId> {
        let frame = self.frame(id)?.translate(dx, dy);
        if !self.node(id).style.is_displayed() || !frame.contains(x, y) {
            return None;
        }

        // Later children paint on top
        for &child in self.children(id).iter().rev() {
            if let Some(hit) = self.hit_test_node(child, frame.left, frame.top, x, y) {
                return Some(hit);
            }
        }

        Some(id)
    }

    fn check(&self, id: NodeId) -> Result<(), TreeError> {
        if self.contains(id) { Ok(()) } else { Err(TreeError::NodeNotFound(id)) }
    }

    // Pass-internal accessors; ids come from the tree itself.

    pub(crate) fn node(&self, id: NodeId) -> &LayoutNode {
        &self.nodes[id.0]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut LayoutNode {
        &mut self.nodes[id.0]
    }
}

/// Iterator over the ancestors of a node
pub struct Ancestors<'a> {
    tree: &'a LayoutTree,
    current: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.parent(id);
        Some(id)
    }
}
