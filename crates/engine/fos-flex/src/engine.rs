//! Layout Engine - entry points for the measure and layout passes

use crate::measure::measure_node;
use crate::position::{layout_node, SubtreeState};
use crate::{Config, Frame, LayoutError, LayoutTree, NodeId, Size, SizeConstraint};

/// Runs the two layout passes over a [`LayoutTree`]
#[derive(Debug, Clone, Default)]
pub struct LayoutEngine {
    config: Config,
}

impl LayoutEngine {
    /// Create a new engine with the given configuration
    pub fn new(config: Config) -> Self {
        tracing::info!(
            "fOS Flex {} initialized (viewport {}x{})",
            crate::VERSION,
            config.viewport.width,
            config.viewport.height
        );
        Self { config }
    }

    /// Get engine configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Measure pass: size `node` and its subtree against the given constraints
    ///
    /// Every node in the subtree caches its measured size, which the layout
    /// pass reads back.
    pub fn measure(
        &self,
        tree: &mut LayoutTree,
        node: NodeId,
        width: SizeConstraint,
        height: SizeConstraint,
    ) -> Result<Size, LayoutError> {
        if !tree.contains(node) {
            return Err(LayoutError::NodeNotFound(node));
        }
        Ok(measure_node(tree, node, width, height, &self.config))
    }

    /// Layout pass: place `node` at `frame` and position its subtree
    ///
    /// `node` must have been measured since its last invalidation.
    pub fn layout(&self, tree: &mut LayoutTree, node: NodeId, frame: Frame) -> Result<(), LayoutError> {
        let measured = tree
            .get(node)
            .ok_or(LayoutError::NodeNotFound(node))?
            .measured_size();
        if measured.is_none() {
            return Err(LayoutError::NotMeasured(node));
        }

        layout_node(tree, node, frame, SubtreeState::Displayed, &self.config);
        Ok(())
    }

    /// Measure `node` to exactly fill the viewport, then lay it out at the origin
    pub fn compute(&self, tree: &mut LayoutTree, node: NodeId) -> Result<Size, LayoutError> {
        let viewport = self.config.viewport;
        let size = self.measure(
            tree,
            node,
            SizeConstraint::exactly(viewport.width),
            SizeConstraint::exactly(viewport.height),
        )?;
        self.layout(tree, node, Frame::from_size(size))?;

        tracing::info!("Layout complete: {} nodes", subtree_len(tree, node));
        Ok(size)
    }
}

fn subtree_len(tree: &LayoutTree, node: NodeId) -> usize {
    let mut count = 0;
    let mut stack = vec![node];
    while let Some(id) = stack.pop() {
        count += 1;
        stack.extend_from_slice(tree.children(id));
    }
    count
}
