//! Errors
//!
//! The layout algorithm itself cannot fail; bad lengths are clamped. These
//! errors only report misuse of the tree and engine APIs.

use crate::NodeId;

/// Tree mutation error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("Node {child} is already a child of {parent}")]
    AlreadyAttached { child: NodeId, parent: NodeId },

    #[error("Appending {child} to {parent} would create a cycle")]
    WouldCycle { parent: NodeId, child: NodeId },

    #[error("Node {child} is not a child of {parent}")]
    NotAChild { parent: NodeId, child: NodeId },
}

/// Layout pass error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("Node {0} has not been measured")]
    NotMeasured(NodeId),

    #[error("Tree error: {0}")]
    Tree(#[from] TreeError),
}
