//! fOS Flex
//!
//! Flexbox measure and layout core.
//!
//! Computes integer geometry for a tree of styled boxes in two passes:
//! - Measure: bottom-up, each node sized against width/height constraints
//! - Layout: top-down, each node given a frame relative to its parent
//!
//! Supported:
//! - Row and column flow, forward and reversed
//! - Single-line and wrapping containers (including wrap-reverse)
//! - `flex` grow factors, `order`, `justify-content`, `align-items`/`align-self`
//! - Margins, padding, uniform borders, min/max sizes
//! - `position: absolute` and `position: fixed`
//! - `display: none` subtrees collapsing to zero frames
//!
//! # Example
//! ```rust
//! use fos_flex::{Config, LayoutEngine, LayoutTree, Style, JustifyContent};
//!
//! let mut tree = LayoutTree::new();
//! let root = tree.create_node(Style {
//!     justify_content: JustifyContent::SpaceBetween,
//!     ..Default::default()
//! });
//! let item = tree.create_node(Style { width: Some(50), ..Default::default() });
//! tree.append_child(root, item)?;
//!
//! let engine = LayoutEngine::new(Config::default().with_viewport(300, 100));
//! engine.compute(&mut tree, root)?;
//! assert_eq!(tree.frame(item).map(|f| f.width()), Some(50));
//! # Ok::<(), fos_flex::LayoutError>(())
//! ```

mod axis;
mod config;
mod constraint;
mod engine;
mod error;
mod items;
mod lines;
mod measure;
mod out_of_flow;
mod position;
mod style;
mod tree;

pub use axis::Axis;
pub use config::Config;
pub use constraint::{dimension, MeasureMode, Size, SizeConstraint, UNDEFINED};
pub use engine::LayoutEngine;
pub use error::{LayoutError, TreeError};
pub use style::{
    AlignItems, Display, Edges, FlexDirection, FlexWrap, JustifyContent, Position, Style,
};
pub use tree::{Ancestors, Frame, LayoutNode, LayoutTree, Measure, NodeId};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
