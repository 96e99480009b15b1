//! Child classification
//!
//! Each child is resolved once per pass into how it participates in its
//! container, so measure and layout never re-derive it from style fields.

use crate::{Display, LayoutTree, NodeId, Position, Style};

/// How a child participates in its container's layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ChildKind {
    /// Regular flex item
    InFlow,
    /// `display: none`; collapses to a zero box
    Hidden,
    /// `position: absolute`
    Absolute,
    /// `position: fixed`
    Fixed,
}

impl ChildKind {
    pub(crate) fn of(style: &Style) -> Self {
        if style.display == Display::None {
            return ChildKind::Hidden;
        }
        match style.position {
            Position::Relative => ChildKind::InFlow,
            Position::Absolute => ChildKind::Absolute,
            Position::Fixed => ChildKind::Fixed,
        }
    }
}

/// Children of one container, grouped by [`ChildKind`]
#[derive(Debug, Default)]
pub(crate) struct Classified {
    pub hidden: Vec<NodeId>,
    pub absolute: Vec<NodeId>,
    pub fixed: Vec<NodeId>,
    /// In-flow items, stably sorted by `order`
    pub in_flow: Vec<NodeId>,
}

pub(crate) fn classify(tree: &LayoutTree, container: NodeId) -> Classified {
    let mut out = Classified::default();
    for &child in tree.children(container) {
        match ChildKind::of(tree.node(child).style()) {
            ChildKind::InFlow => out.in_flow.push(child),
            ChildKind::Hidden => out.hidden.push(child),
            ChildKind::Absolute => out.absolute.push(child),
            ChildKind::Fixed => out.fixed.push(child),
        }
    }

    // sort_by_key is stable: equal `order` keeps tree order
    out.in_flow.sort_by_key(|&id| tree.node(id).style().order);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn styled(order: i32) -> Style {
        Style { order, ..Default::default() }
    }

    #[test]
    fn test_kind_hidden_wins_over_position() {
        let style = Style {
            display: Display::None,
            position: Position::Absolute,
            ..Default::default()
        };
        assert_eq!(ChildKind::of(&style), ChildKind::Hidden);
    }

    #[test]
    fn test_classify_sorts_stably() {
        let mut tree = LayoutTree::new();
        let root = tree.create_node(Style::default());
        let a = tree.create_node(styled(1));
        let b = tree.create_node(styled(0));
        let c = tree.create_node(styled(1));
        let d = tree.create_node(styled(-3));
        let abs = tree.create_node(Style { position: Position::Absolute, ..Default::default() });
        for id in [a, b, abs, c, d] {
            tree.append_child(root, id).unwrap();
        }

        let classified = classify(&tree, root);
        assert_eq!(classified.in_flow, vec![d, b, a, c]);
        assert_eq!(classified.absolute, vec![abs]);
        assert!(classified.hidden.is_empty());
        assert!(classified.fixed.is_empty());
    }
}
