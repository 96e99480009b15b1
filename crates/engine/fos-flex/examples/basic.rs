//! Lay out a small app shell and print every frame
//!
//! Run with `RUST_LOG=fos_flex=debug` to see the passes.

use fos_flex::{
    AlignItems, Config, Edges, FlexDirection, JustifyContent, LayoutEngine, LayoutTree, NodeId,
    Position, Size, SizeConstraint, Style,
};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut tree = LayoutTree::new();
    let root = tree.create_node(Style {
        direction: FlexDirection::Column,
        ..Default::default()
    });

    let header = tree.create_node(Style {
        height: Some(48),
        justify_content: JustifyContent::SpaceBetween,
        align_items: AlignItems::Center,
        padding: Edges::new(0, 16, 0, 16),
        ..Default::default()
    });
    let title = tree.create_leaf(Style::default(), |_w: SizeConstraint, _h: SizeConstraint| Size::new(120, 20));
    let menu = tree.create_node(Style { width: Some(24), height: Some(24), ..Default::default() });

    let body = tree.create_node(Style { flex: 1.0, ..Default::default() });
    let sidebar = tree.create_node(Style { width: Some(200), ..Default::default() });
    let content = tree.create_node(Style {
        flex: 1.0,
        padding: Edges::all(12),
        ..Default::default()
    });

    let toast = tree.create_node(Style {
        position: Position::Fixed,
        right: Some(16),
        bottom: Some(16),
        width: Some(240),
        height: Some(56),
        ..Default::default()
    });

    tree.append_child(root, header)?;
    tree.append_child(header, title)?;
    tree.append_child(header, menu)?;
    tree.append_child(root, body)?;
    tree.append_child(body, sidebar)?;
    tree.append_child(body, content)?;
    tree.append_child(root, toast)?;

    let engine = LayoutEngine::new(Config::default().with_viewport(1024, 768));
    let size = engine.compute(&mut tree, root)?;
    println!("root {}x{}", size.width, size.height);

    print_tree(&tree, root, 0);
    Ok(())
}

fn print_tree(tree: &LayoutTree, id: NodeId, depth: usize) {
    if let Some(frame) = tree.absolute_frame(id) {
        println!(
            "{:indent$}{} ({}, {}) {}x{}",
            "",
            id,
            frame.left,
            frame.top,
            frame.width(),
            frame.height(),
            indent = depth * 2
        );
    }
    for &child in tree.children(id) {
        print_tree(tree, child, depth + 1);
    }
}
