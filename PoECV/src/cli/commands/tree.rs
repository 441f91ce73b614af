//! CLI commands for printing conversation trees and nodes

use crate::Viewer;
use crate::dialog::{DisplayNode, Jump};
use crate::error::Error;

/// Print the display tree of a conversation
pub fn print_tree(viewer: &mut Viewer, name: &str, json: bool) -> anyhow::Result<()> {
    let file = viewer.corpus().find(name)?.clone();
    let tree = viewer.build_display_tree(&file)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&tree)?);
        return Ok(());
    }

    println!("{}", tree.file);
    print_node_line(&tree.root, 0);
    eprintln!(
        "{} nodes, {} back-references",
        tree.count_expanded(),
        tree.count_references()
    );
    Ok(())
}

fn print_node_line(node: &DisplayNode, depth: usize) {
    let indent = "  ".repeat(depth);
    match &node.jump {
        Some(Jump::FirstOccurrence { node_id }) => println!("{indent}{} (see {node_id})", node.label),
        Some(Jump::Trigger { file, node_id }) => println!("{indent}{} -> {file}#{node_id}", node.label),
        None => println!("{indent}{}", node.label),
    }
    for child in &node.children {
        print_node_line(child, depth + 1);
    }
}

/// Print the path to a node and its detailed info
pub fn print_node(viewer: &mut Viewer, name: &str, node_id: i32) -> anyhow::Result<()> {
    let file = viewer.corpus().find(name)?.clone();
    let tree = viewer.build_display_tree(&file)?;

    let (Some(path), Some(node)) = (tree.path_to(node_id), tree.find_main(node_id)) else {
        return Err(Error::NodeNotFound {
            file: file.display,
            node_id,
        }
        .into());
    };

    println!("{}", path.join(" > "));
    println!();
    println!("{}", node.detail);
    Ok(())
}
