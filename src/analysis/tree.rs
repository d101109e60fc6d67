// Plain-text rendering of a scanned tree

use crate::analysis::scanner::DirectoryNode;

const INDENT: &str = "  ";

/// Render the children of `root` as an indented listing.
///
/// Pre-order, two spaces per level, directories suffixed with `/`. The root
/// itself is not printed, so an empty directory renders as an empty string.
pub fn render_tree(root: &DirectoryNode) -> String {
    let mut out = String::new();
    for child in root.children() {
        render_node(child, 0, &mut out);
    }
    out
}

fn render_node(node: &DirectoryNode, level: usize, out: &mut String) {
    out.push_str(&INDENT.repeat(level));
    out.push_str(node.name());
    match node {
        DirectoryNode::Directory { children, .. } => {
            out.push_str("/\n");
            for child in children {
                render_node(child, level + 1, out);
            }
        }
        DirectoryNode::File { .. } => out.push('\n'),
    }
}
