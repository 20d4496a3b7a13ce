//! Render marker-indented outlines as directory trees.
//!
//! Each non-blank line of the input is one entry. The first line names the
//! root; every later line is nested by the number of markers (`>` by
//! default) it contains:
//!
//! ```
//! let tree = unifout_structure::render("app\n> src\n>> main.rs\n> Cargo.toml\n");
//! assert_eq!(tree, "app\n├── Cargo.toml\n└── src\n    └── main.rs");
//! ```
//!
//! Siblings are sorted by name. A name declared twice under the same parent
//! keeps only the later subtree.

pub mod config;

use std::collections::BTreeMap;
use std::io::{self, BufRead, Read};

use thiserror::Error;
use tracing::{debug, trace};

pub use config::{Config, TreeStyle};

#[derive(Debug, Error)]
pub enum StructureError {
    #[error("failed to read outline: {0}")]
    Io(#[from] io::Error),
}

pub type StructureResult<T> = Result<T, StructureError>;

/// A node's children, ordered by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Node {
    pub children: BTreeMap<String, Node>,
}

/// A parsed outline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree {
    pub root: String,
    pub node: Node,
}

impl Tree {
    /// Parses an outline. Returns `None` when it has no non-blank lines.
    pub fn parse(input: &str, marker: char) -> Option<Tree> {
        let mut lines = input.lines().map(str::trim).filter(|l| !l.is_empty());
        let root = lines.next()?.to_string();
        let mut node = Node::default();

        // Path of (depth, child name) from the root to the last attached node.
        let mut path: Vec<(usize, String)> = Vec::new();
        let mut open = true;
        for line in lines {
            let depth = line.matches(marker).count();
            let name = line.trim_start_matches(marker).trim();

            while path.last().is_some_and(|(d, _)| *d >= depth) {
                path.pop();
            }
            // Depth 0 reaches past the root, and nothing attaches after that.
            if depth == 0 {
                open = false;
            }
            if !open {
                trace!(line, "dropping entry outside the root");
                continue;
            }

            let parent = path
                .iter()
                .fold(&mut node, |n, (_, key)| n.children.entry(key.clone()).or_default());
            parent.children.insert(name.to_string(), Node::default());
            path.push((depth, name.to_string()));
        }

        Some(Tree { root, node })
    }

    /// Draws the tree, one entry per line, without a trailing newline.
    pub fn render(&self, style: TreeStyle) -> String {
        let mut lines = vec![self.root.clone()];
        draw(&self.node, "", style, &mut lines);
        lines.join("\n")
    }
}

fn draw(node: &Node, prefix: &str, style: TreeStyle, lines: &mut Vec<String>) {
    let count = node.children.len();
    for (i, (name, child)) in node.children.iter().enumerate() {
        let last = i + 1 == count;
        let (connector, indent) = if last {
            (style.last_branch(), style.blank())
        } else {
            (style.branch(), style.pipe())
        };
        lines.push(format!("{prefix}{connector}{name}"));
        draw(child, &format!("{prefix}{indent}"), style, lines);
    }
}

/// Renders an outline with the default configuration.
pub fn render(input: &str) -> String {
    render_with_config(input, &Config::default())
}

/// Renders an outline. Empty input renders as the empty string.
pub fn render_with_config(input: &str, config: &Config) -> String {
    match Tree::parse(input, config.marker) {
        Some(tree) => {
            debug!(root = %tree.root, entries = tree.node.children.len(), "rendering outline");
            tree.render(config.style)
        }
        None => String::new(),
    }
}

/// Reads an outline to the end and renders it.
pub fn render_reader<R: BufRead>(mut reader: R, config: &Config) -> StructureResult<String> {
    let mut input = String::new();
    reader.read_to_string(&mut input)?;
    Ok(render_with_config(&input, config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nesting() {
        let tree = Tree::parse("root\n> a\n>> b\n> c", '>').unwrap();
        assert_eq!(tree.root, "root");
        let a = &tree.node.children["a"];
        assert!(a.children.contains_key("b"));
        assert!(tree.node.children["c"].children.is_empty());
    }

    #[test]
    fn test_blank_input() {
        assert_eq!(Tree::parse("\n  \n\t\n", '>'), None);
        assert_eq!(render(""), "");
    }

    #[test]
    fn test_skipped_depth_attaches_to_nearest_shallower() {
        let tree = Tree::parse("root\n> a\n>>> deep\n>> b", '>').unwrap();
        let a = &tree.node.children["a"];
        assert_eq!(a.children.keys().collect::<Vec<_>>(), ["b", "deep"]);
    }

    #[test]
    fn test_redeclared_name_replaces_subtree() {
        let tree = Tree::parse("root\n> a\n>> old\n> a\n>> new", '>').unwrap();
        let a = &tree.node.children["a"];
        assert_eq!(a.children.keys().collect::<Vec<_>>(), ["new"]);
    }
}
