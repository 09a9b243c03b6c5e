//! Arena-backed parse tree.
//!
//! Nodes are stored flat and refer to each other by index, so the tree can
//! be built and pruned during recovery without any cyclic ownership. The
//! renderer walks children in insertion order, which is grammar order.

use serde::{Deserialize, Serialize};

pub type NodeId = usize;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Node {
    label: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParseTree {
    nodes: Vec<Node>,
    root: Option<NodeId>,
}

impl ParseTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node under `parent` (or as the root) and return its id.
    pub fn add(&mut self, parent: Option<NodeId>, label: impl ToString) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Node {
            label: label.to_string(),
            parent,
            children: vec![],
        });

        match parent {
            Some(parent) => self.nodes[parent].children.push(id),
            None if self.root.is_none() => self.root = Some(id),
            None => {}
        }

        id
    }

    /// Detach a node (and thereby its subtree) from the tree.
    pub fn remove(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes[id].parent {
            self.nodes[parent].children.retain(|child| *child != id);
        } else if self.root == Some(id) {
            self.root = None;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn root_label(&self) -> Option<&str> {
        self.root.map(|id| self.nodes[id].label.as_str())
    }

    /// Leaf labels in depth-first order.
    pub fn leaves(&self) -> Vec<&str> {
        let mut leaves = vec![];
        if let Some(root) = self.root {
            self.collect_leaves(root, &mut leaves);
        }
        leaves
    }

    fn collect_leaves<'a>(&'a self, id: NodeId, leaves: &mut Vec<&'a str>) {
        let node = &self.nodes[id];
        if node.children.is_empty() {
            leaves.push(node.label.as_str());
        }
        for child in &node.children {
            self.collect_leaves(*child, leaves);
        }
    }

    /// Render the tree as indented text, one node per line.
    pub fn render(&self) -> String {
        let Some(root) = self.root else {
            return String::new();
        };

        let mut out = String::new();
        out.push_str(&self.nodes[root].label);
        out.push('\n');
        self.render_children(root, "", &mut out);
        out
    }

    fn render_children(&self, id: NodeId, prefix: &str, out: &mut String) {
        let children = &self.nodes[id].children;
        for (position, child) in children.iter().enumerate() {
            let last = position + 1 == children.len();
            out.push_str(prefix);
            out.push_str(if last { "└── " } else { "├── " });
            out.push_str(&self.nodes[*child].label);
            out.push('\n');

            let deeper = format!("{prefix}{}", if last { "    " } else { "│   " });
            self.render_children(*child, &deeper, out);
        }
    }
}
