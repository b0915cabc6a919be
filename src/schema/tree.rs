//! Arena-backed parse trees.
//!
//! All trees built from one line share a single `ParseForest`. Nodes refer
//! to each other by `NodeId`, so the parent back-reference never owns
//! anything.

use serde::{Deserialize, Serialize};

use super::token::ParseToken;

/// Index of a node inside its `ParseForest`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub usize);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub token: ParseToken,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

/// The trees produced from one line of notation, in root order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParseForest {
    nodes: Vec<Node>,
    roots: Vec<NodeId>,
}

impl ParseForest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new tree rooted at `token`.
    pub fn add_root(&mut self, token: ParseToken) -> NodeId {
        let id = self.push(token, None);
        self.roots.push(id);
        id
    }

    /// Append `token` as the last child of `parent`.
    pub fn add_child(&mut self, parent: NodeId, token: ParseToken) -> NodeId {
        let id = self.push(token, Some(parent));
        self.nodes[parent.0].children.push(id);
        id
    }

    fn push(&mut self, token: ParseToken, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            token,
            parent,
            children: Vec::new(),
        });
        id
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn token(&self, id: NodeId) -> &ParseToken {
        &self.nodes[id.0].token
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// Direct children of `id`, in insertion order.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Direct children of `id` whose type matches `kind`.
    pub fn find_direct(&self, id: NodeId, kind: &str) -> Vec<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .filter(|&child| self.token(child).is_type(kind))
            .collect()
    }

    /// Every descendant of `id` whose type matches `kind`, depth-first in
    /// pre-order. `id` itself is never included.
    pub fn find_all(&self, id: NodeId, kind: &str) -> Vec<NodeId> {
        let mut matches = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            if self.token(current).is_type(kind) {
                matches.push(current);
            }
            stack.extend(self.children(current).iter().rev().copied());
        }
        matches
    }

    /// Tab-indented dump of the tree under `root`, one token per line.
    pub fn render(&self, root: NodeId) -> String {
        let mut out = String::new();
        let mut stack = vec![(root, 0usize)];
        while let Some((current, depth)) = stack.pop() {
            for _ in 0..depth {
                out.push('\t');
            }
            out.push_str(&self.token(current).to_string());
            out.push('\n');
            for &child in self.children(current).iter().rev() {
                stack.push((child, depth + 1));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (ParseForest, NodeId) {
        let mut forest = ParseForest::new();
        let buy = forest.add_root(ParseToken::new("Buy").with_id("a"));
        let object = forest.add_child(buy, ParseToken::new("Object").with_parent("a").with_id("o"));
        let item = forest.add_child(object, ParseToken::new("Item").with_parent("o").with_id("i"));
        forest.add_child(item, ParseToken::new("Name").with_parent("i").with_value("Sword"));
        forest.add_child(buy, ParseToken::new("Object").with_parent("a").with_id("p"));
        (forest, buy)
    }

    #[test]
    fn parent_links_point_upward() {
        let (forest, buy) = sample();
        let object = forest.children(buy)[0];
        assert_eq!(forest.parent(object), Some(buy));
        assert_eq!(forest.parent(buy), None);
        assert_eq!(forest.roots(), &[buy]);
    }

    #[test]
    fn find_direct_only_looks_one_level() {
        let (forest, buy) = sample();
        assert_eq!(forest.find_direct(buy, "object").len(), 2);
        assert!(forest.find_direct(buy, "item").is_empty());
    }

    #[test]
    fn find_all_is_preorder() {
        let (forest, buy) = sample();
        let objects = forest.find_all(buy, "OBJECT");
        assert_eq!(objects.len(), 2);
        assert_eq!(forest.token(objects[0]).id.as_deref(), Some("o"));
        assert_eq!(forest.token(objects[1]).id.as_deref(), Some("p"));
        assert_eq!(forest.find_all(buy, "name").len(), 1);
        assert!(forest.find_all(buy, "buy").is_empty());
    }

    #[test]
    fn render_indents_by_depth() {
        let (forest, buy) = sample();
        let dump = forest.render(buy);
        let lines: Vec<&str> = dump.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("{ Type: Buy"));
        assert!(lines[1].starts_with("\t{ Type: Object"));
        assert!(lines[3].starts_with("\t\t\t{ Type: Name"));
        assert!(lines[4].starts_with("\t{ Type: Object, ID: p"));
    }
}
