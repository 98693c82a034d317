//! Shadow tree over a record using petgraph::StableDiGraph
//!
//! Every tree position gets its own arena index at construction time, so
//! parent/child bookkeeping never goes through the surface word. Two entries
//! spelled "mundus" are two nodes with two parents.

use crate::model::{LinkKind, Word};
use petgraph::Direction;
use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use petgraph::visit::EdgeRef;

/// One position in the shadow tree.
#[derive(Debug, Clone, Copy)]
pub struct TreeNode<'a> {
    pub word: &'a Word,
    pub depth: usize,
}

/// Hierarchy built from a record's chain and roots.
pub struct ShadowTree<'a> {
    inner: StableDiGraph<TreeNode<'a>, LinkKind>,
    root: NodeIndex,
    truncated: bool,
}

impl std::fmt::Debug for ShadowTree<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShadowTree")
            .field("root", &self.inner[self.root].word.word)
            .field("node_count", &self.inner.node_count())
            .field("truncated", &self.truncated)
            .finish()
    }
}

impl<'a> ShadowTree<'a> {
    /// Build the hierarchy: depth 1 holds the chain entries followed by the
    /// roots, and every node below continues through its own `roots`.
    /// `etymology` on anything but the top record is ignored.
    pub fn build(record: &'a Word, max_depth: usize) -> Self {
        let mut inner = StableDiGraph::new();
        let root = inner.add_node(TreeNode { word: record, depth: 0 });
        let mut tree = ShadowTree {
            inner,
            root,
            truncated: false,
        };

        if max_depth == 0 {
            tree.truncated = !record.chain().is_empty() || !record.roots.is_empty();
            return tree;
        }

        for entry in record.chain() {
            let child = tree.attach(root, entry, 1, LinkKind::Chain);
            tree.attach_roots(child, &entry.roots, 2, max_depth);
        }
        tree.attach_roots(root, &record.roots, 1, max_depth);

        if tree.truncated {
            tracing::warn!(
                "Etymology tree for '{}' exceeds depth {}; deeper roots skipped",
                record.word,
                max_depth
            );
        }
        tree
    }

    fn attach(&mut self, parent: NodeIndex, word: &'a Word, depth: usize, kind: LinkKind) -> NodeIndex {
        let child = self.inner.add_node(TreeNode { word, depth });
        self.inner.add_edge(parent, child, kind);
        child
    }

    fn attach_roots(&mut self, parent: NodeIndex, entries: &'a [Word], depth: usize, max_depth: usize) {
        if entries.is_empty() {
            return;
        }
        if depth > max_depth {
            self.truncated = true;
            return;
        }
        for entry in entries {
            let child = self.attach(parent, entry, depth, LinkKind::Root);
            self.attach_roots(child, &entry.roots, depth + 1, max_depth);
        }
    }

    /// Arena index of the searched record.
    pub fn root(&self) -> NodeIndex {
        self.root
    }

    pub fn node(&self, idx: NodeIndex) -> Option<&TreeNode<'a>> {
        self.inner.node_weight(idx)
    }

    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    /// Whether the depth guard dropped any part of the record.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Children of a node in authored order.
    pub fn children(&self, idx: NodeIndex) -> Vec<(NodeIndex, LinkKind)> {
        let mut out: Vec<_> = self
            .inner
            .edges_directed(idx, Direction::Outgoing)
            .map(|e| (e.id(), e.target(), *e.weight()))
            .collect();
        // adjacency lists are newest-first
        out.sort_by_key(|(edge, _, _)| *edge);
        out.into_iter().map(|(_, target, kind)| (target, kind)).collect()
    }

    /// Immediate parent by arena index; `None` for the root.
    pub fn parent(&self, idx: NodeIndex) -> Option<NodeIndex> {
        self.inner
            .edges_directed(idx, Direction::Incoming)
            .next()
            .map(|e| e.source())
    }

    /// Pre-order (depth-first) walk from the root.
    pub fn preorder(&self) -> Vec<NodeIndex> {
        let mut order = Vec::with_capacity(self.inner.node_count());
        let mut stack = vec![self.root];
        while let Some(current) = stack.pop() {
            order.push(current);
            for (child, _) in self.children(current).into_iter().rev() {
                stack.push(child);
            }
        }
        order
    }

    /// Every parent → child link in the order it was built.
    pub fn links(&self) -> impl Iterator<Item = (NodeIndex, NodeIndex, LinkKind)> + '_ {
        self.inner.edge_indices().filter_map(move |e| {
            let (source, target) = self.inner.edge_endpoints(e)?;
            Some((source, target, self.inner[e]))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Word {
        Word::new("world", "English")
            .with_etymology(vec![Word::new("weorold", "Old English")])
            .with_roots(vec![
                Word::new("wer", "Proto-Germanic").with_roots(vec![Word::new("wiHrós", "Proto-Indo-European")]),
                Word::new("ald", "Proto-Germanic"),
            ])
    }

    #[test]
    fn test_chain_precedes_roots_at_depth_one() {
        let record = sample();
        let tree = ShadowTree::build(&record, 8);
        let words: Vec<_> = tree
            .children(tree.root())
            .into_iter()
            .map(|(idx, kind)| (tree.node(idx).unwrap().word.word.as_str(), kind))
            .collect();
        assert_eq!(
            words,
            vec![
                ("weorold", LinkKind::Chain),
                ("wer", LinkKind::Root),
                ("ald", LinkKind::Root),
            ]
        );
    }

    #[test]
    fn test_preorder_and_parents() {
        let record = sample();
        let tree = ShadowTree::build(&record, 8);
        let order: Vec<_> = tree
            .preorder()
            .into_iter()
            .map(|idx| tree.node(idx).unwrap().word.word.clone())
            .collect();
        assert_eq!(order, vec!["world", "weorold", "wer", "wiHrós", "ald"]);

        let pie = tree.preorder()[3];
        let parent = tree.parent(pie).unwrap();
        assert_eq!(tree.node(parent).unwrap().word.word, "wer");
        assert_eq!(tree.node(pie).unwrap().depth, 2);
        assert!(tree.parent(tree.root()).is_none());
    }

    #[test]
    fn test_depth_guard_truncates() {
        let record = sample();
        let tree = ShadowTree::build(&record, 1);
        assert!(tree.is_truncated());
        // root + weorold + wer + ald
        assert_eq!(tree.node_count(), 4);
    }

    #[test]
    fn test_nested_etymology_is_ignored() {
        let record = Word::new("a", "English").with_roots(vec![
            Word::new("b", "Latin").with_etymology(vec![Word::new("c", "Greek")]),
        ]);
        let tree = ShadowTree::build(&record, 8);
        assert_eq!(tree.node_count(), 2);
        assert_eq!(tree.links().count(), 1);
    }
}
