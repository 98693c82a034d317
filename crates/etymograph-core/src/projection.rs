//! Graph projection: depth-row layout and structural edges

use std::collections::{BTreeMap, HashMap, HashSet};

use petgraph::stable_graph::NodeIndex;

use crate::model::*;
use crate::tree::ShadowTree;

/// Project with the default spacing.
pub fn project(root: &Word) -> Projection {
    project_with(root, &LayoutConfig::default())
}

/// Lay out every tree position and connect each parent to its children.
///
/// Nodes at depth `d` sit at `y = d * V`; a row of `n` nodes is centred on
/// `x = 0` with `H` between neighbours. Nodes are emitted row by row.
pub fn project_with(root: &Word, layout: &LayoutConfig) -> Projection {
    let tree = ShadowTree::build(root, layout.max_depth);

    let mut rows: BTreeMap<usize, Vec<NodeIndex>> = BTreeMap::new();
    for idx in tree.preorder() {
        if let Some(node) = tree.node(idx) {
            rows.entry(node.depth).or_default().push(idx);
        }
    }

    let mut ids: HashMap<NodeIndex, NodeId> = HashMap::with_capacity(tree.node_count());
    let mut nodes = Vec::with_capacity(tree.node_count());

    for (&depth, row) in &rows {
        let centre = (row.len() as f64 - 1.0) / 2.0;
        for (index, &idx) in row.iter().enumerate() {
            let Some(node) = tree.node(idx) else { continue };
            let id = if idx == tree.root() {
                NodeId::main()
            } else {
                NodeId::at(&node.word.word, depth, index)
            };
            ids.insert(idx, id.clone());
            nodes.push(ProjectedNode {
                id,
                depth,
                index,
                x: (index as f64 - centre) * layout.horizontal_spacing,
                y: depth as f64 * layout.vertical_spacing,
                data: node.word.clone(),
            });
        }
    }

    let mut seen: HashSet<(NodeId, NodeId)> = HashSet::new();
    let mut edges = Vec::new();
    for (parent, child, kind) in tree.links() {
        let (Some(source), Some(target)) = (ids.get(&parent), ids.get(&child)) else {
            continue;
        };
        if !seen.insert((source.clone(), target.clone())) {
            tracing::debug!("Skipping duplicate edge {} -> {}", source, target);
            continue;
        }
        edges.push(ProjectedEdge {
            id: EdgeId::between(source, target),
            source: source.clone(),
            target: target.clone(),
            kind,
        });
    }

    tracing::debug!(
        "Projected '{}': {} nodes, {} edges",
        root.word,
        nodes.len(),
        edges.len()
    );

    Projection { nodes, edges }
}
