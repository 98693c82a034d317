//! Core data structures for etymology records and their projections

use serde::{Deserialize, Deserializer, Serialize};

/// Identity of the searched word in every projection.
pub const MAIN_NODE_ID: &str = "main";

/// Default horizontal distance between neighbours in a row.
pub const HORIZONTAL_SPACING: f64 = 200.0;

/// Default vertical distance between depth rows.
pub const VERTICAL_SPACING: f64 = 150.0;

/// Traversal stops below this depth. Authored data stays around 4.
pub const MAX_TREE_DEPTH: usize = 64;

/// A word form and its ancestry.
///
/// `etymology` is the linear chain of intermediate borrowings and is only
/// meaningful on the searched (top-level) record. `roots` is the branching
/// decomposition and may recurse to any depth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    #[serde(default)]
    pub word: String,
    #[serde(default)]
    pub language: String,
    /// Positive = CE, negative = BCE.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub roots: Vec<Word>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub etymology: Option<Vec<Word>>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Word>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Vec<Word>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl Word {
    pub fn new(word: impl Into<String>, language: impl Into<String>) -> Self {
        Word {
            word: word.into(),
            language: language.into(),
            year: None,
            definition: None,
            roots: Vec::new(),
            etymology: None,
        }
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn with_definition(mut self, definition: impl Into<String>) -> Self {
        self.definition = Some(definition.into());
        self
    }

    pub fn with_roots(mut self, roots: Vec<Word>) -> Self {
        self.roots = roots;
        self
    }

    pub fn with_etymology(mut self, chain: Vec<Word>) -> Self {
        self.etymology = Some(chain);
        self
    }

    /// Lower-cased surface form used for file names and lookups.
    pub fn lookup_key(&self) -> String {
        self.word.to_lowercase()
    }

    /// The etymology chain, empty when absent.
    pub fn chain(&self) -> &[Word] {
        self.etymology.as_deref().unwrap_or_default()
    }

    /// Condensed gloss: the first sentence of the definition, capped at 50 chars.
    pub fn short_meaning(&self) -> Option<String> {
        let definition = self.definition.as_deref()?.trim();
        let first = definition.split('.').next().unwrap_or_default().trim();
        if first.is_empty() {
            return None;
        }
        if first.chars().count() > 50 {
            let cut: String = first.chars().take(47).collect();
            Some(format!("{}...", cut))
        } else {
            Some(first.to_string())
        }
    }
}

/// Where a flattened entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    /// The searched record itself.
    Searched,
    /// An entry of the root's etymology chain.
    Chain,
    /// A node of the roots tree.
    Root,
}

/// Structural relationship an edge stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
    /// Searched word → chain entry.
    Chain,
    /// Parent → morphological root.
    Root,
}

/// Identity of a projected node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
    pub fn main() -> Self {
        NodeId(MAIN_NODE_ID.to_string())
    }

    /// Identity of a non-root node. Depth and index are always the last two
    /// `-` separated segments, so distinct positions never collide.
    pub fn at(word: &str, depth: usize, index: usize) -> Self {
        NodeId(format!("{}-{}-{}", word, depth, index))
    }

    pub fn is_main(&self) -> bool {
        self.0 == MAIN_NODE_ID
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identity of a projected edge (source + target composite).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeId(pub String);

impl EdgeId {
    pub fn between(source: &NodeId, target: &NodeId) -> Self {
        EdgeId(format!("{}-{}", source, target))
    }
}

/// A positioned node in the diagram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectedNode {
    pub id: NodeId,
    pub depth: usize,
    /// Left-to-right position within its depth row.
    pub index: usize,
    pub x: f64,
    pub y: f64,
    pub data: Word,
}

/// A directed parent → child edge in the diagram.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectedEdge {
    pub id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,
    pub kind: LinkKind,
}

/// Nodes and edges ready for a node-link renderer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub nodes: Vec<ProjectedNode>,
    pub edges: Vec<ProjectedEdge>,
}

impl Projection {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: &NodeId) -> Option<&ProjectedNode> {
        self.nodes.iter().find(|n| &n.id == id)
    }

    /// The searched word's node, absent only for an empty projection.
    pub fn main(&self) -> Option<&ProjectedNode> {
        self.nodes.iter().find(|n| n.id.is_main())
    }

    pub fn row(&self, depth: usize) -> impl Iterator<Item = &ProjectedNode> {
        self.nodes.iter().filter(move |n| n.depth == depth)
    }

    pub fn edges_from<'a>(&'a self, source: &'a NodeId) -> impl Iterator<Item = &'a ProjectedEdge> {
        self.edges.iter().filter(move |e| &e.source == source)
    }
}

/// Spacing and traversal limits for projection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub horizontal_spacing: f64,
    pub vertical_spacing: f64,
    pub max_depth: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            horizontal_spacing: HORIZONTAL_SPACING,
            vertical_spacing: VERTICAL_SPACING,
            max_depth: MAX_TREE_DEPTH,
        }
    }
}
