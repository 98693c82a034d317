//! Etymograph Core: etymology tree model, flattening, and graph projection

pub mod model;
pub mod tree;
pub mod flatten;
pub mod projection;
pub mod validate;
pub mod timeline;
pub mod view;
pub mod error;


#[cfg(test)]
pub mod test_utils;

pub use model::{Word, Origin, LinkKind, NodeId, EdgeId, ProjectedNode, ProjectedEdge, Projection, LayoutConfig, MAIN_NODE_ID, MAX_TREE_DEPTH, HORIZONTAL_SPACING, VERTICAL_SPACING};
pub use tree::{ShadowTree, TreeNode};
pub use flatten::{FlatEntry, flatten, flatten_entries, flatten_entries_with, flatten_with};
pub use projection::{project, project_with};
pub use validate::{Severity, ValidationIssue, is_well_formed, validate};
pub use timeline::{TimelineEntry, timeline, timeline_with, chronological, format_year};
pub use view::{ViewState, WordView};
pub use error::{RecordError, parse_record};
