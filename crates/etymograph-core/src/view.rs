//! Everything a renderer needs for one searched word

use serde::Serialize;

use crate::flatten::flatten_with;
use crate::model::{LayoutConfig, Projection, Word};
use crate::projection::project_with;
use crate::timeline::{TimelineEntry, timeline_with};

/// Flattened list, timeline and diagram for a found record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordView {
    pub root: Word,
    pub flattened: Vec<Word>,
    pub timeline: Vec<TimelineEntry>,
    pub graph: Projection,
}

impl WordView {
    pub fn build(root: Word, layout: &LayoutConfig) -> Self {
        let flattened = flatten_with(&root, layout.max_depth).into_iter().cloned().collect();
        let timeline = timeline_with(&root, layout.max_depth);
        let graph = project_with(&root, layout);
        WordView {
            root,
            flattened,
            timeline,
            graph,
        }
    }
}

/// Result of looking a word up. A miss is an ordinary state, not an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ViewState {
    Found { view: Box<WordView> },
    NotFound { query: String },
}

impl ViewState {
    pub fn from_lookup(query: &str, record: Option<Word>, layout: &LayoutConfig) -> Self {
        match record {
            Some(root) => ViewState::Found {
                view: Box::new(WordView::build(root, layout)),
            },
            None => {
                tracing::debug!("No record for '{}'", query);
                ViewState::NotFound {
                    query: query.to_string(),
                }
            }
        }
    }

    pub fn view(&self) -> Option<&WordView> {
        match self {
            ViewState::Found { view } => Some(view.as_ref()),
            ViewState::NotFound { .. } => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, ViewState::Found { .. })
    }
}
