//! Errors raised while reading records

use thiserror::Error;

use crate::model::Word;

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("record is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("record is empty")]
    Empty,
}

/// Parse one record file's contents.
pub fn parse_record(json: &str) -> Result<Word, RecordError> {
    if json.trim().is_empty() {
        return Err(RecordError::Empty);
    }
    Ok(serde_json::from_str(json)?)
}
