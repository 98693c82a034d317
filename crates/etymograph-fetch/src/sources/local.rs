//! Records read from a checkout of the data repository

use std::io::ErrorKind;
use std::path::PathBuf;

use etymograph_core::{Word, parse_record};

use crate::path::local_record_path;
use crate::source::{FetchError, WordSource};

pub struct LocalSource {
    data_dir: PathBuf,
    languages: Vec<String>,
}

impl LocalSource {
    pub fn new(data_dir: impl Into<PathBuf>, languages: Vec<String>) -> Self {
        Self {
            data_dir: data_dir.into(),
            languages,
        }
    }
}

#[async_trait::async_trait]
impl WordSource for LocalSource {
    async fn fetch_root(&self, term: &str) -> Result<Option<Word>, FetchError> {
        for language in &self.languages {
            let Some(path) = local_record_path(&self.data_dir, language, term) else {
                continue;
            };
            let read = tokio::fs::read_to_string(&path).await;
            match read {
                Ok(json) => {
                    tracing::debug!("Read {}", path.display());
                    return parse_record(&json).map(Some).map_err(|source| FetchError::Parse {
                        location: path.display().to_string(),
                        source,
                    });
                }
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(source) => return Err(FetchError::Io { path, source }),
            }
        }
        Ok(None)
    }

    fn name(&self) -> &str {
        "local"
    }
}
