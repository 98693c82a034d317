//! Fetch configuration: TOML file, then environment, then caller overrides

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default config file looked up in the working directory.
pub const CONFIG_FILE: &str = "etymograph.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: String, value: String },
}

/// Where records live and how to reach them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// GitHub account holding the data repository.
    pub owner: String,
    pub repo: String,
    pub branch: String,
    /// Directory of the record tree, relative to the repository root.
    pub data_path: String,
    /// Answer from the built-in samples when every other source misses.
    pub use_sample_fallback: bool,
    /// Language directories tried in order for a search term.
    pub languages: Vec<String>,
    /// Checkout of the data repository on disk, tried before the network.
    pub local_root: Option<PathBuf>,
    /// Query GitHub at all.
    pub remote: bool,
    pub raw_base_url: String,
    pub api_base_url: String,
    pub cache_ttl_secs: u64,
    pub timeout_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            owner: "etymograph".to_string(),
            repo: "etymograph".to_string(),
            branch: "main".to_string(),
            data_path: "data/words".to_string(),
            use_sample_fallback: true,
            languages: vec!["English".to_string()],
            local_root: None,
            remote: true,
            raw_base_url: "https://raw.githubusercontent.com".to_string(),
            api_base_url: "https://api.github.com".to_string(),
            cache_ttl_secs: 300,
            timeout_secs: 10,
        }
    }
}

impl FetchConfig {
    /// Load `path` (or `etymograph.toml` when present), then apply
    /// `ETYMOGRAPH_*` variables from the environment and `.env`.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(CONFIG_FILE).exists() => Self::from_file(Path::new(CONFIG_FILE))?,
            None => Self::default(),
        };

        if let Ok(env_file) = dotenvy::dotenv() {
            tracing::debug!("Loaded environment from {}", env_file.display());
        }
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!("Read config from {}", path.display());
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Apply `ETYMOGRAPH_*` overrides from any key lookup.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(owner) = lookup("ETYMOGRAPH_OWNER") {
            self.owner = owner;
        }
        if let Some(repo) = lookup("ETYMOGRAPH_REPO") {
            self.repo = repo;
        }
        if let Some(branch) = lookup("ETYMOGRAPH_BRANCH") {
            self.branch = branch;
        }
        if let Some(data_path) = lookup("ETYMOGRAPH_DATA_PATH") {
            self.data_path = data_path;
        }
        if let Some(root) = lookup("ETYMOGRAPH_LOCAL_ROOT") {
            self.local_root = Some(PathBuf::from(root));
        }
        if let Some(languages) = lookup("ETYMOGRAPH_LANGUAGES") {
            self.languages = languages
                .split(',')
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(String::from)
                .collect();
        }
        if let Some(value) = lookup("ETYMOGRAPH_SAMPLE_FALLBACK") {
            self.use_sample_fallback = parse_flag("ETYMOGRAPH_SAMPLE_FALLBACK", &value)?;
        }
        if let Some(value) = lookup("ETYMOGRAPH_REMOTE") {
            self.remote = parse_flag("ETYMOGRAPH_REMOTE", &value)?;
        }
        Ok(())
    }

    /// Record tree on disk, if a local checkout is configured.
    pub fn local_data_dir(&self) -> Option<PathBuf> {
        self.local_root.as_ref().map(|root| root.join(&self.data_path))
    }

    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_secs)
    }

    pub fn cache_ttl(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.cache_ttl_secs)
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}
