//! GitHub transports: raw file URLs and the REST contents API

use etymograph_core::{Word, parse_record};
use reqwest::{StatusCode, Url, header};

use crate::config::FetchConfig;
use crate::path::record_segments;
use crate::source::{FetchError, WordSource};

const USER_AGENT: &str = concat!("etymograph/", env!("CARGO_PKG_VERSION"));

/// Location of the data repository on GitHub.
#[derive(Debug, Clone)]
struct Repository {
    owner: String,
    repo: String,
    branch: String,
    data_path: String,
    languages: Vec<String>,
}

impl Repository {
    fn from_config(config: &FetchConfig) -> Self {
        Self {
            owner: config.owner.clone(),
            repo: config.repo.clone(),
            branch: config.branch.clone(),
            data_path: config.data_path.clone(),
            languages: config.languages.clone(),
        }
    }

    fn data_segments(&self) -> impl Iterator<Item = &str> {
        self.data_path.split('/').filter(|s| !s.is_empty())
    }
}

fn client(config: &FetchConfig) -> Result<reqwest::Client, FetchError> {
    Ok(reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(config.timeout())
        .build()?)
}

/// Append path segments to a base URL, percent-encoding each.
fn build_url<'a>(base: &str, segments: impl IntoIterator<Item = &'a str>) -> Result<Url, FetchError> {
    let mut url = Url::parse(base).map_err(|_| FetchError::InvalidUrl(base.to_string()))?;
    url.path_segments_mut()
        .map_err(|_| FetchError::InvalidUrl(base.to_string()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// GET a record; 404 is a miss.
async fn get_record(request: reqwest::RequestBuilder, url: &Url) -> Result<Option<Word>, FetchError> {
    let response = request.send().await?;
    match response.status() {
        StatusCode::NOT_FOUND => {
            tracing::debug!("{} not found", url);
            Ok(None)
        }
        status if status.is_success() => {
            let body = response.text().await?;
            parse_record(&body).map(Some).map_err(|source| FetchError::Parse {
                location: url.to_string(),
                source,
            })
        }
        status => Err(FetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        }),
    }
}

/// `https://raw.githubusercontent.com/<owner>/<repo>/<branch>/<data_path>/...`
pub struct RawGithubSource {
    client: reqwest::Client,
    base_url: String,
    repository: Repository,
}

impl RawGithubSource {
    pub fn new(config: &FetchConfig) -> Result<Self, FetchError> {
        Ok(Self {
            client: client(config)?,
            base_url: config.raw_base_url.clone(),
            repository: Repository::from_config(config),
        })
    }

    pub fn record_url(&self, language: &str, term: &str) -> Result<Option<Url>, FetchError> {
        let Some(tail) = record_segments(language, term) else {
            return Ok(None);
        };
        let repo = &self.repository;
        let segments = [repo.owner.as_str(), repo.repo.as_str(), repo.branch.as_str()]
            .into_iter()
            .chain(repo.data_segments())
            .chain(tail.iter().map(String::as_str));
        build_url(&self.base_url, segments).map(Some)
    }
}

#[async_trait::async_trait]
impl WordSource for RawGithubSource {
    async fn fetch_root(&self, term: &str) -> Result<Option<Word>, FetchError> {
        for language in &self.repository.languages {
            let Some(url) = self.record_url(language, term)? else {
                continue;
            };
            if let Some(word) = get_record(self.client.get(url.clone()), &url).await? {
                return Ok(Some(word));
            }
        }
        Ok(None)
    }

    fn name(&self) -> &str {
        "github-raw"
    }
}

/// `https://api.github.com/repos/<owner>/<repo>/contents/<path>?ref=<branch>`,
/// asking for the raw file body.
pub struct GithubApiSource {
    client: reqwest::Client,
    base_url: String,
    repository: Repository,
}

impl GithubApiSource {
    pub fn new(config: &FetchConfig) -> Result<Self, FetchError> {
        Ok(Self {
            client: client(config)?,
            base_url: config.api_base_url.clone(),
            repository: Repository::from_config(config),
        })
    }

    pub fn record_url(&self, language: &str, term: &str) -> Result<Option<Url>, FetchError> {
        let Some(tail) = record_segments(language, term) else {
            return Ok(None);
        };
        let repo = &self.repository;
        let segments = ["repos", repo.owner.as_str(), repo.repo.as_str(), "contents"]
            .into_iter()
            .chain(repo.data_segments())
            .chain(tail.iter().map(String::as_str));
        let mut url = build_url(&self.base_url, segments)?;
        url.query_pairs_mut().append_pair("ref", &repo.branch);
        Ok(Some(url))
    }
}

#[async_trait::async_trait]
impl WordSource for GithubApiSource {
    async fn fetch_root(&self, term: &str) -> Result<Option<Word>, FetchError> {
        for language in &self.repository.languages {
            let Some(url) = self.record_url(language, term)? else {
                continue;
            };
            let request = self
                .client
                .get(url.clone())
                .header(header::ACCEPT, "application/vnd.github.raw+json");
            if let Some(word) = get_record(request, &url).await? {
                return Ok(Some(word));
            }
        }
        Ok(None)
    }

    fn name(&self) -> &str {
        "github-api"
    }
}
