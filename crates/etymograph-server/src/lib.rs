//! HTTP JSON API for etymology lookups

pub mod router;
pub mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use etymograph_core::LayoutConfig;
use etymograph_fetch::{DataIndex, WordSource};

/// Number of "did you mean" entries returned for a miss.
pub const SUGGESTION_LIMIT: usize = 5;

/// Bind address for the server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 7890,
        }
    }
}

/// Shared by every request.
pub struct ServerState {
    pub fetcher: Arc<dyn WordSource>,
    /// Local record index, when a checkout is configured.
    pub index: Option<DataIndex>,
    pub layout: LayoutConfig,
}

impl ServerState {
    pub fn new(fetcher: Arc<dyn WordSource>) -> Self {
        Self {
            fetcher,
            index: None,
            layout: LayoutConfig::default(),
        }
    }

    pub fn with_index(mut self, index: DataIndex) -> Self {
        self.index = Some(index);
        self
    }

    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }

    pub fn suggestions(&self, term: &str) -> Vec<String> {
        self.index
            .as_ref()
            .map(|index| index.suggest(term, SUGGESTION_LIMIT))
            .unwrap_or_default()
    }
}

pub struct EtymographServer {
    state: Arc<ServerState>,
    config: ServerConfig,
}

impl EtymographServer {
    pub fn new(state: ServerState, config: ServerConfig) -> Self {
        Self {
            state: Arc::new(state),
            config,
        }
    }

    pub fn state(&self) -> Arc<ServerState> {
        Arc::clone(&self.state)
    }

    pub fn address(&self) -> anyhow::Result<SocketAddr> {
        Ok(format!("{}:{}", self.config.host, self.config.port).parse()?)
    }

    /// Serve until the process is stopped.
    pub async fn start(self) -> anyhow::Result<()> {
        let addr = self.address()?;
        let app = router::create_router(self.state());
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Listening on http://{}", listener.local_addr()?);
        axum::serve(listener, app).await?;
        Ok(())
    }
}
