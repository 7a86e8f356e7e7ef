use std::sync::Arc;
use std::sync::atomic::AtomicU64;

use crate::domain::feed::FeedFetcher;
use crate::domain::session::SessionStore;
use crate::domain::vote::VoteStore;

use super::deployment_environment::DeploymentEnvironment;
use super::server_state::ServerState;
use super::session::DEFAULT_SESSION_CACHE_TTL;

#[derive(Default)]
pub struct ServerStateBuilder {
    app_name_version: Option<String>,
    server_start_time: Option<tokio::time::Instant>,
    session_store: Option<Arc<dyn SessionStore>>,
    vote_store: Option<Arc<dyn VoteStore>>,
    feed: Option<FeedFetcher>,
    session_cache_ttl: Option<std::time::Duration>,
    deployment_environment: Option<DeploymentEnvironment>,
}

impl ServerStateBuilder {
    pub fn app_name_version(mut self, app_name_version: String) -> Self {
        self.app_name_version = Some(app_name_version);
        self
    }

    pub fn server_start_time(mut self, server_start_time: tokio::time::Instant) -> Self {
        self.server_start_time = Some(server_start_time);
        self
    }

    pub fn session_store(mut self, session_store: Arc<dyn SessionStore>) -> Self {
        self.session_store = Some(session_store);
        self
    }

    pub fn vote_store(mut self, vote_store: Arc<dyn VoteStore>) -> Self {
        self.vote_store = Some(vote_store);
        self
    }

    pub fn feed(mut self, feed: FeedFetcher) -> Self {
        self.feed = Some(feed);
        self
    }

    pub fn session_cache_ttl(mut self, session_cache_ttl: std::time::Duration) -> Self {
        self.session_cache_ttl = Some(session_cache_ttl);
        self
    }

    pub fn deployment_environment(mut self, deployment_environment: DeploymentEnvironment) -> Self {
        self.deployment_environment = Some(deployment_environment);
        self
    }

    /// Falls back to `CURR_ENV` when no deployment environment was given.
    pub fn build(self) -> anyhow::Result<ServerState> {
        Ok(ServerState {
            app_name_version: self
                .app_name_version
                .ok_or_else(|| anyhow::anyhow!("app_name_version is required"))?,
            server_start_time: self
                .server_start_time
                .ok_or_else(|| anyhow::anyhow!("server_start_time is required"))?,
            responses_handled: AtomicU64::new(0u64),
            session_map: scc::HashMap::new(),
            session_cache_ttl: self.session_cache_ttl.unwrap_or(DEFAULT_SESSION_CACHE_TTL),
            session_store: self
                .session_store
                .ok_or_else(|| anyhow::anyhow!("session_store is required"))?,
            vote_store: self
                .vote_store
                .ok_or_else(|| anyhow::anyhow!("vote_store is required"))?,
            feed: self
                .feed
                .ok_or_else(|| anyhow::anyhow!("feed is required"))?,
            deployment_environment: self
                .deployment_environment
                .unwrap_or_else(DeploymentEnvironment::from_env),
        })
    }
}
