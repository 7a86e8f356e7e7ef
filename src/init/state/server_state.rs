use std::sync::Arc;
use std::sync::atomic::AtomicU64;

use anyhow::anyhow;
use tracing::debug;
use uuid::Uuid;

use crate::domain::feed::FeedFetcher;
use crate::domain::session::SessionStore;
use crate::domain::vote::VoteStore;

use super::builder::ServerStateBuilder;
use super::deployment_environment::DeploymentEnvironment;
use super::session::{CachedSession, Session};

pub struct ServerState {
    pub(crate) app_name_version: String,
    pub(crate) server_start_time: tokio::time::Instant,
    pub(crate) responses_handled: AtomicU64,
    pub(crate) session_map: scc::HashMap<Uuid, CachedSession>, // read-through cache
    pub(crate) session_cache_ttl: std::time::Duration,
    pub(crate) session_store: Arc<dyn SessionStore>,
    pub(crate) vote_store: Arc<dyn VoteStore>,
    pub(crate) feed: FeedFetcher,
    pub(crate) deployment_environment: DeploymentEnvironment,
}

impl ServerState {
    pub fn builder() -> ServerStateBuilder {
        ServerStateBuilder::default()
    }

    /// Resolves an unexpired session. Cached rows are trusted for `session_cache_ttl`; after
    /// that the store is asked again, so sessions deleted at logout stop working.
    pub async fn get_session(&self, session_id: &Uuid) -> anyhow::Result<Session> {
        if let Some(cached) = self
            .session_map
            .read_async(session_id, |_, v| v.clone())
            .await
        {
            if cached.is_fresh(self.session_cache_ttl) {
                return Ok(cached.session);
            }
            self.session_map.remove_async(session_id).await;
        }

        let session = self
            .session_store
            .find_session(*session_id)
            .await?
            .ok_or_else(|| anyhow!("Session not found"))?;

        if !session.is_unexpired() {
            return Err(anyhow!("Session expired"));
        }

        debug!(session_id = %session_id, "Caching session");
        let _ = self
            .session_map
            .insert_async(*session_id, CachedSession::new(session.clone()))
            .await;

        Ok(session)
    }

    /// Drops cache entries that are expired or older than the cache TTL.
    pub async fn purge_expired_sessions(&self) -> (usize, usize) {
        let ttl = self.session_cache_ttl;
        let (mut pruned, mut remaining): (usize, usize) = (0, 0);

        self.session_map
            .iter_mut_async(|entry| {
                // scc >= 3.6.0: `ConsumableEntry` derefs to the value.
                if entry.is_fresh(ttl) {
                    remaining += 1;
                } else {
                    pruned += 1;
                    let _ = entry.consume();
                }
                true
            })
            .await;

        (pruned, remaining)
    }

    pub fn get_session_length(&self) -> usize {
        self.session_map.len()
    }

    pub fn get_app_name_version(&self) -> String {
        self.app_name_version.clone()
    }

    pub fn get_uptime(&self) -> tokio::time::Duration {
        self.server_start_time.elapsed()
    }

    pub fn get_responses_handled(&self) -> u64 {
        self.responses_handled
            .load(std::sync::atomic::Ordering::SeqCst)
    }

    pub fn add_responses_handled(&self) {
        self.responses_handled
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
    }

    pub fn vote_store(&self) -> &dyn VoteStore {
        self.vote_store.as_ref()
    }

    pub fn feed(&self) -> &FeedFetcher {
        &self.feed
    }

    pub fn get_deployment_environment(&self) -> DeploymentEnvironment {
        self.deployment_environment
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::test_support::{MemoryStore, ScriptedGallery, test_state, test_state_with_session_ttl};

    #[tokio::test]
    async fn test_session_is_cached_after_lookup() {
        let store = Arc::new(MemoryStore::default());
        let user_id = store.add_user();
        let session_id = store.add_session(user_id, chrono::Duration::hours(1));
        let state = test_state(store, Arc::new(ScriptedGallery::new(vec![])), 3);

        assert_eq!(state.get_session_length(), 0);
        let session = state.get_session(&session_id).await.unwrap();
        assert_eq!(session.get_user_id(), user_id);
        assert_eq!(state.get_session_length(), 1);
    }

    #[tokio::test]
    async fn test_unknown_and_expired_sessions_fail() {
        let store = Arc::new(MemoryStore::default());
        let user_id = store.add_user();
        let expired = store.add_session(user_id, chrono::Duration::seconds(-30));
        let state = test_state(store, Arc::new(ScriptedGallery::new(vec![])), 3);

        assert!(state.get_session(&Uuid::new_v4()).await.is_err());
        assert!(state.get_session(&expired).await.is_err());
        assert_eq!(state.get_session_length(), 0);
    }

    #[tokio::test]
    async fn test_deleted_session_rejected_once_cache_is_stale() {
        let store = Arc::new(MemoryStore::default());
        let user_id = store.add_user();
        let session_id = store.add_session(user_id, chrono::Duration::hours(1));
        let state = test_state_with_session_ttl(
            store.clone(),
            Arc::new(ScriptedGallery::new(vec![])),
            3,
            std::time::Duration::ZERO,
        );

        assert!(state.get_session(&session_id).await.is_ok());
        store.remove_session(session_id);
        assert!(state.get_session(&session_id).await.is_err());
        assert_eq!(state.get_session_length(), 0);
    }

    #[tokio::test]
    async fn test_fresh_cache_entry_skips_store() {
        let store = Arc::new(MemoryStore::default());
        let user_id = store.add_user();
        let session_id = store.add_session(user_id, chrono::Duration::hours(1));
        let state = test_state_with_session_ttl(
            store.clone(),
            Arc::new(ScriptedGallery::new(vec![])),
            3,
            std::time::Duration::from_secs(3600),
        );

        assert!(state.get_session(&session_id).await.is_ok());
        store.remove_session(session_id);
        assert!(state.get_session(&session_id).await.is_ok());
    }

    #[tokio::test]
    async fn test_purge_drops_stale_entries() {
        let store = Arc::new(MemoryStore::default());
        let user_id = store.add_user();
        let first = store.add_session(user_id, chrono::Duration::hours(1));
        let second = store.add_session(user_id, chrono::Duration::hours(1));

        let stale = test_state_with_session_ttl(
            store.clone(),
            Arc::new(ScriptedGallery::new(vec![])),
            3,
            std::time::Duration::ZERO,
        );
        stale.get_session(&first).await.unwrap();
        stale.get_session(&second).await.unwrap();
        assert_eq!(stale.get_session_length(), 2);
        assert_eq!(stale.purge_expired_sessions().await, (2, 0));
        assert_eq!(stale.get_session_length(), 0);

        let fresh = test_state(store, Arc::new(ScriptedGallery::new(vec![])), 3);
        fresh.get_session(&first).await.unwrap();
        assert_eq!(fresh.purge_expired_sessions().await, (0, 1));
    }

    #[test]
    fn test_responses_handled_counter() {
        let state = test_state(
            Arc::new(MemoryStore::default()),
            Arc::new(ScriptedGallery::new(vec![])),
            3,
        );
        state.add_responses_handled();
        state.add_responses_handled();
        assert_eq!(state.get_responses_handled(), 2);
    }
}
