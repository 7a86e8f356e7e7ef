use std::sync::Arc;

use tracing::info;

use crate::init::state::ServerState;

pub async fn purge_session_cache(state: Arc<ServerState>) {
    let start = tokio::time::Instant::now();
    let (pruned, remaining) = state.purge_expired_sessions().await;

    info!(
        pruned,
        remaining,
        elapsed = ?start.elapsed(),
        "Purged stale cached sessions"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MemoryStore, ScriptedGallery, test_state_with_session_ttl};

    #[tokio::test]
    async fn test_purge_session_cache_empties_stale_cache() {
        let store = Arc::new(MemoryStore::default());
        let user_id = store.add_user();
        let session_id = store.add_session(user_id, chrono::Duration::hours(1));
        let state = test_state_with_session_ttl(
            store,
            Arc::new(ScriptedGallery::new(vec![])),
            3,
            std::time::Duration::ZERO,
        );

        state.get_session(&session_id).await.unwrap();
        assert_eq!(state.get_session_length(), 1);

        purge_session_cache(Arc::clone(&state)).await;
        assert_eq!(state.get_session_length(), 0);
    }
}
