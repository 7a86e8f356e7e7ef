use std::sync::Arc;

use tracing::info;

use crate::{
    init::state::ServerState,
    jobs::{
        auth::purge_session_cache::purge_session_cache,
        job_funcs::every_minute::schedule_task_every_minute_at,
    },
};

pub async fn task_init(state: Arc<ServerState>) -> anyhow::Result<()> {
    info!("Task scheduler running...");

    let coroutine_state = Arc::clone(&state);
    tokio::spawn(async move {
        schedule_task_every_minute_at(
            coroutine_state,
            move |coroutine_state: Arc<ServerState>| async move {
                purge_session_cache(coroutine_state).await
            },
            String::from("PURGE_SESSION_CACHE"),
            30, // seconds
            0,  // milliseconds
        )
        .await
    });

    Ok(())
}
