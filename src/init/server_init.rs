use std::{net::SocketAddr, sync::Arc};

use diesel::prelude::QueryableByName;
use diesel_async::RunQueryDsl;
use diesel_async::pooled_connection::bb8::Pool;
use diesel_async::{AsyncPgConnection, pooled_connection::AsyncDieselConnectionManager};
use tokio::signal;
use tracing::{error, info};

use crate::{
    domain::{
        feed::{ClientIdCredentials, FeedFetcher, ImgurGallery},
        vote::PgStore,
    },
    jobs::job_funcs::init_scheduler::task_init,
    routers::main_router::build_router,
};

use super::{
    config::{DbConfig, GalleryConfig, ServerConfig},
    state::{DeploymentEnvironment, ServerState},
};

#[derive(QueryableByName)]
struct PgVersion {
    #[diesel(sql_type = diesel::sql_types::Text)]
    version: String,
}

pub async fn server_init_proc(
    start: tokio::time::Instant,
    deployment_environment: DeploymentEnvironment,
) -> anyhow::Result<()> {
    let num_cores: u32 = num_cpus::get_physical() as u32;

    let db_url = DbConfig::from_env()?.to_url();
    let gallery_config = GalleryConfig::from_env()?;
    let server_config = ServerConfig::from_env()?;

    let pool_config = AsyncDieselConnectionManager::<AsyncPgConnection>::new(db_url);

    let pool = Pool::builder()
        .min_idle(Some(num_cores))
        .max_size(num_cores * 10u32)
        .build(pool_config)
        .await?;

    {
        let mut conn = pool.get().await?;
        let pg_version: PgVersion = diesel::sql_query("SELECT version()")
            .get_result(&mut conn)
            .await?;
        info!("PostgreSQL version: {}", pg_version.version);
    }

    let store = Arc::new(PgStore::new(pool));
    let gallery = ImgurGallery::new(
        &gallery_config,
        Arc::new(ClientIdCredentials::new(gallery_config.client_id.clone())),
    )?;
    let state = Arc::new(
        ServerState::builder()
            .app_name_version(format!(
                "{} v{}",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION")
            ))
            .server_start_time(start)
            .vote_store(store.clone())
            .session_store(store)
            .feed(FeedFetcher::new(Arc::new(gallery), gallery_config.max_pages))
            .session_cache_ttl(server_config.session_cache_ttl)
            .deployment_environment(deployment_environment)
            .build()?,
    );

    info!(
        base_url = %gallery_config.base_url,
        max_pages = state.feed().max_pages(),
        session_cache_ttl = ?server_config.session_cache_ttl,
        "Gallery client and session cache configured"
    );

    task_init(Arc::clone(&state)).await?;

    let listener = tokio::net::TcpListener::bind(server_config.bind_addr()).await?;

    info!(
        addr = %listener.local_addr()?,
        environment = ?state.get_deployment_environment(),
        elapsed = ?start.elapsed(),
        "Backend server starting..."
    );

    axum::serve(
        listener,
        build_router(state).into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!(error = %e, "Failed to install Ctrl+C handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
