use init::{server_init::server_init_proc, state::DeploymentEnvironment};
use mimalloc::MiMalloc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

pub mod build_info {
    include!(concat!(env!("OUT_DIR"), "/build_info.rs"));
}

// modules tree
pub mod domain {
    pub mod feed;
    pub mod session;
    pub mod vote;
}
pub mod dto {
    pub mod requests {
        pub mod kittens {
            pub mod get_kittens_request;
            pub mod submit_vote_request;
        }
    }
    pub mod responses {
        pub mod kittens {
            pub mod kitten_feed_response;
            pub mod submit_vote_response;
        }
        pub mod leaderboard {
            pub mod get_leaderboard_response;
        }
        pub mod server {
            pub mod server_state_response;
        }
        pub mod votes {
            pub mod get_votes_response;
        }
        pub mod response_data;
        pub mod response_meta;
    }
}
pub mod errors {
    pub mod code_error;
}
pub mod handlers {
    pub mod fallback;
    pub mod kittens {
        pub mod get_kittens;
        pub mod submit_vote;
    }
    pub mod leaderboard {
        pub mod get_leaderboard;
    }
    pub mod server {
        pub mod healthcheck;
        pub mod root;
    }
    pub mod votes {
        pub mod get_vote;
        pub mod get_votes;
    }
}
pub mod jobs {
    pub mod auth {
        pub mod purge_session_cache;
    }
    pub mod job_funcs {
        pub mod every_minute;
        pub mod init_scheduler;
    }
}
pub mod routers {
    pub mod main_router;
    pub mod middleware {
        pub mod auth;
        pub mod logging;
    }
}
pub mod init {
    pub mod config;
    pub mod server_init;
    pub mod state;
}
pub mod util {
    pub mod time {
        pub mod duration_formatter;
        pub mod now;
    }
}
pub mod docs;
pub mod schema;

#[cfg(test)]
mod test_support;

// main function
#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    let start = tokio::time::Instant::now();

    let dotenv_result = if std::env::var("IS_AWS").is_err() {
        Some(dotenvy::dotenv())
    } else {
        None
    };

    let deployment_environment = DeploymentEnvironment::from_env();

    let (non_blocking, _guard) = tracing_appender::non_blocking(std::io::stdout());
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if deployment_environment.is_prod() {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter)
            .with_writer(non_blocking)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(non_blocking)
            .init();
    }

    match dotenv_result {
        Some(Ok(path)) => info!(path = %path.display(), "Loaded environment file"),
        Some(Err(e)) => warn!(error = %e, "No environment file loaded"),
        None => info!("IS_AWS set, skipping environment file"),
    }

    info!("Initializing server...");
    server_init_proc(start, deployment_environment).await?;

    Ok(())
}
