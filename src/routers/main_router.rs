use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware::from_fn_with_state,
    routing::get,
};
use tower_http::{compression::CompressionLayer, cors::CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    docs::ApiDoc,
    handlers::{
        fallback::fallback_handler,
        kittens::{get_kittens::get_kittens, submit_vote::submit_vote},
        leaderboard::get_leaderboard::get_leaderboard,
        server::{healthcheck::healthcheck, root::root_handler},
        votes::{get_vote::get_vote, get_votes::get_votes},
    },
    init::state::ServerState,
};

use super::middleware::{auth::auth_middleware, logging::log_middleware};

const MAX_REQUEST_SIZE: usize = 64 * 1024; // 64KiB

pub fn build_router(state: Arc<ServerState>) -> axum::Router {
    let auth_middleware = from_fn_with_state(state.clone(), auth_middleware);
    let log_middleware = from_fn_with_state(state.clone(), log_middleware);
    let compression_middleware = CompressionLayer::new().gzip(true);
    let cors_layer = CorsLayer::very_permissive();

    // Publicly accessible API routes
    let public_router = Router::new()
        .route("/api/healthcheck/server", get(healthcheck))
        .route("/api/healthcheck/state", get(root_handler));

    // API routes requiring a session
    let protected_router = Router::new()
        .route("/api/kittens", get(get_kittens).post(submit_vote))
        .route("/api/leaderboard", get(get_leaderboard))
        .route("/api/votes", get(get_votes))
        .route("/api/votes/{vote_id}", get(get_vote))
        .layer(auth_middleware);

    // Combine all API routes and apply shared middleware
    Router::new()
        .merge(public_router)
        .merge(protected_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .fallback(fallback_handler)
        .layer(compression_middleware)
        .layer(log_middleware)
        .layer(DefaultBodyLimit::max(MAX_REQUEST_SIZE))
        .layer(cors_layer)
        .with_state(state)
}
