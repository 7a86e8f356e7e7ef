use std::sync::Arc;

use axum::{extract::State, response::IntoResponse};

use crate::{
    domain::vote::get_leaderboard as rank_leaderboard,
    dto::responses::{
        leaderboard::get_leaderboard_response::LeaderboardResponse, response_data::http_resp,
    },
    errors::code_error::{CodeError, ErrorBody, HandlerResponse, store_err},
    init::state::ServerState,
    util::time::now::tokio_now,
};

#[utoipa::path(
    get,
    path = "/api/leaderboard",
    tag = "leaderboard",
    responses(
        (status = 200, description = "Top 50 urls by upvotes", body = LeaderboardResponse),
        (status = 401, description = "Missing or invalid session", body = ErrorBody),
        (status = 500, description = "Vote store failure", body = ErrorBody)
    )
)]
pub async fn get_leaderboard(
    State(state): State<Arc<ServerState>>,
) -> HandlerResponse<impl IntoResponse> {
    let start = tokio_now();

    let entries = rank_leaderboard(state.vote_store())
        .await
        .map_err(|e| store_err(e, CodeError::DB_QUERY_ERROR))?;

    Ok(http_resp(LeaderboardResponse { entries }, (), start))
}
