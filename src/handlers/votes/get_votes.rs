use std::sync::Arc;

use axum::{Extension, extract::State, response::IntoResponse};
use uuid::Uuid;

use crate::{
    dto::responses::{response_data::http_resp, votes::get_votes_response::GetVotesResponse},
    errors::code_error::{CodeError, ErrorBody, HandlerResponse, store_err},
    init::state::ServerState,
    util::time::now::tokio_now,
};

#[utoipa::path(
    get,
    path = "/api/votes",
    tag = "votes",
    responses(
        (status = 200, description = "The caller's votes, most recent first", body = GetVotesResponse),
        (status = 401, description = "Missing or invalid session", body = ErrorBody),
        (status = 500, description = "Vote store failure", body = ErrorBody)
    )
)]
pub async fn get_votes(
    Extension(user_id): Extension<Uuid>,
    State(state): State<Arc<ServerState>>,
) -> HandlerResponse<impl IntoResponse> {
    let start = tokio_now();

    let votes = state
        .vote_store()
        .list_votes_for_user(user_id)
        .await
        .map_err(|e| store_err(e, CodeError::DB_QUERY_ERROR))?;

    Ok(http_resp(GetVotesResponse { votes }, (), start))
}
