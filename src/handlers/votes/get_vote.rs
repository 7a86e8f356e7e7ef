use std::sync::Arc;

use axum::{
    Extension,
    extract::{Path, State},
    response::IntoResponse,
};
use uuid::Uuid;

use crate::{
    domain::vote::Vote,
    dto::responses::response_data::http_resp,
    errors::code_error::{CodeError, ErrorBody, HandlerResponse, code_err, store_err},
    init::state::ServerState,
    util::time::now::tokio_now,
};

#[utoipa::path(
    get,
    path = "/api/votes/{vote_id}",
    tag = "votes",
    params(
        ("vote_id" = Uuid, Path, description = "Vote id")
    ),
    responses(
        (status = 200, description = "The vote", body = Vote),
        (status = 401, description = "Missing or invalid session", body = ErrorBody),
        (status = 404, description = "No such vote for this user", body = ErrorBody)
    )
)]
pub async fn get_vote(
    Extension(user_id): Extension<Uuid>,
    State(state): State<Arc<ServerState>>,
    Path(vote_id): Path<Uuid>,
) -> HandlerResponse<impl IntoResponse> {
    let start = tokio_now();

    let vote = state
        .vote_store()
        .get_vote(vote_id, user_id)
        .await
        .map_err(|e| store_err(e, CodeError::DB_QUERY_ERROR))?
        .ok_or_else(|| code_err(CodeError::VOTE_NOT_FOUND, vote_id))?;

    Ok(http_resp(vote, (), start))
}
