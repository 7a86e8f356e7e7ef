use std::sync::Arc;

use axum::{
    Extension, Form,
    extract::{State, rejection::FormRejection},
    response::IntoResponse,
};
use tracing::info;
use uuid::Uuid;

use crate::{
    domain::vote::NewVote,
    dto::{
        requests::kittens::submit_vote_request::SubmitVoteRequest,
        responses::{kittens::submit_vote_response::SubmitVoteResponse, response_data::http_resp},
    },
    errors::code_error::{CodeError, ErrorBody, HandlerResponse, code_err, store_err},
    init::state::ServerState,
    util::time::now::tokio_now,
};

#[utoipa::path(
    post,
    path = "/api/kittens",
    tag = "kittens",
    request_body(
        content = SubmitVoteRequest,
        content_type = "application/x-www-form-urlencoded"
    ),
    responses(
        (status = 200, description = "Vote recorded", body = SubmitVoteResponse),
        (status = 400, description = "Url is required", body = ErrorBody),
        (status = 401, description = "Missing or invalid session", body = ErrorBody),
        (status = 500, description = "Vote could not be stored", body = ErrorBody)
    )
)]
pub async fn submit_vote(
    Extension(user_id): Extension<Uuid>,
    State(state): State<Arc<ServerState>>,
    form: Result<Form<SubmitVoteRequest>, FormRejection>,
) -> HandlerResponse<impl IntoResponse> {
    let start = tokio_now();

    let Form(request) = form.map_err(|e| code_err(CodeError::VOTE_URL_REQUIRED, e))?;
    let url = request
        .url()
        .ok_or_else(|| code_err(CodeError::VOTE_URL_REQUIRED, "url missing or blank"))?;

    let vote = state
        .vote_store()
        .create_vote(NewVote::new(url, user_id, request.is_up()))
        .await
        .map_err(|e| store_err(e, CodeError::DB_INSERTION_ERROR))?;

    info!(user_id = %user_id, vote_id = %vote.vote_id, up = vote.up, "Vote recorded");

    Ok(http_resp(SubmitVoteResponse { ok: true, vote }, (), start))
}
