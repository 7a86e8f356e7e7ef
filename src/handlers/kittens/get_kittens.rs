use std::sync::Arc;

use axum::{
    Extension,
    extract::{Query, State},
    response::IntoResponse,
};
use tracing::warn;
use uuid::Uuid;

use crate::{
    domain::feed::FeedError,
    dto::{
        requests::kittens::get_kittens_request::GetKittensRequest,
        responses::{
            kittens::kitten_feed_response::{FeedState, KittenFeedResponse},
            response_data::http_resp,
        },
    },
    errors::code_error::{CodeError, ErrorBody, HandlerResponse, store_err},
    init::state::ServerState,
    util::time::now::tokio_now,
};

/// Next batch of kitten images the caller has not voted on.
///
/// An unreachable gallery or a run of fully-voted pages is not an error for the
/// client: the response carries an empty list, a `state` saying why, and the
/// page to retry from.
#[utoipa::path(
    get,
    path = "/api/kittens",
    tag = "kittens",
    params(GetKittensRequest),
    responses(
        (status = 200, description = "Unvoted images, or an empty list with the feed state", body = KittenFeedResponse),
        (status = 401, description = "Missing or invalid session", body = ErrorBody),
        (status = 500, description = "Vote store failure", body = ErrorBody)
    )
)]
pub async fn get_kittens(
    Extension(user_id): Extension<Uuid>,
    State(state): State<Arc<ServerState>>,
    Query(request): Query<GetKittensRequest>,
) -> HandlerResponse<impl IntoResponse> {
    let start = tokio_now();
    let start_page = request.page.max(1);

    let response = match state
        .feed()
        .fetch_unvoted(state.vote_store(), user_id, start_page)
        .await
    {
        Ok(feed) => KittenFeedResponse {
            state: FeedState::Ready,
            page: feed.page,
            next_page: feed.next_page,
            images: feed.images,
        },
        Err(FeedError::Unavailable { page, reason }) => {
            warn!(user_id = %user_id, page, reason = %reason, "Gallery unavailable");
            KittenFeedResponse {
                state: FeedState::Unavailable,
                page,
                next_page: page,
                images: Vec::new(),
            }
        }
        Err(FeedError::PaginationExhausted {
            start_page,
            attempts,
        }) => {
            warn!(user_id = %user_id, start_page, attempts, "No unvoted images within page budget");
            let next_page = start_page.saturating_add(attempts);
            KittenFeedResponse {
                state: FeedState::Exhausted,
                page: next_page.saturating_sub(1),
                next_page,
                images: Vec::new(),
            }
        }
        Err(FeedError::Store(e)) => return Err(store_err(e, CodeError::DB_QUERY_ERROR)),
    };

    Ok(http_resp(response, (), start))
}
