//! OpenAPI documentation registration for Swagger UI.
//!
//! Important: Utoipa only exposes operations you list in `#[openapi(paths(...))]`.
//! Handler functions still need their own `#[utoipa::path(...)]` attributes.

use utoipa::OpenApi;

// ---- handlers (for `paths(...)`) ----
use crate::handlers::{
    kittens::{get_kittens, submit_vote},
    leaderboard::get_leaderboard,
    server::{healthcheck, root},
    votes::{get_vote, get_votes},
};

// ---- schemas (for `components(schemas(...))`) ----
use crate::domain::{
    feed::ImageCandidate,
    vote::{LeaderboardEntry, Vote, VoteListItem},
};
use crate::dto::{
    requests::kittens::submit_vote_request::SubmitVoteRequest,
    responses::{
        kittens::{
            kitten_feed_response::{FeedState, KittenFeedResponse},
            submit_vote_response::SubmitVoteResponse,
        },
        leaderboard::get_leaderboard_response::LeaderboardResponse,
        server::server_state_response::ServerStateResponse,
        votes::get_votes_response::GetVotesResponse,
    },
};
use crate::errors::code_error::ErrorBody;
use crate::handlers::server::healthcheck::ServerHealthcheckResponse;

/// Central OpenAPI document for Swagger UI.
#[derive(OpenApi)]
#[openapi(
    // All public + protected API routes from `main_router.rs`.
    paths(
        // --- server ---
        healthcheck::healthcheck,
        root::root_handler,

        // --- kittens ---
        get_kittens::get_kittens,
        submit_vote::submit_vote,

        // --- leaderboard ---
        get_leaderboard::get_leaderboard,

        // --- votes ---
        get_votes::get_votes,
        get_vote::get_vote,
    ),
    components(
        schemas(
            // shared error response
            ErrorBody,

            // --- server DTOs ---
            ServerHealthcheckResponse,
            ServerStateResponse,

            // --- kitten DTOs ---
            SubmitVoteRequest,
            SubmitVoteResponse,
            KittenFeedResponse,
            FeedState,
            LeaderboardResponse,
            GetVotesResponse,

            // --- domain models used in responses ---
            ImageCandidate,
            Vote,
            VoteListItem,
            LeaderboardEntry,
        )
    ),
    tags(
        (name = "server", description = "Server status endpoints"),
        (name = "kittens", description = "Kitten feed and voting"),
        (name = "leaderboard", description = "Most upvoted kittens"),
        (name = "votes", description = "The caller's own votes")
    )
)]
pub struct ApiDoc;
