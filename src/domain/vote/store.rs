use async_trait::async_trait;
use uuid::Uuid;

use super::vote::{LeaderboardEntry, NewVote, Vote, VoteListItem};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not get a connection out of the pool: {0}")]
    Pool(String),
    #[error("user {0} does not exist")]
    UnknownUser(Uuid),
    #[error("vote url must not be empty")]
    InvalidVote,
    #[error("query failed: {0}")]
    Query(#[from] diesel::result::Error),
}

/// Persistence for votes. One row per `(user_id, url)`; re-voting overwrites `up`.
#[async_trait]
pub trait VoteStore: Send + Sync {
    /// The vote with `vote_id`, only if it belongs to `user_id`.
    async fn get_vote(&self, vote_id: Uuid, user_id: Uuid) -> Result<Option<Vote>, StoreError>;

    /// All of the user's votes, most recently updated first.
    async fn list_votes_for_user(&self, user_id: Uuid) -> Result<Vec<VoteListItem>, StoreError>;

    /// Inserts the vote, or updates `up` and the update timestamp of the user's existing
    /// vote on the same url. Returns the stored row.
    async fn create_vote(&self, new_vote: NewVote<'_>) -> Result<Vote, StoreError>;

    /// Urls ranked by upvote count, descending, ties by url. Zero counts are omitted.
    async fn leaderboard(&self, limit: i64) -> Result<Vec<LeaderboardEntry>, StoreError>;
}
