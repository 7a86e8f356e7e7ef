pub mod leaderboard;
pub mod pg_store;
pub mod store;
pub mod vote;

pub use leaderboard::{LEADERBOARD_LIMIT, get_leaderboard, rank_entries};
pub use pg_store::PgStore;
pub use store::{StoreError, VoteStore};
pub use vote::{LeaderboardEntry, NewVote, Vote, VoteListItem};
