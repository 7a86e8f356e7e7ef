use super::{
    store::{StoreError, VoteStore},
    vote::LeaderboardEntry,
};

pub const LEADERBOARD_LIMIT: i64 = 50;

pub async fn get_leaderboard(store: &dyn VoteStore) -> Result<Vec<LeaderboardEntry>, StoreError> {
    let entries = store.leaderboard(LEADERBOARD_LIMIT).await?;
    Ok(rank_entries(entries, LEADERBOARD_LIMIT))
}

/// Drops zero counts, orders by `up_count` descending then `url` ascending, and caps at `limit`.
pub fn rank_entries(mut entries: Vec<LeaderboardEntry>, limit: i64) -> Vec<LeaderboardEntry> {
    entries.retain(|entry| entry.up_count > 0);
    entries.sort_by(|a, b| b.up_count.cmp(&a.up_count).then_with(|| a.url.cmp(&b.url)));
    entries.truncate(usize::try_from(limit).unwrap_or(0));
    entries
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;
    use crate::{domain::vote::NewVote, test_support::MemoryStore};

    fn entry(url: &str, up_count: i64) -> LeaderboardEntry {
        LeaderboardEntry {
            url: url.to_string(),
            up_count,
        }
    }

    #[test]
    fn test_rank_entries_orders_and_filters() {
        let ranked = rank_entries(
            vec![
                entry("http://x/b", 2),
                entry("http://x/zero", 0),
                entry("http://x/c", 5),
                entry("http://x/a", 2),
            ],
            LEADERBOARD_LIMIT,
        );

        assert_eq!(
            ranked,
            vec![entry("http://x/c", 5), entry("http://x/a", 2), entry("http://x/b", 2)]
        );
    }

    #[test]
    fn test_rank_entries_caps_at_limit() {
        let entries = (0..80).map(|i| entry(&format!("http://x/{i:03}"), 1)).collect();
        let ranked = rank_entries(entries, LEADERBOARD_LIMIT);
        assert_eq!(ranked.len(), 50);
        assert_eq!(ranked[0].url, "http://x/000");
    }

    #[tokio::test]
    async fn test_upvote_appears_on_leaderboard() {
        let store = MemoryStore::default();
        let user_id = store.add_user();

        store
            .create_vote(NewVote::new("http://x/1", user_id, true))
            .await
            .unwrap();

        let board = get_leaderboard(&store).await.unwrap();
        assert_eq!(board, vec![entry("http://x/1", 1)]);
    }

    #[tokio::test]
    async fn test_downvotes_never_rank() {
        let store = MemoryStore::default();
        let alice = store.add_user();
        let bob = store.add_user();

        store
            .create_vote(NewVote::new("http://x/down", alice, false))
            .await
            .unwrap();
        store
            .create_vote(NewVote::new("http://x/down", bob, false))
            .await
            .unwrap();
        store
            .create_vote(NewVote::new("http://x/up", bob, true))
            .await
            .unwrap();

        let board = get_leaderboard(&store).await.unwrap();
        assert_eq!(board, vec![entry("http://x/up", 1)]);
    }

    #[tokio::test]
    async fn test_counts_across_users_and_caps() {
        let store = MemoryStore::default();
        let users: Vec<Uuid> = (0..3).map(|_| store.add_user()).collect();

        for i in 0..60 {
            let url = format!("http://x/{i:02}");
            store
                .create_vote(NewVote::new(&url, users[0], true))
                .await
                .unwrap();
        }
        for user_id in &users[1..] {
            store
                .create_vote(NewVote::new("http://x/59", *user_id, true))
                .await
                .unwrap();
        }

        let board = get_leaderboard(&store).await.unwrap();
        assert_eq!(board.len(), 50);
        assert_eq!(board[0], entry("http://x/59", 3));
        assert!(board.windows(2).all(|w| w[0].up_count >= w[1].up_count));
    }

    #[tokio::test]
    async fn test_revote_does_not_double_count() {
        let store = MemoryStore::default();
        let user_id = store.add_user();

        store
            .create_vote(NewVote::new("http://x/1", user_id, true))
            .await
            .unwrap();
        store
            .create_vote(NewVote::new("http://x/1", user_id, true))
            .await
            .unwrap();

        let board = get_leaderboard(&store).await.unwrap();
        assert_eq!(board, vec![entry("http://x/1", 1)]);
    }
}
