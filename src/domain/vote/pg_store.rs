use async_trait::async_trait;
use diesel::{
    ExpressionMethods, OptionalExtension, QueryDsl, SelectableHelper,
    result::{DatabaseErrorKind, Error as DieselError},
    upsert::excluded,
};
use diesel_async::{
    AsyncPgConnection, RunQueryDsl,
    pooled_connection::bb8::{Pool, PooledConnection},
};
use uuid::Uuid;

use crate::{
    domain::session::SessionStore,
    init::state::Session,
    schema::{sessions, votes},
};

use super::{
    store::{StoreError, VoteStore},
    vote::{LeaderboardEntry, NewVote, Vote, VoteListItem},
};

pub struct PgStore {
    pool: Pool<AsyncPgConnection>,
}

impl PgStore {
    pub fn new(pool: Pool<AsyncPgConnection>) -> Self {
        Self { pool }
    }

    async fn get_conn(&self) -> Result<PooledConnection<'_, AsyncPgConnection>, StoreError> {
        self.pool
            .get()
            .await
            .map_err(|e| StoreError::Pool(e.to_string()))
    }
}

#[async_trait]
impl VoteStore for PgStore {
    async fn get_vote(&self, vote_id: Uuid, user_id: Uuid) -> Result<Option<Vote>, StoreError> {
        let mut conn = self.get_conn().await?;

        let vote = votes::table
            .filter(votes::vote_id.eq(vote_id))
            .filter(votes::user_id.eq(user_id))
            .select(Vote::as_select())
            .first(&mut conn)
            .await
            .optional()?;

        Ok(vote)
    }

    async fn list_votes_for_user(&self, user_id: Uuid) -> Result<Vec<VoteListItem>, StoreError> {
        let mut conn = self.get_conn().await?;

        let items = votes::table
            .filter(votes::user_id.eq(user_id))
            .order((votes::vote_updated_at.desc(), votes::vote_created_at.desc()))
            .select(VoteListItem::as_select())
            .load(&mut conn)
            .await?;

        Ok(items)
    }

    async fn create_vote(&self, new_vote: NewVote<'_>) -> Result<Vote, StoreError> {
        let mut conn = self.get_conn().await?;
        let user_id = new_vote.user_id;

        diesel::insert_into(votes::table)
            .values(&new_vote)
            .on_conflict((votes::user_id, votes::url))
            .do_update()
            .set((
                votes::up.eq(excluded(votes::up)),
                votes::vote_updated_at.eq(diesel::dsl::now),
            ))
            .returning(Vote::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|e| match e {
                DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                    StoreError::UnknownUser(user_id)
                }
                DieselError::DatabaseError(DatabaseErrorKind::CheckViolation, _) => {
                    StoreError::InvalidVote
                }
                e => StoreError::Query(e),
            })
    }

    async fn leaderboard(&self, limit: i64) -> Result<Vec<LeaderboardEntry>, StoreError> {
        let mut conn = self.get_conn().await?;

        let entries: Vec<LeaderboardEntry> = diesel::sql_query(
            "SELECT url, COUNT(*) FILTER (WHERE up) AS up_count \
             FROM votes \
             GROUP BY url \
             HAVING COUNT(*) FILTER (WHERE up) > 0 \
             ORDER BY up_count DESC, url ASC \
             LIMIT $1",
        )
        .bind::<diesel::sql_types::BigInt, i64>(limit)
        .load(&mut conn)
        .await?;

        Ok(entries)
    }
}

#[async_trait]
impl SessionStore for PgStore {
    async fn find_session(&self, session_id: Uuid) -> Result<Option<Session>, StoreError> {
        let mut conn = self.get_conn().await?;

        let session = sessions::table
            .filter(sessions::session_id.eq(session_id))
            .select(Session::as_select())
            .first(&mut conn)
            .await
            .optional()?;

        Ok(session)
    }
}
