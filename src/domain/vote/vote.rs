use chrono::{DateTime, Utc};
use diesel::{
    Insertable, Selectable,
    prelude::{Queryable, QueryableByName},
};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::schema::votes;

#[derive(Clone, Debug, serde_derive::Serialize, Queryable, Selectable, ToSchema)]
#[diesel(table_name = votes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Vote {
    pub vote_id: Uuid,
    pub url: String,
    pub up: bool,
    pub user_id: Uuid,
    pub vote_created_at: DateTime<Utc>,
    pub vote_updated_at: DateTime<Utc>,
}

/// `{id, url}` projection used as a membership set when filtering the feed.
#[derive(Clone, Debug, PartialEq, Eq, serde_derive::Serialize, Queryable, Selectable, ToSchema)]
#[diesel(table_name = votes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct VoteListItem {
    pub vote_id: Uuid,
    pub url: String,
}

#[derive(Insertable)]
#[diesel(table_name = votes)]
pub struct NewVote<'a> {
    pub url: &'a str,
    pub up: bool,
    pub user_id: Uuid,
}

impl<'a> NewVote<'a> {
    pub fn new(url: &'a str, user_id: Uuid, up: bool) -> Self {
        Self { url, up, user_id }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde_derive::Serialize, QueryableByName, ToSchema)]
pub struct LeaderboardEntry {
    #[diesel(sql_type = diesel::sql_types::Text)]
    pub url: String,
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    pub up_count: i64,
}
