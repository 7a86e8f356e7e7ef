use serde_derive::Serialize;
use utoipa::ToSchema;

use crate::domain::vote::LeaderboardEntry;

#[derive(Serialize, ToSchema)]
pub struct LeaderboardResponse {
    pub entries: Vec<LeaderboardEntry>,
}
