use serde_derive::Serialize;
use utoipa::ToSchema;

use crate::domain::vote::VoteListItem;

#[derive(Serialize, ToSchema)]
pub struct GetVotesResponse {
    pub votes: Vec<VoteListItem>,
}
