use serde_derive::Serialize;
use utoipa::ToSchema;

use crate::domain::vote::Vote;

#[derive(Serialize, ToSchema)]
pub struct SubmitVoteResponse {
    pub ok: bool,
    pub vote: Vote,
}
