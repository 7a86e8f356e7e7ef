use serde_derive::Serialize;
use utoipa::ToSchema;

use crate::domain::feed::ImageCandidate;

#[derive(Serialize, ToSchema, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FeedState {
    Ready,
    /// The gallery could not be reached; retry from `next_page`.
    Unavailable,
    /// No unvoted images were found within the page budget.
    Exhausted,
}

#[derive(Serialize, ToSchema)]
pub struct KittenFeedResponse {
    pub state: FeedState,
    pub page: u32,
    pub next_page: u32,
    pub images: Vec<ImageCandidate>,
}
