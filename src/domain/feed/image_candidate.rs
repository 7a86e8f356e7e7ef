use utoipa::ToSchema;

/// An image offered for voting. Never persisted.
#[derive(Clone, Debug, PartialEq, Eq, serde_derive::Serialize, serde_derive::Deserialize, ToSchema)]
pub struct ImageCandidate {
    pub id: String,
    pub link: String,
    pub title: String,
    pub height: u32,
    pub width: u32,
}
