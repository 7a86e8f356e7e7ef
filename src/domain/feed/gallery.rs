use async_trait::async_trait;

use crate::domain::vote::StoreError;

use super::image_candidate::ImageCandidate;

#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("gallery page {page} unavailable: {reason}")]
    Unavailable { page: u32, reason: String },
    #[error("no unvoted images in {attempts} page(s) starting at page {start_page}")]
    PaginationExhausted { start_page: u32, attempts: u32 },
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// One page of the external gallery. Pages are 1-based.
///
/// `Ok(None)` means the gallery returned no items at all and the feed has ended. `Ok(Some(v))`
/// with an empty `v` is a page whose items were all unusable; later pages may still have images.
#[async_trait]
pub trait GallerySource: Send + Sync {
    async fn fetch_page(&self, page: u32) -> Result<Option<Vec<ImageCandidate>>, FeedError>;
}
