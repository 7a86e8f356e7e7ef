use std::{collections::HashSet, sync::Arc};

use tracing::debug;
use uuid::Uuid;

use crate::domain::vote::VoteStore;

use super::{
    gallery::{FeedError, GallerySource},
    image_candidate::ImageCandidate,
};

#[derive(Debug)]
pub struct FeedPage {
    /// The gallery page the images came from.
    pub page: u32,
    pub next_page: u32,
    pub images: Vec<ImageCandidate>,
}

/// Walks gallery pages until one has images the user has not voted on.
pub struct FeedFetcher {
    source: Arc<dyn GallerySource>,
    max_pages: u32,
}

impl FeedFetcher {
    pub fn new(source: Arc<dyn GallerySource>, max_pages: u32) -> Self {
        Self {
            source,
            max_pages: max_pages.max(1),
        }
    }

    pub fn max_pages(&self) -> u32 {
        self.max_pages
    }

    /// Returns the first non-empty filtered page at or after `start_page`, trying at most
    /// `max_pages` pages. Page 0 is read as page 1.
    pub async fn fetch_unvoted(
        &self,
        store: &dyn VoteStore,
        user_id: Uuid,
        start_page: u32,
    ) -> Result<FeedPage, FeedError> {
        let voted: HashSet<String> = store
            .list_votes_for_user(user_id)
            .await?
            .into_iter()
            .map(|item| item.url)
            .collect();

        let start_page = start_page.max(1);

        for attempt in 0..self.max_pages {
            let page = start_page.saturating_add(attempt);
            let Some(candidates) = self.source.fetch_page(page).await? else {
                debug!(page, "Gallery page has no items, feed has ended");
                return Err(FeedError::PaginationExhausted {
                    start_page,
                    attempts: attempt + 1,
                });
            };

            let fetched = candidates.len();
            let images = filter_unvoted(candidates, &voted);
            debug!(page, fetched, unvoted = images.len(), "Fetched gallery page");

            if !images.is_empty() {
                return Ok(FeedPage {
                    page,
                    next_page: page.saturating_add(1),
                    images,
                });
            }
        }

        Err(FeedError::PaginationExhausted {
            start_page,
            attempts: self.max_pages,
        })
    }
}

pub fn filter_unvoted(
    candidates: Vec<ImageCandidate>,
    voted: &HashSet<String>,
) -> Vec<ImageCandidate> {
    candidates
        .into_iter()
        .filter(|candidate| !voted.contains(&candidate.link))
        .collect()
}
