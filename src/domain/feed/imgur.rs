use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use reqwest::{StatusCode, header::AUTHORIZATION};
use serde_derive::Deserialize;
use tracing::warn;

use crate::init::config::GalleryConfig;

use super::{
    credentials::GalleryCredentials,
    gallery::{FeedError, GallerySource},
    image_candidate::ImageCandidate,
};

pub const GALLERY_PATH: &str = "gallery/r/kittens/time/week";

#[derive(Deserialize)]
struct GalleryResponse {
    data: Vec<GalleryItem>,
}

#[derive(Deserialize)]
struct GalleryItem {
    id: Option<String>,
    link: Option<String>,
    title: Option<String>,
    height: Option<u32>,
    width: Option<u32>,
}

enum AttemptError {
    Retryable(String),
    Fatal(String),
}

pub struct ImgurGallery {
    client: reqwest::Client,
    base_url: String,
    credentials: Arc<dyn GalleryCredentials>,
    max_retries: u32,
    retry_backoff: Duration,
}

impl ImgurGallery {
    pub fn new(
        config: &GalleryConfig,
        credentials: Arc<dyn GalleryCredentials>,
    ) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            credentials,
            max_retries: config.max_retries,
            retry_backoff: config.retry_backoff,
        })
    }

    fn page_url(&self, page: u32) -> String {
        format!("{}/{GALLERY_PATH}/{page}", self.base_url)
    }

    async fn request(&self, url: &str) -> Result<String, AttemptError> {
        let response = self
            .client
            .get(url)
            .header(AUTHORIZATION, self.credentials.authorization())
            .send()
            .await
            .map_err(|e| AttemptError::Retryable(e.to_string()))?;

        let status = response.status();
        if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
            return Err(AttemptError::Retryable(format!("gallery returned {status}")));
        }
        if !status.is_success() {
            return Err(AttemptError::Fatal(format!("gallery returned {status}")));
        }

        response
            .text()
            .await
            .map_err(|e| AttemptError::Retryable(e.to_string()))
    }
}

#[async_trait]
impl GallerySource for ImgurGallery {
    async fn fetch_page(&self, page: u32) -> Result<Option<Vec<ImageCandidate>>, FeedError> {
        let url = self.page_url(page);
        let mut backoff = self.retry_backoff;
        let mut retries = 0u32;

        let body = loop {
            match self.request(&url).await {
                Ok(body) => break body,
                Err(AttemptError::Retryable(reason)) if retries < self.max_retries => {
                    retries += 1;
                    warn!(page, retries, reason = %reason, "Gallery request failed, retrying");
                    tokio::time::sleep(backoff).await;
                    backoff = backoff.saturating_mul(2);
                }
                Err(AttemptError::Retryable(reason) | AttemptError::Fatal(reason)) => {
                    return Err(FeedError::Unavailable { page, reason });
                }
            }
        };

        parse_gallery_page(&body).map_err(|e| FeedError::Unavailable {
            page,
            reason: format!("malformed gallery response: {e}"),
        })
    }
}

/// Parses a gallery body. `None` for `"data": []`; otherwise the items that carry a link.
pub fn parse_gallery_page(body: &str) -> Result<Option<Vec<ImageCandidate>>, serde_json::Error> {
    let response: GalleryResponse = serde_json::from_str(body)?;
    if response.data.is_empty() {
        return Ok(None);
    }

    let images = response
        .data
        .into_iter()
        .filter_map(|item| {
            let link = item.link.filter(|link| !link.is_empty())?;
            Some(ImageCandidate {
                id: item.id.unwrap_or_else(|| link.clone()),
                link,
                title: item.title.unwrap_or_default(),
                height: item.height.unwrap_or_default(),
                width: item.width.unwrap_or_default(),
            })
        })
        .collect();

    Ok(Some(images))
}
