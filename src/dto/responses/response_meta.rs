use chrono::{DateTime, Utc};
use serde_derive::Serialize;

#[derive(Serialize)]
pub struct ResponseMeta<M: serde::Serialize> {
    time_to_process: String,
    timestamp: DateTime<Utc>,
    metadata: M,
}

impl<M: serde::Serialize> ResponseMeta<M> {
    pub fn from(start: tokio::time::Instant, metadata: M) -> Self {
        Self {
            time_to_process: format!("{:?}", start.elapsed()),
            timestamp: Utc::now(),
            metadata,
        }
    }
}
