use async_trait::async_trait;
use uuid::Uuid;

use crate::{domain::vote::StoreError, init::state::Session};

/// Read side of the sessions written by the auth service.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn find_session(&self, session_id: Uuid) -> Result<Option<Session>, StoreError>;
}
