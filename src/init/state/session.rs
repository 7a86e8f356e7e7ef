use chrono::Utc;
use diesel::{Selectable, prelude::Queryable};
use uuid::Uuid;

use crate::schema::sessions;

pub const SESSION_COOKIE: &str = "session_id";
pub const DEFAULT_SESSION_CACHE_TTL: std::time::Duration = std::time::Duration::from_secs(30);

#[derive(Debug, Clone, serde_derive::Serialize, serde_derive::Deserialize, Queryable, Selectable)]
#[diesel(table_name = sessions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Session {
    pub session_id: Uuid,
    pub user_id: Uuid,
    #[diesel(column_name = session_created_at)]
    pub created_at: chrono::DateTime<Utc>,
    #[diesel(column_name = session_expires_at)]
    pub expires_at: chrono::DateTime<Utc>,
}

impl Session {
    pub fn is_unexpired(&self) -> bool {
        let now = Utc::now();

        self.created_at <= now && self.expires_at > now
    }

    pub fn get_user_id(&self) -> Uuid {
        self.user_id
    }
}

/// A session row as last read from the store.
#[derive(Debug, Clone)]
pub struct CachedSession {
    pub session: Session,
    pub cached_at: tokio::time::Instant,
}

impl CachedSession {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            cached_at: tokio::time::Instant::now(),
        }
    }

    /// Usable without going back to the store: unexpired and read less than `ttl` ago.
    pub fn is_fresh(&self, ttl: std::time::Duration) -> bool {
        self.cached_at.elapsed() < ttl && self.session.is_unexpired()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(created_offset_mins: i64, expires_offset_mins: i64) -> Session {
        let now = Utc::now();
        Session {
            session_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            created_at: now + chrono::Duration::minutes(created_offset_mins),
            expires_at: now + chrono::Duration::minutes(expires_offset_mins),
        }
    }

    #[test]
    fn test_session_expiry() {
        assert!(session(-5, 30).is_unexpired());
        assert!(!session(-60, -1).is_unexpired());
        assert!(!session(5, 30).is_unexpired());
    }

    #[test]
    fn test_cached_session_freshness() {
        let cached = CachedSession::new(session(-5, 30));
        assert!(cached.is_fresh(std::time::Duration::from_secs(30)));
        assert!(!cached.is_fresh(std::time::Duration::ZERO));
        assert!(!CachedSession::new(session(-60, -1)).is_fresh(std::time::Duration::from_secs(30)));
    }
}
