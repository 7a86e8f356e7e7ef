//! In-memory stand-ins for PostgreSQL and the gallery API, used by unit and router tests.

use std::{
    collections::{HashMap, HashSet},
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::{
    domain::{
        feed::{FeedError, FeedFetcher, GallerySource, ImageCandidate},
        session::SessionStore,
        vote::{LeaderboardEntry, NewVote, StoreError, Vote, VoteListItem, VoteStore, rank_entries},
    },
    init::state::{DEFAULT_SESSION_CACHE_TTL, DeploymentEnvironment, ServerState, Session},
};

#[derive(Default)]
struct MemoryInner {
    users: HashSet<Uuid>,
    sessions: HashMap<Uuid, Session>,
    // (vote, write sequence); the sequence orders writes within one clock tick
    votes: Vec<(Vote, u64)>,
    seq: u64,
}

#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<MemoryInner>,
}

impl MemoryStore {
    pub fn add_user(&self) -> Uuid {
        let user_id = Uuid::new_v4();
        self.inner.lock().unwrap().users.insert(user_id);
        user_id
    }

    pub fn add_session(&self, user_id: Uuid, valid_for: chrono::Duration) -> Uuid {
        let now = Utc::now();
        let session = Session {
            session_id: Uuid::new_v4(),
            user_id,
            created_at: now - chrono::Duration::seconds(1),
            expires_at: now + valid_for,
        };
        let session_id = session.session_id;
        self.inner
            .lock()
            .unwrap()
            .sessions
            .insert(session_id, session);
        session_id
    }

    /// Deletes the row, as logout does.
    pub fn remove_session(&self, session_id: Uuid) {
        self.inner.lock().unwrap().sessions.remove(&session_id);
    }

    pub fn vote_count(&self) -> usize {
        self.inner.lock().unwrap().votes.len()
    }
}

#[async_trait]
impl VoteStore for MemoryStore {
    async fn get_vote(&self, vote_id: Uuid, user_id: Uuid) -> Result<Option<Vote>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .votes
            .iter()
            .map(|(vote, _)| vote)
            .find(|vote| vote.vote_id == vote_id && vote.user_id == user_id)
            .cloned())
    }

    async fn list_votes_for_user(&self, user_id: Uuid) -> Result<Vec<VoteListItem>, StoreError> {
        let inner = self.inner.lock().unwrap();
        let mut owned: Vec<&(Vote, u64)> = inner
            .votes
            .iter()
            .filter(|(vote, _)| vote.user_id == user_id)
            .collect();
        owned.sort_by(|(a, a_seq), (b, b_seq)| {
            b.vote_updated_at
                .cmp(&a.vote_updated_at)
                .then_with(|| b_seq.cmp(a_seq))
        });
        Ok(owned
            .into_iter()
            .map(|(vote, _)| VoteListItem {
                vote_id: vote.vote_id,
                url: vote.url.clone(),
            })
            .collect())
    }

    async fn create_vote(&self, new_vote: NewVote<'_>) -> Result<Vote, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        if !inner.users.contains(&new_vote.user_id) {
            return Err(StoreError::UnknownUser(new_vote.user_id));
        }
        if new_vote.url.is_empty() {
            return Err(StoreError::InvalidVote);
        }

        inner.seq += 1;
        let seq = inner.seq;
        let now = Utc::now();

        if let Some((vote, vote_seq)) = inner
            .votes
            .iter_mut()
            .find(|(vote, _)| vote.user_id == new_vote.user_id && vote.url == new_vote.url)
        {
            vote.up = new_vote.up;
            vote.vote_updated_at = now.max(vote.vote_updated_at);
            *vote_seq = seq;
            return Ok(vote.clone());
        }

        let vote = Vote {
            vote_id: Uuid::new_v4(),
            url: new_vote.url.to_string(),
            up: new_vote.up,
            user_id: new_vote.user_id,
            vote_created_at: now,
            vote_updated_at: now,
        };
        inner.votes.push((vote.clone(), seq));
        Ok(vote)
    }

    async fn leaderboard(&self, limit: i64) -> Result<Vec<LeaderboardEntry>, StoreError> {
        let inner = self.inner.lock().unwrap();
        let mut counts: HashMap<&str, i64> = HashMap::new();
        for (vote, _) in &inner.votes {
            let count = counts.entry(vote.url.as_str()).or_default();
            if vote.up {
                *count += 1;
            }
        }
        let entries = counts
            .into_iter()
            .map(|(url, up_count)| LeaderboardEntry {
                url: url.to_string(),
                up_count,
            })
            .collect();
        Ok(rank_entries(entries, limit))
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn find_session(&self, session_id: Uuid) -> Result<Option<Session>, StoreError> {
        Ok(self.inner.lock().unwrap().sessions.get(&session_id).cloned())
    }
}

/// Serves fixed pages; page `n` is `pages[n - 1]`, anything past the end reports the feed ended.
pub struct ScriptedGallery {
    pages: Vec<Vec<ImageCandidate>>,
    failing_pages: HashSet<u32>,
    requested: Mutex<Vec<u32>>,
}

impl ScriptedGallery {
    pub fn new(pages: Vec<Vec<ImageCandidate>>) -> Self {
        Self {
            pages,
            failing_pages: HashSet::new(),
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_on(mut self, page: u32) -> Self {
        self.failing_pages.insert(page);
        self
    }

    pub fn requested_pages(&self) -> Vec<u32> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl GallerySource for ScriptedGallery {
    async fn fetch_page(&self, page: u32) -> Result<Option<Vec<ImageCandidate>>, FeedError> {
        self.requested.lock().unwrap().push(page);
        if self.failing_pages.contains(&page) {
            return Err(FeedError::Unavailable {
                page,
                reason: "scripted failure".to_string(),
            });
        }
        let index = usize::try_from(page).unwrap_or(usize::MAX).saturating_sub(1);
        Ok(self.pages.get(index).cloned())
    }
}

pub fn candidate(link: &str) -> ImageCandidate {
    ImageCandidate {
        id: link.rsplit('/').next().unwrap_or(link).to_string(),
        link: link.to_string(),
        title: format!("kitten {link}"),
        height: 480,
        width: 640,
    }
}

pub fn page_of(page: u32, size: usize) -> Vec<ImageCandidate> {
    (0..size)
        .map(|i| candidate(&format!("https://i.imgur.com/p{page}-{i}.jpg")))
        .collect()
}

pub fn test_state(
    store: Arc<MemoryStore>,
    gallery: Arc<ScriptedGallery>,
    max_pages: u32,
) -> Arc<ServerState> {
    test_state_with_session_ttl(store, gallery, max_pages, DEFAULT_SESSION_CACHE_TTL)
}

pub fn test_state_with_session_ttl(
    store: Arc<MemoryStore>,
    gallery: Arc<ScriptedGallery>,
    max_pages: u32,
    session_cache_ttl: std::time::Duration,
) -> Arc<ServerState> {
    Arc::new(
        ServerState::builder()
            .app_name_version("kitten-critic test".to_string())
            .server_start_time(tokio::time::Instant::now())
            .vote_store(store.clone())
            .session_store(store)
            .feed(FeedFetcher::new(gallery, max_pages))
            .session_cache_ttl(session_cache_ttl)
            .deployment_environment(DeploymentEnvironment::Local)
            .build()
            .unwrap(),
    )
}
