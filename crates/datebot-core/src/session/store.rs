//! In-memory store of in-progress selections, keyed by user.
//!
//! Entries expire after a configurable idle TTL and the store holds at most
//! `capacity` users; inserting a new user into a full store evicts the entry
//! that was touched least recently. Expired entries read as missing and are
//! dropped lazily on access or eagerly by the sweeper task.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use datebot_types::ids::UserId;
use datebot_types::selection::{SelectionPhase, UserSelection};

#[derive(Debug, Clone)]
struct Entry {
    selection: UserSelection,
    touched_at: Instant,
}

impl Entry {
    fn is_expired(&self, ttl: Duration, now: Instant) -> bool {
        now.saturating_duration_since(self.touched_at) >= ttl
    }
}

/// Process-wide selection store.
pub struct SessionStore {
    entries: DashMap<UserId, Entry>,
    ttl: Duration,
    capacity: usize,
}

impl SessionStore {
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
            capacity: capacity.max(1),
        }
    }

    /// Look up a user's live selection. Expired entries are removed.
    pub fn get(&self, user_id: UserId) -> Option<UserSelection> {
        let now = Instant::now();
        {
            let entry = self.entries.get(&user_id)?;
            if !entry.is_expired(self.ttl, now) {
                return Some(entry.selection.clone());
            }
        }
        self.entries
            .remove_if(&user_id, |_, entry| entry.is_expired(self.ttl, now));
        debug!(%user_id, "selection expired");
        None
    }

    /// Store a selection, replacing any earlier one for the same user.
    pub fn insert(&self, selection: UserSelection) {
        let user_id = selection.user_id;
        if !self.entries.contains_key(&user_id) && self.entries.len() >= self.capacity {
            self.prune_expired();
            if self.entries.len() >= self.capacity {
                self.evict_oldest();
            }
        }
        self.entries.insert(
            user_id,
            Entry {
                selection,
                touched_at: Instant::now(),
            },
        );
    }

    /// Move a live selection to a new phase and refresh its TTL.
    ///
    /// Returns the updated selection, or `None` if the user has none.
    pub fn set_phase(&self, user_id: UserId, phase: SelectionPhase) -> Option<UserSelection> {
        let now = Instant::now();
        let mut entry = self.entries.get_mut(&user_id)?;
        if entry.is_expired(self.ttl, now) {
            return None;
        }
        entry.selection.phase = phase;
        entry.touched_at = now;
        Some(entry.selection.clone())
    }

    /// Forget a user's selection.
    pub fn remove(&self, user_id: UserId) -> Option<UserSelection> {
        self.entries.remove(&user_id).map(|(_, entry)| entry.selection)
    }

    /// Drop every expired entry. Returns how many were removed.
    pub fn prune_expired(&self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired(self.ttl, now));
        before.saturating_sub(self.entries.len())
    }

    fn evict_oldest(&self) {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|entry| entry.touched_at)
            .map(|entry| *entry.key());
        if let Some(user_id) = oldest {
            self.entries.remove(&user_id);
            debug!(%user_id, "evicted oldest selection (store full)");
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Spawn a task that prunes expired entries every `interval` until
    /// `shutdown` is cancelled.
    pub fn spawn_sweeper(
        self: Arc<Self>,
        interval: Duration,
        shutdown: CancellationToken,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.tick().await;
            loop {
                tokio::select! {
                    _ = shutdown.cancelled() => break,
                    _ = ticker.tick() => {
                        let removed = self.prune_expired();
                        if removed > 0 {
                            debug!(removed, remaining = self.len(), "swept expired selections");
                        }
                    }
                }
            }
        })
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("entries", &self.entries.len())
            .field("ttl", &self.ttl)
            .field("capacity", &self.capacity)
            .finish()
    }
}
