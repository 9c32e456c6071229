//! Cancellable delayed prompts, one per user.
//!
//! Scheduling a nudge for a user replaces (and cancels) any nudge already
//! pending for them. Every nudge token is a child of the scheduler's root
//! token, so cancelling the root on shutdown drops all pending prompts.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use dashmap::DashMap;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use datebot_types::ids::UserId;

#[derive(Debug)]
struct Pending {
    generation: u64,
    token: CancellationToken,
}

/// Per-user scheduler for delayed confirmation prompts.
pub struct NudgeScheduler {
    pending: Arc<DashMap<UserId, Pending>>,
    generation: AtomicU64,
    root: CancellationToken,
}

impl NudgeScheduler {
    pub fn new(root: CancellationToken) -> Self {
        Self {
            pending: Arc::new(DashMap::new()),
            generation: AtomicU64::new(0),
            root,
        }
    }

    /// Run `fire` after `delay` unless cancelled first.
    ///
    /// Any nudge already pending for `user_id` is cancelled.
    pub fn schedule<F>(&self, user_id: UserId, delay: Duration, fire: F) -> JoinHandle<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let generation = self.generation.fetch_add(1, Ordering::Relaxed);
        let token = self.root.child_token();

        if let Some(previous) = self.pending.insert(
            user_id,
            Pending {
                generation,
                token: token.clone(),
            },
        ) {
            previous.token.cancel();
            debug!(%user_id, "replaced pending nudge");
        }

        let pending = Arc::clone(&self.pending);
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {
                    debug!(%user_id, "nudge cancelled");
                }
                _ = tokio::time::sleep(delay) => {
                    pending.remove_if(&user_id, |_, p| p.generation == generation);
                    fire.await;
                }
            }
        })
    }

    /// Cancel the user's pending nudge. Returns `true` if one was pending.
    pub fn cancel(&self, user_id: UserId) -> bool {
        match self.pending.remove(&user_id) {
            Some((_, pending)) => {
                pending.token.cancel();
                debug!(%user_id, "cancelled pending nudge");
                true
            }
            None => false,
        }
    }

    pub fn is_pending(&self, user_id: UserId) -> bool {
        self.pending.contains_key(&user_id)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}

impl std::fmt::Debug for NudgeScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NudgeScheduler")
            .field("pending", &self.pending.len())
            .finish()
    }
}
