//! In-process resource change feed
//!
//! The server has no push channel, so the client publishes a
//! [`ResourceChange`] after every successful mutation it performs. Pages that
//! hold a [`ChangeSubscription`] can ask whether their cached list went stale
//! and reload instead of polling.

use tokio::sync::broadcast;
use tokio::sync::broadcast::error::TryRecvError;
use tracing::trace;

const DEFAULT_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Menu,
    Orders,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeAction {
    Created,
    Updated,
    Deleted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceChange {
    pub kind: ResourceKind,
    pub action: ChangeAction,
    pub id: String,
}

impl ResourceChange {
    pub fn new(kind: ResourceKind, action: ChangeAction, id: impl Into<String>) -> Self {
        Self {
            kind,
            action,
            id: id.into(),
        }
    }
}

/// Broadcast side of the feed. Cheap to clone.
#[derive(Debug, Clone)]
pub struct ChangeFeed {
    sender: broadcast::Sender<ResourceChange>,
}

impl Default for ChangeFeed {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl ChangeFeed {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn publish(&self, change: ResourceChange) {
        trace!(kind = ?change.kind, action = ?change.action, id = %change.id, "Publishing resource change");
        // No subscribers is fine; nobody has a cache to invalidate.
        let _ = self.sender.send(change);
    }

    /// Subscribe to changes of the given resource kinds.
    pub fn subscribe(&self, kinds: &[ResourceKind]) -> ChangeSubscription {
        ChangeSubscription {
            receiver: self.sender.subscribe(),
            kinds: kinds.to_vec(),
        }
    }
}

#[derive(Debug)]
pub struct ChangeSubscription {
    receiver: broadcast::Receiver<ResourceChange>,
    kinds: Vec<ResourceKind>,
}

impl ChangeSubscription {
    /// Drain pending events and report whether any of them touched a watched
    /// kind. A lagged receiver counts as stale since events were dropped.
    pub fn take_stale(&mut self) -> bool {
        let mut stale = false;
        loop {
            match self.receiver.try_recv() {
                Ok(change) => stale |= self.kinds.contains(&change.kind),
                Err(TryRecvError::Lagged(_)) => stale = true,
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }
        stale
    }
}
