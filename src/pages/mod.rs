//! Page view-state
//!
//! Each page owns the local state of one resource view: the last fetched
//! records, a [`LoadState`], filters, and the mutation handlers that call the
//! API and reconcile the result. Filtered and aggregated views are computed on
//! demand from that state, never stored.
//!
//! List fetches are numbered by a [`RequestSequence`]. A response is applied
//! only if no newer fetch has already been applied, so a slow stale response
//! cannot overwrite a fresher one.

pub mod dashboard;
pub mod inventory;
pub mod menu;
pub mod orders;

pub use dashboard::{DashboardCard, DashboardPage, DashboardStats};
pub use inventory::{AvailabilityFilter, InventoryCounts, InventoryPage};
pub use menu::MenuPage;
pub use orders::OrdersPage;

use crate::events::{ChangeFeed, ChangeSubscription, ResourceKind};

/// Observable load status of a page. Data is held separately and survives a
/// failed reload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Loading,
    Loaded,
    Failed(String),
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

/// Number handed out when a list fetch starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

/// Monotonic numbering of list fetches for one page.
#[derive(Debug, Default)]
pub struct RequestSequence {
    issued: u64,
    applied: u64,
}

impl RequestSequence {
    pub fn issue(&mut self) -> Ticket {
        self.issued += 1;
        Ticket(self.issued)
    }

    /// Whether the response for `ticket` should be applied. Highest applied
    /// ticket wins; anything older is discarded.
    pub fn accept(&mut self, ticket: Ticket) -> bool {
        if ticket.0 > self.applied {
            self.applied = ticket.0;
            true
        } else {
            false
        }
    }

    /// True while the newest issued fetch has not resolved.
    pub fn in_flight(&self) -> bool {
        self.applied < self.issued
    }
}

/// Optional subscription to the change feed marking a page's data stale.
#[derive(Debug, Default)]
pub(crate) struct StaleTracker {
    subscription: Option<ChangeSubscription>,
}

impl StaleTracker {
    pub(crate) fn watch(&mut self, feed: &ChangeFeed, kinds: &[ResourceKind]) {
        self.subscription = Some(feed.subscribe(kinds));
    }

    pub(crate) fn take_stale(&mut self) -> bool {
        self.subscription
            .as_mut()
            .map(ChangeSubscription::take_stale)
            .unwrap_or(false)
    }
}

/// Sorted unique non-empty categories.
pub(crate) fn unique_categories<'a>(categories: impl Iterator<Item = Option<&'a str>>) -> Vec<String> {
    let mut out: Vec<String> = categories.flatten().map(str::to_owned).collect();
    out.sort();
    out.dedup();
    out
}
