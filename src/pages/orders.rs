use super::{LoadState, RequestSequence, StaleTracker, Ticket};
use crate::api::OrdersApi;
use crate::events::{ChangeFeed, ResourceKind};
use crate::router::Navigator;
use crate::types::{Order, OrderStatus, Result};
use chrono::Local;
use tracing::{debug, error};

const STATUS_PARAM: &str = "status";

/// Order list with a status filter kept in the URL.
///
/// The [`Navigator`] location is authoritative: the page reads the filter from
/// it on mount, writes it back when the user picks a filter, and reloads when
/// the location changes underneath it.
#[derive(Debug)]
pub struct OrdersPage {
    orders: Vec<Order>,
    state: LoadState,
    sequence: RequestSequence,
    status_filter: Option<OrderStatus>,
    updating: Option<String>,
    navigator: Navigator,
    stale: StaleTracker,
}

impl OrdersPage {
    pub fn new(navigator: Navigator) -> Self {
        let status_filter = navigator.location().status_filter();
        Self {
            orders: Vec::new(),
            state: LoadState::default(),
            sequence: RequestSequence::default(),
            status_filter,
            updating: None,
            navigator,
            stale: StaleTracker::default(),
        }
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading() || self.sequence.in_flight()
    }

    pub fn status_filter(&self) -> Option<OrderStatus> {
        self.status_filter
    }

    /// Id of the order whose status change is in flight.
    pub fn updating(&self) -> Option<&str> {
        self.updating.as_deref()
    }

    /// Initial load using the filter read from the URL.
    pub async fn mount<A: OrdersApi + ?Sized>(&mut self, api: &A) {
        self.status_filter = self.navigator.location().status_filter();
        self.load(api).await;
    }

    pub async fn load<A: OrdersApi + ?Sized>(&mut self, api: &A) {
        let ticket = self.begin_load();
        let result = api.list_orders(self.status_filter).await;
        self.finish_load(ticket, result);
    }

    pub fn begin_load(&mut self) -> Ticket {
        self.state = LoadState::Loading;
        self.sequence.issue()
    }

    pub fn finish_load(&mut self, ticket: Ticket, result: Result<Vec<Order>>) {
        if !self.sequence.accept(ticket) {
            debug!(?ticket, "Discarding stale orders response");
            return;
        }
        match result {
            Ok(orders) => {
                self.orders = orders;
                self.state = LoadState::Loaded;
            }
            Err(e) => {
                error!(error = %e, "Failed to load orders");
                self.state = LoadState::Failed(e.to_string());
            }
        }
    }

    /// User picked a filter: write it to the URL, then reload.
    pub async fn select_status<A: OrdersApi + ?Sized>(
        &mut self,
        api: &A,
        status: Option<OrderStatus>,
    ) {
        self.navigator
            .set_query_param(STATUS_PARAM, status.map(OrderStatus::as_str));
        self.status_filter = status;
        self.load(api).await;
    }

    /// React to an external location change. Reloads and returns true when
    /// the URL's filter differs from the current one.
    pub async fn sync_location<A: OrdersApi + ?Sized>(&mut self, api: &A) -> bool {
        let from_url = self.navigator.location().status_filter();
        if from_url == self.status_filter {
            return false;
        }
        self.status_filter = from_url;
        self.load(api).await;
        true
    }

    /// Set an order's status and merge the returned order by id. Any status
    /// may be chosen; the server decides what is legal.
    pub async fn update_status<A: OrdersApi + ?Sized>(
        &mut self,
        api: &A,
        id: &str,
        status: OrderStatus,
    ) -> Result<Order> {
        self.updating = Some(id.to_string());
        let result = api.update_order_status(id, status).await;
        self.updating = None;

        match result {
            Ok(updated) => {
                if let Some(slot) = self.orders.iter_mut().find(|o| o.id == updated.id) {
                    *slot = updated.clone();
                }
                Ok(updated)
            }
            Err(e) => {
                error!(id = %id, status = %status, error = %e, "Failed to update order status");
                Err(e)
            }
        }
    }

    pub fn watch_changes(&mut self, feed: &ChangeFeed) {
        self.stale.watch(feed, &[ResourceKind::Orders]);
    }

    pub async fn refresh_if_stale<A: OrdersApi + ?Sized>(&mut self, api: &A) -> bool {
        if !self.stale.take_stale() {
            return false;
        }
        self.load(api).await;
        true
    }
}

/// Short local date and time, e.g. `06/01/24, 18:30`.
pub fn format_created_at(order: &Order) -> String {
    order
        .created_at
        .with_timezone(&Local)
        .format("%m/%d/%y, %H:%M")
        .to_string()
}
