use super::{LoadState, StaleTracker};
use crate::api::{MenuApi, OrdersApi};
use crate::events::{ChangeFeed, ResourceKind};
use crate::router::Route;
use crate::types::{MenuItem, Order, OrderStatus, Result};
use chrono::{Local, NaiveDate};
use serde::Serialize;
use tracing::{debug, error};

/// Headline counters of the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub menu_count: usize,
    pub available_count: usize,
    pub orders_today: usize,
    pub pending_orders: usize,
}

impl DashboardStats {
    /// `today` is a local calendar date; order timestamps are converted to the
    /// local zone before comparing.
    pub fn compute(menu: &[MenuItem], orders: &[Order], today: NaiveDate) -> Self {
        Self {
            menu_count: menu.len(),
            available_count: menu.iter().filter(|m| m.available).count(),
            orders_today: orders
                .iter()
                .filter(|o| o.created_at.with_timezone(&Local).date_naive() == today)
                .count(),
            pending_orders: orders.iter().filter(|o| o.status.is_open()).count(),
        }
    }
}

/// One summary card with its deep link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardCard {
    pub label: &'static str,
    pub value: usize,
    pub link_label: &'static str,
    pub route: Route,
}

/// Overview page: counts fetched once at mount.
#[derive(Debug, Default)]
pub struct DashboardPage {
    stats: DashboardStats,
    state: LoadState,
    stale: StaleTracker,
}

impl DashboardPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> DashboardStats {
        self.stats
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    /// Fetch menu and orders in parallel and recompute the counters. On
    /// failure the error is logged and the previous counters stay.
    pub async fn load<A>(&mut self, api: &A)
    where
        A: MenuApi + OrdersApi + ?Sized,
    {
        self.state = LoadState::Loading;
        match Self::fetch(api).await {
            Ok((menu, orders)) => {
                self.stats = DashboardStats::compute(&menu, &orders, Local::now().date_naive());
                debug!(stats = ?self.stats, "Dashboard loaded");
                self.state = LoadState::Loaded;
            }
            Err(e) => {
                error!(error = %e, "Failed to load dashboard");
                self.state = LoadState::Failed(e.to_string());
            }
        }
    }

    async fn fetch<A>(api: &A) -> Result<(Vec<MenuItem>, Vec<Order>)>
    where
        A: MenuApi + OrdersApi + ?Sized,
    {
        futures::try_join!(api.list_menu(None), api.list_orders(None))
    }

    /// Mark the counters stale whenever either resource changes in-process.
    pub fn watch_changes(&mut self, feed: &ChangeFeed) {
        self.stale
            .watch(feed, &[ResourceKind::Menu, ResourceKind::Orders]);
    }

    /// Reload if a watched change arrived since the last check.
    pub async fn refresh_if_stale<A>(&mut self, api: &A) -> bool
    where
        A: MenuApi + OrdersApi + ?Sized,
    {
        if !self.stale.take_stale() {
            return false;
        }
        self.load(api).await;
        true
    }

    pub fn cards(&self) -> Vec<DashboardCard> {
        vec![
            DashboardCard {
                label: "Menu items",
                value: self.stats.menu_count,
                link_label: "Manage menu",
                route: Route::Menu,
            },
            DashboardCard {
                label: "Available now",
                value: self.stats.available_count,
                link_label: "Toggle inventory",
                route: Route::Inventory,
            },
            DashboardCard {
                label: "Orders today",
                value: self.stats.orders_today,
                link_label: "View orders",
                route: Route::Orders { status: None },
            },
            DashboardCard {
                label: "Pending orders",
                value: self.stats.pending_orders,
                link_label: "Handle orders",
                route: Route::Orders {
                    status: Some(OrderStatus::Pending),
                },
            },
        ]
    }
}
