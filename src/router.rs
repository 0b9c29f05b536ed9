//! Client-side routes and navigation state
//!
//! A [`Location`] is the path plus query string of a dashboard page, e.g.
//! `/orders?status=pending`. The [`Navigator`] owns the current location and
//! is the single source of truth for state that lives in the URL: pages read
//! from it on mount, write to it on user input, and watch it for external
//! changes.

use crate::types::{AppError, OrderStatus, Result};
use reqwest::Url;
use std::fmt;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::warn;

const ORIGIN: &str = "http://dashboard.local/";

/// Path and decoded query pairs of a client-side URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    path: String,
    query: Vec<(String, String)>,
}

impl Location {
    /// Parse a client-side URL such as `/orders?status=pending`.
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        let origin = Url::parse(ORIGIN).map_err(|e| AppError::InvalidInput(e.to_string()))?;
        let url = origin
            .join(input)
            .map_err(|e| AppError::InvalidInput(format!("invalid route '{}': {}", input, e)))?;

        let path = match url.path().trim_end_matches('/') {
            "" => "/".to_string(),
            trimmed => trimmed.to_string(),
        };
        let query = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        Ok(Self { path, query })
    }

    /// A location with no query string.
    pub fn path_only(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: Vec::new(),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Copy of this location with `key` set to `value`, or removed when
    /// `value` is `None`. Other parameters keep their order.
    pub fn with_query_param(&self, key: &str, value: Option<&str>) -> Self {
        let mut query: Vec<(String, String)> = self
            .query
            .iter()
            .filter(|(k, _)| k != key)
            .cloned()
            .collect();
        if let Some(value) = value {
            query.push((key.to_string(), value.to_string()));
        }
        Self {
            path: self.path.clone(),
            query,
        }
    }

    pub fn route(&self) -> Route {
        match self.path.as_str() {
            "/" => Route::Dashboard,
            "/menu" => Route::Menu,
            "/inventory" => Route::Inventory,
            "/orders" => Route::Orders {
                status: self.status_filter(),
            },
            other => Route::NotFound(other.to_string()),
        }
    }

    /// The `status` query parameter as an order status. Unknown values are
    /// ignored so a bad link falls back to showing every order.
    pub fn status_filter(&self) -> Option<OrderStatus> {
        let raw = self.query_param("status").filter(|s| !s.is_empty())?;
        match raw.parse() {
            Ok(status) => Some(status),
            Err(e) => {
                warn!(error = %e, "Ignoring unknown status in URL");
                None
            }
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)?;
        if self.query.is_empty() {
            return Ok(());
        }
        match Url::parse(ORIGIN) {
            Ok(mut url) => {
                url.query_pairs_mut().extend_pairs(self.query.iter());
                write!(f, "?{}", url.query().unwrap_or_default())
            }
            Err(_) => {
                let raw: Vec<String> = self.query.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
                write!(f, "?{}", raw.join("&"))
            }
        }
    }
}

/// The pages of the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Dashboard,
    Menu,
    Inventory,
    Orders { status: Option<OrderStatus> },
    NotFound(String),
}

impl Route {
    pub fn location(&self) -> Location {
        match self {
            Route::Dashboard => Location::path_only("/"),
            Route::Menu => Location::path_only("/menu"),
            Route::Inventory => Location::path_only("/inventory"),
            Route::Orders { status } => Location::path_only("/orders")
                .with_query_param("status", status.map(OrderStatus::as_str)),
            Route::NotFound(path) => Location::path_only(path.clone()),
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Dashboard => "Dashboard",
            Route::Menu => "Menu",
            Route::Inventory => "Inventory",
            Route::Orders { .. } => "Orders",
            Route::NotFound(_) => "Not Found",
        }
    }
}

/// Shared holder of the current location. Cheap to clone; clones observe the
/// same state.
#[derive(Debug, Clone)]
pub struct Navigator {
    sender: Arc<watch::Sender<Location>>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(Location::path_only("/"))
    }
}

impl Navigator {
    pub fn new(initial: Location) -> Self {
        let (sender, _) = watch::channel(initial);
        Self {
            sender: Arc::new(sender),
        }
    }

    pub fn location(&self) -> Location {
        self.sender.borrow().clone()
    }

    pub fn navigate(&self, location: Location) {
        self.sender.send_replace(location);
    }

    /// Set or clear one query parameter on the current location.
    pub fn set_query_param(&self, key: &str, value: Option<&str>) {
        self.sender
            .send_modify(|location| *location = location.with_query_param(key, value));
    }

    pub fn subscribe(&self) -> watch::Receiver<Location> {
        self.sender.subscribe()
    }
}
